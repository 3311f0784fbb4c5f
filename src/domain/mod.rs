mod article_plan;
mod contact_number;
mod new_subscriber;
mod subscriber_email;
mod subscriber_name;
mod tag;

pub use article_plan::{
    ArticleMode, ArticlePlan, DEFAULT_SIMPLE_COUNT, MAX_PER_TOPIC, MIN_TAGS_FOR_PER_TOPIC,
    SIMPLE_COUNTS, SimpleCount, TOTAL_STEP, TopicDistribution,
};
pub use contact_number::{COUNTRY_CODES, ContactNumber, CountryCode};
pub use new_subscriber::{NewSubscriber, SubscriberDraft};
pub use subscriber_email::SubscriberEmail;
pub use subscriber_name::SubscriberName;
pub use tag::{CUSTOM_TAG_MAX_LEN, MAX_TAGS, PREDEFINED_TAGS, Tag, TagChange, TagSelection};
