//! src/domain/new_subscriber.rs
use crate::domain::{
    ArticleMode, ArticlePlan, ContactNumber, CountryCode, DEFAULT_SIMPLE_COUNT,
    MIN_TAGS_FOR_PER_TOPIC, SubscriberEmail, SubscriberName, Tag, TagChange, TagSelection,
    TopicDistribution,
};

/// Everything typed into the subscribe form so far.
///
/// The personal fields are free-form and only checked when a step is
/// validated. Tags, article mode and topic counts go through methods so the
/// topic distribution always mirrors the selected tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country_code: CountryCode,
    pub mobile: String,
    pub simple_count: u32,
    tags: TagSelection,
    article_mode: ArticleMode,
    topic_distribution: TopicDistribution,
}

impl Default for SubscriberDraft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            country_code: CountryCode::default(),
            mobile: String::new(),
            simple_count: DEFAULT_SIMPLE_COUNT,
            tags: TagSelection::default(),
            article_mode: ArticleMode::default(),
            topic_distribution: TopicDistribution::default(),
        }
    }
}

impl SubscriberDraft {
    pub fn tags(&self) -> &TagSelection {
        &self.tags
    }

    pub fn article_mode(&self) -> ArticleMode {
        self.article_mode
    }

    pub fn topic_distribution(&self) -> &TopicDistribution {
        &self.topic_distribution
    }

    pub fn per_topic_available(&self) -> bool {
        self.tags.len() >= MIN_TAGS_FOR_PER_TOPIC
    }

    pub fn toggle_tag(&mut self, label: &str) -> TagChange {
        let change = self.tags.toggle(label);
        self.apply(&change);
        change
    }

    pub fn add_custom_tag(&mut self, raw: &str) -> TagChange {
        let change = self.tags.add_custom(raw);
        self.apply(&change);
        change
    }

    pub fn remove_tag(&mut self, label: &str) -> TagChange {
        let change = self.tags.remove(label);
        self.apply(&change);
        change
    }

    /// Returns `false` and leaves the mode untouched when per-topic mode is
    /// requested with fewer than two selected tags.
    pub fn set_article_mode(&mut self, mode: ArticleMode) -> bool {
        if mode == ArticleMode::PerTopic && !self.per_topic_available() {
            return false;
        }
        self.article_mode = mode;
        if mode == ArticleMode::PerTopic {
            for tag in self.tags.iter() {
                self.topic_distribution.seed(tag.clone());
            }
        }
        true
    }

    /// Only selected tags can carry a count.
    pub fn set_topic_count(&mut self, label: &str, count: u32) -> Result<(), String> {
        let tag = self
            .tags
            .iter()
            .find(|t| t.as_ref() == label)
            .cloned()
            .ok_or_else(|| format!("{} is not a selected tag.", label))?;
        self.topic_distribution.set(tag, count)
    }

    fn apply(&mut self, change: &TagChange) {
        match change {
            TagChange::Added(tag) => {
                if self.article_mode == ArticleMode::PerTopic {
                    self.topic_distribution.seed(tag.clone());
                }
            }
            TagChange::Removed(tag) => {
                self.topic_distribution.remove(tag.as_ref());
                if self.article_mode == ArticleMode::PerTopic && !self.per_topic_available() {
                    self.article_mode = ArticleMode::Simple;
                }
            }
            TagChange::Unchanged => {}
        }
    }
}

/// A draft that passed every step, frozen for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscriber {
    pub first_name: SubscriberName,
    pub last_name: SubscriberName,
    pub email: SubscriberEmail,
    pub contact: Option<ContactNumber>,
    pub tags: Vec<Tag>,
    pub plan: ArticlePlan,
}
