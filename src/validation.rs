//! src/validation.rs
//!
//! Pure checks for each wizard step. Every function reports only the first
//! rule the draft breaks, so the form shows one message at a time.
use crate::domain::{
    ArticleMode, ArticlePlan, ContactNumber, NewSubscriber, SimpleCount, SubscriberDraft,
    SubscriberEmail, SubscriberName, TagSelection,
};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepError {
    #[error("First name is required.")]
    FirstNameMissing,
    #[error("Last name is required.")]
    LastNameMissing,
    #[error("Email is required.")]
    EmailMissing,
    #[error("Please enter a valid email.")]
    EmailInvalid,
    #[error("Select at least one topic tag.")]
    NoTagsSelected,
    #[error("Select articles per newsletter.")]
    ArticleCountMissing,
    #[error("Total must be greater than 0.")]
    TopicTotalZero,
    #[error("Total must be a multiple of 5.")]
    TopicTotalNotMultipleOfFive,
}

/// Step 1 as it leaves the form: names and email checked, mobile optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalDetails {
    pub first_name: SubscriberName,
    pub last_name: SubscriberName,
    pub email: SubscriberEmail,
    pub contact: Option<ContactNumber>,
}

pub fn validate_personal_details(draft: &SubscriberDraft) -> Result<PersonalDetails, StepError> {
    let first_name =
        SubscriberName::parse(&draft.first_name).map_err(|_| StepError::FirstNameMissing)?;
    let last_name =
        SubscriberName::parse(&draft.last_name).map_err(|_| StepError::LastNameMissing)?;
    if draft.email.trim().is_empty() {
        return Err(StepError::EmailMissing);
    }
    let email = SubscriberEmail::parse(&draft.email).map_err(|_| StepError::EmailInvalid)?;
    Ok(PersonalDetails {
        first_name,
        last_name,
        email,
        contact: ContactNumber::from_input(draft.country_code, &draft.mobile),
    })
}

pub fn validate_tags(tags: &TagSelection) -> Result<(), StepError> {
    if tags.is_empty() {
        Err(StepError::NoTagsSelected)
    } else {
        Ok(())
    }
}

pub fn validate_article_plan(draft: &SubscriberDraft) -> Result<ArticlePlan, StepError> {
    match draft.article_mode() {
        ArticleMode::Simple => SimpleCount::parse(draft.simple_count)
            .map(ArticlePlan::Simple)
            .map_err(|_| StepError::ArticleCountMissing),
        ArticleMode::PerTopic => {
            let distribution = draft.topic_distribution();
            if distribution.total() == 0 {
                Err(StepError::TopicTotalZero)
            } else if !distribution.is_valid_total() {
                Err(StepError::TopicTotalNotMultipleOfFive)
            } else {
                Ok(ArticlePlan::PerTopic(distribution.clone()))
            }
        }
    }
}

impl TryFrom<&SubscriberDraft> for NewSubscriber {
    type Error = StepError;

    fn try_from(draft: &SubscriberDraft) -> Result<Self, Self::Error> {
        let details = validate_personal_details(draft)?;
        validate_tags(draft.tags())?;
        let plan = validate_article_plan(draft)?;
        Ok(NewSubscriber {
            first_name: details.first_name,
            last_name: details.last_name,
            email: details.email,
            contact: details.contact,
            tags: draft.tags().iter().cloned().collect(),
            plan,
        })
    }
}
