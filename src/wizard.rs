//! src/wizard.rs
use chrono::{DateTime, Utc};

use crate::domain::{CountryCode, NewSubscriber, SubscriberDraft};
use crate::subscription_client::{SubmitError, SubscribeRequest, SubscriptionClient};
use crate::validation::{StepError, validate_article_plan, validate_personal_details, validate_tags};

pub const SUCCESS_HEADLINE: &str = "You're subscribed";
pub const SUCCESS_DETAIL: &str = "Check your inbox at 9 AM for your first digest.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    PersonalDetails = 1,
    Topics = 2,
    ArticlePlan = 3,
}

impl Step {
    pub const COUNT: usize = 3;

    pub fn number(self) -> usize {
        self as usize
    }

    fn next(self) -> Self {
        match self {
            Step::PersonalDetails => Step::Topics,
            Step::Topics | Step::ArticlePlan => Step::ArticlePlan,
        }
    }

    fn previous(self) -> Self {
        match self {
            Step::PersonalDetails | Step::Topics => Step::PersonalDetails,
            Step::ArticlePlan => Step::Topics,
        }
    }

    fn index(self) -> usize {
        self.number() - 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Loading,
    Submitted,
    Error(String),
}

/// The three-step subscribe form.
#[derive(Debug, Clone)]
pub struct SubscribeWizard {
    step: Step,
    draft: SubscriberDraft,
    step_errors: [Option<StepError>; Step::COUNT],
    status: SubmissionStatus,
    default_country_code: CountryCode,
}

impl Default for SubscribeWizard {
    fn default() -> Self {
        Self::new(SubscriberDraft::default())
    }
}

impl SubscribeWizard {
    /// The draft's country code is the one a fresh draft starts with.
    pub fn new(draft: SubscriberDraft) -> Self {
        Self {
            step: Step::PersonalDetails,
            default_country_code: draft.country_code,
            draft,
            step_errors: [None; Step::COUNT],
            status: SubmissionStatus::Idle,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// "Step 2 of 3"
    pub fn progress(&self) -> String {
        format!("Step {} of {}", self.step.number(), Step::COUNT)
    }

    pub fn draft(&self) -> &SubscriberDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut SubscriberDraft {
        &mut self.draft
    }

    pub fn step_error(&self, step: Step) -> Option<StepError> {
        self.step_errors[step.index()]
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == SubmissionStatus::Loading
    }

    pub fn is_submitted(&self) -> bool {
        self.status == SubmissionStatus::Submitted
    }

    pub fn submit_error(&self) -> Option<&str> {
        match &self.status {
            SubmissionStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Validates `step` and records the result as that step's error.
    pub fn validate(&mut self, step: Step) -> Result<(), StepError> {
        let outcome = match step {
            Step::PersonalDetails => validate_personal_details(&self.draft).map(|_| ()),
            Step::Topics => validate_tags(self.draft.tags()),
            Step::ArticlePlan => validate_article_plan(&self.draft).map(|_| ()),
        };
        self.step_errors[step.index()] = outcome.err();
        outcome
    }

    /// Advances only if the current step validates. The last step stays put.
    pub fn next(&mut self) -> Result<Step, StepError> {
        self.validate(self.step)?;
        self.step = self.step.next();
        Ok(self.step)
    }

    /// Always allowed. Clears any submission error.
    pub fn back(&mut self) -> Step {
        self.step = self.step.previous();
        if matches!(self.status, SubmissionStatus::Error(_)) {
            self.status = SubmissionStatus::Idle;
        }
        self.step
    }

    /// Freezes the draft into a request and marks the wizard as loading.
    ///
    /// Returns `None` while a submission is already in flight, after a
    /// successful one, or when any step fails validation.
    pub fn begin_submission(&mut self, now: DateTime<Utc>) -> Option<SubscribeRequest> {
        if matches!(
            self.status,
            SubmissionStatus::Loading | SubmissionStatus::Submitted
        ) {
            return None;
        }
        for step in [Step::PersonalDetails, Step::Topics, Step::ArticlePlan] {
            if self.validate(step).is_err() {
                return None;
            }
        }
        let subscriber = NewSubscriber::try_from(&self.draft).ok()?;
        self.status = SubmissionStatus::Loading;
        Some(SubscribeRequest::new(&subscriber, now))
    }

    /// On success the draft is discarded.
    pub fn finish_submission(&mut self, outcome: Result<(), SubmitError>) {
        match outcome {
            Ok(()) => {
                self.draft = SubscriberDraft::default();
                self.draft.country_code = self.default_country_code;
                self.status = SubmissionStatus::Submitted;
            }
            Err(e) => self.status = SubmissionStatus::Error(e.to_string()),
        }
    }

    #[tracing::instrument(name = "Submitting the subscribe form", skip_all)]
    pub async fn submit(&mut self, client: &SubscriptionClient) -> &SubmissionStatus {
        if let Some(request) = self.begin_submission(Utc::now()) {
            let outcome = client.subscribe(request).await;
            self.finish_submission(outcome);
        }
        &self.status
    }
}
