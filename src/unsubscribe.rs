//! src/unsubscribe.rs
use chrono::{DateTime, Utc};

use crate::domain::SubscriberEmail;
use crate::subscription_client::{SubscriptionClient, UnsubscribeOutcome, UnsubscribeRequest};
use crate::validation::StepError;

/// The single-field unsubscribe form.
#[derive(Debug, Clone, Default)]
pub struct UnsubscribeForm {
    pub email: String,
    loading: bool,
    error: Option<StepError>,
    outcome: Option<UnsubscribeOutcome>,
}

impl UnsubscribeForm {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Set when the typed address is not a valid email.
    pub fn error(&self) -> Option<StepError> {
        self.error
    }

    pub fn outcome(&self) -> Option<&UnsubscribeOutcome> {
        self.outcome.as_ref()
    }

    /// Clears the previous outcome and marks the form as loading.
    ///
    /// `None` for a blank email, a malformed one (recorded as the form's
    /// error), or while a request is already in flight.
    pub fn begin(&mut self, now: DateTime<Utc>) -> Option<UnsubscribeRequest> {
        if self.loading {
            return None;
        }
        let email = self.email.trim();
        if email.is_empty() {
            return None;
        }
        self.outcome = None;
        match SubscriberEmail::parse(email) {
            Ok(email) => {
                self.error = None;
                self.loading = true;
                Some(UnsubscribeRequest::new(&email, now))
            }
            Err(_) => {
                self.error = Some(StepError::EmailInvalid);
                None
            }
        }
    }

    pub fn finish(&mut self, outcome: UnsubscribeOutcome) {
        self.loading = false;
        self.outcome = Some(outcome);
    }

    pub async fn submit(&mut self, client: &SubscriptionClient) -> Option<&UnsubscribeOutcome> {
        if let Some(request) = self.begin(Utc::now()) {
            let outcome = client.unsubscribe(request).await;
            self.finish(outcome);
        }
        self.outcome.as_ref()
    }
}
