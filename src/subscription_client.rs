//! src/subscription_client.rs
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::{
    ArticleMode, CountryCode, NewSubscriber, SubscriberEmail, Tag, TopicDistribution,
};

pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";
pub const SUBSCRIBE_NETWORK_MESSAGE: &str =
    "Network error. Please check the Apps Script URL and try again.";
pub const UNSUBSCRIBE_NETWORK_MESSAGE: &str = "Network error.";

/// Body of every POST to the endpoint, discriminated by `action`.
#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum EndpointRequest {
    Subscribe(SubscribeRequest),
    Unsubscribe(UnsubscribeRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
}

/// One spreadsheet row, as the endpoint expects it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub subscriber_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country_code: Option<CountryCode>,
    pub mobile: Option<String>,
    pub tags: Vec<Tag>,
    pub article_mode: ArticleMode,
    pub total_count: u32,
    pub topic_distribution: Option<TopicDistribution>,
    pub status: SubscriptionStatus,
    pub subscribed_at: String,
    pub unsubscribed_at: Option<String>,
}

impl SubscribeRequest {
    pub fn new(subscriber: &NewSubscriber, now: DateTime<Utc>) -> Self {
        let (country_code, mobile) = match &subscriber.contact {
            Some(contact) => (Some(contact.country_code), Some(contact.mobile.clone())),
            None => (None, None),
        };
        Self {
            subscriber_id: format!("SUB_{}", now.timestamp_millis()),
            first_name: subscriber.first_name.as_ref().to_string(),
            last_name: subscriber.last_name.as_ref().to_string(),
            email: subscriber.email.as_ref().to_string(),
            country_code,
            mobile,
            tags: subscriber.tags.clone(),
            article_mode: subscriber.plan.mode(),
            total_count: subscriber.plan.total_count(),
            topic_distribution: subscriber.plan.topic_distribution().cloned(),
            status: SubscriptionStatus::Active,
            subscribed_at: iso_timestamp(now),
            unsubscribed_at: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsubscribeRequest {
    pub email: String,
    pub unsubscribed_at: String,
}

impl UnsubscribeRequest {
    pub fn new(email: &SubscriberEmail, now: DateTime<Utc>) -> Self {
        Self {
            email: email.as_ref().to_string(),
            unsubscribed_at: iso_timestamp(now),
        }
    }
}

/// `2024-05-01T09:00:00.000Z`
fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// What the endpoint answers. Anything that fails to decode is treated as
/// an empty object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EndpointResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl EndpointResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    pub fn is_not_found(&self) -> bool {
        self.status.as_deref() == Some("not_found")
    }

    /// The endpoint's own message, or the generic one if it sent none.
    pub fn failure_message(&self) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(GENERIC_FAILURE_MESSAGE)
            .to_string()
    }
}

#[derive(thiserror::Error)]
pub enum SubmitError {
    #[error("{0}")]
    Rejected(String),
    #[error("{}", SUBSCRIBE_NETWORK_MESSAGE)]
    Network(#[source] reqwest::Error),
}

impl std::fmt::Debug for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(f, self)
    }
}

pub fn error_chain_fmt(
    f: &mut std::fmt::Formatter<'_>,
    e: &impl std::error::Error,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// How an unsubscribe attempt ended, as shown to the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsubscribeOutcome {
    Unsubscribed,
    NotFound,
    Failed(String),
}

impl UnsubscribeOutcome {
    pub fn from_response(response: &EndpointResponse) -> Self {
        if response.is_success() {
            Self::Unsubscribed
        } else if response.is_not_found() {
            Self::NotFound
        } else {
            Self::Failed(response.failure_message())
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Unsubscribed => "You have been unsubscribed. Sorry to see you go.",
            Self::NotFound => {
                "This email is not in our subscriber list. Please check and try again."
            }
            Self::Failed(message) => message,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubscriptionClient {
    http_client: Client,
    base_url: Secret<String>,
}

impl SubscriptionClient {
    pub fn new(base_url: Secret<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
        })
    }

    #[tracing::instrument(
        name = "Submitting a subscription",
        skip(self, request),
        fields(subscriber_id = %request.subscriber_id)
    )]
    pub async fn subscribe(&self, request: SubscribeRequest) -> Result<(), SubmitError> {
        let response = self
            .post(&EndpointRequest::Subscribe(request))
            .await
            .map_err(|e| {
                tracing::error!(error.cause_chain = ?e, "Subscription request failed to reach the endpoint.");
                SubmitError::Network(e)
            })?;
        if response.is_success() {
            Ok(())
        } else {
            tracing::warn!(status = ?response.status, "The endpoint rejected the subscription.");
            Err(SubmitError::Rejected(response.failure_message()))
        }
    }

    #[tracing::instrument(
        name = "Submitting an unsubscribe request",
        skip(self, request),
        fields(subscriber_email = %request.email)
    )]
    pub async fn unsubscribe(&self, request: UnsubscribeRequest) -> UnsubscribeOutcome {
        match self.post(&EndpointRequest::Unsubscribe(request)).await {
            Ok(response) => UnsubscribeOutcome::from_response(&response),
            Err(e) => {
                tracing::error!(error.cause_chain = ?e, "Unsubscribe request failed to reach the endpoint.");
                UnsubscribeOutcome::Failed(UNSUBSCRIBE_NETWORK_MESSAGE.to_string())
            }
        }
    }

    /// Only transport failures are errors. Whatever comes back, whatever the
    /// HTTP status, is read as an [`EndpointResponse`].
    async fn post(&self, body: &EndpointRequest) -> Result<EndpointResponse, reqwest::Error> {
        let response = self
            .http_client
            .post(self.base_url.expose_secret())
            .json(body)
            .send()
            .await?;
        Ok(response.json::<EndpointResponse>().await.unwrap_or_default())
    }
}
