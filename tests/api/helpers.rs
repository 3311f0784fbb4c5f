//! tests/api/helpers.rs
use newsletter_signup::configuration::get_configuration;
use newsletter_signup::subscription_client::SubscriptionClient;
use newsletter_signup::telemetry::{get_subscriber, init_subscriber};
use newsletter_signup::wizard::SubscribeWizard;
use secrecy::Secret;
use serde_json::json;
use std::net::TcpListener;
use std::sync::LazyLock;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber).expect("Failed to initialise tracing.");
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).expect("Failed to initialise tracing.");
    }
});

pub struct TestApp {
    pub endpoint_server: MockServer,
    pub client: SubscriptionClient,
}

impl TestApp {
    /// Answers every request carrying `action` with the given JSON body.
    pub async fn respond_to(&self, action: &str, body: serde_json::Value) {
        Mock::given(path("/"))
            .and(method("POST"))
            .and(body_partial_json(json!({ "action": action })))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.endpoint_server)
            .await;
    }

    pub async fn received_bodies(&self) -> Vec<serde_json::Value> {
        self.endpoint_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect()
    }
}

pub async fn spawn_app() -> TestApp {
    LazyLock::force(&TRACING);
    let endpoint_server = MockServer::start().await;

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        c.endpoint.base_url = Secret::new(endpoint_server.uri());
        c.endpoint.timeout_milliseconds = 500;
        c
    };

    let client = SubscriptionClient::new(
        configuration.endpoint.base_url.clone(),
        configuration.endpoint.timeout(),
    )
    .expect("Failed to build the subscription client.");

    TestApp {
        endpoint_server,
        client,
    }
}

/// A client pointed at a port nothing listens on.
pub fn unreachable_client() -> SubscriptionClient {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind a random port.");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let uri = format!("http://127.0.0.1:{}", port);
    SubscriptionClient::new(Secret::new(uri), Duration::from_millis(500))
        .expect("Failed to build the subscription client.")
}

/// A wizard sitting on the last step with a valid simple-mode draft.
pub fn completed_wizard() -> SubscribeWizard {
    let mut wizard = SubscribeWizard::default();
    let draft = wizard.draft_mut();
    draft.first_name = " Ursula".into();
    draft.last_name = "Le Guin ".into();
    draft.email = "ursula@earthsea.org".into();
    wizard.next().expect("Personal details should be valid.");
    wizard.draft_mut().toggle_tag("AI");
    wizard.draft_mut().toggle_tag("Open Source");
    wizard.next().expect("Tag selection should be valid.");
    wizard
}
