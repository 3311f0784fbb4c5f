//! tests/api/unsubscribe.rs
use crate::helpers::{spawn_app, unreachable_client};
use newsletter_signup::subscription_client::UnsubscribeOutcome;
use newsletter_signup::unsubscribe::UnsubscribeForm;
use newsletter_signup::validation::StepError;
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn unsubscribe_sends_the_trimmed_email() {
    let app = spawn_app().await;
    app.respond_to("unsubscribe", json!({ "status": "success" })).await;
    let mut form = UnsubscribeForm::new("  ursula@earthsea.org ");

    form.submit(&app.client).await;

    let body = &app.received_bodies().await[0];
    assert_eq!(body["action"], "unsubscribe");
    assert_eq!(body["email"], "ursula@earthsea.org");
    assert!(body["unsubscribedAt"].as_str().unwrap().ends_with('Z'));
    assert_eq!(body.as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn each_response_status_gets_its_own_message() {
    let test_cases = vec![
        (
            json!({ "status": "success" }),
            "You have been unsubscribed. Sorry to see you go.",
        ),
        (
            json!({ "status": "not_found" }),
            "This email is not in our subscriber list. Please check and try again.",
        ),
        (
            json!({ "status": "error", "message": "Sheet is locked." }),
            "Sheet is locked.",
        ),
        (
            json!({ "status": "error" }),
            "Something went wrong. Please try again.",
        ),
    ];

    for (response, expected) in test_cases {
        let app = spawn_app().await;
        app.respond_to("unsubscribe", response.clone()).await;
        let mut form = UnsubscribeForm::new("ursula@earthsea.org");

        let outcome = form.submit(&app.client).await.cloned();

        assert_eq!(
            outcome.as_ref().map(|o| o.message()),
            Some(expected),
            "Unexpected message when the endpoint answered {}.",
            response
        );
    }
}

#[tokio::test]
async fn not_found_renders_the_not_in_list_outcome() {
    let app = spawn_app().await;
    app.respond_to("unsubscribe", json!({ "status": "not_found" })).await;
    let mut form = UnsubscribeForm::new("stranger@example.com");

    let outcome = form.submit(&app.client).await.cloned();

    assert_eq!(outcome, Some(UnsubscribeOutcome::NotFound));
}

#[tokio::test]
async fn blank_email_sends_nothing() {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.endpoint_server)
        .await;
    let mut form = UnsubscribeForm::new("   ");

    assert!(form.submit(&app.client).await.is_none());
}

#[tokio::test]
async fn malformed_email_sends_nothing() {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.endpoint_server)
        .await;
    let mut form = UnsubscribeForm::new("abc");

    assert!(form.submit(&app.client).await.is_none());
    assert_eq!(form.error(), Some(StepError::EmailInvalid));
    assert!(!form.is_loading());
}

#[tokio::test]
async fn unreachable_endpoint_reports_a_network_error() {
    let client = unreachable_client();
    let mut form = UnsubscribeForm::new("ursula@earthsea.org");

    let outcome = form.submit(&client).await.cloned();

    assert_eq!(outcome, Some(UnsubscribeOutcome::Failed("Network error.".into())));
}
