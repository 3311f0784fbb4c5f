//! tests/api/console.rs
use crate::helpers::spawn_app;
use newsletter_signup::console::Console;
use newsletter_signup::unsubscribe::UnsubscribeForm;
use newsletter_signup::wizard::SubscribeWizard;
use serde_json::json;
use std::io::Cursor;

/// Runs a script that never reaches a submission.
async fn run_subscribe_script(script: &str) -> (Result<(), anyhow::Error>, String, SubscribeWizard) {
    let app = spawn_app().await;
    let mut wizard = SubscribeWizard::default();
    let mut console = Console::new(Cursor::new(script.as_bytes()), Vec::new());
    let outcome = console.run_subscribe(&mut wizard, &app.client).await;
    let output = String::from_utf8(console.into_output()).unwrap();
    (outcome, output, wizard)
}

#[tokio::test]
async fn scripted_subscribe_renders_the_success_panel() {
    let script = "\
Ursula
Le Guin
ursula@earthsea.org


1
5
next
topic
AI=2
React=3
submit
";
    let app = spawn_app().await;
    app.respond_to("subscribe", json!({ "status": "success" })).await;
    let mut wizard = SubscribeWizard::default();
    let mut console = Console::new(Cursor::new(script.as_bytes()), Vec::new());

    console
        .run_subscribe(&mut wizard, &app.client)
        .await
        .expect("The scripted wizard should complete.");

    let output = String::from_utf8(console.into_output()).unwrap();
    assert!(output.contains("Step 3 of 3"));
    assert!(output.contains("You're subscribed"));
    assert!(output.contains("Check your inbox at 9 AM for your first digest."));

    let body = &app.received_bodies().await[0];
    assert_eq!(body["tags"], json!(["AI", "React"]));
    assert_eq!(body["topicDistribution"], json!({ "AI": 2, "React": 3 }));
    assert_eq!(body["totalCount"], 5);
}

#[tokio::test]
async fn step_errors_are_printed_and_block_progress() {
    let script = "\
Ursula

abc


";
    let (outcome, output, wizard) = run_subscribe_script(script).await;

    assert!(outcome.is_err(), "Closed input should end the run with an error.");
    assert!(output.contains("Last name is required."));
    assert!(!output.contains("Step 2 of 3"));
    assert_eq!(wizard.draft().first_name, "Ursula");
}

#[tokio::test]
async fn per_topic_mode_is_refused_with_a_single_tag() {
    let script = "\
Ursula
Le Guin
a@b.com


1
next
topic
";
    let (_, output, _) = run_subscribe_script(script).await;

    assert!(output.contains("Per-topic mode needs at least 2 tags."));
}

#[tokio::test]
async fn scripted_unsubscribe_prints_the_not_in_list_message() {
    let app = spawn_app().await;
    app.respond_to("unsubscribe", json!({ "status": "not_found" })).await;
    let mut form = UnsubscribeForm::default();
    let mut console = Console::new(Cursor::new("\nstranger@example.com\n".as_bytes()), Vec::new());

    console
        .run_unsubscribe(&mut form, &app.client)
        .await
        .expect("The unsubscribe form should complete.");

    let output = String::from_utf8(console.into_output()).unwrap();
    assert!(output.contains("This email is not in our subscriber list. Please check and try again."));
}

#[tokio::test]
async fn scripted_unsubscribe_asks_again_after_a_malformed_email() {
    let app = spawn_app().await;
    app.respond_to("unsubscribe", json!({ "status": "success" })).await;
    let mut form = UnsubscribeForm::default();
    let script = "abc\nursula@earthsea.org\n";
    let mut console = Console::new(Cursor::new(script.as_bytes()), Vec::new());

    console
        .run_unsubscribe(&mut form, &app.client)
        .await
        .expect("The unsubscribe form should complete.");

    let output = String::from_utf8(console.into_output()).unwrap();
    assert!(output.contains("Please enter a valid email."));
    let bodies = app.received_bodies().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["email"], "ursula@earthsea.org");
}
