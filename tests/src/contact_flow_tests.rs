use crate::utils::*;
use contact_form::{
    FormConfig, FormController, NoopWidget, SubmissionState, SubmitError, TransportError,
};
use contact_types::Field;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn controller(endpoint: String) -> FormController {
    let config = FormConfig {
        endpoint,
        site_key: "1x00000000000000000000AA".into(),
        reset_after_ms: 4_000,
    };
    let c = FormController::from_config(&config, Arc::new(NoopWidget));
    c.set_field(Field::Name, "Ada");
    c.set_field(Field::Email, "ada@example.com");
    c.set_field(Field::Message, "Hello");
    c
}

async fn settle() {
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_successful_submission_end_to_end() {
    let providers = Providers::start().await;
    providers.verification_returns(true).await;
    providers.email_returns(200, json!({"id": "email_1"})).await;
    let endpoint = spawn_relay(relay_config(&providers)).await;

    let form = controller(endpoint);
    form.on_verification_success("valid-token");
    assert_eq!(form.state(), SubmissionState::Idle);

    // The revert deadline is fixed inside submit(), so it lies in
    // [before + 4000ms, after + 4000ms].
    let before = Instant::now();
    form.submit().await.unwrap();
    let after = Instant::now();

    assert_eq!(form.state(), SubmissionState::Submitted);
    assert!(form.draft().name.is_empty());
    assert!(form.draft().message.is_empty());
    assert!(!form.has_token());

    let emails = providers.sent_emails().await;
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0]["reply_to"], "ada@example.com");

    // Network work is done. Freeze the clock; sleeping lets it auto-advance
    // through the pending reset timer.
    tokio::time::pause();
    tokio::time::sleep_until(before + Duration::from_millis(3_999)).await;
    settle().await;
    assert_eq!(form.state(), SubmissionState::Submitted);

    tokio::time::sleep_until(after + Duration::from_millis(4_000)).await;
    settle().await;
    assert_eq!(form.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_invalid_captcha_end_to_end() {
    let providers = Providers::start().await;
    providers.verification_returns(false).await;
    providers.email_returns(200, json!({"id": "never"})).await;
    let endpoint = spawn_relay(relay_config(&providers)).await;

    let form = controller(endpoint);
    form.on_verification_success("valid-token");
    let before = form.draft();

    let err = form.submit().await.unwrap_err();

    assert_eq!(
        err,
        SubmitError::Relay(TransportError::Rejected {
            status: 403,
            message: "Invalid CAPTCHA".into()
        })
    );
    assert_eq!(form.state(), SubmissionState::Errored);
    assert_eq!(form.draft(), before);
    assert!(!form.has_token());
    assert!(providers.sent_emails().await.is_empty());

    // The stale token is gone: the next submit fails its precondition locally.
    assert_eq!(form.submit().await, Err(SubmitError::MissingVerification));
    assert_eq!(providers.verify_calls().await, 1);
}

#[tokio::test]
async fn test_unreachable_relay_keeps_draft() {
    let form = controller("http://127.0.0.1:1/api/contact".into());
    form.on_verification_success("valid-token");
    let before = form.draft();

    let err = form.submit().await.unwrap_err();

    assert!(matches!(err, SubmitError::Relay(TransportError::Network(_))));
    assert_eq!(form.state(), SubmissionState::Errored);
    assert_eq!(form.draft(), before);
}
