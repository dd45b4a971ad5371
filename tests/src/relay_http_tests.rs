use crate::utils::*;
use serde_json::{json, Value};

async fn post(endpoint: &str, body: &Value, origin: &str) -> (u16, String, Value) {
    let resp = reqwest::Client::new()
        .post(endpoint)
        .header("origin", origin)
        .json(body)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    let allow_origin = resp
        .headers()
        .get("access-control-allow-origin")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    (status, allow_origin, resp.json().await.unwrap())
}

#[tokio::test]
async fn test_relay_success_over_http() {
    let providers = Providers::start().await;
    providers.verification_returns(true).await;
    providers.email_returns(200, json!({"id": "email_1"})).await;
    let endpoint = spawn_relay(relay_config(&providers)).await;

    let (status, allow_origin, body) = post(&endpoint, &ada(), "http://localhost:5173").await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"success": true}));
    assert_eq!(allow_origin, "http://localhost:5173");

    let verify_requests = providers.verify.received_requests().await.unwrap();
    assert_eq!(verify_requests.len(), 1);
    let form = String::from_utf8_lossy(&verify_requests[0].body).to_string();
    assert!(form.contains("response=valid-token"));
    assert!(form.contains("remoteip=127.0.0.1"));

    let emails = providers.sent_emails().await;
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0]["reply_to"], "ada@example.com");
    assert_eq!(emails[0]["to"], OWNER);
    assert!(emails[0]["subject"].as_str().unwrap().contains("Ada"));
    assert!(emails[0]["html"].as_str().unwrap().contains("Hello"));
}

#[tokio::test]
async fn test_relay_invalid_captcha_over_http() {
    let providers = Providers::start().await;
    providers.verification_returns(false).await;
    providers.email_returns(200, json!({"id": "never"})).await;
    let endpoint = spawn_relay(relay_config(&providers)).await;

    let (status, allow_origin, body) = post(&endpoint, &ada(), "https://elsewhere.example").await;

    assert_eq!(status, 403);
    assert_eq!(body, json!({"error": "Invalid CAPTCHA"}));
    assert_eq!(allow_origin, "https://portfolio.example.com");
    assert!(providers.sent_emails().await.is_empty());
}

#[tokio::test]
async fn test_relay_dispatch_failure_over_http() {
    let providers = Providers::start().await;
    providers.verification_returns(true).await;
    providers
        .email_returns(
            422,
            json!({"statusCode": 422, "name": "validation_error", "message": "Invalid `to` field"}),
        )
        .await;
    let endpoint = spawn_relay(relay_config(&providers)).await;

    let (status, _, body) = post(&endpoint, &ada(), "http://localhost:3000").await;

    assert_eq!(status, 500);
    assert_eq!(body, json!({"error": "Invalid `to` field"}));
}

#[tokio::test]
async fn test_relay_missing_input_over_http() {
    let providers = Providers::start().await;
    providers.verification_returns(true).await;
    providers.email_returns(200, json!({"id": "never"})).await;
    let endpoint = spawn_relay(relay_config(&providers)).await;

    let (status, _, body) = post(
        &endpoint,
        &json!({"name": "Ada", "email": "ada@example.com"}),
        "http://localhost:3000",
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "Missing input"}));
    assert_eq!(providers.verify_calls().await, 0);
    assert!(providers.sent_emails().await.is_empty());
}

#[tokio::test]
async fn test_relay_preflight_over_http() {
    let providers = Providers::start().await;
    let endpoint = spawn_relay(relay_config(&providers)).await;

    let resp = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, &endpoint)
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        resp.headers().get("access-control-allow-methods").unwrap(),
        "POST, OPTIONS"
    );
    assert_eq!(
        resp.headers().get("access-control-allow-headers").unwrap(),
        "Content-Type"
    );
    assert!(resp.text().await.unwrap().is_empty());
    assert_eq!(providers.verify_calls().await, 0);
}
