//! Shared fixtures: provider mocks and an in-process relay on an ephemeral port.

use contact_relay::{create_router, AppState, Config};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const VERIFY_SECRET: &str = "test-secret";
pub const EMAIL_API_KEY: &str = "re_test";
pub const OWNER: &str = "owner@portfolio.example.com";

/// Mocked verification and email providers.
pub struct Providers {
    pub verify: MockServer,
    pub email: MockServer,
}

impl Providers {
    pub async fn start() -> Self {
        Self {
            verify: MockServer::start().await,
            email: MockServer::start().await,
        }
    }

    /// Verification endpoint answering `success` for requests that carry
    /// the shared secret.
    pub async fn verification_returns(&self, success: bool) {
        let body = if success {
            json!({"success": true})
        } else {
            json!({"success": false, "error-codes": ["invalid-input-response"]})
        };
        Mock::given(method("POST"))
            .and(path("/siteverify"))
            .and(body_string_contains(format!("secret={VERIFY_SECRET}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.verify)
            .await;
    }

    /// Email endpoint answering `status` with `body` for authorized calls.
    pub async fn email_returns(&self, status: u16, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("authorization", format!("Bearer {EMAIL_API_KEY}").as_str()))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.email)
            .await;
    }

    pub async fn verify_calls(&self) -> usize {
        self.verify
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }

    /// Every JSON payload the email provider received.
    pub async fn sent_emails(&self) -> Vec<serde_json::Value> {
        self.email
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }
}

pub fn relay_config(providers: &Providers) -> Config {
    Config {
        bind_address: "127.0.0.1:0".into(),
        verify_url: format!("{}/siteverify", providers.verify.uri()),
        verify_secret: VERIFY_SECRET.into(),
        email_api_url: format!("{}/emails", providers.email.uri()),
        email_api_key: EMAIL_API_KEY.into(),
        email_to: OWNER.into(),
        ..Config::default()
    }
}

/// Serve the relay in the background and return its contact endpoint URL.
pub async fn spawn_relay(config: Config) -> String {
    let route = config.route.clone();
    let state = Arc::new(AppState::new(config).expect("relay state"));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("relay server");
    });

    format!("http://{addr}{route}")
}

pub fn ada() -> serde_json::Value {
    json!({
        "name": "Ada",
        "email": "ada@example.com",
        "message": "Hello",
        "token": "valid-token"
    })
}
