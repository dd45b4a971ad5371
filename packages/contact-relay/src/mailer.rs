//! Transactional email composition and delivery.

use async_trait::async_trait;
use contact_types::ContactRequest;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Error;

/// Payload for the email provider: `{from, to, reply_to, subject, html}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEmail {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

impl ContactEmail {
    /// Sender and recipient are fixed by configuration; everything the
    /// submitter typed is escaped before it lands in `html`.
    pub fn compose(request: &ContactRequest, from: &str, to: &str) -> Self {
        let name = escape_html(&request.name);
        let email = escape_html(&request.email);
        let message = escape_html(&request.message).replace('\n', "<br>");

        Self {
            from: from.to_string(),
            to: to.to_string(),
            reply_to: request.email.clone(),
            subject: format!("New portfolio message from {}", single_line(&request.name)),
            html: format!(
                "<h2>New contact form submission</h2>\
                 <p><strong>Name:</strong> {name}</p>\
                 <p><strong>Email:</strong> {email}</p>\
                 <p><strong>Message:</strong></p>\
                 <p>{message}</p>"
            ),
        }
    }
}

/// Hands a composed email to the delivery provider.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &ContactEmail) -> Result<(), Error>;
}

/// JSON POST with a Bearer API key (Resend-compatible).
pub struct HttpMailer {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl HttpMailer {
    pub fn new(http: reqwest::Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: &ContactEmail) -> Result<(), Error> {
        let resp = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await
            .map_err(|e| Error::Dispatch(format!("email request failed: {e}")))?;

        let status = resp.status();
        if status.is_success() {
            debug!(status = %status, "Email accepted");
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        Err(Error::Dispatch(provider_error_text(status, &body)))
    }
}

/// Prefer the provider's `message` (or `error`) field, then the raw body,
/// then the status line.
fn provider_error_text(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    format!("email provider returned HTTP {status}")
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn single_line(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
