//! CAPTCHA token verification against a `siteverify`-style endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Error;

/// Result of one verification call. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub success: bool,
    #[serde(rename = "error-codes", default)]
    pub error_codes: Vec<String>,
}

/// Checks a widget token with the verification provider.
#[async_trait]
pub trait Verifier: Send + Sync {
    async fn verify(
        &self,
        token: &str,
        remote_ip: Option<&str>,
    ) -> Result<VerificationOutcome, Error>;
}

/// Form-encoded `{secret, response, remoteip}` POST, as accepted by
/// Turnstile, reCAPTCHA and hCaptcha.
pub struct SiteVerifyClient {
    http: reqwest::Client,
    url: String,
    secret: String,
}

impl SiteVerifyClient {
    pub fn new(http: reqwest::Client, url: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            secret: secret.into(),
        }
    }
}

#[async_trait]
impl Verifier for SiteVerifyClient {
    async fn verify(
        &self,
        token: &str,
        remote_ip: Option<&str>,
    ) -> Result<VerificationOutcome, Error> {
        let mut form = vec![("secret", self.secret.as_str()), ("response", token)];
        if let Some(ip) = remote_ip {
            form.push(("remoteip", ip));
        }

        let resp = self
            .http
            .post(&self.url)
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::VerificationUnavailable(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::VerificationUnavailable(format!(
                "provider returned HTTP {status}"
            )));
        }

        let outcome: VerificationOutcome = resp
            .json()
            .await
            .map_err(|e| Error::VerificationUnavailable(format!("invalid response: {e}")))?;

        debug!(success = outcome.success, codes = ?outcome.error_codes, "Verification response");
        Ok(outcome)
    }
}
