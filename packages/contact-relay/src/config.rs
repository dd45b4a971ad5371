//! Relay configuration.

use serde::Deserialize;

/// Configuration for the contact relay. Every secret and allow-list the
/// handlers need lives here; nothing on the request path reads the
/// environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::bind_address")]
    pub bind_address: String,

    /// Path the contact endpoint is mounted on.
    #[serde(default = "defaults::route")]
    pub route: String,

    /// First entry is the primary production origin.
    #[serde(default = "defaults::allowed_origins")]
    pub allowed_origins: Vec<String>,

    #[serde(default = "defaults::verify_url")]
    pub verify_url: String,

    #[serde(default)]
    pub verify_secret: String,

    #[serde(default = "defaults::email_api_url")]
    pub email_api_url: String,

    #[serde(default)]
    pub email_api_key: String,

    #[serde(default = "defaults::email_from")]
    pub email_from: String,

    #[serde(default = "defaults::email_to")]
    pub email_to: String,

    /// Applies to each outbound provider call.
    #[serde(default = "defaults::upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: defaults::bind_address(),
            route: defaults::route(),
            allowed_origins: defaults::allowed_origins(),
            verify_url: defaults::verify_url(),
            verify_secret: String::new(),
            email_api_url: defaults::email_api_url(),
            email_api_key: String::new(),
            email_from: defaults::email_from(),
            email_to: defaults::email_to(),
            upstream_timeout_secs: defaults::upstream_timeout_secs(),
        }
    }
}

impl Config {
    pub fn cors_policy(&self) -> Result<CorsPolicy, crate::Error> {
        CorsPolicy::new(self.allowed_origins.clone())
    }

    /// Names of secrets that are still empty.
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.verify_secret.is_empty() {
            missing.push("verify_secret");
        }
        if self.email_api_key.is_empty() {
            missing.push("email_api_key");
        }
        missing
    }
}

/// Origin allow-list. Unknown origins get the primary origin back, so the
/// browser refuses to expose the response to them.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed: Vec<String>,
}

impl CorsPolicy {
    pub fn new(allowed: Vec<String>) -> Result<Self, crate::Error> {
        let allowed: Vec<String> = allowed
            .into_iter()
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect();
        if allowed.is_empty() {
            return Err(crate::Error::Config(
                "allowed_origins must contain at least the primary origin".into(),
            ));
        }
        Ok(Self { allowed })
    }

    pub fn primary(&self) -> &str {
        &self.allowed[0]
    }

    /// Exact, case-sensitive match against the allow-list.
    pub fn allow_origin(&self, origin: Option<&str>) -> &str {
        origin
            .and_then(|o| self.allowed.iter().find(|a| a.as_str() == o))
            .map(String::as_str)
            .unwrap_or_else(|| self.primary())
    }
}

mod defaults {
    pub const PRIMARY_ORIGIN: &str = "https://portfolio.example.com";

    pub fn bind_address() -> String {
        "0.0.0.0:3050".into()
    }

    pub fn route() -> String {
        "/api/contact".into()
    }

    pub fn allowed_origins() -> Vec<String> {
        vec![
            PRIMARY_ORIGIN.into(),
            "http://localhost:5173".into(),
            "http://localhost:3000".into(),
        ]
    }

    pub fn verify_url() -> String {
        "https://challenges.cloudflare.com/turnstile/v0/siteverify".into()
    }

    pub fn email_api_url() -> String {
        "https://api.resend.com/emails".into()
    }

    pub fn email_from() -> String {
        "Portfolio Contact <contact@portfolio.example.com>".into()
    }

    pub fn email_to() -> String {
        "owner@portfolio.example.com".into()
    }

    pub fn upstream_timeout_secs() -> u64 {
        10
    }
}
