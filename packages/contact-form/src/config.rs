//! Form client configuration.

use serde::Deserialize;
use std::time::Duration;

/// Where to post and which public site key the widget should render with.
#[derive(Debug, Clone, Deserialize)]
pub struct FormConfig {
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,

    /// Public CAPTCHA site key. Not a secret.
    #[serde(default)]
    pub site_key: String,

    /// How long Submitted/Errored stay visible before reverting to Idle.
    #[serde(default = "defaults::reset_after_ms")]
    pub reset_after_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::endpoint(),
            site_key: String::new(),
            reset_after_ms: defaults::reset_after_ms(),
        }
    }
}

impl FormConfig {
    /// Read `CONTACT_FORM_*` environment variables over the defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("CONTACT_FORM").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn reset_after(&self) -> Duration {
        Duration::from_millis(self.reset_after_ms)
    }
}

mod defaults {
    pub fn endpoint() -> String {
        "https://portfolio.example.com/api/contact".into()
    }

    pub fn reset_after_ms() -> u64 {
        4_000
    }
}
