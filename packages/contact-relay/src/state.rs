//! Application state shared across handlers.

use crate::config::{Config, CorsPolicy};
use crate::mailer::{HttpMailer, Mailer};
use crate::pipeline::{Envelope, Relay};
use crate::verify::{SiteVerifyClient, Verifier};
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Shared, read-only after startup. `request_count` is the only counter.
pub struct AppState {
    pub config: Config,
    pub cors: CorsPolicy,
    pub relay: Relay,
    pub start_time: Instant,
    pub request_count: AtomicU64,
}

impl AppState {
    /// Build state with the HTTP-backed providers named in `config`.
    pub fn new(config: Config) -> Result<Self, crate::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .connect_timeout(Duration::from_secs(config.upstream_timeout_secs.min(5)))
            .build()
            .map_err(|e| crate::Error::Config(format!("HTTP client build failed: {e}")))?;

        let verifier = Arc::new(SiteVerifyClient::new(
            http.clone(),
            config.verify_url.clone(),
            config.verify_secret.clone(),
        ));
        let mailer = Arc::new(HttpMailer::new(
            http,
            config.email_api_url.clone(),
            config.email_api_key.clone(),
        ));

        info!(verify_url = %config.verify_url, email_api_url = %config.email_api_url, "Providers configured");

        Self::with_providers(config, verifier, mailer)
    }

    /// Build state around caller-supplied providers.
    pub fn with_providers(
        config: Config,
        verifier: Arc<dyn Verifier>,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Self, crate::Error> {
        if !config.route.starts_with('/') {
            return Err(crate::Error::Config(format!(
                "route must start with '/': {}",
                config.route
            )));
        }

        let cors = config.cors_policy()?;
        let relay = Relay::new(
            verifier,
            mailer,
            Envelope {
                from: config.email_from.clone(),
                to: config.email_to.clone(),
            },
        );

        Ok(Self {
            config,
            cors,
            relay,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        })
    }
}
