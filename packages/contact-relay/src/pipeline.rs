//! Verify-then-dispatch submission pipeline.
//!
//! Each stage returns a `Result`; a failed stage short-circuits the rest, so
//! the email provider is only ever called with a [`Verified`] proof in hand.

use contact_types::ContactRequest;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::mailer::{ContactEmail, Mailer};
use crate::metrics::METRICS;
use crate::verify::Verifier;
use crate::Error;

/// Proof that the token was accepted. Only [`Relay::verify`] constructs it.
#[derive(Debug)]
pub struct Verified(());

/// Email accepted by the provider.
#[derive(Debug, PartialEq, Eq)]
pub struct Delivered;

/// Fixed sender and recipient for every relayed message.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub from: String,
    pub to: String,
}

pub struct Relay {
    verifier: Arc<dyn Verifier>,
    mailer: Arc<dyn Mailer>,
    envelope: Envelope,
}

impl Relay {
    pub fn new(verifier: Arc<dyn Verifier>, mailer: Arc<dyn Mailer>, envelope: Envelope) -> Self {
        Self {
            verifier,
            mailer,
            envelope,
        }
    }

    /// One verification call, then at most one dispatch call. No retries.
    pub async fn submit(
        &self,
        request: &ContactRequest,
        remote_ip: Option<&str>,
    ) -> Result<Delivered, Error> {
        let verified = self.verify(&request.token, remote_ip).await?;
        self.dispatch(request, verified).await
    }

    pub async fn verify(&self, token: &str, remote_ip: Option<&str>) -> Result<Verified, Error> {
        let start = Instant::now();
        let outcome = self.verifier.verify(token, remote_ip).await;
        METRICS.record_verify_duration(start);

        let outcome = outcome?;
        if !outcome.success {
            warn!(codes = ?outcome.error_codes, "Verification rejected token");
            return Err(Error::InvalidVerification(outcome.error_codes));
        }
        Ok(Verified(()))
    }

    pub async fn dispatch(
        &self,
        request: &ContactRequest,
        _verified: Verified,
    ) -> Result<Delivered, Error> {
        let email = ContactEmail::compose(request, &self.envelope.from, &self.envelope.to);
        debug!(subject = %email.subject, "Dispatching contact email");

        let start = Instant::now();
        let sent = self.mailer.send(&email).await;
        METRICS.record_dispatch_duration(start);

        sent.map(|()| Delivered)
    }
}
