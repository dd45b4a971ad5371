//! The form's submission controller.

use contact_types::{ContactRequest, Field};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{
    Draft, FormConfig, HttpTransport, SubmissionState, SubmitError, Transport, VerificationWidget,
};

/// Cheap-to-clone handle shared by the UI callbacks. All clones see the same
/// draft, token and state.
#[derive(Clone)]
pub struct FormController {
    shared: Arc<Shared>,
}

struct Shared {
    inner: Mutex<Inner>,
    transport: Arc<dyn Transport>,
    widget: Arc<dyn VerificationWidget>,
    reset_after: Duration,
}

#[derive(Default)]
struct Inner {
    draft: Draft,
    token: Option<String>,
    state: SubmissionState,
    notice: Option<String>,
    /// Bumped per accepted submit; a reset timer only fires for its own epoch.
    epoch: u64,
}

impl FormController {
    pub fn new(
        transport: Arc<dyn Transport>,
        widget: Arc<dyn VerificationWidget>,
        reset_after: Duration,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner::default()),
                transport,
                widget,
                reset_after,
            }),
        }
    }

    /// Controller posting to `config.endpoint` over HTTP.
    pub fn from_config(config: &FormConfig, widget: Arc<dyn VerificationWidget>) -> Self {
        let transport = HttpTransport::new(reqwest::Client::new(), config.endpoint.clone());
        Self::new(Arc::new(transport), widget, config.reset_after())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.shared.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state
    }

    pub fn draft(&self) -> Draft {
        self.lock().draft.clone()
    }

    /// Inline message for the user, if any.
    pub fn notice(&self) -> Option<String> {
        self.lock().notice.clone()
    }

    pub fn has_token(&self) -> bool {
        self.lock().token.is_some()
    }

    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.lock().draft.set(field, value.into());
    }

    /// Widget success callback.
    pub fn on_verification_success(&self, token: impl Into<String>) {
        let token = token.into();
        if token.is_empty() {
            return;
        }
        let mut inner = self.lock();
        inner.token = Some(token);
        if inner.state == SubmissionState::AwaitingVerification {
            inner.state = SubmissionState::Idle;
            inner.notice = None;
        }
        debug!(state = ?inner.state, "Verification token received");
    }

    /// Widget expiry/reset callback. The token can no longer be used.
    pub fn on_verification_expired(&self) {
        let mut inner = self.lock();
        inner.token = None;
        if inner.state == SubmissionState::Idle {
            inner.state = SubmissionState::AwaitingVerification;
        }
    }

    /// Send the draft once. Precondition failures and in-flight duplicates
    /// return without touching the network.
    pub async fn submit(&self) -> Result<(), SubmitError> {
        let (request, epoch) = {
            let mut inner = self.lock();
            if inner.state == SubmissionState::Submitting {
                debug!("Submit ignored, request already in flight");
                return Err(SubmitError::Busy);
            }

            let token = match inner.token.clone() {
                Some(t) => t,
                None => return Err(refuse(&mut inner, SubmitError::MissingVerification)),
            };
            if let Err(e) = inner.draft.validate() {
                return Err(refuse(&mut inner, e));
            }
            if !inner.state.accepts_submit() {
                return Err(SubmitError::Busy);
            }

            inner.state = SubmissionState::Submitting;
            inner.notice = None;
            inner.epoch += 1;

            let request = ContactRequest {
                name: inner.draft.name.trim().to_string(),
                email: inner.draft.email.trim().to_string(),
                message: inner.draft.message.clone(),
                token,
            };
            (request, inner.epoch)
        };

        let result = self.shared.transport.send(&request).await;

        {
            let mut inner = self.lock();
            // Single-use: whatever happened, the relay has seen this token.
            inner.token = None;
            match &result {
                Ok(()) => {
                    inner.draft.clear();
                    inner.state = SubmissionState::Submitted;
                    info!("Contact message sent");
                }
                Err(e) => {
                    inner.state = SubmissionState::Errored;
                    inner.notice = SubmitError::Relay(e.clone()).notice();
                    warn!(error = %e, "Contact message failed, draft kept for retry");
                }
            }
        }

        self.shared.widget.reset();
        self.schedule_reset(epoch);

        result.map_err(SubmitError::Relay)
    }

    /// Revert Submitted/Errored to Idle after the display delay. The draft
    /// is left as it is.
    fn schedule_reset(&self, epoch: u64) {
        let deadline = tokio::time::Instant::now() + self.shared.reset_after;
        let controller = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let mut inner = controller.lock();
            if inner.epoch == epoch && inner.state.is_settled() {
                inner.state = SubmissionState::Idle;
                inner.notice = None;
                debug!("Submission display reset");
            }
        });
    }
}

fn refuse(inner: &mut Inner, err: SubmitError) -> SubmitError {
    debug!(error = %err, "Submit refused before sending");
    inner.notice = err.notice();
    err
}
