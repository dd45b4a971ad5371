//! Submission lifecycle.

/// Where the form is in its submit cycle. Exactly one value at a time, so
/// "submitting and submitted" cannot both hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// Ready to submit once the draft is complete.
    Idle,
    /// No token yet, or the widget was reset.
    #[default]
    AwaitingVerification,
    /// One request in flight; further submits are ignored.
    Submitting,
    /// Relay accepted the message. Reverts to `Idle` after the display delay.
    Submitted,
    /// Relay or network failure. Reverts to `Idle` after the display delay.
    Errored,
}

impl SubmissionState {
    /// `submit()` may only start from these states.
    pub fn accepts_submit(self) -> bool {
        matches!(self, SubmissionState::Idle | SubmissionState::Errored)
    }

    /// A terminal display state that the reset timer clears.
    pub fn is_settled(self) -> bool {
        matches!(self, SubmissionState::Submitted | SubmissionState::Errored)
    }
}
