//! Seam to the third-party verification widget.

/// The host UI's handle on the CAPTCHA widget. Tokens are single-use, so the
/// controller resets the widget after every terminal outcome.
pub trait VerificationWidget: Send + Sync {
    fn reset(&self);
}

/// For hosts without a widget handle (and tests that don't care).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopWidget;

impl VerificationWidget for NoopWidget {
    fn reset(&self) {}
}
