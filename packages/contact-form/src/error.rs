//! Submit failures, each with the notice shown to the user.

use contact_types::Field;
use std::fmt;

use crate::TransportError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// No CAPTCHA token yet. Nothing was sent.
    MissingVerification,
    /// A required field is blank. Nothing was sent.
    EmptyField(Field),
    /// Email does not look like an address. Nothing was sent.
    InvalidEmail,
    /// A submission is in flight or its result is still displayed.
    Busy,
    /// The relay answered with an error or could not be reached.
    Relay(TransportError),
}

impl SubmitError {
    /// Text for the inline notice. `None` when the submit is silently ignored.
    pub fn notice(&self) -> Option<String> {
        match self {
            SubmitError::MissingVerification => {
                Some("Please complete the verification before sending.".into())
            }
            SubmitError::EmptyField(field) => Some(format!("Please fill in your {field}.")),
            SubmitError::InvalidEmail => Some("Please enter a valid email address.".into()),
            SubmitError::Busy => None,
            SubmitError::Relay(_) => {
                Some("Something went wrong sending your message. Please try again.".into())
            }
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::MissingVerification => write!(f, "verification token missing"),
            SubmitError::EmptyField(field) => write!(f, "field is empty: {field}"),
            SubmitError::InvalidEmail => write!(f, "email address is malformed"),
            SubmitError::Busy => write!(f, "submission already in progress"),
            SubmitError::Relay(e) => write!(f, "relay error: {e}"),
        }
    }
}

impl std::error::Error for SubmitError {}

impl From<TransportError> for SubmitError {
    fn from(e: TransportError) -> Self {
        SubmitError::Relay(e)
    }
}
