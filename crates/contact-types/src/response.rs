//! Uniform relay response body.

use serde::{Deserialize, Serialize};

/// `{"success": true}` or `{"error": "..."}`, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelayResponse {
    Success { success: bool },
    Failure { error: String },
}

impl RelayResponse {
    pub fn ok() -> Self {
        Self::Success { success: true }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { success: true })
    }

    /// Error text for failures, `None` for success.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { error } => Some(error),
            Self::Success { .. } => None,
        }
    }
}
