//! Error types for the relay.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contact_types::RelayResponse;
use std::fmt;

/// Relay error type. Each request-path variant is a terminal stage of the
/// pipeline; none of them is retried.
#[derive(Debug)]
pub enum Error {
    /// Configuration error.
    Config(String),
    /// A required field is absent or empty, or the body is not JSON.
    MissingInput,
    /// Verification provider rejected the token. Carries its error codes.
    InvalidVerification(Vec<String>),
    /// Verification provider could not be reached or answered garbage.
    VerificationUnavailable(String),
    /// Email provider refused the message. Carries the provider's error text.
    Dispatch(String),
    /// Anything but POST/OPTIONS on the contact route.
    MethodNotAllowed,
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::MissingInput => StatusCode::BAD_REQUEST,
            Error::InvalidVerification(_) => StatusCode::FORBIDDEN,
            Error::VerificationUnavailable(_) => StatusCode::BAD_GATEWAY,
            Error::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Text placed in the `error` field of the response body.
    pub fn public_message(&self) -> String {
        match self {
            Error::Config(_) => "Relay misconfigured".into(),
            Error::MissingInput => "Missing input".into(),
            Error::InvalidVerification(_) => "Invalid CAPTCHA".into(),
            Error::VerificationUnavailable(_) => "Verification service unavailable".into(),
            Error::Dispatch(msg) => msg.clone(),
            Error::MethodNotAllowed => "Method Not Allowed".into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::MissingInput => write!(f, "missing input"),
            Error::InvalidVerification(codes) if codes.is_empty() => {
                write!(f, "verification failed")
            }
            Error::InvalidVerification(codes) => {
                write!(f, "verification failed: {}", codes.join(", "))
            }
            Error::VerificationUnavailable(msg) => write!(f, "verification unavailable: {msg}"),
            Error::Dispatch(msg) => write!(f, "dispatch failed: {msg}"),
            Error::MethodNotAllowed => write!(f, "method not allowed"),
        }
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.status(), Json(RelayResponse::err(self.public_message()))).into_response()
    }
}
