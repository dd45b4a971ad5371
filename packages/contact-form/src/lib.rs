//! # Contact Form
//!
//! Client-side submission controller for the contact form: holds the draft
//! and the CAPTCHA token, enforces preconditions before any network call,
//! sends at most one request at a time and reflects the relay's answer.
//!
//! Rendering the form and the verification widget is left to the host UI;
//! it feeds field edits and widget callbacks in and reads state back out.

pub mod config;
pub mod controller;
pub mod draft;
pub mod error;
pub mod state;
pub mod transport;
pub mod widget;

pub use config::FormConfig;
pub use controller::FormController;
pub use draft::Draft;
pub use error::SubmitError;
pub use state::SubmissionState;
pub use transport::{HttpTransport, Transport, TransportError};
pub use widget::{NoopWidget, VerificationWidget};
