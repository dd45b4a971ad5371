//! Wire types and pure validation helpers for the contact pipeline.
//! No HTTP or runtime dependency: shared by the relay and the form client.

mod email;
mod error;
mod request;
mod response;

pub use email::is_plausible_email;
pub use error::InputError;
pub use request::{ContactRequest, ContactSubmission, Field};
pub use response::RelayResponse;
