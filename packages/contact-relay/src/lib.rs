//! # Contact Relay
//!
//! Stateless relay between the public contact form and two providers: a
//! CAPTCHA verification service and a transactional email API.
//!
//! ## Quick Start
//! ```bash
//! CONTACT_RELAY_VERIFY_SECRET=... CONTACT_RELAY_EMAIL_API_KEY=... \
//!     cargo run --bin contact-relay
//! ```
//!
//! ## Endpoints
//! - `POST /api/contact` - Verify token, then email the site owner
//! - `OPTIONS /api/contact` - CORS preflight
//! - `GET /health` - Uptime and request count
//! - `GET /metrics` - Prometheus counters

pub mod config;
mod cors;
mod error;
mod handlers;
pub mod mailer;
pub mod metrics;
mod middleware;
pub mod pipeline;
mod response;
mod router;
mod state;
pub mod verify;

pub use config::{Config, CorsPolicy};
pub use error::Error;
pub use router::create as create_router;
pub use state::AppState;
