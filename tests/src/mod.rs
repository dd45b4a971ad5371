//! Cross-component scenarios: the form controller talking to a live relay,
//! with both third-party providers mocked over HTTP.

pub mod utils;

#[cfg(test)]
mod contact_flow_tests;
#[cfg(test)]
mod relay_http_tests;
