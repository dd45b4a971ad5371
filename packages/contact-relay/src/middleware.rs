//! Request correlation middleware.

use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use rand::Rng;

const HEADER: &str = "x-request-id";
const MAX_LEN: usize = 128;

/// Correlation ID for one relay request, stored in request extensions.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

impl RequestId {
    /// Reuse the caller's ID when it is short and header-safe, otherwise mint one.
    fn resolve(headers: &HeaderMap) -> Self {
        headers
            .get(HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|s| is_acceptable(s))
            .map(|s| RequestId(s.to_string()))
            .unwrap_or_else(Self::generate)
    }

    fn generate() -> Self {
        RequestId(format!("cr-{:016x}", rand::thread_rng().gen::<u64>()))
    }
}

fn is_acceptable(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b':'))
}

/// Attach a [`RequestId`] to the request and echo it on the response.
pub async fn inject_request_id(mut request: Request, next: Next) -> Response {
    let id = RequestId::resolve(request.headers());
    let echoed = HeaderValue::from_str(&id.0).ok();
    request.extensions_mut().insert(id);

    let mut response = next.run(request).await;
    if let Some(value) = echoed {
        response.headers_mut().insert(HEADER, value);
    }
    response
}
