//! HTTP request handlers.

use crate::cors::ALLOW_METHODS;
use crate::metrics::METRICS;
use crate::middleware::RequestId;
use crate::response::HealthResponse;
use crate::state::AppState;
use crate::Error;
use axum::body::Bytes;
use axum::extract::{ConnectInfo, FromRequest, Request, State};
use axum::http::header::ALLOW;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use contact_types::{ContactRequest, ContactSubmission, RelayResponse};
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Liveness plus basic counters.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.start_time.elapsed().as_secs(),
        requests: state.request_count.load(Ordering::Relaxed),
    })
}

/// Prometheus metrics in text exposition format.
pub async fn metrics() -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4",
        )],
        METRICS.render(),
    )
}

/// CORS preflight: status only, headers come from the CORS middleware.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> Response {
    let err = Error::MethodNotAllowed;
    METRICS.record_error(&err);
    let mut response = err.into_response();
    response
        .headers_mut()
        .insert(ALLOW, HeaderValue::from_static(ALLOW_METHODS));
    response
}

/// Validate, verify the CAPTCHA token, then email the site owner.
pub async fn contact(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let start = std::time::Instant::now();
    METRICS.submissions_total.fetch_add(1, Ordering::Relaxed);
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let req_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_default();

    let remote_ip = client_ip(
        request.headers(),
        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|c| c.0),
    );

    let result = match Bytes::from_request(request, &state).await {
        Ok(body) => match parse_submission(&body) {
            Ok(submission) => {
                info!(req_id = %req_id, ip = ?remote_ip, message_len = submission.message.len(), "Relaying contact submission");
                state
                    .relay
                    .submit(&submission, remote_ip.as_deref())
                    .await
            }
            Err(e) => Err(e),
        },
        Err(e) => {
            warn!(req_id = %req_id, error = %e, "Unreadable request body");
            Err(Error::MissingInput)
        }
    };

    METRICS.record_submission_duration(start);

    match result {
        Ok(_) => {
            METRICS.submissions_success.fetch_add(1, Ordering::Relaxed);
            info!(req_id = %req_id, "Contact email dispatched");
            (StatusCode::OK, Json(RelayResponse::ok())).into_response()
        }
        Err(e) => {
            METRICS.record_error(&e);
            match &e {
                Error::MissingInput | Error::InvalidVerification(_) => {
                    warn!(req_id = %req_id, error = %e, "Submission rejected")
                }
                _ => error!(req_id = %req_id, error = %e, "Submission failed"),
            }
            e.into_response()
        }
    }
}

/// Malformed JSON counts as missing input.
fn parse_submission(body: &[u8]) -> Result<ContactRequest, Error> {
    let submission: ContactSubmission =
        serde_json::from_slice(body).map_err(|_| Error::MissingInput)?;
    submission.into_request().map_err(|_| Error::MissingInput)
}

/// First `X-Forwarded-For` hop, then `X-Real-IP`, then the socket peer.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    header("x-forwarded-for")
        .or_else(|| header("x-real-ip"))
        .or_else(|| peer.map(|p| p.ip().to_string()))
}
