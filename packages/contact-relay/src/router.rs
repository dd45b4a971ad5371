//! HTTP router setup.

use crate::cors::apply_cors;
use crate::handlers;
use crate::middleware::inject_request_id;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the application router. Layers run outermost first: request id,
/// trace, CORS. CORS wraps every route, so rejections carry the headers too.
pub fn create(state: Arc<AppState>) -> Router {
    let route = state.config.route.clone();

    let contact = post(handlers::contact)
        .options(handlers::preflight)
        .fallback(handlers::method_not_allowed);

    Router::new()
        .route(&route, contact)
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(inject_request_id))
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn_with_state(
                    Arc::clone(&state),
                    apply_cors,
                )),
        )
        .with_state(state)
}
