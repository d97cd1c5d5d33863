use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    middleware::from_fn_with_state,
};
use std::time::Duration;
use tower::{ServiceBuilder, timeout::error::Elapsed};
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure};
use tracing::Level;

use crate::{error::AppError, handlers, middleware_layer, state::AppState};

/// The largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(handlers::catalog::list_books))
        .route("/isbn/{isbn}", get(handlers::catalog::book_by_isbn))
        .route("/author/{author}", get(handlers::catalog::books_by_author))
        .route("/title/{title}", get(handlers::catalog::books_by_title))
        .route("/review/{isbn}", get(handlers::catalog::book_reviews))
        .route("/register", post(handlers::auth::register))
        .route("/customer/login", post(handlers::auth::login))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route(
            "/customer/auth/review/{isbn}",
            put(handlers::reviews::upsert_review).delete(handlers::reviews::delete_review),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_auth,
        ))
        .with_state(state.clone());

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(handlers::catalog::fallback)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    with_request_timeout(app, Duration::from_secs(state.config.request_timeout_secs)).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::default().include_headers(false))
            .on_request(DefaultOnRequest::default().level(Level::DEBUG))
            .on_response(DefaultOnResponse::default().level(Level::DEBUG))
            .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
    )
}

/// Fails requests that run longer than `timeout` with a JSON 408.
fn with_request_timeout(app: Router, timeout: Duration) -> Router {
    app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_layer_error))
            .timeout(timeout),
    )
}

async fn handle_layer_error(error: BoxError) -> AppError {
    if error.is::<Elapsed>() {
        AppError::Timeout("Request took too long to complete".to_string())
    } else {
        AppError::Internal(format!("Unhandled middleware error: {}", error))
    }
}
