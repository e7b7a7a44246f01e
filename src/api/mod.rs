// Axum web server layer

use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    middleware,
    routing::{get, post},
    BoxError, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub mod handlers;
pub mod responses;

use crate::auth::AuthService;
use crate::config::Config;
use crate::records::RecordService;

/// Application state containing all shared dependencies
///
/// All components are wrapped in Arc for shared ownership across async tasks.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub records: Arc<RecordService>,
    pub config: Arc<Config>,
}

/// Create the Axum router with all routes and middleware
///
/// Middleware stack (outermost to innermost):
/// - Request timeout (tower::timeout) behind HandleErrorLayer
/// - Body size limit (tower-http::limit)
/// - Tracing (tower-http::trace)
/// - Bearer auth (applied via route_layer to protected routes only)
///
/// `/token`, `/create_user`, and `/health` bypass auth.
pub fn create_router(app_state: AppState) -> Router {
    let protected = Router::new()
        .route("/users/me", get(handlers::current_user_handler))
        .route("/data", get(handlers::list_records_handler))
        .route(
            "/data/:id",
            get(handlers::get_record_handler).delete(handlers::delete_record_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.auth.clone(),
            crate::auth::middleware::require_bearer,
        ));

    let router = Router::new()
        .route("/token", post(handlers::login_handler))
        .route("/create_user", post(handlers::create_user_handler))
        .route("/health", get(handlers::health_handler))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(app_state.config.body_size_limit_bytes));

    let timeout_secs = app_state.config.request_timeout_secs;

    // HandleErrorLayer must come BEFORE timeout to catch the timeout error
    let middleware_stack = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|e: BoxError| async move {
            let status = if e.is::<tower::timeout::error::Elapsed>() {
                StatusCode::REQUEST_TIMEOUT
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string())
        }))
        .timeout(Duration::from_secs(timeout_secs))
        .into_inner();

    router.layer(middleware_stack).with_state(app_state)
}
