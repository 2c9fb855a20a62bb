pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::salary::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Salary API
        .route("/api/v1/salary/profile", get(handlers::handle_get_profile))
        .route("/api/v1/salary/check", post(handlers::handle_check_salary))
        .route(
            "/api/v1/salary/suggestions",
            get(handlers::handle_suggestions),
        )
        .fallback(not_found)
        .with_state(state)
}
