//! Route table

use super::handlers::{confirm, health_check, method_unknown, show_form, submit_form};
use super::host::ServerHost;
use crate::form::FORM_PATH;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Path of the confirmation endpoint
pub const CONFIRM_PATH: &str = "/api/confirm";

/// Build every route served by the application
///
/// - POST /api/confirm (any other method answers `501 method_unknown`)
/// - GET / and POST / when a form provider is configured
/// - GET /health and GET /healthz
pub fn build_routes(host: Arc<ServerHost>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route(CONFIRM_PATH, post(confirm).fallback(method_unknown))
        .with_state(host.clone());

    if let Some(form) = host.form.clone() {
        app = app.merge(
            Router::new()
                .route(FORM_PATH, get(show_form).post(submit_form))
                .with_state(form),
        );
    }

    app
}
