use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::admin::handlers::{self, AdminState};
use crate::features::admin::services::AdminService;
use crate::features::panels::PanelContext;

/// Create routes for the admin panel
///
/// Every route runs the admin gate first
pub fn routes(service: Arc<AdminService>, pages: Arc<PanelContext>) -> Router {
    let state = AdminState { service, pages };

    Router::new()
        .route("/admin", get(handlers::index))
        .route("/admin/refresh", get(handlers::refresh))
        .route("/admin/{section}", get(handlers::section))
        .route(
            "/admin/reports/{id}",
            get(handlers::report_detail).post(handlers::update_report),
        )
        .route("/admin/reports/{id}/notes", post(handlers::add_note))
        .route("/admin/users/{id}/status", post(handlers::toggle_user_status))
        .route("/admin/users/{id}/role", post(handlers::change_user_role))
        .with_state(state)
}
