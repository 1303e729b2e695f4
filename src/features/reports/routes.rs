use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::panels::PanelContext;
use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::ReportService;

/// Create routes for the public panel
///
/// Browsing is anonymous; submitting and "My Reports" require a signed-in user
pub fn routes(service: Arc<ReportService>, pages: Arc<PanelContext>) -> Router {
    let state = ReportState { service, pages };

    Router::new()
        .route("/", get(handlers::index))
        .route("/my-reports", get(handlers::my_reports))
        .route("/reports", post(handlers::submit_report))
        .route("/reports/{id}", get(handlers::report_detail))
        .route("/refresh", get(handlers::refresh))
        .with_state(state)
}
