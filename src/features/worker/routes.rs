use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::panels::PanelContext;
use crate::features::worker::handlers::{self, WorkerState};
use crate::features::worker::services::WorkerService;

/// Create routes for the worker panel
pub fn routes(service: Arc<WorkerService>, pages: Arc<PanelContext>) -> Router {
    let state = WorkerState { service, pages };

    Router::new()
        .route("/worker", get(handlers::index))
        .route("/worker/refresh", get(handlers::refresh))
        .route("/worker/{section}", get(handlers::section))
        .route("/worker/reports/{id}", get(handlers::report_detail))
        .route("/worker/reports/{id}/status", post(handlers::update_status))
        .with_state(state)
}
