use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use crate::features::panels::PanelContext;
use axum::{routing::post, Router};
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthState {
    pub service: Arc<AuthService>,
    pub pages: Arc<PanelContext>,
}

/// Session actions posted from the navigation forms
pub fn routes(service: Arc<AuthService>, pages: Arc<PanelContext>) -> Router {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/register", post(handlers::register))
        .route("/logout", post(handlers::logout))
        .with_state(AuthState { service, pages })
}
