use async_trait::async_trait;

use super::error::BackendResult;
use crate::features::admin::dtos::{
    AdminDashboard, NoteRequest, ReportUpdate, UserPage, UserQuery, UserRoleUpdate,
    UserStatusUpdate,
};
use crate::features::auth::dtos::{AuthPayload, LoginRequest, RegisterRequest};
use crate::features::auth::model::UserProfile;
use crate::features::reports::dtos::{ReportPage, ReportQuery, ReportSubmission};
use crate::features::reports::models::Report;
use crate::features::worker::dtos::{WorkerDashboard, WorkerStatusUpdate};

/// Operations of the municipal reporting REST backend.
///
/// `token` is the bearer token of the browser on whose behalf the call is made.
#[async_trait]
pub trait CivicApi: Send + Sync {
    // Auth
    async fn login(&self, credentials: &LoginRequest) -> BackendResult<AuthPayload>;
    async fn register(&self, registration: &RegisterRequest) -> BackendResult<AuthPayload>;
    async fn profile(&self, token: &str) -> BackendResult<UserProfile>;

    // Reports
    async fn list_reports(&self, query: &ReportQuery) -> BackendResult<ReportPage>;
    async fn get_report(&self, token: Option<&str>, id: &str) -> BackendResult<Report>;
    async fn create_report(
        &self,
        token: &str,
        submission: &ReportSubmission,
    ) -> BackendResult<Report>;
    async fn my_reports(&self, token: &str) -> BackendResult<Vec<Report>>;

    // Admin
    async fn admin_dashboard(&self, token: &str) -> BackendResult<AdminDashboard>;
    async fn admin_reports(&self, token: &str, query: &ReportQuery) -> BackendResult<ReportPage>;
    async fn update_report(&self, token: &str, id: &str, update: &ReportUpdate)
        -> BackendResult<()>;
    async fn add_note(&self, token: &str, id: &str, note: &NoteRequest) -> BackendResult<()>;
    async fn workers(&self, token: &str) -> BackendResult<Vec<UserProfile>>;
    async fn admin_users(&self, token: &str, query: &UserQuery) -> BackendResult<UserPage>;
    async fn set_user_status(
        &self,
        token: &str,
        id: &str,
        update: &UserStatusUpdate,
    ) -> BackendResult<()>;
    async fn set_user_role(&self, token: &str, id: &str, update: &UserRoleUpdate)
        -> BackendResult<()>;

    // Worker
    async fn worker_dashboard(&self, token: &str) -> BackendResult<WorkerDashboard>;
    async fn assigned_reports(
        &self,
        token: &str,
        query: &ReportQuery,
    ) -> BackendResult<ReportPage>;
    async fn assigned_report(&self, token: &str, id: &str) -> BackendResult<Report>;
    async fn update_assigned_status(
        &self,
        token: &str,
        id: &str,
        update: &WorkerStatusUpdate,
    ) -> BackendResult<()>;
}
