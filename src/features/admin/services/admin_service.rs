use std::sync::Arc;

use validator::Validate;

use crate::features::admin::dtos::{
    NoteRequest, ReportUpdate, ReportUpdateForm, UserRoleForm, UserRoleUpdate, UserStatusForm,
    UserStatusUpdate,
};
use crate::features::admin::panel::{AdminData, AdminFetch};
use crate::features::auth::model::{Role, UserProfile};
use crate::features::panels::FormFailure;
use crate::features::reports::models::Report;
use crate::modules::backend::{BackendResult, CivicApi};

/// Service for the admin panel: triage, assignment and user administration
pub struct AdminService {
    api: Arc<dyn CivicApi>,
}

impl AdminService {
    pub fn new(api: Arc<dyn CivicApi>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &dyn CivicApi {
        self.api.as_ref()
    }

    // =========================================================================
    // SECTIONS
    // =========================================================================

    pub async fn load(&self, token: &str, fetch: AdminFetch) -> BackendResult<AdminData> {
        match fetch {
            AdminFetch::Dashboard => Ok(AdminData::Dashboard(
                self.api.admin_dashboard(token).await?,
            )),
            AdminFetch::Reports(query) => Ok(AdminData::Reports(
                self.api.admin_reports(token, &query).await?,
            )),
            AdminFetch::Map(query) => {
                let page = self.api.admin_reports(token, &query).await?;
                tracing::debug!("Loaded {} reports for the admin map", page.reports.len());
                Ok(AdminData::Map(page.reports))
            }
            AdminFetch::Users(query) => Ok(AdminData::Users(
                self.api.admin_users(token, &query).await?,
            )),
        }
    }

    /// Report detail and the worker roster for the assignment select, fetched together
    pub async fn report_detail(
        &self,
        token: &str,
        id: &str,
    ) -> (BackendResult<Report>, BackendResult<Vec<UserProfile>>) {
        futures::join!(self.api.get_report(Some(token), id), self.api.workers(token))
    }

    // =========================================================================
    // REPORT ACTIONS
    // =========================================================================

    /// Apply the detail form; returns the success toast text
    pub async fn update_report(
        &self,
        token: &str,
        id: &str,
        form: ReportUpdateForm,
    ) -> Result<String, FormFailure> {
        let update = ReportUpdate::from(form);
        self.api.update_report(token, id, &update).await?;

        tracing::info!(
            "Report {} updated (status: {:?}, assigned: {:?})",
            id,
            update.status,
            update.assigned_to
        );
        Ok(update.success_message().to_string())
    }

    pub async fn add_note(
        &self,
        token: &str,
        id: &str,
        mut note: NoteRequest,
    ) -> Result<String, FormFailure> {
        note.note = note.note.trim().to_string();
        note.validate().map_err(|e| FormFailure::invalid(&e))?;

        self.api.add_note(token, id, &note).await?;
        Ok("Note added successfully".to_string())
    }

    // =========================================================================
    // USER ACTIONS
    // =========================================================================

    pub async fn toggle_user_status(
        &self,
        token: &str,
        id: &str,
        form: UserStatusForm,
    ) -> Result<String, FormFailure> {
        let update = UserStatusUpdate::from(form);
        self.api.set_user_status(token, id, &update).await?;

        tracing::info!("User {} active: {}", id, update.is_active);
        Ok(update.success_message().to_string())
    }

    /// Flip the displayed role; admins are never offered a role change
    pub async fn change_user_role(
        &self,
        token: &str,
        id: &str,
        form: UserRoleForm,
    ) -> Result<String, FormFailure> {
        if form.current_role == Role::Admin {
            return Err(FormFailure::Invalid(
                "Admin roles cannot be changed".to_string(),
            ));
        }

        let update = UserRoleUpdate {
            role: form.current_role.toggled(),
        };
        self.api.set_user_role(token, id, &update).await?;

        tracing::info!("User {} role changed to {}", id, update.role);
        Ok(format!("User role changed to {} successfully", update.role))
    }
}
