use std::sync::Arc;

use validator::Validate;

use crate::features::panels::FormFailure;
use crate::features::reports::models::Report;
use crate::features::worker::dtos::{WorkerStatusForm, WorkerStatusUpdate};
use crate::features::worker::panel::{WorkerData, WorkerFetch};
use crate::modules::backend::{BackendResult, CivicApi};

/// Service for the worker panel: assigned reports and their status
pub struct WorkerService {
    api: Arc<dyn CivicApi>,
}

impl WorkerService {
    pub fn new(api: Arc<dyn CivicApi>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &dyn CivicApi {
        self.api.as_ref()
    }

    pub async fn load(&self, token: &str, fetch: WorkerFetch) -> BackendResult<WorkerData> {
        match fetch {
            WorkerFetch::Dashboard => Ok(WorkerData::Dashboard(
                self.api.worker_dashboard(token).await?,
            )),
            WorkerFetch::Assigned(query) => Ok(WorkerData::Assigned(
                self.api.assigned_reports(token, &query).await?,
            )),
            WorkerFetch::Map(query) => Ok(WorkerData::Map(
                self.api.assigned_reports(token, &query).await?.reports,
            )),
        }
    }

    pub async fn detail(&self, token: &str, id: &str) -> BackendResult<Report> {
        self.api.assigned_report(token, id).await
    }

    /// Mark an assigned report in progress or resolved
    pub async fn update_status(
        &self,
        token: &str,
        id: &str,
        form: WorkerStatusForm,
    ) -> Result<String, FormFailure> {
        form.validate().map_err(|e| FormFailure::invalid(&e))?;

        let update = WorkerStatusUpdate::from(form);
        self.api.update_assigned_status(token, id, &update).await?;

        tracing::info!("Worker moved report {} to {}", id, update.status.as_str());
        Ok("Report status updated successfully".to_string())
    }
}
