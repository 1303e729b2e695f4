use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::features::admin::dtos::StatCard;
use crate::features::reports::dtos::{report_views, ReportView};
use crate::features::reports::models::{Report, ReportStatus};

/// `GET /api/worker/dashboard`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerDashboard {
    #[serde(default)]
    pub total_assigned: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub in_progress: u64,
    #[serde(default)]
    pub resolved: u64,
    #[serde(default)]
    pub recent_reports: Vec<Report>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerDashboardView {
    pub stats: Vec<StatCard>,
    pub recent_reports: Vec<ReportView>,
}

impl From<&WorkerDashboard> for WorkerDashboardView {
    fn from(dashboard: &WorkerDashboard) -> Self {
        Self {
            stats: vec![
                StatCard {
                    value: dashboard.total_assigned,
                    label: "Total Assigned",
                },
                StatCard {
                    value: dashboard.pending,
                    label: "Pending",
                },
                StatCard {
                    value: dashboard.in_progress,
                    label: "In Progress",
                },
                StatCard {
                    value: dashboard.resolved,
                    label: "Resolved",
                },
            ],
            recent_reports: report_views(&dashboard.recent_reports),
        }
    }
}

fn validate_worker_status(status: &ReportStatus) -> Result<(), ValidationError> {
    if ReportStatus::WORKER_SETTABLE.contains(status) {
        return Ok(());
    }
    let mut err = ValidationError::new("status");
    err.message = Some("Workers can only mark reports in progress or resolved".into());
    Err(err)
}

/// Status form on the worker detail view and the Start/Resolve buttons
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WorkerStatusForm {
    #[validate(custom(function = "validate_worker_status"))]
    pub status: ReportStatus,
    #[serde(default)]
    pub resolution_notes: Option<String>,
}

/// `PUT /api/worker/assigned-reports/:id/status`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerStatusUpdate {
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
}

impl From<WorkerStatusForm> for WorkerStatusUpdate {
    fn from(form: WorkerStatusForm) -> Self {
        Self {
            status: form.status,
            resolution_notes: form.resolution_notes,
        }
    }
}
