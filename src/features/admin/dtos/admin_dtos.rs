use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::auth::model::{Role, UserProfile};
use crate::features::pagination::{ListQuery, QueryFilters};
use crate::features::reports::dtos::{report_views, ReportFilters, ReportView};
use crate::features::reports::models::{Priority, Report, ReportStatus};
use crate::shared::formatters::{format_datetime, format_optional_datetime};
use crate::shared::types::{empty_string_as_none, PageMeta};

// =============================================================================
// DASHBOARD DTOs
// =============================================================================

/// `GET /api/admin/dashboard`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    #[serde(default)]
    pub total_reports: u64,
    #[serde(default)]
    pub active_reports: u64,
    #[serde(default)]
    pub resolved_reports: u64,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub recent_reports: Vec<Report>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub value: u64,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub stats: Vec<StatCard>,
    pub recent_reports: Vec<ReportView>,
}

impl From<&AdminDashboard> for DashboardView {
    fn from(dashboard: &AdminDashboard) -> Self {
        Self {
            stats: vec![
                StatCard {
                    value: dashboard.total_reports,
                    label: "Total Reports",
                },
                StatCard {
                    value: dashboard.active_reports,
                    label: "Active Reports",
                },
                StatCard {
                    value: dashboard.resolved_reports,
                    label: "Resolved Reports",
                },
                StatCard {
                    value: dashboard.total_users,
                    label: "Total Users",
                },
            ],
            recent_reports: report_views(&dashboard.recent_reports),
        }
    }
}

// =============================================================================
// USER DTOs
// =============================================================================

/// `GET /api/admin/users` page
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub users: Vec<UserProfile>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilters {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub role: Option<Role>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub search: Option<String>,
}

impl QueryFilters for UserFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(role) = self.role {
            pairs.push(("role", role.as_str().to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

pub type UserQuery = ListQuery<UserFilters>;

/// Browser query of any admin section: `?page=&status=&category=&search=&role=`.
///
/// `search` is shared by the report and user filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminListParams {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<u32>,
    #[serde(flatten)]
    pub reports: ReportFilters,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub role: Option<Role>,
}

impl AdminListParams {
    pub fn user_filters(&self) -> UserFilters {
        UserFilters {
            role: self.role,
            search: self.reports.search.clone(),
        }
    }
}

/// `GET /api/admin/workers`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkerRoster {
    #[serde(default)]
    pub workers: Vec<UserProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: &'static str,
    pub is_active: bool,
    pub joined_on: String,
    pub last_login: String,
    /// Role offered by "Change Role"; never offered for admins
    pub next_role: Option<&'static str>,
}

impl From<&UserProfile> for UserView {
    fn from(user: &UserProfile) -> Self {
        Self {
            id: user.id.clone(),
            full_name: user.full_name(),
            email: user.email.clone(),
            role: user.role.as_str(),
            is_active: user.is_active,
            joined_on: user.created_at.as_ref().map(format_datetime).unwrap_or_default(),
            last_login: format_optional_datetime(user.last_login.as_ref(), "Never"),
            next_role: (!user.is_admin()).then(|| user.role.toggled().as_str()),
        }
    }
}

/// Worker option in the assignment select
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerOption {
    pub id: String,
    pub label: String,
    pub selected: bool,
}

pub fn worker_options(workers: &[UserProfile], assigned_id: Option<&str>) -> Vec<WorkerOption> {
    workers
        .iter()
        .map(|w| WorkerOption {
            id: w.id.clone(),
            label: format!("{} ({})", w.full_name(), w.email),
            selected: assigned_id == Some(w.id.as_str()),
        })
        .collect()
}

// =============================================================================
// REPORT UPDATE DTOs
// =============================================================================

/// "Save Updates & Assign" form on the admin report detail
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportUpdateForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<ReportStatus>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub priority: Option<Priority>,
    /// Empty string when "Unassigned" is chosen
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub resolution_notes: Option<String>,
}

/// Partial report update sent to `PUT /api/admin/reports/:id`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
}

impl ReportUpdate {
    /// Assigning a worker moves a pending (or unspecified) report to in progress
    pub fn with_auto_promotion(mut self) -> Self {
        if self.assigns_worker() && matches!(self.status, None | Some(ReportStatus::Pending)) {
            self.status = Some(ReportStatus::InProgress);
        }
        self
    }

    pub fn assigns_worker(&self) -> bool {
        self.assigned_to
            .as_deref()
            .is_some_and(|worker| !worker.trim().is_empty())
    }

    pub fn success_message(&self) -> &'static str {
        if self.assigns_worker() {
            "Report assigned to worker and updated successfully!"
        } else {
            "Report updated successfully"
        }
    }
}

impl From<ReportUpdateForm> for ReportUpdate {
    fn from(form: ReportUpdateForm) -> Self {
        Self {
            status: form.status,
            priority: form.priority,
            assigned_to: form.assigned_to,
            resolution_notes: form.resolution_notes,
        }
        .with_auto_promotion()
    }
}

/// `POST /api/admin/reports/:id/notes`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NoteRequest {
    #[validate(length(min = 1, max = 1000, message = "Note must be 1-1000 characters"))]
    pub note: String,
}

// =============================================================================
// USER ADMINISTRATION DTOs
// =============================================================================

/// Activate/deactivate form; carries the status currently displayed
#[derive(Debug, Clone, Deserialize)]
pub struct UserStatusForm {
    pub current_active: bool,
}

/// `PUT /api/admin/users/:id/status`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusUpdate {
    pub is_active: bool,
}

impl From<UserStatusForm> for UserStatusUpdate {
    fn from(form: UserStatusForm) -> Self {
        Self {
            is_active: !form.current_active,
        }
    }
}

impl UserStatusUpdate {
    pub fn success_message(&self) -> &'static str {
        if self.is_active {
            "User activated successfully"
        } else {
            "User deactivated successfully"
        }
    }
}

/// Change-role form; carries the role currently displayed
#[derive(Debug, Clone, Deserialize)]
pub struct UserRoleForm {
    pub current_role: Role,
}

/// `PUT /api/admin/users/:id/role`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRoleUpdate {
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_promotes_missing_status() {
        let update = ReportUpdate::from(ReportUpdateForm {
            assigned_to: Some("w1".into()),
            ..Default::default()
        });

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "in_progress", "assignedTo": "w1" }));
        assert_eq!(
            update.success_message(),
            "Report assigned to worker and updated successfully!"
        );
    }

    #[test]
    fn test_assignment_promotes_pending() {
        let update = ReportUpdate {
            status: Some(ReportStatus::Pending),
            assigned_to: Some("w1".into()),
            ..Default::default()
        }
        .with_auto_promotion();
        assert_eq!(update.status, Some(ReportStatus::InProgress));
    }

    #[test]
    fn test_explicit_status_is_kept() {
        let update = ReportUpdate {
            status: Some(ReportStatus::Resolved),
            assigned_to: Some("w1".into()),
            ..Default::default()
        }
        .with_auto_promotion();
        assert_eq!(update.status, Some(ReportStatus::Resolved));
    }

    #[test]
    fn test_unassigned_is_sent_as_empty_string() {
        let form: ReportUpdateForm = serde_json::from_value(serde_json::json!({
            "status": "pending",
            "priority": "high",
            "assigned_to": "",
            "resolution_notes": ""
        }))
        .unwrap();
        let update = ReportUpdate::from(form);

        assert_eq!(update.status, Some(ReportStatus::Pending));
        assert_eq!(update.assigned_to.as_deref(), Some(""));
        assert_eq!(update.success_message(), "Report updated successfully");
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({
                "status": "pending",
                "priority": "high",
                "assignedTo": "",
                "resolutionNotes": ""
            })
        );
    }

    #[test]
    fn test_status_toggle_inverts() {
        let update = UserStatusUpdate::from(UserStatusForm {
            current_active: true,
        });
        assert!(!update.is_active);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "isActive": false })
        );
    }

    #[test]
    fn test_user_view_role_offer() {
        let admin: UserProfile = serde_json::from_value(serde_json::json!({
            "_id": "a1", "firstName": "Ann", "lastName": "Admin",
            "email": "ann@example.com", "role": "admin"
        }))
        .unwrap();
        let worker = UserProfile {
            role: Role::Worker,
            ..admin.clone()
        };

        assert_eq!(UserView::from(&admin).next_role, None);
        assert_eq!(UserView::from(&worker).next_role, Some("user"));
        assert_eq!(UserView::from(&worker).last_login, "Never");
    }
}
