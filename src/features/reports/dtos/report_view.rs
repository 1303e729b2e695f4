use serde::Serialize;

use crate::features::auth::model::Role;
use crate::features::reports::dtos::ReportFilters;
use crate::features::reports::models::{AdminNote, Category, Priority, Report, ReportStatus};
use crate::shared::formatters::{format_date, format_datetime, short_id};

/// Display projection of a report consumed by the templates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub id: String,
    pub short_id: String,
    pub title: String,
    pub description: String,
    pub category: &'static str,
    pub category_label: &'static str,
    pub priority: &'static str,
    pub priority_label: &'static str,
    pub status: &'static str,
    pub status_label: &'static str,
    pub address: String,
    pub reporter_name: String,
    pub assigned_name: Option<String>,
    pub assigned_id: Option<String>,
    pub created_on: String,
    pub created_at: String,
    pub resolved_on: Option<String>,
    pub resolution_notes: String,
    pub images: Vec<String>,
    pub notes: Vec<NoteView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteView {
    pub author: String,
    pub added_at: String,
    pub text: String,
}

impl From<&AdminNote> for NoteView {
    fn from(note: &AdminNote) -> Self {
        Self {
            author: note
                .added_by
                .as_ref()
                .map(|p| p.full_name())
                .unwrap_or_else(|| "Unknown".to_string()),
            added_at: note.added_at.as_ref().map(format_datetime).unwrap_or_default(),
            text: note.note.clone(),
        }
    }
}

impl From<&Report> for ReportView {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id.clone(),
            short_id: short_id(&report.id),
            title: report.title.clone(),
            description: report.description.clone(),
            category: report.category.as_str(),
            category_label: report.category.label(),
            priority: report.priority.as_str(),
            priority_label: report.priority.label(),
            status: report.status.as_str(),
            status_label: report.status.label(),
            address: report.location.address.clone(),
            reporter_name: report
                .reporter
                .as_ref()
                .map(|p| p.full_name())
                .unwrap_or_else(|| "Unknown".to_string()),
            assigned_name: report.assigned_to.as_ref().map(|p| p.full_name()),
            assigned_id: report.assigned_to.as_ref().map(|p| p.id.clone()),
            created_on: format_date(&report.created_at),
            created_at: format_datetime(&report.created_at),
            resolved_on: report.resolved_at.as_ref().map(format_datetime),
            resolution_notes: report.resolution_notes.clone().unwrap_or_default(),
            images: report
                .images
                .iter()
                .map(|img| format!("/{}", img.path.trim_start_matches('/')))
                .collect(),
            notes: report.admin_notes.iter().map(NoteView::from).collect(),
        }
    }
}

pub fn report_views(reports: &[Report]) -> Vec<ReportView> {
    reports.iter().map(ReportView::from).collect()
}

/// One `<option>` of a select
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceView {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choices {
    pub statuses: Vec<ChoiceView>,
    pub categories: Vec<ChoiceView>,
    pub priorities: Vec<ChoiceView>,
    pub roles: Vec<ChoiceView>,
}

impl Choices {
    pub fn all() -> Self {
        Self {
            statuses: ReportStatus::ALL
                .iter()
                .map(|s| ChoiceView {
                    value: s.as_str(),
                    label: s.label(),
                })
                .collect(),
            categories: Category::ALL
                .iter()
                .map(|c| ChoiceView {
                    value: c.as_str(),
                    label: c.label(),
                })
                .collect(),
            priorities: Priority::ALL
                .iter()
                .map(|p| ChoiceView {
                    value: p.as_str(),
                    label: p.label(),
                })
                .collect(),
            roles: Role::ALL
                .iter()
                .map(|r| ChoiceView {
                    value: r.as_str(),
                    label: r.label(),
                })
                .collect(),
        }
    }
}

/// Filter values echoed back into the filter form
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterView {
    pub status: &'static str,
    pub category: &'static str,
    pub search: String,
}

impl From<&ReportFilters> for FilterView {
    fn from(filters: &ReportFilters) -> Self {
        Self {
            status: filters.status.map(|s| s.as_str()).unwrap_or_default(),
            category: filters.category.map(|c| c.as_str()).unwrap_or_default(),
            search: filters.search.clone().unwrap_or_default(),
        }
    }
}
