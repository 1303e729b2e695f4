use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::pagination::{ListQuery, QueryFilters};
use crate::features::reports::models::{Category, Coordinates, Priority, Report, ReportStatus};
use crate::shared::constants::DEFAULT_LOCATION;
use crate::shared::types::{empty_string_as_none, PageMeta};

/// One page of reports as returned by the list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPage {
    #[serde(default)]
    pub reports: Vec<Report>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

/// `GET /api/reports/my-reports` envelope
#[derive(Debug, Clone, Deserialize)]
pub struct MyReportsResponse {
    #[serde(default)]
    pub reports: Vec<Report>,
}

/// Optional list constraints. Each present value becomes its own query parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilters {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<ReportStatus>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub search: Option<String>,
}

impl ReportFilters {
    pub fn with_status(status: Option<ReportStatus>) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }
}

impl QueryFilters for ReportFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(category) = self.category {
            pairs.push(("category", category.as_str().to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

/// Report listing request sent to the public, admin and worker list endpoints
pub type ReportQuery = ListQuery<ReportFilters>;

/// Browser query for report listings: `?page=2&status=pending&category=&search=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportListParams {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<u32>,
    #[serde(flatten)]
    pub filters: ReportFilters,
}

/// Uploaded image forwarded untouched to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Report submission form fields (multipart, images handled separately)
#[derive(Debug, Clone, Default, Validate)]
pub struct ReportForm {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 1000, message = "Description must be 1-1000 characters"))]
    pub description: String,

    /// Unset when missing or not a known category
    #[validate(required(message = "Category is required"))]
    pub category: Option<Category>,

    pub priority: Option<Priority>,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    pub lat: Option<f64>,

    pub lng: Option<f64>,
}

impl ReportForm {
    /// Apply one multipart text field by name. Unknown fields are ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        let trimmed = value.trim();
        match name {
            "title" => self.title = trimmed.to_string(),
            "description" => self.description = trimmed.to_string(),
            "category" => self.category = trimmed.parse().ok(),
            "priority" => self.priority = trimmed.parse().ok(),
            "address" => self.address = trimmed.to_string(),
            "lat" => self.lat = trimmed.parse().ok(),
            "lng" => self.lng = trimmed.parse().ok(),
            _ => {}
        }
    }
}

/// Report ready to be sent to `POST /api/reports`
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSubmission {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub address: String,
    pub coordinates: Option<Coordinates>,
    pub images: Vec<ImageUpload>,
}

impl ReportSubmission {
    /// Build from a validated form
    pub fn from_form(form: ReportForm, images: Vec<ImageUpload>) -> Self {
        let coordinates = match (form.lat, form.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        };

        Self {
            title: form.title,
            description: form.description,
            category: form.category.unwrap_or(Category::Other),
            priority: form.priority.unwrap_or_default(),
            address: form.address,
            coordinates,
            images,
        }
    }

    /// Coordinates sent to the backend; the default location when none were picked
    pub fn resolved_coordinates(&self) -> Coordinates {
        self.coordinates.unwrap_or(DEFAULT_LOCATION)
    }
}

/// Created report envelope (`{ report }`) or the bare report
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CreatedReport {
    Wrapped { report: Report },
    Bare(Report),
}

impl CreatedReport {
    pub fn into_report(self) -> Report {
        match self {
            CreatedReport::Wrapped { report } => report,
            CreatedReport::Bare(report) => report,
        }
    }
}

/// Public board counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PublicStats {
    pub total_reports: u64,
    /// Resolved reports among the fetched page only
    pub resolved_on_page: usize,
}

impl PublicStats {
    pub fn from_page(page: &ReportPage) -> Self {
        Self {
            total_reports: page.meta.total,
            resolved_on_page: page
                .reports
                .iter()
                .filter(|r| r.status == ReportStatus::Resolved)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_page_envelope() {
        let page: ReportPage = serde_json::from_value(serde_json::json!({
            "reports": [],
            "currentPage": 3,
            "totalPages": 7,
            "total": 80
        }))
        .unwrap();
        assert_eq!(page.meta.current_page, 3);
        assert_eq!(page.meta.total_pages, 7);
        assert_eq!(page.meta.total, 80);
    }

    #[test]
    fn test_submission_without_coordinates_uses_default_location() {
        let mut form = ReportForm::default();
        form.set_field("title", "Crater".into());
        form.set_field("category", "potholes".into());
        form.set_field("lat", "".into());

        let submission = ReportSubmission::from_form(form, Vec::new());
        assert_eq!(submission.category, Category::Potholes);
        assert_eq!(submission.coordinates, None);
        assert_eq!(submission.resolved_coordinates(), DEFAULT_LOCATION);
    }

    #[test]
    fn test_submission_keeps_picked_coordinates() {
        let mut form = ReportForm::default();
        form.set_field("lat", "41.5".into());
        form.set_field("lng", "-73.25".into());

        let submission = ReportSubmission::from_form(form, Vec::new());
        assert_eq!(
            submission.resolved_coordinates(),
            Coordinates {
                lat: 41.5,
                lng: -73.25
            }
        );
    }

    #[test]
    fn test_report_query_encodes_filters() {
        let filters = ReportFilters {
            status: Some(ReportStatus::InProgress),
            category: None,
            search: Some("oak street".into()),
        };
        let query = ReportQuery::paged(Some(2), 20, filters);
        assert_eq!(
            query.query_string(),
            "page=2&limit=20&status=in_progress&search=oak%20street"
        );
    }

    #[test]
    fn test_list_params_treat_blank_filters_as_absent() {
        let params: ReportListParams =
            serde_json::from_value(serde_json::json!({ "page": "2", "status": "", "category": "graffiti" }))
                .unwrap();
        assert_eq!(params.page, Some(2));
        assert_eq!(params.filters.status, None);
        assert_eq!(params.filters.category, Some(Category::Graffiti));
    }
}
