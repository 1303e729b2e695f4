use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Report lifecycle status as exposed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Resolved,
    Rejected,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 4] = [
        ReportStatus::Pending,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
        ReportStatus::Rejected,
    ];

    /// Statuses a worker may move an assigned report into
    pub const WORKER_SETTABLE: [ReportStatus; 2] =
        [ReportStatus::InProgress, ReportStatus::Resolved];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::InProgress => "in_progress",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::InProgress => "In Progress",
            ReportStatus::Resolved => "Resolved",
            ReportStatus::Rejected => "Rejected",
        }
    }

    /// Hex color used for status badges and map pins
    pub fn color(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "#f39c12",
            ReportStatus::InProgress => "#3498db",
            ReportStatus::Resolved => "#27ae60",
            ReportStatus::Rejected => "#e74c3c",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown report status: {}", s))
    }
}

/// Issue category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Garbage,
    Potholes,
    BrokenStreetlights,
    Graffiti,
    OvergrownVegetation,
    WaterLeakage,
    DamagedSidewalks,
    TrafficSigns,
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Garbage,
        Category::Potholes,
        Category::BrokenStreetlights,
        Category::Graffiti,
        Category::OvergrownVegetation,
        Category::WaterLeakage,
        Category::DamagedSidewalks,
        Category::TrafficSigns,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Garbage => "garbage",
            Category::Potholes => "potholes",
            Category::BrokenStreetlights => "broken_streetlights",
            Category::Graffiti => "graffiti",
            Category::OvergrownVegetation => "overgrown_vegetation",
            Category::WaterLeakage => "water_leakage",
            Category::DamagedSidewalks => "damaged_sidewalks",
            Category::TrafficSigns => "traffic_signs",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Garbage => "Garbage",
            Category::Potholes => "Potholes",
            Category::BrokenStreetlights => "Broken Streetlights",
            Category::Graffiti => "Graffiti",
            Category::OvergrownVegetation => "Overgrown Vegetation",
            Category::WaterLeakage => "Water Leakage",
            Category::DamagedSidewalks => "Damaged Sidewalks",
            Category::TrafficSigns => "Traffic Signs",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Report priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| format!("Unknown priority: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

/// Populated user reference (reporter, assignee, note author)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl PersonRef {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportImage {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminNote {
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub added_by: Option<PersonRef>,
    #[serde(default)]
    pub added_at: Option<DateTime<Utc>>,
}

/// Report as returned by the backend. Never persisted client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    pub status: ReportStatus,
    pub location: Location,
    #[serde(default)]
    pub reporter: Option<PersonRef>,
    #[serde(default)]
    pub assigned_to: Option<PersonRef>,
    #[serde(default)]
    pub images: Vec<ReportImage>,
    #[serde(default)]
    pub admin_notes: Vec<AdminNote>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resolution_notes: Option<String>,
}

impl Report {
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.location.coordinates
    }
}
