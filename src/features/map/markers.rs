use serde::Serialize;

use crate::features::reports::models::{Coordinates, Report};
use crate::modules::views;

/// Map pin derived from a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lng: f64,
    /// Escaped popup HTML
    pub popup: String,
    pub color: &'static str,
}

impl Marker {
    pub fn position(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

#[derive(Serialize)]
struct PopupContext<'a> {
    title: &'a str,
    status_label: &'a str,
    category_label: &'a str,
    priority_label: &'a str,
    address: &'a str,
    assigned_name: Option<String>,
    href: String,
}

fn popup_html(report: &Report, href: String) -> String {
    let ctx = PopupContext {
        title: &report.title,
        status_label: report.status.label(),
        category_label: report.category.label(),
        priority_label: report.priority.label(),
        address: &report.location.address,
        assigned_name: report.assigned_to.as_ref().map(|p| p.full_name()),
        href,
    };

    views::render("partials/map_popup.html", ctx).unwrap_or_else(|e| {
        tracing::warn!("Failed to render popup for report {}: {}", report.id, e);
        String::new()
    })
}

/// One marker per report that carries coordinates, in list order
pub fn report_markers<L>(reports: &[Report], link: L) -> Vec<Marker>
where
    L: Fn(&Report) -> String,
{
    reports
        .iter()
        .filter_map(|report| {
            let position = report.coordinates()?;
            Some(Marker {
                lat: position.lat,
                lng: position.lng,
                popup: popup_html(report, link(report)),
                color: report.status.color(),
            })
        })
        .collect()
}
