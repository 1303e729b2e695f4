use serde::Serialize;

use crate::features::auth::model::UserProfile;
use crate::features::map::{report_markers, RenderedMap};
use crate::features::pagination::{link_builder, render_pager, Pager};
use crate::features::panels::{section_links, LayoutView, PanelContext, Section, ViewSession};
use crate::features::reports::dtos::{report_views, ChoiceView, Choices, FilterView, ReportView};
use crate::features::reports::models::{Report, ReportStatus};
use crate::features::reports::page::ReportDetailView;
use crate::features::worker::dtos::WorkerDashboardView;
use crate::features::worker::panel::WorkerData;
use crate::shared::constants::{DEFAULT_LOCATION, MAIN_ZOOM};

pub fn worker_report_link(report: &Report) -> String {
    format!("/worker/reports/{}", report.id)
}

/// Template context of `worker/index.html` and `worker/section.html`
#[derive(Debug, Clone, Serialize)]
pub struct WorkerPage {
    pub layout: LayoutView,
    pub section: &'static str,
    pub loaded: bool,
    pub dashboard: Option<WorkerDashboardView>,
    pub reports: Vec<ReportView>,
    pub filters: FilterView,
    pub pager: Option<Pager>,
    pub map: Option<RenderedMap>,
    pub choices: Choices,
    /// Statuses a worker may set
    pub worker_statuses: Vec<ChoiceView>,
    pub detail: Option<ReportDetailView>,
}

impl WorkerPage {
    pub fn build(
        pages: &PanelContext,
        session: &mut ViewSession,
        user: &UserProfile,
        detail: Option<ReportDetailView>,
        full_page: bool,
    ) -> Self {
        let toasts = if full_page {
            session.take_toasts()
        } else {
            Vec::new()
        };
        let state = &session.worker;
        let active = state.active();

        let mut page = Self {
            layout: pages.layout(
                "Worker Panel",
                Some(user),
                toasts,
                section_links(active),
                Some("/worker/refresh"),
            ),
            section: active.slug(),
            loaded: false,
            dashboard: None,
            reports: Vec::new(),
            filters: FilterView::from(&state.report_filters),
            pager: None,
            map: None,
            choices: Choices::all(),
            worker_statuses: ReportStatus::WORKER_SETTABLE
                .iter()
                .map(|s| ChoiceView {
                    value: s.as_str(),
                    label: s.label(),
                })
                .collect(),
            detail,
        };

        let Some(data) = state.snapshot(active) else {
            return page;
        };
        page.loaded = true;

        match data {
            WorkerData::Dashboard(dashboard) => {
                page.dashboard = Some(WorkerDashboardView::from(dashboard));
            }
            WorkerData::Assigned(listing) => {
                let base_path = active.href();
                page.reports = report_views(&listing.reports);
                page.pager = render_pager(
                    state.pagination.current_page,
                    state.pagination.total_pages,
                    link_builder(&base_path, &state.report_filters),
                );
            }
            WorkerData::Map(reports) => {
                page.map = Some(pages.maps.render(
                    "worker-map",
                    DEFAULT_LOCATION,
                    MAIN_ZOOM,
                    report_markers(reports, worker_report_link),
                ));
            }
        }
        page
    }
}
