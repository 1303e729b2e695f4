use crate::features::pagination::link_builder;
use crate::features::panels::{Panel, PanelState, Section, SectionSnapshot, ViewSession};
use crate::features::reports::dtos::{ReportFilters, ReportPage, ReportQuery};
use crate::features::reports::models::Report;
use crate::features::worker::dtos::WorkerDashboard;
use crate::shared::constants::{PANEL_PAGE_SIZE, WORKER_MAP_LIMIT};
use crate::shared::types::PageMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerSection {
    Dashboard,
    Assigned,
    Map,
}

impl Section for WorkerSection {
    const ALL: &'static [Self] = &[
        WorkerSection::Dashboard,
        WorkerSection::Assigned,
        WorkerSection::Map,
    ];
    const BASE_PATH: &'static str = "/worker";

    fn slug(&self) -> &'static str {
        match self {
            WorkerSection::Dashboard => "dashboard",
            WorkerSection::Assigned => "assigned",
            WorkerSection::Map => "map",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            WorkerSection::Dashboard => "Dashboard",
            WorkerSection::Assigned => "Assigned Reports",
            WorkerSection::Map => "Map View",
        }
    }
}

#[derive(Debug, Clone)]
pub enum WorkerData {
    Dashboard(WorkerDashboard),
    Assigned(ReportPage),
    Map(Vec<Report>),
}

impl SectionSnapshot for WorkerData {
    fn page_meta(&self) -> Option<PageMeta> {
        match self {
            WorkerData::Assigned(page) => Some(page.meta),
            WorkerData::Dashboard(_) | WorkerData::Map(_) => None,
        }
    }
}

pub struct WorkerPanel;

impl Panel for WorkerPanel {
    type Section = WorkerSection;
    type Data = WorkerData;

    const NAME: &'static str = "worker";

    fn state(session: &mut ViewSession) -> &mut PanelState<WorkerSection, WorkerData> {
        &mut session.worker
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkerFetch {
    Dashboard,
    Assigned(ReportQuery),
    Map(ReportQuery),
}

impl WorkerFetch {
    pub fn for_section(
        section: WorkerSection,
        state: &PanelState<WorkerSection, WorkerData>,
    ) -> Self {
        match section {
            WorkerSection::Dashboard => WorkerFetch::Dashboard,
            WorkerSection::Assigned => WorkerFetch::Assigned(ReportQuery::paged(
                Some(state.pagination.current_page),
                PANEL_PAGE_SIZE,
                state.report_filters.clone(),
            )),
            WorkerSection::Map => WorkerFetch::Map(ReportQuery::bounded(
                WORKER_MAP_LIMIT,
                ReportFilters::default(),
            )),
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            WorkerFetch::Dashboard => "Failed to load dashboard data",
            WorkerFetch::Assigned(_) => "Failed to load assigned reports",
            WorkerFetch::Map(_) => "Failed to load map",
        }
    }
}

/// Path that re-opens the active section on its current page with its filters
pub fn return_href(state: &PanelState<WorkerSection, WorkerData>) -> String {
    let section = state.active();
    let base = section.href();
    match section {
        WorkerSection::Assigned => {
            link_builder(&base, &state.report_filters)(state.pagination.current_page)
        }
        WorkerSection::Dashboard | WorkerSection::Map => base,
    }
}
