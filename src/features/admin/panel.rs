use crate::features::admin::dtos::{AdminDashboard, UserPage, UserQuery};
use crate::features::pagination::{link_builder, QueryBuilder};
use crate::features::panels::{Panel, PanelState, Section, SectionSnapshot, ViewSession};
use crate::features::reports::dtos::{ReportFilters, ReportPage, ReportQuery};
use crate::features::reports::models::Report;
use crate::shared::constants::{ADMIN_MAP_LIMIT, PANEL_PAGE_SIZE};
use crate::shared::types::PageMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminSection {
    Dashboard,
    Reports,
    Map,
    Users,
}

impl Section for AdminSection {
    const ALL: &'static [Self] = &[
        AdminSection::Dashboard,
        AdminSection::Reports,
        AdminSection::Map,
        AdminSection::Users,
    ];
    const BASE_PATH: &'static str = "/admin";

    fn slug(&self) -> &'static str {
        match self {
            AdminSection::Dashboard => "dashboard",
            AdminSection::Reports => "reports",
            AdminSection::Map => "map",
            AdminSection::Users => "users",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AdminSection::Dashboard => "Dashboard",
            AdminSection::Reports => "Reports",
            AdminSection::Map => "Map View",
            AdminSection::Users => "Users",
        }
    }
}

#[derive(Debug, Clone)]
pub enum AdminData {
    Dashboard(AdminDashboard),
    Reports(ReportPage),
    Map(Vec<Report>),
    Users(UserPage),
}

impl SectionSnapshot for AdminData {
    fn page_meta(&self) -> Option<PageMeta> {
        match self {
            AdminData::Reports(page) => Some(page.meta),
            AdminData::Users(page) => Some(page.meta),
            AdminData::Dashboard(_) | AdminData::Map(_) => None,
        }
    }
}

pub struct AdminPanel;

impl Panel for AdminPanel {
    type Section = AdminSection;
    type Data = AdminData;

    const NAME: &'static str = "admin";

    fn state(session: &mut ViewSession) -> &mut PanelState<AdminSection, AdminData> {
        &mut session.admin
    }
}

/// Backend request behind an admin section
#[derive(Debug, Clone, PartialEq)]
pub enum AdminFetch {
    Dashboard,
    Reports(ReportQuery),
    Map(ReportQuery),
    Users(UserQuery),
}

impl AdminFetch {
    pub fn for_section(section: AdminSection, state: &PanelState<AdminSection, AdminData>) -> Self {
        let page = Some(state.pagination.current_page);
        match section {
            AdminSection::Dashboard => AdminFetch::Dashboard,
            AdminSection::Reports => AdminFetch::Reports(ReportQuery::paged(
                page,
                PANEL_PAGE_SIZE,
                state.report_filters.clone(),
            )),
            AdminSection::Map => AdminFetch::Map(ReportQuery::bounded(
                ADMIN_MAP_LIMIT,
                ReportFilters::with_status(state.map_status),
            )),
            AdminSection::Users => AdminFetch::Users(UserQuery::paged(
                page,
                PANEL_PAGE_SIZE,
                state.user_filters.clone(),
            )),
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            AdminFetch::Dashboard => "Failed to load dashboard data",
            AdminFetch::Reports(_) => "Failed to load reports",
            AdminFetch::Map(_) => "Failed to load map",
            AdminFetch::Users(_) => "Failed to load users",
        }
    }
}

/// Path that re-opens the active section on its current page with its filters
pub fn return_href(state: &PanelState<AdminSection, AdminData>) -> String {
    let section = state.active();
    let base = section.href();
    let page = state.pagination.current_page;

    match section {
        AdminSection::Dashboard => base,
        AdminSection::Reports => link_builder(&base, &state.report_filters)(page),
        AdminSection::Map => QueryBuilder::new()
            .filters(&ReportFilters::with_status(state.map_status))
            .append_to(&base),
        AdminSection::Users => link_builder(&base, &state.user_filters)(page),
    }
}
