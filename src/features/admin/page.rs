use serde::Serialize;

use crate::features::admin::dtos::{worker_options, DashboardView, UserView, WorkerOption};
use crate::features::admin::panel::AdminData;
use crate::features::auth::model::UserProfile;
use crate::features::map::{report_markers, RenderedMap};
use crate::features::pagination::{link_builder, render_pager, Pager};
use crate::features::panels::{section_links, LayoutView, PanelContext, Section, ViewSession};
use crate::features::reports::dtos::{report_views, Choices, FilterView, ReportView};
use crate::features::reports::models::Report;
use crate::features::reports::page::ReportDetailView;
use crate::shared::constants::{DEFAULT_LOCATION, MAIN_ZOOM};

pub fn admin_report_link(report: &Report) -> String {
    format!("/admin/reports/{}", report.id)
}

/// Report detail with the triage form: worker select and notes
#[derive(Debug, Clone, Serialize)]
pub struct AdminReportDetail {
    #[serde(flatten)]
    pub view: ReportDetailView,
    pub workers: Vec<WorkerOption>,
}

impl AdminReportDetail {
    pub fn new(pages: &PanelContext, report: &Report, workers: &[UserProfile]) -> Self {
        let assigned = report.assigned_to.as_ref().map(|p| p.id.as_str());
        Self {
            view: ReportDetailView::new(pages, report, admin_report_link),
            workers: worker_options(workers, assigned),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserFilterView {
    pub role: &'static str,
    pub search: String,
}

/// Template context of `admin/index.html` and `admin/section.html`
#[derive(Debug, Clone, Serialize)]
pub struct AdminPage {
    pub layout: LayoutView,
    pub section: &'static str,
    pub loaded: bool,
    pub dashboard: Option<DashboardView>,
    pub reports: Vec<ReportView>,
    pub users: Vec<UserView>,
    pub filters: FilterView,
    pub user_filters: UserFilterView,
    pub map_status: &'static str,
    pub pager: Option<Pager>,
    pub map: Option<RenderedMap>,
    pub choices: Choices,
    pub detail: Option<AdminReportDetail>,
}

impl AdminPage {
    pub fn build(
        pages: &PanelContext,
        session: &mut ViewSession,
        user: &UserProfile,
        detail: Option<AdminReportDetail>,
        full_page: bool,
    ) -> Self {
        let toasts = if full_page {
            session.take_toasts()
        } else {
            Vec::new()
        };
        let state = &session.admin;
        let active = state.active();

        let mut page = Self {
            layout: pages.layout(
                "Admin Panel",
                Some(user),
                toasts,
                section_links(active),
                Some("/admin/refresh"),
            ),
            section: active.slug(),
            loaded: false,
            dashboard: None,
            reports: Vec::new(),
            users: Vec::new(),
            filters: FilterView::from(&state.report_filters),
            user_filters: UserFilterView {
                role: state.user_filters.role.map(|r| r.as_str()).unwrap_or_default(),
                search: state.user_filters.search.clone().unwrap_or_default(),
            },
            map_status: state.map_status.map(|s| s.as_str()).unwrap_or_default(),
            pager: None,
            map: None,
            choices: Choices::all(),
            detail,
        };

        let Some(data) = state.snapshot(active) else {
            return page;
        };
        page.loaded = true;

        let base_path = active.href();
        match data {
            AdminData::Dashboard(dashboard) => {
                page.dashboard = Some(DashboardView::from(dashboard));
            }
            AdminData::Reports(listing) => {
                page.reports = report_views(&listing.reports);
                page.pager = render_pager(
                    state.pagination.current_page,
                    state.pagination.total_pages,
                    link_builder(&base_path, &state.report_filters),
                );
            }
            AdminData::Map(reports) => {
                page.map = Some(pages.maps.render(
                    "admin-map",
                    DEFAULT_LOCATION,
                    MAIN_ZOOM,
                    report_markers(reports, admin_report_link),
                ));
            }
            AdminData::Users(listing) => {
                page.users = listing.users.iter().map(UserView::from).collect();
                page.pager = render_pager(
                    state.pagination.current_page,
                    state.pagination.total_pages,
                    link_builder(&base_path, &state.user_filters),
                );
            }
        }
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::admin::dtos::{AdminDashboard, UserPage};
    use crate::features::admin::panel::AdminSection;
    use crate::features::auth::model::Role;
    use crate::features::reports::models::PersonRef;
    use crate::shared::test_helpers::{panel_context, sample_report, sample_user};
    use crate::shared::types::PageMeta;

    #[test]
    fn test_users_section_keeps_role_filter_in_pager() {
        let pages = panel_context();
        let mut session = ViewSession::default();
        session.admin.activate(AdminSection::Users);
        session.admin.user_filters.role = Some(Role::Worker);
        let ticket = session.admin.begin(AdminSection::Users);
        session.admin.commit(
            ticket,
            AdminData::Users(UserPage {
                users: vec![sample_user(Role::Worker)],
                meta: PageMeta {
                    current_page: 1,
                    total_pages: 2,
                    total: 25,
                },
            }),
        );

        let admin = sample_user(Role::Admin);
        let page = AdminPage::build(&pages, &mut session, &admin, None, true);
        assert_eq!(page.section, "users");
        assert_eq!(page.users.len(), 1);
        assert_eq!(page.user_filters.role, "worker");

        let pager = serde_json::to_value(page.pager.unwrap()).unwrap().to_string();
        assert!(pager.contains("/admin/users?page=2&role=worker"));
    }

    #[test]
    fn test_dashboard_projection() {
        let pages = panel_context();
        let mut session = ViewSession::default();
        let ticket = session.admin.begin(AdminSection::Dashboard);
        session.admin.commit(
            ticket,
            AdminData::Dashboard(AdminDashboard {
                total_reports: 9,
                recent_reports: vec![sample_report("r1", None)],
                ..Default::default()
            }),
        );

        let page = AdminPage::build(&pages, &mut session, &sample_user(Role::Admin), None, true);
        let dashboard = page.dashboard.unwrap();
        assert_eq!(dashboard.stats[0].value, 9);
        assert_eq!(dashboard.recent_reports.len(), 1);
        assert_eq!(page.layout.sections.len(), 4);
        assert!(page.layout.sections[0].active);
    }

    #[test]
    fn test_detail_preselects_assigned_worker() {
        let pages = panel_context();
        let worker = sample_user(Role::Worker);
        let mut report = sample_report("r1", Some((40.7, -74.0)));
        report.assigned_to = Some(PersonRef {
            id: worker.id.clone(),
            first_name: worker.first_name.clone(),
            last_name: worker.last_name.clone(),
        });

        let detail = AdminReportDetail::new(&pages, &report, std::slice::from_ref(&worker));
        assert!(detail.workers[0].selected);
        assert_eq!(detail.view.map.location_count, 1);
    }
}
