use serde::Serialize;

use crate::features::auth::model::UserProfile;
use crate::features::map::{report_markers, RenderedMap};
use crate::features::pagination::{link_builder, render_pager, Pager};
use crate::features::panels::{section_links, LayoutView, PanelContext, Section, ViewSession};
use crate::features::reports::dtos::{
    report_views, Choices, FilterView, PublicStats, ReportView,
};
use crate::features::reports::models::Report;
use crate::features::reports::panel::PublicData;
use crate::shared::constants::{DEFAULT_LOCATION, MAIN_ZOOM, REPORT_ZOOM};

/// Report shown in the detail modal, with its own single-pin map
#[derive(Debug, Clone, Serialize)]
pub struct ReportDetailView {
    pub report: ReportView,
    pub map: RenderedMap,
}

impl ReportDetailView {
    pub fn new<L>(pages: &PanelContext, report: &Report, link: L) -> Self
    where
        L: Fn(&Report) -> String,
    {
        let markers = report_markers(std::slice::from_ref(report), link);
        Self {
            report: ReportView::from(report),
            map: pages
                .maps
                .render("detail-map", DEFAULT_LOCATION, REPORT_ZOOM, markers),
        }
    }
}

pub fn public_report_link(report: &Report) -> String {
    format!("/reports/{}", report.id)
}

/// Template context of the public panel (`public/index.html` and `public/section.html`)
#[derive(Debug, Clone, Serialize)]
pub struct PublicPage {
    pub layout: LayoutView,
    pub section: &'static str,
    /// A successful fetch of the section exists
    pub loaded: bool,
    pub reports: Vec<ReportView>,
    pub stats: Option<PublicStats>,
    pub filters: FilterView,
    pub pager: Option<Pager>,
    pub map: Option<RenderedMap>,
    pub choices: Choices,
    pub can_submit: bool,
    pub detail: Option<ReportDetailView>,
}

impl PublicPage {
    /// Project the public panel state of `session`.
    ///
    /// Toasts are drained only for full pages; refresh fragments leave them queued.
    pub fn build(
        pages: &PanelContext,
        session: &mut ViewSession,
        user: Option<&UserProfile>,
        detail: Option<ReportDetailView>,
        full_page: bool,
    ) -> Self {
        let toasts = if full_page {
            session.take_toasts()
        } else {
            Vec::new()
        };
        let state = &session.public;
        let active = state.active();

        let sections = if user.is_some() {
            section_links(active)
        } else {
            Vec::new()
        };
        let layout = pages.layout("City Reports", user, toasts, sections, Some("/refresh"));

        let mut page = Self {
            layout,
            section: active.slug(),
            loaded: false,
            reports: Vec::new(),
            stats: None,
            filters: FilterView::from(&state.report_filters),
            pager: None,
            map: None,
            choices: Choices::all(),
            can_submit: user.is_some(),
            detail,
        };

        let reports: &[Report] = match state.snapshot(active) {
            Some(PublicData::Reports(listing)) => {
                page.stats = Some(PublicStats::from_page(listing));
                page.pager = render_pager(
                    state.pagination.current_page,
                    state.pagination.total_pages,
                    link_builder("/", &state.report_filters),
                );
                &listing.reports
            }
            Some(PublicData::MyReports(mine)) => mine,
            None => return page,
        };

        page.loaded = true;
        page.reports = report_views(reports);
        page.map = Some(pages.maps.render(
            "reports-map",
            DEFAULT_LOCATION,
            MAIN_ZOOM,
            report_markers(reports, public_report_link),
        ));
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::dtos::ReportPage;
    use crate::features::reports::panel::PublicSection;
    use crate::shared::test_helpers::{panel_context, sample_report};
    use crate::shared::types::PageMeta;

    #[test]
    fn test_reports_section_projection() {
        let pages = panel_context();
        let mut session = ViewSession::default();
        let ticket = session.public.begin(PublicSection::Reports);
        session.public.commit(
            ticket,
            PublicData::Reports(ReportPage {
                reports: vec![
                    sample_report("r1", Some((40.7, -74.0))),
                    sample_report("r2", None),
                ],
                meta: PageMeta {
                    current_page: 1,
                    total_pages: 3,
                    total: 30,
                },
            }),
        );

        let page = PublicPage::build(&pages, &mut session, None, None, true);
        assert!(page.loaded);
        assert_eq!(page.reports.len(), 2);
        assert_eq!(page.stats.unwrap().total_reports, 30);
        assert!(page.pager.is_some());
        assert_eq!(page.map.unwrap().location_count, 1);
        assert!(!page.can_submit);
        assert!(page.layout.sections.is_empty());
    }

    #[test]
    fn test_unloaded_section_renders_empty() {
        let pages = panel_context();
        let mut session = ViewSession::default();
        let page = PublicPage::build(&pages, &mut session, None, None, false);
        assert!(!page.loaded);
        assert!(page.map.is_none());
    }
}
