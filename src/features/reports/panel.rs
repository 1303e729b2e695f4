use crate::features::panels::{Panel, PanelState, Section, SectionSnapshot, ViewSession};
use crate::features::reports::dtos::{ReportPage, ReportQuery};
use crate::features::reports::models::Report;
use crate::shared::constants::PUBLIC_PAGE_SIZE;
use crate::shared::types::PageMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicSection {
    Reports,
    MyReports,
}

impl Section for PublicSection {
    const ALL: &'static [Self] = &[PublicSection::Reports, PublicSection::MyReports];
    const BASE_PATH: &'static str = "";

    fn slug(&self) -> &'static str {
        match self {
            PublicSection::Reports => "reports",
            PublicSection::MyReports => "my-reports",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PublicSection::Reports => "All Reports",
            PublicSection::MyReports => "My Reports",
        }
    }

    fn href(&self) -> String {
        match self {
            PublicSection::Reports => "/".to_string(),
            PublicSection::MyReports => "/my-reports".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum PublicData {
    Reports(ReportPage),
    MyReports(Vec<Report>),
}

impl SectionSnapshot for PublicData {
    fn page_meta(&self) -> Option<PageMeta> {
        match self {
            PublicData::Reports(page) => Some(page.meta),
            PublicData::MyReports(_) => None,
        }
    }
}

pub struct PublicPanel;

impl Panel for PublicPanel {
    type Section = PublicSection;
    type Data = PublicData;

    const NAME: &'static str = "public";

    fn state(session: &mut ViewSession) -> &mut PanelState<PublicSection, PublicData> {
        &mut session.public
    }
}

/// Backend request behind a public section
#[derive(Debug, Clone, PartialEq)]
pub enum PublicFetch {
    Reports(ReportQuery),
    MyReports,
}

impl PublicFetch {
    /// Request for `section` from the filters and page slot currently held
    pub fn for_section(section: PublicSection, state: &PanelState<PublicSection, PublicData>) -> Self {
        match section {
            PublicSection::Reports => PublicFetch::Reports(ReportQuery::paged(
                Some(state.pagination.current_page),
                PUBLIC_PAGE_SIZE,
                state.report_filters.clone(),
            )),
            PublicSection::MyReports => PublicFetch::MyReports,
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            PublicFetch::Reports(_) => "Failed to load reports",
            PublicFetch::MyReports => "Failed to load your reports",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::dtos::ReportFilters;
    use crate::features::reports::models::ReportStatus;

    #[test]
    fn test_public_hrefs() {
        assert_eq!(PublicSection::Reports.href(), "/");
        assert_eq!(PublicSection::from_slug("my-reports"), Some(PublicSection::MyReports));
    }

    #[test]
    fn test_reports_fetch_uses_slot_and_filters() {
        let mut state: PanelState<PublicSection, PublicData> = PanelState::default();
        state.pagination.current_page = 4;
        state.report_filters = ReportFilters::with_status(Some(ReportStatus::Pending));

        let PublicFetch::Reports(query) = PublicFetch::for_section(PublicSection::Reports, &state)
        else {
            panic!("expected reports fetch");
        };
        assert_eq!(query.query_string(), "page=4&limit=12&status=pending");
    }
}
