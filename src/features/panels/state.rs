use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::features::admin::dtos::UserFilters;
use crate::features::pagination::PageSlot;
use crate::features::reports::dtos::ReportFilters;
use crate::features::reports::models::ReportStatus;
use crate::shared::types::PageMeta;

/// A selectable section of a role panel
pub trait Section: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Every section; the first one is active by default
    const ALL: &'static [Self];

    /// Path the panel is mounted on
    const BASE_PATH: &'static str;

    fn slug(&self) -> &'static str;

    fn label(&self) -> &'static str;

    fn href(&self) -> String {
        format!("{}/{}", Self::BASE_PATH, self.slug())
    }

    fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.slug() == slug)
    }
}

/// Fetched data kept as the last successful projection of a section
pub trait SectionSnapshot: Clone + Send + 'static {
    /// Page envelope of paged listings
    fn page_meta(&self) -> Option<PageMeta> {
        None
    }
}

/// Proof that a fetch for `section` was started, tagged with its generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket<S> {
    section: S,
    generation: u64,
}

/// View state of one role panel for one browser
#[derive(Debug, Clone)]
pub struct PanelState<S: Section, D> {
    active: S,
    pub pagination: PageSlot,
    pub report_filters: ReportFilters,
    pub user_filters: UserFilters,
    pub map_status: Option<ReportStatus>,
    snapshots: HashMap<S, D>,
    generations: HashMap<S, u64>,
}

impl<S: Section, D> Default for PanelState<S, D> {
    fn default() -> Self {
        Self {
            active: S::ALL[0],
            pagination: PageSlot::default(),
            report_filters: ReportFilters::default(),
            user_filters: UserFilters::default(),
            map_status: None,
            snapshots: HashMap::new(),
            generations: HashMap::new(),
        }
    }
}

impl<S: Section, D: SectionSnapshot> PanelState<S, D> {
    pub fn active(&self) -> S {
        self.active
    }

    /// Make `section` the one visible section
    pub fn activate(&mut self, section: S) {
        self.active = section;
    }

    /// Start a fetch; any ticket issued earlier for the same section becomes stale
    pub fn begin(&mut self, section: S) -> FetchTicket<S> {
        let generation = self.generations.entry(section).or_insert(0);
        *generation += 1;
        FetchTicket {
            section,
            generation: *generation,
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket<S>) -> bool {
        self.generations.get(&ticket.section).copied() == Some(ticket.generation)
    }

    /// Store `data` unless a newer fetch for the section has started since `ticket`.
    ///
    /// Paged data also overwrites the pagination slot.
    pub fn commit(&mut self, ticket: FetchTicket<S>, data: D) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }
        if let Some(meta) = data.page_meta() {
            self.pagination = PageSlot::from(meta);
        }
        self.snapshots.insert(ticket.section, data);
        true
    }

    pub fn snapshot(&self, section: S) -> Option<&D> {
        self.snapshots.get(&section)
    }
}
