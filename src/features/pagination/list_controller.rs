use serde::Serialize;

use super::query::{QueryBuilder, QueryFilters};
use crate::shared::types::PageMeta;

/// Backend listing request: page, page size and filter constraints
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<F> {
    pub page: Option<u32>,
    pub limit: u32,
    pub filters: F,
}

impl<F: QueryFilters> ListQuery<F> {
    /// A paged request; pages below 1 are read as page 1
    pub fn paged(page: Option<u32>, limit: u32, filters: F) -> Self {
        Self {
            page: Some(page.unwrap_or(1).max(1)),
            limit,
            filters,
        }
    }

    /// A single bounded request, used by the map sections
    pub fn bounded(limit: u32, filters: F) -> Self {
        Self {
            page: None,
            limit,
            filters,
        }
    }

    pub fn query_string(&self) -> String {
        QueryBuilder::new()
            .optional("page", self.page)
            .param("limit", self.limit)
            .filters(&self.filters)
            .build()
    }
}

/// Per-panel pagination slot, overwritten by every committed paged fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSlot {
    pub current_page: u32,
    pub total_pages: u32,
}

impl Default for PageSlot {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
        }
    }
}

impl From<PageMeta> for PageSlot {
    fn from(meta: PageMeta) -> Self {
        Self {
            current_page: meta.current_page.max(1),
            total_pages: meta.total_pages,
        }
    }
}

/// Page link builder for `base_path` that keeps the active filters
pub fn link_builder<'a, F>(base_path: &'a str, filters: &'a F) -> impl Fn(u32) -> String + 'a
where
    F: QueryFilters,
{
    move |page| {
        QueryBuilder::new()
            .param("page", page)
            .filters(filters)
            .append_to(base_path)
    }
}
