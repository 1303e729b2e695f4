//! Paged listings: backend query encoding, the pagination slot and the windowed pager.

mod list_controller;
mod pager;
mod query;

pub use list_controller::{link_builder, ListQuery, PageSlot};
pub use pager::{render_pager, Pager};
pub use query::{QueryBuilder, QueryFilters};
