//! Role panel plumbing shared by the public, admin and worker panels.
//!
//! Each browser owns one [`ViewSession`] holding a [`PanelState`] per panel. Section
//! loads go through [`fetch_section`], which tags every fetch with a per-section
//! generation so a slow response never overwrites a newer one.

mod form;
mod page;
mod refresh;
mod session;
mod state;

pub use form::{finish_form, FormFailure};
pub use page::{render_html, section_links, LayoutView, PanelContext};
pub use refresh::{fetch_section, FetchMode, Panel};
pub use session::ViewSession;
pub use state::{PanelState, Section, SectionSnapshot};
