mod capability;
mod geometry;
mod markers;
mod renderer;

pub use capability::MapCapabilities;
pub use markers::report_markers;
pub use renderer::{MapRenderer, RenderedMap};
