mod report_dto;
mod report_view;

pub use report_dto::*;
pub use report_view::*;
