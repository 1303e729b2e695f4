pub mod dtos;
pub mod handlers;
pub mod models;
pub mod page;
pub mod panel;
pub mod routes;
pub mod services;

pub use services::ReportService;
