pub mod admin;
pub mod auth;
pub mod map;
pub mod pagination;
pub mod panels;
pub mod reports;
pub mod worker;
