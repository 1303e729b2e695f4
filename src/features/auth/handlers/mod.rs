mod auth_handler;

pub use auth_handler::{login, logout, register};
