//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the backend REST client, the view-session store and the HTML view engine.

pub mod backend;
pub mod sessions;
pub mod views;
