//! REST backend integration
//!
//! [`CivicApi`] is the seam handlers depend on; [`BackendClient`] is the reqwest implementation.

mod api;
mod client;
mod error;

pub use api::CivicApi;
pub use client::BackendClient;
pub use error::{BackendError, BackendResult};
