//! HTML rendering: the embedded minijinja environment and flash toasts.

mod engine;
mod toast;

pub use engine::{render, TemplateError};
pub use toast::Toast;
