//! Template engine for the HTML views using Jinja2 syntax.
//!
//! Templates are compiled into the binary and registered once on first use. Names ending
//! in `.html` are auto-escaped.

use minijinja::Environment;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static VIEW_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Every view template, keyed by its name relative to `templates/`
const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../../templates/layout.html")),
    ("error.html", include_str!("../../../templates/error.html")),
    (
        "partials/toasts.html",
        include_str!("../../../templates/partials/toasts.html"),
    ),
    (
        "partials/pager.html",
        include_str!("../../../templates/partials/pager.html"),
    ),
    (
        "partials/map.html",
        include_str!("../../../templates/partials/map.html"),
    ),
    (
        "partials/map_popup.html",
        include_str!("../../../templates/partials/map_popup.html"),
    ),
    (
        "partials/report_card.html",
        include_str!("../../../templates/partials/report_card.html"),
    ),
    (
        "public/index.html",
        include_str!("../../../templates/public/index.html"),
    ),
    (
        "public/section.html",
        include_str!("../../../templates/public/section.html"),
    ),
    (
        "public/report_detail.html",
        include_str!("../../../templates/public/report_detail.html"),
    ),
    (
        "admin/index.html",
        include_str!("../../../templates/admin/index.html"),
    ),
    (
        "admin/section.html",
        include_str!("../../../templates/admin/section.html"),
    ),
    (
        "admin/report_detail.html",
        include_str!("../../../templates/admin/report_detail.html"),
    ),
    (
        "worker/index.html",
        include_str!("../../../templates/worker/index.html"),
    ),
    (
        "worker/section.html",
        include_str!("../../../templates/worker/section.html"),
    ),
    (
        "worker/report_detail.html",
        include_str!("../../../templates/worker/report_detail.html"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    for (name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::error!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

/// Get the global template environment
fn get_environment() -> &'static Environment<'static> {
    VIEW_ENV.get_or_init(init_environment)
}

/// Render `template_name` with any serializable context
pub fn render<C: Serialize>(template_name: &str, ctx: C) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template.render(ctx).map_err(|e| {
        tracing::error!("Failed to render {}: {:#}", template_name, e);
        TemplateError::RenderError(e.to_string())
    })
}
