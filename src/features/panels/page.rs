use std::time::Duration;

use axum::response::Html;
use serde::Serialize;

use super::state::Section;
use crate::core::error::Result;
use crate::features::auth::model::UserProfile;
use crate::features::map::MapRenderer;
use crate::modules::views::{self, Toast};
use crate::shared::constants::LEAFLET_STYLESHEET_URL;

/// Rendering settings shared by every panel
pub struct PanelContext {
    pub maps: MapRenderer,
    pub secure_cookies: bool,
    pub refresh_interval: Duration,
    pub geolocation_timeout: Duration,
    /// Base URL uploaded images are served from
    pub asset_base: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavUser {
    pub name: String,
    pub role: &'static str,
    pub is_admin: bool,
    pub is_worker: bool,
}

impl From<&UserProfile> for NavUser {
    fn from(user: &UserProfile) -> Self {
        Self {
            name: user.full_name(),
            role: user.role.as_str(),
            is_admin: user.is_admin(),
            is_worker: user.is_worker(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionLink {
    pub slug: &'static str,
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Section tabs of a panel, `active` highlighted
pub fn section_links<S: Section>(active: S) -> Vec<SectionLink> {
    S::ALL
        .iter()
        .map(|section| SectionLink {
            slug: section.slug(),
            label: section.label(),
            href: section.href(),
            active: *section == active,
        })
        .collect()
}

/// Chrome shared by every page: navigation, toasts and the refresh script settings
#[derive(Debug, Clone, Serialize)]
pub struct LayoutView {
    pub title: &'static str,
    pub user: Option<NavUser>,
    pub toasts: Vec<Toast>,
    pub sections: Vec<SectionLink>,
    /// Polled silently by the page script; none on pages without live data
    pub refresh_url: Option<&'static str>,
    pub refresh_interval_ms: u64,
    pub geolocation_timeout_ms: u64,
    pub asset_base: String,
    pub leaflet_stylesheet: &'static str,
}

impl PanelContext {
    pub fn layout(
        &self,
        title: &'static str,
        user: Option<&UserProfile>,
        toasts: Vec<Toast>,
        sections: Vec<SectionLink>,
        refresh_url: Option<&'static str>,
    ) -> LayoutView {
        LayoutView {
            title,
            user: user.map(NavUser::from),
            toasts,
            sections,
            refresh_url,
            refresh_interval_ms: self.refresh_interval.as_millis() as u64,
            geolocation_timeout_ms: self.geolocation_timeout.as_millis() as u64,
            asset_base: self.asset_base.clone(),
            leaflet_stylesheet: LEAFLET_STYLESHEET_URL,
        }
    }
}

/// Render a full page or section fragment
pub fn render_html<C: Serialize>(template: &str, ctx: C) -> Result<Html<String>> {
    Ok(Html(views::render(template, ctx)?))
}

