//! Capability-probing map renderer.
//!
//! Every call yields a [`RenderedMap`]; the page script only decides at runtime whether
//! the widget script or the static image actually loaded and swaps in the fallback
//! carried alongside.

use serde::Serialize;

use super::capability::{select_strategy, MapCapabilities, MapStrategy};
use super::geometry::BoundingBox;
use super::markers::Marker;
use crate::features::reports::models::Coordinates;
use crate::shared::constants::{LEAFLET_SCRIPT_URLS, STATIC_MARKER_PALETTE};

const STATIC_MAP_BASE_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";
const STATIC_MAP_SIZE: &str = "800x500";
const OSM_EMBED_BASE_URL: &str = "https://www.openstreetmap.org/export/embed.html";
const OSM_VIEW_BASE_URL: &str = "https://www.openstreetmap.org/";
const GOOGLE_MAPS_LINK_BASE_URL: &str = "https://www.google.com/maps";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedMap {
    pub container_id: String,
    pub location_count: usize,
    pub view: MapView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapView {
    Widget(WidgetMap),
    StaticImage(StaticImageMap),
    Embed(EmbedMap),
    Text(TextMap),
}

impl MapView {
    pub fn strategy(&self) -> MapStrategy {
        match self {
            MapView::Widget(_) => MapStrategy::Widget,
            MapView::StaticImage(_) => MapStrategy::StaticImage,
            MapView::Embed(_) => MapStrategy::Embed,
            MapView::Text(_) => MapStrategy::Text,
        }
    }
}

/// Leaflet map, initialised by the page script from this JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetMap {
    pub center: Coordinates,
    pub zoom: u8,
    pub markers: Vec<Marker>,
    /// Fit the view to all markers (padded) instead of center/zoom
    pub fit_bounds: bool,
    pub script_urls: Vec<&'static str>,
    /// Shown when no Leaflet build loads
    pub fallback: EmbedMap,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticImageMap {
    pub image_url: String,
    /// Shown when the image fails to load
    pub fallback: TextMap,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedMap {
    pub iframe_url: String,
    pub link_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextMap {
    pub entries: Vec<TextEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextEntry {
    pub label: String,
    pub link: String,
}

pub struct MapRenderer {
    capabilities: MapCapabilities,
}

impl MapRenderer {
    pub fn new(capabilities: MapCapabilities) -> Self {
        Self { capabilities }
    }

    /// Render `markers` around `center`.
    ///
    /// When markers exist the first one becomes the center regardless of `center`.
    pub fn render(
        &self,
        container_id: &str,
        center: Coordinates,
        zoom: u8,
        markers: Vec<Marker>,
    ) -> RenderedMap {
        let center = markers.first().map(Marker::position).unwrap_or(center);
        let location_count = markers.len();

        let view = match select_strategy(&self.capabilities) {
            MapStrategy::Widget => MapView::Widget(WidgetMap {
                center,
                zoom,
                fit_bounds: markers.len() > 1,
                script_urls: LEAFLET_SCRIPT_URLS.to_vec(),
                fallback: embed_map(center, zoom, &markers),
                markers,
            }),
            MapStrategy::StaticImage => {
                // select_strategy only picks this tier when a key is present
                let key = self.capabilities.static_image_key.as_deref().unwrap_or_default();
                MapView::StaticImage(StaticImageMap {
                    image_url: static_image_url(center, zoom, &markers, key),
                    fallback: text_map(center, &markers),
                })
            }
            MapStrategy::Embed => MapView::Embed(embed_map(center, zoom, &markers)),
            MapStrategy::Text => MapView::Text(text_map(center, &markers)),
        };

        tracing::debug!(
            "Rendered map {} as {:?} with {} markers",
            container_id,
            view.strategy(),
            location_count
        );

        RenderedMap {
            container_id: container_id.to_string(),
            location_count,
            view,
        }
    }
}

fn static_image_url(center: Coordinates, zoom: u8, markers: &[Marker], key: &str) -> String {
    let mut url = format!(
        "{}?center={},{}&zoom={}&size={}&maptype=roadmap",
        STATIC_MAP_BASE_URL, center.lat, center.lng, zoom, STATIC_MAP_SIZE
    );

    if markers.is_empty() {
        url.push_str(&format!("&markers=color:red|{},{}", center.lat, center.lng));
    } else {
        for (index, marker) in markers.iter().enumerate() {
            let color = STATIC_MARKER_PALETTE[index % STATIC_MARKER_PALETTE.len()];
            url.push_str(&format!(
                "&markers=color:{}|{},{}",
                color, marker.lat, marker.lng
            ));
        }
    }

    url.push_str(&format!("&key={}", urlencoding::encode(key)));
    url
}

fn embed_map(center: Coordinates, zoom: u8, markers: &[Marker]) -> EmbedMap {
    let points: Vec<Coordinates> = markers.iter().map(Marker::position).collect();
    let bbox = BoundingBox::around(&points, center);

    EmbedMap {
        iframe_url: format!(
            "{}?bbox={}&layer=mapnik&marker={},{}",
            OSM_EMBED_BASE_URL,
            bbox.to_osm_param(),
            center.lat,
            center.lng
        ),
        link_url: format!(
            "{}?mlat={}&mlon={}&zoom={}",
            OSM_VIEW_BASE_URL, center.lat, center.lng, zoom
        ),
    }
}

fn google_maps_link(point: Coordinates) -> String {
    format!("{}?q={},{}", GOOGLE_MAPS_LINK_BASE_URL, point.lat, point.lng)
}

fn text_map(center: Coordinates, markers: &[Marker]) -> TextMap {
    let entries = if markers.is_empty() {
        vec![TextEntry {
            label: format!("Center: {:.4}, {:.4}", center.lat, center.lng),
            link: google_maps_link(center),
        }]
    } else {
        markers
            .iter()
            .enumerate()
            .map(|(index, marker)| TextEntry {
                label: format!(
                    "Location {}: {:.4}, {:.4}",
                    index + 1,
                    marker.lat,
                    marker.lng
                ),
                link: google_maps_link(marker.position()),
            })
            .collect()
    };

    TextMap { entries }
}
