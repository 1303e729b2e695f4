use crate::features::reports::models::Coordinates;

/// Fallback map center and report location (New York City)
pub const DEFAULT_LOCATION: Coordinates = Coordinates {
    lat: 40.7128,
    lng: -74.0060,
};

// =============================================================================
// PAGE SIZES
// =============================================================================

/// Reports per page on the public board
pub const PUBLIC_PAGE_SIZE: u32 = 12;

/// Rows per page on admin and worker tables
pub const PANEL_PAGE_SIZE: u32 = 20;

/// Upper bound of reports pulled for the admin map
pub const ADMIN_MAP_LIMIT: u32 = 1000;

/// Upper bound of assigned reports pulled for the worker map
pub const WORKER_MAP_LIMIT: u32 = 100;

// =============================================================================
// MAP
// =============================================================================

/// Zoom used for overview maps
pub const MAIN_ZOOM: u8 = 12;

/// Zoom used when a single report is shown
pub const REPORT_ZOOM: u8 = 15;

/// Pin colors cycled by marker index on static images
pub const STATIC_MARKER_PALETTE: [&str; 6] = ["red", "blue", "green", "yellow", "orange", "purple"];

/// Leaflet builds tried in order by the page script
pub const LEAFLET_SCRIPT_URLS: [&str; 3] = [
    "https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.js",
    "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js",
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js",
];

pub const LEAFLET_STYLESHEET_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";

// =============================================================================
// COOKIES
// =============================================================================

/// Cookie carrying the backend bearer token
pub const TOKEN_COOKIE: &str = "token";

/// Cookie carrying the opaque view-session id
pub const SESSION_COOKIE: &str = "sid";
