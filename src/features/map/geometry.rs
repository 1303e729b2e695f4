use serde::Serialize;

use crate::features::reports::models::Coordinates;

/// Padding used when an axis span is zero or there are no points at all
const MIN_PADDING_DEG: f64 = 0.05;

/// Share of the span added on each side of an axis
const PADDING_RATIO: f64 = 0.2;

/// Geographic bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Padded extents of `points`, or a small box around `center` when there are none
    pub fn around(points: &[Coordinates], center: Coordinates) -> Self {
        let Some(first) = points.first() else {
            return Self {
                min_lat: center.lat - MIN_PADDING_DEG,
                min_lng: center.lng - MIN_PADDING_DEG,
                max_lat: center.lat + MIN_PADDING_DEG,
                max_lng: center.lng + MIN_PADDING_DEG,
            };
        };

        let mut bbox = Self {
            min_lat: first.lat,
            min_lng: first.lng,
            max_lat: first.lat,
            max_lng: first.lng,
        };
        for point in &points[1..] {
            bbox.min_lat = bbox.min_lat.min(point.lat);
            bbox.min_lng = bbox.min_lng.min(point.lng);
            bbox.max_lat = bbox.max_lat.max(point.lat);
            bbox.max_lng = bbox.max_lng.max(point.lng);
        }

        let lat_pad = axis_padding(bbox.max_lat - bbox.min_lat);
        let lng_pad = axis_padding(bbox.max_lng - bbox.min_lng);

        Self {
            min_lat: bbox.min_lat - lat_pad,
            min_lng: bbox.min_lng - lng_pad,
            max_lat: bbox.max_lat + lat_pad,
            max_lng: bbox.max_lng + lng_pad,
        }
    }

    /// `minLng,minLat,maxLng,maxLat` as expected by the OpenStreetMap export
    pub fn to_osm_param(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lng, self.min_lat, self.max_lng, self.max_lat
        )
    }
}

fn axis_padding(span: f64) -> f64 {
    if span == 0.0 {
        MIN_PADDING_DEG
    } else {
        span * PADDING_RATIO
    }
}
