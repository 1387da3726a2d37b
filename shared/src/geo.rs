//! Boundary geometry: bounding regions and map viewport fitting
//!
//! A farm boundary arrives as ordered `[longitude, latitude]` pairs. Fitting
//! computes the bounding region and its center so a map view can zoom to the
//! field and drop a marker. Anything with fewer than three vertices is not a
//! polygon and renders as a placeholder.

use serde::{Deserialize, Serialize};

use crate::types::{BoundaryPoint, GpsCoordinates};

/// Minimum vertices a boundary needs to render as a polygon
pub const MIN_POLYGON_POINTS: usize = 3;

/// A latitude/longitude bounding region
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLngBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl LatLngBounds {
    /// Smallest region containing every point; `None` for an empty sequence
    pub fn from_points(points: &[BoundaryPoint]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = LatLngBounds {
            south: first[1],
            west: first[0],
            north: first[1],
            east: first[0],
        };
        for &[lng, lat] in &points[1..] {
            bounds.south = bounds.south.min(lat);
            bounds.north = bounds.north.max(lat);
            bounds.west = bounds.west.min(lng);
            bounds.east = bounds.east.max(lng);
        }
        Some(bounds)
    }

    pub fn center(&self) -> GpsCoordinates {
        GpsCoordinates::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}

/// What the map should show for a farm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum MapView {
    /// No farm selected, or the boundary cannot form a polygon
    Placeholder,
    /// Viewport fitted to the boundary, with a center marker
    Fitted {
        bounds: LatLngBounds,
        center: GpsCoordinates,
        /// Polygon path in (latitude, longitude) order
        path: Vec<GpsCoordinates>,
    },
}

impl MapView {
    pub fn is_fitted(&self) -> bool {
        matches!(self, MapView::Fitted { .. })
    }
}

/// Fit a viewport to a boundary. Boundaries with fewer than
/// [`MIN_POLYGON_POINTS`] vertices (or none at all) yield the placeholder.
pub fn fit_viewport(boundary: Option<&[BoundaryPoint]>) -> MapView {
    let points = match boundary {
        Some(points) if points.len() >= MIN_POLYGON_POINTS => points,
        _ => return MapView::Placeholder,
    };

    let bounds = match LatLngBounds::from_points(points) {
        Some(bounds) => bounds,
        None => return MapView::Placeholder,
    };

    MapView::Fitted {
        bounds,
        center: bounds.center(),
        path: points
            .iter()
            .map(|&[lng, lat]| GpsCoordinates::new(lat, lng))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_points_is_not_a_polygon() {
        let boundary = [[77.0, 12.0], [77.1, 12.1]];
        assert_eq!(fit_viewport(Some(&boundary)), MapView::Placeholder);
    }

    #[test]
    fn triangle_fits() {
        let boundary = [[77.0, 12.0], [77.2, 12.0], [77.1, 12.2]];
        let view = fit_viewport(Some(&boundary));
        match view {
            MapView::Fitted { bounds, center, path } => {
                assert_eq!(bounds.west, 77.0);
                assert_eq!(bounds.east, 77.2);
                assert_eq!(bounds.south, 12.0);
                assert_eq!(bounds.north, 12.2);
                assert!((center.longitude - 77.1).abs() < 1e-9);
                assert!((center.latitude - 12.1).abs() < 1e-9);
                assert_eq!(path.len(), 3);
            }
            MapView::Placeholder => panic!("expected a fitted viewport"),
        }
    }

    #[test]
    fn missing_boundary_is_placeholder() {
        assert_eq!(fit_viewport(None), MapView::Placeholder);
    }
}
