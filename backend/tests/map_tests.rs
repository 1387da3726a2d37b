//! Map viewport integration tests
//!
//! Covers:
//! - Boundaries with fewer than 3 points always render the placeholder
//! - Fitted viewports: bounding region, center, and path order
//! - The farm-selection scenario: no boundary vs. triangle boundary

use chrono::Utc;
use proptest::prelude::*;
use uuid::Uuid;

use shared::geo::{fit_viewport, MapView};
use shared::{BoundaryPoint, Farm};

fn farm(name: &str, boundary: Option<Vec<BoundaryPoint>>) -> Farm {
    Farm {
        id: Uuid::new_v4(),
        owner_phone: "9876543210".to_string(),
        farm_name: name.to_string(),
        location: "Nashik, Maharashtra".to_string(),
        crop: "Apple".to_string(),
        field_id: "1752169888334".to_string(),
        boundary,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

proptest! {
    /// Under 3 vertices there is never a polygon, whatever the coordinates
    #[test]
    fn short_boundaries_always_render_placeholder(
        points in prop::collection::vec(
            (-180.0f64..180.0, -90.0f64..90.0).prop_map(|(lng, lat)| [lng, lat]),
            0..3,
        )
    ) {
        prop_assert_eq!(fit_viewport(Some(&points)), MapView::Placeholder);
    }
}

#[test]
fn selecting_farm_without_boundary_renders_placeholder() {
    let farm_a = farm("FarmA", None);
    let view = fit_viewport(farm_a.boundary.as_deref());
    assert_eq!(view, MapView::Placeholder);
    assert!(!farm_a.has_renderable_boundary());
}

#[test]
fn selecting_farm_with_triangle_renders_fitted_polygon() {
    let triangle = vec![[73.78, 19.99], [73.80, 19.99], [73.79, 20.01]];
    let farm_b = farm("FarmB", Some(triangle));
    assert!(farm_b.has_renderable_boundary());

    match fit_viewport(farm_b.boundary.as_deref()) {
        MapView::Fitted { bounds, center, path } => {
            assert!((bounds.west - 73.78).abs() < 1e-9);
            assert!((bounds.east - 73.80).abs() < 1e-9);
            assert!((bounds.south - 19.99).abs() < 1e-9);
            assert!((bounds.north - 20.01).abs() < 1e-9);
            assert!((center.longitude - 73.79).abs() < 1e-9);
            assert!((center.latitude - 20.00).abs() < 1e-9);
            assert_eq!(path.len(), 3);
            // Path entries flip [lng, lat] into (lat, lng)
            assert!((path[0].latitude - 19.99).abs() < 1e-9);
            assert!((path[0].longitude - 73.78).abs() < 1e-9);
        }
        MapView::Placeholder => panic!("triangle boundary must fit a polygon"),
    }
}

#[test]
fn fitted_center_is_bounds_midpoint_for_irregular_polygons() {
    // The center derives from the bounding box, not the vertex average
    let boundary = vec![[10.0, 0.0], [30.0, 0.0], [30.0, 8.0], [10.0, 8.0], [12.0, 4.0]];
    match fit_viewport(Some(&boundary)) {
        MapView::Fitted { center, .. } => {
            assert!((center.longitude - 20.0).abs() < 1e-9);
            assert!((center.latitude - 4.0).abs() < 1e-9);
        }
        MapView::Placeholder => panic!("expected a fitted viewport"),
    }
}

#[test]
fn map_view_serializes_with_view_tag() {
    let json = serde_json::to_value(MapView::Placeholder).unwrap();
    assert_eq!(json["view"], "placeholder");

    let triangle = [[73.78, 19.99], [73.80, 19.99], [73.79, 20.01]];
    let json = serde_json::to_value(fit_viewport(Some(&triangle))).unwrap();
    assert_eq!(json["view"], "fitted");
    assert_eq!(json["path"].as_array().unwrap().len(), 3);
}
