//! GeoJSON interchange rendering.
//!
//! Read paths hand back the store's own `ST_AsGeoJSON` output; this module
//! renders the same shape from a typed [`Geometry`] so shapes can be echoed
//! (and asserted in tests) without a round-trip through the store.

use serde_json::{json, Value};

use crate::geometry::{Geometry, Position};

/// Render a geometry as a GeoJSON geometry object.
///
/// Coordinates come out in `[longitude, latitude]` order, nested per type.
pub fn to_geojson(geometry: &Geometry) -> Value {
    match geometry {
        Geometry::Point(p) => json!({
            "type": "Point",
            "coordinates": position(p),
        }),
        Geometry::LineString(points) => json!({
            "type": "LineString",
            "coordinates": positions(points),
        }),
        Geometry::Polygon(rings) => json!({
            "type": "Polygon",
            "coordinates": rings.iter().map(|r| positions(r)).collect::<Vec<_>>(),
        }),
    }
}

fn position(p: &Position) -> Value {
    json!([p.x, p.y])
}

fn positions(points: &[Position]) -> Vec<Value> {
    points.iter().map(position).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeometryType;

    #[test]
    fn polygon_round_trip_preserves_ring_and_point_order() {
        let input = json!([[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]]);
        let geom = Geometry::parse(GeometryType::Polygon, &input).unwrap();

        let rendered = to_geojson(&geom);
        assert_eq!(rendered["type"], "Polygon");
        assert_eq!(rendered["coordinates"], input);
    }

    #[test]
    fn point_renders_lon_lat_pair() {
        let geom = Geometry::parse(GeometryType::Point, &json!([2.35, 48.85])).unwrap();
        assert_eq!(
            to_geojson(&geom),
            json!({"type": "Point", "coordinates": [2.35, 48.85]})
        );
    }
}
