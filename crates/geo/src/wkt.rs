//! WKT encoding of [`Geometry`] values.
//!
//! WKT is the store's spatial input format (`ST_GeomFromText($1, 4326)`).
//! Coordinates only reach the text through this encoder, always as bound
//! statement parameters, never spliced into SQL.

use std::fmt::Write as _;

use crate::geometry::{Geometry, Position};

/// Render the canonical WKT for a geometry.
pub fn to_wkt(geometry: &Geometry) -> String {
    match geometry {
        Geometry::Point(p) => format!("POINT({} {})", p.x, p.y),
        Geometry::LineString(points) => format!("LINESTRING({})", join_positions(points)),
        Geometry::Polygon(rings) => {
            let mut body = String::new();
            for (i, ring) in rings.iter().enumerate() {
                if i > 0 {
                    body.push_str(", ");
                }
                let _ = write!(body, "({})", join_positions(ring));
            }
            format!("POLYGON({body})")
        }
    }
}

fn join_positions(points: &[Position]) -> String {
    points
        .iter()
        .map(|p| format!("{} {}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Geometry, GeometryType};
    use serde_json::json;

    #[test]
    fn point_wkt() {
        let geom = Geometry::parse(GeometryType::Point, &json!([12.5, 41.9])).unwrap();
        assert_eq!(to_wkt(&geom), "POINT(12.5 41.9)");
    }

    #[test]
    fn linestring_wkt() {
        let geom =
            Geometry::parse(GeometryType::LineString, &json!([[0.0, 0.0], [1.5, 2.0], [3.0, 3.0]]))
                .unwrap();
        assert_eq!(to_wkt(&geom), "LINESTRING(0 0, 1.5 2, 3 3)");
    }

    #[test]
    fn polygon_wkt_keeps_ring_order() {
        let geom = Geometry::parse(
            GeometryType::Polygon,
            &json!([
                [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
                [[0.2, 0.2], [0.2, 0.4], [0.4, 0.4], [0.2, 0.2]]
            ]),
        )
        .unwrap();
        assert_eq!(
            to_wkt(&geom),
            "POLYGON((0 0, 0 1, 1 1, 1 0, 0 0), (0.2 0.2, 0.2 0.4, 0.4 0.4, 0.2 0.2))"
        );
    }
}
