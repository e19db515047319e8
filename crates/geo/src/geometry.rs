//! Geometry value types and coordinate parsing.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The three geometry shapes the system stores.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
}

impl GeometryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
        }
    }
}

impl core::fmt::Display for GeometryType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryType {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Point" => Ok(GeometryType::Point),
            "LineString" => Ok(GeometryType::LineString),
            "Polygon" => Ok(GeometryType::Polygon),
            other => Err(GeometryError::UnknownType(other.to_string())),
        }
    }
}

/// A single coordinate pair, `[longitude, latitude]` on the wire.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("unknown geometry type: {0}")]
    UnknownType(String),

    #[error("malformed geometry: {0}")]
    Malformed(String),
}

impl GeometryError {
    fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

/// A parsed geometry whose variant is guaranteed to match its declared type.
///
/// Construction goes through [`Geometry::parse`], so a `Point` can never carry
/// a ring set and persisted rows keep `geometry_type` consistent with the
/// stored shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Position),
    LineString(Vec<Position>),
    Polygon(Vec<Vec<Position>>),
}

impl Geometry {
    /// Parse structured coordinate input for the declared geometry type.
    ///
    /// Arity rules:
    /// - `Point`: one `[x, y]` pair
    /// - `LineString`: ordered sequence of at least 2 pairs
    /// - `Polygon`: at least one linear ring (exterior first); each ring has
    ///   at least 4 pairs and is closed (first == last), which is what the
    ///   store's geometry constructor requires
    pub fn parse(geometry_type: GeometryType, coordinates: &Value) -> Result<Self, GeometryError> {
        match geometry_type {
            GeometryType::Point => Ok(Geometry::Point(parse_position(coordinates)?)),
            GeometryType::LineString => {
                let points = parse_positions(coordinates)?;
                if points.len() < 2 {
                    return Err(GeometryError::malformed(
                        "a LineString needs at least 2 coordinate pairs",
                    ));
                }
                Ok(Geometry::LineString(points))
            }
            GeometryType::Polygon => {
                let rings = coordinates
                    .as_array()
                    .ok_or_else(|| GeometryError::malformed("Polygon coordinates must be an array of rings"))?;
                if rings.is_empty() {
                    return Err(GeometryError::malformed("a Polygon needs at least one ring"));
                }

                let mut parsed = Vec::with_capacity(rings.len());
                for ring in rings {
                    let points = parse_positions(ring)?;
                    if points.len() < 4 {
                        return Err(GeometryError::malformed(
                            "a Polygon ring needs at least 4 coordinate pairs",
                        ));
                    }
                    if points.first() != points.last() {
                        return Err(GeometryError::malformed(
                            "a Polygon ring must be closed (first pair == last pair)",
                        ));
                    }
                    parsed.push(points);
                }
                Ok(Geometry::Polygon(parsed))
            }
        }
    }

    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
        }
    }
}

fn parse_position(value: &Value) -> Result<Position, GeometryError> {
    let pair = value
        .as_array()
        .ok_or_else(|| GeometryError::malformed("a coordinate must be an [x, y] array"))?;
    if pair.len() != 2 {
        return Err(GeometryError::malformed("a coordinate must have exactly 2 components"));
    }

    let x = pair[0]
        .as_f64()
        .ok_or_else(|| GeometryError::malformed("coordinate components must be numbers"))?;
    let y = pair[1]
        .as_f64()
        .ok_or_else(|| GeometryError::malformed("coordinate components must be numbers"))?;

    Ok(Position { x, y })
}

fn parse_positions(value: &Value) -> Result<Vec<Position>, GeometryError> {
    let items = value
        .as_array()
        .ok_or_else(|| GeometryError::malformed("coordinates must be an array of [x, y] pairs"))?;
    items.iter().map(parse_position).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_point() {
        let geom = Geometry::parse(GeometryType::Point, &json!([12.5, 41.9])).unwrap();
        assert_eq!(geom, Geometry::Point(Position { x: 12.5, y: 41.9 }));
        assert_eq!(geom.geometry_type(), GeometryType::Point);
    }

    #[test]
    fn point_rejects_wrong_arity() {
        let err = Geometry::parse(GeometryType::Point, &json!([12.5])).unwrap_err();
        assert!(matches!(err, GeometryError::Malformed(_)));
    }

    #[test]
    fn point_rejects_ring_shaped_input() {
        // Declared type must match the shape of the coordinates.
        let rings = json!([[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]]]);
        assert!(Geometry::parse(GeometryType::Point, &rings).is_err());
    }

    #[test]
    fn linestring_needs_two_points() {
        let err = Geometry::parse(GeometryType::LineString, &json!([[0.0, 0.0]])).unwrap_err();
        assert!(matches!(err, GeometryError::Malformed(_)));

        let ok = Geometry::parse(GeometryType::LineString, &json!([[0.0, 0.0], [1.0, 1.0]]));
        assert!(ok.is_ok());
    }

    #[test]
    fn polygon_ring_must_be_closed() {
        let open = json!([[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]]);
        assert!(Geometry::parse(GeometryType::Polygon, &open).is_err());

        let closed = json!([[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]]);
        assert!(Geometry::parse(GeometryType::Polygon, &closed).is_ok());
    }

    #[test]
    fn polygon_ring_needs_four_points() {
        let tiny = json!([[[0.0, 0.0], [0.0, 1.0], [0.0, 0.0]]]);
        assert!(Geometry::parse(GeometryType::Polygon, &tiny).is_err());
    }

    #[test]
    fn polygon_needs_a_ring() {
        assert!(Geometry::parse(GeometryType::Polygon, &serde_json::json!([])).is_err());
    }

    #[test]
    fn non_numeric_components_are_rejected() {
        assert!(Geometry::parse(GeometryType::Point, &json!(["a", "b"])).is_err());
    }

    #[test]
    fn unknown_type_string_is_rejected() {
        assert!(matches!(
            "Circle".parse::<GeometryType>(),
            Err(GeometryError::UnknownType(_))
        ));
    }
}
