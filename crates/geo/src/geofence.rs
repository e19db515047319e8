//! Geofence decision policy.
//!
//! The geometric containment predicate itself lives in the store (PostGIS
//! `ST_Contains`); this module owns the decision policy on top of it:
//! no active boundaries means no enforcement, and containment in any single
//! active boundary is sufficient.

use async_trait::async_trait;
use thiserror::Error;

use crate::geometry::Geometry;

/// Store-side view of the configured boundaries.
///
/// Implementations delegate the containment test to the spatial store; the
/// validator stays shape-agnostic.
#[async_trait]
pub trait BoundaryProbe: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of currently active boundaries.
    async fn active_boundary_count(&self) -> Result<i64, Self::Error>;

    /// Whether the candidate is spatially contained in at least one active boundary.
    async fn contained_in_any_active(&self, candidate: &Geometry) -> Result<bool, Self::Error>;
}

#[derive(Debug, Error)]
pub enum GeofenceError<E> {
    #[error("geometry is outside the allowed geofence boundaries")]
    OutsideGeofence,

    #[error(transparent)]
    Probe(E),
}

/// Validates candidate geometries against the active boundary set.
#[derive(Debug, Clone)]
pub struct GeofenceValidator<P> {
    probe: P,
}

impl<P: BoundaryProbe> GeofenceValidator<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    /// Accept the candidate unless active boundaries exist and none contains it.
    pub async fn validate(&self, candidate: &Geometry) -> Result<(), GeofenceError<P::Error>> {
        if self
            .probe
            .contained_in_any_active(candidate)
            .await
            .map_err(GeofenceError::Probe)?
        {
            return Ok(());
        }

        // Not contained anywhere: only a violation if enforcement is configured.
        let active = self
            .probe
            .active_boundary_count()
            .await
            .map_err(GeofenceError::Probe)?;
        if active == 0 {
            Ok(())
        } else {
            Err(GeofenceError::OutsideGeofence)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{GeometryType, Position};
    use serde_json::json;
    use std::convert::Infallible;

    struct StubProbe {
        active: i64,
        contained: bool,
    }

    #[async_trait]
    impl BoundaryProbe for StubProbe {
        type Error = Infallible;

        async fn active_boundary_count(&self) -> Result<i64, Self::Error> {
            Ok(self.active)
        }

        async fn contained_in_any_active(&self, _candidate: &Geometry) -> Result<bool, Self::Error> {
            Ok(self.contained)
        }
    }

    fn point() -> Geometry {
        Geometry::Point(Position { x: 0.5, y: 0.5 })
    }

    #[tokio::test]
    async fn passes_when_no_boundaries_are_configured() {
        let validator = GeofenceValidator::new(StubProbe { active: 0, contained: false });
        assert!(validator.validate(&point()).await.is_ok());
    }

    #[tokio::test]
    async fn passes_when_contained_in_an_active_boundary() {
        let validator = GeofenceValidator::new(StubProbe { active: 2, contained: true });
        assert!(validator.validate(&point()).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_when_outside_all_active_boundaries() {
        let validator = GeofenceValidator::new(StubProbe { active: 1, contained: false });
        let err = validator.validate(&point()).await.unwrap_err();
        assert!(matches!(err, GeofenceError::OutsideGeofence));
    }

    #[tokio::test]
    async fn policy_is_shape_agnostic() {
        let validator = GeofenceValidator::new(StubProbe { active: 1, contained: true });
        let line = Geometry::parse(GeometryType::LineString, &json!([[0.0, 0.0], [1.0, 1.0]])).unwrap();
        assert!(validator.validate(&line).await.is_ok());
    }
}
