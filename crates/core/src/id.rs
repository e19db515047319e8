//! Strongly-typed identifiers used across the domain.
//!
//! All rows are keyed by Postgres `SERIAL` columns, so identifiers wrap `i32`.
//! The database assigns values on insert; constructing one client-side is only
//! done when echoing a key the store handed back.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a user (actor identity).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

/// Identifier of a role (permission bundle).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(i32);

/// Identifier of a named permission.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionId(i32);

/// Identifier of a department.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentId(i32);

/// Identifier of a stored geometry record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeometryId(i32);

macro_rules! impl_serial_id {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn from_i32(value: i32) -> Self {
                Self(value)
            }

            pub fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i32> for $t {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i32 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = i32::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(raw))
            }
        }
    };
}

impl_serial_id!(UserId, "UserId");
impl_serial_id!(RoleId, "RoleId");
impl_serial_id!(PermissionId, "PermissionId");
impl_serial_id!(DepartmentId, "DepartmentId");
impl_serial_id!(GeometryId, "GeometryId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_from_route_segment() {
        let id: UserId = "42".parse().unwrap();
        assert_eq!(id.as_i32(), 42);
    }

    #[test]
    fn rejects_non_numeric_segment() {
        let err = "abc".parse::<GeometryId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }
}
