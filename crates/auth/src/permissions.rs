use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings; the CRUD surface uses the four
/// atomic capabilities below, but the policy layer never hardcodes that list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

/// View/list resources.
pub const READ: Permission = Permission(Cow::Borrowed("read"));
/// Create new resources.
pub const CREATE: Permission = Permission(Cow::Borrowed("create"));
/// Modify existing resources.
pub const UPDATE: Permission = Permission(Cow::Borrowed("update"));
/// Remove resources.
pub const DELETE: Permission = Permission(Cow::Borrowed("delete"));

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
