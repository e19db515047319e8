//! Pure access policy over a resolved permission set.
//!
//! The permission set is resolved elsewhere (a single joined read through the
//! user's role); this module only evaluates the predicate. Role names never
//! appear here: permission, not role, is the authorization unit.

use std::collections::HashSet;

use thiserror::Error;

use crate::permissions::Permission;

/// Permission predicate attached to a guarded operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequiredPermission {
    /// Caller must hold exactly this permission.
    Has(Permission),
    /// Caller must hold at least one of these permissions.
    AnyOf(Vec<Permission>),
}

impl RequiredPermission {
    /// The permissions a denied caller was missing, for the error message.
    fn missing(&self) -> Vec<String> {
        match self {
            RequiredPermission::Has(p) => vec![p.as_str().to_string()],
            RequiredPermission::AnyOf(ps) => ps.iter().map(|p| p.as_str().to_string()).collect(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("access denied: missing permission(s): {}", missing.join(", "))]
pub struct AccessDenied {
    pub missing: Vec<String>,
}

/// Evaluate a permission predicate against a resolved permission set.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(granted: &HashSet<String>, required: &RequiredPermission) -> Result<(), AccessDenied> {
    let allowed = match required {
        RequiredPermission::Has(p) => granted.contains(p.as_str()),
        RequiredPermission::AnyOf(ps) => ps.iter().any(|p| granted.contains(p.as_str())),
    };

    if allowed {
        Ok(())
    } else {
        Err(AccessDenied {
            missing: required.missing(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions;

    fn granted(perms: &[&str]) -> HashSet<String> {
        perms.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn has_permission_grants() {
        let set = granted(&["read", "update"]);
        assert!(authorize(&set, &RequiredPermission::Has(permissions::READ)).is_ok());
    }

    #[test]
    fn missing_permission_denies_and_names_it() {
        let set = granted(&["read"]);
        let err = authorize(&set, &RequiredPermission::Has(permissions::DELETE)).unwrap_err();
        assert_eq!(err.missing, vec!["delete".to_string()]);
    }

    #[test]
    fn any_of_grants_on_single_match() {
        let set = granted(&["update"]);
        let required = RequiredPermission::AnyOf(vec![permissions::CREATE, permissions::UPDATE]);
        assert!(authorize(&set, &required).is_ok());
    }

    #[test]
    fn any_of_denies_when_none_match() {
        let set = granted(&["read"]);
        let required = RequiredPermission::AnyOf(vec![permissions::CREATE, permissions::DELETE]);
        let err = authorize(&set, &required).unwrap_err();
        assert_eq!(err.missing, vec!["create".to_string(), "delete".to_string()]);
    }

    #[test]
    fn empty_permission_set_denies_everything() {
        let set = HashSet::new();
        assert!(authorize(&set, &RequiredPermission::Has(permissions::READ)).is_err());
    }

    #[test]
    fn role_names_are_not_permissions() {
        // A caller whose set contains a role name is still denied: only
        // resolved permission names count.
        let set = granted(&["admin"]);
        assert!(authorize(&set, &RequiredPermission::Has(permissions::DELETE)).is_err());
    }
}
