use geoportal_core::UserId;

/// Authenticated identity for a request.
///
/// Produced once by the auth middleware from verified token claims and passed
/// through request extensions; handlers never re-derive identity from raw
/// headers. The role name is informational; authorization always goes
/// through the permission resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    user_id: UserId,
    role: Option<String>,
}

impl CurrentUser {
    pub fn new(user_id: UserId, role: Option<String>) -> Self {
        Self { user_id, role }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }
}
