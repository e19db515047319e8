//! `geoportal-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: the API layer
//! extracts a token, this crate turns it into verified claims, and the pure
//! `authorize` policy decides access from an already-resolved permission set.

pub mod authorize;
pub mod claims;
pub mod password;
pub mod permissions;
pub mod token;

pub use authorize::{authorize, AccessDenied, RequiredPermission};
pub use claims::AuthClaims;
pub use password::{hash_password, verify_password, PasswordError};
pub use permissions::Permission;
pub use token::{TokenCodec, TokenError};
