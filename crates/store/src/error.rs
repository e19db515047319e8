//! Store error model and sqlx error mapping.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error produced by the persistence layer.
///
/// `NotFound` and `Duplicate` are the two outcomes handlers branch on; every
/// other database failure surfaces as `Database` and gets reported as a
/// server error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn duplicate(what: impl Into<String>) -> Self {
        Self::Duplicate(what.into())
    }

    /// Map a sqlx error, translating Postgres unique violations (23505) into
    /// `Duplicate` so the race between existence check and insert still
    /// reports cleanly when the constraint fires.
    pub fn on_insert(what: &str, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.code().as_deref() == Some("23505") {
                return Self::duplicate(what);
            }
        }
        Self::Database(err)
    }
}
