//! Store error types.

use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{entity} named '{name}' already exists")]
    DuplicateName { entity: &'static str, name: String },

    #[error("referenced {entity} does not exist: {id}")]
    MissingReference { entity: &'static str, id: Uuid },

    /// Constraint violation reported by the database that could not be
    /// attributed to a specific field.
    #[error("integrity violation: {0}")]
    Integrity(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

fn summarize(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl StoreError {
    /// Duplicate names and dangling references.
    pub fn is_integrity(&self) -> bool {
        matches!(
            self,
            StoreError::DuplicateName { .. }
                | StoreError::MissingReference { .. }
                | StoreError::Integrity(_)
        )
    }

    /// Translate an error raised while inserting or updating a named row.
    pub(crate) fn from_write(err: DbErr, entity: &'static str, name: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::DuplicateName {
                entity,
                name: name.to_string(),
            },
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => StoreError::Integrity(detail),
            _ => StoreError::Database(err),
        }
    }
}
