// Port traits define the full contract - many methods are for future use
#![allow(dead_code)]

//! Error types for port operations.

/// What a repository can report back. Adapters translate their driver's
/// failures into these; nothing above the ports sees a sqlx type.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// A row the operation relied on does not exist (any more).
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The database refused or failed the operation. `operation` names the
    /// repo method, so log lines stay greppable.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// A stored value would not parse back into its domain type.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A database constraint fired, e.g. a duplicate learned language.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl RepoError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    pub fn constraint(message: impl ToString) -> Self {
        Self::ConstraintViolation(message.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
