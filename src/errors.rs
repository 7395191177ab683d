//! Unified error type for the storefront.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Every failure the crate can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read, parsed, or is incomplete
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// ORM or driver failure, including integrity-constraint violations
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Input rejected before it reached the database
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        message: String,
    },

    /// Lookup target does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity name (e.g. `"product"`)
        entity: &'static str,
        /// Identifier that was looked up
        id: i32,
    },

    /// Password hashing or hash parsing failed
    #[error("Password hashing error: {message}")]
    PasswordHash {
        /// Underlying error text
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Classifies a database error as a unique or foreign key violation, if it is one.
    #[must_use]
    pub fn constraint_violation(&self) -> Option<SqlErr> {
        match self {
            Self::Database(err) => err.sql_err(),
            _ => None,
        }
    }

    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(value: argon2::password_hash::Error) -> Self {
        Self::PasswordHash {
            message: value.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
