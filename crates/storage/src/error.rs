//! Typed error enum for the storage gateway.
//!
//! Five classes, one per failure surface: construction path/name checks,
//! DDL, writes, reads. Callers match on the variant; nothing is retried
//! and every failure terminates the invoked command.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage-gateway error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database directory does not exist. Fatal at construction.
    #[error("database directory does not exist: {}", .path.display())]
    InvalidPath { path: PathBuf },

    /// Database file name has an unaccepted extension. Fatal at construction.
    #[error("database file name {name:?} must end in .db or .sqlite3")]
    InvalidFilename { name: String },

    /// DDL failure, including malformed identifiers in schema operations.
    #[error("schema error: {context}")]
    Schema {
        context: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    /// Insert failure other than an ignored uniqueness conflict.
    #[error("write error: {context}")]
    Write {
        context: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    /// Read failure, including invalid column/table references and
    /// unparseable stored birthdates.
    #[error("query error: {context}")]
    Query {
        context: String,
        #[source]
        source: Option<rusqlite::Error>,
    },
}

impl StoreError {
    pub(crate) fn schema(context: impl Into<String>, source: Option<rusqlite::Error>) -> Self {
        Self::Schema { context: context.into(), source }
    }

    pub(crate) fn write(context: impl Into<String>, source: Option<rusqlite::Error>) -> Self {
        Self::Write { context: context.into(), source }
    }

    pub(crate) fn query(context: impl Into<String>, source: Option<rusqlite::Error>) -> Self {
        Self::Query { context: context.into(), source }
    }
}
