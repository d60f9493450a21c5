//! Storage gateway for findex
//!
//! One rusqlite connection to an embedded database file, exposed through
//! synchronous schema and data operations. There is no pooling and no
//! caching: every read goes back to SQLite and recomputes derived fields.

mod database;
mod error;

pub use database::Database;
pub use error::{Result, StoreError};
