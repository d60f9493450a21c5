//! Core types for findex
//!
//! This crate contains the domain types shared by the storage gateway and
//! the CLI: the column-type-to-DDL mapping, the dynamic field value used
//! for projected rows, and the birthdate-to-age derivation.

mod age;
mod column;
mod user;
mod value;

pub use age::*;
pub use column::*;
pub use user::*;
pub use value::*;
