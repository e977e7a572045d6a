//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row and the `Deserialize` DTO used for writes.

pub mod hero;
