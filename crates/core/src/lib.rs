//! Domain building blocks for the heroes service.
//!
//! Pure logic only: no database or HTTP dependencies, so the repository
//! layer, the API server and tests can all share it.

pub mod config;
pub mod document;
pub mod error;
pub mod pagination;
pub mod search;
pub mod types;
