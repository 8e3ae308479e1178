//! Database module for the to-do server
//!
//! This module holds the connection pool handle, the persisted row types,
//! and the data access layer operations.

pub mod models;
pub mod operations;

pub use models::{AuthToken, Todo, User};
pub use operations::DbOperations;
