//! Authentication for the to-do server
//!
//! This module handles signup/signin, token issuance, and the per-request
//! auth gate that resolves a bearer token to a user id.

mod gate;
mod service;

pub mod handlers;

pub use gate::AuthUser;
pub use service::AuthService;
