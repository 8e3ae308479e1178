//! Per-user to-do resources.
//!
//! Every query is scoped by the user id the auth gate attached to the
//! request; ids supplied by the client body are never trusted for
//! ownership.

pub mod handlers;
