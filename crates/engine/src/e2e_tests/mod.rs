//! Backend E2E integration tests.
//!
//! These tests drive the HTTP router with `tower::ServiceExt::oneshot`
//! against a fully wired App backed by a real SQLite database in a temp
//! directory. No network, no mocks: every request exercises routing,
//! extraction, the use cases, the battle engine, and persistence.

mod helpers;

pub use helpers::*;
