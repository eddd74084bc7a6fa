//! Octobattles Engine library.
//!
//! This crate contains all server-side code for the octobattles engine.
//!
//! ## Structure
//!
//! - `use_cases/` - User story orchestration over the domain
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// E2E API tests over a real SQLite database.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
