//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across entity modules to fulfill user stories.

pub mod battles;
pub mod characters;
pub mod languages;

// Re-export main types
pub use battles::BattleUseCases;
pub use characters::CharacterUseCases;
pub use languages::LanguageUseCases;
