//! Domain entities - Core business objects with identity

mod battle;
mod character;
mod language;

pub use battle::Battle;
pub use character::{Character, DEFAULT_EXPERIENCE_POINTS};
pub use language::Language;
