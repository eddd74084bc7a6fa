extern crate self as octobattles_domain;

pub mod battle;
pub mod catalog;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use battle::{resolve, BattleError, BattleOutcome};
pub use catalog::{LanguageSpec, TypeSpec, TypeTag};
pub use entities::{Battle, Character, Language, DEFAULT_EXPERIENCE_POINTS};
pub use error::DomainError;
pub use ids::{BattleId, CharacterId, LanguageId};
pub use value_objects::LifeGauge;
