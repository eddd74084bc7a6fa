//! Language entity - A learned ability owned by one character

use serde::{Deserialize, Serialize};

use crate::catalog::{LanguageSpec, TypeTag};
use crate::ids::{CharacterId, LanguageId};

/// A language a character has learned.
///
/// Learning copies the catalog's base power and type onto the row; the
/// catalog keeps `speed`, which battles always read fresh. `weight` is a
/// per-character bonus added on top of the damage formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: LanguageId,
    pub character_id: CharacterId,
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: TypeTag,
    pub power_level: i64,
    pub weight: i64,
}

impl Language {
    /// Copy a catalog entry onto a character.
    pub fn learn(character_id: CharacterId, spec: &LanguageSpec) -> Self {
        Self {
            id: LanguageId::new(),
            character_id,
            name: spec.name.to_string(),
            type_tag: spec.type_tag,
            power_level: spec.base_power_level,
            weight: 0,
        }
    }

    pub fn with_weight(mut self, weight: i64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_power_level(mut self, power_level: i64) -> Self {
        self.power_level = power_level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn learning_copies_catalog_stats() {
        let owner = CharacterId::new();
        let php = Language::learn(owner, catalog::language("php").unwrap());

        assert_eq!(php.character_id, owner);
        assert_eq!(php.name, "php");
        assert_eq!(php.type_tag, TypeTag::Geek);
        assert_eq!(php.power_level, 18);
        assert_eq!(php.weight, 0);
    }

    #[test]
    fn weight_and_power_can_be_tuned_after_learning() {
        let owner = CharacterId::new();
        let ruby = Language::learn(owner, catalog::language("ruby").unwrap())
            .with_weight(3)
            .with_power_level(9);

        assert_eq!(ruby.weight, 3);
        assert_eq!(ruby.power_level, 9);
    }
}
