//! Built-in catalogs of character types and battle languages.
//!
//! Both catalogs are static data compiled into the binary. Characters and
//! learned languages reference them by name; battles read ability speed from
//! the language catalog rather than from persisted rows.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Combat archetype shared by characters and languages.
///
/// A language deals full damage only when its wielder has the same type;
/// any mismatch halves the blow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Geek,
    Assassin,
    Functional,
    Cleaner,
    Charmer,
}

impl TypeTag {
    /// All five types, in catalog id order.
    pub const ALL: [TypeTag; 5] = [
        TypeTag::Geek,
        TypeTag::Assassin,
        TypeTag::Functional,
        TypeTag::Cleaner,
        TypeTag::Charmer,
    ];

    /// Canonical lowercase name, as served over the API.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Geek => "geek",
            TypeTag::Assassin => "assassin",
            TypeTag::Functional => "functional",
            TypeTag::Cleaner => "cleaner",
            TypeTag::Charmer => "charmer",
        }
    }

    /// Full catalog entry for this type.
    pub fn spec(self) -> &'static TypeSpec {
        &TYPES[self as usize]
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TypeTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "geek" => Ok(TypeTag::Geek),
            "assassin" => Ok(TypeTag::Assassin),
            "functional" => Ok(TypeTag::Functional),
            "cleaner" => Ok(TypeTag::Cleaner),
            "charmer" => Ok(TypeTag::Charmer),
            _ => Err(DomainError::parse(format!("Invalid character type: {}", s))),
        }
    }
}

/// Catalog entry describing a character type.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TypeSpec {
    pub name: &'static str,
    pub id: u8,
    pub description: &'static str,
}

/// Catalog entry describing a learnable language.
///
/// `base_power_level` seeds the power level of a freshly learned language;
/// `speed` decides who strikes first in battle and is never copied onto
/// character rows.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSpec {
    pub name: &'static str,
    pub base_power_level: i64,
    pub speed: i64,
    #[serde(rename = "type")]
    pub type_tag: TypeTag,
    pub description: &'static str,
}

/// Character type catalog, indexed by `TypeTag` discriminant.
pub const TYPES: [TypeSpec; 5] = [
    TypeSpec {
        name: "geek",
        id: 1,
        description: "The geek type uses every necessary tool to accomplish the job. It is this way a neutral player that knows a little of everything.",
    },
    TypeSpec {
        name: "assassin",
        id: 2,
        description: "An assassin provides deep knowlege of the internals, beating to death every other type in terms of speed.",
    },
    TypeSpec {
        name: "functional",
        id: 3,
        description: "The functional knows calculus, and uses its power to overwhelm enemies with awesome single liners!",
    },
    TypeSpec {
        name: "cleaner",
        id: 4,
        description: "Cleaners do the minimal exequible job, without traces. It just works!",
    },
    TypeSpec {
        name: "charmer",
        id: 5,
        description: "Charmers always use the newest tools to Wow its adversaries.",
    },
];

/// Language catalog, strongest base power first.
pub const LANGUAGES: [LanguageSpec; 6] = [
    LanguageSpec {
        name: "javascript",
        base_power_level: 20,
        speed: 15,
        type_tag: TypeTag::Charmer,
        description: "Javascript is executed on the client side, Javascript is a relatively easy language, Extended functionality to web pages",
    },
    LanguageSpec {
        name: "java",
        base_power_level: 19,
        speed: 19,
        type_tag: TypeTag::Cleaner,
        description: "Java (the platform) has a very large and standard class library, some parts of which are very well written, Good portability (certainly better than that of nearly any compiled alternative), Lots of available code and third-party libraries",
    },
    LanguageSpec {
        name: "php",
        base_power_level: 18,
        speed: 18,
        type_tag: TypeTag::Geek,
        description: "It's a quick and easy server side scripting language for web development and general use. Large community, widely used. Most problems faced by a web developer have pre existing solutions. It works well with databases, file systems, images, et cetera.",
    },
    LanguageSpec {
        name: "python",
        base_power_level: 17,
        speed: 16,
        type_tag: TypeTag::Functional,
        description: "The main characteristics of a Python program is that it is easy to read,  It helps you think more clearly when writing programs, it requires less effort to write a Python program than to write one in another language like C++ or Java.",
    },
    LanguageSpec {
        name: "ruby",
        base_power_level: 16,
        speed: 17,
        type_tag: TypeTag::Charmer,
        description: "Solid. Reliable. Middle of the road.",
    },
    LanguageSpec {
        name: "c#",
        base_power_level: 15,
        speed: 20,
        type_tag: TypeTag::Assassin,
        description: "Learning C# will help you later on if you decide to learn harder programming languages (e.g. C or C++).  The programming style of C# is very similar to other C languages.",
    },
];

/// Look up a language by its exact catalog name.
///
/// Catalog names are lowercase; `"Java"` does not match.
pub fn language(name: &str) -> Option<&'static LanguageSpec> {
    LANGUAGES.iter().find(|spec| spec.name == name)
}

/// Look up a type by name (case-insensitive).
pub fn type_entry(name: &str) -> Option<&'static TypeSpec> {
    name.parse::<TypeTag>().ok().map(TypeTag::spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lists_six_languages() {
        assert_eq!(LANGUAGES.len(), 6);
        let names: Vec<&str> = LANGUAGES.iter().map(|spec| spec.name).collect();
        assert_eq!(
            names,
            vec!["javascript", "java", "php", "python", "ruby", "c#"]
        );
    }

    #[test]
    fn test_language_lookup_is_exact() {
        let csharp = language("c#").unwrap();
        assert_eq!(csharp.base_power_level, 15);
        assert_eq!(csharp.speed, 20);
        assert_eq!(csharp.type_tag, TypeTag::Assassin);

        assert!(language("C#").is_none());
        assert!(language("cobol").is_none());
    }

    #[test]
    fn test_type_ids_match_catalog_order() {
        assert_eq!(TypeTag::ALL.len(), 5);
        for (index, tag) in TypeTag::ALL.iter().enumerate() {
            let spec = tag.spec();
            assert_eq!(spec.id as usize, index + 1);
            assert_eq!(spec.name, tag.as_str());
        }
    }

    #[test]
    fn test_type_round_trips_through_str() {
        for tag in TypeTag::ALL {
            assert_eq!(tag.as_str().parse::<TypeTag>().unwrap(), tag);
        }
        assert_eq!("Geek".parse::<TypeTag>().unwrap(), TypeTag::Geek);
        assert!("wizard".parse::<TypeTag>().is_err());
    }

    #[test]
    fn test_type_entry_is_case_insensitive() {
        let geek = type_entry("GEEK").unwrap();
        assert_eq!(geek.id, 1);
        assert!(type_entry("bard").is_none());
    }

    #[test]
    fn test_language_serializes_with_type_field() {
        let value = serde_json::to_value(language("php").unwrap()).unwrap();
        assert_eq!(value["name"], "php");
        assert_eq!(value["basePowerLevel"], 18);
        assert_eq!(value["speed"], 18);
        assert_eq!(value["type"], "geek");
    }

    #[test]
    fn test_fastest_language_is_weakest() {
        let fastest = LANGUAGES.iter().max_by_key(|spec| spec.speed).unwrap();
        let strongest = LANGUAGES
            .iter()
            .max_by_key(|spec| spec.base_power_level)
            .unwrap();
        assert_eq!(fastest.name, "c#");
        assert_eq!(strongest.name, "javascript");
    }
}
