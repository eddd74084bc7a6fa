use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Battle participant IDs
define_id!(CharacterId);
define_id!(LanguageId);

// Battle record IDs
define_id!(BattleId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(CharacterId::new(), CharacterId::new());
    }

    #[test]
    fn round_trips_through_uuid() {
        let id = LanguageId::new();
        assert_eq!(LanguageId::from_uuid(id.to_uuid()), id);
    }

    #[test]
    fn displays_as_plain_uuid() {
        let uuid = Uuid::new_v4();
        let id = BattleId::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }
}
