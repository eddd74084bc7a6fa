//! Battle entity - The persistable record of a resolved fight

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::battle::BattleOutcome;
use crate::ids::{BattleId, CharacterId};

/// A finished battle between two characters.
///
/// `character1_id` is always the challenger, `character2_id` the challenged
/// side. `victorious_character_id` is `None` for a tie. The log keeps every
/// line in strike order, including the closing victory or tie line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battle {
    pub id: BattleId,
    pub character1_id: CharacterId,
    pub character2_id: CharacterId,
    pub victorious_character_id: Option<CharacterId>,
    pub battle_log: Vec<String>,
    pub battle_timestamp: DateTime<Utc>,
}

impl Battle {
    /// Seal a resolution outcome into a record, stamped with `timestamp`.
    pub fn from_outcome(
        outcome: BattleOutcome,
        challenger_id: CharacterId,
        challenged_id: CharacterId,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: BattleId::new(),
            character1_id: challenger_id,
            character2_id: challenged_id,
            victorious_character_id: outcome.winner_id,
            battle_log: outcome.log,
            battle_timestamp: timestamp,
        }
    }
}
