//! Battle use cases - the load-resolve-persist workflow and history queries.

use std::sync::Arc;

use dashmap::DashMap;
use octobattles_domain::{resolve, Battle, BattleError, Character, CharacterId};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::infrastructure::ports::{BattleRepo, CharacterRepo, ClockPort, LanguageRepo, RepoError};

/// How many battles `recent` returns when the caller does not say.
const RECENT_BATTLES_LIMIT: u32 = 20;

/// Errors from the battle workflow.
#[derive(Debug, thiserror::Error)]
pub enum BattleFlowError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error(transparent)]
    Battle(#[from] BattleError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Everything a battle changed, in one response payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleReport {
    pub battle: Battle,
    pub challenger: Character,
    pub challenged: Character,
}

/// A character's battle history, split by which side they were on.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleHistory {
    pub initiated: Vec<Battle>,
    pub received: Vec<Battle>,
}

/// Battles between two characters, split by who opened them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattlesBetween {
    pub character1_initiated: Vec<Battle>,
    pub character2_initiated: Vec<Battle>,
}

/// Runs battles and answers history queries.
///
/// A battle is load-resolve-save over two characters. Both are held under
/// per-character advisory locks for the whole workflow so overlapping
/// battles touching the same character cannot lose each other's writes.
pub struct BattleUseCases {
    characters: Arc<dyn CharacterRepo>,
    languages: Arc<dyn LanguageRepo>,
    battles: Arc<dyn BattleRepo>,
    clock: Arc<dyn ClockPort>,
    locks: DashMap<CharacterId, Arc<Mutex<()>>>,
}

impl BattleUseCases {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        languages: Arc<dyn LanguageRepo>,
        battles: Arc<dyn BattleRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            characters,
            languages,
            battles,
            clock,
            locks: DashMap::new(),
        }
    }

    /// Run a battle between two characters and persist the result.
    pub async fn execute(
        &self,
        challenger_id: CharacterId,
        challenged_id: CharacterId,
    ) -> Result<BattleReport, BattleFlowError> {
        // Rejected here as well as in resolution: locking the same id twice
        // would deadlock below.
        if challenger_id == challenged_id {
            return Err(BattleError::SelfBattle.into());
        }

        // Always lock in id order so two overlapping battles over the same
        // pair cannot deadlock.
        let (first, second) = if challenger_id.to_uuid() <= challenged_id.to_uuid() {
            (challenger_id, challenged_id)
        } else {
            (challenged_id, challenger_id)
        };
        let first_lock = self.lock_for(first);
        let second_lock = self.lock_for(second);
        let _first_guard = first_lock.lock().await;
        let _second_guard = second_lock.lock().await;

        let mut challenger = self.load_character(challenger_id).await?;
        let mut challenged = self.load_character(challenged_id).await?;
        let challenger_languages = self.languages.list_for_character(challenger_id).await?;
        let challenged_languages = self.languages.list_for_character(challenged_id).await?;

        let outcome = resolve(
            &mut challenger,
            &mut challenged,
            &challenger_languages,
            &challenged_languages,
        )?;

        let now = self.clock.now();
        challenger.touch(now);
        challenged.touch(now);

        let battle = Battle::from_outcome(outcome, challenger_id, challenged_id, now);
        self.battles
            .record(&battle, &challenger, &challenged)
            .await?;

        tracing::info!(
            battle_id = %battle.id,
            challenger = %challenger.name,
            challenged = %challenged.name,
            victor = ?battle.victorious_character_id,
            turns_logged = battle.battle_log.len(),
            "Battle resolved"
        );

        Ok(BattleReport {
            battle,
            challenger,
            challenged,
        })
    }

    /// The most recent battles, newest first.
    pub async fn recent(&self, limit: Option<u32>) -> Result<Vec<Battle>, BattleFlowError> {
        Ok(self
            .battles
            .list_recent(limit.unwrap_or(RECENT_BATTLES_LIMIT))
            .await?)
    }

    /// Everything a character fought, split by side.
    pub async fn for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<BattleHistory, BattleFlowError> {
        self.load_character(character_id).await?;

        Ok(BattleHistory {
            initiated: self.battles.list_initiated_by(character_id).await?,
            received: self.battles.list_received_by(character_id).await?,
        })
    }

    /// The head-to-head record of two characters.
    pub async fn between(
        &self,
        character1_id: CharacterId,
        character2_id: CharacterId,
    ) -> Result<BattlesBetween, BattleFlowError> {
        self.load_character(character1_id).await?;
        self.load_character(character2_id).await?;

        Ok(BattlesBetween {
            character1_initiated: self
                .battles
                .list_between(character1_id, character2_id)
                .await?,
            character2_initiated: self
                .battles
                .list_between(character2_id, character1_id)
                .await?,
        })
    }

    fn lock_for(&self, id: CharacterId) -> Arc<Mutex<()>> {
        self.locks.entry(id).or_default().clone()
    }

    async fn load_character(&self, id: CharacterId) -> Result<Character, BattleFlowError> {
        self.characters
            .get(id)
            .await?
            .ok_or(BattleFlowError::CharacterNotFound(id))
    }
}
