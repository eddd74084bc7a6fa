// Port traits define the full contract - many methods are for future use
#![allow(dead_code)]

//! Repository port traits for database access.

use async_trait::async_trait;
use octobattles_domain::*;

use super::error::RepoError;

// =============================================================================
// Database Ports (one per entity type)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    // CRUD
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    async fn save(&self, character: &Character) -> Result<(), RepoError>;
    async fn delete(&self, id: CharacterId) -> Result<bool, RepoError>;

    // Queries
    async fn list(&self) -> Result<Vec<Character>, RepoError>;
    async fn find_living_by_name(&self, name: &str) -> Result<Option<Character>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageRepo: Send + Sync {
    async fn save(&self, language: &Language) -> Result<(), RepoError>;
    async fn delete(&self, id: LanguageId) -> Result<bool, RepoError>;
    async fn delete_for_character(&self, character_id: CharacterId) -> Result<u64, RepoError>;

    /// Languages in the order they were learned; battles walk this sequence.
    async fn list_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<Language>, RepoError>;
    async fn find_named(
        &self,
        character_id: CharacterId,
        name: &str,
    ) -> Result<Option<Language>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BattleRepo: Send + Sync {
    /// Persist a finished battle together with both combatants' post-battle
    /// state in a single transaction.
    async fn record(
        &self,
        battle: &Battle,
        challenger: &Character,
        challenged: &Character,
    ) -> Result<(), RepoError>;

    async fn get(&self, id: BattleId) -> Result<Option<Battle>, RepoError>;
    async fn list_recent(&self, limit: u32) -> Result<Vec<Battle>, RepoError>;
    async fn list_initiated_by(&self, character_id: CharacterId) -> Result<Vec<Battle>, RepoError>;
    async fn list_received_by(&self, character_id: CharacterId) -> Result<Vec<Battle>, RepoError>;

    /// Battles where `character1_id` challenged `character2_id` - directional.
    async fn list_between(
        &self,
        character1_id: CharacterId,
        character2_id: CharacterId,
    ) -> Result<Vec<Battle>, RepoError>;
}
