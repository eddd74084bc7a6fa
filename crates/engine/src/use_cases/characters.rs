//! Character use cases - creation, lookup, and lifecycle.

use std::sync::Arc;

use octobattles_domain::{Character, CharacterId, TypeTag, DEFAULT_EXPERIENCE_POINTS};

use crate::infrastructure::ports::{CharacterRepo, ClockPort, LanguageRepo, RepoError};

/// Errors from character workflows.
#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("Character not found: {0}")]
    NotFound(CharacterId),
    #[error("{0}")]
    Validation(String),
    #[error("A living character named '{0}' already exists")]
    NameTaken(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Creation, lookup, and lifecycle of characters.
///
/// Names only have to be unique among the living: once a character dies,
/// the name is free again.
pub struct CharacterUseCases {
    characters: Arc<dyn CharacterRepo>,
    languages: Arc<dyn LanguageRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CharacterUseCases {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        languages: Arc<dyn LanguageRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            characters,
            languages,
            clock,
        }
    }

    /// Create a character. Omitted experience defaults to
    /// [`DEFAULT_EXPERIENCE_POINTS`]; an omitted life gauge starts full, and
    /// a supplied one is capped at the experience score.
    pub async fn create(
        &self,
        name: &str,
        type_tag: TypeTag,
        experience_points: Option<i64>,
        life_gauge: Option<i64>,
    ) -> Result<Character, CharacterError> {
        if name.trim().is_empty() {
            return Err(CharacterError::Validation(
                "Character name cannot be empty".to_string(),
            ));
        }
        if experience_points.is_some_and(|experience| experience < 1) {
            return Err(CharacterError::Validation(
                "Experience points must be at least 1".to_string(),
            ));
        }
        if life_gauge.is_some_and(|points| points < 1) {
            return Err(CharacterError::Validation(
                "Life gauge must be at least 1".to_string(),
            ));
        }
        if self.characters.find_living_by_name(name).await?.is_some() {
            return Err(CharacterError::NameTaken(name.to_string()));
        }

        let experience = experience_points.unwrap_or(DEFAULT_EXPERIENCE_POINTS);
        let mut character = Character::new(name, type_tag)
            .with_experience_points(experience)
            .with_life_gauge(life_gauge.unwrap_or(experience));
        character.touch(self.clock.now());

        self.characters.save(&character).await?;
        tracing::info!(
            character_id = %character.id,
            name = %character.name,
            char_type = %character.type_tag,
            "Character created"
        );

        Ok(character)
    }

    pub async fn get(&self, id: CharacterId) -> Result<Character, CharacterError> {
        self.characters
            .get(id)
            .await?
            .ok_or(CharacterError::NotFound(id))
    }

    pub async fn list(&self) -> Result<Vec<Character>, CharacterError> {
        Ok(self.characters.list().await?)
    }

    /// Delete a character and every language they learned.
    pub async fn delete(&self, id: CharacterId) -> Result<(), CharacterError> {
        // The language rows reference the character, so they go first.
        self.languages.delete_for_character(id).await?;
        if !self.characters.delete(id).await? {
            return Err(CharacterError::NotFound(id));
        }
        tracing::info!(character_id = %id, "Character deleted");
        Ok(())
    }

    /// Put a character down without a battle.
    pub async fn kill(&self, id: CharacterId) -> Result<Character, CharacterError> {
        let mut character = self.get(id).await?;
        character.kill();
        character.touch(self.clock.now());
        self.characters.save(&character).await?;
        tracing::info!(character_id = %id, name = %character.name, "Character killed");
        Ok(character)
    }
}
