//! Language use cases - learning, listing, and forgetting abilities.

use std::sync::Arc;

use octobattles_domain::{catalog, CharacterId, Language};

use crate::infrastructure::ports::{CharacterRepo, LanguageRepo, RepoError};

/// Errors from language workflows.
#[derive(Debug, thiserror::Error)]
pub enum LanguageError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
    #[error("This character already knows {0}")]
    AlreadyKnown(String),
    #[error("This character does not know {0}")]
    NotKnown(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Learning and forgetting languages.
///
/// The catalog is the authority on what can be learned; stats are copied
/// from it at learn time and evolve independently afterwards.
pub struct LanguageUseCases {
    characters: Arc<dyn CharacterRepo>,
    languages: Arc<dyn LanguageRepo>,
}

impl LanguageUseCases {
    pub fn new(characters: Arc<dyn CharacterRepo>, languages: Arc<dyn LanguageRepo>) -> Self {
        Self {
            characters,
            languages,
        }
    }

    /// Teach `character_id` a catalog language. Each character can know a
    /// given language at most once; the catalog lookup is exact-match.
    pub async fn learn(
        &self,
        character_id: CharacterId,
        name: &str,
        weight: Option<i64>,
    ) -> Result<Language, LanguageError> {
        self.require_character(character_id).await?;

        let spec = catalog::language(name)
            .ok_or_else(|| LanguageError::UnknownLanguage(name.to_string()))?;

        if self
            .languages
            .find_named(character_id, spec.name)
            .await?
            .is_some()
        {
            return Err(LanguageError::AlreadyKnown(spec.name.to_string()));
        }

        let mut language = Language::learn(character_id, spec);
        if let Some(weight) = weight {
            language = language.with_weight(weight);
        }

        self.languages.save(&language).await?;
        tracing::info!(
            character_id = %character_id,
            language = %language.name,
            weight = language.weight,
            "Language learned"
        );

        Ok(language)
    }

    /// The character's languages in the order they were learned.
    pub async fn list(&self, character_id: CharacterId) -> Result<Vec<Language>, LanguageError> {
        self.require_character(character_id).await?;
        Ok(self.languages.list_for_character(character_id).await?)
    }

    /// Forget a single language by name.
    pub async fn forget(&self, character_id: CharacterId, name: &str) -> Result<(), LanguageError> {
        self.require_character(character_id).await?;

        let language = self
            .languages
            .find_named(character_id, name)
            .await?
            .ok_or_else(|| LanguageError::NotKnown(name.to_string()))?;

        self.languages.delete(language.id).await?;
        tracing::info!(character_id = %character_id, language = %name, "Language forgotten");
        Ok(())
    }

    /// Forget everything. Returns how many languages were dropped.
    pub async fn reset(&self, character_id: CharacterId) -> Result<u64, LanguageError> {
        self.require_character(character_id).await?;

        let dropped = self.languages.delete_for_character(character_id).await?;
        tracing::info!(character_id = %character_id, dropped, "Languages reset");
        Ok(dropped)
    }

    async fn require_character(&self, character_id: CharacterId) -> Result<(), LanguageError> {
        self.characters
            .get(character_id)
            .await?
            .map(|_| ())
            .ok_or(LanguageError::CharacterNotFound(character_id))
    }
}
