//! SQLite-backed language storage.

use async_trait::async_trait;
use octobattles_domain::{CharacterId, Language, LanguageId, TypeTag};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::infrastructure::ports::{LanguageRepo, RepoError};

/// SQLite implementation for learned-language storage.
pub struct SqliteLanguageRepo {
    pool: SqlitePool,
}

impl SqliteLanguageRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn language_from_row(row: &SqliteRow) -> Result<Language, RepoError> {
    let id: String = row.get("id");
    let character_id: String = row.get("character_id");
    let lang_type: String = row.get("lang_type");

    let id = Uuid::parse_str(&id).map_err(|e| RepoError::serialization(e))?;
    let character_id = Uuid::parse_str(&character_id).map_err(|e| RepoError::serialization(e))?;
    let type_tag: TypeTag = lang_type
        .parse()
        .map_err(|e| RepoError::serialization(e))?;

    Ok(Language {
        id: LanguageId::from_uuid(id),
        character_id: CharacterId::from_uuid(character_id),
        name: row.get("name"),
        type_tag,
        power_level: row.get("power_level"),
        weight: row.get("weight"),
    })
}

#[async_trait]
impl LanguageRepo for SqliteLanguageRepo {
    async fn save(&self, language: &Language) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO languages (id, character_id, name, lang_type, power_level, weight)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                lang_type = excluded.lang_type,
                power_level = excluded.power_level,
                weight = excluded.weight
            "#,
        )
        .bind(language.id.to_string())
        .bind(language.character_id.to_string())
        .bind(&language.name)
        .bind(language.type_tag.as_str())
        .bind(language.power_level)
        .bind(language.weight)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            // UNIQUE(character_id, name): the same language learned twice.
            sqlx::Error::Database(db) if db.is_unique_violation() => RepoError::constraint(
                format!("{} is already learned by this character", language.name),
            ),
            _ => RepoError::database("languages.save", e),
        })?;

        Ok(())
    }

    async fn delete(&self, id: LanguageId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM languages WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("languages.delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_for_character(&self, character_id: CharacterId) -> Result<u64, RepoError> {
        let result = sqlx::query("DELETE FROM languages WHERE character_id = ?")
            .bind(character_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("languages.delete_for_character", e))?;

        Ok(result.rows_affected())
    }

    async fn list_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<Language>, RepoError> {
        // rowid order is insertion order, which battle resolution treats as
        // the order the languages were learned.
        let rows = sqlx::query("SELECT * FROM languages WHERE character_id = ? ORDER BY rowid")
            .bind(character_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("languages.list_for_character", e))?;

        rows.iter().map(language_from_row).collect()
    }

    async fn find_named(
        &self,
        character_id: CharacterId,
        name: &str,
    ) -> Result<Option<Language>, RepoError> {
        let row = sqlx::query("SELECT * FROM languages WHERE character_id = ? AND name = ?")
            .bind(character_id.to_string())
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("languages.find_named", e))?;

        row.as_ref().map(language_from_row).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::CharacterRepo;
    use crate::infrastructure::sqlite::test_support::temp_pool;
    use crate::infrastructure::sqlite::SqliteCharacterRepo;
    use octobattles_domain::{catalog, Character, TypeTag};

    /// The languages table references characters, so owners get a row first.
    async fn owner(pool: &SqlitePool, name: &str, type_tag: TypeTag) -> Character {
        let character = Character::new(name, type_tag);
        SqliteCharacterRepo::new(pool.clone())
            .save(&character)
            .await
            .expect("save owner");
        character
    }

    fn learned(character: &Character, name: &str) -> Language {
        Language::learn(character.id, catalog::language(name).unwrap())
    }

    #[tokio::test]
    async fn languages_list_in_learn_order() {
        let (pool, _dir) = temp_pool().await;
        let octo = owner(&pool, "octo", TypeTag::Geek).await;
        let repo = SqliteLanguageRepo::new(pool);

        for name in ["ruby", "c#", "php"] {
            repo.save(&learned(&octo, name)).await.expect("save");
        }

        let names: Vec<String> = repo
            .list_for_character(octo.id)
            .await
            .expect("list")
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, ["ruby", "c#", "php"]);
    }

    #[tokio::test]
    async fn saved_languages_round_trip() {
        let (pool, _dir) = temp_pool().await;
        let octo = owner(&pool, "octo", TypeTag::Assassin).await;
        let repo = SqliteLanguageRepo::new(pool);

        let sharpened = learned(&octo, "c#").with_weight(5).with_power_level(21);
        repo.save(&sharpened).await.expect("save");

        let found = repo
            .find_named(octo.id, "c#")
            .await
            .expect("find")
            .expect("present");
        assert_eq!(found, sharpened);
    }

    #[tokio::test]
    async fn name_lookup_is_exact() {
        let (pool, _dir) = temp_pool().await;
        let octo = owner(&pool, "octo", TypeTag::Cleaner).await;
        let repo = SqliteLanguageRepo::new(pool);

        repo.save(&learned(&octo, "java")).await.expect("save");

        assert!(repo
            .find_named(octo.id, "Java")
            .await
            .expect("find")
            .is_none());
        assert!(repo
            .find_named(CharacterId::new(), "java")
            .await
            .expect("find")
            .is_none());
    }

    #[tokio::test]
    async fn forgetting_deletes_a_single_language() {
        let (pool, _dir) = temp_pool().await;
        let octo = owner(&pool, "octo", TypeTag::Functional).await;
        let repo = SqliteLanguageRepo::new(pool);

        let python = learned(&octo, "python");
        repo.save(&python).await.expect("save python");
        repo.save(&learned(&octo, "ruby")).await.expect("save ruby");

        assert!(repo.delete(python.id).await.expect("delete"));
        assert!(!repo.delete(python.id).await.expect("second delete"));

        let remaining = repo.list_for_character(octo.id).await.expect("list");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "ruby");
    }

    #[tokio::test]
    async fn delete_for_character_reports_the_count() {
        let (pool, _dir) = temp_pool().await;
        let octo = owner(&pool, "octo", TypeTag::Charmer).await;
        let rival = owner(&pool, "rival", TypeTag::Geek).await;
        let repo = SqliteLanguageRepo::new(pool);

        for name in ["javascript", "java"] {
            repo.save(&learned(&octo, name)).await.expect("save");
        }
        repo.save(&learned(&rival, "php")).await.expect("save");

        assert_eq!(repo.delete_for_character(octo.id).await.expect("wipe"), 2);
        assert!(repo
            .list_for_character(octo.id)
            .await
            .expect("list")
            .is_empty());
        assert_eq!(
            repo.list_for_character(rival.id).await.expect("list").len(),
            1
        );
    }

    #[tokio::test]
    async fn a_character_cannot_learn_the_same_language_twice() {
        let (pool, _dir) = temp_pool().await;
        let octo = owner(&pool, "octo", TypeTag::Geek).await;
        let repo = SqliteLanguageRepo::new(pool);

        repo.save(&learned(&octo, "php")).await.expect("save");
        let duplicate = repo.save(&learned(&octo, "php")).await.unwrap_err();
        assert!(matches!(duplicate, RepoError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn languages_cannot_outlive_their_character() {
        let (pool, _dir) = temp_pool().await;
        let repo = SqliteLanguageRepo::new(pool);
        let ghost = Character::new("ghost", TypeTag::Geek);

        // No character row, so the foreign key rejects the insert.
        let err = repo.save(&learned(&ghost, "php")).await.unwrap_err();
        assert!(matches!(err, RepoError::Database { .. }));
    }
}
