//! SQLite-backed character storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octobattles_domain::{Character, CharacterId, LifeGauge, TypeTag};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::infrastructure::ports::{CharacterRepo, RepoError};

/// SQLite implementation for character storage.
pub struct SqliteCharacterRepo {
    pool: SqlitePool,
}

impl SqliteCharacterRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(super) fn character_from_row(row: &SqliteRow) -> Result<Character, RepoError> {
    let id: String = row.get("id");
    let char_type: String = row.get("char_type");
    let life_gauge: i64 = row.get("life_gauge");
    let last_checked: Option<String> = row.get("last_checked");

    let id = Uuid::parse_str(&id).map_err(|e| RepoError::serialization(e))?;
    let type_tag: TypeTag = char_type
        .parse()
        .map_err(|e| RepoError::serialization(e))?;
    let last_checked = last_checked
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|parsed| parsed.with_timezone(&Utc))
                .map_err(|e| RepoError::serialization(e))
        })
        .transpose()?;

    Ok(Character {
        id: CharacterId::from_uuid(id),
        name: row.get("name"),
        type_tag,
        experience_points: row.get("experience_points"),
        life_gauge: LifeGauge::from(life_gauge),
        last_checked,
    })
}

#[async_trait]
impl CharacterRepo for SqliteCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        let row = sqlx::query("SELECT * FROM characters WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("characters.get", e))?;

        row.as_ref().map(character_from_row).transpose()
    }

    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO characters (id, name, char_type, experience_points, life_gauge, last_checked)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                char_type = excluded.char_type,
                experience_points = excluded.experience_points,
                life_gauge = excluded.life_gauge,
                last_checked = excluded.last_checked
            "#,
        )
        .bind(character.id.to_string())
        .bind(&character.name)
        .bind(character.type_tag.as_str())
        .bind(character.experience_points)
        .bind(i64::from(character.life_gauge))
        .bind(character.last_checked.map(|ts| ts.to_rfc3339()))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("characters.save", e))?;

        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM characters WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("characters.delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Character>, RepoError> {
        let rows = sqlx::query("SELECT * FROM characters ORDER BY name COLLATE NOCASE, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("characters.list", e))?;

        rows.iter().map(character_from_row).collect()
    }

    async fn find_living_by_name(&self, name: &str) -> Result<Option<Character>, RepoError> {
        let row = sqlx::query("SELECT * FROM characters WHERE name = ? AND life_gauge > 0 LIMIT 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("characters.find_living_by_name", e))?;

        row.as_ref().map(character_from_row).transpose()
    }
}
