//! SQLite-backed battle history.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octobattles_domain::{Battle, BattleId, Character, CharacterId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::infrastructure::ports::{BattleRepo, RepoError};

/// SQLite implementation for the battle ledger.
pub struct SqliteBattleRepo {
    pool: SqlitePool,
}

impl SqliteBattleRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn list_where(&self, filter: &str, binds: &[String]) -> Result<Vec<Battle>, RepoError> {
        let sql = format!(
            "SELECT * FROM battles WHERE {filter} ORDER BY battle_timestamp DESC, rowid DESC"
        );
        let mut query = sqlx::query(&sql);
        for bind in binds {
            query = query.bind(bind);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("battles.list", e))?;

        rows.iter().map(battle_from_row).collect()
    }
}

fn battle_from_row(row: &SqliteRow) -> Result<Battle, RepoError> {
    let id: String = row.get("id");
    let character1_id: String = row.get("character1_id");
    let character2_id: String = row.get("character2_id");
    let victorious_character_id: Option<String> = row.get("victorious_character_id");
    let battle_log: String = row.get("battle_log");
    let battle_timestamp: String = row.get("battle_timestamp");

    let parse_id = |raw: &str| -> Result<CharacterId, RepoError> {
        Uuid::parse_str(raw)
            .map(CharacterId::from_uuid)
            .map_err(|e| RepoError::serialization(e))
    };

    Ok(Battle {
        id: BattleId::from_uuid(Uuid::parse_str(&id).map_err(|e| RepoError::serialization(e))?),
        character1_id: parse_id(&character1_id)?,
        character2_id: parse_id(&character2_id)?,
        victorious_character_id: victorious_character_id
            .as_deref()
            .map(parse_id)
            .transpose()?,
        battle_log: serde_json::from_str(&battle_log)
            .map_err(|e| RepoError::serialization(e))?,
        battle_timestamp: DateTime::parse_from_rfc3339(&battle_timestamp)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|e| RepoError::serialization(e))?,
    })
}

#[async_trait]
impl BattleRepo for SqliteBattleRepo {
    async fn record(
        &self,
        battle: &Battle,
        challenger: &Character,
        challenged: &Character,
    ) -> Result<(), RepoError> {
        let log = serde_json::to_string(&battle.battle_log)
            .map_err(|e| RepoError::serialization(e))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("battles.record", e))?;

        sqlx::query(
            r#"
            INSERT INTO battles
                (id, character1_id, character2_id, victorious_character_id, battle_log, battle_timestamp)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(battle.id.to_string())
        .bind(battle.character1_id.to_string())
        .bind(battle.character2_id.to_string())
        .bind(battle.victorious_character_id.map(|id| id.to_string()))
        .bind(log)
        .bind(battle.battle_timestamp.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| RepoError::database("battles.record", e))?;

        // Battles only move experience, life, and the write timestamp.
        for character in [challenger, challenged] {
            let updated = sqlx::query(
                r#"
                UPDATE characters
                SET experience_points = ?, life_gauge = ?, last_checked = ?
                WHERE id = ?
                "#,
            )
            .bind(character.experience_points)
            .bind(i64::from(character.life_gauge))
            .bind(character.last_checked.map(|ts| ts.to_rfc3339()))
            .bind(character.id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("battles.record", e))?;

            // A combatant deleted mid-battle rolls the whole record back.
            if updated.rows_affected() == 0 {
                return Err(RepoError::not_found("Character", character.id));
            }
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("battles.record", e))?;

        Ok(())
    }

    async fn get(&self, id: BattleId) -> Result<Option<Battle>, RepoError> {
        let row = sqlx::query("SELECT * FROM battles WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("battles.get", e))?;

        row.as_ref().map(battle_from_row).transpose()
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<Battle>, RepoError> {
        let rows = sqlx::query(
            "SELECT * FROM battles ORDER BY battle_timestamp DESC, rowid DESC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("battles.list_recent", e))?;

        rows.iter().map(battle_from_row).collect()
    }

    async fn list_initiated_by(&self, character_id: CharacterId) -> Result<Vec<Battle>, RepoError> {
        self.list_where("character1_id = ?", &[character_id.to_string()])
            .await
    }

    async fn list_received_by(&self, character_id: CharacterId) -> Result<Vec<Battle>, RepoError> {
        self.list_where("character2_id = ?", &[character_id.to_string()])
            .await
    }

    async fn list_between(
        &self,
        character1_id: CharacterId,
        character2_id: CharacterId,
    ) -> Result<Vec<Battle>, RepoError> {
        self.list_where(
            "character1_id = ? AND character2_id = ?",
            &[character1_id.to_string(), character2_id.to_string()],
        )
        .await
    }
}
