//! SQLite-backed persistence.
//!
//! One repository per aggregate, all sharing a single [`SqlitePool`]. The
//! schema is plain `CREATE TABLE IF NOT EXISTS` statements so a fresh
//! database file is usable without a migration step.

mod battles;
mod characters;
mod languages;

pub use battles::SqliteBattleRepo;
pub use characters::SqliteCharacterRepo;
pub use languages::SqliteLanguageRepo;

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::infrastructure::ports::RepoError;

/// Create all SQLite repositories from a shared pool.
pub struct SqliteRepositories {
    pub character: Arc<SqliteCharacterRepo>,
    pub language: Arc<SqliteLanguageRepo>,
    pub battle: Arc<SqliteBattleRepo>,
}

impl SqliteRepositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            character: Arc::new(SqliteCharacterRepo::new(pool.clone())),
            language: Arc::new(SqliteLanguageRepo::new(pool.clone())),
            battle: Arc::new(SqliteBattleRepo::new(pool)),
        }
    }
}

/// Open the database at `db_path`, creating the file if it does not exist.
pub async fn connect(db_path: &str) -> Result<SqlitePool, RepoError> {
    SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await
        .map_err(|e| RepoError::database("connect", e))
}

/// Create the tables and indexes every repository relies on.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS characters (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            char_type TEXT NOT NULL,
            experience_points INTEGER NOT NULL,
            life_gauge INTEGER NOT NULL,
            last_checked TEXT
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS languages (
            id TEXT PRIMARY KEY,
            character_id TEXT NOT NULL REFERENCES characters(id),
            name TEXT NOT NULL,
            lang_type TEXT NOT NULL,
            power_level INTEGER NOT NULL,
            weight INTEGER NOT NULL,
            UNIQUE (character_id, name)
        )
        "#,
        // Battles are a ledger: no foreign keys, so history survives the
        // deletion of a combatant.
        r#"
        CREATE TABLE IF NOT EXISTS battles (
            id TEXT PRIMARY KEY,
            character1_id TEXT NOT NULL,
            character2_id TEXT NOT NULL,
            victorious_character_id TEXT,
            battle_log TEXT NOT NULL,
            battle_timestamp TEXT NOT NULL
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_languages_character ON languages(character_id)",
        "CREATE INDEX IF NOT EXISTS idx_battles_character1 ON battles(character1_id)",
        "CREATE INDEX IF NOT EXISTS idx_battles_character2 ON battles(character2_id)",
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("schema", e))?;
    }

    Ok(())
}
