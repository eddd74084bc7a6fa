// App struct holds dependencies - some fields for future features
#![allow(dead_code)]

//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    ports::{BattleRepo, CharacterRepo, ClockPort, LanguageRepo},
    sqlite::SqliteRepositories,
};
use crate::use_cases;

/// Main application state.
///
/// Holds the repository handles and use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for the repository port handles.
pub struct Repositories {
    pub character: Arc<dyn CharacterRepo>,
    pub language: Arc<dyn LanguageRepo>,
    pub battle: Arc<dyn BattleRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub battles: use_cases::BattleUseCases,
    pub characters: use_cases::CharacterUseCases,
    pub languages: use_cases::LanguageUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    ///
    /// The clock is injected so tests can pin time.
    pub fn new(repos: SqliteRepositories, clock: Arc<dyn ClockPort>) -> Self {
        let character_repo: Arc<dyn CharacterRepo> = repos.character.clone();
        let language_repo: Arc<dyn LanguageRepo> = repos.language.clone();
        let battle_repo: Arc<dyn BattleRepo> = repos.battle.clone();

        let use_cases = UseCases {
            battles: use_cases::BattleUseCases::new(
                character_repo.clone(),
                language_repo.clone(),
                battle_repo.clone(),
                clock.clone(),
            ),
            characters: use_cases::CharacterUseCases::new(
                character_repo.clone(),
                language_repo.clone(),
                clock,
            ),
            languages: use_cases::LanguageUseCases::new(
                character_repo.clone(),
                language_repo.clone(),
            ),
        };

        Self {
            repositories: Repositories {
                character: character_repo,
                language: language_repo,
                battle: battle_repo,
            },
            use_cases,
        }
    }
}
