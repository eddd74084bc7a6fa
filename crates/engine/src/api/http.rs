//! HTTP routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::app::App;
use crate::use_cases::battles::{BattleHistory, BattleReport, BattlesBetween};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route(
            "/api/characters",
            get(list_characters).post(create_character),
        )
        .route(
            "/api/characters/{id}",
            get(get_character).delete(delete_character),
        )
        .route("/api/characters/{id}/kill", post(kill_character))
        .route(
            "/api/characters/{id}/languages",
            get(list_languages)
                .post(learn_language)
                .delete(forget_languages),
        )
        .route("/api/languages", get(language_catalog))
        .route("/api/types", get(type_catalog))
        .route("/api/types/{name}", get(get_type))
        .route("/api/battles", get(recent_battles))
        .route("/api/battles/{id}", get(character_battles))
        .route(
            "/api/battles/{challenger_id}/{challenged_id}",
            post(run_battle).get(battles_between),
        )
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Characters
// =============================================================================

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCharacterRequest {
    name: String,
    #[serde(rename = "type")]
    char_type: String,
    experience_points: Option<i64>,
    life_gauge: Option<i64>,
}

async fn list_characters(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<octobattles_domain::Character>>, ApiError> {
    let characters = app.use_cases.characters.list().await?;
    Ok(Json(characters))
}

async fn create_character(
    State(app): State<Arc<App>>,
    Json(request): Json<CreateCharacterRequest>,
) -> Result<Json<octobattles_domain::Character>, ApiError> {
    let type_tag: octobattles_domain::TypeTag = request
        .char_type
        .parse()
        .map_err(|e: octobattles_domain::DomainError| ApiError::BadRequest(e.to_string()))?;

    let character = app
        .use_cases
        .characters
        .create(
            &request.name,
            type_tag,
            request.experience_points,
            request.life_gauge,
        )
        .await?;
    Ok(Json(character))
}

async fn get_character(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<octobattles_domain::Character>, ApiError> {
    let character = app
        .use_cases
        .characters
        .get(octobattles_domain::CharacterId::from_uuid(id))
        .await?;
    Ok(Json(character))
}

async fn delete_character(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .characters
        .delete(octobattles_domain::CharacterId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn kill_character(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<octobattles_domain::Character>, ApiError> {
    let character = app
        .use_cases
        .characters
        .kill(octobattles_domain::CharacterId::from_uuid(id))
        .await?;
    Ok(Json(character))
}

// =============================================================================
// Languages
// =============================================================================

#[derive(serde::Deserialize)]
struct LearnLanguageRequest {
    name: String,
    weight: Option<i64>,
}

#[derive(serde::Deserialize)]
struct ForgetLanguageRequest {
    name: Option<String>,
}

#[derive(serde::Serialize)]
struct DroppedLanguages {
    dropped: u64,
}

async fn list_languages(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<octobattles_domain::Language>>, ApiError> {
    let languages = app
        .use_cases
        .languages
        .list(octobattles_domain::CharacterId::from_uuid(id))
        .await?;
    Ok(Json(languages))
}

async fn learn_language(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(request): Json<LearnLanguageRequest>,
) -> Result<Json<octobattles_domain::Language>, ApiError> {
    let language = app
        .use_cases
        .languages
        .learn(
            octobattles_domain::CharacterId::from_uuid(id),
            &request.name,
            request.weight,
        )
        .await?;
    Ok(Json(language))
}

/// Forget one language when a name is supplied, otherwise reset them all.
async fn forget_languages(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    request: Option<Json<ForgetLanguageRequest>>,
) -> Result<Json<DroppedLanguages>, ApiError> {
    let character_id = octobattles_domain::CharacterId::from_uuid(id);
    let name = request.and_then(|Json(body)| body.name);

    let dropped = match name {
        Some(name) => {
            app.use_cases.languages.forget(character_id, &name).await?;
            1
        }
        None => app.use_cases.languages.reset(character_id).await?,
    };

    Ok(Json(DroppedLanguages { dropped }))
}

// =============================================================================
// Catalogs
// =============================================================================

async fn language_catalog() -> Json<&'static [octobattles_domain::LanguageSpec]> {
    Json(&octobattles_domain::catalog::LANGUAGES)
}

async fn type_catalog() -> Json<&'static [octobattles_domain::TypeSpec]> {
    Json(&octobattles_domain::catalog::TYPES)
}

async fn get_type(
    Path(name): Path<String>,
) -> Result<Json<&'static octobattles_domain::TypeSpec>, ApiError> {
    let spec = octobattles_domain::catalog::type_entry(&name).ok_or(ApiError::NotFound)?;
    Ok(Json(spec))
}

// =============================================================================
// Battles
// =============================================================================

#[derive(serde::Deserialize)]
struct RecentBattlesQuery {
    limit: Option<u32>,
}

async fn recent_battles(
    State(app): State<Arc<App>>,
    Query(query): Query<RecentBattlesQuery>,
) -> Result<Json<Vec<octobattles_domain::Battle>>, ApiError> {
    let battles = app.use_cases.battles.recent(query.limit).await?;
    Ok(Json(battles))
}

async fn character_battles(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BattleHistory>, ApiError> {
    let history = app
        .use_cases
        .battles
        .for_character(octobattles_domain::CharacterId::from_uuid(id))
        .await?;
    Ok(Json(history))
}

async fn run_battle(
    State(app): State<Arc<App>>,
    Path((challenger_id, challenged_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BattleReport>, ApiError> {
    let report = app
        .use_cases
        .battles
        .execute(
            octobattles_domain::CharacterId::from_uuid(challenger_id),
            octobattles_domain::CharacterId::from_uuid(challenged_id),
        )
        .await?;
    Ok(Json(report))
}

async fn battles_between(
    State(app): State<Arc<App>>,
    Path((character1_id, character2_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BattlesBetween>, ApiError> {
    let battles = app
        .use_cases
        .battles
        .between(
            octobattles_domain::CharacterId::from_uuid(character1_id),
            octobattles_domain::CharacterId::from_uuid(character2_id),
        )
        .await?;
    Ok(Json(battles))
}

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg).into_response(),
            ApiError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<crate::infrastructure::ports::RepoError> for ApiError {
    fn from(e: crate::infrastructure::ports::RepoError) -> Self {
        use crate::infrastructure::ports::RepoError;
        match e {
            RepoError::NotFound { .. } => ApiError::NotFound,
            // A constraint fired under a race the use cases did not catch,
            // e.g. the same language learned twice concurrently.
            RepoError::ConstraintViolation(message) => ApiError::Conflict(message),
            e => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<crate::use_cases::characters::CharacterError> for ApiError {
    fn from(e: crate::use_cases::characters::CharacterError) -> Self {
        use crate::use_cases::characters::CharacterError;
        match e {
            CharacterError::NotFound(_) => ApiError::NotFound,
            CharacterError::Validation(msg) => ApiError::BadRequest(msg),
            CharacterError::NameTaken(_) => ApiError::Conflict(e.to_string()),
            CharacterError::Repo(repo) => repo.into(),
        }
    }
}

impl From<crate::use_cases::languages::LanguageError> for ApiError {
    fn from(e: crate::use_cases::languages::LanguageError) -> Self {
        use crate::use_cases::languages::LanguageError;
        match e {
            LanguageError::CharacterNotFound(_) | LanguageError::NotKnown(_) => ApiError::NotFound,
            LanguageError::UnknownLanguage(_) => ApiError::BadRequest(e.to_string()),
            LanguageError::AlreadyKnown(_) => ApiError::Conflict(e.to_string()),
            LanguageError::Repo(repo) => repo.into(),
        }
    }
}

impl From<crate::use_cases::battles::BattleFlowError> for ApiError {
    fn from(e: crate::use_cases::battles::BattleFlowError) -> Self {
        use crate::use_cases::battles::BattleFlowError;
        match e {
            BattleFlowError::CharacterNotFound(_) => ApiError::NotFound,
            BattleFlowError::Battle(battle) => ApiError::BadRequest(battle.to_string()),
            BattleFlowError::Repo(repo) => repo.into(),
        }
    }
}
