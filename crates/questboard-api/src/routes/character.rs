//! Routes for the Character Management bounded context, including the
//! character's quest queue.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use questboard_character::application::{command_handlers, query_handlers};
use questboard_character::domain::aggregates::Character;
use questboard_character::domain::commands;
use questboard_core::error::DomainError;
use questboard_core::types::{CharacterId, QuestId};
use questboard_quest::domain::aggregates::{AssignedQuest, Quest};

use crate::error::ApiError;
use crate::routes::PageParams;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateCharacterRequest {
    /// Display name, 2 to 50 characters.
    pub name: String,
    /// Class tag, 2 to 50 characters.
    pub class: String,
}

/// Request body for PUT /{id}. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCharacterRequest {
    /// New display name.
    pub name: Option<String>,
    /// New class tag.
    pub class: Option<String>,
}

/// Response body for a successful accept.
#[derive(Debug, Serialize)]
pub struct AcceptQuestResponse {
    /// The accepting character.
    pub character_id: CharacterId,
    /// The quest, now `en_progreso`.
    pub quest: Quest,
}

/// POST /
#[instrument(skip(state, request))]
async fn create_character(
    State(state): State<AppState>,
    Json(request): Json<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<Character>), ApiError> {
    let command = commands::CreateCharacter {
        correlation_id: Uuid::new_v4(),
        name: request.name,
        class: request.class,
    };

    info!(correlation_id = %command.correlation_id, "handling create_character command");

    let character = command_handlers::handle_create_character(&command, &*state.characters).await?;

    Ok((StatusCode::CREATED, Json(character)))
}

/// GET /?skip=&limit=
async fn list_characters(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Character>>, ApiError> {
    let characters = query_handlers::list_characters(params.into(), &*state.characters).await?;
    Ok(Json(characters))
}

/// GET /{id}
async fn get_character(
    State(state): State<AppState>,
    Path(character_id): Path<CharacterId>,
) -> Result<Json<Character>, ApiError> {
    let character = query_handlers::get_character_by_id(character_id, &*state.characters).await?;
    Ok(Json(character))
}

/// PUT /{id}
#[instrument(skip(state, request))]
async fn update_character(
    State(state): State<AppState>,
    Path(character_id): Path<CharacterId>,
    Json(request): Json<UpdateCharacterRequest>,
) -> Result<Json<Character>, ApiError> {
    let command = commands::UpdateCharacter {
        correlation_id: Uuid::new_v4(),
        character_id,
        name: request.name,
        class: request.class,
    };

    info!(correlation_id = %command.correlation_id, "handling update_character command");

    let character = command_handlers::handle_update_character(&command, &*state.characters).await?;

    Ok(Json(character))
}

/// DELETE /{id}
#[instrument(skip(state))]
async fn delete_character(
    State(state): State<AppState>,
    Path(character_id): Path<CharacterId>,
) -> Result<StatusCode, ApiError> {
    if state.assignments.delete_character(character_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(DomainError::character_not_found(character_id).into())
    }
}

/// POST /{id}/quests/{quest_id}
#[instrument(skip(state))]
async fn accept_quest(
    State(state): State<AppState>,
    Path((character_id, quest_id)): Path<(CharacterId, QuestId)>,
) -> Result<Json<AcceptQuestResponse>, ApiError> {
    let quest = state.assignments.accept_quest(character_id, quest_id).await?;
    Ok(Json(AcceptQuestResponse {
        character_id,
        quest,
    }))
}

/// GET /{id}/quests
async fn list_character_quests(
    State(state): State<AppState>,
    Path(character_id): Path<CharacterId>,
) -> Result<Json<Vec<Quest>>, ApiError> {
    let quests = state.assignments.list_character_quests(character_id).await?;
    Ok(Json(quests))
}

/// POST /{id}/complete
#[instrument(skip(state))]
async fn complete_next_quest(
    State(state): State<AppState>,
    Path(character_id): Path<CharacterId>,
) -> Result<Json<Quest>, ApiError> {
    let quest = state.assignments.complete_next_quest(character_id).await?;
    Ok(Json(quest))
}

/// GET /{id}/assignments
async fn list_assignments(
    State(state): State<AppState>,
    Path(character_id): Path<CharacterId>,
) -> Result<Json<Vec<AssignedQuest>>, ApiError> {
    let assigned = state
        .assignments
        .list_character_assignments(character_id)
        .await?;
    Ok(Json(assigned))
}

/// Returns the router for the character context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_character).get(list_characters))
        .route(
            "/{id}",
            get(get_character)
                .put(update_character)
                .delete(delete_character),
        )
        .route("/{id}/quests", get(list_character_quests))
        .route("/{id}/quests/{quest_id}", post(accept_quest))
        .route("/{id}/complete", post(complete_next_quest))
        .route("/{id}/assignments", get(list_assignments))
}
