//! Routes for the Quest Catalog bounded context and the global pending queue.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get, routing::post};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use questboard_core::types::{CharacterId, QuestId};
use questboard_quest::application::{command_handlers, query_handlers};
use questboard_quest::domain::aggregates::{Assignment, Quest, QuestStatus};
use questboard_quest::domain::commands;

use crate::error::{ApiError, ErrorBody};
use crate::routes::PageParams;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateQuestRequest {
    /// Title, 3 to 50 characters.
    pub name: String,
    /// Description, 10 to 200 characters.
    pub description: String,
    /// Positive experience reward.
    pub experience: i64,
}

/// Request body for PUT /{id}. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateQuestRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub experience: Option<i64>,
    pub status: Option<QuestStatus>,
}

/// POST /
#[instrument(skip(state, request))]
async fn create_quest(
    State(state): State<AppState>,
    Json(request): Json<CreateQuestRequest>,
) -> Result<(StatusCode, Json<Quest>), ApiError> {
    let command = commands::CreateQuest {
        correlation_id: Uuid::new_v4(),
        name: request.name,
        description: request.description,
        experience: request.experience,
    };

    info!(correlation_id = %command.correlation_id, "handling create_quest command");

    let quest = state
        .assignments
        .create_quest(&command, state.clock.as_ref())
        .await?;

    Ok((StatusCode::CREATED, Json(quest)))
}

/// GET /?skip=&limit=
async fn list_quests(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Quest>>, ApiError> {
    let quests = query_handlers::list_quests(params.into(), &*state.quests).await?;
    Ok(Json(quests))
}

/// GET /{id}
async fn get_quest(
    State(state): State<AppState>,
    Path(quest_id): Path<QuestId>,
) -> Result<Json<Quest>, ApiError> {
    let quest = query_handlers::get_quest_by_id(quest_id, &*state.quests).await?;
    Ok(Json(quest))
}

/// PUT /{id}
#[instrument(skip(state, request))]
async fn update_quest(
    State(state): State<AppState>,
    Path(quest_id): Path<QuestId>,
    Json(request): Json<UpdateQuestRequest>,
) -> Result<Json<Quest>, ApiError> {
    let command = commands::UpdateQuest {
        correlation_id: Uuid::new_v4(),
        quest_id,
        name: request.name,
        description: request.description,
        experience: request.experience,
        status: request.status,
    };

    info!(correlation_id = %command.correlation_id, "handling update_quest command");

    let quest = command_handlers::handle_update_quest(&command, &*state.quests).await?;

    Ok(Json(quest))
}

/// DELETE /{id}
#[instrument(skip(state))]
async fn delete_quest(
    State(state): State<AppState>,
    Path(quest_id): Path<QuestId>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteQuest {
        correlation_id: Uuid::new_v4(),
        quest_id,
    };

    command_handlers::handle_delete_quest(&command, &*state.quests).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /{id}/assign/{character_id}
#[instrument(skip(state))]
async fn assign_quest(
    State(state): State<AppState>,
    Path((quest_id, character_id)): Path<(QuestId, CharacterId)>,
) -> Result<Json<Assignment>, ApiError> {
    let assignment = state.assignments.assign_quest(quest_id, character_id).await?;
    Ok(Json(assignment))
}

/// GET /next-pending
async fn next_pending_quest(State(state): State<AppState>) -> Result<Response, ApiError> {
    match state.assignments.next_global_pending_quest().await? {
        Some(quest) => Ok(Json(quest).into_response()),
        None => Ok(ErrorBody::not_found("no pending quests")),
    }
}

/// Returns the router for the quest context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_quest).get(list_quests))
        .route("/next-pending", get(next_pending_quest))
        .route(
            "/{id}",
            get(get_quest).put(update_quest).delete(delete_quest),
        )
        .route("/{id}/assign/{character_id}", post(assign_quest))
}
