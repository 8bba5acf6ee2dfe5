//! Handlers for the quest catalog.
//!
//! Reads are open to any authenticated user; catalog mutations live
//! under `/admin/quests` and require an admin.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use jam_core::error::CoreError;
use jam_core::quest::validate_quest_type;
use jam_core::types::DbId;
use jam_db::models::quest::{
    CreateQuest, CreateQuestRequest, Quest, UpdateQuest, UpdateQuestRequest,
};
use jam_db::repositories::QuestRepo;

use crate::error::{validate_request, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/quests
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateQuestRequest>,
) -> AppResult<(StatusCode, Json<Quest>)> {
    validate_request(&input)?;
    validate_quest_type(&input.quest_type)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let create = CreateQuest {
        title: input.title,
        description: input.description,
        quest_type: input.quest_type,
        reward_points: input.reward_points,
        bounty_usd: input.bounty_usd,
        created_by: admin.user_id,
    };

    let quest = QuestRepo::create(&state.pool, &create).await?;

    tracing::info!(
        admin_id = admin.user_id,
        quest_id = quest.id,
        quest_type = %quest.quest_type,
        "Quest created"
    );

    Ok((StatusCode::CREATED, Json(quest)))
}

/// PUT /api/v1/admin/quests/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateQuestRequest>,
) -> AppResult<Json<Quest>> {
    validate_request(&input)?;
    if let Some(quest_type) = &input.quest_type {
        validate_quest_type(quest_type)
            .map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let update = UpdateQuest {
        title: input.title,
        description: input.description,
        quest_type: input.quest_type,
        reward_points: input.reward_points,
        bounty_usd: input.bounty_usd,
        is_active: input.is_active,
    };

    let quest = QuestRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(CoreError::NotFound { entity: "Quest", id })?;

    tracing::info!(admin_id = admin.user_id, quest_id = id, "Quest updated");

    Ok(Json(quest))
}

/// DELETE /api/v1/admin/quests/{id}
///
/// Deactivate a quest. History stays; new starts are refused.
pub async fn deactivate(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = QuestRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound { entity: "Quest", id }));
    }

    tracing::info!(admin_id = admin.user_id, quest_id = id, "Quest deactivated");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/quests
///
/// List active quests, newest first.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Quest>>>> {
    let quests = QuestRepo::list(&state.pool, false).await?;
    Ok(Json(DataResponse { data: quests }))
}

/// GET /api/v1/quests/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Quest>>> {
    let quest = QuestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Quest", id })?;
    Ok(Json(DataResponse { data: quest }))
}
