//! Handlers for the `/admin/users` resource.
//!
//! All handlers require an active admin account via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use jam_core::error::CoreError;
use jam_core::types::DbId;
use jam_db::models::user::{
    CreateUser, CreateUserRequest, UpdateUser, UpdateUserRequest, UserResponse,
};
use jam_db::repositories::{SessionRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{validate_request, AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Minimum password length enforced on user creation.
const MIN_PASSWORD_LENGTH: usize = 8;

/// POST /api/v1/admin/users
///
/// Create a platform account. Only admins may mint accounts (there is
/// no open signup; onboarding happens through the community).
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    validate_request(&input)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        username: input.username,
        email: input.email,
        password_hash,
        display_name: input.display_name,
        wallet_address: input.wallet_address,
        is_admin: input.is_admin,
    };

    let user = UserRepo::create(&state.pool, &create).await?;

    tracing::info!(
        admin_id = admin.user_id,
        user_id = user.id,
        is_admin = user.is_admin,
        "User created"
    );

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update an account. Only the supplied fields change; promoting or
/// demoting an admin takes effect on the target's next request.
pub async fn update_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    validate_request(&input)?;

    let update = UpdateUser {
        display_name: input.display_name,
        wallet_address: input.wallet_address,
        is_admin: input.is_admin,
        is_active: input.is_active,
    };

    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;

    tracing::info!(
        admin_id = admin.user_id,
        user_id = id,
        is_admin = user.is_admin,
        is_active = user.is_active,
        "User updated"
    );

    Ok(Json(user.into()))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Deactivate an account and revoke its sessions. The row stays so
/// authored quests and memberships keep their history.
pub async fn deactivate_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(
        admin_id = admin.user_id,
        user_id = id,
        sessions_revoked = revoked,
        "User deactivated"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/users
///
/// List all accounts, newest first.
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    let data = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse { data }))
}
