//! Authorization extractors layered on top of [`AuthUser`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::auth::ensure_admin;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an active admin account. Rejects with 401 otherwise.
///
/// The check goes to the database rather than the token's `is_admin`
/// claim, so demoting an admin takes effect immediately.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an active admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        ensure_admin(&state.pool, user.user_id).await?;
        Ok(RequireAdmin(user))
    }
}
