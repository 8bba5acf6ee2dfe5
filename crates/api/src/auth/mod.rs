//! Authentication and authorization primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation, validation, and refresh-token helpers.
//! - [`ensure_admin`] -- the single admin authorization gate.

pub mod jwt;
pub mod password;

use sqlx::PgPool;

use jam_core::error::CoreError;
use jam_core::types::DbId;

use crate::error::AppError;

/// Message returned whenever the admin gate refuses a caller.
pub const MSG_ADMIN_REQUIRED: &str = "Admin permissions required";

/// Require that `user_id` belongs to an active admin account.
///
/// Re-fetches the user row instead of trusting token claims, so a
/// revoked or demoted admin loses access the moment the row changes.
/// Both the `RequireAdmin` extractor and the verification engine call
/// through here; the policy has exactly one home.
pub async fn ensure_admin(pool: &PgPool, user_id: DbId) -> Result<(), AppError> {
    let user = jam_db::repositories::UserRepo::find_by_id(pool, user_id).await?;
    match user {
        Some(u) if u.is_admin && u.is_active => Ok(()),
        _ => Err(AppError::Core(CoreError::Unauthorized(
            MSG_ADMIN_REQUIRED.into(),
        ))),
    }
}
