//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use jam_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Carries the password hash, so it is never serialized directly.
/// API responses go through [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub wallet_address: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub wallet_address: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            wallet_address: user.wallet_address,
            is_admin: user.is_admin,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// DTO for inserting a user row. The password is already hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub wallet_address: Option<String>,
    pub is_admin: bool,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub display_name: Option<String>,
    pub wallet_address: Option<String>,
    pub is_admin: Option<bool>,
    pub is_active: Option<bool>,
}

/// Request body for the admin create-user endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(max = 100))]
    pub display_name: Option<String>,
    #[validate(length(max = 100))]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// Request body for the admin update-user endpoint. Absent fields are
/// left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(max = 100))]
    pub display_name: Option<String>,
    #[validate(length(max = 100))]
    pub wallet_address: Option<String>,
    pub is_admin: Option<bool>,
    pub is_active: Option<bool>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for refresh and logout.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}
