//! Route definitions for authentication.
//!
//! ```text
//! POST   /login      login (public)
//! POST   /refresh    rotate refresh token (public)
//! POST   /logout     revoke sessions (requires auth)
//! GET    /me         current user (requires auth)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}
