//! Route definitions for the `/admin` surface.
//!
//! Every handler behind these routes carries the `RequireAdmin`
//! extractor; the router itself adds no extra gating.
//!
//! ```text
//! POST   /users                       create_user
//! GET    /users                       list_users
//! PUT    /users/{id}                  update_user
//! DELETE /users/{id}                  deactivate_user
//! POST   /quests                      quest::create
//! PUT    /quests/{id}                 quest::update
//! DELETE /quests/{id}                 quest::deactivate
//! GET    /verifications/pending       verification queue
//! PUT    /projects/{id}/stage         stage override
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{admin, quest, stage, verification};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(admin::create_user).get(admin::list_users))
        .route(
            "/users/{id}",
            put(admin::update_user).delete(admin::deactivate_user),
        )
        .route("/quests", post(quest::create))
        .route(
            "/quests/{id}",
            put(quest::update).delete(quest::deactivate),
        )
        .route("/verifications/pending", get(verification::list_pending))
        .route("/projects/{id}/stage", put(stage::set_stage))
}
