//! Route definitions for projects, membership, quest progress, and
//! advancement.
//!
//! ```text
//! POST   /                                  create (creator joins as OWNER)
//! GET    /                                  list
//! GET    /{id}                              detail
//! PUT    /{id}                              update profile / deliverables
//! POST   /{id}/members                      join
//! GET    /{id}/members                      list members
//! DELETE /{id}/members/{user_id}            leave / remove (self or admin)
//! POST   /{id}/quests/{quest_id}/start      start a team quest
//! POST   /{id}/quests/{quest_id}/submit     submit evidence
//! GET    /{id}/quests                       list quest progress
//! GET    /{id}/advancement                  advancement check
//! POST   /{id}/advance                      advance stage (admin)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{project, project_quest, stage};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(project::create).get(project::list))
        .route("/{id}", get(project::get_by_id).put(project::update))
        .route(
            "/{id}/members",
            post(project::join).get(project::list_members),
        )
        .route(
            "/{id}/members/{user_id}",
            axum::routing::delete(project::remove_member),
        )
        .route(
            "/{id}/quests/{quest_id}/start",
            post(project_quest::start),
        )
        .route(
            "/{id}/quests/{quest_id}/submit",
            post(project_quest::submit),
        )
        .route("/{id}/quests", get(project_quest::list_for_project))
        .route("/{id}/advancement", get(stage::check_advancement))
        .route("/{id}/advance", post(stage::advance))
}
