pub mod admin;
pub mod auth;
pub mod health;
pub mod project;
pub mod project_quest;
pub mod quest;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         current user
///
/// /admin/users                                     create, list (admin only)
/// /admin/quests                                    create (admin only)
/// /admin/quests/{id}                               update, deactivate
/// /admin/verifications/pending                     verification queue
/// /admin/projects/{id}/stage                       stage override (PUT)
///
/// /quests                                          list active quests
/// /quests/{id}                                     quest detail
///
/// /projects                                        create, list
/// /projects/{id}                                   detail, update
/// /projects/{id}/members                           join, list
/// /projects/{id}/members/{user_id}                 leave / remove
/// /projects/{id}/quests/{quest_id}/start           start quest
/// /projects/{id}/quests/{quest_id}/submit          submit evidence
/// /projects/{id}/quests                            quest progress list
/// /projects/{id}/advancement                       advancement check
/// /projects/{id}/advance                           advance stage (admin)
///
/// /project-quests/{id}/verify                      verify submission (admin)
/// /project-quests/{id}/reject                      reject submission (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/quests", quest::router())
        .nest("/projects", project::router())
        .nest("/project-quests", project_quest::router())
}
