//! Route definitions for the public quest catalog.
//!
//! ```text
//! GET    /            list active quests
//! GET    /{id}        quest detail
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::quest;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quest::list))
        .route("/{id}", get(quest::get_by_id))
}
