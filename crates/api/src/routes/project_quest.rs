//! Route definitions for admin decisions on quest submissions.
//!
//! ```text
//! POST   /{id}/verify    VerificationEngine::verify (admin)
//! POST   /{id}/reject    VerificationEngine::reject (admin)
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::verification;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/verify", post(verification::verify))
        .route("/{id}/reject", post(verification::reject))
}
