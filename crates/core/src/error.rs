use crate::types::DbId;

/// Domain error taxonomy shared by the db and api crates.
///
/// Variants map one-to-one onto HTTP statuses at the api boundary;
/// business rules raise `Validation`, guard races raise `Conflict`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
