//! Entity models and request/response DTOs, one module per table cluster.

pub mod project;
pub mod project_quest;
pub mod quest;
pub mod session;
pub mod user;
