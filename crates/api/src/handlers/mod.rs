//! HTTP handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod project;
pub mod project_quest;
pub mod quest;
pub mod stage;
pub mod verification;
