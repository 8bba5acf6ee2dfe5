//! Pure domain logic for the JAM platform.
//!
//! This crate holds the stage ladder, the quest lifecycle, and their
//! evaluation and validation rules. It has no database dependency;
//! callers pre-load counts and flags and pass them in.

pub mod error;
pub mod quest;
pub mod stage;
pub mod types;

pub use error::CoreError;
