//! Table repositories: zero-sized structs with async query methods.

pub mod project_quest_repo;
pub mod project_repo;
pub mod quest_repo;
pub mod session_repo;
pub mod user_repo;

pub use project_quest_repo::ProjectQuestRepo;
pub use project_repo::{ProjectMemberRepo, ProjectRepo};
pub use quest_repo::QuestRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
