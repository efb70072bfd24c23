pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Feedback, MatchPatch, MatchRecord, NewFeedback, NewMatch, Profile, Skill, SkillInterest};

/// Failures coming back from the managed store service.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The filter matched no row (an update-with-return came back empty).
    #[error("no matching row")]
    NotFound,

    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Row-level access to the external store, injected into the router state so
/// handlers never hold a client of their own. `RestStore` talks to the hosted
/// row API; `MemoryStore` backs tests.
#[async_trait]
pub trait SkillStore: Send + Sync {
    /// Skill ids the user has registered as `want`.
    async fn wanted_skill_ids(&self, user_id: &str) -> Result<Vec<String>, StoreError>;

    /// All `give` rows touching any of the listed skills.
    async fn givers_of(&self, skill_ids: &[String]) -> Result<Vec<SkillInterest>, StoreError>;

    async fn profiles(&self, user_ids: &[String]) -> Result<Vec<Profile>, StoreError>;

    /// The full skill catalog, read fresh per request.
    async fn skill_catalog(&self) -> Result<Vec<Skill>, StoreError>;

    async fn insert_match(&self, new: NewMatch) -> Result<MatchRecord, StoreError>;

    /// Matches where the user is either side, newest first.
    async fn matches_for_user(&self, user_id: &str) -> Result<Vec<MatchRecord>, StoreError>;

    async fn update_match(&self, match_id: &str, patch: MatchPatch) -> Result<MatchRecord, StoreError>;

    async fn insert_feedback(&self, new: NewFeedback) -> Result<Feedback, StoreError>;
}
