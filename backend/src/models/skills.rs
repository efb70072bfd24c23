use serde::{Deserialize, Serialize};

/// Whether a user offers a skill or is looking for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestKind {
    Want,
    Give,
}

/// One row of the user_skills table. A user may have any number of want/give
/// rows; duplicates are collapsed during aggregation, not at rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillInterest {
    pub user_id: String,
    pub skill_id: String,
    #[serde(rename = "type")]
    pub kind: InterestKind,
}

/// Entry of the immutable skill catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub full_name: String,
    pub contact_link: Option<String>,
    pub avatar_url: Option<String>,
}
