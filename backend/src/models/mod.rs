pub mod matches;
pub mod skills;

pub use matches::{Feedback, MatchCandidate, MatchPatch, MatchRecord, MatchStatus, NewFeedback, NewMatch};
pub use skills::{InterestKind, Profile, Skill, SkillInterest};
