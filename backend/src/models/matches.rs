use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Proposed,
    Accepted,
    Rejected,
}

/// A stored match proposal between two users. `user_a` is always the
/// lexicographically smaller id, so proposing A→B and B→A land on the same
/// row orientation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: Uuid,
    pub user_a: String,
    pub user_b: String,
    pub matched_skills: Vec<String>,
    pub status: MatchStatus,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
}

/// Insert payload for a new proposal.
#[derive(Debug, Clone, Serialize)]
pub struct NewMatch {
    pub user_a: String,
    pub user_b: String,
    pub matched_skills: Vec<String>,
    pub status: MatchStatus,
}

impl NewMatch {
    /// Builds a `proposed` record with the pair in canonical order.
    pub fn proposal(user_a: String, user_b: String, matched_skills: Vec<String>) -> Self {
        let (user_a, user_b) = if user_a <= user_b {
            (user_a, user_b)
        } else {
            (user_b, user_a)
        };

        Self {
            user_a,
            user_b,
            matched_skills,
            status: MatchStatus::Proposed,
        }
    }
}

/// Partial update applied to a match row, serialized as the PATCH body.
/// `reason` is doubly optional: `Some(None)` writes an explicit null so a
/// reason-less rejection clears any stored value, `None` leaves the column
/// untouched.
#[derive(Debug, Clone, Serialize)]
pub struct MatchPatch {
    pub status: MatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Option<String>>,
}

impl MatchPatch {
    pub fn accept(at: DateTime<Utc>) -> Self {
        Self {
            status: MatchStatus::Accepted,
            accepted_at: Some(at),
            reason: None,
        }
    }

    pub fn reject(reason: Option<String>) -> Self {
        Self {
            status: MatchStatus::Rejected,
            accepted_at: None,
            reason: Some(reason),
        }
    }
}

/// Computed per matching request; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub user_id: String,
    pub full_name: String,
    pub contact_link: Option<String>,
    pub avatar_url: Option<String>,
    pub matched_skills: Vec<String>,
    pub match_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub id: Uuid,
    pub match_id: String,
    pub author_id: String,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewFeedback {
    pub match_id: String,
    pub author_id: String,
    pub rating: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proposal_orders_pair_lexicographically() {
        let forward = NewMatch::proposal("A".into(), "B".into(), vec![]);
        let reversed = NewMatch::proposal("B".into(), "A".into(), vec![]);

        assert_eq!(forward.user_a, "A");
        assert_eq!(forward.user_b, "B");
        assert_eq!(reversed.user_a, "A");
        assert_eq!(reversed.user_b, "B");
    }

    #[test]
    fn proposal_starts_proposed() {
        let new = NewMatch::proposal("u1".into(), "u2".into(), vec!["Rust".into()]);
        assert_eq!(new.status, MatchStatus::Proposed);
    }

    #[test]
    fn status_uses_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&MatchStatus::Proposed).unwrap(), "\"proposed\"");
        assert_eq!(serde_json::to_string(&MatchStatus::Accepted).unwrap(), "\"accepted\"");
        assert_eq!(serde_json::to_string(&MatchStatus::Rejected).unwrap(), "\"rejected\"");
    }

    #[test]
    fn accept_patch_omits_reason() {
        let patch = serde_json::to_value(MatchPatch::accept(Utc::now())).unwrap();
        assert_eq!(patch["status"], "accepted");
        assert!(patch.get("reason").is_none());
        assert!(patch.get("accepted_at").is_some());
    }

    #[test]
    fn reject_patch_writes_explicit_null_reason() {
        let patch = serde_json::to_value(MatchPatch::reject(None)).unwrap();
        assert_eq!(patch["status"], "rejected");
        assert!(patch["reason"].is_null());
        assert!(patch.get("accepted_at").is_none());

        let with_reason = serde_json::to_value(MatchPatch::reject(Some("busy".into()))).unwrap();
        assert_eq!(with_reason["reason"], "busy");
    }
}
