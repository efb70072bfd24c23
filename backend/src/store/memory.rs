use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{SkillStore, StoreError};
use crate::models::{
    Feedback, InterestKind, MatchPatch, MatchRecord, NewFeedback, NewMatch, Profile, Skill, SkillInterest,
};

/// In-process stand-in for the hosted store. Rows live in plain vectors
/// behind a mutex; generated ids and timestamps come from this process
/// instead of the database defaults.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    interests: Vec<SkillInterest>,
    skills: Vec<Skill>,
    profiles: Vec<Profile>,
    matches: Vec<MatchRecord>,
    feedbacks: Vec<Feedback>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.inner.lock().expect("store mutex poisoned")
    }

    pub fn add_skill(&self, id: &str, name: &str) {
        self.tables().skills.push(Skill {
            id: id.to_string(),
            name: name.to_string(),
        });
    }

    pub fn add_interest(&self, user_id: &str, skill_id: &str, kind: InterestKind) {
        self.tables().interests.push(SkillInterest {
            user_id: user_id.to_string(),
            skill_id: skill_id.to_string(),
            kind,
        });
    }

    pub fn add_profile(&self, user_id: &str, full_name: &str) {
        self.tables().profiles.push(Profile {
            user_id: user_id.to_string(),
            full_name: full_name.to_string(),
            contact_link: None,
            avatar_url: None,
        });
    }

    pub fn match_by_id(&self, id: Uuid) -> Option<MatchRecord> {
        self.tables().matches.iter().find(|m| m.id == id).cloned()
    }

    pub fn feedback_count(&self) -> usize {
        self.tables().feedbacks.len()
    }
}

#[async_trait]
impl SkillStore for MemoryStore {
    async fn wanted_skill_ids(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .tables()
            .interests
            .iter()
            .filter(|row| row.user_id == user_id && row.kind == InterestKind::Want)
            .map(|row| row.skill_id.clone())
            .collect())
    }

    async fn givers_of(&self, skill_ids: &[String]) -> Result<Vec<SkillInterest>, StoreError> {
        Ok(self
            .tables()
            .interests
            .iter()
            .filter(|row| row.kind == InterestKind::Give && skill_ids.contains(&row.skill_id))
            .cloned()
            .collect())
    }

    async fn profiles(&self, user_ids: &[String]) -> Result<Vec<Profile>, StoreError> {
        Ok(self
            .tables()
            .profiles
            .iter()
            .filter(|profile| user_ids.contains(&profile.user_id))
            .cloned()
            .collect())
    }

    async fn skill_catalog(&self) -> Result<Vec<Skill>, StoreError> {
        Ok(self.tables().skills.clone())
    }

    async fn insert_match(&self, new: NewMatch) -> Result<MatchRecord, StoreError> {
        let record = MatchRecord {
            id: Uuid::new_v4(),
            user_a: new.user_a,
            user_b: new.user_b,
            matched_skills: new.matched_skills,
            status: new.status,
            reason: None,
            created_at: Utc::now(),
            accepted_at: None,
        };

        self.tables().matches.push(record.clone());
        Ok(record)
    }

    async fn matches_for_user(&self, user_id: &str) -> Result<Vec<MatchRecord>, StoreError> {
        let mut rows: Vec<MatchRecord> = self
            .tables()
            .matches
            .iter()
            .filter(|m| m.user_a == user_id || m.user_b == user_id)
            .cloned()
            .collect();

        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn update_match(&self, match_id: &str, patch: MatchPatch) -> Result<MatchRecord, StoreError> {
        let mut tables = self.tables();
        let record = tables
            .matches
            .iter_mut()
            .find(|m| m.id.to_string() == match_id)
            .ok_or(StoreError::NotFound)?;

        record.status = patch.status;
        if let Some(at) = patch.accepted_at {
            record.accepted_at = Some(at);
        }
        if let Some(reason) = patch.reason {
            record.reason = reason;
        }

        Ok(record.clone())
    }

    async fn insert_feedback(&self, new: NewFeedback) -> Result<Feedback, StoreError> {
        let feedback = Feedback {
            id: Uuid::new_v4(),
            match_id: new.match_id,
            author_id: new.author_id,
            rating: new.rating,
            comment: new.comment,
            created_at: Utc::now(),
        };

        self.tables().feedbacks.push(feedback.clone());
        Ok(feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let result = store
            .update_match(&Uuid::new_v4().to_string(), MatchPatch::accept(Utc::now()))
            .await;

        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn matches_for_user_returns_newest_first() {
        let store = MemoryStore::new();
        let first = store
            .insert_match(NewMatch::proposal("a".into(), "b".into(), vec![]))
            .await
            .unwrap();
        // Distinct created_at so the ordering assertion is meaningful.
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = store
            .insert_match(NewMatch::proposal("a".into(), "c".into(), vec![]))
            .await
            .unwrap();

        let rows = store.matches_for_user("a").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].created_at >= rows[1].created_at);
        assert_eq!(rows[0].id, second.id);
        assert_eq!(rows[1].id, first.id);

        assert!(store.matches_for_user("nobody").await.unwrap().is_empty());
    }
}
