use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{SkillStore, StoreError};
use crate::models::{Feedback, MatchPatch, MatchRecord, NewFeedback, NewMatch, Profile, Skill, SkillInterest};

/// Client for the managed database's row API (PostgREST dialect): equality,
/// membership and disjunction filters go in the query string, writes return
/// the stored representation.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    service_key: String,
}

impl RestStore {
    /// `base_url` is the project root; the row API lives under `/rest/v1`.
    pub fn new(client: Client, base_url: &str, service_key: &str) -> Self {
        Self {
            client,
            base_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            service_key: service_key.to_string(),
        }
    }

    fn request(&self, method: Method, table: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.base_url, table))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn rows<T: DeserializeOwned>(builder: reqwest::RequestBuilder) -> Result<Vec<T>, StoreError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Writes ask the store to echo the affected rows back; an empty echo on
    /// an update means the filter matched nothing.
    async fn single<T: DeserializeOwned>(builder: reqwest::RequestBuilder) -> Result<T, StoreError> {
        let mut rows: Vec<T> = Self::rows(builder.header("Prefer", "return=representation")).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(rows.remove(0))
    }
}

fn eq_filter(value: &str) -> String {
    format!("eq.{value}")
}

fn in_filter(values: &[String]) -> String {
    format!("in.({})", values.join(","))
}

/// `or=(user_a.eq.X,user_b.eq.X)` — rows where the user is either side.
fn either_side_filter(user_id: &str) -> String {
    format!("(user_a.eq.{user_id},user_b.eq.{user_id})")
}

#[derive(Debug, Deserialize)]
struct SkillIdRow {
    skill_id: String,
}

#[async_trait]
impl SkillStore for RestStore {
    async fn wanted_skill_ids(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        let user_filter = eq_filter(user_id);
        let rows: Vec<SkillIdRow> = Self::rows(self.request(Method::GET, "user_skills").query(&[
            ("select", "skill_id"),
            ("user_id", user_filter.as_str()),
            ("type", "eq.want"),
        ]))
        .await?;

        Ok(rows.into_iter().map(|row| row.skill_id).collect())
    }

    async fn givers_of(&self, skill_ids: &[String]) -> Result<Vec<SkillInterest>, StoreError> {
        let skill_filter = in_filter(skill_ids);
        Self::rows(self.request(Method::GET, "user_skills").query(&[
            ("select", "user_id,skill_id,type"),
            ("skill_id", skill_filter.as_str()),
            ("type", "eq.give"),
        ]))
        .await
    }

    async fn profiles(&self, user_ids: &[String]) -> Result<Vec<Profile>, StoreError> {
        let user_filter = in_filter(user_ids);
        Self::rows(self.request(Method::GET, "profiles").query(&[
            ("select", "user_id,full_name,contact_link,avatar_url"),
            ("user_id", user_filter.as_str()),
        ]))
        .await
    }

    async fn skill_catalog(&self) -> Result<Vec<Skill>, StoreError> {
        Self::rows(self.request(Method::GET, "skills").query(&[("select", "id,name")])).await
    }

    async fn insert_match(&self, new: NewMatch) -> Result<MatchRecord, StoreError> {
        Self::single(self.request(Method::POST, "matches").json(&new)).await
    }

    async fn matches_for_user(&self, user_id: &str) -> Result<Vec<MatchRecord>, StoreError> {
        let side_filter = either_side_filter(user_id);
        Self::rows(self.request(Method::GET, "matches").query(&[
            ("select", "id,user_a,user_b,matched_skills,status,reason,created_at,accepted_at"),
            ("or", side_filter.as_str()),
            ("order", "created_at.desc"),
        ]))
        .await
    }

    async fn update_match(&self, match_id: &str, patch: MatchPatch) -> Result<MatchRecord, StoreError> {
        let id_filter = eq_filter(match_id);
        Self::single(
            self.request(Method::PATCH, "matches")
                .query(&[("id", id_filter.as_str())])
                .json(&patch),
        )
        .await
    }

    async fn insert_feedback(&self, new: NewFeedback) -> Result<Feedback, StoreError> {
        Self::single(self.request(Method::POST, "feedbacks").json(&new)).await
    }
}
