//! Candidate aggregation for the matching endpoint: one-way matches where
//! other users give what the requesting user wants.

use std::collections::{HashMap, HashSet};

use crate::error::AppError;
use crate::models::{MatchCandidate, Profile, Skill, SkillInterest};
use crate::store::SkillStore;

/// Finds users giving any skill `user_id` wants, ranked by how many of the
/// wanted skills they cover. Read-only; a user with no `want` rows gets an
/// empty result, not an error.
pub async fn find_candidates(store: &dyn SkillStore, user_id: &str) -> Result<Vec<MatchCandidate>, AppError> {
    let wanted = store.wanted_skill_ids(user_id).await?;
    if wanted.is_empty() {
        return Ok(Vec::new());
    }

    let givers: Vec<SkillInterest> = store
        .givers_of(&wanted)
        .await?
        .into_iter()
        .filter(|row| row.user_id != user_id)
        .collect();

    let mut candidate_ids: Vec<String> = Vec::new();
    for row in &givers {
        if !candidate_ids.contains(&row.user_id) {
            candidate_ids.push(row.user_id.clone());
        }
    }
    if candidate_ids.is_empty() {
        return Ok(Vec::new());
    }

    // Catalog is read fresh on every request; there is no cache to go stale.
    let profiles = store.profiles(&candidate_ids).await?;
    let catalog = store.skill_catalog().await?;

    Ok(rank_candidates(&profiles, &givers, &catalog))
}

/// Pure aggregation step: per profile, map the giver rows to skill names,
/// dropping ids missing from the catalog and deduplicating by name, then
/// sort by match count descending. The sort is stable, so ties keep the
/// store's profile order.
pub fn rank_candidates(profiles: &[Profile], givers: &[SkillInterest], catalog: &[Skill]) -> Vec<MatchCandidate> {
    let names: HashMap<&str, &str> = catalog
        .iter()
        .map(|skill| (skill.id.as_str(), skill.name.as_str()))
        .collect();

    let mut candidates: Vec<MatchCandidate> = profiles
        .iter()
        .map(|profile| {
            let mut seen = HashSet::new();
            let mut matched: Vec<String> = Vec::new();
            for row in givers.iter().filter(|row| row.user_id == profile.user_id) {
                if let Some(name) = names.get(row.skill_id.as_str()) {
                    if seen.insert(*name) {
                        matched.push((*name).to_string());
                    }
                }
            }

            let match_count = matched.len();
            MatchCandidate {
                user_id: profile.user_id.clone(),
                full_name: profile.full_name.clone(),
                contact_link: profile.contact_link.clone(),
                avatar_url: profile.avatar_url.clone(),
                matched_skills: matched,
                match_count,
            }
        })
        .collect();

    candidates.sort_by(|a, b| b.match_count.cmp(&a.match_count));
    candidates
}
