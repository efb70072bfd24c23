use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::matching;
use crate::models::{MatchPatch, NewMatch};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Option<String>,
}

/// GET /match — candidate suggestions for a user (public read).
pub async fn get_matches(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = params
        .user_id
        .ok_or_else(|| AppError::BadRequest("user_id required".to_string()))?;

    let matches = matching::find_candidates(state.store.as_ref(), &user_id).await?;
    let count = matches.len();
    Ok(Json(json!({ "matches": matches, "count": count })))
}

#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    pub user_a: Option<String>,
    pub user_b: Option<String>,
    pub matched_skills: Option<Vec<String>>,
}

/// POST /matches — propose a match between two users.
pub async fn create_match(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(body): Json<CreateMatchRequest>,
) -> Result<Json<Value>, AppError> {
    let (Some(user_a), Some(user_b)) = (body.user_a, body.user_b) else {
        return Err(AppError::BadRequest("user_a & user_b required".to_string()));
    };

    let new = NewMatch::proposal(user_a, user_b, body.matched_skills.unwrap_or_default());
    let record = state.store.insert_match(new).await?;
    Ok(Json(json!({ "match": record })))
}

/// GET /matches — every match where the user is either side, newest first.
pub async fn list_user_matches(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = params
        .user_id
        .ok_or_else(|| AppError::BadRequest("user_id required".to_string()))?;

    let matches = state.store.matches_for_user(&user_id).await?;
    Ok(Json(json!({ "matches": matches })))
}

/// PATCH /matches/{id}/accept — marks the record accepted and stamps
/// accepted_at. Re-accepting or accepting a rejected record overwrites;
/// last write wins.
pub async fn accept_match(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(match_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let record = state
        .store
        .update_match(&match_id, MatchPatch::accept(Utc::now()))
        .await?;
    Ok(Json(json!({ "match": record })))
}

#[derive(Debug, Default, Deserialize)]
pub struct RejectRequest {
    pub reason: Option<String>,
}

/// PATCH /matches/{id}/reject — body is optional; an absent body rejects
/// without a reason.
pub async fn reject_match(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(match_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let reason = if body.is_empty() {
        None
    } else {
        serde_json::from_slice::<RejectRequest>(&body)
            .map_err(|_| AppError::BadRequest("invalid JSON body".to_string()))?
            .reason
    };

    let record = state
        .store
        .update_match(&match_id, MatchPatch::reject(reason))
        .await?;
    Ok(Json(json!({ "match": record })))
}
