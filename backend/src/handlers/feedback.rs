use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::auth::AuthenticatedUser;
use crate::constants::{FEEDBACK_RATING_MAX, FEEDBACK_RATING_MIN};
use crate::error::AppError;
use crate::models::NewFeedback;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateFeedbackRequest {
    pub match_id: Option<String>,
    pub rating: Option<i16>,
    pub comment: Option<String>,
}

/// POST /feedbacks — file feedback about a concluded match. The author is
/// the verified token holder, never a body field.
pub async fn create_feedback(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateFeedbackRequest>,
) -> Result<Json<Value>, AppError> {
    let (Some(match_id), Some(rating)) = (body.match_id, body.rating) else {
        return Err(AppError::BadRequest("match_id & rating required".to_string()));
    };

    if !(FEEDBACK_RATING_MIN..=FEEDBACK_RATING_MAX).contains(&rating) {
        return Err(AppError::BadRequest(format!(
            "rating must be between {FEEDBACK_RATING_MIN} and {FEEDBACK_RATING_MAX}"
        )));
    }

    let feedback = state
        .store
        .insert_feedback(NewFeedback {
            match_id,
            author_id: user.id,
            rating,
            comment: body.comment,
        })
        .await?;
    Ok(Json(json!({ "feedback": feedback })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticVerifier;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn test_state() -> (Arc<MemoryStore>, AppState) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), Arc::new(StaticVerifier::new("tok", "u1")));
        (store, state)
    }

    fn caller() -> AuthenticatedUser {
        AuthenticatedUser {
            id: "u1".to_string(),
            email: None,
        }
    }

    #[tokio::test]
    async fn requires_match_id_and_rating() {
        let (_, state) = test_state();
        let err = create_feedback(
            State(state),
            caller(),
            Json(CreateFeedbackRequest {
                match_id: Some("m1".to_string()),
                rating: None,
                comment: None,
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn rating_outside_bounds_is_rejected() {
        for rating in [0, 6] {
            let (store, state) = test_state();
            let err = create_feedback(
                State(state),
                caller(),
                Json(CreateFeedbackRequest {
                    match_id: Some("m1".to_string()),
                    rating: Some(rating),
                    comment: None,
                }),
            )
            .await
            .unwrap_err();

            assert!(matches!(err, AppError::BadRequest(_)));
            assert_eq!(store.feedback_count(), 0);
        }
    }

    #[tokio::test]
    async fn author_comes_from_the_token() {
        let (store, state) = test_state();
        let Json(body) = create_feedback(
            State(state),
            caller(),
            Json(CreateFeedbackRequest {
                match_id: Some("m1".to_string()),
                rating: Some(5),
                comment: Some("great swap".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(body["feedback"]["author_id"], "u1");
        assert_eq!(body["feedback"]["rating"], 5);
        assert_eq!(store.feedback_count(), 1);
    }
}
