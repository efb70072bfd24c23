use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::store::SkillStore;

/// Shared router state. Both collaborators are constructed once in `main`
/// and injected here so tests can swap in doubles.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SkillStore>,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn SkillStore>, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { store, verifier }
    }
}
