pub mod models;
pub mod store;
pub mod auth;
pub mod matching;
pub mod handlers;
pub mod router;
pub mod state;
pub mod error;
pub mod utils;
pub mod constants;

pub use error::AppError;
pub use state::AppState;
pub use utils::config::Config;

// Re-export common types
pub use anyhow::Result;
pub use chrono::{DateTime, Utc};
pub use uuid::Uuid;
