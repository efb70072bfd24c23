pub mod feedback;
pub mod matches;

pub use feedback::create_feedback;
pub use matches::{accept_match, create_match, get_matches, list_user_matches, reject_match};
