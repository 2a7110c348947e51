//! SQLite repositories
//!
//! Types (UserRow, ChallengeRow, etc.) should be imported from `crate::data::types`.

pub mod challenge;
pub mod habit;
pub mod ranking;
pub mod user;

pub use challenge::{complete_challenge, count_challenges, list_for_user, seed_challenges};
pub use habit::{count_habits, count_habits_by_action, daily_totals, record_habit};
pub use ranking::{personal_rank, top_users};
pub use user::{create_user, get_credentials_by_email, get_user, user_exists};
