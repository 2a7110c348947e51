//! Repository traits for database backends
//!
//! Services talk to storage through `TransactionalRepository` so the domain
//! layer never depends on a concrete SQL dialect.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::types::{
    ChallengeProgressRow, CompletionResult, DailyTotalsRow, HabitRecordResult, NewChallenge,
    NewHabit, PersonalRankRow, RankingRow, UserCredentialsRow, UserRow,
};

/// Repository trait for transactional operations (users, habits, challenges, ranking)
///
/// Implemented by the SQLite backend.
#[async_trait]
pub trait TransactionalRepository: Send + Sync {
    // ==================== User Operations ====================

    /// Create a user; a taken email yields `DataError::Conflict`
    async fn create_user(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<UserRow, DataError>;

    async fn get_user(&self, id: i64) -> Result<Option<UserRow>, DataError>;

    async fn get_user_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentialsRow>, DataError>;

    async fn user_exists(&self, id: i64) -> Result<bool, DataError>;

    // ==================== Habit Operations ====================

    /// Append a habit, credit its owner and advance matching challenges atomically
    async fn record_habit(&self, habit: &NewHabit) -> Result<HabitRecordResult, DataError>;

    async fn count_habits(&self, user_id: i64) -> Result<i64, DataError>;

    async fn count_habits_by_action(&self, user_id: i64, action: &str)
    -> Result<i64, DataError>;

    /// Per-day sums over an inclusive `YYYY-MM-DD` range
    async fn daily_totals(
        &self,
        user_id: i64,
        from: &str,
        to: &str,
    ) -> Result<Vec<DailyTotalsRow>, DataError>;

    // ==================== Challenge Operations ====================

    async fn list_challenges_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<ChallengeProgressRow>, DataError>;

    /// Claim a challenge reward; at most one call per (user, challenge) succeeds
    async fn complete_challenge(
        &self,
        user_id: i64,
        challenge_id: i64,
    ) -> Result<CompletionResult, DataError>;

    async fn count_challenges(&self) -> Result<i64, DataError>;

    /// Insert challenge definitions when none exist yet
    async fn seed_challenges(&self, challenges: &[NewChallenge]) -> Result<u64, DataError>;

    // ==================== Ranking Operations ====================

    async fn top_users(&self, limit: i64) -> Result<Vec<RankingRow>, DataError>;

    async fn personal_rank(&self, user_id: i64) -> Result<Option<PersonalRankRow>, DataError>;
}
