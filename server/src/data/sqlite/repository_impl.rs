//! TransactionalRepository trait implementation for SQLite
//!
//! This module implements the TransactionalRepository trait for Arc<SqliteService>,
//! delegating to the free functions in `repositories`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::traits::TransactionalRepository;
use crate::data::types::{
    ChallengeProgressRow, CompletionResult, DailyTotalsRow, HabitRecordResult, NewChallenge,
    NewHabit, PersonalRankRow, RankingRow, UserCredentialsRow, UserRow,
};

use super::SqliteService;
use super::repositories::{challenge, habit, ranking, user};

#[async_trait]
impl TransactionalRepository for Arc<SqliteService> {
    // ==================== User Operations ====================

    async fn create_user(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<UserRow, DataError> {
        user::create_user(self.pool(), email, username, password_hash)
            .await
            .map_err(Into::into)
    }

    async fn get_user(&self, id: i64) -> Result<Option<UserRow>, DataError> {
        user::get_user(self.pool(), id).await.map_err(Into::into)
    }

    async fn get_user_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentialsRow>, DataError> {
        user::get_credentials_by_email(self.pool(), email)
            .await
            .map_err(Into::into)
    }

    async fn user_exists(&self, id: i64) -> Result<bool, DataError> {
        user::user_exists(self.pool(), id).await.map_err(Into::into)
    }

    // ==================== Habit Operations ====================

    async fn record_habit(&self, new_habit: &NewHabit) -> Result<HabitRecordResult, DataError> {
        habit::record_habit(self.pool(), new_habit)
            .await
            .map_err(Into::into)
    }

    async fn count_habits(&self, user_id: i64) -> Result<i64, DataError> {
        habit::count_habits(self.pool(), user_id)
            .await
            .map_err(Into::into)
    }

    async fn count_habits_by_action(
        &self,
        user_id: i64,
        action: &str,
    ) -> Result<i64, DataError> {
        habit::count_habits_by_action(self.pool(), user_id, action)
            .await
            .map_err(Into::into)
    }

    async fn daily_totals(
        &self,
        user_id: i64,
        from: &str,
        to: &str,
    ) -> Result<Vec<DailyTotalsRow>, DataError> {
        habit::daily_totals(self.pool(), user_id, from, to)
            .await
            .map_err(Into::into)
    }

    // ==================== Challenge Operations ====================

    async fn list_challenges_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<ChallengeProgressRow>, DataError> {
        challenge::list_for_user(self.pool(), user_id)
            .await
            .map_err(Into::into)
    }

    async fn complete_challenge(
        &self,
        user_id: i64,
        challenge_id: i64,
    ) -> Result<CompletionResult, DataError> {
        challenge::complete_challenge(self.pool(), user_id, challenge_id)
            .await
            .map_err(Into::into)
    }

    async fn count_challenges(&self) -> Result<i64, DataError> {
        challenge::count_challenges(self.pool())
            .await
            .map_err(Into::into)
    }

    async fn seed_challenges(&self, challenges: &[NewChallenge]) -> Result<u64, DataError> {
        challenge::seed_challenges(self.pool(), challenges)
            .await
            .map_err(Into::into)
    }

    // ==================== Ranking Operations ====================

    async fn top_users(&self, limit: i64) -> Result<Vec<RankingRow>, DataError> {
        ranking::top_users(self.pool(), limit)
            .await
            .map_err(Into::into)
    }

    async fn personal_rank(&self, user_id: i64) -> Result<Option<PersonalRankRow>, DataError> {
        ranking::personal_rank(self.pool(), user_id)
            .await
            .map_err(Into::into)
    }
}
