//! Transactional row types
//!
//! This module contains the row types read from and written to the relational store.

use serde::{Deserialize, Serialize};

// ============================================================================
// User types
// ============================================================================

/// User row from database (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub points: i64,
    pub co2_saved: f64,
    pub created_at: i64,
}

/// Minimal projection used to verify a login
#[derive(Debug, Clone)]
pub struct UserCredentialsRow {
    pub id: i64,
    pub password_hash: String,
}

// ============================================================================
// Habit types
// ============================================================================

/// A habit entry ready to be persisted
#[derive(Debug, Clone)]
pub struct NewHabit {
    pub user_id: i64,
    pub action: String,
    pub notes: String,
    pub co2_impact: f64,
    pub points: i64,
    /// Calendar day in `YYYY-MM-DD`
    pub date: String,
}

/// Result of recording a habit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitRecordResult {
    Recorded {
        habit_id: i64,
        /// Number of challenges whose progress moved
        challenges_progressed: u64,
    },
    UserNotFound,
}

/// Per-day sums of a user's habits
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotalsRow {
    pub date: String,
    pub co2: f64,
    pub points: i64,
}

// ============================================================================
// Challenge types
// ============================================================================

/// Challenge row from database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub reward_points: i64,
    pub target_type: String,
    pub target_value: i64,
    pub start_date: String,
    pub end_date: String,
}

/// Challenge joined with the caller's progress (zero / false when absent)
#[derive(Debug, Clone)]
pub struct ChallengeProgressRow {
    pub challenge: ChallengeRow,
    pub progress: i64,
    pub completed: bool,
}

/// Challenge definition used for seeding
#[derive(Debug, Clone)]
pub struct NewChallenge {
    pub title: String,
    pub description: String,
    pub reward_points: i64,
    pub target_type: String,
    pub target_value: i64,
    pub start_date: String,
    pub end_date: String,
}

/// Result of an attempt to claim a challenge reward
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    Completed { reward: i64 },
    ChallengeNotFound,
    NotReached { progress: i64, target: i64 },
    AlreadyCompleted,
}

// ============================================================================
// Ranking types
// ============================================================================

/// Leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingRow {
    pub position: i64,
    pub username: String,
    pub points: i64,
    pub co2_saved: f64,
}

/// Caller's own position in the full ordering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalRankRow {
    pub rank: i64,
    pub username: String,
    pub points: i64,
}
