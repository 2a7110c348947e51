//! Shared data types for the transactional store
//!
//! Row types returned by repository operations and the outcome enums for
//! multi-step writes.

mod transactional;

pub use transactional::{
    ChallengeProgressRow, ChallengeRow, CompletionResult, DailyTotalsRow, HabitRecordResult,
    NewChallenge, NewHabit, PersonalRankRow, RankingRow, UserCredentialsRow, UserRow,
};
