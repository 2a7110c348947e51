//! Challenge API types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::ChallengeProgress;

/// A challenge together with the caller's progress
#[derive(Debug, Serialize, ToSchema)]
pub struct ChallengeDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub reward_points: i64,
    /// Habit action that advances this challenge
    pub target_type: String,
    pub target_value: i64,
    pub start_date: String,
    pub end_date: String,
    pub progress: i64,
    /// 1 once the reward was claimed, else 0
    pub completed: u8,
    /// 0-100
    pub percentage: u8,
}

impl From<ChallengeProgress> for ChallengeDto {
    fn from(p: ChallengeProgress) -> Self {
        let c = p.challenge;
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            reward_points: c.reward_points,
            target_type: c.target_type,
            target_value: c.target_value,
            start_date: c.start_date,
            end_date: c.end_date,
            progress: p.progress,
            completed: u8::from(p.completed),
            percentage: p.percentage,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompleteChallengeRequest {
    #[validate(range(min = 1, message = "challenge_id debe ser un entero positivo."))]
    pub challenge_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChallengeCompletedResponse {
    pub message: String,
    /// Reward points granted
    pub points: i64,
}
