//! Ranking API types

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Leaderboard;
use crate::domain::ranking::{PersonalRank, RankingEntry};

#[derive(Debug, Serialize, ToSchema)]
pub struct RankingEntryDto {
    /// 1-based
    pub position: i64,
    pub username: String,
    pub points: i64,
    pub co2_saved: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PersonalRankDto {
    pub rank: i64,
    pub username: String,
    pub points: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RankingResponse {
    pub ranking: Vec<RankingEntryDto>,
    pub personal_rank: Option<PersonalRankDto>,
}

impl From<RankingEntry> for RankingEntryDto {
    fn from(e: RankingEntry) -> Self {
        Self {
            position: e.position,
            username: e.username,
            points: e.points,
            co2_saved: e.co2_saved,
        }
    }
}

impl From<PersonalRank> for PersonalRankDto {
    fn from(r: PersonalRank) -> Self {
        Self {
            rank: r.rank,
            username: r.username,
            points: r.points,
        }
    }
}

impl From<Leaderboard> for RankingResponse {
    fn from(board: Leaderboard) -> Self {
        Self {
            ranking: board.ranking.into_iter().map(Into::into).collect(),
            personal_rank: board.personal_rank.map(Into::into),
        }
    }
}
