//! Community leaderboard

use std::sync::Arc;

use super::error::DomainError;
use super::round2;
use crate::core::constants::RANKING_LIMIT;
use crate::data::TransactionalService;

const RANKING_FAILED: &str = "Error al obtener el ranking.";

/// One leaderboard row, 1-based position
#[derive(Debug, Clone, PartialEq)]
pub struct RankingEntry {
    pub position: i64,
    pub username: String,
    pub points: i64,
    pub co2_saved: f64,
}

/// The caller's rank across all users
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalRank {
    pub rank: i64,
    pub username: String,
    pub points: i64,
}

/// Top users plus the caller's own standing
#[derive(Debug, Clone)]
pub struct Leaderboard {
    pub ranking: Vec<RankingEntry>,
    pub personal_rank: Option<PersonalRank>,
}

pub struct RankingService {
    database: Arc<TransactionalService>,
}

impl RankingService {
    pub fn new(database: Arc<TransactionalService>) -> Self {
        Self { database }
    }

    /// Top users by points, and where `user_id` stands among everyone
    pub async fn leaderboard(&self, user_id: i64) -> Result<Leaderboard, DomainError> {
        let repo = self.database.repository();

        let ranking = repo
            .top_users(RANKING_LIMIT)
            .await
            .map_err(|e| DomainError::from_data(e, RANKING_FAILED))?
            .into_iter()
            .map(|row| RankingEntry {
                position: row.position,
                username: row.username,
                points: row.points,
                co2_saved: round2(row.co2_saved),
            })
            .collect();

        let personal_rank = repo
            .personal_rank(user_id)
            .await
            .map_err(|e| DomainError::from_data(e, RANKING_FAILED))?
            .map(|row| PersonalRank {
                rank: row.rank,
                username: row.username,
                points: row.points,
            });

        Ok(Leaderboard {
            ranking,
            personal_rank,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::habits::{HabitService, NewHabitInput};

    #[tokio::test]
    async fn test_leaderboard_matches_personal_rank() {
        let database = TransactionalService::in_memory().await;
        let repo = database.repository();
        let habits = HabitService::new(database.clone());

        let mut ids = Vec::new();
        for (name, bikes) in [("ana", 1), ("ben", 3), ("cai", 0)] {
            let user = repo
                .create_user(&format!("{name}@b.com"), name, "h")
                .await
                .unwrap();
            for _ in 0..bikes {
                habits
                    .register(
                        user.id,
                        NewHabitInput {
                            action: "Usar bicicleta".to_string(),
                            ..Default::default()
                        },
                    )
                    .await
                    .unwrap();
            }
            ids.push(user.id);
        }

        let board = RankingService::new(database.clone())
            .leaderboard(ids[0])
            .await
            .unwrap();

        let names: Vec<_> = board.ranking.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, vec!["ben", "ana", "cai"]);
        assert_eq!(board.ranking[0].points, 75);
        assert_eq!(board.ranking[0].co2_saved, 4.5);
        assert_eq!(
            board.personal_rank,
            Some(PersonalRank {
                rank: 2,
                username: "ana".to_string(),
                points: 25,
            })
        );
    }

    #[tokio::test]
    async fn test_leaderboard_unknown_caller_has_no_rank() {
        let database = TransactionalService::in_memory().await;
        let board = RankingService::new(database).leaderboard(7).await.unwrap();
        assert!(board.ranking.is_empty());
        assert!(board.personal_rank.is_none());
    }
}
