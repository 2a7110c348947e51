//! Ranking queries for SQLite
//!
//! Users are ordered by points descending; ties fall back to the earliest
//! registered user so positions are stable between requests.

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::{PersonalRankRow, RankingRow};

/// Top `limit` users with 1-based positions
pub async fn top_users(pool: &SqlitePool, limit: i64) -> Result<Vec<RankingRow>, SqliteError> {
    let rows = sqlx::query_as::<_, (String, i64, f64)>(
        "SELECT username, points, co2_saved FROM users ORDER BY points DESC, id ASC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(i, (username, points, co2_saved))| RankingRow {
            position: i as i64 + 1,
            username,
            points,
            co2_saved,
        })
        .collect())
}

/// A user's position in the full ordering (not limited to the top list)
pub async fn personal_rank(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Option<PersonalRankRow>, SqliteError> {
    let row = sqlx::query_as::<_, (i64, String, i64)>(
        r#"
        SELECT position, username, points FROM (
            SELECT id, username, points,
                   ROW_NUMBER() OVER (ORDER BY points DESC, id ASC) AS position
            FROM users
        )
        WHERE id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(rank, username, points)| PersonalRankRow {
        rank,
        username,
        points,
    }))
}
