//! Habit repository for SQLite operations
//!
//! Recording a habit touches three tables (habits, users, user_challenges)
//! and always runs in a single transaction.

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::{DailyTotalsRow, HabitRecordResult, NewHabit};

/// Append a habit, credit the user and advance matching challenges atomically
///
/// Every challenge whose `target_type` equals the habit's action gains one
/// unit of progress. Challenges the user already completed are left alone.
pub async fn record_habit(
    pool: &SqlitePool,
    habit: &NewHabit,
) -> Result<HabitRecordResult, SqliteError> {
    let now = chrono::Utc::now().timestamp();
    let mut tx = pool.begin().await?;

    let credited = sqlx::query(
        "UPDATE users SET points = points + ?, co2_saved = co2_saved + ? WHERE id = ?",
    )
    .bind(habit.points)
    .bind(habit.co2_impact)
    .bind(habit.user_id)
    .execute(&mut *tx)
    .await?;

    if credited.rows_affected() == 0 {
        return Ok(HabitRecordResult::UserNotFound);
    }

    let inserted = sqlx::query(
        r#"
        INSERT INTO habits (user_id, action, notes, co2_impact, points_awarded, date, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(habit.user_id)
    .bind(&habit.action)
    .bind(&habit.notes)
    .bind(habit.co2_impact)
    .bind(habit.points)
    .bind(&habit.date)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    let progressed = sqlx::query(
        r#"
        INSERT INTO user_challenges (user_id, challenge_id, progress_value, completed)
        SELECT ?, id, 1, 0 FROM challenges WHERE target_type = ?
        ON CONFLICT(user_id, challenge_id) DO UPDATE SET
            progress_value = progress_value + 1
        WHERE completed = 0
        "#,
    )
    .bind(habit.user_id)
    .bind(&habit.action)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(HabitRecordResult::Recorded {
        habit_id: inserted.last_insert_rowid(),
        challenges_progressed: progressed.rows_affected(),
    })
}

/// Count all habits a user has logged
pub async fn count_habits(pool: &SqlitePool, user_id: i64) -> Result<i64, SqliteError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM habits WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Count a user's habits for one action label
pub async fn count_habits_by_action(
    pool: &SqlitePool,
    user_id: i64,
    action: &str,
) -> Result<i64, SqliteError> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM habits WHERE user_id = ? AND action = ?")
            .bind(user_id)
            .bind(action)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Per-day CO₂ and point sums for `from..=to` (inclusive, `YYYY-MM-DD`)
///
/// Days without habits are absent from the result.
pub async fn daily_totals(
    pool: &SqlitePool,
    user_id: i64,
    from: &str,
    to: &str,
) -> Result<Vec<DailyTotalsRow>, SqliteError> {
    let rows = sqlx::query_as::<_, (String, f64, i64)>(
        r#"
        SELECT date, COALESCE(SUM(co2_impact), 0.0), COALESCE(SUM(points_awarded), 0)
        FROM habits
        WHERE user_id = ? AND date >= ? AND date <= ?
        GROUP BY date
        ORDER BY date ASC
        "#,
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(date, co2, points)| DailyTotalsRow { date, co2, points })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::repositories::user;

    async fn setup_test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    async fn insert_challenge(pool: &SqlitePool, target_type: &str, target: i64) -> i64 {
        sqlx::query(
            "INSERT INTO challenges (title, description, reward_points, target_type, target_value, start_date, end_date) VALUES ('c', '', 50, ?, ?, '2026-01-01', '2026-01-08')",
        )
        .bind(target_type)
        .bind(target)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    fn habit(user_id: i64, action: &str, date: &str) -> NewHabit {
        NewHabit {
            user_id,
            action: action.to_string(),
            notes: String::new(),
            co2_impact: 2.5,
            points: 20,
            date: date.to_string(),
        }
    }

    async fn progress(pool: &SqlitePool, user_id: i64, challenge_id: i64) -> Option<(i64, bool)> {
        sqlx::query_as::<_, (i64, bool)>(
            "SELECT progress_value, completed FROM user_challenges WHERE user_id = ? AND challenge_id = ?",
        )
        .bind(user_id)
        .bind(challenge_id)
        .fetch_optional(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_record_habit_credits_user() {
        let pool = setup_test_pool().await;
        let u = user::create_user(&pool, "a@x.io", "a", "h").await.unwrap();

        let result = record_habit(&pool, &habit(u.id, "Usar bicicleta", "2026-03-01"))
            .await
            .unwrap();
        assert!(matches!(
            result,
            HabitRecordResult::Recorded {
                challenges_progressed: 0,
                ..
            }
        ));

        let u = user::get_user(&pool, u.id).await.unwrap().unwrap();
        assert_eq!(u.points, 20);
        assert!((u.co2_saved - 2.5).abs() < 1e-9);
        assert_eq!(count_habits(&pool, u.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_record_habit_unknown_user_writes_nothing() {
        let pool = setup_test_pool().await;

        let result = record_habit(&pool, &habit(42, "Usar bicicleta", "2026-03-01"))
            .await
            .unwrap();
        assert_eq!(result, HabitRecordResult::UserNotFound);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM habits")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_record_habit_failed_progress_write_rolls_back() {
        let pool = setup_test_pool().await;
        let u = user::create_user(&pool, "a@x.io", "a", "h").await.unwrap();
        insert_challenge(&pool, "Usar bicicleta", 3).await;
        sqlx::query(
            "CREATE TRIGGER block_progress BEFORE INSERT ON user_challenges BEGIN SELECT RAISE(ABORT, 'blocked'); END",
        )
        .execute(&pool)
        .await
        .unwrap();

        let result = record_habit(&pool, &habit(u.id, "Usar bicicleta", "2026-03-01")).await;
        assert!(result.is_err());

        let u = user::get_user(&pool, u.id).await.unwrap().unwrap();
        assert_eq!(u.points, 0);
        assert!(u.co2_saved.abs() < 1e-9);
        assert_eq!(count_habits(&pool, u.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_record_habit_advances_matching_challenges_only() {
        let pool = setup_test_pool().await;
        let u = user::create_user(&pool, "a@x.io", "a", "h").await.unwrap();
        let bike = insert_challenge(&pool, "Usar bicicleta", 3).await;
        let recycle = insert_challenge(&pool, "Reciclar plástico", 5).await;

        for _ in 0..2 {
            record_habit(&pool, &habit(u.id, "Usar bicicleta", "2026-03-01"))
                .await
                .unwrap();
        }

        assert_eq!(progress(&pool, u.id, bike).await, Some((2, false)));
        assert_eq!(progress(&pool, u.id, recycle).await, None);
    }

    #[tokio::test]
    async fn test_record_habit_keeps_completed_progress_frozen() {
        let pool = setup_test_pool().await;
        let u = user::create_user(&pool, "a@x.io", "a", "h").await.unwrap();
        let bike = insert_challenge(&pool, "Usar bicicleta", 1).await;

        sqlx::query(
            "INSERT INTO user_challenges (user_id, challenge_id, progress_value, completed) VALUES (?, ?, 1, 1)",
        )
        .bind(u.id)
        .bind(bike)
        .execute(&pool)
        .await
        .unwrap();

        let result = record_habit(&pool, &habit(u.id, "Usar bicicleta", "2026-03-01"))
            .await
            .unwrap();
        assert!(matches!(
            result,
            HabitRecordResult::Recorded {
                challenges_progressed: 0,
                ..
            }
        ));
        assert_eq!(progress(&pool, u.id, bike).await, Some((1, true)));
    }

    #[tokio::test]
    async fn test_daily_totals_groups_by_date() {
        let pool = setup_test_pool().await;
        let u = user::create_user(&pool, "a@x.io", "a", "h").await.unwrap();

        for date in ["2026-03-01", "2026-03-01", "2026-03-03", "2026-02-01"] {
            record_habit(&pool, &habit(u.id, "Reciclar plástico", date))
                .await
                .unwrap();
        }

        let totals = daily_totals(&pool, u.id, "2026-02-25", "2026-03-03")
            .await
            .unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].date, "2026-03-01");
        assert_eq!(totals[0].points, 40);
        assert!((totals[0].co2 - 5.0).abs() < 1e-9);
        assert_eq!(totals[1].date, "2026-03-03");

        assert_eq!(
            count_habits_by_action(&pool, u.id, "Reciclar plástico")
                .await
                .unwrap(),
            4
        );
        assert_eq!(
            count_habits_by_action(&pool, u.id, "Usar bicicleta")
                .await
                .unwrap(),
            0
        );
    }
}
