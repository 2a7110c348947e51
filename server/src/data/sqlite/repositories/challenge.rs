//! Challenge repository for SQLite operations
//!
//! Reward claims use a guarded conditional update so that two concurrent
//! completions can never both award points.

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::{ChallengeProgressRow, ChallengeRow, CompletionResult, NewChallenge};

type ChallengeProgressTuple = (i64, String, String, i64, String, i64, String, String, i64, bool);

/// List every challenge with the caller's progress, ordered by id
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<ChallengeProgressRow>, SqliteError> {
    let rows = sqlx::query_as::<_, ChallengeProgressTuple>(
        r#"
        SELECT c.id, c.title, c.description, c.reward_points, c.target_type, c.target_value,
               c.start_date, c.end_date,
               COALESCE(uc.progress_value, 0), COALESCE(uc.completed, 0)
        FROM challenges c
        LEFT JOIN user_challenges uc ON uc.challenge_id = c.id AND uc.user_id = ?
        ORDER BY c.id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(
            |(
                id,
                title,
                description,
                reward_points,
                target_type,
                target_value,
                start_date,
                end_date,
                progress,
                completed,
            )| ChallengeProgressRow {
                challenge: ChallengeRow {
                    id,
                    title,
                    description,
                    reward_points,
                    target_type,
                    target_value,
                    start_date,
                    end_date,
                },
                progress,
                completed,
            },
        )
        .collect())
}

/// Mark a challenge completed and award its reward, at most once
///
/// The write happens first and only succeeds when the row exists, is not
/// yet completed and has reached the target. When nothing was updated the
/// reason is diagnosed inside the same transaction.
pub async fn complete_challenge(
    pool: &SqlitePool,
    user_id: i64,
    challenge_id: i64,
) -> Result<CompletionResult, SqliteError> {
    let mut tx = pool.begin().await?;

    let claimed = sqlx::query(
        r#"
        UPDATE user_challenges SET completed = 1
        WHERE user_id = ? AND challenge_id = ? AND completed = 0
          AND progress_value >= (SELECT target_value FROM challenges WHERE id = ?)
        "#,
    )
    .bind(user_id)
    .bind(challenge_id)
    .bind(challenge_id)
    .execute(&mut *tx)
    .await?;

    let challenge = sqlx::query_as::<_, (i64, i64)>(
        "SELECT reward_points, target_value FROM challenges WHERE id = ?",
    )
    .bind(challenge_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some((reward, target)) = challenge else {
        return Ok(CompletionResult::ChallengeNotFound);
    };

    if claimed.rows_affected() == 1 {
        sqlx::query("UPDATE users SET points = points + ? WHERE id = ?")
            .bind(reward)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        return Ok(CompletionResult::Completed { reward });
    }

    let state = sqlx::query_as::<_, (i64, bool)>(
        "SELECT progress_value, completed FROM user_challenges WHERE user_id = ? AND challenge_id = ?",
    )
    .bind(user_id)
    .bind(challenge_id)
    .fetch_optional(&mut *tx)
    .await?;

    Ok(match state {
        Some((_, true)) => CompletionResult::AlreadyCompleted,
        Some((progress, false)) => CompletionResult::NotReached { progress, target },
        None => CompletionResult::NotReached {
            progress: 0,
            target,
        },
    })
}

/// Count challenge definitions
pub async fn count_challenges(pool: &SqlitePool) -> Result<i64, SqliteError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM challenges")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Insert the given challenges when the table is empty
///
/// Returns the number of rows inserted (zero when challenges already exist).
pub async fn seed_challenges(
    pool: &SqlitePool,
    challenges: &[NewChallenge],
) -> Result<u64, SqliteError> {
    if let Some(bad) = challenges.iter().find(|c| c.target_value <= 0) {
        return Err(SqliteError::InvalidData(format!(
            "challenge '{}' has non-positive target {}",
            bad.title, bad.target_value
        )));
    }

    let mut tx = pool.begin().await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM challenges")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        return Ok(0);
    }

    for c in challenges {
        sqlx::query(
            r#"
            INSERT INTO challenges (title, description, reward_points, target_type, target_value, start_date, end_date)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&c.title)
        .bind(&c.description)
        .bind(c.reward_points)
        .bind(&c.target_type)
        .bind(c.target_value)
        .bind(&c.start_date)
        .bind(&c.end_date)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(challenges.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::AppStorage;
    use crate::data::sqlite::SqliteService;
    use crate::data::sqlite::repositories::{habit, user};
    use crate::data::types::NewHabit;

    async fn setup_test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    fn challenge(title: &str, target_type: &str, target: i64, reward: i64) -> NewChallenge {
        NewChallenge {
            title: title.to_string(),
            description: String::new(),
            reward_points: reward,
            target_type: target_type.to_string(),
            target_value: target,
            start_date: "2026-03-01".to_string(),
            end_date: "2026-03-08".to_string(),
        }
    }

    async fn log(pool: &SqlitePool, user_id: i64, action: &str) {
        habit::record_habit(
            pool,
            &NewHabit {
                user_id,
                action: action.to_string(),
                notes: String::new(),
                co2_impact: 2.5,
                points: 20,
                date: "2026-03-02".to_string(),
            },
        )
        .await
        .unwrap();
    }

    async fn points(pool: &SqlitePool, user_id: i64) -> i64 {
        user::get_user(pool, user_id).await.unwrap().unwrap().points
    }

    #[tokio::test]
    async fn test_seed_only_when_empty() {
        let pool = setup_test_pool().await;
        let defs = vec![
            challenge("Bici", "Usar bicicleta", 3, 50),
            challenge("Recicla", "Reciclar plástico", 5, 30),
        ];

        assert_eq!(seed_challenges(&pool, &defs).await.unwrap(), 2);
        assert_eq!(seed_challenges(&pool, &defs).await.unwrap(), 0);
        assert_eq!(count_challenges(&pool).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_seed_rejects_non_positive_target() {
        let pool = setup_test_pool().await;
        let result = seed_challenges(&pool, &[challenge("Bad", "Usar bicicleta", 0, 10)]).await;

        assert!(matches!(result, Err(SqliteError::InvalidData(_))));
        assert_eq!(count_challenges(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_for_user_defaults_missing_progress() {
        let pool = setup_test_pool().await;
        seed_challenges(&pool, &[challenge("Bici", "Usar bicicleta", 3, 50)])
            .await
            .unwrap();
        let u = user::create_user(&pool, "a@x.io", "a", "h").await.unwrap();

        let rows = list_for_user(&pool, u.id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].progress, 0);
        assert!(!rows[0].completed);

        log(&pool, u.id, "Usar bicicleta").await;
        let rows = list_for_user(&pool, u.id).await.unwrap();
        assert_eq!(rows[0].progress, 1);
    }

    #[tokio::test]
    async fn test_complete_challenge_flow() {
        let pool = setup_test_pool().await;
        seed_challenges(&pool, &[challenge("Bici", "Usar bicicleta", 3, 50)])
            .await
            .unwrap();
        let u = user::create_user(&pool, "a@x.io", "a", "h").await.unwrap();

        for _ in 0..2 {
            log(&pool, u.id, "Usar bicicleta").await;
        }
        assert_eq!(
            complete_challenge(&pool, u.id, 1).await.unwrap(),
            CompletionResult::NotReached {
                progress: 2,
                target: 3
            }
        );

        log(&pool, u.id, "Usar bicicleta").await;
        assert_eq!(points(&pool, u.id).await, 60);
        assert_eq!(
            complete_challenge(&pool, u.id, 1).await.unwrap(),
            CompletionResult::Completed { reward: 50 }
        );
        assert_eq!(points(&pool, u.id).await, 110);

        assert_eq!(
            complete_challenge(&pool, u.id, 1).await.unwrap(),
            CompletionResult::AlreadyCompleted
        );
        assert_eq!(points(&pool, u.id).await, 110);
    }

    #[tokio::test]
    async fn test_complete_challenge_missing_cases() {
        let pool = setup_test_pool().await;
        seed_challenges(&pool, &[challenge("Bici", "Usar bicicleta", 3, 50)])
            .await
            .unwrap();
        let u = user::create_user(&pool, "a@x.io", "a", "h").await.unwrap();

        assert_eq!(
            complete_challenge(&pool, u.id, 99).await.unwrap(),
            CompletionResult::ChallengeNotFound
        );
        assert_eq!(
            complete_challenge(&pool, u.id, 1).await.unwrap(),
            CompletionResult::NotReached {
                progress: 0,
                target: 3
            }
        );
    }

    #[tokio::test]
    async fn test_progress_beyond_target_still_completes() {
        let pool = setup_test_pool().await;
        seed_challenges(&pool, &[challenge("Bici", "Usar bicicleta", 1, 10)])
            .await
            .unwrap();
        let u = user::create_user(&pool, "a@x.io", "a", "h").await.unwrap();

        for _ in 0..3 {
            log(&pool, u.id, "Usar bicicleta").await;
        }
        assert_eq!(
            complete_challenge(&pool, u.id, 1).await.unwrap(),
            CompletionResult::Completed { reward: 10 }
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_habits_and_completions_on_wal_pool() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("sqlite")).unwrap();
        let storage = AppStorage::init_for_test(temp_dir.path().to_path_buf());
        let service = SqliteService::init(&storage).await.unwrap();
        let pool = service.pool().clone();

        seed_challenges(&pool, &[challenge("Bici", "Usar bicicleta", 20, 50)])
            .await
            .unwrap();
        let u = user::create_user(&pool, "a@x.io", "a", "h").await.unwrap();

        let habits: Vec<_> = (0..20)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(async move { log(&pool, u.id, "Usar bicicleta").await })
            })
            .collect();
        for handle in habits {
            handle.await.unwrap();
        }

        let (rows, progress): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(progress_value), 0) FROM user_challenges WHERE user_id = ?",
        )
        .bind(u.id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!((rows, progress), (1, 20));

        let completions: Vec<_> = (0..20)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(async move { complete_challenge(&pool, u.id, 1).await.unwrap() })
            })
            .collect();
        let mut completed = 0;
        let mut already = 0;
        for handle in completions {
            match handle.await.unwrap() {
                CompletionResult::Completed { reward } => {
                    assert_eq!(reward, 50);
                    completed += 1;
                }
                CompletionResult::AlreadyCompleted => already += 1,
                other => panic!("unexpected completion result: {other:?}"),
            }
        }
        assert_eq!((completed, already), (1, 19));
        assert_eq!(points(&pool, u.id).await, 20 * 20 + 50);

        service.close().await;
    }
}
