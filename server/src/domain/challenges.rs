//! Challenge progress, completion and seeding
//!
//! Progress moves with habit registration; completion is an explicit call
//! that grants the reward once the target is reached.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use super::error::DomainError;
use crate::core::constants::{CHALLENGE_WINDOW_DAYS, DATE_FORMAT};
use crate::data::TransactionalService;
use crate::data::types::{ChallengeRow, CompletionResult, NewChallenge};

const LIST_FAILED: &str = "Error al obtener los retos.";
const COMPLETE_FAILED: &str = "Error al completar el reto.";
const SEED_FAILED: &str = "Error al crear los retos iniciales.";

/// A challenge as seen by one user
#[derive(Debug, Clone)]
pub struct ChallengeProgress {
    pub challenge: ChallengeRow,
    pub progress: i64,
    pub completed: bool,
    pub percentage: u8,
}

/// Whole-percent progress towards `target`, capped at 100
///
/// A non-positive target means the challenge definition is broken.
pub fn percentage(progress: i64, target: i64) -> Result<u8, DomainError> {
    if target <= 0 {
        return Err(DomainError::Internal(format!(
            "Reto mal configurado: objetivo {} no válido.",
            target
        )));
    }
    let pct = progress.max(0).saturating_mul(100) / target;
    Ok(pct.min(100) as u8)
}

/// Success message shown after claiming a reward
pub fn completion_message(reward: i64) -> String {
    format!("¡Reto completado! Has ganado {} puntos verdes.", reward)
}

/// Challenges created on first start, running for a week from `today`
pub fn default_challenges(today: NaiveDate) -> Vec<NewChallenge> {
    let start = today.format(DATE_FORMAT).to_string();
    let end = (today + Duration::days(CHALLENGE_WINDOW_DAYS))
        .format(DATE_FORMAT)
        .to_string();

    [
        (
            "Recicla 3 veces esta semana",
            "Registra 3 acciones de reciclaje.",
            50,
            "Reciclar plástico",
            3,
        ),
        (
            "Transporte ecológico x5",
            "Usa transporte no contaminante (bici/caminata) 5 días.",
            80,
            "Usar bicicleta",
            5,
        ),
        (
            "Compra Local",
            "Registra 2 compras a granel o locales.",
            30,
            "Comprar a granel",
            2,
        ),
    ]
    .into_iter()
    .map(
        |(title, description, reward_points, target_type, target_value)| NewChallenge {
            title: title.to_string(),
            description: description.to_string(),
            reward_points,
            target_type: target_type.to_string(),
            target_value,
            start_date: start.clone(),
            end_date: end.clone(),
        },
    )
    .collect()
}

pub struct ChallengeService {
    database: Arc<TransactionalService>,
}

impl ChallengeService {
    pub fn new(database: Arc<TransactionalService>) -> Self {
        Self { database }
    }

    /// Every challenge with the user's progress and percentage
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<ChallengeProgress>, DomainError> {
        let rows = self
            .database
            .repository()
            .list_challenges_for_user(user_id)
            .await
            .map_err(|e| DomainError::from_data(e, LIST_FAILED))?;

        rows.into_iter()
            .map(|row| {
                let percentage = percentage(row.progress, row.challenge.target_value)
                    .inspect_err(|e| {
                        tracing::error!(
                            challenge_id = row.challenge.id,
                            error = %e,
                            "Invalid challenge target"
                        );
                    })?;
                Ok(ChallengeProgress {
                    challenge: row.challenge,
                    progress: row.progress,
                    completed: row.completed,
                    percentage,
                })
            })
            .collect()
    }

    /// Claim the reward of a challenge; returns the points granted
    pub async fn complete(&self, user_id: i64, challenge_id: i64) -> Result<i64, DomainError> {
        let result = self
            .database
            .repository()
            .complete_challenge(user_id, challenge_id)
            .await
            .map_err(|e| DomainError::from_data(e, COMPLETE_FAILED))?;

        match result {
            CompletionResult::Completed { reward } => {
                tracing::info!(user_id, challenge_id, reward, "Challenge completed");
                Ok(reward)
            }
            CompletionResult::ChallengeNotFound => {
                Err(DomainError::NotFound("Reto no encontrado.".to_string()))
            }
            CompletionResult::NotReached { progress, target } => {
                tracing::debug!(
                    user_id,
                    challenge_id,
                    progress,
                    target,
                    "Challenge target not reached"
                );
                Err(DomainError::PreconditionFailed(
                    "Aún no has completado el objetivo de este reto.".to_string(),
                ))
            }
            CompletionResult::AlreadyCompleted => Err(DomainError::AlreadyCompleted(
                "Este reto ya ha sido completado y la recompensa otorgada.".to_string(),
            )),
        }
    }

    /// Insert the default challenges if none exist; returns how many were added
    pub async fn seed_defaults(&self, today: NaiveDate) -> Result<u64, DomainError> {
        let inserted = self
            .database
            .repository()
            .seed_challenges(&default_challenges(today))
            .await
            .map_err(|e| DomainError::from_data(e, SEED_FAILED))?;

        if inserted > 0 {
            tracing::info!(count = inserted, "Seeded default challenges");
        }
        Ok(inserted)
    }

    /// Number of challenge definitions
    pub async fn count(&self) -> Result<i64, DomainError> {
        self.database
            .repository()
            .count_challenges()
            .await
            .map_err(|e| DomainError::from_data(e, LIST_FAILED))
    }
}
