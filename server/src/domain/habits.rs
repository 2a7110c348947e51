//! Habit logging
//!
//! A habit is scored from the impact table, then persisted together with
//! the user's running totals and challenge progress in one transaction.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use super::error::{DomainError, UNAUTHORIZED_MESSAGE};
use super::impact;
use crate::core::constants::{DATE_FORMAT, MAX_ACTION_LENGTH, MAX_NOTES_LENGTH};
use crate::data::TransactionalService;
use crate::data::types::{HabitRecordResult, NewHabit};

const HABIT_FAILED: &str = "Error al registrar hábito.";

/// Caller-supplied habit fields
#[derive(Debug, Clone, Default)]
pub struct NewHabitInput {
    pub action: String,
    pub notes: Option<String>,
    /// `YYYY-MM-DD`; today (UTC) when absent or blank
    pub date: Option<String>,
}

/// What a single habit earned
#[derive(Debug, Clone, PartialEq)]
pub struct HabitAward {
    pub habit_id: i64,
    pub points: i64,
    pub co2: f64,
    pub challenges_progressed: u64,
}

pub struct HabitService {
    database: Arc<TransactionalService>,
}

impl HabitService {
    pub fn new(database: Arc<TransactionalService>) -> Self {
        Self { database }
    }

    /// Validate, score and persist a habit for `user_id`
    pub async fn register(
        &self,
        user_id: i64,
        input: NewHabitInput,
    ) -> Result<HabitAward, DomainError> {
        let habit = build_habit(user_id, input, Utc::now().date_naive())?;

        let result = self
            .database
            .repository()
            .record_habit(&habit)
            .await
            .map_err(|e| DomainError::from_data(e, HABIT_FAILED))?;

        match result {
            HabitRecordResult::Recorded {
                habit_id,
                challenges_progressed,
            } => {
                tracing::debug!(
                    user_id,
                    habit_id,
                    action = %habit.action,
                    challenges_progressed,
                    "Habit recorded"
                );
                Ok(HabitAward {
                    habit_id,
                    points: habit.points,
                    co2: habit.co2_impact,
                    challenges_progressed,
                })
            }
            HabitRecordResult::UserNotFound => {
                Err(DomainError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string()))
            }
        }
    }
}

fn build_habit(
    user_id: i64,
    input: NewHabitInput,
    today: NaiveDate,
) -> Result<NewHabit, DomainError> {
    let action = input.action.trim();
    if action.is_empty() {
        return Err(DomainError::Validation(
            "La acción ecológica es obligatoria.".to_string(),
        ));
    }
    if action.chars().count() > MAX_ACTION_LENGTH {
        return Err(DomainError::Validation(format!(
            "La acción ecológica no puede superar {} caracteres.",
            MAX_ACTION_LENGTH
        )));
    }

    let notes = input.notes.unwrap_or_default();
    if notes.chars().count() > MAX_NOTES_LENGTH {
        return Err(DomainError::Validation(format!(
            "Las notas no pueden superar {} caracteres.",
            MAX_NOTES_LENGTH
        )));
    }

    let date = match input.date.as_deref().map(str::trim) {
        None | Some("") => today,
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
            DomainError::Validation("La fecha debe tener el formato AAAA-MM-DD.".to_string())
        })?,
    };

    let scored = impact::lookup(action);
    Ok(NewHabit {
        user_id,
        action: action.to_string(),
        notes,
        co2_impact: scored.co2,
        points: scored.points,
        date: date.format(DATE_FORMAT).to_string(),
    })
}
