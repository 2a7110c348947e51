//! Habit API types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::NewHabitInput;

/// Request body for logging a habit
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateHabitRequest {
    /// Action name, scored against the impact table
    #[serde(default)]
    pub action: String,

    #[serde(default)]
    pub notes: Option<String>,

    /// `YYYY-MM-DD`, today when omitted
    #[serde(default)]
    #[validate(length(max = 10, message = "La fecha debe tener el formato AAAA-MM-DD."))]
    pub date: Option<String>,
}

impl From<CreateHabitRequest> for NewHabitInput {
    fn from(req: CreateHabitRequest) -> Self {
        Self {
            action: req.action,
            notes: req.notes,
            date: req.date,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HabitCreatedResponse {
    pub message: &'static str,
    /// Points credited for this habit
    pub points: i64,
    /// CO2 (kg) saved by this habit
    pub co2: f64,
}
