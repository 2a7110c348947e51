//! Domain logic for eco-habit tracking
//!
//! - `impact` - CO₂ and point values per action
//! - `accounts` - Registration and login
//! - `habits` - Habit logging with challenge progress
//! - `challenges` - Challenge progress, completion and seeding
//! - `ranking` - Community leaderboard
//! - `dashboard` - Per-user summary and weekly chart

pub mod accounts;
pub mod challenges;
pub mod dashboard;
pub mod error;
pub mod habits;
pub mod impact;
pub mod ranking;

pub use accounts::{AccountService, SessionIssuer};
pub use challenges::{ChallengeProgress, ChallengeService};
pub use dashboard::{Dashboard, DashboardService};
pub use error::DomainError;
pub use habits::{HabitAward, HabitService, NewHabitInput};
pub use ranking::{Leaderboard, RankingService};

/// Round a CO₂ amount to two decimals for display
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
