//! Per-user dashboard: totals, last-week chart and badges

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};

use super::error::{DomainError, UNAUTHORIZED_MESSAGE};
use super::round2;
use crate::core::constants::{DATE_FORMAT, PROGRESS_CHART_DAYS};
use crate::data::TransactionalService;

const DASHBOARD_FAILED: &str = "Error al cargar el panel.";

/// Profile fields shown on the dashboard header
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardUser {
    pub username: String,
    pub email: String,
    pub points: i64,
    pub co2_saved: f64,
}

/// Lifetime totals for the caller
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub actions: i64,
    pub points: i64,
    pub co2_saved: f64,
}

/// One bar of the weekly chart
#[derive(Debug, Clone, PartialEq)]
pub struct DayProgress {
    /// Abbreviated weekday (`Mon`, `Tue`, ...)
    pub day: String,
    pub co2: f64,
    pub points: i64,
}

/// Static badge with its unlock state
#[derive(Debug, Clone, PartialEq)]
pub struct Achievement {
    pub name: &'static str,
    pub desc: &'static str,
    pub icon: &'static str,
    pub unlocked: bool,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub user: DashboardUser,
    pub summary: Summary,
    pub progress_chart: Vec<DayProgress>,
    pub achievements: Vec<Achievement>,
}

/// Badge definition: unlocked once `min_count` habits of `action` exist
struct Badge {
    name: &'static str,
    desc: &'static str,
    icon: &'static str,
    action: &'static str,
    min_count: i64,
}

const BADGES: &[Badge] = &[
    Badge {
        name: "Bici Novato",
        desc: "Primer uso de transporte ecológico.",
        icon: "🚴",
        action: "Usar bicicleta",
        min_count: 1,
    },
    Badge {
        name: "Reciclador Activo",
        desc: "5 registros de reciclaje.",
        icon: "♻️",
        action: "Reciclar plástico",
        min_count: 5,
    },
];

pub struct DashboardService {
    database: Arc<TransactionalService>,
}

impl DashboardService {
    pub fn new(database: Arc<TransactionalService>) -> Self {
        Self { database }
    }

    pub async fn summary(&self, user_id: i64) -> Result<Dashboard, DomainError> {
        self.summary_on(user_id, Utc::now().date_naive()).await
    }

    /// Dashboard as of `today`; the chart covers the seven days ending today
    async fn summary_on(&self, user_id: i64, today: NaiveDate) -> Result<Dashboard, DomainError> {
        let repo = self.database.repository();
        let failed = |e| DomainError::from_data(e, DASHBOARD_FAILED);

        let Some(user) = repo.get_user(user_id).await.map_err(failed)? else {
            return Err(DomainError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string()));
        };
        let actions = repo.count_habits(user_id).await.map_err(failed)?;

        let first = today - Duration::days(PROGRESS_CHART_DAYS - 1);
        let totals: HashMap<String, (f64, i64)> = repo
            .daily_totals(
                user_id,
                &first.format(DATE_FORMAT).to_string(),
                &today.format(DATE_FORMAT).to_string(),
            )
            .await
            .map_err(failed)?
            .into_iter()
            .map(|row| (row.date, (row.co2, row.points)))
            .collect();

        let progress_chart = (0..PROGRESS_CHART_DAYS)
            .map(|offset| {
                let date = first + Duration::days(offset);
                let (co2, points) = totals
                    .get(&date.format(DATE_FORMAT).to_string())
                    .copied()
                    .unwrap_or((0.0, 0));
                DayProgress {
                    day: date.format("%a").to_string(),
                    co2: round2(co2),
                    points,
                }
            })
            .collect();

        let mut achievements = Vec::with_capacity(BADGES.len());
        for badge in BADGES {
            let count = repo
                .count_habits_by_action(user_id, badge.action)
                .await
                .map_err(failed)?;
            achievements.push(Achievement {
                name: badge.name,
                desc: badge.desc,
                icon: badge.icon,
                unlocked: count >= badge.min_count,
            });
        }

        let co2_saved = round2(user.co2_saved);
        Ok(Dashboard {
            user: DashboardUser {
                username: user.username,
                email: user.email,
                points: user.points,
                co2_saved,
            },
            summary: Summary {
                actions,
                points: user.points,
                co2_saved,
            },
            progress_chart,
            achievements,
        })
    }
}
