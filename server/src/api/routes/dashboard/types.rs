//! Dashboard API types

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Dashboard;
use crate::domain::dashboard::{Achievement, DashboardUser, DayProgress, Summary};

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardUserDto {
    pub username: String,
    pub email: String,
    pub points: i64,
    pub co2_saved: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryDto {
    /// Number of habits logged
    pub actions: i64,
    pub points: i64,
    pub co2_saved: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DayProgressDto {
    /// Abbreviated weekday
    pub day: String,
    pub co2: f64,
    pub points: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AchievementDto {
    pub name: &'static str,
    pub desc: &'static str,
    pub icon: &'static str,
    pub unlocked: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub user: DashboardUserDto,
    pub summary: SummaryDto,
    /// Last seven days, oldest first
    pub progress_chart: Vec<DayProgressDto>,
    pub achievements: Vec<AchievementDto>,
}

impl From<DashboardUser> for DashboardUserDto {
    fn from(user: DashboardUser) -> Self {
        Self {
            username: user.username,
            email: user.email,
            points: user.points,
            co2_saved: user.co2_saved,
        }
    }
}

impl From<Summary> for SummaryDto {
    fn from(summary: Summary) -> Self {
        Self {
            actions: summary.actions,
            points: summary.points,
            co2_saved: summary.co2_saved,
        }
    }
}

impl From<DayProgress> for DayProgressDto {
    fn from(day: DayProgress) -> Self {
        Self {
            day: day.day,
            co2: day.co2,
            points: day.points,
        }
    }
}

impl From<Achievement> for AchievementDto {
    fn from(a: Achievement) -> Self {
        Self {
            name: a.name,
            desc: a.desc,
            icon: a.icon,
            unlocked: a.unlocked,
        }
    }
}

impl From<Dashboard> for DashboardResponse {
    fn from(d: Dashboard) -> Self {
        Self {
            user: d.user.into(),
            summary: d.summary.into(),
            progress_chart: d.progress_chart.into_iter().map(Into::into).collect(),
            achievements: d.achievements.into_iter().map(Into::into).collect(),
        }
    }
}
