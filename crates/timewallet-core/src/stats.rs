//! Usage statistics and the display math behind them.
//!
//! Per-app samples and the daily/weekly aggregates come from `crate::mock`;
//! the live summary is computed from the actual card registry.

use serde::{Deserialize, Serialize};

use crate::card::AppCard;

/// One app's usage against its allowance, in minutes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageSample {
    pub id: String,
    pub app_name: String,
    pub package_name: String,
    pub used_minutes: u32,
    pub limit_minutes: u32,
}

impl UsageSample {
    /// Fraction of the allowance used (0.0 to 1.0).
    pub fn progress(&self) -> f64 {
        if self.limit_minutes == 0 {
            0.0
        } else {
            (self.used_minutes as f64 / self.limit_minutes as f64).min(1.0)
        }
    }
}

/// Aggregates for a single day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyStats {
    pub total_screen_time_minutes: u32,
    pub most_used_app: String,
    pub most_used_app_minutes: u32,
    /// 0 to 100
    pub productivity_score: u8,
}

/// Aggregates for the trailing week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyStats {
    pub average_daily_minutes: u32,
    pub workspace_minutes: u32,
    pub personal_minutes: u32,
    pub most_productive_day: String,
}

/// Live summary over the card registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailySummary {
    pub total_screen_time_minutes: u32,
    pub apps_monitored: usize,
}

/// Summarize the registry: summed recorded usage plus card count.
pub fn summarize(cards: &[AppCard]) -> DailySummary {
    let total_seconds: u64 = cards.iter().map(|c| c.time_used).sum();
    DailySummary {
        total_screen_time_minutes: (total_seconds / 60) as u32,
        apps_monitored: cards.len(),
    }
}

/// Format minutes as `2h 15m`, or `45m` under an hour.
pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours > 0 {
        format!("{hours}h {rest}m")
    } else {
        format!("{rest}m")
    }
}
