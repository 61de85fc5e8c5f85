//! App cards and time allowances.
//!
//! A card is one monitored app: identity (name, package), a mocked usage
//! counter, and an optional per-period time allowance. Cards belong to a
//! wallet and are listed by categories; both link by card id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Default icon assigned to new cards.
pub const DEFAULT_ICON: &str = "📱";

/// Period a time allowance applies to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LimitPeriod {
    /// Per calendar day
    Daily,
    /// Per calendar week
    Weekly,
    /// Per calendar month
    Monthly,
    /// Per calendar year (not representable in a TimeLimit)
    Annually,
}

impl LimitPeriod {
    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            LimitPeriod::Daily => "daily",
            LimitPeriod::Weekly => "weekly",
            LimitPeriod::Monthly => "monthly",
            LimitPeriod::Annually => "annually",
        }
    }
}

impl fmt::Display for LimitPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LimitPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(LimitPeriod::Daily),
            "weekly" => Ok(LimitPeriod::Weekly),
            "monthly" => Ok(LimitPeriod::Monthly),
            "annually" => Ok(LimitPeriod::Annually),
            other => Err(ValidationError::InvalidValue {
                field: "period".to_string(),
                message: format!("unknown period '{other}'"),
            }),
        }
    }
}

/// Time allowance for a card, in seconds per period.
///
/// All fields are optional; an absent field means no allowance is set for
/// that period. Annual allowances are intentionally not representable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeLimit {
    /// Seconds allowed per day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily: Option<u64>,
    /// Seconds allowed per week
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly: Option<u64>,
    /// Seconds allowed per month
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly: Option<u64>,
}

impl TimeLimit {
    /// A limit with no allowance set.
    pub fn none() -> Self {
        TimeLimit::default()
    }

    /// True when no period has an allowance.
    pub fn is_empty(&self) -> bool {
        self.daily.is_none() && self.weekly.is_none() && self.monthly.is_none()
    }

    /// Allowance in seconds for the given period, if set.
    pub fn get(&self, period: LimitPeriod) -> Option<u64> {
        match period {
            LimitPeriod::Daily => self.daily,
            LimitPeriod::Weekly => self.weekly,
            LimitPeriod::Monthly => self.monthly,
            LimitPeriod::Annually => None,
        }
    }

    /// Set or clear the allowance for one period.
    ///
    /// # Errors
    /// Returns an error for `Annually`, which has no corresponding field.
    pub fn set(&mut self, period: LimitPeriod, seconds: Option<u64>) -> Result<(), ValidationError> {
        let slot = match period {
            LimitPeriod::Daily => &mut self.daily,
            LimitPeriod::Weekly => &mut self.weekly,
            LimitPeriod::Monthly => &mut self.monthly,
            LimitPeriod::Annually => {
                return Err(ValidationError::UnsupportedPeriod(
                    period.as_str().to_string(),
                ))
            }
        };
        // A zero allowance means "no limit", same as clearing it.
        *slot = seconds.filter(|s| *s > 0);
        Ok(())
    }
}

/// Parse a duration like `2h`, `90m`, `1h30m` or a bare minute count.
///
/// Hour components clamp to 24 and minute components to 59, matching the
/// bounds of the time-entry form. Returns total seconds; `0` is valid and
/// means "no allowance".
///
/// # Errors
/// Returns an error for empty input or unrecognized syntax.
pub fn parse_duration(input: &str) -> Result<u64, ValidationError> {
    let trimmed = input.trim().to_ascii_lowercase();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidDuration {
            input: input.to_string(),
            message: "empty duration".to_string(),
        });
    }

    // Bare number: minutes.
    if let Ok(minutes) = trimmed.parse::<u64>() {
        return Ok(minutes.min(59) * 60);
    }

    let mut hours: u64 = 0;
    let mut minutes: u64 = 0;
    let mut seen_any = false;
    let mut digits = String::new();
    for ch in trimmed.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        let value: u64 = digits.parse().map_err(|_| ValidationError::InvalidDuration {
            input: input.to_string(),
            message: format!("expected a number before '{ch}'"),
        })?;
        match ch {
            'h' => hours = value.min(24),
            'm' => minutes = value.min(59),
            other => {
                return Err(ValidationError::InvalidDuration {
                    input: input.to_string(),
                    message: format!("unexpected character '{other}'"),
                })
            }
        }
        seen_any = true;
        digits.clear();
    }
    if !digits.is_empty() || !seen_any {
        return Err(ValidationError::InvalidDuration {
            input: input.to_string(),
            message: "expected a unit suffix like '1h30m' or '45m'".to_string(),
        });
    }

    Ok((hours * 60 + minutes) * 60)
}

/// Format seconds as `1h 30m`, or `45m` when under an hour.
pub fn format_duration(seconds: u64) -> String {
    let total_minutes = seconds / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// One monitored app.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppCard {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Platform package identifier (e.g. "com.instagram.android")
    pub package_name: String,
    /// Display icon
    pub icon: String,
    /// Seconds of recorded usage (mock data in this build)
    pub time_used: u64,
    /// Optional per-period allowances
    #[serde(default)]
    pub time_limit: TimeLimit,
    /// Id of the owning wallet
    pub wallet: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl AppCard {
    /// Create a new card with default icon, no usage and no allowances.
    ///
    /// The wallet defaults to the reserved default wallet; callers assign
    /// the active wallet where one is known.
    pub fn new(name: impl Into<String>, package_name: impl Into<String>) -> Self {
        let now = Utc::now();
        AppCard {
            id: format!("card-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            name: name.into(),
            package_name: package_name.into(),
            icon: DEFAULT_ICON.to_string(),
            time_used: 0,
            time_limit: TimeLimit::none(),
            wallet: crate::settings::DEFAULT_WALLET_ID.to_string(),
            created_at: now,
        }
    }

    /// Fraction of the period's allowance already used, if one is set.
    pub fn usage_fraction(&self, period: LimitPeriod) -> Option<f64> {
        let limit = self.time_limit.get(period)?;
        if limit == 0 {
            return None;
        }
        Some(self.time_used as f64 / limit as f64)
    }

    /// True when usage meets or exceeds the period's allowance.
    pub fn over_limit(&self, period: LimitPeriod) -> bool {
        matches!(self.usage_fraction(period), Some(f) if f >= 1.0)
    }
}
