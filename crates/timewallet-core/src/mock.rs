//! Demo dataset backing the statistics and workspace views.
//!
//! No platform usage APIs are wired in; these numbers stand in for real
//! measurements so the statistics surfaces render something meaningful.

use crate::stats::{DailyStats, UsageSample, WeeklyStats};
use crate::workspace::{Workspace, WorkspaceTask};

/// Per-app usage samples for the personal view.
pub fn sample_usage() -> Vec<UsageSample> {
    vec![
        UsageSample {
            id: "1".to_string(),
            app_name: "Instagram".to_string(),
            package_name: "com.instagram.android".to_string(),
            used_minutes: 45,
            limit_minutes: 60,
        },
        UsageSample {
            id: "2".to_string(),
            app_name: "Facebook".to_string(),
            package_name: "com.facebook.android".to_string(),
            used_minutes: 30,
            limit_minutes: 45,
        },
    ]
}

/// Today's aggregates.
pub fn daily_stats() -> DailyStats {
    DailyStats {
        total_screen_time_minutes: 180,
        most_used_app: "Instagram".to_string(),
        most_used_app_minutes: 45,
        productivity_score: 75,
    }
}

/// Trailing-week aggregates.
pub fn weekly_stats() -> WeeklyStats {
    WeeklyStats {
        average_daily_minutes: 210,
        workspace_minutes: 1200,
        personal_minutes: 270,
        most_productive_day: "Wednesday".to_string(),
    }
}

/// Insight lines for the statistics view.
pub fn insights() -> Vec<String> {
    vec![
        "You're most productive between 9 AM and 11 AM".to_string(),
        "Social media usage has decreased by 15% this week".to_string(),
        "Project Alpha is taking up 60% of your workspace time".to_string(),
    ]
}

/// Workspaces with their task allocations.
pub fn workspaces() -> Vec<Workspace> {
    vec![
        Workspace {
            id: "1".to_string(),
            name: "Project Alpha".to_string(),
            total_minutes: 480,
            allocated_minutes: 360,
            tasks: vec![
                WorkspaceTask {
                    id: "1".to_string(),
                    name: "Development".to_string(),
                    spent_minutes: 120,
                    allocated_minutes: 180,
                },
                WorkspaceTask {
                    id: "2".to_string(),
                    name: "Meetings".to_string(),
                    spent_minutes: 60,
                    allocated_minutes: 90,
                },
            ],
        },
        Workspace {
            id: "2".to_string(),
            name: "Project Beta".to_string(),
            total_minutes: 360,
            allocated_minutes: 240,
            tasks: vec![WorkspaceTask {
                id: "3".to_string(),
                name: "Planning".to_string(),
                spent_minutes: 90,
                allocated_minutes: 120,
            }],
        },
    ]
}
