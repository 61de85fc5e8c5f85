//! Usage statistics commands.
//!
//! Per-app usage, daily and weekly screens serve canned demo data until a
//! platform usage collector exists. `summary` is computed from live cards.

use clap::Subcommand;
use timewallet_core::mock;
use timewallet_core::stats::{format_minutes, summarize};
use timewallet_core::storage::Database;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Per-app usage for today
    Usage {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Today's aggregate stats
    Today {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// This week's aggregate stats
    Week {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Usage insights
    Insights {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Summary computed from the card registry
    Summary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StatsAction::Usage { json } => {
            let samples = mock::sample_usage();
            if json {
                println!("{}", serde_json::to_string_pretty(&samples)?);
            } else {
                for sample in samples {
                    let percent = (sample.progress() * 100.0).round() as u64;
                    println!(
                        "{}: {} of {} ({percent}%)",
                        sample.app_name,
                        format_minutes(sample.used_minutes),
                        format_minutes(sample.limit_minutes)
                    );
                }
            }
        }
        StatsAction::Today { json } => {
            let stats = mock::daily_stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!(
                    "Screen time today: {}",
                    format_minutes(stats.total_screen_time_minutes)
                );
                println!(
                    "Most used: {} ({})",
                    stats.most_used_app,
                    format_minutes(stats.most_used_app_minutes)
                );
                println!("Productivity score: {}", stats.productivity_score);
            }
        }
        StatsAction::Week { json } => {
            let stats = mock::weekly_stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!(
                    "Daily average: {}",
                    format_minutes(stats.average_daily_minutes)
                );
                println!("Workspace: {}", format_minutes(stats.workspace_minutes));
                println!("Personal: {}", format_minutes(stats.personal_minutes));
                println!("Most productive day: {}", stats.most_productive_day);
            }
        }
        StatsAction::Insights { json } => {
            let insights = mock::insights();
            if json {
                println!("{}", serde_json::to_string_pretty(&insights)?);
            } else {
                for insight in insights {
                    println!("- {insight}");
                }
            }
        }
        StatsAction::Summary { json } => {
            let db = Database::open()?;
            let state = db.load_state()?;
            let summary = summarize(state.cards());
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "Screen time: {}",
                    format_minutes(summary.total_screen_time_minutes)
                );
                println!("Apps monitored: {}", summary.apps_monitored);
            }
        }
    }
    Ok(())
}
