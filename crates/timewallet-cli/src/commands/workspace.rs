//! Workspace screen commands. Serves canned demo data, same as the
//! stats screens.

use clap::Subcommand;
use timewallet_core::mock;
use timewallet_core::stats::format_minutes;

#[derive(Subcommand)]
pub enum WorkspaceAction {
    /// List workspaces
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one workspace with its tasks
    Show {
        /// Workspace id
        id: String,
    },
}

pub fn run(action: WorkspaceAction) -> Result<(), Box<dyn std::error::Error>> {
    let workspaces = mock::workspaces();

    match action {
        WorkspaceAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&workspaces)?);
            } else {
                for workspace in &workspaces {
                    let percent = (workspace.progress() * 100.0).round() as u64;
                    println!(
                        "{} [{}]: spent {} of {} ({percent}%)",
                        workspace.name,
                        workspace.id,
                        format_minutes(workspace.total_minutes),
                        format_minutes(workspace.allocated_minutes)
                    );
                }
            }
        }
        WorkspaceAction::Show { id } => {
            let Some(workspace) = workspaces.iter().find(|w| w.id == id) else {
                println!("Workspace not found: {id}");
                return Ok(());
            };
            println!("{} [{}]", workspace.name, workspace.id);
            println!(
                "Spent {} of {} allocated",
                format_minutes(workspace.total_minutes),
                format_minutes(workspace.allocated_minutes)
            );
            if workspace.over_allocation() {
                println!("Over allocation");
            }
            for task in &workspace.tasks {
                let percent = (task.progress() * 100.0).round() as u64;
                println!(
                    "  {}: {} of {} ({percent}%)",
                    task.name,
                    format_minutes(task.spent_minutes),
                    format_minutes(task.allocated_minutes)
                );
            }
        }
    }
    Ok(())
}
