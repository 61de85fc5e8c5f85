//! Settings screen commands.

use clap::Subcommand;
use timewallet_core::settings::SettingsUpdate;
use timewallet_core::storage::Database;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show the current settings
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update one or more settings
    Update {
        /// Floating button position: left or right
        #[arg(long)]
        fab_position: Option<String>,
        /// Swipe direction: normal or inverted
        #[arg(long)]
        swipe_direction: Option<String>,
        /// Hide the default category while it is empty
        #[arg(long)]
        hide_empty_default: Option<bool>,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut state = db.load_state()?;

    match action {
        SettingsAction::Show { json } => {
            let settings = state.settings();
            if json {
                println!("{}", serde_json::to_string_pretty(settings)?);
            } else {
                println!("Active wallet: {}", settings.active_wallet);
                println!("Wallets: {}", settings.wallets.len());
                println!(
                    "Hide empty default category: {}",
                    settings.hide_empty_default_category
                );
                println!("Fab position: {}", settings.fab_position);
                println!("Swipe direction: {}", settings.swipe_direction);
            }
        }
        SettingsAction::Update {
            fab_position,
            swipe_direction,
            hide_empty_default,
        } => {
            let update = SettingsUpdate {
                fab_position: fab_position.map(|s| s.parse()).transpose()?,
                swipe_direction: swipe_direction.map(|s| s.parse()).transpose()?,
                hide_empty_default_category: hide_empty_default,
                ..SettingsUpdate::default()
            };
            if update.is_empty() {
                println!("nothing to update");
                return Ok(());
            }
            let fields = update.changed_fields();
            state.update_settings(update);
            super::persist(&db, &mut state)?;
            println!("Settings updated: {}", fields.join(", "));
        }
    }
    Ok(())
}
