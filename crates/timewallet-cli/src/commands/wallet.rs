//! Wallet management commands.

use clap::Subcommand;
use timewallet_core::error::ValidationError;
use timewallet_core::settings::DEFAULT_WALLET_ID;
use timewallet_core::storage::Database;

#[derive(Subcommand)]
pub enum WalletAction {
    /// Create a wallet
    Add {
        /// Display name
        name: String,
    },
    /// List wallets
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a wallet (its cards move to the default wallet)
    Remove {
        /// Wallet id
        id: String,
    },
    /// Switch the active wallet
    Use {
        /// Wallet id
        id: String,
    },
}

pub fn run(action: WalletAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut state = db.load_state()?;

    match action {
        WalletAction::Add { name } => {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyName("wallet").into());
            }
            let id = state.add_wallet(name.trim());
            super::persist(&db, &mut state)?;
            println!("Wallet added: {id}");
        }
        WalletAction::List { json } => {
            let settings = state.settings();
            if json {
                println!("{}", serde_json::to_string_pretty(&settings.wallets)?);
            } else {
                for wallet in &settings.wallets {
                    let marker = if wallet.id == settings.active_wallet {
                        "*"
                    } else {
                        " "
                    };
                    println!("{marker} {} [{}]", wallet.name, wallet.id);
                }
            }
        }
        WalletAction::Remove { id } => {
            if id == DEFAULT_WALLET_ID {
                println!("The default wallet cannot be removed");
                return Ok(());
            }
            if !state.settings().has_wallet(&id) {
                println!("Wallet not found: {id}");
                return Ok(());
            }
            let was_active = state.settings().active_wallet == id;
            state.remove_wallet(&id);
            super::persist(&db, &mut state)?;
            println!("Wallet removed: {id}");
            if was_active {
                println!("Active wallet reset to {DEFAULT_WALLET_ID}");
            }
        }
        WalletAction::Use { id } => {
            if !state.settings().has_wallet(&id) {
                eprintln!("warning: wallet '{id}' is not registered");
            }
            state.set_active_wallet(id.clone());
            super::persist(&db, &mut state)?;
            println!("Active wallet: {id}");
        }
    }
    Ok(())
}
