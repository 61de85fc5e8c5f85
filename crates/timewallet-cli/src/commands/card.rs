//! Card management commands.

use clap::Subcommand;
use timewallet_core::card::{format_duration, parse_duration, LimitPeriod};
use timewallet_core::error::ValidationError;
use timewallet_core::storage::Database;

#[derive(Subcommand)]
pub enum CardAction {
    /// Add an app card
    Add {
        /// Display name
        name: String,
        /// Platform package identifier (e.g. "com.instagram.android")
        package: String,
        /// Daily allowance (e.g. "1h30m", "45m")
        #[arg(long)]
        daily: Option<String>,
        /// Weekly allowance
        #[arg(long)]
        weekly: Option<String>,
        /// Monthly allowance
        #[arg(long)]
        monthly: Option<String>,
        /// Wallet id (defaults to the active wallet)
        #[arg(long)]
        wallet: Option<String>,
        /// Category id (defaults to the default category)
        #[arg(long)]
        category: Option<String>,
        /// Display icon
        #[arg(long)]
        icon: Option<String>,
    },
    /// List cards
    List {
        /// Only cards listed by this category
        #[arg(long)]
        category: Option<String>,
        /// Only cards owned by this wallet
        #[arg(long)]
        wallet: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show card details
    Show {
        /// Card id
        id: String,
    },
    /// Remove a card
    Remove {
        /// Card id
        id: String,
    },
    /// Move a card to another category
    Move {
        /// Card id
        id: String,
        /// Destination category id
        category: String,
    },
    /// Set or clear one period's allowance
    Limit {
        /// Card id
        id: String,
        /// daily, weekly or monthly
        period: String,
        /// Allowance (e.g. "2h"); omit together with --clear
        duration: Option<String>,
        /// Clear the allowance for this period
        #[arg(long)]
        clear: bool,
    },
}

pub fn run(action: CardAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut state = db.load_state()?;

    match action {
        CardAction::Add {
            name,
            package,
            daily,
            weekly,
            monthly,
            wallet,
            category,
            icon,
        } => {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyName("card").into());
            }
            if package.trim().is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: "package".to_string(),
                    message: "must not be empty".to_string(),
                }
                .into());
            }

            let mut card = state.draft_card(name.trim(), package.trim());
            if let Some(icon) = icon {
                card.icon = icon;
            }
            if let Some(wallet) = wallet {
                if !state.settings().has_wallet(&wallet) {
                    eprintln!("warning: wallet '{wallet}' is not registered");
                }
                card.wallet = wallet;
            }
            for (period, arg) in [
                (LimitPeriod::Daily, daily),
                (LimitPeriod::Weekly, weekly),
                (LimitPeriod::Monthly, monthly),
            ] {
                if let Some(text) = arg {
                    let seconds = parse_duration(&text)?;
                    card.time_limit.set(period, Some(seconds))?;
                }
            }

            let id = state.add_card(card, category.as_deref());
            super::persist(&db, &mut state)?;
            println!("Card added: {id}");
            if let Some(card) = state.card(&id) {
                println!("{}", serde_json::to_string_pretty(card)?);
            }
        }
        CardAction::List {
            category,
            wallet,
            json,
        } => {
            let cards: Vec<_> = state
                .cards()
                .iter()
                .filter(|card| {
                    if let Some(ref cat) = category {
                        let listed = state
                            .categories()
                            .get(cat)
                            .map(|c| c.contains(&card.id))
                            .unwrap_or(false);
                        if !listed {
                            return false;
                        }
                    }
                    if let Some(ref wallet) = wallet {
                        if &card.wallet != wallet {
                            return false;
                        }
                    }
                    true
                })
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&cards)?);
            } else if cards.is_empty() {
                println!("No cards");
            } else {
                for card in cards {
                    let limit = card
                        .time_limit
                        .get(LimitPeriod::Daily)
                        .map(|s| format!(", daily {}", format_duration(s)))
                        .unwrap_or_default();
                    println!(
                        "{} {} ({}) [{}] wallet={}{limit}",
                        card.icon, card.name, card.package_name, card.id, card.wallet
                    );
                }
            }
        }
        CardAction::Show { id } => match state.card(&id) {
            Some(card) => println!("{}", serde_json::to_string_pretty(card)?),
            None => println!("Card not found: {id}"),
        },
        CardAction::Remove { id } => {
            if state.card(&id).is_none() {
                println!("Card not found: {id}");
                return Ok(());
            }
            state.remove_card(&id);
            super::persist(&db, &mut state)?;
            println!("Card removed: {id}");
        }
        CardAction::Move { id, category } => {
            if state.card(&id).is_none() {
                println!("Card not found: {id}");
                return Ok(());
            }
            state.move_card(&id, &category);
            super::persist(&db, &mut state)?;
            // The state falls back to the default category for unknown
            // destinations; report where the card actually landed.
            match state.categories().find_card(&id) {
                Some(holder) => println!("Card {id} moved to {}", holder.id),
                None => println!("Card {id} moved"),
            }
        }
        CardAction::Limit {
            id,
            period,
            duration,
            clear,
        } => {
            let period: LimitPeriod = period.parse()?;
            let seconds = if clear {
                None
            } else {
                match duration {
                    Some(text) => Some(parse_duration(&text)?),
                    None => return Err("provide a duration or pass --clear".into()),
                }
            };
            state.set_limit(&id, period, seconds)?;
            super::persist(&db, &mut state)?;
            match state.card(&id).and_then(|c| c.time_limit.get(period)) {
                Some(seconds) => println!("Limit set: {period} {}", format_duration(seconds)),
                None => println!("Limit cleared: {period}"),
            }
        }
    }
    Ok(())
}
