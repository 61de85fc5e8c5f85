//! Category management commands.

use clap::Subcommand;
use timewallet_core::category::DEFAULT_CATEGORY_NAME;
use timewallet_core::error::ValidationError;
use timewallet_core::storage::Database;

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Create a category
    Add {
        /// Category name
        name: String,
    },
    /// List categories and the cards they hold
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a category (its cards move to the default category)
    Remove {
        /// Category id
        id: String,
    },
}

pub fn run(action: CategoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut state = db.load_state()?;

    match action {
        CategoryAction::Add { name } => {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyName("category").into());
            }
            let id = state.add_category(name.trim());
            super::persist(&db, &mut state)?;
            println!("Category added: {id}");
        }
        CategoryAction::List { json } => {
            let hide_empty_default = state.settings().hide_empty_default_category;
            let categories: Vec<_> = state
                .categories()
                .iter()
                .filter(|category| {
                    !(hide_empty_default && category.is_default() && category.cards.is_empty())
                })
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else if categories.is_empty() {
                println!("No categories");
            } else {
                for category in categories {
                    println!("{} [{}] ({} cards)", category.name, category.id, category.cards.len());
                    for card_id in &category.cards {
                        match state.card(card_id) {
                            Some(card) => println!("  {} {}", card.icon, card.name),
                            None => println!("  {card_id}"),
                        }
                    }
                }
            }
        }
        CategoryAction::Remove { id } => {
            let Some(category) = state.categories().get(&id) else {
                println!("Category not found: {id}");
                return Ok(());
            };
            if category.is_default() {
                println!("The default category cannot be removed");
                return Ok(());
            }
            let moved = category.cards.len();
            state.remove_category(&id);
            super::persist(&db, &mut state)?;
            println!("Category removed: {id}");
            if moved > 0 {
                println!("{moved} cards moved to {DEFAULT_CATEGORY_NAME}");
            }
        }
    }
    Ok(())
}
