//! One-shot overview of the local install.

use timewallet_core::storage::{data_dir, Database};

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let state = db.load_state()?;
    let settings = state.settings();

    let active_name = settings
        .active()
        .map(|w| w.name.clone())
        .unwrap_or_else(|| settings.active_wallet.clone());
    let first_launch = db.is_first_launch()?;
    let last_tab = db.last_tab()?;
    let dir = data_dir()?;

    if json {
        let status = serde_json::json!({
            "active_wallet": settings.active_wallet,
            "active_wallet_name": active_name,
            "wallets": settings.wallets.len(),
            "categories": state.categories().len(),
            "cards": state.cards().len(),
            "first_launch": first_launch,
            "last_screen": last_tab.map(|t| t.as_str()),
            "data_dir": dir.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("Active wallet: {active_name} [{}]", settings.active_wallet);
        println!("Wallets: {}", settings.wallets.len());
        println!("Categories: {}", state.categories().len());
        println!("Cards: {}", state.cards().len());
        println!("First launch: {first_launch}");
        if let Some(tab) = last_tab {
            println!("Last screen: {}", tab.as_str());
        }
        println!("Data dir: {}", dir.display());
    }
    Ok(())
}
