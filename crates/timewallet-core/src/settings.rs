//! Settings and wallets.
//!
//! A wallet is a named usage-allowance profile; every card is assigned to
//! one. Settings hold the wallet registry, the active wallet and the display
//! preferences. Writes go through `apply` (partial merge) or the dedicated
//! wallet operations, all of which are total.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::ValidationError;

/// Id of the reserved default wallet.
pub const DEFAULT_WALLET_ID: &str = "default";

/// Display name of the reserved default wallet.
pub const DEFAULT_WALLET_NAME: &str = "Default";

/// A named usage-allowance profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Wallet {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
}

impl Wallet {
    /// Create a new wallet with a minted id.
    pub fn new(name: impl Into<String>) -> Self {
        Wallet {
            id: format!("wallet-{}-{}", Utc::now().timestamp(), uuid::Uuid::new_v4()),
            name: name.into(),
        }
    }

    /// The reserved default wallet.
    pub fn default_wallet() -> Self {
        Wallet {
            id: DEFAULT_WALLET_ID.to_string(),
            name: DEFAULT_WALLET_NAME.to_string(),
        }
    }

    /// True for the reserved default wallet.
    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_WALLET_ID
    }
}

/// Screen corner the floating action button docks to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FabPosition {
    Left,
    Right,
}

impl Default for FabPosition {
    fn default() -> Self {
        FabPosition::Right
    }
}

impl FabPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            FabPosition::Left => "left",
            FabPosition::Right => "right",
        }
    }
}

impl fmt::Display for FabPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FabPosition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(FabPosition::Left),
            "right" => Ok(FabPosition::Right),
            other => Err(ValidationError::InvalidValue {
                field: "fab_position".to_string(),
                message: format!("unknown position '{other}', use left or right"),
            }),
        }
    }
}

/// Mapping of swipe gestures to card actions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Normal,
    Inverted,
}

impl Default for SwipeDirection {
    fn default() -> Self {
        SwipeDirection::Normal
    }
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeDirection::Normal => "normal",
            SwipeDirection::Inverted => "inverted",
        }
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SwipeDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(SwipeDirection::Normal),
            "inverted" => Ok(SwipeDirection::Inverted),
            other => Err(ValidationError::InvalidValue {
                field: "swipe_direction".to_string(),
                message: format!("unknown direction '{other}', use normal or inverted"),
            }),
        }
    }
}

/// Process-wide user settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Id of the currently active wallet
    pub active_wallet: String,
    /// Registered wallets, default wallet first
    pub wallets: Vec<Wallet>,
    /// Hide the default category in listings while it is empty
    pub hide_empty_default_category: bool,
    /// Floating action button position
    pub fab_position: FabPosition,
    /// Swipe gesture mapping
    pub swipe_direction: SwipeDirection,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            active_wallet: DEFAULT_WALLET_ID.to_string(),
            wallets: vec![Wallet::default_wallet()],
            hide_empty_default_category: false,
            fab_position: FabPosition::default(),
            swipe_direction: SwipeDirection::default(),
        }
    }
}

/// Partial settings change; only present fields are merged by `apply`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_wallet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallets: Option<Vec<Wallet>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_empty_default_category: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fab_position: Option<FabPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swipe_direction: Option<SwipeDirection>,
}

impl SettingsUpdate {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.active_wallet.is_none()
            && self.wallets.is_none()
            && self.hide_empty_default_category.is_none()
            && self.fab_position.is_none()
            && self.swipe_direction.is_none()
    }

    /// Names of the fields this update carries.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.active_wallet.is_some() {
            fields.push("active_wallet");
        }
        if self.wallets.is_some() {
            fields.push("wallets");
        }
        if self.hide_empty_default_category.is_some() {
            fields.push("hide_empty_default_category");
        }
        if self.fab_position.is_some() {
            fields.push("fab_position");
        }
        if self.swipe_direction.is_some() {
            fields.push("swipe_direction");
        }
        fields
    }
}

impl Settings {
    /// Merge a partial update; fields absent from the update are untouched.
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(active_wallet) = update.active_wallet {
            self.active_wallet = active_wallet;
        }
        if let Some(wallets) = update.wallets {
            self.wallets = wallets;
        }
        if let Some(hide) = update.hide_empty_default_category {
            self.hide_empty_default_category = hide;
        }
        if let Some(fab_position) = update.fab_position {
            self.fab_position = fab_position;
        }
        if let Some(swipe_direction) = update.swipe_direction {
            self.swipe_direction = swipe_direction;
        }
    }

    /// Register a new wallet and return its id.
    pub fn add_wallet(&mut self, name: impl Into<String>) -> String {
        let wallet = Wallet::new(name);
        let id = wallet.id.clone();
        self.wallets.push(wallet);
        id
    }

    /// Remove a wallet. The default wallet is a silent no-op.
    ///
    /// When the removed id was the active wallet, the active wallet resets
    /// to the default wallet. The reset keys off the requested id, so
    /// removing a ghost id that was made active also resets.
    pub fn remove_wallet(&mut self, id: &str) {
        if id == DEFAULT_WALLET_ID {
            debug!("ignoring removal of the default wallet");
            return;
        }
        self.wallets.retain(|w| w.id != id);
        if self.active_wallet == id {
            self.active_wallet = DEFAULT_WALLET_ID.to_string();
        }
    }

    /// Make a wallet active. Unconditional, even for unregistered ids.
    pub fn set_active_wallet(&mut self, id: impl Into<String>) {
        self.active_wallet = id.into();
    }

    /// Look up a wallet by id.
    pub fn wallet(&self, id: &str) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.id == id)
    }

    /// True when a wallet with this id is registered.
    pub fn has_wallet(&self, id: &str) -> bool {
        self.wallet(id).is_some()
    }

    /// The active wallet's record, when it is registered.
    pub fn active(&self) -> Option<&Wallet> {
        self.wallet(&self.active_wallet)
    }

    /// Restore the default wallet if missing. Used after deserializing.
    pub(crate) fn ensure_default(&mut self) {
        if !self.has_wallet(DEFAULT_WALLET_ID) {
            self.wallets.insert(0, Wallet::default_wallet());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.active_wallet, DEFAULT_WALLET_ID);
        assert_eq!(settings.wallets.len(), 1);
        assert!(settings.wallets[0].is_default());
        assert!(!settings.hide_empty_default_category);
        assert_eq!(settings.fab_position, FabPosition::Right);
        assert_eq!(settings.swipe_direction, SwipeDirection::Normal);
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let mut settings = Settings::default();
        settings.apply(SettingsUpdate {
            fab_position: Some(FabPosition::Left),
            ..Default::default()
        });

        assert_eq!(settings.fab_position, FabPosition::Left);
        // Everything else keeps its default.
        assert_eq!(settings.active_wallet, DEFAULT_WALLET_ID);
        assert_eq!(settings.wallets.len(), 1);
        assert!(!settings.hide_empty_default_category);
        assert_eq!(settings.swipe_direction, SwipeDirection::Normal);
    }

    #[test]
    fn test_apply_empty_update_changes_nothing() {
        let mut settings = Settings::default();
        let before = settings.clone();
        settings.apply(SettingsUpdate::default());
        assert_eq!(settings, before);
    }

    #[test]
    fn test_add_wallet_keeps_name() {
        let mut settings = Settings::default();
        let id = settings.add_wallet("Work");
        let wallet = settings.wallet(&id).unwrap();
        assert_eq!(wallet.name, "Work");
        assert!(id.starts_with("wallet-"));
    }

    #[test]
    fn test_add_wallet_ids_unique() {
        let mut settings = Settings::default();
        let a = settings.add_wallet("Work");
        let b = settings.add_wallet("Work");
        assert_ne!(a, b);
        assert_eq!(settings.wallets.len(), 3);
    }

    #[test]
    fn test_remove_default_wallet_is_noop() {
        let mut settings = Settings::default();
        settings.remove_wallet(DEFAULT_WALLET_ID);
        assert!(settings.has_wallet(DEFAULT_WALLET_ID));
    }

    #[test]
    fn test_remove_active_wallet_resets_to_default() {
        let mut settings = Settings::default();
        let id = settings.add_wallet("Work");
        settings.set_active_wallet(id.clone());

        settings.remove_wallet(&id);

        assert!(!settings.has_wallet(&id));
        assert_eq!(settings.active_wallet, DEFAULT_WALLET_ID);
    }

    #[test]
    fn test_remove_inactive_wallet_keeps_active() {
        let mut settings = Settings::default();
        let work = settings.add_wallet("Work");
        let home = settings.add_wallet("Home");
        settings.set_active_wallet(work.clone());

        settings.remove_wallet(&home);

        assert_eq!(settings.active_wallet, work);
    }

    #[test]
    fn test_remove_ghost_active_id_still_resets() {
        let mut settings = Settings::default();
        settings.set_active_wallet("ghost");
        settings.remove_wallet("ghost");
        assert_eq!(settings.active_wallet, DEFAULT_WALLET_ID);
    }

    #[test]
    fn test_set_active_wallet_is_unconditional() {
        let mut settings = Settings::default();
        settings.set_active_wallet("not-registered");
        assert_eq!(settings.active_wallet, "not-registered");
        assert!(settings.active().is_none());
    }

    #[test]
    fn test_changed_fields() {
        let update = SettingsUpdate {
            swipe_direction: Some(SwipeDirection::Inverted),
            hide_empty_default_category: Some(true),
            ..Default::default()
        };
        assert_eq!(
            update.changed_fields(),
            vec!["hide_empty_default_category", "swipe_direction"]
        );
        assert!(SettingsUpdate::default().is_empty());
    }

    #[test]
    fn test_position_and_direction_parse() {
        assert_eq!("left".parse::<FabPosition>().unwrap(), FabPosition::Left);
        assert_eq!(
            "INVERTED".parse::<SwipeDirection>().unwrap(),
            SwipeDirection::Inverted
        );
        assert!("middle".parse::<FabPosition>().is_err());
        assert!("up".parse::<SwipeDirection>().is_err());
    }
}
