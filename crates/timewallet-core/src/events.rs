use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::LimitPeriod;

/// Every state change produces an Event.
/// UI layers poll the state's event queue to drive re-rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CardAdded {
        card_id: String,
        category_id: String,
        wallet_id: String,
        at: DateTime<Utc>,
    },
    CardRemoved {
        card_id: String,
        at: DateTime<Utc>,
    },
    CardMoved {
        card_id: String,
        from_category: String,
        to_category: String,
        at: DateTime<Utc>,
    },
    CardLimitChanged {
        card_id: String,
        period: LimitPeriod,
        seconds: Option<u64>,
        at: DateTime<Utc>,
    },
    CategoryAdded {
        category_id: String,
        name: String,
        at: DateTime<Utc>,
    },
    /// A category was removed; its cards moved to the default category.
    CategoryRemoved {
        category_id: String,
        reparented_cards: usize,
        at: DateTime<Utc>,
    },
    WalletAdded {
        wallet_id: String,
        name: String,
        at: DateTime<Utc>,
    },
    /// A wallet was removed; cards it owned moved to the default wallet.
    WalletRemoved {
        wallet_id: String,
        was_active: bool,
        rehomed_cards: usize,
        at: DateTime<Utc>,
    },
    ActiveWalletChanged {
        wallet_id: String,
        at: DateTime<Utc>,
    },
    SettingsUpdated {
        fields: Vec<String>,
        at: DateTime<Utc>,
    },
}
