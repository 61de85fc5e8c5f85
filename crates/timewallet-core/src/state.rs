//! Application state.
//!
//! `AppState` is the single explicitly-owned state object: the card
//! registry, the category store and the settings, with mutation methods as
//! the only write path. Every mutation appends an `Event`; callers drain
//! the queue to drive re-rendering or logging.
//!
//! State is single-threaded. There is no interior mutability and no
//! locking; a UI layer owns one `AppState` and borrows it.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::card::{AppCard, LimitPeriod};
use crate::category::{Categories, DEFAULT_CATEGORY_ID};
use crate::error::ValidationError;
use crate::events::Event;
use crate::settings::{Settings, SettingsUpdate, DEFAULT_WALLET_ID};

/// Card registry, category store and settings behind one write path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    cards: Vec<AppCard>,
    #[serde(default)]
    categories: Categories,
    #[serde(default)]
    settings: Settings,
    #[serde(skip)]
    events: Vec<Event>,
}

impl AppState {
    /// Fresh state: no cards, the default category, default settings.
    pub fn new() -> Self {
        AppState::default()
    }

    // ---- reads ------------------------------------------------------------

    /// All registered cards, in creation order.
    pub fn cards(&self) -> &[AppCard] {
        &self.cards
    }

    /// Look up a card by id.
    pub fn card(&self, id: &str) -> Option<&AppCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// The category store (read-only; writes go through methods here).
    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    /// The settings (read-only; writes go through methods here).
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Pre-filled card owned by the currently active wallet.
    ///
    /// Callers adjust icon, limits or wallet before registering the card
    /// with `add_card`.
    pub fn draft_card(&self, name: impl Into<String>, package: impl Into<String>) -> AppCard {
        let mut card = AppCard::new(name, package);
        card.wallet = self.settings.active_wallet.clone();
        card
    }

    // ---- card operations --------------------------------------------------

    /// Register a card and list it in a category.
    ///
    /// `category_id` of `None` or an unknown id targets the default
    /// category, so a registered card is always listed somewhere.
    /// Returns the card id.
    pub fn add_card(&mut self, card: AppCard, category_id: Option<&str>) -> String {
        let target = match category_id {
            Some(id) if self.categories.get(id).is_some() => id.to_string(),
            Some(id) => {
                warn!(category = id, "unknown category, adding card to default");
                DEFAULT_CATEGORY_ID.to_string()
            }
            None => DEFAULT_CATEGORY_ID.to_string(),
        };
        let card_id = card.id.clone();
        let wallet_id = card.wallet.clone();
        self.cards.push(card);
        self.categories.add_card(&target, &card_id);
        self.push_event(Event::CardAdded {
            card_id: card_id.clone(),
            category_id: target,
            wallet_id,
            at: chrono::Utc::now(),
        });
        card_id
    }

    /// Drop a card from the registry and from every category listing it.
    ///
    /// Unknown ids are a silent no-op.
    pub fn remove_card(&mut self, card_id: &str) {
        let before = self.cards.len();
        self.cards.retain(|c| c.id != card_id);
        if self.cards.len() == before {
            debug!(card = card_id, "ignoring removal of unknown card");
            return;
        }
        self.categories.remove_card_everywhere(card_id);
        self.push_event(Event::CardRemoved {
            card_id: card_id.to_string(),
            at: chrono::Utc::now(),
        });
    }

    /// Move a registered card to another category.
    ///
    /// The source is wherever the card is currently listed. An unknown
    /// destination falls back to the default category. Unknown cards are a
    /// silent no-op.
    pub fn move_card(&mut self, card_id: &str, to_category: &str) {
        if self.card(card_id).is_none() {
            debug!(card = card_id, "ignoring move of unknown card");
            return;
        }
        let from = self
            .categories
            .find_card(card_id)
            .map(|c| c.id.clone())
            .unwrap_or_else(|| DEFAULT_CATEGORY_ID.to_string());
        let to = if self.categories.get(to_category).is_some() {
            to_category.to_string()
        } else {
            warn!(category = to_category, "unknown category, moving card to default");
            DEFAULT_CATEGORY_ID.to_string()
        };
        self.categories.move_card(card_id, &from, &to);
        self.push_event(Event::CardMoved {
            card_id: card_id.to_string(),
            from_category: from,
            to_category: to,
            at: chrono::Utc::now(),
        });
    }

    /// Set or clear one period's allowance on a card.
    ///
    /// # Errors
    /// Returns an error for unknown cards and for periods a `TimeLimit`
    /// cannot represent.
    pub fn set_limit(
        &mut self,
        card_id: &str,
        period: LimitPeriod,
        seconds: Option<u64>,
    ) -> Result<(), ValidationError> {
        let card = self
            .cards
            .iter_mut()
            .find(|c| c.id == card_id)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "card".to_string(),
                message: format!("no card with id '{card_id}'"),
            })?;
        card.time_limit.set(period, seconds)?;
        let stored = card.time_limit.get(period);
        self.push_event(Event::CardLimitChanged {
            card_id: card_id.to_string(),
            period,
            seconds: stored,
            at: chrono::Utc::now(),
        });
        Ok(())
    }

    // ---- category operations ----------------------------------------------

    /// Add a category and return its id.
    pub fn add_category(&mut self, name: impl Into<String>) -> String {
        let name = name.into();
        let id = self.categories.add_category(name.clone());
        self.push_event(Event::CategoryAdded {
            category_id: id.clone(),
            name,
            at: chrono::Utc::now(),
        });
        id
    }

    /// Remove a category, re-parenting its cards to the default category.
    ///
    /// The default category and unknown ids are silent no-ops.
    pub fn remove_category(&mut self, id: &str) {
        let reparented = match self.categories.get(id) {
            Some(c) if !c.is_default() => c.cards.len(),
            _ => {
                // Delegate so the store logs the no-op uniformly.
                self.categories.remove_category(id);
                return;
            }
        };
        self.categories.remove_category(id);
        self.push_event(Event::CategoryRemoved {
            category_id: id.to_string(),
            reparented_cards: reparented,
            at: chrono::Utc::now(),
        });
    }

    // ---- wallet and settings operations ------------------------------------

    /// Register a wallet and return its id.
    pub fn add_wallet(&mut self, name: impl Into<String>) -> String {
        let name = name.into();
        let id = self.settings.add_wallet(name.clone());
        self.push_event(Event::WalletAdded {
            wallet_id: id.clone(),
            name,
            at: chrono::Utc::now(),
        });
        id
    }

    /// Remove a wallet; cards it owned move to the default wallet.
    ///
    /// The default wallet is a silent no-op. Removing the active wallet
    /// resets the active wallet to default.
    pub fn remove_wallet(&mut self, id: &str) {
        if id == DEFAULT_WALLET_ID {
            self.settings.remove_wallet(id);
            return;
        }
        let existed = self.settings.has_wallet(id);
        let was_active = self.settings.active_wallet == id;
        self.settings.remove_wallet(id);

        let mut rehomed = 0;
        for card in self.cards.iter_mut().filter(|c| c.wallet == id) {
            card.wallet = DEFAULT_WALLET_ID.to_string();
            rehomed += 1;
        }

        if !existed && !was_active && rehomed == 0 {
            debug!(wallet = id, "ignoring removal of unknown wallet");
            return;
        }
        self.push_event(Event::WalletRemoved {
            wallet_id: id.to_string(),
            was_active,
            rehomed_cards: rehomed,
            at: chrono::Utc::now(),
        });
    }

    /// Make a wallet active. Unconditional, even for unregistered ids.
    pub fn set_active_wallet(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.settings.set_active_wallet(id.clone());
        self.push_event(Event::ActiveWalletChanged {
            wallet_id: id,
            at: chrono::Utc::now(),
        });
    }

    /// Merge a partial settings update. Empty updates emit no event.
    pub fn update_settings(&mut self, update: SettingsUpdate) {
        if update.is_empty() {
            return;
        }
        let fields = update
            .changed_fields()
            .into_iter()
            .map(String::from)
            .collect();
        self.settings.apply(update);
        self.push_event(Event::SettingsUpdated {
            fields,
            at: chrono::Utc::now(),
        });
    }

    // ---- events ------------------------------------------------------------

    /// Take all pending events, oldest first.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Number of pending events.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    // ---- snapshots ---------------------------------------------------------

    /// Serialize the state (without pending events) to JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore state from a snapshot produced by `to_snapshot_json`.
    ///
    /// The restored state is normalized: reserved defaults are recreated if
    /// the snapshot lost them and orphaned cards are re-listed under the
    /// default category.
    ///
    /// # Errors
    /// Returns an error if the snapshot is not valid JSON for this shape.
    pub fn from_snapshot_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut state: AppState = serde_json::from_str(json)?;
        state.normalize();
        Ok(state)
    }

    fn normalize(&mut self) {
        self.categories.ensure_default();
        self.settings.ensure_default();
        let orphans: Vec<String> = self
            .cards
            .iter()
            .filter(|c| self.categories.holders_of(&c.id) == 0)
            .map(|c| c.id.clone())
            .collect();
        for card_id in orphans {
            warn!(card = %card_id, "card listed by no category, attaching to default");
            self.categories.add_card(DEFAULT_CATEGORY_ID, &card_id);
        }
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    /// Raw operation applied against whatever ids exist at that point;
    /// indices resolve modulo the live collection sizes.
    #[derive(Debug, Clone)]
    enum Op {
        AddCategory(u8),
        RemoveCategory(u8),
        AddCard(u8),
        MoveCard(u8, u8),
        RemoveCard(u8),
        AddWallet(u8),
        RemoveWallet(u8),
        SetActiveWallet(u8),
        UpdateFab,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u8>().prop_map(Op::AddCategory),
            any::<u8>().prop_map(Op::RemoveCategory),
            any::<u8>().prop_map(Op::AddCard),
            (any::<u8>(), any::<u8>()).prop_map(|(a, b)| Op::MoveCard(a, b)),
            any::<u8>().prop_map(Op::RemoveCard),
            any::<u8>().prop_map(Op::AddWallet),
            any::<u8>().prop_map(Op::RemoveWallet),
            any::<u8>().prop_map(Op::SetActiveWallet),
            Just(Op::UpdateFab),
        ]
    }

    fn nth_category(state: &AppState, raw: u8) -> String {
        let ids: Vec<_> = state.categories().iter().map(|c| c.id.clone()).collect();
        ids[raw as usize % ids.len()].clone()
    }

    fn nth_card(state: &AppState, raw: u8) -> Option<String> {
        if state.cards().is_empty() {
            return None;
        }
        Some(state.cards()[raw as usize % state.cards().len()].id.clone())
    }

    fn nth_wallet(state: &AppState, raw: u8) -> String {
        let wallets = &state.settings().wallets;
        wallets[raw as usize % wallets.len()].id.clone()
    }

    fn apply(state: &mut AppState, op: Op) {
        match op {
            Op::AddCategory(n) => {
                state.add_category(format!("category-{n}"));
            }
            Op::RemoveCategory(raw) => {
                let id = nth_category(state, raw);
                state.remove_category(&id);
            }
            Op::AddCard(raw) => {
                let target = nth_category(state, raw);
                let card = state.draft_card(format!("app-{raw}"), format!("com.app{raw}"));
                state.add_card(card, Some(&target));
            }
            Op::MoveCard(card_raw, cat_raw) => {
                if let Some(card) = nth_card(state, card_raw) {
                    let target = nth_category(state, cat_raw);
                    state.move_card(&card, &target);
                }
            }
            Op::RemoveCard(raw) => {
                if let Some(card) = nth_card(state, raw) {
                    state.remove_card(&card);
                }
            }
            Op::AddWallet(n) => {
                state.add_wallet(format!("wallet-{n}"));
            }
            Op::RemoveWallet(raw) => {
                let id = nth_wallet(state, raw);
                state.remove_wallet(&id);
            }
            Op::SetActiveWallet(raw) => {
                let id = nth_wallet(state, raw);
                state.set_active_wallet(id);
            }
            Op::UpdateFab => {
                state.update_settings(SettingsUpdate {
                    fab_position: Some(crate::settings::FabPosition::Left),
                    ..Default::default()
                });
            }
        }
    }

    proptest! {
        /// Reserved rows survive, memberships stay consistent and the
        /// active wallet stays resolvable under any operation sequence.
        #[test]
        fn invariants_hold_for_any_sequence(ops in proptest::collection::vec(op_strategy(), 0..60)) {
            let mut state = AppState::new();
            for op in ops {
                apply(&mut state, op);

                prop_assert!(state.categories().get(DEFAULT_CATEGORY_ID).is_some());
                prop_assert!(state.settings().has_wallet(DEFAULT_WALLET_ID));
                // Each registered card is listed by exactly one category.
                for card in state.cards() {
                    prop_assert_eq!(state.categories().holders_of(&card.id), 1);
                }
                prop_assert_eq!(
                    state.categories().total_card_memberships(),
                    state.cards().len()
                );
                // Active wallet is registered; ops only activate known ids.
                prop_assert!(state.settings().active().is_some());
                // Cards never point at an unregistered wallet.
                for card in state.cards() {
                    prop_assert!(state.settings().has_wallet(&card.wallet));
                }
            }
        }
    }
}
