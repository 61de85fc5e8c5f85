//! Categories and the category store.
//!
//! Categories group cards by id. A reserved default category ("Uncategorized")
//! always exists and absorbs the cards of any category that is removed. Store
//! operations are total: unknown ids and no-op removals are logged at debug
//! level and otherwise ignored.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Id of the reserved default category.
pub const DEFAULT_CATEGORY_ID: &str = "default";

/// Display name of the reserved default category.
pub const DEFAULT_CATEGORY_NAME: &str = "Uncategorized";

/// A named group of cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Ids of the cards listed by this category, in insertion order
    pub cards: Vec<String>,
}

impl Category {
    /// Create a new empty category with a minted id.
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            id: format!("cat-{}-{}", Utc::now().timestamp(), uuid::Uuid::new_v4()),
            name: name.into(),
            cards: Vec::new(),
        }
    }

    /// The reserved default category, empty.
    pub fn default_category() -> Self {
        Category {
            id: DEFAULT_CATEGORY_ID.to_string(),
            name: DEFAULT_CATEGORY_NAME.to_string(),
            cards: Vec::new(),
        }
    }

    /// True for the reserved default category.
    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_CATEGORY_ID
    }

    /// True when this category lists the card.
    pub fn contains(&self, card_id: &str) -> bool {
        self.cards.iter().any(|c| c == card_id)
    }
}

/// Ordered collection of categories with the default category always present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Categories {
    items: Vec<Category>,
}

impl Default for Categories {
    fn default() -> Self {
        Categories {
            items: vec![Category::default_category()],
        }
    }
}

impl Categories {
    /// Create a store holding only the empty default category.
    pub fn new() -> Self {
        Categories::default()
    }

    /// Add a category and return its id.
    pub fn add_category(&mut self, name: impl Into<String>) -> String {
        let category = Category::new(name);
        let id = category.id.clone();
        self.items.push(category);
        id
    }

    /// Remove a category, re-parenting its cards to the default category.
    ///
    /// The default category and unknown ids are silent no-ops. Re-parented
    /// cards keep their relative order, appended after the default
    /// category's existing cards.
    pub fn remove_category(&mut self, id: &str) {
        if id == DEFAULT_CATEGORY_ID {
            debug!("ignoring removal of the default category");
            return;
        }
        let Some(pos) = self.items.iter().position(|c| c.id == id) else {
            debug!(category = id, "ignoring removal of unknown category");
            return;
        };
        let removed = self.items.remove(pos);
        let default = self.default_index();
        self.items[default].cards.extend(removed.cards);
    }

    /// Append a card id to a category. Unknown categories are a no-op.
    ///
    /// Appending an id the category already lists is allowed; callers that
    /// need uniqueness check `contains` first.
    pub fn add_card(&mut self, category_id: &str, card_id: &str) {
        match self.items.iter_mut().find(|c| c.id == category_id) {
            Some(category) => category.cards.push(card_id.to_string()),
            None => debug!(category = category_id, "ignoring card add to unknown category"),
        }
    }

    /// Remove every occurrence of a card id from a category.
    ///
    /// Unknown categories and non-member cards are silent no-ops.
    pub fn remove_card(&mut self, category_id: &str, card_id: &str) {
        match self.items.iter_mut().find(|c| c.id == category_id) {
            Some(category) => category.cards.retain(|c| c != card_id),
            None => debug!(
                category = category_id,
                "ignoring card removal from unknown category"
            ),
        }
    }

    /// Move a card between categories as one operation.
    ///
    /// Removes the card from `from`, then appends it to `to`. The card is
    /// appended to the destination even when the source did not list it,
    /// and a move onto the source itself leaves the card listed once.
    pub fn move_card(&mut self, card_id: &str, from: &str, to: &str) {
        self.remove_card(from, card_id);
        self.add_card(to, card_id);
    }

    /// Remove every occurrence of a card id from all categories.
    pub fn remove_card_everywhere(&mut self, card_id: &str) {
        for category in &mut self.items {
            category.cards.retain(|c| c != card_id);
        }
    }

    /// Look up a category by id.
    pub fn get(&self, id: &str) -> Option<&Category> {
        self.items.iter().find(|c| c.id == id)
    }

    /// The first category listing this card, if any.
    pub fn find_card(&self, card_id: &str) -> Option<&Category> {
        self.items.iter().find(|c| c.contains(card_id))
    }

    /// Number of categories listing this card.
    pub fn holders_of(&self, card_id: &str) -> usize {
        self.items.iter().filter(|c| c.contains(card_id)).count()
    }

    /// Iterate categories in order (default first by construction).
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.items.iter()
    }

    /// Number of categories, including the default one.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when only holding zero categories (never the case in practice).
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of card memberships across all categories.
    pub fn total_card_memberships(&self) -> usize {
        self.items.iter().map(|c| c.cards.len()).sum()
    }

    /// Index of the default category, recreating it if a snapshot lost it.
    fn default_index(&mut self) -> usize {
        match self.items.iter().position(|c| c.id == DEFAULT_CATEGORY_ID) {
            Some(pos) => pos,
            None => {
                self.items.insert(0, Category::default_category());
                0
            }
        }
    }

    /// Restore the default category if missing. Used after deserializing.
    pub(crate) fn ensure_default(&mut self) {
        self.default_index();
    }
}
