//! SQLite-backed key-value storage.
//!
//! The storage surface is deliberately small: one kv table holding
//! - the first-launch marker,
//! - the last selected screen,
//! - the JSON snapshot of the application state.
//!
//! Corrupt or missing values fall back to defaults with a warning; stores
//! never see storage errors.

use std::path::Path;

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::data_dir;
use crate::error::StorageError;
use crate::state::AppState;

const KEY_FIRST_LAUNCH: &str = "first_launch";
const KEY_LAST_TAB: &str = "last_tab";
const KEY_STATE: &str = "state";

/// Top-level screens the UI can restore on start.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Cards,
    Categories,
    Wallets,
    Stats,
    Workspace,
    Settings,
}

impl Tab {
    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Cards => "cards",
            Tab::Categories => "categories",
            Tab::Wallets => "wallets",
            Tab::Stats => "stats",
            Tab::Workspace => "workspace",
            Tab::Settings => "settings",
        }
    }

    /// Parse a stored tab name; unknown names yield `None`.
    pub fn parse(s: &str) -> Option<Tab> {
        match s {
            "cards" => Some(Tab::Cards),
            "categories" => Some(Tab::Categories),
            "wallets" => Some(Tab::Wallets),
            "stats" => Some(Tab::Stats),
            "workspace" => Some(Tab::Workspace),
            "settings" => Some(Tab::Settings),
            _ => None,
        }
    }
}

/// SQLite database holding the kv store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data dir>/timewallet.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        Self::open_at(&data_dir()?)
    }

    /// Open the database inside an explicit directory.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(dir: &Path) -> Result<Self, StorageError> {
        let path = dir.join("timewallet.db");
        let conn = Connection::open(&path).map_err(|source| StorageError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        super::migrations::migrate(&self.conn)
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))
    }

    /// Get a value from the kv store.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// True until `mark_launched` has run once.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn is_first_launch(&self) -> Result<bool, StorageError> {
        Ok(self.kv_get(KEY_FIRST_LAUNCH)?.is_none())
    }

    /// Record that the app has launched.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn mark_launched(&self) -> Result<(), StorageError> {
        self.kv_set(KEY_FIRST_LAUNCH, "false")
    }

    /// The last selected screen, if one was recorded and still parses.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn last_tab(&self) -> Result<Option<Tab>, StorageError> {
        match self.kv_get(KEY_LAST_TAB)? {
            Some(raw) => {
                let tab = Tab::parse(&raw);
                if tab.is_none() {
                    warn!(value = %raw, "unreadable last-tab value, falling back to none");
                }
                Ok(tab)
            }
            None => Ok(None),
        }
    }

    /// Record the last selected screen.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn set_last_tab(&self, tab: Tab) -> Result<(), StorageError> {
        self.kv_set(KEY_LAST_TAB, tab.as_str())
    }

    /// Load the application state snapshot.
    ///
    /// A missing snapshot yields a fresh default state; a corrupt snapshot
    /// is logged and also yields the default. Only query failures error.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn load_state(&self) -> Result<AppState, StorageError> {
        match self.kv_get(KEY_STATE)? {
            Some(json) => Ok(AppState::from_snapshot_json(&json).unwrap_or_else(|e| {
                warn!(error = %e, "unreadable state snapshot, falling back to default");
                AppState::new()
            })),
            None => Ok(AppState::new()),
        }
    }

    /// Persist the application state snapshot.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save_state(&self, state: &AppState) -> Result<(), StorageError> {
        let json = state
            .to_snapshot_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.kv_set(KEY_STATE, &json)
    }
}
