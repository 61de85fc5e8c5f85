//! # Timewallet Core Library
//!
//! This library provides the core business logic for Timewallet, a personal
//! screen-time manager. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any GUI being
//! a thin rendering layer over the same core library.
//!
//! ## Architecture
//!
//! - **State**: A single explicitly-owned `AppState` (card registry,
//!   category store, settings) whose mutation methods are the only write
//!   path; every mutation queues an `Event`
//! - **Storage**: SQLite-backed key-value snapshots and TOML-based
//!   configuration
//! - **Statistics**: Usage summaries and demo aggregates for the
//!   statistics and workspace views
//!
//! ## Key Components
//!
//! - [`AppState`]: The application state and its operations
//! - [`Database`]: Key-value persistence (flags and state snapshot)
//! - [`Config`]: Application configuration management
//! - [`Event`]: Change notifications drained by UI layers

pub mod card;
pub mod category;
pub mod error;
pub mod events;
pub mod mock;
pub mod settings;
pub mod state;
pub mod stats;
pub mod storage;
pub mod workspace;

pub use card::{AppCard, LimitPeriod, TimeLimit};
pub use category::{Categories, Category, DEFAULT_CATEGORY_ID, DEFAULT_CATEGORY_NAME};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use settings::{
    FabPosition, Settings, SettingsUpdate, SwipeDirection, Wallet, DEFAULT_WALLET_ID,
    DEFAULT_WALLET_NAME,
};
pub use state::AppState;
pub use stats::{DailyStats, DailySummary, UsageSample, WeeklyStats};
pub use storage::{Config, Database, Tab};
pub use workspace::{Workspace, WorkspaceTask};
