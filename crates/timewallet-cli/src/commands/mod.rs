//! One command module per screen surface.

pub mod card;
pub mod category;
pub mod config;
pub mod settings;
pub mod stats;
pub mod status;
pub mod wallet;
pub mod workspace;

use timewallet_core::state::AppState;
use timewallet_core::storage::Database;
use tracing::debug;

/// Persist the state snapshot, draining queued events into the debug log.
pub(crate) fn persist(db: &Database, state: &mut AppState) -> Result<(), Box<dyn std::error::Error>> {
    for event in state.drain_events() {
        debug!(event = ?event, "state change");
    }
    db.save_state(state)?;
    Ok(())
}
