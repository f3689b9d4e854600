//! Event sink that turns game events into log lines.

use tracing::{info, warn};

use colony_core::{EventSink, GameEvent};

/// Logs every [`GameEvent`] as a JSON payload at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: &GameEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => info!(%payload, "Game event"),
            Err(err) => warn!(%err, "Failed to serialize game event"),
        }
    }
}
