//! Outward event surface.
//!
//! The colony pushes exactly one event type, [`GameEvent::GameOver`]. Every
//! other change is observed by polling the snapshot.

use serde::Serialize;

use colony_types::GameOverReport;

/// An event pushed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum GameEvent {
    /// The colony has fallen; no further ticks are admitted.
    GameOver(GameOverReport),
}

/// Receiver for [`GameEvent`]s.
///
/// Implementations can use this to notify a UI, write a log line or push to
/// a channel.
pub trait EventSink: Send {
    /// Called once per emitted event.
    fn emit(&mut self, event: &GameEvent);
}

/// A sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl EventSink for NoOpSink {
    fn emit(&mut self, _event: &GameEvent) {}
}
