//! Tick orchestration for the colony simulation.
//!
//! This crate wires the world and survivor subsystems into a running game:
//! it owns the clock, the fixed-order tick cycle, the tick gate, the
//! game-over rule, the save envelope and the configuration file. Hosts
//! create a [`Colony`] and call [`Colony::update`] from a periodic callback.
//!
//! # Modules
//!
//! - [`clock`] -- Game time, day and season rollover, ambient temperature.
//! - [`colony`] -- The [`Colony`] orchestrator and player command surface.
//! - [`config`] -- [`SimulationConfig`] loaded from YAML.
//! - [`error`] -- [`ColonyError`].
//! - [`events`] -- [`GameEvent`] and the [`EventSink`] seam.
//! - [`gate`] -- Tick debounce and autosave cadence.
//! - [`persistence`] -- Save envelope, JSON codec and the [`SaveStore`] seam.
//! - [`setup`] -- Founding a new colony.
//! - [`snapshot`] -- Read-only projections for the UI.
//! - [`tick`] -- The four-phase tick cycle.

pub mod clock;
pub mod colony;
pub mod config;
pub mod error;
pub mod events;
pub mod gate;
pub mod persistence;
pub mod setup;
pub mod snapshot;
pub mod tick;

pub use clock::ClockEvents;
pub use colony::{Colony, TerminalPredicate};
pub use config::{ConfigError, SimulationConfig};
pub use error::ColonyError;
pub use events::{EventSink, GameEvent, NoOpSink};
pub use gate::{AutosaveTracker, TickGate};
pub use persistence::{MemoryStore, PersistenceError, SAVE_VERSION, SaveStore};
pub use tick::TickSummary;
