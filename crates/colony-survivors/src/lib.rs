//! Survivors of the colony simulation.
//!
//! Owns everything about people: the four vital integrators, stochastic
//! sickness and injury, skill growth, death, and the population commands the
//! player issues (add, remove, heal, feed, rest). Randomness is always an
//! injected `&mut impl Rng` so every outcome is reproducible from a seed.
//!
//! # Modules
//!
//! - [`conditions`] -- Sickness, injury, recovery and skill-gain rolls, with
//!   the probabilities exposed as pure functions.
//! - [`config`] -- [`PopulationConfig`] tunables.
//! - [`death`] -- Death check and cause.
//! - [`error`] -- [`PopulationError`].
//! - [`names`] -- Survivor name generator.
//! - [`population`] -- Membership, care commands, the per-tick step and
//!   read-only views.
//! - [`vitals`] -- Hunger, stamina, temperature and health integrators.

pub mod conditions;
pub mod config;
pub mod death;
pub mod error;
pub mod names;
pub mod population;
pub mod vitals;

// Re-export primary types at crate root.
pub use conditions::{ConditionChanges, check_health_conditions};
pub use config::PopulationConfig;
pub use death::{Death, DeathCause, check_death};
pub use error::PopulationError;
pub use names::generate_name;
pub use population::{
    PopulationReport, add_survivor, advance, attention_list, feed, heal, process_deaths,
    random_skills, remove_survivor, rest, statistics, survivor_issues,
};
pub use vitals::{VitalContext, apply_vitals, clamp_vitals};
