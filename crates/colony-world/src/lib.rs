//! Resources and buildings for the colony simulation.
//!
//! This crate owns everything that is about stock and structures rather
//! than people: the resource ledger with its capacity and alert rules, the
//! building lifecycle, the blueprint tables that drive both, and the colony
//! a fresh game starts from. All functions operate on a borrowed
//! [`GameState`]; nothing here holds state of its own.
//!
//! # Modules
//!
//! - [`blueprint`] -- [`BlueprintCatalog`] parsed from `data/buildings.yaml`.
//! - [`construction`] -- Placement, upgrade, demolition, countdown, workers
//!   and efficiency.
//! - [`error`] -- [`WorldError`] and its mapping onto the shared taxonomy.
//! - [`ledger`] -- Hourly flow, settlement, direct mutation, capacity and
//!   alerts.
//! - [`starting_colony`] -- The state a new game starts from.
//!
//! [`GameState`]: colony_types::GameState

pub mod blueprint;
pub mod construction;
pub mod error;
pub mod ledger;
pub mod starting_colony;

// Re-export primary types at crate root.
pub use blueprint::{BlueprintCatalog, BuildingBlueprint, LevelSpec};
pub use construction::{
    Demolition, advance_construction, assign_worker, buildable_options, building_efficiency,
    create, demolish, efficiency, normalize_levels, release_survivor, unassign_worker, upgrade,
};
pub use error::WorldError;
pub use ledger::{
    FlowRate, LedgerConfig, SECONDS_PER_HOUR, SettleReport, add_resource, flow_rates,
    has_enough_resources, pay_cost, recompute_capacities, refund, remove_resource,
    resource_alerts, settle,
};
pub use starting_colony::{create_starting_colony, default_starting_resources};
