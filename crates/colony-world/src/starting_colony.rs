//! The colony a fresh game starts from: seeded stocks plus a completed
//! Shelter and Warehouse. Survivors are added by the population system.

use std::collections::BTreeMap;

use colony_types::{
    Building, BuildingId, BuildingType, Difficulty, GameState, GameStats, GameTime, Position,
    ResourceAmounts, ResourceKind, ResourceStock,
};

use crate::blueprint::BlueprintCatalog;
use crate::error::WorldError;
use crate::ledger::{self, LedgerConfig};

/// Buildings every new colony starts with, already complete, and where.
pub const STARTER_BUILDINGS: [(BuildingType, Position); 2] = [
    (BuildingType::Shelter, Position { x: 0, y: 0 }),
    (BuildingType::Warehouse, Position { x: 2, y: 0 }),
];

/// Stock levels of a fresh colony.
pub fn default_starting_resources() -> ResourceAmounts {
    BTreeMap::from([
        (ResourceKind::Food, 100.0),
        (ResourceKind::Wood, 200.0),
        (ResourceKind::Steel, 30.0),
        (ResourceKind::Electricity, 50.0),
        (ResourceKind::Fuel, 50.0),
    ])
}

/// Build the starting [`GameState`] without survivors.
///
/// Starter buildings are placed complete at level 1 without charging their
/// cost and without counting towards `buildings_constructed`. Capacities
/// are computed from the base capacity plus the starter warehouse bonus
/// before the starting amounts are clamped in.
///
/// # Errors
///
/// Returns [`WorldError::MissingBlueprint`] if the catalog lacks a level-1
/// table for a starter building.
pub fn create_starting_colony(
    catalog: &BlueprintCatalog,
    ledger_config: &LedgerConfig,
    starting_resources: &ResourceAmounts,
    difficulty: Difficulty,
) -> Result<GameState, WorldError> {
    let mut buildings = Vec::with_capacity(STARTER_BUILDINGS.len());
    for (building_type, position) in STARTER_BUILDINGS {
        let spec = catalog.level(building_type, 1)?;
        buildings.push(Building {
            id: BuildingId::new(),
            building_type,
            level: 1,
            position,
            construction_time: 0.0,
            is_constructing: false,
            worker_capacity: spec.worker_capacity,
            assigned_workers: 0,
            resource_cost: spec.cost.clone(),
            resource_production: spec.production.clone(),
            resource_consumption: spec.consumption.clone(),
        });
    }

    let mut state = GameState {
        resources: ResourceKind::ALL
            .iter()
            .map(|kind| (*kind, ResourceStock::default()))
            .collect(),
        buildings,
        survivors: Vec::new(),
        time: GameTime::default(),
        game_stats: GameStats::default(),
        difficulty,
    };
    ledger::recompute_capacities(&mut state, catalog, ledger_config);
    for (kind, amount) in starting_resources {
        ledger::add_resource(&mut state, *kind, *amount);
    }
    Ok(state)
}
