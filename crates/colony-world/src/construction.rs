//! Building lifecycle: placement, upgrade, demolition, construction
//! countdown, worker assignment and efficiency.
//!
//! A building moves `Constructing -> Operating` when its countdown reaches
//! zero and re-enters `Constructing` on every upgrade. Demolition removes it
//! from the collection outright. Survivors refer to buildings only by id,
//! so every operation that removes a building or a worker slot walks the
//! survivor list and clears the back-references it invalidates.
//!
//! None of these functions touch resource capacity. Callers must run
//! [`recompute_capacities`](crate::ledger::recompute_capacities) after a
//! building is placed, upgraded, completed or demolished.

use tracing::{debug, info, warn};

use colony_types::{
    BuildOption, Building, BuildingId, BuildingType, GameState, Position, ResourceAmounts,
    SurvivorId,
};

use crate::blueprint::BlueprintCatalog;
use crate::error::WorldError;
use crate::ledger::{self, SECONDS_PER_HOUR};

/// Share of the stored construction cost returned on demolition.
pub const DEMOLITION_REFUND_RATIO: f64 = 0.5;

/// Multiplier applied to the staffing ratio of a staffed building.
pub const STAFFED_MULTIPLIER: f64 = 1.2;

/// Efficiency of an operating building with no workers.
pub const UNSTAFFED_EFFICIENCY: f64 = 0.3;

/// Efficiency factor for each consumed resource that is running short.
pub const SHORTAGE_PENALTY: f64 = 0.5;

/// Result of a successful demolition.
#[derive(Debug, Clone, PartialEq)]
pub struct Demolition {
    /// The removed building.
    pub building: Building,
    /// Resources actually credited back (after capacity capping).
    pub refunded: ResourceAmounts,
    /// Survivors whose assignment was cleared.
    pub released: Vec<SurvivorId>,
}

// ---------------------------------------------------------------------------
// Placement, upgrade, demolition
// ---------------------------------------------------------------------------

/// Place a new level-1 building at `(x, y)`.
///
/// The level-1 cost is debited atomically and the building starts under
/// construction with the level-1 construction hours.
///
/// # Errors
///
/// Returns [`WorldError::InsufficientResources`] if the ledger cannot cover
/// the cost (nothing is debited), or [`WorldError::MissingBlueprint`] if
/// the catalog has no level-1 table for the type.
pub fn create(
    state: &mut GameState,
    catalog: &BlueprintCatalog,
    building_type: BuildingType,
    x: i32,
    y: i32,
) -> Result<BuildingId, WorldError> {
    let spec = catalog.level(building_type, 1)?;
    ledger::pay_cost(state, &spec.cost)?;

    let building = Building {
        id: BuildingId::new(),
        building_type,
        level: 1,
        position: Position { x, y },
        construction_time: spec.construction_hours,
        is_constructing: true,
        worker_capacity: spec.worker_capacity,
        assigned_workers: 0,
        resource_cost: spec.cost.clone(),
        resource_production: spec.production.clone(),
        resource_consumption: spec.consumption.clone(),
    };
    let id = building.id;
    state.buildings.push(building);
    state.game_stats.buildings_constructed = state.game_stats.buildings_constructed.saturating_add(1);

    info!(
        building_id = %id,
        ?building_type,
        x,
        y,
        hours = spec.construction_hours,
        "Building placed"
    );
    Ok(id)
}

/// Start upgrading a building to its next level.
///
/// Checks run in this order: the building exists, it is not already under
/// construction, it is below max level, the ledger covers the next-level
/// cost. On success the cost is debited, the level is bumped, the stored
/// tables are replaced with the new level's and the countdown restarts.
/// Returns the new level.
///
/// # Errors
///
/// [`WorldError::BuildingNotFound`], [`WorldError::AlreadyConstructing`],
/// [`WorldError::MaxLevelReached`] or [`WorldError::InsufficientResources`],
/// in that precedence.
pub fn upgrade(
    state: &mut GameState,
    catalog: &BlueprintCatalog,
    id: BuildingId,
) -> Result<u32, WorldError> {
    let building = state.building(id).ok_or(WorldError::BuildingNotFound(id))?;
    if building.is_constructing {
        return Err(WorldError::AlreadyConstructing(id));
    }
    let building_type = building.building_type;
    let max_level = catalog.max_level(building_type);
    if building.level >= max_level {
        return Err(WorldError::MaxLevelReached {
            building_type,
            max_level,
        });
    }
    let next_level = building.level.saturating_add(1);
    let spec = catalog.level(building_type, next_level)?;
    ledger::pay_cost(state, &spec.cost)?;

    let building = state
        .building_mut(id)
        .ok_or(WorldError::BuildingNotFound(id))?;
    building.level = next_level;
    building.construction_time = spec.construction_hours;
    building.is_constructing = true;
    building.worker_capacity = spec.worker_capacity;
    building.resource_cost = spec.cost.clone();
    building.resource_production = spec.production.clone();
    building.resource_consumption = spec.consumption.clone();
    let excess = building.assigned_workers.saturating_sub(building.worker_capacity);
    if excess > 0 {
        release_excess_workers(state, id, excess);
    }

    info!(building_id = %id, ?building_type, level = next_level, "Upgrade started");
    Ok(next_level)
}

/// Remove a building, release its workers and refund half its stored cost.
///
/// The refund is `floor(cost x 0.5)` per resource, capped at the current
/// capacity.
///
/// # Errors
///
/// Returns [`WorldError::BuildingNotFound`] if the id is unknown.
pub fn demolish(state: &mut GameState, id: BuildingId) -> Result<Demolition, WorldError> {
    let index = state
        .buildings
        .iter()
        .position(|b| b.id == id)
        .ok_or(WorldError::BuildingNotFound(id))?;
    let building = state.buildings.remove(index);

    let mut released = Vec::new();
    for survivor in &mut state.survivors {
        if survivor.assigned_building_id == Some(id) {
            survivor.release();
            released.push(survivor.id);
        }
    }

    let refund: ResourceAmounts = building
        .resource_cost
        .iter()
        .map(|(kind, cost)| (*kind, (cost * DEMOLITION_REFUND_RATIO).floor()))
        .collect();
    let refunded = ledger::refund(state, &refund);

    info!(
        building_id = %id,
        building_type = ?building.building_type,
        released = released.len(),
        refunded = ?refunded,
        "Building demolished"
    );
    Ok(Demolition {
        building,
        refunded,
        released,
    })
}

/// Count down every building under construction by `real_seconds / 3600`
/// hours. Returns the ids that finished during this call.
pub fn advance_construction(state: &mut GameState, real_seconds: f64) -> Vec<BuildingId> {
    let hours = (real_seconds / SECONDS_PER_HOUR).max(0.0);
    let mut completed = Vec::new();
    for building in state.buildings.iter_mut().filter(|b| b.is_constructing) {
        building.construction_time -= hours;
        if building.construction_time <= 0.0 {
            building.construction_time = 0.0;
            building.is_constructing = false;
            completed.push(building.id);
            info!(
                building_id = %building.id,
                building_type = ?building.building_type,
                level = building.level,
                "Construction complete"
            );
        }
    }
    completed
}

/// Pull every building back into its blueprint's level range.
///
/// A building whose level is outside `1..=max_level` is moved to the
/// nearest valid level and its stored cost, rates and worker capacity are
/// re-derived from that level's table. A countdown that is negative or NaN
/// is reset to zero. Returns the ids of the buildings that changed.
pub fn normalize_levels(state: &mut GameState, catalog: &BlueprintCatalog) -> Vec<BuildingId> {
    let mut changed = Vec::new();
    for building in &mut state.buildings {
        let mut touched = false;
        let max_level = catalog.max_level(building.building_type).max(1);
        let level = building.level.clamp(1, max_level);
        if level != building.level
            && let Ok(spec) = catalog.level(building.building_type, level)
        {
            warn!(
                building_id = %building.id,
                found = building.level,
                level,
                "Building level out of range"
            );
            building.level = level;
            building.worker_capacity = spec.worker_capacity;
            building.resource_cost = spec.cost.clone();
            building.resource_production = spec.production.clone();
            building.resource_consumption = spec.consumption.clone();
            touched = true;
        }
        if building.construction_time.is_nan() || building.construction_time < 0.0 {
            building.construction_time = 0.0;
            touched = true;
        }
        if touched {
            changed.push(building.id);
        }
    }
    changed
}

// ---------------------------------------------------------------------------
// Workers
// ---------------------------------------------------------------------------

/// Assign a survivor to work at a building.
///
/// A survivor already employed elsewhere is first released from that
/// building. The survivor's job follows the building type. Assigning a
/// survivor to the building they already work at is a no-op.
///
/// # Errors
///
/// [`WorldError::BuildingNotFound`] or [`WorldError::SurvivorNotFound`] for
/// unknown ids, [`WorldError::UnderConstruction`] if the building is not
/// operating, [`WorldError::AtCapacity`] if every slot is taken.
pub fn assign_worker(
    state: &mut GameState,
    building_id: BuildingId,
    survivor_id: SurvivorId,
) -> Result<(), WorldError> {
    let building = state
        .building(building_id)
        .ok_or(WorldError::BuildingNotFound(building_id))?;
    let survivor = state
        .survivor(survivor_id)
        .ok_or(WorldError::SurvivorNotFound(survivor_id))?;
    if !building.is_operating() {
        return Err(WorldError::UnderConstruction(building_id));
    }
    if survivor.assigned_building_id == Some(building_id) {
        return Ok(());
    }
    if !building.has_free_slot() {
        return Err(WorldError::AtCapacity {
            building: building_id,
            capacity: building.worker_capacity,
        });
    }
    let job_type = building.building_type.job_type();

    release_survivor(state, survivor_id);

    if let Some(building) = state.building_mut(building_id) {
        building.assigned_workers = building.assigned_workers.saturating_add(1);
    }
    if let Some(survivor) = state.survivor_mut(survivor_id) {
        survivor.assigned_building_id = Some(building_id);
        survivor.job_type = job_type;
    }
    debug!(%building_id, %survivor_id, ?job_type, "Worker assigned");
    Ok(())
}

/// Remove a survivor from a building's roster and set them idle.
///
/// # Errors
///
/// [`WorldError::BuildingNotFound`] or [`WorldError::SurvivorNotFound`] for
/// unknown ids, [`WorldError::UnderConstruction`] if the building is not
/// operating, [`WorldError::NotAssigned`] if the survivor does not work
/// there.
pub fn unassign_worker(
    state: &mut GameState,
    building_id: BuildingId,
    survivor_id: SurvivorId,
) -> Result<(), WorldError> {
    let building = state
        .building(building_id)
        .ok_or(WorldError::BuildingNotFound(building_id))?;
    let survivor = state
        .survivor(survivor_id)
        .ok_or(WorldError::SurvivorNotFound(survivor_id))?;
    if !building.is_operating() {
        return Err(WorldError::UnderConstruction(building_id));
    }
    if survivor.assigned_building_id != Some(building_id) {
        return Err(WorldError::NotAssigned {
            survivor: survivor_id,
            building: building_id,
        });
    }

    release_survivor(state, survivor_id);
    debug!(%building_id, %survivor_id, "Worker unassigned");
    Ok(())
}

/// Clear a survivor's assignment, freeing the slot it held, and set the
/// survivor idle. Does nothing for unknown ids.
///
/// Works regardless of the building's construction state; used when a
/// survivor is removed, rests or changes building.
pub fn release_survivor(state: &mut GameState, survivor_id: SurvivorId) {
    let Some(survivor) = state.survivor_mut(survivor_id) else {
        return;
    };
    let previous = survivor.assigned_building_id;
    survivor.release();
    if let Some(building) = previous.and_then(|id| state.building_mut(id)) {
        building.assigned_workers = building.assigned_workers.saturating_sub(1);
    }
}

/// Release the most recently listed workers of a building until `count`
/// slots are freed.
fn release_excess_workers(state: &mut GameState, building_id: BuildingId, count: u32) {
    let to_release: Vec<SurvivorId> = state
        .survivors
        .iter()
        .rev()
        .filter(|s| s.assigned_building_id == Some(building_id))
        .take(usize::try_from(count).unwrap_or(usize::MAX))
        .map(|s| s.id)
        .collect();
    for survivor_id in to_release {
        release_survivor(state, survivor_id);
    }
}

// ---------------------------------------------------------------------------
// Efficiency and options
// ---------------------------------------------------------------------------

/// Working efficiency of a building in `[0, 1]`.
///
/// Zero while under construction. Otherwise
/// `min(1, assigned / capacity x 1.2)` when staffed, `0.3` when not,
/// halved once for every consumed resource whose stored amount is below
/// the hourly requirement.
pub fn building_efficiency(building: &Building, state: &GameState) -> f64 {
    if building.is_constructing {
        return 0.0;
    }
    let mut efficiency = if building.assigned_workers > 0 && building.worker_capacity > 0 {
        let ratio = f64::from(building.assigned_workers) / f64::from(building.worker_capacity);
        (ratio * STAFFED_MULTIPLIER).min(1.0)
    } else {
        UNSTAFFED_EFFICIENCY
    };
    for (kind, required) in &building.resource_consumption {
        if state.amount(*kind) < *required {
            efficiency *= SHORTAGE_PENALTY;
        }
    }
    efficiency
}

/// Efficiency of the building with the given id.
///
/// # Errors
///
/// Returns [`WorldError::BuildingNotFound`] if the id is unknown.
pub fn efficiency(state: &GameState, id: BuildingId) -> Result<f64, WorldError> {
    let building = state.building(id).ok_or(WorldError::BuildingNotFound(id))?;
    Ok(building_efficiency(building, state))
}

/// Every building type with its level-1 cost and whether it is affordable
/// right now.
pub fn buildable_options(state: &GameState, catalog: &BlueprintCatalog) -> Vec<BuildOption> {
    BuildingType::ALL
        .iter()
        .filter_map(|building_type| {
            let spec = catalog.level(*building_type, 1).ok()?;
            Some(BuildOption {
                building_type: *building_type,
                cost: spec.cost.clone(),
                construction_hours: spec.construction_hours,
                affordable: ledger::has_enough_resources(&state.resources, &spec.cost),
            })
        })
        .collect()
}
