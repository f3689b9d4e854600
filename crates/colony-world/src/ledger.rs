//! The resource ledger: hourly flow, settlement, capacity and alerts.
//!
//! Every tick [`settle`] sums the hourly production and consumption of all
//! operating buildings, adds the survivors' food draw (and fuel draw in
//! winter), scales the net flow by the season and difficulty multipliers and
//! by the elapsed fraction of an hour, and applies it to the stored amount.
//! Amounts are clamped into `[0, capacity]` after every mutation in this
//! module.
//!
//! Capacity is not stored independently: [`recompute_capacities`] derives it
//! from the configured base capacity plus the storage bonus of every
//! completed building, and must run after any building mutation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use colony_types::{
    AlertLevel, BuildingType, GameState, ResourceAlert, ResourceAmounts, ResourceKind,
    ResourceStock, Season, Survivor,
};

use crate::blueprint::BlueprintCatalog;
use crate::construction;
use crate::error::WorldError;

/// Seconds in one hour; converts real elapsed seconds into hourly rate steps.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Tunable ledger constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Capacity of each resource before any storage bonus.
    pub base_capacity: ResourceAmounts,
    /// Food eaten per survivor per hour before multipliers.
    pub food_per_survivor_per_hour: f64,
    /// Food multiplier for survivors with a working job.
    pub working_food_multiplier: f64,
    /// Food multiplier for sick or injured survivors.
    pub unwell_food_multiplier: f64,
    /// Food multiplier applied in winter.
    pub winter_food_multiplier: f64,
    /// Fuel burned per survivor per hour in winter.
    pub winter_fuel_per_survivor_per_hour: f64,
    /// Shelter level from which a shelter counts as insulated.
    pub insulated_shelter_level: u32,
    /// Winter fuel reduction per insulated shelter.
    pub insulation_discount: f64,
    /// Lowest winter fuel factor reachable through insulation.
    pub insulation_floor: f64,
    /// Net-flow multiplier per season and resource (missing entries are 1).
    pub season_multipliers: BTreeMap<Season, ResourceAmounts>,
    /// Fill ratio below which a resource is flagged [`AlertLevel::Low`].
    pub low_alert_ratio: f64,
    /// Fill ratio below which a resource is flagged [`AlertLevel::Critical`].
    pub critical_alert_ratio: f64,
    /// Scale building production by staffing efficiency.
    pub staffing_affects_output: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_capacity: BTreeMap::from([
                (ResourceKind::Food, 400.0),
                (ResourceKind::Wood, 800.0),
                (ResourceKind::Steel, 400.0),
                (ResourceKind::Electricity, 250.0),
                (ResourceKind::Fuel, 250.0),
            ]),
            food_per_survivor_per_hour: 1.0,
            working_food_multiplier: 1.5,
            unwell_food_multiplier: 1.2,
            winter_food_multiplier: 1.3,
            winter_fuel_per_survivor_per_hour: 0.5,
            insulated_shelter_level: 3,
            insulation_discount: 0.1,
            insulation_floor: 0.5,
            season_multipliers: BTreeMap::from([
                (Season::Spring, BTreeMap::from([(ResourceKind::Food, 1.2)])),
                (Season::Summer, BTreeMap::new()),
                (Season::Autumn, BTreeMap::from([(ResourceKind::Food, 0.9)])),
                (
                    Season::Winter,
                    BTreeMap::from([(ResourceKind::Food, 0.6), (ResourceKind::Wood, 0.8)]),
                ),
            ]),
            low_alert_ratio: 0.2,
            critical_alert_ratio: 0.05,
            staffing_affects_output: false,
        }
    }
}

impl LedgerConfig {
    /// Net-flow multiplier for a resource in a season.
    pub fn season_multiplier(&self, season: Season, kind: ResourceKind) -> f64 {
        self.season_multipliers
            .get(&season)
            .and_then(|table| table.get(&kind))
            .copied()
            .unwrap_or(1.0)
    }
}

/// Hourly production and consumption of one resource.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlowRate {
    /// Units produced per hour.
    pub production: f64,
    /// Units consumed per hour.
    pub consumption: f64,
}

impl FlowRate {
    /// Production minus consumption.
    pub fn net(self) -> f64 {
        self.production - self.consumption
    }
}

/// What one [`settle`] call did to the ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettleReport {
    /// Hours integrated.
    pub hours: f64,
    /// Change actually applied per resource, after clamping.
    pub changes: BTreeMap<ResourceKind, f64>,
}

// ---------------------------------------------------------------------------
// Flow
// ---------------------------------------------------------------------------

/// Compute the hourly flow of every resource from the current state.
///
/// Production and consumption come from the stored level tables of operating
/// buildings. Survivors add food consumption, and in winter fuel
/// consumption reduced by insulated shelters. Season and difficulty
/// multipliers are not applied here.
pub fn flow_rates(state: &GameState, config: &LedgerConfig) -> BTreeMap<ResourceKind, FlowRate> {
    let mut rates: BTreeMap<ResourceKind, FlowRate> = ResourceKind::ALL
        .iter()
        .map(|kind| (*kind, FlowRate::default()))
        .collect();

    for building in state.buildings.iter().filter(|b| b.is_operating()) {
        let output_scale = if config.staffing_affects_output {
            construction::building_efficiency(building, state)
        } else {
            1.0
        };
        for (kind, rate) in &building.resource_production {
            rates.entry(*kind).or_default().production += rate * output_scale;
        }
        for (kind, rate) in &building.resource_consumption {
            rates.entry(*kind).or_default().consumption += rate;
        }
    }

    let winter = state.time.season == Season::Winter;
    let food_draw: f64 = state
        .survivors
        .iter()
        .map(|survivor| survivor_food_draw(survivor, winter, config))
        .sum();
    rates.entry(ResourceKind::Food).or_default().consumption += food_draw;

    if winter {
        rates.entry(ResourceKind::Fuel).or_default().consumption +=
            winter_fuel_draw(state, config);
    }

    rates
}

/// Hourly food eaten by one survivor.
pub fn survivor_food_draw(survivor: &Survivor, winter: bool, config: &LedgerConfig) -> f64 {
    let mut draw = config.food_per_survivor_per_hour;
    if survivor.job_type.is_working() {
        draw *= config.working_food_multiplier;
    }
    if survivor.is_unwell() {
        draw *= config.unwell_food_multiplier;
    }
    if winter {
        draw *= config.winter_food_multiplier;
    }
    draw
}

/// Hourly fuel burned for heating in winter.
///
/// `base x headcount x max(floor, 1 - discount x insulated_shelters)`.
pub fn winter_fuel_draw(state: &GameState, config: &LedgerConfig) -> f64 {
    let insulated = state
        .buildings
        .iter()
        .filter(|b| {
            b.building_type == BuildingType::Shelter
                && b.is_operating()
                && b.level >= config.insulated_shelter_level
        })
        .count();
    let insulated = u32::try_from(insulated).unwrap_or(u32::MAX);
    let factor = config
        .insulation_discount
        .mul_add(-f64::from(insulated), 1.0)
        .max(config.insulation_floor);
    let headcount = u32::try_from(state.survivors.len()).unwrap_or(u32::MAX);
    config.winter_fuel_per_survivor_per_hour * f64::from(headcount) * factor
}

// ---------------------------------------------------------------------------
// Settlement
// ---------------------------------------------------------------------------

/// Apply `real_seconds` of resource flow to the ledger.
///
/// Net hourly flow is multiplied by the season multiplier for the kind, by
/// `difficulty_multiplier` and by `real_seconds / 3600`, then added to the
/// stored amount and clamped. Stored rates are refreshed. Positive applied
/// changes count towards `total_resources_collected`.
pub fn settle(
    state: &mut GameState,
    real_seconds: f64,
    config: &LedgerConfig,
    difficulty_multiplier: f64,
) -> SettleReport {
    let hours = (real_seconds / SECONDS_PER_HOUR).max(0.0);
    let rates = flow_rates(state, config);
    let season = state.time.season;
    let mut report = SettleReport {
        hours,
        changes: BTreeMap::new(),
    };

    for (kind, flow) in rates {
        let delta =
            flow.net() * config.season_multiplier(season, kind) * difficulty_multiplier * hours;
        let Some(stock) = state.resources.get_mut(&kind) else {
            continue;
        };
        let before = stock.amount;
        stock.amount += delta;
        stock.clamp();
        stock.production_rate = flow.production;
        stock.consumption_rate = flow.consumption;

        let applied = stock.amount - before;
        if applied > 0.0 {
            state.game_stats.total_resources_collected += applied;
        }
        report.changes.insert(kind, applied);
    }

    debug!(hours, changes = ?report.changes, "Ledger settled");
    report
}

// ---------------------------------------------------------------------------
// Direct mutation
// ---------------------------------------------------------------------------

/// Add up to `amount` of a resource, stopping at capacity.
///
/// Returns the amount actually added. Negative or NaN requests add nothing.
pub fn add_resource(state: &mut GameState, kind: ResourceKind, amount: f64) -> f64 {
    if amount.is_nan() || amount <= 0.0 {
        return 0.0;
    }
    let Some(stock) = state.resources.get_mut(&kind) else {
        return 0.0;
    };
    let before = stock.amount;
    stock.amount += amount;
    stock.clamp();
    stock.amount - before
}

/// Remove exactly `amount` of a resource.
///
/// Returns `false` and leaves the ledger untouched if the request is
/// negative, NaN, or exceeds the stored amount.
pub fn remove_resource(state: &mut GameState, kind: ResourceKind, amount: f64) -> bool {
    if amount.is_nan() || amount < 0.0 {
        return false;
    }
    let Some(stock) = state.resources.get_mut(&kind) else {
        return false;
    };
    if amount > stock.amount {
        return false;
    }
    stock.amount -= amount;
    stock.clamp();
    true
}

/// Units missing per resource to cover `cost` (empty when affordable).
pub fn shortfall(
    resources: &BTreeMap<ResourceKind, ResourceStock>,
    cost: &ResourceAmounts,
) -> ResourceAmounts {
    let mut missing = ResourceAmounts::new();
    for (kind, required) in cost {
        let available = resources.get(kind).map_or(0.0, |stock| stock.amount);
        if *required > available {
            missing.insert(*kind, required - available);
        }
    }
    missing
}

/// Whether the ledger covers every entry of `cost`.
pub fn has_enough_resources(
    resources: &BTreeMap<ResourceKind, ResourceStock>,
    cost: &ResourceAmounts,
) -> bool {
    shortfall(resources, cost).is_empty()
}

/// Debit a cost atomically: either every entry is paid or nothing is.
///
/// # Errors
///
/// Returns [`WorldError::InsufficientResources`] with the shortfall if any
/// entry is not covered.
pub fn pay_cost(state: &mut GameState, cost: &ResourceAmounts) -> Result<(), WorldError> {
    let missing = shortfall(&state.resources, cost);
    if !missing.is_empty() {
        return Err(WorldError::InsufficientResources { shortfall: missing });
    }
    for (kind, required) in cost {
        if let Some(stock) = state.resources.get_mut(kind) {
            stock.amount -= required.max(0.0);
            stock.clamp();
        }
    }
    Ok(())
}

/// Credit a set of amounts, each capped at capacity.
///
/// Returns what was actually credited per resource.
pub fn refund(state: &mut GameState, amounts: &ResourceAmounts) -> ResourceAmounts {
    amounts
        .iter()
        .map(|(kind, amount)| (*kind, add_resource(state, *kind, *amount)))
        .collect()
}

// ---------------------------------------------------------------------------
// Capacity and alerts
// ---------------------------------------------------------------------------

/// Rebuild every capacity from the base capacity plus storage bonuses, then
/// re-clamp stored amounts.
///
/// A building under construction contributes the bonus of its previous
/// level (nothing while its first level is being built).
pub fn recompute_capacities(
    state: &mut GameState,
    catalog: &BlueprintCatalog,
    config: &LedgerConfig,
) {
    let mut capacity = config.base_capacity.clone();
    for building in &state.buildings {
        let effective_level = if building.is_constructing {
            building.level.saturating_sub(1)
        } else {
            building.level
        };
        if effective_level == 0 {
            continue;
        }
        let Ok(spec) = catalog.level(building.building_type, effective_level) else {
            continue;
        };
        for (kind, bonus) in &spec.storage_bonus {
            *capacity.entry(*kind).or_insert(0.0) += bonus;
        }
    }

    for kind in ResourceKind::ALL {
        let cap = capacity.get(&kind).copied().unwrap_or(0.0);
        let stock = state.resources.entry(kind).or_default();
        stock.capacity = cap;
        stock.clamp();
    }
}

/// Flag every resource below the alert thresholds, in ledger order.
///
/// Pure: calling it twice without an intervening mutation yields the same
/// list.
pub fn resource_alerts(state: &GameState, config: &LedgerConfig) -> Vec<ResourceAlert> {
    ResourceKind::ALL
        .iter()
        .filter_map(|kind| {
            let stock = state.resources.get(kind)?;
            if stock.capacity <= 0.0 {
                return None;
            }
            let ratio = stock.fill_ratio();
            let level = if ratio < config.critical_alert_ratio {
                AlertLevel::Critical
            } else if ratio < config.low_alert_ratio {
                AlertLevel::Low
            } else {
                return None;
            };
            Some(ResourceAlert {
                kind: *kind,
                level,
                amount: stock.amount,
                capacity: stock.capacity,
            })
        })
        .collect()
}
