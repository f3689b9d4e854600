//! Read-only projections of a [`GameState`] for the UI and for external
//! serializers. Recomputed on every call; nothing is cached.

use std::collections::BTreeMap;

use colony_types::{
    BuildingType, ColonySnapshot, ColonySummary, GameState, ResourceKind, ResourceStat, TimeInfo,
};
use colony_world::{BlueprintCatalog, buildable_options, flow_rates, resource_alerts};

use crate::clock;
use crate::config::SimulationConfig;

/// Per-resource amount, capacity and hourly flow, in ledger order.
///
/// `net_change` is the hourly change the next settle would apply, after the
/// season and difficulty multipliers.
pub fn resource_stats(state: &GameState, config: &SimulationConfig) -> Vec<ResourceStat> {
    let rates = flow_rates(state, &config.ledger);
    let difficulty = config.difficulty.multipliers(state.difficulty).resource;
    ResourceKind::ALL
        .iter()
        .map(|kind| {
            let flow = rates.get(kind).copied().unwrap_or_default();
            let stock = state.resources.get(kind).cloned().unwrap_or_default();
            ResourceStat {
                kind: *kind,
                amount: stock.amount,
                capacity: stock.capacity,
                production: flow.production,
                consumption: flow.consumption,
                net_change: flow.net()
                    * config.ledger.season_multiplier(state.time.season, *kind)
                    * difficulty,
            }
        })
        .collect()
}

/// Clock figures for the time panel.
pub fn time_info(state: &GameState, config: &SimulationConfig) -> TimeInfo {
    let time = &state.time;
    TimeInfo {
        day: time.day,
        hour: time.hour,
        minute: time.minute,
        season: time.season,
        temperature: time.temperature,
        is_daytime: clock::is_daytime(time.hour, &config.clock),
        days_until_season_change: clock::days_until_season_change(time, &config.clock),
    }
}

/// Full UI projection.
pub fn snapshot(
    state: &GameState,
    catalog: &BlueprintCatalog,
    config: &SimulationConfig,
    game_over: bool,
) -> ColonySnapshot {
    let mut building_counts: BTreeMap<BuildingType, u32> = BTreeMap::new();
    let mut under_construction: u32 = 0;
    for building in &state.buildings {
        let count = building_counts.entry(building.building_type).or_insert(0);
        *count = count.saturating_add(1);
        if building.is_constructing {
            under_construction = under_construction.saturating_add(1);
        }
    }

    ColonySnapshot {
        resources: resource_stats(state, config),
        population: colony_survivors::statistics(state),
        time: time_info(state, config),
        resource_alerts: resource_alerts(state, &config.ledger),
        attention: colony_survivors::attention_list(state),
        buildable: buildable_options(state, catalog),
        building_counts,
        under_construction,
        game_over,
    }
}

/// Fixed-shape summary for external serialization, with resources floored
/// to whole units.
pub fn summarize(state: &GameState) -> ColonySummary {
    let resources = state
        .resources
        .iter()
        .map(|(kind, stock)| (*kind, floor_units(stock.amount)))
        .collect();
    ColonySummary {
        days_survived: state.game_stats.days_survived,
        survivor_count: u32::try_from(state.survivors.len()).unwrap_or(u32::MAX),
        building_count: u32::try_from(state.buildings.len()).unwrap_or(u32::MAX),
        resources,
    }
}

/// Floor a non-negative amount to whole units (negative and NaN give 0).
// Amounts are bounded by capacity, far below 2^53.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_units(amount: f64) -> u64 {
    let floored = amount.floor();
    if floored.is_nan() || floored <= 0.0 {
        return 0;
    }
    floored as u64
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::setup;

    use super::*;

    fn fresh() -> (GameState, BlueprintCatalog, SimulationConfig) {
        let config = SimulationConfig::default();
        let catalog = BlueprintCatalog::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(config.world.seed);
        let state = setup::new_game(&config, &catalog, &mut rng).unwrap();
        (state, catalog, config)
    }

    #[test]
    fn snapshot_of_fresh_game() {
        let (state, catalog, config) = fresh();
        let snap = snapshot(&state, &catalog, &config, false);
        assert_eq!(snap.resources.len(), 5);
        assert_eq!(snap.population.total, 5);
        assert_eq!(snap.time.day, 1);
        assert!(snap.time.is_daytime);
        assert_eq!(snap.building_counts.get(&BuildingType::Shelter), Some(&1));
        assert_eq!(snap.building_counts.get(&BuildingType::Warehouse), Some(&1));
        assert_eq!(snap.under_construction, 0);
        assert_eq!(snap.buildable.len(), BuildingType::ALL.len());
        assert!(snap.attention.is_empty());
        assert!(!snap.game_over);

        let food = snap
            .resources
            .iter()
            .find(|r| r.kind == ResourceKind::Food)
            .unwrap();
        assert!((food.capacity - 500.0).abs() < 1e-9);
        // Five idle survivors eat 1 food/h each; spring scales net flow by 1.2.
        assert!((food.consumption - 5.0).abs() < 1e-9);
        assert!((food.net_change + 6.0).abs() < 1e-9);
    }

    #[test]
    fn snapshot_is_stable_without_mutation() {
        let (state, catalog, config) = fresh();
        let a = snapshot(&state, &catalog, &config, false);
        let b = snapshot(&state, &catalog, &config, false);
        assert_eq!(a, b);
    }

    #[test]
    fn summary_floors_resources() {
        let (mut state, _, _) = fresh();
        if let Some(stock) = state.resources.get_mut(&ResourceKind::Food) {
            stock.amount = 99.9;
        }
        let summary = summarize(&state);
        assert_eq!(summary.survivor_count, 5);
        assert_eq!(summary.building_count, 2);
        assert_eq!(summary.resources.get(&ResourceKind::Food), Some(&99));
        assert_eq!(summary.resources.get(&ResourceKind::Wood), Some(&200));
    }

    #[test]
    fn floor_units_handles_edges() {
        assert_eq!(floor_units(-3.0), 0);
        assert_eq!(floor_units(f64::NAN), 0);
        assert_eq!(floor_units(0.99), 0);
        assert_eq!(floor_units(7.5), 7);
    }
}
