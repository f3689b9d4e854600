//! Tick cycle: the fixed-order update that advances one colony.
//!
//! Each admitted tick runs these phases, each reading the state the previous
//! one already mutated:
//!
//! 1. **Clock** -- advance minutes, hours, days and seasons; recompute the
//!    ambient temperature.
//! 2. **Ledger** -- settle hourly resource flow for the elapsed fraction of
//!    an hour under the new season.
//! 3. **Construction** -- count down construction; completed buildings
//!    start operating and capacities are recomputed.
//! 4. **Population** -- integrate survivor vitals, roll health conditions,
//!    remove the dead.
//!
//! The terminal check, autosave and event emission belong to the
//! orchestrator in [`crate::colony`]; this module is a pure function of its
//! inputs and the random source.

use rand::Rng;
use tracing::debug;

use colony_survivors::PopulationReport;
use colony_types::{BuildingId, GameState};
use colony_world::{BlueprintCatalog, SettleReport};

use crate::clock::{self, ClockEvents};
use crate::config::SimulationConfig;

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummary {
    /// Sequence number of this tick since the colony was founded or loaded.
    pub tick: u64,
    /// Real seconds integrated (after clamping).
    pub real_seconds: f64,
    /// Clock boundaries crossed.
    pub clock: ClockEvents,
    /// Resource changes applied.
    pub settle: SettleReport,
    /// Buildings that finished construction.
    pub completed: Vec<BuildingId>,
    /// Condition changes and deaths.
    pub population: PopulationReport,
    /// Whether this tick ended the game.
    pub game_over: bool,
    /// `Some(success)` if an autosave ran after this tick.
    pub autosaved: Option<bool>,
}

/// Run the four simulation phases for `real_seconds`.
pub fn run_tick(
    state: &mut GameState,
    config: &SimulationConfig,
    catalog: &BlueprintCatalog,
    rng: &mut impl Rng,
    tick: u64,
    real_seconds: f64,
) -> TickSummary {
    let multipliers = config.difficulty.multipliers(state.difficulty);

    // --- Phase 1: Clock ---
    let clock_events = clock::advance(state, real_seconds, &config.clock, rng);

    // --- Phase 2: Ledger ---
    let settle = colony_world::settle(state, real_seconds, &config.ledger, multipliers.resource);

    // --- Phase 3: Construction ---
    let completed = colony_world::advance_construction(state, real_seconds);
    if !completed.is_empty() {
        colony_world::recompute_capacities(state, catalog, &config.ledger);
    }

    // --- Phase 4: Population ---
    let population = colony_survivors::advance(
        state,
        real_seconds,
        &config.population,
        multipliers.recovery,
        rng,
    );

    debug!(
        tick,
        real_seconds,
        day = state.time.day,
        hour = state.time.hour,
        population = state.survivors.len(),
        deaths = population.deaths.len(),
        "Tick complete"
    );

    TickSummary {
        tick,
        real_seconds,
        clock: clock_events,
        settle,
        completed,
        population,
        game_over: false,
        autosaved: None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use colony_types::{BuildingType, ResourceKind};

    use crate::setup;

    use super::*;

    fn fresh() -> (GameState, BlueprintCatalog, SimulationConfig, StdRng) {
        let config = SimulationConfig::default();
        let catalog = BlueprintCatalog::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let state = setup::new_game(&config, &catalog, &mut rng).unwrap();
        (state, catalog, config, rng)
    }

    #[test]
    fn one_hour_tick_runs_every_phase() {
        let (mut state, catalog, config, mut rng) = fresh();
        let farm = colony_world::create(&mut state, &catalog, BuildingType::Farm, 5, 5).unwrap();
        let food_before = state.amount(ResourceKind::Food);

        let summary = run_tick(&mut state, &config, &catalog, &mut rng, 1, 3600.0);

        // Clock: one real hour is sixty game hours.
        assert_eq!(state.time.day, 3);
        assert_eq!(state.time.hour, 20);
        assert_eq!(summary.clock.days_elapsed, 2);
        // Ledger ran before construction finished, so the farm did not
        // produce yet: five survivors ate 5 food, scaled by spring's 1.2.
        let food_after = state.amount(ResourceKind::Food);
        assert!((food_before - food_after - 6.0).abs() < 1e-9);
        // Construction: the farm needed 4 hours and got only 1.
        assert!(summary.completed.is_empty());
        assert!(state.building(farm).unwrap().is_constructing);
        // Population: everyone lost 2 hunger.
        assert!(state.survivors.iter().all(|s| (s.hunger - 98.0).abs() < 1e-9));
    }

    #[test]
    fn completed_warehouse_raises_capacity() {
        let (mut state, catalog, config, mut rng) = fresh();
        colony_world::add_resource(&mut state, ResourceKind::Wood, 1000.0);
        let id =
            colony_world::create(&mut state, &catalog, BuildingType::Warehouse, 4, 0).unwrap();
        let cap_before = state.resources[&ResourceKind::Wood].capacity;

        let summary = run_tick(&mut state, &config, &catalog, &mut rng, 1, 3.0 * 3600.0);

        assert_eq!(summary.completed, vec![id]);
        let cap_after = state.resources[&ResourceKind::Wood].capacity;
        assert!((cap_after - cap_before - 200.0).abs() < 1e-9);
    }
}
