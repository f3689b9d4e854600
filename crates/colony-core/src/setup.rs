//! Fresh-game construction.

use rand::Rng;
use tracing::info;

use colony_types::GameState;
use colony_world::{BlueprintCatalog, WorldError, create_starting_colony};

use crate::clock;
use crate::config::SimulationConfig;

/// Build a new colony: starter buildings and stocks, the configured number
/// of survivors with random names and skills, and an ambient temperature
/// for the starting hour.
///
/// # Errors
///
/// Returns [`WorldError`] if the catalog lacks a starter blueprint.
pub fn new_game(
    config: &SimulationConfig,
    catalog: &BlueprintCatalog,
    rng: &mut impl Rng,
) -> Result<GameState, WorldError> {
    let mut state = create_starting_colony(
        catalog,
        &config.ledger,
        &config.world.starting_resources,
        config.world.difficulty,
    )?;
    for _ in 0..config.world.starting_survivors {
        colony_survivors::add_survivor(&mut state, None, &config.population, rng);
    }
    clock::refresh_temperature(&mut state.time, &config.clock, rng);

    info!(
        survivors = state.survivors.len(),
        buildings = state.buildings.len(),
        difficulty = ?state.difficulty,
        "New colony founded"
    );
    Ok(state)
}
