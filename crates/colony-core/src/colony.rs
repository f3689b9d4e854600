//! The orchestrator: one colony, its tick gate and its collaborators.
//!
//! [`Colony`] exclusively owns the [`GameState`] and everything needed to
//! advance it: configuration, blueprint catalog, the seeded random source,
//! the tick gate, the autosave tracker, the game-over predicate, the event
//! sink and the save store. Hosts drive it by calling [`Colony::update`]
//! from a periodic callback; player commands are synchronous methods
//! invoked between ticks.
//!
//! Ticks never overlap: every entry point takes `&mut self`.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use colony_types::{
    AttentionEntry, BuildingId, BuildingType, ColonySnapshot, ColonySummary, GameOverReport,
    GameState, PopulationStatistics, ResourceAlert, ResourceAmounts, ResourceKind, SaveEnvelope,
    Skills, Survivor, SurvivorId,
};
use colony_world::{BlueprintCatalog, Demolition};

use crate::clock::{self, ClockEvents};
use crate::config::SimulationConfig;
use crate::error::ColonyError;
use crate::events::{EventSink, GameEvent};
use crate::gate::{AutosaveTracker, TickGate};
use crate::persistence::{self, SAVE_VERSION, SaveStore};
use crate::setup;
use crate::snapshot;
use crate::tick::{self, TickSummary};

/// Injected game-over condition, evaluated after every tick in addition to
/// the built-in "no survivors left" rule.
pub type TerminalPredicate = Box<dyn Fn(&GameState) -> bool + Send>;

/// A running colony simulation.
pub struct Colony {
    state: GameState,
    config: SimulationConfig,
    catalog: BlueprintCatalog,
    rng: StdRng,
    gate: TickGate,
    autosave: AutosaveTracker,
    terminal: TerminalPredicate,
    sink: Box<dyn EventSink>,
    store: Box<dyn SaveStore>,
    paused: bool,
    game_over: bool,
    ticks: u64,
}

impl Colony {
    /// Found a new colony with the built-in blueprint catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ColonyError::World`] if the built-in catalog is invalid.
    pub fn new(
        config: SimulationConfig,
        store: Box<dyn SaveStore>,
        sink: Box<dyn EventSink>,
    ) -> Result<Self, ColonyError> {
        let catalog = BlueprintCatalog::builtin()?;
        Self::with_catalog(config, catalog, store, sink)
    }

    /// Found a new colony with an explicit blueprint catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ColonyError::World`] if the catalog lacks a starter
    /// blueprint.
    pub fn with_catalog(
        config: SimulationConfig,
        catalog: BlueprintCatalog,
        store: Box<dyn SaveStore>,
        sink: Box<dyn EventSink>,
    ) -> Result<Self, ColonyError> {
        let mut rng = StdRng::seed_from_u64(config.world.seed);
        let state = setup::new_game(&config, &catalog, &mut rng)?;
        let gate = TickGate::new(Duration::from_millis(config.tick.min_tick_interval_ms));
        let autosave = AutosaveTracker::new(
            config.tick.autosave_interval_minutes,
            state.time.total_minutes(),
        );
        Ok(Self {
            state,
            config,
            catalog,
            rng,
            gate,
            autosave,
            terminal: Box::new(|_| false),
            sink,
            store,
            paused: false,
            game_over: false,
            ticks: 0,
        })
    }

    /// Replace the game-over predicate (builder form).
    #[must_use]
    pub fn with_terminal_predicate(
        mut self,
        predicate: impl Fn(&GameState) -> bool + Send + 'static,
    ) -> Self {
        self.terminal = Box::new(predicate);
        self
    }

    /// Replace the game-over predicate.
    pub fn set_terminal_predicate(
        &mut self,
        predicate: impl Fn(&GameState) -> bool + Send + 'static,
    ) {
        self.terminal = Box::new(predicate);
    }

    // -----------------------------------------------------------------------
    // Tick loop
    // -----------------------------------------------------------------------

    /// Offer a host callback at `now`.
    ///
    /// Runs a tick if the gate admits it, the colony is not paused and the
    /// game is not over. The elapsed time since the previous admitted tick
    /// is integrated.
    pub fn update(&mut self, now: Instant) -> Option<TickSummary> {
        if self.game_over || self.paused {
            return None;
        }
        let elapsed = self.gate.admit(now)?;
        self.tick(elapsed.as_secs_f64()).ok()
    }

    /// Run one tick of `real_seconds`, bypassing the gate.
    ///
    /// The interval is clamped to `[0, max_tick_seconds]`.
    ///
    /// # Errors
    ///
    /// Returns [`ColonyError::GameOver`] once the game has ended.
    pub fn tick(&mut self, real_seconds: f64) -> Result<TickSummary, ColonyError> {
        if self.game_over {
            return Err(ColonyError::GameOver);
        }
        let real_seconds = self.clamp_interval(real_seconds);
        self.ticks = self.ticks.saturating_add(1);

        let mut summary = tick::run_tick(
            &mut self.state,
            &self.config,
            &self.catalog,
            &mut self.rng,
            self.ticks,
            real_seconds,
        );

        summary.game_over = self.check_terminal();

        if self.config.persistence.autosave && self.autosave.crossed(self.state.time.total_minutes())
        {
            summary.autosaved = Some(self.save());
        }
        Ok(summary)
    }

    fn clamp_interval(&self, real_seconds: f64) -> f64 {
        let max = self.config.tick.max_tick_seconds;
        if !real_seconds.is_finite() || real_seconds < 0.0 {
            warn!(real_seconds, "Ignoring invalid tick interval");
            return 0.0;
        }
        if real_seconds > max {
            warn!(real_seconds, max, "Clamping stalled tick interval");
            return max;
        }
        real_seconds
    }

    fn check_terminal(&mut self) -> bool {
        if self.state.survivors.is_empty() || (self.terminal)(&self.state) {
            self.declare_game_over();
            return true;
        }
        false
    }

    fn declare_game_over(&mut self) {
        self.game_over = true;
        let stats = &self.state.game_stats;
        let report = GameOverReport {
            days_survived: stats.days_survived,
            total_survivors_rescued: stats.total_survivors_rescued,
            buildings_constructed: stats.buildings_constructed,
        };
        info!(
            days_survived = report.days_survived,
            total_survivors_rescued = report.total_survivors_rescued,
            buildings_constructed = report.buildings_constructed,
            "Game over"
        );
        self.sink.emit(&GameEvent::GameOver(report));
    }

    /// Withhold ticks until [`resume`](Colony::resume).
    pub fn pause(&mut self) {
        if !self.paused {
            info!(tick = self.ticks, "Simulation paused");
        }
        self.paused = true;
    }

    /// Admit ticks again. The paused interval is not integrated: the gate
    /// is re-armed by the next callback.
    pub fn resume(&mut self) {
        if self.paused {
            info!(tick = self.ticks, "Simulation resumed");
        }
        self.paused = false;
        self.gate.reset();
    }

    /// Advance only the clock by `hours` of game time.
    pub fn fast_forward(&mut self, hours: f64) -> ClockEvents {
        clock::fast_forward(&mut self.state, hours, &self.config.clock, &mut self.rng)
    }

    // -----------------------------------------------------------------------
    // Game lifecycle and persistence
    // -----------------------------------------------------------------------

    /// Discard the current colony and found a new one.
    ///
    /// # Errors
    ///
    /// Returns [`ColonyError::World`] if the catalog lacks a starter
    /// blueprint; the current colony is kept in that case.
    pub fn new_game(&mut self) -> Result<(), ColonyError> {
        self.state = setup::new_game(&self.config, &self.catalog, &mut self.rng)?;
        self.reset_runtime();
        Ok(())
    }

    /// Save the colony to the store. Failures are logged, not retried.
    pub fn save(&mut self) -> bool {
        let envelope = persistence::envelope(&self.state);
        match self.store.save(&envelope) {
            Ok(()) => {
                info!(
                    day = self.state.time.day,
                    hour = self.state.time.hour,
                    "Game saved"
                );
                true
            }
            Err(err) => {
                warn!(%err, "Save failed");
                false
            }
        }
    }

    /// Replace the colony with the stored save.
    ///
    /// Returns `false` and keeps the current colony if there is no save or
    /// it cannot be read.
    pub fn load_game(&mut self) -> bool {
        match self.store.load() {
            Ok(Some(envelope)) => {
                self.restore(envelope);
                true
            }
            Ok(None) => {
                info!("No saved game found");
                false
            }
            Err(err) => {
                warn!(%err, "Load failed, keeping current colony");
                false
            }
        }
    }

    /// Replace the colony with an envelope's state.
    ///
    /// A version mismatch is logged and the payload is used as-is. Out of
    /// range values are pulled back before play resumes: the time of day,
    /// building levels (with their tables re-derived from the catalog),
    /// survivor vitals, worker counts and capacities.
    pub fn restore(&mut self, envelope: SaveEnvelope) {
        if envelope.version != SAVE_VERSION {
            warn!(
                found = %envelope.version,
                expected = SAVE_VERSION,
                "Save version mismatch, loading anyway"
            );
        }
        self.state = envelope.state;
        normalize_loaded_state(&mut self.state, &self.catalog, &self.config);
        reconcile_assignments(&mut self.state);
        colony_world::recompute_capacities(&mut self.state, &self.catalog, &self.config.ledger);
        self.reset_runtime();
        info!(
            day = self.state.time.day,
            survivors = self.state.survivors.len(),
            buildings = self.state.buildings.len(),
            "Game loaded"
        );
    }

    fn reset_runtime(&mut self) {
        self.game_over = false;
        self.ticks = 0;
        self.gate.reset();
        self.autosave = AutosaveTracker::new(
            self.config.tick.autosave_interval_minutes,
            self.state.time.total_minutes(),
        );
    }

    // -----------------------------------------------------------------------
    // Player commands
    // -----------------------------------------------------------------------

    /// Place a new building.
    ///
    /// # Errors
    ///
    /// See [`colony_world::create`].
    pub fn build(
        &mut self,
        building_type: BuildingType,
        x: i32,
        y: i32,
    ) -> Result<BuildingId, ColonyError> {
        let id = colony_world::create(&mut self.state, &self.catalog, building_type, x, y)?;
        self.recompute_capacities();
        Ok(id)
    }

    /// Start upgrading a building. Returns the target level.
    ///
    /// # Errors
    ///
    /// See [`colony_world::upgrade`].
    pub fn upgrade(&mut self, id: BuildingId) -> Result<u32, ColonyError> {
        let level = colony_world::upgrade(&mut self.state, &self.catalog, id)?;
        self.recompute_capacities();
        Ok(level)
    }

    /// Demolish a building, refunding half its cost.
    ///
    /// # Errors
    ///
    /// See [`colony_world::demolish`].
    pub fn demolish(&mut self, id: BuildingId) -> Result<Demolition, ColonyError> {
        let demolition = colony_world::demolish(&mut self.state, id)?;
        self.recompute_capacities();
        Ok(demolition)
    }

    /// Assign a survivor to work at a building.
    ///
    /// # Errors
    ///
    /// See [`colony_world::assign_worker`].
    pub fn assign_worker(
        &mut self,
        building_id: BuildingId,
        survivor_id: SurvivorId,
    ) -> Result<(), ColonyError> {
        colony_world::assign_worker(&mut self.state, building_id, survivor_id)?;
        Ok(())
    }

    /// Remove a survivor from a building.
    ///
    /// # Errors
    ///
    /// See [`colony_world::unassign_worker`].
    pub fn unassign_worker(
        &mut self,
        building_id: BuildingId,
        survivor_id: SurvivorId,
    ) -> Result<(), ColonyError> {
        colony_world::unassign_worker(&mut self.state, building_id, survivor_id)?;
        Ok(())
    }

    /// Current efficiency of a building.
    ///
    /// # Errors
    ///
    /// Returns [`ColonyError::World`] if the building is unknown.
    pub fn efficiency(&self, id: BuildingId) -> Result<f64, ColonyError> {
        Ok(colony_world::efficiency(&self.state, id)?)
    }

    /// Credit a resource, up to capacity. Returns the amount added.
    pub fn add_resource(&mut self, kind: ResourceKind, amount: f64) -> f64 {
        colony_world::add_resource(&mut self.state, kind, amount)
    }

    /// Debit a resource. Returns `false` without mutating if there is not
    /// enough.
    pub fn remove_resource(&mut self, kind: ResourceKind, amount: f64) -> bool {
        colony_world::remove_resource(&mut self.state, kind, amount)
    }

    /// Whether the ledger covers `cost`.
    pub fn has_enough_resources(&self, cost: &ResourceAmounts) -> bool {
        colony_world::has_enough_resources(&self.state.resources, cost)
    }

    /// Add a survivor; skills are rolled when `None`.
    pub fn add_survivor(&mut self, skills: Option<Skills>) -> SurvivorId {
        colony_survivors::add_survivor(
            &mut self.state,
            skills,
            &self.config.population,
            &mut self.rng,
        )
    }

    /// Remove a survivor and return them.
    ///
    /// # Errors
    ///
    /// Returns [`ColonyError::Population`] if the survivor is unknown.
    pub fn remove_survivor(&mut self, id: SurvivorId) -> Result<Survivor, ColonyError> {
        Ok(colony_survivors::remove_survivor(&mut self.state, id)?)
    }

    /// Heal a survivor. Returns the new health.
    ///
    /// # Errors
    ///
    /// See [`colony_survivors::heal`].
    pub fn heal(&mut self, id: SurvivorId, amount: f64) -> Result<f64, ColonyError> {
        Ok(colony_survivors::heal(
            &mut self.state,
            id,
            amount,
            &self.config.population,
        )?)
    }

    /// Feed a survivor. Returns the new hunger value.
    ///
    /// # Errors
    ///
    /// See [`colony_survivors::feed`].
    pub fn feed(&mut self, id: SurvivorId, amount: f64) -> Result<f64, ColonyError> {
        Ok(colony_survivors::feed(&mut self.state, id, amount)?)
    }

    /// Send a survivor to rest. Returns the new stamina.
    ///
    /// # Errors
    ///
    /// See [`colony_survivors::rest`].
    pub fn rest(&mut self, id: SurvivorId) -> Result<f64, ColonyError> {
        Ok(colony_survivors::rest(
            &mut self.state,
            id,
            &self.config.population,
        )?)
    }

    fn recompute_capacities(&mut self) {
        colony_world::recompute_capacities(&mut self.state, &self.catalog, &self.config.ledger);
    }

    // -----------------------------------------------------------------------
    // Read views
    // -----------------------------------------------------------------------

    /// The full UI projection.
    pub fn snapshot(&self) -> ColonySnapshot {
        snapshot::snapshot(&self.state, &self.catalog, &self.config, self.game_over)
    }

    /// The fixed-shape summary for external serialization.
    pub fn summarize(&self) -> ColonySummary {
        snapshot::summarize(&self.state)
    }

    /// Low and critical resources.
    pub fn resource_alerts(&self) -> Vec<ResourceAlert> {
        colony_world::resource_alerts(&self.state, &self.config.ledger)
    }

    /// Survivor aggregates.
    pub fn statistics(&self) -> PopulationStatistics {
        colony_survivors::statistics(&self.state)
    }

    /// Survivors needing attention, highest score first.
    pub fn attention_list(&self) -> Vec<AttentionEntry> {
        colony_survivors::attention_list(&self.state)
    }

    /// The colony state.
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// The active configuration.
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The blueprint catalog.
    pub const fn catalog(&self) -> &BlueprintCatalog {
        &self.catalog
    }

    /// Whether the game has ended.
    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Whether ticks are being withheld.
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Ticks run since the colony was founded or loaded.
    pub const fn tick_count(&self) -> u64 {
        self.ticks
    }
}

/// Pull a loaded state back into the ranges every tick relies on.
fn normalize_loaded_state(
    state: &mut GameState,
    catalog: &BlueprintCatalog,
    config: &SimulationConfig,
) {
    if clock::normalize_time(&mut state.time, &config.clock) {
        warn!(
            day = state.time.day,
            hour = state.time.hour,
            "Loaded time out of range, normalized"
        );
    }
    colony_world::normalize_levels(state, catalog);
    for survivor in &mut state.survivors {
        if colony_survivors::clamp_vitals(survivor) {
            warn!(survivor_id = %survivor.id, "Loaded vitals out of range, clamped");
        }
    }
}

/// Drop dangling assignments and recount every building's roster from the
/// survivors' back-references.
fn reconcile_assignments(state: &mut GameState) {
    for building in &mut state.buildings {
        building.assigned_workers = 0;
    }
    for index in 0..state.survivors.len() {
        let Some(building_id) = state
            .survivors
            .get(index)
            .and_then(|s| s.assigned_building_id)
        else {
            continue;
        };
        let admitted = state.building_mut(building_id).is_some_and(|building| {
            if building.has_free_slot() {
                building.assigned_workers = building.assigned_workers.saturating_add(1);
                true
            } else {
                false
            }
        });
        if !admitted && let Some(survivor) = state.survivors.get_mut(index) {
            warn!(survivor_id = %survivor.id, %building_id, "Dropping invalid assignment");
            survivor.release();
        }
    }
}
