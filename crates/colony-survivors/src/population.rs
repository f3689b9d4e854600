//! Population management: adding and removing survivors, player care
//! commands, the per-tick population step and read-only views.
//!
//! Every function borrows the [`GameState`]. Assignment bookkeeping goes
//! through [`colony_world::release_survivor`] so the building's worker count
//! stays in step with the survivor's back-reference.

use rand::Rng;
use tracing::{debug, info, warn};

use colony_types::{
    AttentionEntry, AttentionPriority, BuildingType, GameState, JobType, MAX_VITAL,
    PopulationStatistics, Skills, Survivor, SurvivorId, SurvivorIssue,
};
use colony_world::{SECONDS_PER_HOUR, release_survivor};

use crate::conditions::{self, ConditionChanges};
use crate::config::PopulationConfig;
use crate::death::{Death, check_death};
use crate::error::PopulationError;
use crate::names::generate_name;
use crate::vitals::{self, VitalContext};

/// What one population step did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulationReport {
    /// Hours integrated.
    pub hours: f64,
    /// Condition changes per survivor (only survivors with a change).
    pub changes: Vec<(SurvivorId, ConditionChanges)>,
    /// Survivors that died and were removed.
    pub deaths: Vec<Death>,
}

// ---------------------------------------------------------------------------
// Membership
// ---------------------------------------------------------------------------

/// Roll random base skills in the configured starting range.
pub fn random_skills(config: &PopulationConfig, rng: &mut impl Rng) -> Skills {
    let low = config.min_starting_skill.max(1);
    let high = config.max_starting_skill.max(low);
    Skills {
        gathering: rng.random_range(low..=high),
        construction: rng.random_range(low..=high),
        research: rng.random_range(low..=high),
        ..Skills::default()
    }
}

/// Add a survivor at full vitals and return their id.
///
/// With `skills = None` the base skills are rolled in the starting range.
/// Increments `total_survivors_rescued`.
pub fn add_survivor(
    state: &mut GameState,
    skills: Option<Skills>,
    config: &PopulationConfig,
    rng: &mut impl Rng,
) -> SurvivorId {
    let skills = skills.unwrap_or_else(|| random_skills(config, rng));
    let survivor = Survivor::new(generate_name(rng), skills);
    let id = survivor.id;
    info!(survivor_id = %id, name = %survivor.name, "Survivor joined");
    state.survivors.push(survivor);
    state.game_stats.total_survivors_rescued =
        state.game_stats.total_survivors_rescued.saturating_add(1);
    id
}

/// Remove a survivor, freeing their building slot, and return them.
///
/// # Errors
///
/// Returns [`PopulationError::SurvivorNotFound`] if the id is unknown.
pub fn remove_survivor(state: &mut GameState, id: SurvivorId) -> Result<Survivor, PopulationError> {
    let index = state
        .survivors
        .iter()
        .position(|s| s.id == id)
        .ok_or(PopulationError::SurvivorNotFound(id))?;
    release_survivor(state, id);
    let survivor = state.survivors.remove(index);
    info!(survivor_id = %id, name = %survivor.name, "Survivor removed");
    Ok(survivor)
}

// ---------------------------------------------------------------------------
// Care commands
// ---------------------------------------------------------------------------

fn checked_amount(amount: f64) -> Result<f64, PopulationError> {
    if amount.is_nan() || amount < 0.0 {
        Err(PopulationError::InvalidAmount { amount })
    } else {
        Ok(amount)
    }
}

fn survivor_mut(state: &mut GameState, id: SurvivorId) -> Result<&mut Survivor, PopulationError> {
    state
        .survivor_mut(id)
        .ok_or(PopulationError::SurvivorNotFound(id))
}

/// Add health, capped at 100. Once health is at or above the configured
/// threshold, sickness and injury are cleared. Returns the new health.
///
/// # Errors
///
/// [`PopulationError::SurvivorNotFound`] or
/// [`PopulationError::InvalidAmount`] for a negative amount.
pub fn heal(
    state: &mut GameState,
    id: SurvivorId,
    amount: f64,
    config: &PopulationConfig,
) -> Result<f64, PopulationError> {
    let amount = checked_amount(amount)?;
    let survivor = survivor_mut(state, id)?;
    survivor.health = (survivor.health + amount).clamp(0.0, MAX_VITAL);
    if survivor.health >= config.heal_clears_conditions_at {
        survivor.is_sick = false;
        survivor.is_injured = false;
    }
    debug!(survivor_id = %id, health = survivor.health, "Survivor healed");
    Ok(survivor.health)
}

/// Add satiation, capped at 100. Returns the new hunger value.
///
/// # Errors
///
/// [`PopulationError::SurvivorNotFound`] or
/// [`PopulationError::InvalidAmount`] for a negative amount.
pub fn feed(state: &mut GameState, id: SurvivorId, amount: f64) -> Result<f64, PopulationError> {
    let amount = checked_amount(amount)?;
    let survivor = survivor_mut(state, id)?;
    survivor.hunger = (survivor.hunger + amount).clamp(0.0, MAX_VITAL);
    debug!(survivor_id = %id, hunger = survivor.hunger, "Survivor fed");
    Ok(survivor.hunger)
}

/// Send a survivor to rest: release their building slot, set the job to
/// resting and grant the immediate stamina bonus. Returns the new stamina.
///
/// # Errors
///
/// Returns [`PopulationError::SurvivorNotFound`] if the id is unknown.
pub fn rest(
    state: &mut GameState,
    id: SurvivorId,
    config: &PopulationConfig,
) -> Result<f64, PopulationError> {
    if state.survivor(id).is_none() {
        return Err(PopulationError::SurvivorNotFound(id));
    }
    release_survivor(state, id);
    let survivor = survivor_mut(state, id)?;
    survivor.job_type = JobType::Resting;
    survivor.stamina = (survivor.stamina + config.rest_stamina_bonus).clamp(0.0, MAX_VITAL);
    debug!(survivor_id = %id, stamina = survivor.stamina, "Survivor resting");
    Ok(survivor.stamina)
}

// ---------------------------------------------------------------------------
// Tick step
// ---------------------------------------------------------------------------

/// Whether the survivor works in an operating shelter that halves heat
/// exchange.
fn is_sheltered(state: &GameState, survivor: &Survivor, config: &PopulationConfig) -> bool {
    survivor
        .assigned_building_id
        .and_then(|id| state.building(id))
        .is_some_and(|b| {
            b.building_type == BuildingType::Shelter
                && b.is_operating()
                && b.level >= config.sheltered_min_level
        })
}

/// Advance every survivor by `real_seconds`.
///
/// Per survivor: the four vital integrators in order, then the stochastic
/// condition checks. Resting survivors who reach full stamina go back to
/// idle. Finally, if deaths are enabled, survivors at 0 health are removed
/// and their slots released.
pub fn advance(
    state: &mut GameState,
    real_seconds: f64,
    config: &PopulationConfig,
    recovery_multiplier: f64,
    rng: &mut impl Rng,
) -> PopulationReport {
    let hours = (real_seconds / SECONDS_PER_HOUR).max(0.0);
    let season = state.time.season;
    let ambient_temperature = state.time.temperature;

    let sheltered: Vec<bool> = state
        .survivors
        .iter()
        .map(|s| is_sheltered(state, s, config))
        .collect();

    let mut report = PopulationReport {
        hours,
        ..PopulationReport::default()
    };

    for (survivor, sheltered) in state.survivors.iter_mut().zip(sheltered) {
        let context = VitalContext {
            season,
            ambient_temperature,
            sheltered,
            recovery_multiplier,
        };
        vitals::apply_vitals(survivor, &context, config, hours);
        let changes = conditions::check_health_conditions(survivor, season, hours, config, rng);
        if changes.any() {
            debug!(survivor_id = %survivor.id, ?changes, "Survivor condition changed");
            report.changes.push((survivor.id, changes));
        }
        if survivor.job_type == JobType::Resting && survivor.stamina >= MAX_VITAL {
            survivor.job_type = JobType::Idle;
        }
    }

    if config.deaths_enabled {
        report.deaths = process_deaths(state);
    }
    report
}

/// Remove every survivor at 0 health and return who died.
pub fn process_deaths(state: &mut GameState) -> Vec<Death> {
    let dead: Vec<Death> = state
        .survivors
        .iter()
        .filter_map(|s| {
            check_death(s).map(|cause| Death {
                survivor_id: s.id,
                name: s.name.clone(),
                cause,
            })
        })
        .collect();
    for death in &dead {
        if remove_survivor(state, death.survivor_id).is_ok() {
            warn!(
                survivor_id = %death.survivor_id,
                name = %death.name,
                cause = %death.cause,
                "Survivor died"
            );
        }
    }
    dead
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Aggregate survivor figures. Averages are 0 for an empty colony.
pub fn statistics(state: &GameState) -> PopulationStatistics {
    let mut stats = PopulationStatistics::default();
    let mut health = 0.0;
    let mut hunger = 0.0;
    let mut stamina = 0.0;
    let mut temperature = 0.0;
    for survivor in &state.survivors {
        stats.total = stats.total.saturating_add(1);
        match survivor.job_type {
            JobType::Idle => stats.idle = stats.idle.saturating_add(1),
            JobType::Resting => stats.resting = stats.resting.saturating_add(1),
            JobType::Gathering | JobType::Construction | JobType::Research => {
                stats.working = stats.working.saturating_add(1);
            }
        }
        if survivor.is_sick {
            stats.sick = stats.sick.saturating_add(1);
        }
        if survivor.is_injured {
            stats.injured = stats.injured.saturating_add(1);
        }
        health += survivor.health;
        hunger += survivor.hunger;
        stamina += survivor.stamina;
        temperature += survivor.temperature;
    }
    if stats.total > 0 {
        let count = f64::from(stats.total);
        stats.average_health = health / count;
        stats.average_hunger = hunger / count;
        stats.average_stamina = stamina / count;
        stats.average_temperature = temperature / count;
    }
    stats
}

/// Issues found on a survivor, most severe first.
pub fn survivor_issues(survivor: &Survivor) -> Vec<SurvivorIssue> {
    let mut issues = Vec::new();
    if survivor.health < 30.0 {
        issues.push(SurvivorIssue::CriticalHealth);
    } else if survivor.health < 50.0 {
        issues.push(SurvivorIssue::LowHealth);
    }
    if survivor.hunger < vitals::STARVING_HUNGER {
        issues.push(SurvivorIssue::Starving);
    } else if survivor.hunger < vitals::HUNGRY_HUNGER {
        issues.push(SurvivorIssue::Hungry);
    }
    if survivor.temperature < vitals::HYPOTHERMIA_TEMPERATURE {
        issues.push(SurvivorIssue::Hypothermia);
    } else if survivor.temperature < vitals::COLD_TEMPERATURE {
        issues.push(SurvivorIssue::Cold);
    }
    if survivor.is_sick {
        issues.push(SurvivorIssue::Sick);
    }
    if survivor.is_injured {
        issues.push(SurvivorIssue::Injured);
    }
    issues.sort_by_key(|issue| std::cmp::Reverse(issue.weight()));
    issues
}

/// Priority for an attention score (`None` below 1).
pub const fn priority_for(score: u32) -> Option<AttentionPriority> {
    if score >= 3 {
        Some(AttentionPriority::High)
    } else if score >= 1 {
        Some(AttentionPriority::Medium)
    } else {
        None
    }
}

/// Survivors with at least one issue, highest score first.
///
/// Ties keep arrival order.
pub fn attention_list(state: &GameState) -> Vec<AttentionEntry> {
    let mut entries: Vec<AttentionEntry> = state
        .survivors
        .iter()
        .filter_map(|survivor| {
            let issues = survivor_issues(survivor);
            let score = issues
                .iter()
                .fold(0_u32, |acc, issue| acc.saturating_add(issue.weight()));
            let priority = priority_for(score)?;
            Some(AttentionEntry {
                survivor_id: survivor.id,
                name: survivor.name.clone(),
                score,
                priority,
                issues,
            })
        })
        .collect();
    entries.sort_by_key(|entry| std::cmp::Reverse(entry.score));
    entries
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::BTreeMap;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use colony_types::{
        Building, BuildingId, Difficulty, GameStats, GameTime, Position, ResourceAmounts, Season,
    };

    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn empty_state() -> GameState {
        GameState {
            resources: BTreeMap::new(),
            buildings: Vec::new(),
            survivors: Vec::new(),
            time: GameTime::default(),
            game_stats: GameStats::default(),
            difficulty: Difficulty::Normal,
        }
    }

    fn quiet_config() -> PopulationConfig {
        PopulationConfig {
            sickness_chance_per_hour: 0.0,
            injury_chance_per_hour: 0.0,
            recovery_chance_per_tick: 0.0,
            injury_recovery_chance_per_tick: 0.0,
            skill_gain_chance_per_hour: 0.0,
            ..PopulationConfig::default()
        }
    }

    fn shelter(level: u32) -> Building {
        Building {
            id: BuildingId::new(),
            building_type: BuildingType::Shelter,
            level,
            position: Position::default(),
            construction_time: 0.0,
            is_constructing: false,
            worker_capacity: 2,
            assigned_workers: 0,
            resource_cost: ResourceAmounts::new(),
            resource_production: ResourceAmounts::new(),
            resource_consumption: ResourceAmounts::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    #[test]
    fn add_rolls_skills_in_range_and_counts_rescue() {
        let mut state = empty_state();
        let mut rng = SmallRng::seed_from_u64(42);
        let config = PopulationConfig::default();
        for _ in 0..20 {
            add_survivor(&mut state, None, &config, &mut rng);
        }
        assert_eq!(state.survivors.len(), 20);
        assert_eq!(state.game_stats.total_survivors_rescued, 20);
        for survivor in &state.survivors {
            for level in [
                survivor.skills.gathering,
                survivor.skills.construction,
                survivor.skills.research,
            ] {
                assert!((1..=3).contains(&level));
            }
            assert!(approx(survivor.health, 100.0));
        }
    }

    #[test]
    fn add_with_explicit_skills_keeps_them() {
        let mut state = empty_state();
        let mut rng = SmallRng::seed_from_u64(1);
        let skills = Skills {
            research: 7,
            ..Skills::default()
        };
        let id = add_survivor(&mut state, Some(skills), &PopulationConfig::default(), &mut rng);
        assert_eq!(state.survivor(id).unwrap().skills.research, 7);
    }

    #[test]
    fn remove_frees_building_slot() {
        let mut state = empty_state();
        let mut rng = SmallRng::seed_from_u64(1);
        let id = add_survivor(&mut state, None, &PopulationConfig::default(), &mut rng);
        let mut building = shelter(1);
        building.assigned_workers = 1;
        let building_id = building.id;
        state.buildings.push(building);
        state.survivors[0].assigned_building_id = Some(building_id);

        let removed = remove_survivor(&mut state, id).unwrap();
        assert_eq!(removed.id, id);
        assert!(state.survivors.is_empty());
        assert_eq!(state.buildings[0].assigned_workers, 0);

        let missing = remove_survivor(&mut state, id);
        assert!(matches!(missing, Err(PopulationError::SurvivorNotFound(_))));
    }

    // -----------------------------------------------------------------------
    // Care commands
    // -----------------------------------------------------------------------

    #[test]
    fn heal_clears_conditions_at_threshold() {
        let mut state = empty_state();
        let mut rng = SmallRng::seed_from_u64(1);
        let config = PopulationConfig::default();
        let id = add_survivor(&mut state, None, &config, &mut rng);
        {
            let survivor = state.survivor_mut(id).unwrap();
            survivor.health = 40.0;
            survivor.is_sick = true;
            survivor.is_injured = true;
        }
        assert!(approx(heal(&mut state, id, 20.0, &config).unwrap(), 60.0));
        assert!(state.survivor(id).unwrap().is_sick);
        assert!(approx(heal(&mut state, id, 80.0, &config).unwrap(), 100.0));
        let survivor = state.survivor(id).unwrap();
        assert!(!survivor.is_sick && !survivor.is_injured);

        let bad = heal(&mut state, id, -1.0, &config);
        assert!(matches!(bad, Err(PopulationError::InvalidAmount { .. })));
    }

    #[test]
    fn feed_is_capped() {
        let mut state = empty_state();
        let mut rng = SmallRng::seed_from_u64(1);
        let id = add_survivor(&mut state, None, &PopulationConfig::default(), &mut rng);
        state.survivor_mut(id).unwrap().hunger = 90.0;
        assert!(approx(feed(&mut state, id, 50.0).unwrap(), 100.0));
        let missing = feed(&mut state, SurvivorId::new(), 1.0);
        assert!(matches!(missing, Err(PopulationError::SurvivorNotFound(_))));
    }

    #[test]
    fn rest_unassigns_and_boosts_stamina() {
        let mut state = empty_state();
        let mut rng = SmallRng::seed_from_u64(1);
        let config = PopulationConfig::default();
        let id = add_survivor(&mut state, None, &config, &mut rng);
        let mut building = shelter(1);
        building.assigned_workers = 1;
        let building_id = building.id;
        state.buildings.push(building);
        {
            let survivor = state.survivor_mut(id).unwrap();
            survivor.assigned_building_id = Some(building_id);
            survivor.job_type = JobType::Construction;
            survivor.stamina = 40.0;
        }
        assert!(approx(rest(&mut state, id, &config).unwrap(), 70.0));
        let survivor = state.survivor(id).unwrap();
        assert_eq!(survivor.job_type, JobType::Resting);
        assert_eq!(survivor.assigned_building_id, None);
        assert_eq!(state.buildings[0].assigned_workers, 0);
    }

    // -----------------------------------------------------------------------
    // Tick step
    // -----------------------------------------------------------------------

    #[test]
    fn starving_survivor_loses_health_over_an_hour() {
        let mut state = empty_state();
        state.time.temperature = 37.0;
        let mut rng = SmallRng::seed_from_u64(1);
        let config = quiet_config();
        let id = add_survivor(&mut state, None, &config, &mut rng);
        {
            let survivor = state.survivor_mut(id).unwrap();
            survivor.hunger = 10.0;
            survivor.health = 80.0;
        }
        advance(&mut state, 3600.0, &config, 1.0, &mut rng);
        let survivor = state.survivor(id).unwrap();
        assert!(approx(survivor.health, 80.0 + 1.0 - 2.0));
        assert!(approx(survivor.hunger, 8.0));
    }

    #[test]
    fn level_two_shelter_halves_drift() {
        let mut state = empty_state();
        state.time.temperature = 17.0;
        let mut rng = SmallRng::seed_from_u64(1);
        let config = quiet_config();
        let housed = add_survivor(&mut state, None, &config, &mut rng);
        let exposed = add_survivor(&mut state, None, &config, &mut rng);
        let mut building = shelter(2);
        building.assigned_workers = 1;
        let building_id = building.id;
        state.buildings.push(building);
        {
            let survivor = state.survivor_mut(housed).unwrap();
            survivor.assigned_building_id = Some(building_id);
            survivor.job_type = JobType::Construction;
        }
        advance(&mut state, 3600.0, &config, 1.0, &mut rng);
        assert!(approx(state.survivor(housed).unwrap().temperature, 36.0));
        assert!(approx(state.survivor(exposed).unwrap().temperature, 35.0));
    }

    #[test]
    fn shelter_mid_upgrade_gives_no_insulation() {
        let mut state = empty_state();
        state.time.temperature = 17.0;
        let mut rng = SmallRng::seed_from_u64(1);
        let config = quiet_config();
        let housed = add_survivor(&mut state, None, &config, &mut rng);
        let mut building = shelter(2);
        building.is_constructing = true;
        building.construction_time = 3.0;
        building.assigned_workers = 1;
        let building_id = building.id;
        state.buildings.push(building);
        state.survivor_mut(housed).unwrap().assigned_building_id = Some(building_id);

        advance(&mut state, 3600.0, &config, 1.0, &mut rng);
        assert!(approx(state.survivor(housed).unwrap().temperature, 35.0));
    }

    #[test]
    fn dead_survivors_are_removed() {
        let mut state = empty_state();
        let mut rng = SmallRng::seed_from_u64(1);
        let config = quiet_config();
        let doomed = add_survivor(&mut state, None, &config, &mut rng);
        let fine = add_survivor(&mut state, None, &config, &mut rng);
        {
            let survivor = state.survivor_mut(doomed).unwrap();
            survivor.hunger = 0.0;
            survivor.health = 0.5;
        }
        let report = advance(&mut state, 3600.0, &config, 1.0, &mut rng);
        assert_eq!(report.deaths.len(), 1);
        assert_eq!(report.deaths[0].survivor_id, doomed);
        assert_eq!(report.deaths[0].cause, crate::death::DeathCause::Starvation);
        assert!(state.survivor(doomed).is_none());
        assert!(state.survivor(fine).is_some());
    }

    #[test]
    fn deaths_can_be_disabled() {
        let mut state = empty_state();
        let mut rng = SmallRng::seed_from_u64(1);
        let config = PopulationConfig {
            deaths_enabled: false,
            ..quiet_config()
        };
        let doomed = add_survivor(&mut state, None, &config, &mut rng);
        {
            let survivor = state.survivor_mut(doomed).unwrap();
            survivor.hunger = 0.0;
            survivor.health = 0.5;
        }
        let report = advance(&mut state, 3600.0, &config, 1.0, &mut rng);
        assert!(report.deaths.is_empty());
        assert!(approx(state.survivor(doomed).unwrap().health, 0.0));
    }

    #[test]
    fn rested_survivor_returns_to_idle() {
        let mut state = empty_state();
        let mut rng = SmallRng::seed_from_u64(1);
        let config = quiet_config();
        let id = add_survivor(&mut state, None, &config, &mut rng);
        {
            let survivor = state.survivor_mut(id).unwrap();
            survivor.job_type = JobType::Resting;
            survivor.stamina = 95.0;
        }
        advance(&mut state, 3600.0, &config, 1.0, &mut rng);
        assert_eq!(state.survivor(id).unwrap().job_type, JobType::Idle);
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    #[test]
    fn statistics_of_empty_colony_are_zero() {
        let stats = statistics(&empty_state());
        assert_eq!(stats, PopulationStatistics::default());
    }

    #[test]
    fn statistics_count_jobs_and_average_vitals() {
        let mut state = empty_state();
        let mut rng = SmallRng::seed_from_u64(1);
        let config = PopulationConfig::default();
        let a = add_survivor(&mut state, None, &config, &mut rng);
        let b = add_survivor(&mut state, None, &config, &mut rng);
        {
            let survivor = state.survivor_mut(a).unwrap();
            survivor.job_type = JobType::Gathering;
            survivor.health = 50.0;
            survivor.is_sick = true;
        }
        state.survivor_mut(b).unwrap().job_type = JobType::Resting;
        let stats = statistics(&state);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.working, 1);
        assert_eq!(stats.resting, 1);
        assert_eq!(stats.idle, 0);
        assert_eq!(stats.sick, 1);
        assert!(approx(stats.average_health, 75.0));
    }

    #[test]
    fn attention_list_scores_and_sorts() {
        let mut state = empty_state();
        let mut rng = SmallRng::seed_from_u64(1);
        let config = PopulationConfig::default();
        let healthy = add_survivor(&mut state, None, &config, &mut rng);
        let hungry = add_survivor(&mut state, None, &config, &mut rng);
        let critical = add_survivor(&mut state, None, &config, &mut rng);
        state.survivor_mut(hungry).unwrap().hunger = 45.0;
        {
            let survivor = state.survivor_mut(critical).unwrap();
            survivor.health = 20.0;
            survivor.temperature = 35.5;
            survivor.is_injured = true;
        }

        let list = attention_list(&state);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].survivor_id, critical);
        assert_eq!(list[0].score, 3 + 2 + 2);
        assert_eq!(list[0].priority, AttentionPriority::High);
        assert_eq!(list[0].issues[0], SurvivorIssue::CriticalHealth);
        assert_eq!(list[1].survivor_id, hungry);
        assert_eq!(list[1].score, 1);
        assert_eq!(list[1].priority, AttentionPriority::Medium);
        assert!(list.iter().all(|e| e.survivor_id != healthy));
    }

    #[test]
    fn priority_thresholds() {
        assert_eq!(priority_for(0), None);
        assert_eq!(priority_for(1), Some(AttentionPriority::Medium));
        assert_eq!(priority_for(2), Some(AttentionPriority::Medium));
        assert_eq!(priority_for(3), Some(AttentionPriority::High));
    }

    #[test]
    fn seasons_do_not_break_advance() {
        let mut state = empty_state();
        let mut rng = SmallRng::seed_from_u64(9);
        let config = PopulationConfig::default();
        for _ in 0..5 {
            add_survivor(&mut state, None, &config, &mut rng);
        }
        for season in Season::ALL {
            state.time.season = season;
            advance(&mut state, 600.0, &config, 1.0, &mut rng);
        }
        for survivor in &state.survivors {
            assert!((0.0..=100.0).contains(&survivor.health));
            assert!((34.0..=40.0).contains(&survivor.temperature));
        }
    }
}
