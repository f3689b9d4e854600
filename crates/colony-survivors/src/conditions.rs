//! Stochastic health transitions: falling sick, getting injured, spontaneous
//! recovery and skill gain.
//!
//! Every probability is a pure function of the survivor and the season, so
//! it can be checked without randomness. [`check_health_conditions`] turns
//! the per-hour chances into per-tick chances (`p_hour x hours`, clamped
//! into `[0, 1]`) and rolls them against the injected generator.

use rand::Rng;

use colony_types::{JobType, Season, SkillKind, Survivor};

use crate::config::PopulationConfig;
use crate::vitals::{COLD_TEMPERATURE, HYPOTHERMIA_TEMPERATURE};

/// Health above which a sick survivor may recover.
pub const SICK_RECOVERY_HEALTH: f64 = 80.0;

/// Hunger above which a sick survivor may recover.
pub const SICK_RECOVERY_HUNGER: f64 = 70.0;

/// Health above which an injured survivor may recover.
pub const INJURY_RECOVERY_HEALTH: f64 = 90.0;

/// Stamina below which the injury chance triples.
pub const EXHAUSTED_STAMINA: f64 = 20.0;

/// What changed for one survivor during a condition check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConditionChanges {
    /// The survivor fell sick.
    pub fell_sick: bool,
    /// The survivor got injured.
    pub got_injured: bool,
    /// The survivor recovered from sickness.
    pub recovered_from_sickness: bool,
    /// The survivor recovered from injury.
    pub recovered_from_injury: bool,
    /// The base skill that improved, if any.
    pub skill_gained: Option<SkillKind>,
}

impl ConditionChanges {
    /// Whether anything changed.
    pub const fn any(&self) -> bool {
        self.fell_sick
            || self.got_injured
            || self.recovered_from_sickness
            || self.recovered_from_injury
            || self.skill_gained.is_some()
    }
}

/// Per-hour chance that a healthy survivor falls sick.
///
/// Base rate x5 below 30 health (x3 below 50), x2 below 30 hunger,
/// x2 below 35 degrees (x1.5 below 36), x2 in winter. Zero if already sick.
pub fn sickness_chance_per_hour(
    survivor: &Survivor,
    season: Season,
    config: &PopulationConfig,
) -> f64 {
    if survivor.is_sick {
        return 0.0;
    }
    let mut chance = config.sickness_chance_per_hour;
    if survivor.health < 30.0 {
        chance *= 5.0;
    } else if survivor.health < 50.0 {
        chance *= 3.0;
    }
    if survivor.hunger < 30.0 {
        chance *= 2.0;
    }
    if survivor.temperature < HYPOTHERMIA_TEMPERATURE {
        chance *= 2.0;
    } else if survivor.temperature < COLD_TEMPERATURE {
        chance *= 1.5;
    }
    if season == Season::Winter {
        chance *= 2.0;
    }
    chance
}

/// Per-hour chance that an uninjured survivor gets hurt.
///
/// Base rate x1.5 for gathering, x2 for construction, x3 below 20
/// stamina. Zero if already injured.
pub fn injury_chance_per_hour(survivor: &Survivor, config: &PopulationConfig) -> f64 {
    if survivor.is_injured {
        return 0.0;
    }
    let mut chance = config.injury_chance_per_hour;
    match survivor.job_type {
        JobType::Gathering => chance *= 1.5,
        JobType::Construction => chance *= 2.0,
        JobType::Idle | JobType::Research | JobType::Resting => {}
    }
    if survivor.stamina < EXHAUSTED_STAMINA {
        chance *= 3.0;
    }
    chance
}

/// Per-tick chance that a sick survivor recovers on their own.
///
/// Only survivors above 80 health and 70 hunger are eligible.
pub fn sickness_recovery_chance(survivor: &Survivor, config: &PopulationConfig) -> f64 {
    if survivor.is_sick
        && survivor.health > SICK_RECOVERY_HEALTH
        && survivor.hunger > SICK_RECOVERY_HUNGER
    {
        config.recovery_chance_per_tick
    } else {
        0.0
    }
}

/// Per-tick chance that an injured survivor recovers on their own.
///
/// Only survivors above 90 health are eligible.
pub fn injury_recovery_chance(survivor: &Survivor, config: &PopulationConfig) -> f64 {
    if survivor.is_injured && survivor.health > INJURY_RECOVERY_HEALTH {
        config.injury_recovery_chance_per_tick
    } else {
        0.0
    }
}

/// Per-hour chance that the skill trained by the current job improves.
///
/// Zero for idle or resting survivors and for skills already at the cap.
pub fn skill_gain_chance_per_hour(survivor: &Survivor, config: &PopulationConfig) -> f64 {
    match survivor.job_type.trained_skill() {
        Some(kind) if survivor.skills.level(kind) < colony_types::MAX_SKILL_LEVEL => {
            config.skill_gain_chance_per_hour
        }
        _ => 0.0,
    }
}

/// Convert a per-hour chance into a per-tick chance in `[0, 1]`.
pub fn per_tick(chance_per_hour: f64, hours: f64) -> f64 {
    probability(chance_per_hour * hours)
}

/// Clamp a chance into `[0, 1]`; NaN never fires.
pub const fn probability(chance: f64) -> f64 {
    if chance.is_nan() {
        0.0
    } else {
        chance.clamp(0.0, 1.0)
    }
}

/// Roll every stochastic transition for one survivor and apply the ones
/// that fire.
///
/// Runs after the vital integrators. New conditions are rolled before
/// recovery, so a survivor never falls sick and recovers in the same tick.
pub fn check_health_conditions(
    survivor: &mut Survivor,
    season: Season,
    hours: f64,
    config: &PopulationConfig,
    rng: &mut impl Rng,
) -> ConditionChanges {
    let mut changes = ConditionChanges::default();
    let was_sick = survivor.is_sick;
    let was_injured = survivor.is_injured;

    let sick_chance = per_tick(sickness_chance_per_hour(survivor, season, config), hours);
    if rng.random_bool(sick_chance) {
        survivor.is_sick = true;
        changes.fell_sick = true;
    }

    let injury_chance = per_tick(injury_chance_per_hour(survivor, config), hours);
    if rng.random_bool(injury_chance) {
        survivor.is_injured = true;
        changes.got_injured = true;
    }

    if was_sick {
        let chance = probability(sickness_recovery_chance(survivor, config));
        if rng.random_bool(chance) {
            survivor.is_sick = false;
            changes.recovered_from_sickness = true;
        }
    }

    if was_injured {
        let chance = probability(injury_recovery_chance(survivor, config));
        if rng.random_bool(chance) {
            survivor.is_injured = false;
            changes.recovered_from_injury = true;
        }
    }

    let skill_chance = per_tick(skill_gain_chance_per_hour(survivor, config), hours);
    if rng.random_bool(skill_chance)
        && let Some(kind) = survivor.job_type.trained_skill()
        && survivor.skills.improve(kind)
    {
        changes.skill_gained = Some(kind);
    }

    changes
}
