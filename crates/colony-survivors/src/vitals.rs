//! Continuous vital integrators applied to each survivor every tick.
//!
//! Four coupled integrators run in a fixed order, each reading what the
//! previous one wrote:
//!
//! 1. Hunger drains at the base rate, faster while working, in winter and
//!    while unwell. Floors at 0.
//! 2. Stamina recovers while resting or idle and drains while working.
//! 3. Body temperature drifts towards ambient (half as fast inside a
//!    level-2+ shelter); outdoor workers lose extra heat in winter.
//! 4. Health recovers at the base rate scaled by season and difficulty,
//!    minus penalties for hunger, cold, sickness and injury.
//!
//! The step is `hours = real_seconds / 3600`; every rate is per hour.

use colony_types::{
    JobType, MAX_BODY_TEMPERATURE, MAX_SKILL_LEVEL, MAX_VITAL, MIN_BODY_TEMPERATURE,
    NORMAL_BODY_TEMPERATURE, Season, Survivor,
};

use crate::config::PopulationConfig;

/// Hunger below which the starving penalty applies.
pub const STARVING_HUNGER: f64 = 20.0;

/// Hunger below which the hungry penalty applies.
pub const HUNGRY_HUNGER: f64 = 50.0;

/// Body temperature below which the hypothermia penalty applies.
pub const HYPOTHERMIA_TEMPERATURE: f64 = 35.0;

/// Body temperature below which the cold penalty applies.
pub const COLD_TEMPERATURE: f64 = 36.0;

/// Environment a survivor is integrated against for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalContext {
    /// Current season.
    pub season: Season,
    /// Ambient temperature from the clock.
    pub ambient_temperature: f64,
    /// Whether the survivor works in a shelter that slows heat exchange.
    pub sheltered: bool,
    /// Difficulty multiplier on health recovery.
    pub recovery_multiplier: f64,
}

/// Run all four integrators in order.
pub fn apply_vitals(
    survivor: &mut Survivor,
    context: &VitalContext,
    config: &PopulationConfig,
    hours: f64,
) {
    update_hunger(survivor, context.season, config, hours);
    update_stamina(survivor, config, hours);
    update_temperature(survivor, context, config, hours);
    update_health(survivor, context, config, hours);
}

/// Drain hunger for `hours`.
pub fn update_hunger(survivor: &mut Survivor, season: Season, config: &PopulationConfig, hours: f64) {
    let mut rate = config.hunger_per_hour;
    if survivor.job_type.is_working() {
        rate *= config.working_hunger_multiplier;
    }
    if season == Season::Winter {
        rate *= config.winter_hunger_multiplier;
    }
    if survivor.is_unwell() {
        rate *= config.unwell_hunger_multiplier;
    }
    survivor.hunger = (rate.mul_add(-hours, survivor.hunger)).clamp(0.0, MAX_VITAL);
}

/// Recover or drain stamina for `hours` depending on the job.
pub fn update_stamina(survivor: &mut Survivor, config: &PopulationConfig, hours: f64) {
    let rate = if survivor.job_type.is_working() {
        -config.working_stamina_per_hour
    } else if survivor.job_type == JobType::Resting {
        config.resting_stamina_per_hour
    } else {
        config.idle_stamina_per_hour
    };
    survivor.stamina = (rate.mul_add(hours, survivor.stamina)).clamp(0.0, MAX_VITAL);
}

/// Drift body temperature towards ambient for `hours`.
pub fn update_temperature(
    survivor: &mut Survivor,
    context: &VitalContext,
    config: &PopulationConfig,
    hours: f64,
) {
    let gap = context.ambient_temperature - survivor.temperature;
    let mut drift = gap * config.temperature_drift_per_hour * hours;
    if context.sheltered {
        drift *= 0.5;
    }
    if context.season == Season::Winter && survivor.job_type.is_outdoor() {
        drift -= config.winter_outdoor_chill_per_hour * hours;
    }
    survivor.temperature =
        (survivor.temperature + drift).clamp(MIN_BODY_TEMPERATURE, MAX_BODY_TEMPERATURE);
}

/// Hourly health change for the survivor's current condition.
pub fn health_rate(survivor: &Survivor, context: &VitalContext, config: &PopulationConfig) -> f64 {
    let mut rate = config.health_recovery_per_hour
        * config.season_recovery_multiplier(context.season)
        * context.recovery_multiplier;

    if survivor.hunger < STARVING_HUNGER {
        rate -= config.starving_damage_per_hour;
    } else if survivor.hunger < HUNGRY_HUNGER {
        rate -= config.hungry_damage_per_hour;
    }

    if survivor.temperature < HYPOTHERMIA_TEMPERATURE {
        rate -= config.hypothermia_damage_per_hour;
    } else if survivor.temperature < COLD_TEMPERATURE {
        rate -= config.cold_damage_per_hour;
    }

    if survivor.is_sick {
        rate -= config.sickness_damage_per_hour;
    }
    if survivor.is_injured {
        rate -= config.injury_damage_per_hour;
    }
    rate
}

/// Apply [`health_rate`] for `hours`.
pub fn update_health(
    survivor: &mut Survivor,
    context: &VitalContext,
    config: &PopulationConfig,
    hours: f64,
) {
    let rate = health_rate(survivor, context, config);
    survivor.health = (rate.mul_add(hours, survivor.health)).clamp(0.0, MAX_VITAL);
}

/// Pull every vital and skill of a survivor back into range.
///
/// Values loaded from outside the simulation may be out of range or NaN.
/// NaN vitals reset to full and NaN body temperature to normal. Returns
/// `true` if anything changed.
pub fn clamp_vitals(survivor: &mut Survivor) -> bool {
    let before = survivor.clone();
    survivor.health = bounded(survivor.health, 0.0, MAX_VITAL, MAX_VITAL);
    survivor.hunger = bounded(survivor.hunger, 0.0, MAX_VITAL, MAX_VITAL);
    survivor.stamina = bounded(survivor.stamina, 0.0, MAX_VITAL, MAX_VITAL);
    survivor.temperature = bounded(
        survivor.temperature,
        MIN_BODY_TEMPERATURE,
        MAX_BODY_TEMPERATURE,
        NORMAL_BODY_TEMPERATURE,
    );
    let skills = &mut survivor.skills;
    for slot in [
        &mut skills.gathering,
        &mut skills.construction,
        &mut skills.research,
    ] {
        *slot = (*slot).clamp(1, MAX_SKILL_LEVEL);
    }
    *survivor != before
}

const fn bounded(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use colony_types::Skills;

    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn survivor(job_type: JobType) -> Survivor {
        let mut survivor = Survivor::new(String::from("Test"), Skills::default());
        survivor.job_type = job_type;
        survivor
    }

    fn context(season: Season, ambient: f64) -> VitalContext {
        VitalContext {
            season,
            ambient_temperature: ambient,
            sheltered: false,
            recovery_multiplier: 1.0,
        }
    }

    #[test]
    fn hunger_multipliers_stack() {
        let config = PopulationConfig::default();
        let mut worker = survivor(JobType::Construction);
        worker.is_injured = true;
        update_hunger(&mut worker, Season::Winter, &config, 1.0);
        assert!(approx(worker.hunger, 100.0 - 2.0 * 1.5 * 1.3 * 1.2));
    }

    #[test]
    fn hunger_floors_at_zero() {
        let config = PopulationConfig::default();
        let mut idle = survivor(JobType::Idle);
        idle.hunger = 1.0;
        update_hunger(&mut idle, Season::Spring, &config, 10.0);
        assert!(approx(idle.hunger, 0.0));
    }

    #[test]
    fn stamina_depends_on_job() {
        let config = PopulationConfig::default();
        let mut resting = survivor(JobType::Resting);
        resting.stamina = 50.0;
        update_stamina(&mut resting, &config, 1.0);
        assert!(approx(resting.stamina, 70.0));

        let mut idle = survivor(JobType::Idle);
        idle.stamina = 50.0;
        update_stamina(&mut idle, &config, 1.0);
        assert!(approx(idle.stamina, 55.0));

        let mut worker = survivor(JobType::Research);
        worker.stamina = 50.0;
        update_stamina(&mut worker, &config, 1.0);
        assert!(approx(worker.stamina, 42.0));
    }

    #[test]
    fn temperature_drifts_towards_ambient() {
        let config = PopulationConfig::default();
        let mut idle = survivor(JobType::Idle);
        update_temperature(&mut idle, &context(Season::Summer, 27.0), &config, 1.0);
        assert!(approx(idle.temperature, NORMAL_BODY_TEMPERATURE - 1.0));
    }

    #[test]
    fn shelter_halves_drift_and_winter_chills_outdoor_workers() {
        let config = PopulationConfig::default();
        let mut sheltered = survivor(JobType::Construction);
        let mut ctx = context(Season::Winter, 27.0);
        ctx.sheltered = true;
        update_temperature(&mut sheltered, &ctx, &config, 1.0);
        assert!(approx(sheltered.temperature, NORMAL_BODY_TEMPERATURE - 0.5 - 0.5));

        let mut researcher = survivor(JobType::Research);
        update_temperature(&mut researcher, &ctx, &config, 1.0);
        assert!(approx(researcher.temperature, NORMAL_BODY_TEMPERATURE - 0.5));
    }

    #[test]
    fn temperature_is_clamped() {
        let config = PopulationConfig::default();
        let mut idle = survivor(JobType::Idle);
        update_temperature(&mut idle, &context(Season::Winter, -8.0), &config, 100.0);
        assert!(approx(idle.temperature, MIN_BODY_TEMPERATURE));
    }

    #[test]
    fn starving_survivor_loses_health_at_accelerated_rate() {
        let config = PopulationConfig::default();
        let mut starving = survivor(JobType::Idle);
        starving.hunger = 10.0;
        starving.health = 80.0;
        update_health(&mut starving, &context(Season::Spring, 37.0), &config, 1.0);
        assert!(approx(starving.health, 80.0 + 1.0 - 2.0));

        let mut hungry = survivor(JobType::Idle);
        hungry.hunger = 40.0;
        hungry.health = 80.0;
        update_health(&mut hungry, &context(Season::Spring, 37.0), &config, 1.0);
        assert!(approx(hungry.health, 80.0 + 1.0 - 0.5));
    }

    #[test]
    fn all_penalties_combine() {
        let config = PopulationConfig::default();
        let mut wreck = survivor(JobType::Idle);
        wreck.hunger = 5.0;
        wreck.temperature = 34.5;
        wreck.is_sick = true;
        wreck.is_injured = true;
        let rate = health_rate(&wreck, &context(Season::Winter, 0.0), &config);
        assert!(approx(rate, 0.7 - 2.0 - 3.0 - 1.0 - 2.0));
    }

    #[test]
    fn integrators_run_in_order() {
        // Hunger crosses below 20 during the hunger step, so the health step
        // in the same call already sees the starving penalty.
        let config = PopulationConfig::default();
        let mut survivor = survivor(JobType::Idle);
        survivor.hunger = 21.0;
        survivor.health = 50.0;
        apply_vitals(&mut survivor, &context(Season::Spring, 37.0), &config, 1.0);
        assert!(approx(survivor.hunger, 19.0));
        assert!(approx(survivor.health, 50.0 + 1.0 - 2.0));
    }

    #[test]
    fn clamp_vitals_restores_ranges() {
        let mut survivor = Survivor::new(String::from("Edited"), Skills::default());
        assert!(!clamp_vitals(&mut survivor));

        survivor.health = 500.0;
        survivor.hunger = -3.0;
        survivor.stamina = f64::NAN;
        survivor.temperature = 10.0;
        survivor.skills.research = 40;
        assert!(clamp_vitals(&mut survivor));
        assert!(approx(survivor.health, MAX_VITAL));
        assert!(approx(survivor.hunger, 0.0));
        assert!(approx(survivor.stamina, MAX_VITAL));
        assert!(approx(survivor.temperature, MIN_BODY_TEMPERATURE));
        assert_eq!(survivor.skills.research, MAX_SKILL_LEVEL);
    }
}
