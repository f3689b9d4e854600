//! Tunable constants for survivor vitals, conditions and population
//! management.
//!
//! Every rate is per in-game hour unless its name says otherwise. The core
//! loads this from the `population` section of `colony-config.yaml`; any
//! field left out keeps its default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use colony_types::Season;

/// Configuration for the population system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Hunger lost per hour before multipliers (default: 2).
    pub hunger_per_hour: f64,
    /// Hunger multiplier while working (default: 1.5).
    pub working_hunger_multiplier: f64,
    /// Hunger multiplier in winter (default: 1.3).
    pub winter_hunger_multiplier: f64,
    /// Hunger multiplier while sick or injured (default: 1.2).
    pub unwell_hunger_multiplier: f64,

    /// Stamina regained per hour while resting (default: 20).
    pub resting_stamina_per_hour: f64,
    /// Stamina regained per hour while idle (default: 5).
    pub idle_stamina_per_hour: f64,
    /// Stamina lost per hour while working (default: 8).
    pub working_stamina_per_hour: f64,
    /// Immediate stamina granted by the rest command (default: 30).
    pub rest_stamina_bonus: f64,

    /// Fraction of the gap to ambient closed per hour (default: 0.1).
    pub temperature_drift_per_hour: f64,
    /// Shelter level from which assigned survivors drift half as fast
    /// (default: 2).
    pub sheltered_min_level: u32,
    /// Extra body heat lost per hour by outdoor workers in winter
    /// (default: 0.5).
    pub winter_outdoor_chill_per_hour: f64,

    /// Health regained per hour before multipliers (default: 1).
    pub health_recovery_per_hour: f64,
    /// Recovery multiplier per season (missing entries are 1).
    pub season_recovery: BTreeMap<Season, f64>,
    /// Health lost per hour when hunger is below 20 (default: 2).
    pub starving_damage_per_hour: f64,
    /// Health lost per hour when hunger is below 50 (default: 0.5).
    pub hungry_damage_per_hour: f64,
    /// Health lost per hour when body temperature is below 35 (default: 3).
    pub hypothermia_damage_per_hour: f64,
    /// Health lost per hour when body temperature is below 36 (default: 1).
    pub cold_damage_per_hour: f64,
    /// Health lost per hour while sick (default: 1).
    pub sickness_damage_per_hour: f64,
    /// Health lost per hour while injured (default: 2).
    pub injury_damage_per_hour: f64,

    /// Base chance per hour of falling sick (default: 0.0001).
    pub sickness_chance_per_hour: f64,
    /// Base chance per hour of getting injured (default: 0.00005).
    pub injury_chance_per_hour: f64,
    /// Chance per tick that an eligible sick survivor recovers
    /// (default: 0.01).
    pub recovery_chance_per_tick: f64,
    /// Chance per tick that an eligible injured survivor recovers
    /// (default: 0.005).
    pub injury_recovery_chance_per_tick: f64,
    /// Chance per hour of working that the trained skill improves
    /// (default: 0.02).
    pub skill_gain_chance_per_hour: f64,

    /// Health at or above which healing clears sickness and injury
    /// (default: 70).
    pub heal_clears_conditions_at: f64,
    /// Lowest base skill rolled for a new survivor (default: 1).
    pub min_starting_skill: u8,
    /// Highest base skill rolled for a new survivor (default: 3).
    pub max_starting_skill: u8,
    /// Remove survivors whose health reaches zero (default: true).
    pub deaths_enabled: bool,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            hunger_per_hour: 2.0,
            working_hunger_multiplier: 1.5,
            winter_hunger_multiplier: 1.3,
            unwell_hunger_multiplier: 1.2,
            resting_stamina_per_hour: 20.0,
            idle_stamina_per_hour: 5.0,
            working_stamina_per_hour: 8.0,
            rest_stamina_bonus: 30.0,
            temperature_drift_per_hour: 0.1,
            sheltered_min_level: 2,
            winter_outdoor_chill_per_hour: 0.5,
            health_recovery_per_hour: 1.0,
            season_recovery: BTreeMap::from([
                (Season::Spring, 1.0),
                (Season::Summer, 1.2),
                (Season::Autumn, 1.0),
                (Season::Winter, 0.7),
            ]),
            starving_damage_per_hour: 2.0,
            hungry_damage_per_hour: 0.5,
            hypothermia_damage_per_hour: 3.0,
            cold_damage_per_hour: 1.0,
            sickness_damage_per_hour: 1.0,
            injury_damage_per_hour: 2.0,
            sickness_chance_per_hour: 0.0001,
            injury_chance_per_hour: 0.00005,
            recovery_chance_per_tick: 0.01,
            injury_recovery_chance_per_tick: 0.005,
            skill_gain_chance_per_hour: 0.02,
            heal_clears_conditions_at: 70.0,
            min_starting_skill: 1,
            max_starting_skill: 3,
            deaths_enabled: true,
        }
    }
}

impl PopulationConfig {
    /// Health recovery multiplier for a season.
    pub fn season_recovery_multiplier(&self, season: Season) -> f64 {
        self.season_recovery.get(&season).copied().unwrap_or(1.0)
    }
}
