//! Configuration loading and typed config structures for the colony
//! simulation.
//!
//! The canonical configuration lives in `colony-config.yaml` at the project
//! root. Every section and field has a default, so a partial (or empty) file
//! yields a playable game.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use colony_survivors::PopulationConfig;
use colony_types::{Difficulty, ResourceAmounts, Season};
use colony_world::{LedgerConfig, default_starting_resources};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The values parsed but cannot drive a simulation.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `colony-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// New-game settings (seed, survivors, difficulty, stocks).
    #[serde(default)]
    pub world: WorldConfig,

    /// Clock speed, season length and temperatures.
    #[serde(default)]
    pub clock: ClockConfig,

    /// Tick gate, autosave cadence and loop timing.
    #[serde(default)]
    pub tick: TickConfig,

    /// Resource ledger tunables.
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Survivor tunables.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Multipliers per difficulty tier.
    #[serde(default)]
    pub difficulty: DifficultyConfig,

    /// Save file settings.
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml rejects an empty document; treat it as all defaults.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values that would otherwise stall the clock, corrupt the
    /// ledger or make a random roll panic.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clock.days_per_season == 0 {
            return Err(invalid("clock.days_per_season must be at least 1"));
        }
        if !is_positive(self.clock.minutes_per_real_second) {
            return Err(invalid("clock.minutes_per_real_second must be positive"));
        }
        if self.clock.daytime_start_hour >= self.clock.daytime_end_hour
            || self.clock.daytime_end_hour > 24
        {
            return Err(invalid("clock daytime hours must satisfy start < end <= 24"));
        }
        if !is_positive(self.tick.max_tick_seconds) {
            return Err(invalid("tick.max_tick_seconds must be positive"));
        }
        if self.tick.loop_interval_ms == 0 {
            return Err(invalid("tick.loop_interval_ms must be at least 1"));
        }
        if self
            .clock
            .season_temperatures
            .values()
            .chain([&self.clock.day_night_swing, &self.clock.temperature_jitter])
            .any(|v| !v.is_finite())
        {
            return Err(invalid("clock temperatures must be finite"));
        }
        for (name, value) in self.probabilities() {
            if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
                return Err(invalid(format!("{name} must be a probability in [0, 1]")));
            }
        }
        for (name, value) in self.population_rates().into_iter().chain(self.ledger_rates()) {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!("{name} must be finite and non-negative")));
            }
        }
        Ok(())
    }

    /// Every chance the population rolls against.
    const fn probabilities(&self) -> [(&'static str, f64); 5] {
        let population = &self.population;
        [
            (
                "population.sickness_chance_per_hour",
                population.sickness_chance_per_hour,
            ),
            (
                "population.injury_chance_per_hour",
                population.injury_chance_per_hour,
            ),
            (
                "population.recovery_chance_per_tick",
                population.recovery_chance_per_tick,
            ),
            (
                "population.injury_recovery_chance_per_tick",
                population.injury_recovery_chance_per_tick,
            ),
            (
                "population.skill_gain_chance_per_hour",
                population.skill_gain_chance_per_hour,
            ),
        ]
    }

    /// Survivor rates and multipliers that must be non-negative numbers.
    fn population_rates(&self) -> Vec<(&'static str, f64)> {
        let population = &self.population;
        let mut rates = vec![
            ("population.hunger_per_hour", population.hunger_per_hour),
            (
                "population.working_hunger_multiplier",
                population.working_hunger_multiplier,
            ),
            (
                "population.winter_hunger_multiplier",
                population.winter_hunger_multiplier,
            ),
            (
                "population.unwell_hunger_multiplier",
                population.unwell_hunger_multiplier,
            ),
            (
                "population.resting_stamina_per_hour",
                population.resting_stamina_per_hour,
            ),
            (
                "population.idle_stamina_per_hour",
                population.idle_stamina_per_hour,
            ),
            (
                "population.working_stamina_per_hour",
                population.working_stamina_per_hour,
            ),
            ("population.rest_stamina_bonus", population.rest_stamina_bonus),
            (
                "population.temperature_drift_per_hour",
                population.temperature_drift_per_hour,
            ),
            (
                "population.winter_outdoor_chill_per_hour",
                population.winter_outdoor_chill_per_hour,
            ),
            (
                "population.health_recovery_per_hour",
                population.health_recovery_per_hour,
            ),
            (
                "population.starving_damage_per_hour",
                population.starving_damage_per_hour,
            ),
            (
                "population.hungry_damage_per_hour",
                population.hungry_damage_per_hour,
            ),
            (
                "population.hypothermia_damage_per_hour",
                population.hypothermia_damage_per_hour,
            ),
            ("population.cold_damage_per_hour", population.cold_damage_per_hour),
            (
                "population.sickness_damage_per_hour",
                population.sickness_damage_per_hour,
            ),
            (
                "population.injury_damage_per_hour",
                population.injury_damage_per_hour,
            ),
            (
                "population.heal_clears_conditions_at",
                population.heal_clears_conditions_at,
            ),
        ];
        rates.extend(
            population
                .season_recovery
                .values()
                .map(|v| ("population.season_recovery", *v)),
        );
        rates
    }

    /// Ledger, difficulty and stock values that must be non-negative numbers.
    fn ledger_rates(&self) -> Vec<(&'static str, f64)> {
        let ledger = &self.ledger;
        let mut rates = vec![
            (
                "ledger.food_per_survivor_per_hour",
                ledger.food_per_survivor_per_hour,
            ),
            ("ledger.working_food_multiplier", ledger.working_food_multiplier),
            ("ledger.unwell_food_multiplier", ledger.unwell_food_multiplier),
            ("ledger.winter_food_multiplier", ledger.winter_food_multiplier),
            (
                "ledger.winter_fuel_per_survivor_per_hour",
                ledger.winter_fuel_per_survivor_per_hour,
            ),
            ("ledger.insulation_discount", ledger.insulation_discount),
            ("ledger.insulation_floor", ledger.insulation_floor),
            ("ledger.low_alert_ratio", ledger.low_alert_ratio),
            ("ledger.critical_alert_ratio", ledger.critical_alert_ratio),
        ];
        for tier in [
            self.difficulty.easy,
            self.difficulty.normal,
            self.difficulty.hard,
        ] {
            rates.push(("difficulty.resource", tier.resource));
            rates.push(("difficulty.recovery", tier.recovery));
        }
        rates.extend(
            ledger
                .season_multipliers
                .values()
                .flat_map(BTreeMap::values)
                .map(|v| ("ledger.season_multipliers", *v)),
        );
        rates.extend(
            ledger
                .base_capacity
                .values()
                .map(|v| ("ledger.base_capacity", *v)),
        );
        rates.extend(
            self.world
                .starting_resources
                .values()
                .map(|v| ("world.starting_resources", *v)),
        );
        rates
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.into(),
    }
}

/// Settings for a new game.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Survivors a new colony starts with.
    #[serde(default = "default_starting_survivors")]
    pub starting_survivors: u32,

    /// Difficulty tier of a new game.
    #[serde(default)]
    pub difficulty: Difficulty,

    /// Stock levels of a new colony.
    #[serde(default = "default_starting_resources")]
    pub starting_resources: ResourceAmounts,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            starting_survivors: default_starting_survivors(),
            difficulty: Difficulty::default(),
            starting_resources: default_starting_resources(),
        }
    }
}

/// Clock speed, calendar and ambient temperature.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClockConfig {
    /// In-game minutes that pass per real second.
    #[serde(default = "default_minutes_per_real_second")]
    pub minutes_per_real_second: f64,

    /// Days in one season.
    #[serde(default = "default_days_per_season")]
    pub days_per_season: u32,

    /// Base ambient temperature per season.
    #[serde(default = "default_season_temperatures")]
    pub season_temperatures: BTreeMap<Season, f64>,

    /// Degrees added during the day and removed at night.
    #[serde(default = "default_day_night_swing")]
    pub day_night_swing: f64,

    /// Half-width of the uniform temperature noise.
    #[serde(default = "default_temperature_jitter")]
    pub temperature_jitter: f64,

    /// First daytime hour (inclusive).
    #[serde(default = "default_daytime_start_hour")]
    pub daytime_start_hour: u32,

    /// First night hour after daytime (exclusive end of daytime).
    #[serde(default = "default_daytime_end_hour")]
    pub daytime_end_hour: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            minutes_per_real_second: default_minutes_per_real_second(),
            days_per_season: default_days_per_season(),
            season_temperatures: default_season_temperatures(),
            day_night_swing: default_day_night_swing(),
            temperature_jitter: default_temperature_jitter(),
            daytime_start_hour: default_daytime_start_hour(),
            daytime_end_hour: default_daytime_end_hour(),
        }
    }
}

impl ClockConfig {
    /// Base ambient temperature of a season (0 if the table lacks it).
    pub fn base_temperature(&self, season: Season) -> f64 {
        self.season_temperatures
            .get(&season)
            .copied()
            .unwrap_or(0.0)
    }
}

/// Tick gate, autosave cadence and host loop timing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TickConfig {
    /// Minimum real milliseconds between admitted ticks.
    #[serde(default = "default_min_tick_interval_ms")]
    pub min_tick_interval_ms: u64,

    /// Longest real interval a single tick integrates; longer stalls are
    /// clamped.
    #[serde(default = "default_max_tick_seconds")]
    pub max_tick_seconds: f64,

    /// Autosave every N in-game minutes (0 disables autosave).
    #[serde(default = "default_autosave_interval_minutes")]
    pub autosave_interval_minutes: u64,

    /// How often the engine binary polls the tick gate.
    #[serde(default = "default_loop_interval_ms")]
    pub loop_interval_ms: u64,

    /// Stop the engine binary after this many admitted ticks.
    #[serde(default)]
    pub max_ticks: Option<u64>,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            min_tick_interval_ms: default_min_tick_interval_ms(),
            max_tick_seconds: default_max_tick_seconds(),
            autosave_interval_minutes: default_autosave_interval_minutes(),
            loop_interval_ms: default_loop_interval_ms(),
            max_ticks: None,
        }
    }
}

/// Resource and recovery multipliers of one difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DifficultyMultipliers {
    /// Scales the net resource flow.
    #[serde(default = "default_multiplier")]
    pub resource: f64,
    /// Scales survivor health recovery.
    #[serde(default = "default_multiplier")]
    pub recovery: f64,
}

impl Default for DifficultyMultipliers {
    fn default() -> Self {
        Self {
            resource: default_multiplier(),
            recovery: default_multiplier(),
        }
    }
}

/// Multipliers per difficulty tier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DifficultyConfig {
    /// Easy tier.
    #[serde(default = "default_easy")]
    pub easy: DifficultyMultipliers,
    /// Normal tier.
    #[serde(default)]
    pub normal: DifficultyMultipliers,
    /// Hard tier.
    #[serde(default = "default_hard")]
    pub hard: DifficultyMultipliers,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            easy: default_easy(),
            normal: DifficultyMultipliers::default(),
            hard: default_hard(),
        }
    }
}

impl DifficultyConfig {
    /// Multipliers of a tier.
    pub const fn multipliers(&self, difficulty: Difficulty) -> DifficultyMultipliers {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Save file settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersistenceConfig {
    /// Path of the JSON save file.
    #[serde(default = "default_save_path")]
    pub save_path: String,

    /// Whether ticks trigger autosaves.
    #[serde(default = "default_true")]
    pub autosave: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
            autosave: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_seed() -> u64 {
    42
}

const fn default_starting_survivors() -> u32 {
    5
}

const fn default_minutes_per_real_second() -> f64 {
    1.0
}

const fn default_days_per_season() -> u32 {
    30
}

fn default_season_temperatures() -> BTreeMap<Season, f64> {
    BTreeMap::from([
        (Season::Spring, 12.0),
        (Season::Summer, 24.0),
        (Season::Autumn, 8.0),
        (Season::Winter, -8.0),
    ])
}

const fn default_day_night_swing() -> f64 {
    5.0
}

const fn default_temperature_jitter() -> f64 {
    1.5
}

const fn default_daytime_start_hour() -> u32 {
    6
}

const fn default_daytime_end_hour() -> u32 {
    18
}

const fn default_min_tick_interval_ms() -> u64 {
    1000
}

const fn default_max_tick_seconds() -> f64 {
    300.0
}

const fn default_autosave_interval_minutes() -> u64 {
    5
}

const fn default_loop_interval_ms() -> u64 {
    250
}

const fn default_multiplier() -> f64 {
    1.0
}

const fn default_easy() -> DifficultyMultipliers {
    DifficultyMultipliers {
        resource: 1.25,
        recovery: 1.25,
    }
}

const fn default_hard() -> DifficultyMultipliers {
    DifficultyMultipliers {
        resource: 0.75,
        recovery: 0.75,
    }
}

fn default_save_path() -> String {
    "colony-save.json".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}
