//! Game clock: minutes, hours, days, seasons and ambient temperature.
//!
//! Real seconds are converted to in-game minutes at
//! [`ClockConfig::minutes_per_real_second`]. Overflow carries minutes into
//! hours and hours into days. Each day rollover increments
//! `days_survived`; a rollover onto a day divisible by `days_per_season`
//! moves to the next season. Ambient temperature is recomputed on every
//! advance from the season base, a day/night swing and uniform noise.
//!
//! The clock never fails and has no side effects beyond the [`GameState`]
//! it is given. Boundary crossings are returned as [`ClockEvents`].

use rand::Rng;
use tracing::{info, warn};

use colony_types::{GameState, GameTime, Season};

use crate::config::ClockConfig;

/// Minutes in one in-game hour.
const MINUTES_PER_HOUR: f64 = 60.0;

/// Hours in one in-game day.
const HOURS_PER_DAY: u32 = 24;

/// Seasons in one cycle.
const SEASONS_PER_YEAR: u32 = 4;

/// Boundaries crossed by one clock advance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClockEvents {
    /// In-game minutes that passed.
    pub minutes_elapsed: f64,
    /// Day rollovers during this advance.
    pub days_elapsed: u32,
    /// The season entered, if a season boundary was crossed (the last one
    /// when several were).
    pub season_changed: Option<Season>,
}

impl ClockEvents {
    /// Whether at least one new day began.
    pub const fn new_day(&self) -> bool {
        self.days_elapsed > 0
    }
}

/// Advance the clock by `real_seconds` of wall time.
///
/// Non-finite or negative input advances nothing. The carry is computed
/// arithmetically, so a single call may span any number of days.
pub fn advance(
    state: &mut GameState,
    real_seconds: f64,
    config: &ClockConfig,
    rng: &mut impl Rng,
) -> ClockEvents {
    let mut minutes = real_seconds.max(0.0) * config.minutes_per_real_second;
    if !minutes.is_finite() || minutes < 0.0 {
        warn!(real_seconds, "Ignoring non-finite clock advance");
        minutes = 0.0;
    }
    let mut events = ClockEvents {
        minutes_elapsed: minutes,
        ..ClockEvents::default()
    };

    let time = &mut state.time;
    let start_minute = if time.minute.is_finite() {
        time.minute.max(0.0)
    } else {
        0.0
    };
    let total_minutes = start_minute + minutes;
    let carried_hours = (total_minutes / MINUTES_PER_HOUR).floor();
    time.minute = total_minutes.rem_euclid(MINUTES_PER_HOUR);
    if time.minute >= MINUTES_PER_HOUR {
        time.minute = 0.0;
    }

    let total_hours = f64::from(time.hour) + carried_hours;
    let days = whole_units((total_hours / f64::from(HOURS_PER_DAY)).floor());
    time.hour = whole_units(total_hours.rem_euclid(f64::from(HOURS_PER_DAY)))
        .min(HOURS_PER_DAY.saturating_sub(1));

    if days > 0 {
        let previous_day = time.day;
        time.day = time.day.saturating_add(days);
        events.days_elapsed = time.day.saturating_sub(previous_day);
        state.game_stats.days_survived = state
            .game_stats
            .days_survived
            .saturating_add(events.days_elapsed);

        // Season boundaries are the multiples of `days_per_season` in
        // (previous_day, day].
        let boundaries = time
            .day
            .checked_div(config.days_per_season)
            .zip(previous_day.checked_div(config.days_per_season))
            .map_or(0, |(now, before)| now.saturating_sub(before));
        if boundaries > 0 {
            for _ in 0..boundaries.checked_rem(SEASONS_PER_YEAR).unwrap_or(0) {
                time.season = time.season.next();
            }
            events.season_changed = Some(time.season);
            info!(day = time.day, season = ?time.season, "Season changed");
        }
    }

    refresh_temperature(time, config, rng);
    events
}

/// Run [`advance`] with the real-seconds equivalent of `hours` of game time.
pub fn fast_forward(
    state: &mut GameState,
    hours: f64,
    config: &ClockConfig,
    rng: &mut impl Rng,
) -> ClockEvents {
    if config.minutes_per_real_second <= 0.0 || !hours.is_finite() {
        warn!(hours, "Ignoring fast-forward");
        return ClockEvents::default();
    }
    let real_seconds = hours.max(0.0) * MINUTES_PER_HOUR / config.minutes_per_real_second;
    advance(state, real_seconds, config, rng)
}

/// Truncate a non-negative whole number of units into a `u32`, saturating.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_units(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value as u32
    }
}

/// Pull a loaded time back into range without advancing it.
///
/// The minute is wrapped into `[0, 60)` (NaN becomes 0), the hour into
/// `[0, 24)`, day 0 becomes day 1 and a non-finite ambient temperature is
/// replaced by the season base. Returns `true` if anything changed.
pub fn normalize_time(time: &mut GameTime, config: &ClockConfig) -> bool {
    let before = time.clone();
    time.minute = if time.minute.is_finite() {
        time.minute.rem_euclid(MINUTES_PER_HOUR)
    } else {
        0.0
    };
    if time.minute >= MINUTES_PER_HOUR {
        time.minute = 0.0;
    }
    time.hour = time.hour.checked_rem(HOURS_PER_DAY).unwrap_or(0);
    time.day = time.day.max(1);
    if !time.temperature.is_finite() {
        time.temperature = config.base_temperature(time.season);
    }
    *time != before
}

/// Whether `hour` falls in the configured daytime window.
pub const fn is_daytime(hour: u32, config: &ClockConfig) -> bool {
    hour >= config.daytime_start_hour && hour < config.daytime_end_hour
}

/// Whole days left before the next season change.
pub fn days_until_season_change(time: &GameTime, config: &ClockConfig) -> u32 {
    let into_season = time.day.checked_rem(config.days_per_season).unwrap_or(0);
    config.days_per_season.saturating_sub(into_season)
}

/// Recompute ambient temperature for the current season and hour.
pub fn refresh_temperature(time: &mut GameTime, config: &ClockConfig, rng: &mut impl Rng) {
    let swing = if is_daytime(time.hour, config) {
        config.day_night_swing
    } else {
        -config.day_night_swing
    };
    let jitter = config.temperature_jitter.abs();
    let noise = if jitter > 0.0 && jitter.is_finite() {
        rng.random_range(-jitter..=jitter)
    } else {
        0.0
    };
    time.temperature = config.base_temperature(time.season) + swing + noise;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use colony_types::{Difficulty, GameStats};

    use super::*;

    fn state_at(day: u32, hour: u32, minute: f64) -> GameState {
        GameState {
            resources: BTreeMap::new(),
            buildings: Vec::new(),
            survivors: Vec::new(),
            time: GameTime {
                day,
                hour,
                minute,
                ..GameTime::default()
            },
            game_stats: GameStats::default(),
            difficulty: Difficulty::Normal,
        }
    }

    fn calm_config() -> ClockConfig {
        ClockConfig {
            temperature_jitter: 0.0,
            ..ClockConfig::default()
        }
    }

    #[test]
    fn one_real_second_is_one_game_minute() {
        let mut state = state_at(1, 8, 0.0);
        let mut rng = SmallRng::seed_from_u64(1);
        let events = advance(&mut state, 1.0, &calm_config(), &mut rng);
        assert!((state.time.minute - 1.0).abs() < 1e-9);
        assert_eq!(state.time.hour, 8);
        assert!((events.minutes_elapsed - 1.0).abs() < 1e-9);
        assert!(!events.new_day());
    }

    #[test]
    fn minutes_carry_into_hours_and_days() {
        let mut state = state_at(1, 23, 59.5);
        let mut rng = SmallRng::seed_from_u64(1);
        let events = advance(&mut state, 1.0, &calm_config(), &mut rng);
        assert_eq!(state.time.day, 2);
        assert_eq!(state.time.hour, 0);
        assert!((state.time.minute - 0.5).abs() < 1e-9);
        assert_eq!(events.days_elapsed, 1);
        assert_eq!(state.game_stats.days_survived, 1);
    }

    #[test]
    fn season_changes_on_divisible_day() {
        let mut state = state_at(29, 23, 59.0);
        let mut rng = SmallRng::seed_from_u64(1);
        let events = advance(&mut state, 1.0, &calm_config(), &mut rng);
        assert_eq!(state.time.day, 30);
        assert_eq!(state.time.season, Season::Summer);
        assert_eq!(events.season_changed, Some(Season::Summer));
    }

    #[test]
    fn fast_forward_multiple_days() {
        let mut state = state_at(1, 8, 0.0);
        let mut rng = SmallRng::seed_from_u64(1);
        let events = fast_forward(&mut state, 72.0, &calm_config(), &mut rng);
        assert_eq!(state.time.day, 4);
        assert_eq!(state.time.hour, 8);
        assert_eq!(events.days_elapsed, 3);
        assert_eq!(state.game_stats.days_survived, 3);
    }

    #[test]
    fn full_year_cycles_back_to_spring() {
        let mut state = state_at(1, 0, 0.0);
        let mut rng = SmallRng::seed_from_u64(1);
        let config = ClockConfig {
            days_per_season: 2,
            ..calm_config()
        };
        // Days 2, 4, 6 and 8 each start a new season.
        fast_forward(&mut state, 24.0 * 7.0, &config, &mut rng);
        assert_eq!(state.time.day, 8);
        assert_eq!(state.time.season, Season::Spring);
    }

    #[test]
    fn temperature_follows_season_and_daylight() {
        let config = calm_config();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut noon = GameTime {
            hour: 12,
            season: Season::Summer,
            ..GameTime::default()
        };
        refresh_temperature(&mut noon, &config, &mut rng);
        assert!((noon.temperature - 29.0).abs() < 1e-9);

        let mut midnight = GameTime {
            hour: 0,
            season: Season::Winter,
            ..GameTime::default()
        };
        refresh_temperature(&mut midnight, &config, &mut rng);
        assert!((midnight.temperature + 13.0).abs() < 1e-9);
    }

    #[test]
    fn temperature_noise_stays_in_band() {
        let config = ClockConfig::default();
        let mut rng = SmallRng::seed_from_u64(5);
        let mut time = GameTime::default();
        for _ in 0..200 {
            refresh_temperature(&mut time, &config, &mut rng);
            assert!(time.temperature >= 12.0 + 5.0 - 1.5);
            assert!(time.temperature <= 12.0 + 5.0 + 1.5);
        }
    }

    #[test]
    fn daytime_window() {
        let config = ClockConfig::default();
        assert!(!is_daytime(5, &config));
        assert!(is_daytime(6, &config));
        assert!(is_daytime(17, &config));
        assert!(!is_daytime(18, &config));
    }

    #[test]
    fn days_until_season_change_counts_down() {
        let config = ClockConfig::default();
        let day_one = GameTime::default();
        assert_eq!(days_until_season_change(&day_one, &config), 29);
        let day_thirty = GameTime {
            day: 30,
            ..GameTime::default()
        };
        assert_eq!(days_until_season_change(&day_thirty, &config), 30);
    }

    #[test]
    fn infinite_fast_forward_returns_without_moving_the_clock() {
        let mut state = state_at(3, 8, 30.0);
        let mut rng = SmallRng::seed_from_u64(1);
        let events = fast_forward(&mut state, f64::INFINITY, &calm_config(), &mut rng);
        assert_eq!(events, ClockEvents::default());
        assert_eq!(state.time.day, 3);
        assert_eq!(state.time.hour, 8);

        let events = advance(&mut state, f64::NAN, &calm_config(), &mut rng);
        assert!(!events.new_day());
        assert!((state.time.minute - 30.0).abs() < 1e-9);
    }

    #[test]
    fn huge_minute_value_carries_in_one_step() {
        // Two full days and one hour expressed in minutes.
        let mut state = state_at(1, 0, 49.0 * 60.0);
        let mut rng = SmallRng::seed_from_u64(1);
        let events = advance(&mut state, 30.0, &calm_config(), &mut rng);
        assert_eq!(state.time.day, 3);
        assert_eq!(state.time.hour, 1);
        assert!((state.time.minute - 30.0).abs() < 1e-9);
        assert_eq!(events.days_elapsed, 2);

        let mut state = state_at(1, 0, 1e15);
        advance(&mut state, 0.0, &calm_config(), &mut rng);
        assert!(state.time.minute >= 0.0 && state.time.minute < 60.0);
        assert!(state.time.hour < 24);
        assert_eq!(state.time.day, u32::MAX);
    }

    #[test]
    fn multi_year_jump_lands_on_the_right_season() {
        let mut state = state_at(1, 0, 0.0);
        let mut rng = SmallRng::seed_from_u64(1);
        // Day 1 to day 121: boundaries at 30, 60, 90 and 120.
        let events = fast_forward(&mut state, 24.0 * 120.0, &calm_config(), &mut rng);
        assert_eq!(state.time.day, 121);
        assert_eq!(state.time.season, Season::Spring);
        assert_eq!(events.season_changed, Some(Season::Spring));
        assert_eq!(state.game_stats.days_survived, 120);

        // Five more boundaries: 150..=270.
        fast_forward(&mut state, 24.0 * 150.0, &calm_config(), &mut rng);
        assert_eq!(state.time.day, 271);
        assert_eq!(state.time.season, Season::Summer);
    }

    #[test]
    fn normalize_time_wraps_out_of_range_fields() {
        let config = calm_config();
        let mut time = GameTime::default();
        assert!(!normalize_time(&mut time, &config));

        let mut edited = GameTime {
            day: 0,
            hour: 30,
            minute: 75.0,
            temperature: f64::NAN,
            ..GameTime::default()
        };
        assert!(normalize_time(&mut edited, &config));
        assert_eq!(edited.day, 1);
        assert_eq!(edited.hour, 6);
        assert!((edited.minute - 15.0).abs() < 1e-9);
        assert!((edited.temperature - 12.0).abs() < 1e-9);
    }

    #[test]
    fn negative_elapsed_is_ignored() {
        let mut state = state_at(1, 8, 30.0);
        let mut rng = SmallRng::seed_from_u64(1);
        advance(&mut state, -50.0, &calm_config(), &mut rng);
        assert!((state.time.minute - 30.0).abs() < 1e-9);
    }
}
