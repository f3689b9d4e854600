//! Core entity structs for the colony simulation.
//!
//! [`GameState`] is the aggregate root. It owns the resource ledger, the
//! building and survivor collections, the clock state and the lifetime
//! counters. Survivors point at buildings only through [`BuildingId`]
//! back-references, never by ownership.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{BuildingType, Difficulty, JobType, ResourceKind, Season, SkillKind};
use crate::ids::{BuildingId, SurvivorId};

/// Quantities keyed by resource kind (costs, hourly rates, refunds).
pub type ResourceAmounts = BTreeMap<ResourceKind, f64>;

/// Minimum body temperature a survivor can reach.
pub const MIN_BODY_TEMPERATURE: f64 = 34.0;

/// Maximum body temperature a survivor can reach.
pub const MAX_BODY_TEMPERATURE: f64 = 40.0;

/// Normal body temperature assigned to new survivors.
pub const NORMAL_BODY_TEMPERATURE: f64 = 37.0;

/// Upper bound of the health, hunger and stamina vitals.
pub const MAX_VITAL: f64 = 100.0;

/// Upper bound of a base skill level.
pub const MAX_SKILL_LEVEL: u8 = 10;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Stored amount of one resource kind plus its last computed hourly rates.
///
/// Invariant: `0 <= amount <= capacity`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ResourceStock {
    /// Units currently stored.
    pub amount: f64,
    /// Maximum units that can be stored.
    pub capacity: f64,
    /// Hourly production at the last settle.
    pub production_rate: f64,
    /// Hourly consumption at the last settle.
    pub consumption_rate: f64,
}

impl ResourceStock {
    /// Create a stock with the given amount and capacity and zero rates.
    ///
    /// The amount is clamped into `[0, capacity]`.
    pub fn new(amount: f64, capacity: f64) -> Self {
        let capacity = capacity.max(0.0);
        Self {
            amount: amount.clamp(0.0, capacity),
            capacity,
            production_rate: 0.0,
            consumption_rate: 0.0,
        }
    }

    /// Re-establish `0 <= amount <= capacity`. NaN counts as empty.
    pub fn clamp(&mut self) {
        if self.capacity.is_nan() || self.capacity < 0.0 {
            self.capacity = 0.0;
        }
        if self.amount.is_nan() {
            self.amount = 0.0;
        }
        self.amount = self.amount.clamp(0.0, self.capacity);
    }

    /// Fraction of capacity currently filled (0 when capacity is 0).
    pub fn fill_ratio(&self) -> f64 {
        if self.capacity <= 0.0 {
            0.0
        } else {
            self.amount / self.capacity
        }
    }
}

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

/// Grid position of a building.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Horizontal grid coordinate.
    pub x: i32,
    /// Vertical grid coordinate.
    pub y: i32,
}

/// A building placed in the colony.
///
/// Cost, production and consumption are snapshots of the level table taken
/// when the building was created or last upgraded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Building {
    /// Unique identifier.
    pub id: BuildingId,
    /// What kind of building this is.
    #[serde(rename = "type")]
    pub building_type: BuildingType,
    /// Current level (1..=max level of the type).
    pub level: u32,
    /// Where the building stands.
    pub position: Position,
    /// Hours of construction remaining (0 when complete).
    pub construction_time: f64,
    /// Whether the building is being built or upgraded.
    pub is_constructing: bool,
    /// Maximum number of assigned workers.
    pub worker_capacity: u32,
    /// Number of survivors currently assigned.
    pub assigned_workers: u32,
    /// Cost paid for the current level.
    pub resource_cost: ResourceAmounts,
    /// Hourly production at the current level.
    pub resource_production: ResourceAmounts,
    /// Hourly consumption at the current level.
    pub resource_consumption: ResourceAmounts,
}

impl Building {
    /// Whether the building is complete and able to operate.
    pub const fn is_operating(&self) -> bool {
        !self.is_constructing
    }

    /// Whether another worker can be assigned.
    pub const fn has_free_slot(&self) -> bool {
        self.assigned_workers < self.worker_capacity
    }
}

// ---------------------------------------------------------------------------
// Survivors
// ---------------------------------------------------------------------------

/// Skill levels of a survivor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Skills {
    /// Base gathering skill (1..=10).
    pub gathering: u8,
    /// Base construction skill (1..=10).
    pub construction: u8,
    /// Base research skill (1..=10).
    pub research: u8,
    /// Optional professional skills, keyed by free-form name.
    #[serde(default)]
    pub professional: BTreeMap<String, u8>,
}

impl Default for Skills {
    fn default() -> Self {
        Self {
            gathering: 1,
            construction: 1,
            research: 1,
            professional: BTreeMap::new(),
        }
    }
}

impl Skills {
    /// Return the level of a base skill.
    pub const fn level(&self, kind: SkillKind) -> u8 {
        match kind {
            SkillKind::Gathering => self.gathering,
            SkillKind::Construction => self.construction,
            SkillKind::Research => self.research,
        }
    }

    /// Raise a base skill by one level, capped at [`MAX_SKILL_LEVEL`].
    ///
    /// Returns `true` if the level changed.
    pub fn improve(&mut self, kind: SkillKind) -> bool {
        let slot = match kind {
            SkillKind::Gathering => &mut self.gathering,
            SkillKind::Construction => &mut self.construction,
            SkillKind::Research => &mut self.research,
        };
        if *slot >= MAX_SKILL_LEVEL {
            return false;
        }
        *slot = slot.saturating_add(1).min(MAX_SKILL_LEVEL);
        true
    }
}

/// A survivor living in the colony.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Survivor {
    /// Unique identifier.
    pub id: SurvivorId,
    /// Display name.
    pub name: String,
    /// Health in `[0, 100]`.
    pub health: f64,
    /// Satiation in `[0, 100]` (100 = fully fed).
    pub hunger: f64,
    /// Stamina in `[0, 100]`.
    pub stamina: f64,
    /// Body temperature in `[34, 40]`.
    pub temperature: f64,
    /// Skill levels.
    pub skills: Skills,
    /// Building the survivor works at, if any.
    pub assigned_building_id: Option<BuildingId>,
    /// Current activity.
    pub job_type: JobType,
    /// Whether the survivor is sick.
    pub is_sick: bool,
    /// Whether the survivor is injured.
    pub is_injured: bool,
}

impl Survivor {
    /// Create an idle survivor at full vitals.
    pub fn new(name: String, skills: Skills) -> Self {
        Self {
            id: SurvivorId::new(),
            name,
            health: MAX_VITAL,
            hunger: MAX_VITAL,
            stamina: MAX_VITAL,
            temperature: NORMAL_BODY_TEMPERATURE,
            skills,
            assigned_building_id: None,
            job_type: JobType::Idle,
            is_sick: false,
            is_injured: false,
        }
    }

    /// Whether the survivor is sick or injured.
    pub const fn is_unwell(&self) -> bool {
        self.is_sick || self.is_injured
    }

    /// Clear the building assignment and return to idle.
    pub const fn release(&mut self) {
        self.assigned_building_id = None;
        self.job_type = JobType::Idle;
    }
}

// ---------------------------------------------------------------------------
// Time and statistics
// ---------------------------------------------------------------------------

/// In-game calendar and ambient temperature.
///
/// Invariants: `0 <= minute < 60`, `hour < 24`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameTime {
    /// Day number, starting at 1.
    pub day: u32,
    /// Hour of the day (0..24).
    pub hour: u32,
    /// Fractional minute of the hour (0..60).
    pub minute: f64,
    /// Current season.
    pub season: Season,
    /// Ambient temperature in degrees.
    pub temperature: f64,
}

impl Default for GameTime {
    fn default() -> Self {
        Self {
            day: 1,
            hour: 8,
            minute: 0.0,
            season: Season::Spring,
            temperature: 12.0,
        }
    }
}

impl GameTime {
    /// Total whole in-game minutes elapsed since day 1, 00:00.
    pub fn total_minutes(&self) -> u64 {
        let days = u64::from(self.day.saturating_sub(1));
        let hours = days.saturating_mul(24).saturating_add(u64::from(self.hour));
        // minute is within [0, 60) by invariant
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let whole_minute = self.minute.floor().clamp(0.0, 59.0) as u64;
        hours.saturating_mul(60).saturating_add(whole_minute)
    }
}

/// Lifetime counters. They only ever increase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct GameStats {
    /// Day rollovers survived.
    pub days_survived: u32,
    /// Survivors ever added to the colony.
    pub total_survivors_rescued: u32,
    /// Resource units ever produced.
    pub total_resources_collected: f64,
    /// Buildings ever placed.
    pub buildings_constructed: u32,
}

// ---------------------------------------------------------------------------
// Aggregate root
// ---------------------------------------------------------------------------

/// The complete mutable state of one colony.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct GameState {
    /// Stored resources keyed by kind.
    pub resources: BTreeMap<ResourceKind, ResourceStock>,
    /// Buildings in placement order.
    pub buildings: Vec<Building>,
    /// Survivors in arrival order.
    pub survivors: Vec<Survivor>,
    /// Clock state.
    pub time: GameTime,
    /// Lifetime counters.
    pub game_stats: GameStats,
    /// Difficulty tier.
    pub difficulty: Difficulty,
}

impl GameState {
    /// Current stored amount of a resource (0 if the kind is missing).
    pub fn amount(&self, kind: ResourceKind) -> f64 {
        self.resources.get(&kind).map_or(0.0, |stock| stock.amount)
    }

    /// Look up a building by id.
    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    /// Look up a building by id, mutably.
    pub fn building_mut(&mut self, id: BuildingId) -> Option<&mut Building> {
        self.buildings.iter_mut().find(|b| b.id == id)
    }

    /// Look up a survivor by id.
    pub fn survivor(&self, id: SurvivorId) -> Option<&Survivor> {
        self.survivors.iter().find(|s| s.id == id)
    }

    /// Look up a survivor by id, mutably.
    pub fn survivor_mut(&mut self, id: SurvivorId) -> Option<&mut Survivor> {
        self.survivors.iter_mut().find(|s| s.id == id)
    }

    /// Number of living survivors.
    pub fn population(&self) -> usize {
        self.survivors.len()
    }
}

/// Versioned persistence envelope around a [`GameState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SaveEnvelope {
    /// The saved colony.
    pub state: GameState,
    /// Milliseconds since the Unix epoch when the save was written.
    pub timestamp: i64,
    /// Save format version.
    pub version: String,
}
