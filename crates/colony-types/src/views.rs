//! Read-only projections consumed by the UI and external collaborators.
//!
//! None of these are stored. They are recomputed from [`GameState`] on
//! demand and never cached across ticks.
//!
//! [`GameState`]: crate::structs::GameState

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{AlertLevel, AttentionPriority, BuildingType, ResourceKind, Season, SurvivorIssue};
use crate::ids::SurvivorId;
use crate::structs::ResourceAmounts;

/// A resource that has fallen below an alert threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ResourceAlert {
    /// The resource.
    pub kind: ResourceKind,
    /// How severe the shortage is.
    pub level: AlertLevel,
    /// Current amount.
    pub amount: f64,
    /// Current capacity.
    pub capacity: f64,
}

/// Per-resource figures for the resource panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ResourceStat {
    /// The resource.
    pub kind: ResourceKind,
    /// Current amount.
    pub amount: f64,
    /// Current capacity.
    pub capacity: f64,
    /// Hourly production.
    pub production: f64,
    /// Hourly consumption.
    pub consumption: f64,
    /// Hourly net change after season and difficulty multipliers.
    pub net_change: f64,
}

/// A survivor that needs attention, with the issues found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct AttentionEntry {
    /// The survivor.
    pub survivor_id: SurvivorId,
    /// Display name.
    pub name: String,
    /// Sum of issue weights.
    pub score: u32,
    /// Derived priority.
    pub priority: AttentionPriority,
    /// Issues found, most severe first.
    pub issues: Vec<SurvivorIssue>,
}

/// Aggregate survivor figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PopulationStatistics {
    /// Number of survivors.
    pub total: u32,
    /// Survivors with a working job.
    pub working: u32,
    /// Idle survivors.
    pub idle: u32,
    /// Resting survivors.
    pub resting: u32,
    /// Sick survivors.
    pub sick: u32,
    /// Injured survivors.
    pub injured: u32,
    /// Mean health (0 when empty).
    pub average_health: f64,
    /// Mean hunger (0 when empty).
    pub average_hunger: f64,
    /// Mean stamina (0 when empty).
    pub average_stamina: f64,
    /// Mean body temperature (0 when empty).
    pub average_temperature: f64,
}

/// Clock figures for the time panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TimeInfo {
    /// Day number.
    pub day: u32,
    /// Hour of day.
    pub hour: u32,
    /// Fractional minute.
    pub minute: f64,
    /// Current season.
    pub season: Season,
    /// Ambient temperature.
    pub temperature: f64,
    /// Whether the sun is up.
    pub is_daytime: bool,
    /// Days left before the next season change.
    pub days_until_season_change: u32,
}

/// A building type the player could place, with its level-1 cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct BuildOption {
    /// The building type.
    pub building_type: BuildingType,
    /// Level-1 cost.
    pub cost: ResourceAmounts,
    /// Level-1 construction hours.
    pub construction_hours: f64,
    /// Whether the ledger covers the cost right now.
    pub affordable: bool,
}

/// Everything the UI polls after each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ColonySnapshot {
    /// Per-resource figures in ledger order.
    pub resources: Vec<ResourceStat>,
    /// Survivor aggregates.
    pub population: PopulationStatistics,
    /// Clock figures.
    pub time: TimeInfo,
    /// Low and critical resources.
    pub resource_alerts: Vec<ResourceAlert>,
    /// Survivors needing attention.
    pub attention: Vec<AttentionEntry>,
    /// Buildable types with affordability.
    pub buildable: Vec<BuildOption>,
    /// Count of placed buildings per type.
    pub building_counts: BTreeMap<BuildingType, u32>,
    /// Buildings still under construction.
    pub under_construction: u32,
    /// Whether the colony has fallen.
    pub game_over: bool,
}

/// Small fixed-shape summary handed to external serializers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ColonySummary {
    /// Days survived.
    pub days_survived: u32,
    /// Living survivors.
    pub survivor_count: u32,
    /// Placed buildings.
    pub building_count: u32,
    /// Stored resources, floored to whole units.
    pub resources: BTreeMap<ResourceKind, u64>,
}

/// Payload of the terminal `game-over` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct GameOverReport {
    /// Days survived.
    pub days_survived: u32,
    /// Survivors ever rescued.
    pub total_survivors_rescued: u32,
    /// Buildings ever constructed.
    pub buildings_constructed: u32,
}
