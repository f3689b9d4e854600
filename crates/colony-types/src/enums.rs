//! Enumeration types for the colony simulation.
//!
//! Every set here is closed: resource kinds, building types, job types,
//! seasons and difficulty tiers never grow at runtime, so the engine can
//! match on them exhaustively.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// One of the five tradeable commodities stored by the colony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ResourceKind {
    /// Eaten by survivors every hour.
    Food,
    /// Primary construction material.
    Wood,
    /// Advanced construction material.
    Steel,
    /// Powers mills, labs and upgraded shelters.
    Electricity,
    /// Burned for heat in winter and by generators.
    Fuel,
}

impl ResourceKind {
    /// All resource kinds in ledger order.
    pub const ALL: [Self; 5] = [
        Self::Food,
        Self::Wood,
        Self::Steel,
        Self::Electricity,
        Self::Fuel,
    ];
}

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

/// The functional category of a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum BuildingCategory {
    /// Houses survivors and insulates them from the cold.
    Housing,
    /// Raises resource capacity.
    Storage,
    /// Produces a resource every hour while operating.
    Production,
    /// Supports the colony without producing resources.
    Utility,
    /// Hosts research work.
    Research,
}

/// A type of building that can be placed in the colony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum BuildingType {
    /// Living quarters; level 2+ halves temperature drift, level 3+ insulates.
    Shelter,
    /// Storage depot raising every resource capacity.
    Warehouse,
    /// Grows food.
    Farm,
    /// Cuts wood.
    LumberMill,
    /// Smelts steel.
    SteelMill,
    /// Generates electricity by burning fuel.
    PowerPlant,
    /// Refines fuel from wood.
    FuelRefinery,
    /// Treatment ward for sick and injured survivors.
    MedicalBay,
    /// Research station.
    ResearchLab,
}

impl BuildingType {
    /// All building types in catalog order.
    pub const ALL: [Self; 9] = [
        Self::Shelter,
        Self::Warehouse,
        Self::Farm,
        Self::LumberMill,
        Self::SteelMill,
        Self::PowerPlant,
        Self::FuelRefinery,
        Self::MedicalBay,
        Self::ResearchLab,
    ];

    /// Return the functional category of this building type.
    pub const fn category(self) -> BuildingCategory {
        match self {
            Self::Shelter => BuildingCategory::Housing,
            Self::Warehouse => BuildingCategory::Storage,
            Self::Farm
            | Self::LumberMill
            | Self::SteelMill
            | Self::PowerPlant
            | Self::FuelRefinery => BuildingCategory::Production,
            Self::MedicalBay => BuildingCategory::Utility,
            Self::ResearchLab => BuildingCategory::Research,
        }
    }

    /// Return the job a survivor takes when assigned to this building.
    ///
    /// Production buildings map to gathering, housing/storage/utility map to
    /// construction and the research lab maps to research.
    pub const fn job_type(self) -> JobType {
        match self.category() {
            BuildingCategory::Production => JobType::Gathering,
            BuildingCategory::Housing | BuildingCategory::Storage | BuildingCategory::Utility => {
                JobType::Construction
            }
            BuildingCategory::Research => JobType::Research,
        }
    }
}

// ---------------------------------------------------------------------------
// Survivors
// ---------------------------------------------------------------------------

/// What a survivor is currently doing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum JobType {
    /// Not assigned to anything.
    #[default]
    Idle,
    /// Working a production building.
    Gathering,
    /// Working housing, storage or utility buildings.
    Construction,
    /// Working the research lab.
    Research,
    /// Recovering stamina.
    Resting,
}

impl JobType {
    /// Whether this job counts as active work (hunger x1.5, stamina drain).
    pub const fn is_working(self) -> bool {
        matches!(self, Self::Gathering | Self::Construction | Self::Research)
    }

    /// Whether this job is performed outdoors (winter cold penalty).
    pub const fn is_outdoor(self) -> bool {
        matches!(self, Self::Gathering | Self::Construction)
    }

    /// The base skill trained by this job, if any.
    pub const fn trained_skill(self) -> Option<SkillKind> {
        match self {
            Self::Gathering => Some(SkillKind::Gathering),
            Self::Construction => Some(SkillKind::Construction),
            Self::Research => Some(SkillKind::Research),
            Self::Idle | Self::Resting => None,
        }
    }
}

/// A base skill discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SkillKind {
    /// Harvesting and production work.
    Gathering,
    /// Building and maintenance work.
    Construction,
    /// Laboratory work.
    Research,
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// A season in the colony's annual cycle.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Season {
    /// Mild weather, food bonus.
    #[default]
    Spring,
    /// Warmest season.
    Summer,
    /// Cooling down, food penalty.
    Autumn,
    /// Cold: extra hunger, fuel burn and sickness.
    Winter,
}

impl Season {
    /// All seasons in cycle order.
    pub const ALL: [Self; 4] = [Self::Spring, Self::Summer, Self::Autumn, Self::Winter];

    /// Return the season that follows this one.
    pub const fn next(self) -> Self {
        match self {
            Self::Spring => Self::Summer,
            Self::Summer => Self::Autumn,
            Self::Autumn => Self::Winter,
            Self::Winter => Self::Spring,
        }
    }
}

/// Global difficulty tier selecting balance multipliers.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Difficulty {
    /// Generous production and recovery.
    Easy,
    /// Baseline balance.
    #[default]
    Normal,
    /// Reduced production and recovery.
    Hard,
}

// ---------------------------------------------------------------------------
// Alerts and attention
// ---------------------------------------------------------------------------

/// Severity of a low-resource alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AlertLevel {
    /// Below 20% of capacity.
    Low,
    /// Below 5% of capacity.
    Critical,
}

/// Priority of a survivor on the attention list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AttentionPriority {
    /// Score of at least 1.
    Medium,
    /// Score of at least 3.
    High,
}

/// A single issue flagged on a survivor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SurvivorIssue {
    /// Health below 30.
    CriticalHealth,
    /// Health below 50.
    LowHealth,
    /// Hunger below 20.
    Starving,
    /// Hunger below 50.
    Hungry,
    /// Body temperature below 35.
    Hypothermia,
    /// Body temperature below 36.
    Cold,
    /// Currently sick.
    Sick,
    /// Currently injured.
    Injured,
}

impl SurvivorIssue {
    /// Severity weight contributed to the attention score.
    pub const fn weight(self) -> u32 {
        match self {
            Self::CriticalHealth | Self::Starving | Self::Hypothermia => 3,
            Self::LowHealth | Self::Cold | Self::Sick | Self::Injured => 2,
            Self::Hungry => 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Coarse classification shared by every domain error.
///
/// UI layers branch on this instead of on crate-specific error variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ErrorKind {
    /// Unknown building or survivor id.
    NotFound,
    /// Operation not valid in the entity's current state.
    InvalidState,
    /// Cost exceeds the current ledger.
    InsufficientResources,
    /// A hard cap would be exceeded (clamped, never raised by the engine).
    CapacityExceeded,
    /// Save or load failed.
    PersistenceFailure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_mapping_follows_category() {
        assert_eq!(BuildingType::Farm.job_type(), JobType::Gathering);
        assert_eq!(BuildingType::PowerPlant.job_type(), JobType::Gathering);
        assert_eq!(BuildingType::Shelter.job_type(), JobType::Construction);
        assert_eq!(BuildingType::Warehouse.job_type(), JobType::Construction);
        assert_eq!(BuildingType::MedicalBay.job_type(), JobType::Construction);
        assert_eq!(BuildingType::ResearchLab.job_type(), JobType::Research);
    }

    #[test]
    fn season_cycle_wraps() {
        let mut season = Season::Spring;
        for _ in 0..4 {
            season = season.next();
        }
        assert_eq!(season, Season::Spring);
        assert_eq!(Season::Autumn.next(), Season::Winter);
    }

    #[test]
    fn working_jobs() {
        assert!(JobType::Research.is_working());
        assert!(!JobType::Research.is_outdoor());
        assert!(!JobType::Resting.is_working());
        assert!(!JobType::Idle.is_working());
        assert_eq!(JobType::Idle.trained_skill(), None);
    }

    #[test]
    fn resource_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ResourceKind::Electricity).unwrap_or_default();
        assert_eq!(json, "\"electricity\"");
        let back: Result<BuildingType, _> = serde_json::from_str("\"lumber_mill\"");
        assert_eq!(back.ok(), Some(BuildingType::LumberMill));
    }
}
