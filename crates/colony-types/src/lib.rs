//! Shared type definitions for the colony simulation engine.
//!
//! This crate is the single source of truth for the data model shared by the
//! world, survivor and core crates. Types defined here flow downstream to
//! `TypeScript` via `ts-rs` for the UI layer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for buildings and survivors
//! - [`enums`] -- Closed enumerations (resources, buildings, jobs, seasons)
//! - [`structs`] -- Entity structs and the [`GameState`] aggregate root
//! - [`views`] -- Read-only projections for the UI and external collaborators
//!
//! [`GameState`]: structs::GameState

pub mod enums;
pub mod ids;
pub mod structs;
pub mod views;

// Re-export all public types at crate root for convenience.
pub use enums::{
    AlertLevel, AttentionPriority, BuildingCategory, BuildingType, Difficulty, ErrorKind, JobType,
    ResourceKind, Season, SkillKind, SurvivorIssue,
};
pub use ids::{BuildingId, SurvivorId};
pub use structs::{
    Building, GameState, GameStats, GameTime, MAX_BODY_TEMPERATURE, MAX_SKILL_LEVEL, MAX_VITAL,
    MIN_BODY_TEMPERATURE, NORMAL_BODY_TEMPERATURE, Position, ResourceAmounts, ResourceStock,
    SaveEnvelope, Skills, Survivor,
};
pub use views::{
    AttentionEntry, BuildOption, ColonySnapshot, ColonySummary, GameOverReport,
    PopulationStatistics, ResourceAlert, ResourceStat, TimeInfo,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the UI collaborator.

    #[test]
    fn export_bindings() {
        // ts-rs writes the bindings to `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::BuildingId::export_all();
        let _ = crate::ids::SurvivorId::export_all();

        let _ = crate::enums::ResourceKind::export_all();
        let _ = crate::enums::BuildingType::export_all();
        let _ = crate::enums::BuildingCategory::export_all();
        let _ = crate::enums::JobType::export_all();
        let _ = crate::enums::SkillKind::export_all();
        let _ = crate::enums::Season::export_all();
        let _ = crate::enums::Difficulty::export_all();
        let _ = crate::enums::AlertLevel::export_all();
        let _ = crate::enums::AttentionPriority::export_all();
        let _ = crate::enums::SurvivorIssue::export_all();
        let _ = crate::enums::ErrorKind::export_all();

        let _ = crate::structs::ResourceStock::export_all();
        let _ = crate::structs::Position::export_all();
        let _ = crate::structs::Building::export_all();
        let _ = crate::structs::Skills::export_all();
        let _ = crate::structs::Survivor::export_all();
        let _ = crate::structs::GameTime::export_all();
        let _ = crate::structs::GameStats::export_all();
        let _ = crate::structs::GameState::export_all();
        let _ = crate::structs::SaveEnvelope::export_all();

        let _ = crate::views::ResourceAlert::export_all();
        let _ = crate::views::ResourceStat::export_all();
        let _ = crate::views::AttentionEntry::export_all();
        let _ = crate::views::PopulationStatistics::export_all();
        let _ = crate::views::TimeInfo::export_all();
        let _ = crate::views::BuildOption::export_all();
        let _ = crate::views::ColonySnapshot::export_all();
        let _ = crate::views::ColonySummary::export_all();
        let _ = crate::views::GameOverReport::export_all();
    }
}
