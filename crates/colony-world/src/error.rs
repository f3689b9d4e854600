//! Error types for the `colony-world` crate.
//!
//! Every fallible construction or catalog operation returns [`WorldError`].
//! The `Display` text is the human-readable reason shown to the player, and
//! [`WorldError::kind`] maps each variant onto the shared [`ErrorKind`]
//! taxonomy.

use colony_types::{BuildingId, BuildingType, ErrorKind, ResourceAmounts, SurvivorId};

/// Errors that can occur during ledger, construction or catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A building id is not present in the colony.
    #[error("building not found: {0}")]
    BuildingNotFound(BuildingId),

    /// A survivor id is not present in the colony.
    #[error("survivor not found: {0}")]
    SurvivorNotFound(SurvivorId),

    /// The building is already being built or upgraded.
    #[error("building {0} is already under construction")]
    AlreadyConstructing(BuildingId),

    /// The building is at the top level of its type.
    #[error("{building_type:?} is already at max level {max_level}")]
    MaxLevelReached {
        /// The building type.
        building_type: BuildingType,
        /// The highest level for that type.
        max_level: u32,
    },

    /// The ledger cannot cover a cost.
    #[error("insufficient resources: short by {shortfall:?}")]
    InsufficientResources {
        /// Missing units per resource kind.
        shortfall: ResourceAmounts,
    },

    /// Workers cannot be managed while the building is not operating.
    #[error("building {0} is under construction")]
    UnderConstruction(BuildingId),

    /// The building has no free worker slot.
    #[error("building {building} is at worker capacity ({capacity})")]
    AtCapacity {
        /// The full building.
        building: BuildingId,
        /// Its worker capacity.
        capacity: u32,
    },

    /// The survivor does not work at the given building.
    #[error("survivor {survivor} is not assigned to building {building}")]
    NotAssigned {
        /// The survivor.
        survivor: SurvivorId,
        /// The building.
        building: BuildingId,
    },

    /// The catalog has no table for a building type or level.
    #[error("no blueprint for {building_type:?} level {level}")]
    MissingBlueprint {
        /// The building type.
        building_type: BuildingType,
        /// The requested level.
        level: u32,
    },

    /// The blueprint data failed validation.
    #[error("invalid blueprint catalog: {reason}")]
    InvalidCatalog {
        /// What is wrong with the data.
        reason: String,
    },

    /// The blueprint data is not valid YAML.
    #[error("failed to parse blueprint catalog: {source}")]
    CatalogParse {
        /// The underlying YAML parse error.
        #[from]
        source: serde_yml::Error,
    },
}

impl WorldError {
    /// Classify this error within the shared taxonomy.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::BuildingNotFound(_) | Self::SurvivorNotFound(_) => ErrorKind::NotFound,
            Self::InsufficientResources { .. } => ErrorKind::InsufficientResources,
            Self::AlreadyConstructing(_)
            | Self::MaxLevelReached { .. }
            | Self::UnderConstruction(_)
            | Self::AtCapacity { .. }
            | Self::NotAssigned { .. }
            | Self::MissingBlueprint { .. }
            | Self::InvalidCatalog { .. }
            | Self::CatalogParse { .. } => ErrorKind::InvalidState,
        }
    }
}
