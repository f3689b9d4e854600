//! Error types for the `colony-survivors` crate.

use colony_types::{ErrorKind, SurvivorId};

/// Errors returned by population operations.
#[derive(Debug, thiserror::Error)]
pub enum PopulationError {
    /// The survivor id is not present in the colony.
    #[error("survivor not found: {0}")]
    SurvivorNotFound(SurvivorId),

    /// A heal or feed amount was negative or not a number.
    #[error("invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount.
        amount: f64,
    },
}

impl PopulationError {
    /// Classify this error within the shared taxonomy.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::SurvivorNotFound(_) => ErrorKind::NotFound,
            Self::InvalidAmount { .. } => ErrorKind::InvalidState,
        }
    }
}
