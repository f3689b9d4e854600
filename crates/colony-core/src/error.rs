//! Error type for player operations routed through the orchestrator.

use colony_survivors::PopulationError;
use colony_types::ErrorKind;
use colony_world::WorldError;

/// Errors returned by [`Colony`](crate::colony::Colony) operations.
#[derive(Debug, thiserror::Error)]
pub enum ColonyError {
    /// A ledger, construction or catalog operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A population operation failed.
    #[error("population error: {source}")]
    Population {
        /// The underlying population error.
        #[from]
        source: PopulationError,
    },

    /// The colony has fallen; start a new game or load a save first.
    #[error("the game is over")]
    GameOver,
}

impl ColonyError {
    /// Classify this error within the shared taxonomy.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::World { source } => source.kind(),
            Self::Population { source } => source.kind(),
            Self::GameOver => ErrorKind::InvalidState,
        }
    }
}

#[cfg(test)]
mod tests {
    use colony_types::SurvivorId;

    use super::*;

    #[test]
    fn kind_is_forwarded_from_source() {
        let err = ColonyError::from(PopulationError::SurvivorNotFound(SurvivorId::new()));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(ColonyError::GameOver.kind(), ErrorKind::InvalidState);
    }
}
