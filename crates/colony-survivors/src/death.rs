//! Death conditions for survivors.
//!
//! A survivor dies when health reaches 0 at the end of the population step.
//! The proximate cause is inferred from the vitals at that moment: hunger
//! first, then cold, then injury, then sickness.

use std::fmt;

use serde::{Deserialize, Serialize};

use colony_types::{Survivor, SurvivorId};

use crate::vitals::{HYPOTHERMIA_TEMPERATURE, STARVING_HUNGER};

/// The cause of a survivor's death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Health ran out while starving.
    Starvation,
    /// Health ran out while hypothermic.
    Exposure,
    /// Health ran out while injured.
    Injury,
    /// Health ran out while sick.
    Illness,
    /// Health ran out for any other reason.
    Exhaustion,
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Starvation => write!(f, "starvation"),
            Self::Exposure => write!(f, "exposure"),
            Self::Injury => write!(f, "injury"),
            Self::Illness => write!(f, "illness"),
            Self::Exhaustion => write!(f, "exhaustion"),
        }
    }
}

/// A survivor removed from the colony because they died.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Death {
    /// Who died.
    pub survivor_id: SurvivorId,
    /// Their name.
    pub name: String,
    /// Why.
    pub cause: DeathCause,
}

/// Check whether a survivor meets the death condition.
///
/// Returns `Some(cause)` if health is at 0, `None` otherwise. Does not
/// mutate anything.
pub fn check_death(survivor: &Survivor) -> Option<DeathCause> {
    if survivor.health > 0.0 {
        return None;
    }
    let cause = if survivor.hunger < STARVING_HUNGER {
        DeathCause::Starvation
    } else if survivor.temperature < HYPOTHERMIA_TEMPERATURE {
        DeathCause::Exposure
    } else if survivor.is_injured {
        DeathCause::Injury
    } else if survivor.is_sick {
        DeathCause::Illness
    } else {
        DeathCause::Exhaustion
    };
    Some(cause)
}
