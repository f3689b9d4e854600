//! Building blueprint tables: cost, production, consumption, construction
//! time, worker capacity and storage bonus for every level of every type.
//!
//! The tables are data, not code. The built-in catalog is read from
//! `data/buildings.yaml` (embedded at compile time) and validated on load:
//! every [`BuildingType`] must be present and must define exactly
//! `max_level` levels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use colony_types::{BuildingType, ResourceAmounts};

use crate::error::WorldError;

/// The blueprint data shipped with the engine.
const BUILTIN_BLUEPRINTS: &str = include_str!("../data/buildings.yaml");

/// Numbers for one level of one building type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    /// Resources paid to build (or upgrade to) this level.
    #[serde(default)]
    pub cost: ResourceAmounts,
    /// Hourly production while operating.
    #[serde(default)]
    pub production: ResourceAmounts,
    /// Hourly consumption while operating.
    #[serde(default)]
    pub consumption: ResourceAmounts,
    /// In-game hours needed to finish this level.
    pub construction_hours: f64,
    /// Worker slots at this level.
    pub worker_capacity: u32,
    /// Capacity added to the ledger once this level is complete.
    #[serde(default)]
    pub storage_bonus: ResourceAmounts,
}

/// All levels of one building type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingBlueprint {
    /// Highest reachable level.
    pub max_level: u32,
    /// Level tables, index 0 is level 1.
    pub levels: Vec<LevelSpec>,
}

/// Blueprints for every building type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintCatalog {
    /// Blueprint per building type.
    buildings: BTreeMap<BuildingType, BuildingBlueprint>,
}

impl BlueprintCatalog {
    /// Load the catalog embedded in the crate.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CatalogParse`] or [`WorldError::InvalidCatalog`]
    /// if the embedded data is broken.
    pub fn builtin() -> Result<Self, WorldError> {
        Self::parse(BUILTIN_BLUEPRINTS)
    }

    /// Parse and validate a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CatalogParse`] if the YAML is malformed, or
    /// [`WorldError::InvalidCatalog`] if a type is missing or a level table
    /// is inconsistent.
    pub fn parse(yaml: &str) -> Result<Self, WorldError> {
        let catalog: Self = serde_yml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), WorldError> {
        for building_type in BuildingType::ALL {
            let Some(blueprint) = self.buildings.get(&building_type) else {
                return Err(WorldError::InvalidCatalog {
                    reason: format!("missing blueprint for {building_type:?}"),
                });
            };
            if blueprint.max_level == 0 {
                return Err(WorldError::InvalidCatalog {
                    reason: format!("{building_type:?} has max_level 0"),
                });
            }
            let level_count = u32::try_from(blueprint.levels.len()).unwrap_or(u32::MAX);
            if level_count != blueprint.max_level {
                return Err(WorldError::InvalidCatalog {
                    reason: format!(
                        "{building_type:?} declares max_level {} but defines {level_count} levels",
                        blueprint.max_level
                    ),
                });
            }
            for (index, spec) in blueprint.levels.iter().enumerate() {
                let negative = spec.construction_hours < 0.0
                    || [&spec.cost, &spec.production, &spec.consumption, &spec.storage_bonus]
                        .iter()
                        .any(|table| table.values().any(|v| *v < 0.0));
                if negative {
                    return Err(WorldError::InvalidCatalog {
                        reason: format!(
                            "{building_type:?} level {} has a negative value",
                            index.saturating_add(1)
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    /// Return the blueprint for a building type.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::MissingBlueprint`] if the type is absent.
    pub fn blueprint(&self, building_type: BuildingType) -> Result<&BuildingBlueprint, WorldError> {
        self.buildings
            .get(&building_type)
            .ok_or(WorldError::MissingBlueprint {
                building_type,
                level: 1,
            })
    }

    /// Return the table for one level (1-based) of a building type.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::MissingBlueprint`] if the type or level does
    /// not exist.
    pub fn level(&self, building_type: BuildingType, level: u32) -> Result<&LevelSpec, WorldError> {
        let missing = WorldError::MissingBlueprint {
            building_type,
            level,
        };
        let Some(index) = level.checked_sub(1) else {
            return Err(missing);
        };
        let index = usize::try_from(index).map_err(|_err| WorldError::MissingBlueprint {
            building_type,
            level,
        })?;
        self.blueprint(building_type)?
            .levels
            .get(index)
            .ok_or(missing)
    }

    /// Highest level of a building type (1 if the type is missing).
    pub fn max_level(&self, building_type: BuildingType) -> u32 {
        self.buildings
            .get(&building_type)
            .map_or(1, |blueprint| blueprint.max_level)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use colony_types::ResourceKind;

    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = BlueprintCatalog::builtin().unwrap();
        for building_type in BuildingType::ALL {
            let max = catalog.max_level(building_type);
            assert!(max >= 1);
            assert!(catalog.level(building_type, max).is_ok());
            assert!(catalog.level(building_type, max.saturating_add(1)).is_err());
        }
    }

    #[test]
    fn farm_level_one_costs_wood_and_steel() {
        let catalog = BlueprintCatalog::builtin().unwrap();
        let farm = catalog.level(BuildingType::Farm, 1).unwrap();
        assert_eq!(farm.cost.get(&ResourceKind::Wood).copied(), Some(200.0));
        assert_eq!(farm.cost.get(&ResourceKind::Steel).copied(), Some(30.0));
        assert!(farm.production.contains_key(&ResourceKind::Food));
    }

    #[test]
    fn shelter_level_one_costs_only_wood() {
        let catalog = BlueprintCatalog::builtin().unwrap();
        let shelter = catalog.level(BuildingType::Shelter, 1).unwrap();
        assert_eq!(shelter.cost.len(), 1);
        assert_eq!(shelter.cost.get(&ResourceKind::Wood).copied(), Some(100.0));
    }

    #[test]
    fn level_zero_is_missing() {
        let catalog = BlueprintCatalog::builtin().unwrap();
        let result = catalog.level(BuildingType::Farm, 0);
        assert!(matches!(result, Err(WorldError::MissingBlueprint { .. })));
    }

    #[test]
    fn incomplete_catalog_is_rejected() {
        let yaml = "buildings:\n  shelter:\n    max_level: 1\n    levels:\n      - construction_hours: 1\n        worker_capacity: 1\n";
        let result = BlueprintCatalog::parse(yaml);
        assert!(matches!(result, Err(WorldError::InvalidCatalog { .. })));
    }

    #[test]
    fn mismatched_level_count_is_rejected() {
        let mut catalog = BlueprintCatalog::builtin().unwrap();
        if let Some(blueprint) = catalog.buildings.get_mut(&BuildingType::Farm) {
            blueprint.levels.pop();
        }
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let result = BlueprintCatalog::parse("buildings: [");
        assert!(matches!(result, Err(WorldError::CatalogParse { .. })));
    }
}
