//! Static building catalog.
//!
//! Hand-maintained data: the production buildings, their work/idle power
//! draw, and per-building recipe modifiers (the Mk. I assembler runs
//! recipes at 0.75x speed, the Mk. III at 1.5x).

use crate::models::StandardRecipe;
use crate::units::power::{Power, WATTS};
use crate::units::si;
use crate::units::time::Time;

/// Per-building adjustment applied to a recipe before planning. Only the
/// production time is mapped today.
pub struct RecipeMod {
    production_time: Option<Box<dyn Fn(Time) -> Time + Send + Sync>>,
}

impl RecipeMod {
    pub fn production_time(map: impl Fn(Time) -> Time + Send + Sync + 'static) -> Self {
        Self {
            production_time: Some(Box::new(map)),
        }
    }

    pub fn apply(&self, recipe: &StandardRecipe) -> StandardRecipe {
        let mut mapped = recipe.clone();
        if let Some(map) = &self.production_time {
            mapped.production_time = map(mapped.production_time.clone());
        }
        mapped
    }
}

pub struct Building {
    pub key: &'static str,
    pub name: &'static str,
    pub work_consumption: Power,
    pub idle_consumption: Power,
    pub recipe_mods: Vec<RecipeMod>,
}

/// Every production building, with power draw as dimensioned scalars
pub fn buildings() -> Vec<Building> {
    vec![
        Building {
            key: "AssemblingMachineMkI",
            name: "Assembling Machine Mk. I",
            work_consumption: si::kilo(&WATTS).of(270.0),
            idle_consumption: si::kilo(&WATTS).of(12.0),
            recipe_mods: vec![RecipeMod::production_time(|pt| pt.scale(1.0 / 0.75))],
        },
        Building {
            key: "AssemblingMachineMkII",
            name: "Assembling Machine Mk. II",
            work_consumption: si::kilo(&WATTS).of(380.0),
            idle_consumption: si::kilo(&WATTS).of(15.0),
            recipe_mods: vec![],
        },
        Building {
            key: "AssemblingMachineMkIII",
            name: "Assembling Machine Mk. III",
            work_consumption: si::kilo(&WATTS).of(780.0),
            idle_consumption: si::kilo(&WATTS).of(18.0),
            recipe_mods: vec![RecipeMod::production_time(|pt| pt.scale(1.0 / 1.5))],
        },
        Building {
            key: "ChemicalPlant",
            name: "Chemical Plant",
            work_consumption: si::kilo(&WATTS).of(720.0),
            idle_consumption: si::kilo(&WATTS).of(24.0),
            recipe_mods: vec![],
        },
        Building {
            key: "EnergyExchanger",
            name: "Energy Exchanger",
            work_consumption: WATTS.of(0.0),
            idle_consumption: WATTS.of(0.0),
            recipe_mods: vec![],
        },
        Building {
            key: "Fractionator",
            name: "Fractionator",
            work_consumption: si::kilo(&WATTS).of(720.0),
            idle_consumption: si::kilo(&WATTS).of(18.0),
            recipe_mods: vec![],
        },
        Building {
            key: "MatrixLab",
            name: "Matrix Lab",
            work_consumption: si::kilo(&WATTS).of(480.0),
            idle_consumption: si::kilo(&WATTS).of(12.0),
            recipe_mods: vec![],
        },
        Building {
            key: "MiniatureParticleCollider",
            name: "Miniature Particle Collider",
            work_consumption: si::mega(&WATTS).of(12.0),
            idle_consumption: si::kilo(&WATTS).of(120.0),
            recipe_mods: vec![],
        },
        Building {
            key: "MiningMachine",
            name: "Mining Machine",
            work_consumption: si::kilo(&WATTS).of(420.0),
            idle_consumption: si::kilo(&WATTS).of(24.0),
            recipe_mods: vec![],
        },
        Building {
            key: "OilExtractor",
            name: "Oil Extractor",
            work_consumption: si::kilo(&WATTS).of(840.0),
            idle_consumption: si::kilo(&WATTS).of(24.0),
            recipe_mods: vec![],
        },
        Building {
            key: "OilRefinery",
            name: "Oil Refinery",
            work_consumption: si::kilo(&WATTS).of(960.0),
            idle_consumption: si::kilo(&WATTS).of(24.0),
            recipe_mods: vec![],
        },
        Building {
            key: "OrbitalCollector",
            name: "Orbital Collector",
            work_consumption: si::mega(&WATTS).of(30.0),
            idle_consumption: WATTS.of(0.0),
            recipe_mods: vec![],
        },
        Building {
            key: "Smelter",
            name: "Smelter",
            work_consumption: si::kilo(&WATTS).of(360.0),
            idle_consumption: si::kilo(&WATTS).of(12.0),
            recipe_mods: vec![],
        },
        Building {
            key: "WaterPump",
            name: "Water Pump",
            work_consumption: si::kilo(&WATTS).of(300.0),
            idle_consumption: si::kilo(&WATTS).of(12.0),
            recipe_mods: vec![],
        },
    ]
}

/// Look up a building by key
pub fn building(key: &str) -> Option<Building> {
    buildings().into_iter().find(|b| b.key == key)
}
