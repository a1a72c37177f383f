//! Data models for parsed and named recipes.

use std::collections::{BTreeMap, BTreeSet};

use crate::units::time::Time;

/// Absolute tolerance for comparing component amounts.
pub const AMOUNT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone)]
pub struct RecipeComponent {
    pub component: String,
    pub amount: f64,
}

/// A parsed production rule, not yet named. Amounts are positive on both
/// sides; production time is seconds, with `NaN` meaning a variable rate.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub inputs: Vec<RecipeComponent>,
    pub outputs: Vec<RecipeComponent>,
    pub production_time: f64,
    pub buildings: Vec<String>,
    pub technologies: Vec<String>,
}

impl Recipe {
    /// Canonical form: inputs and outputs sorted by component, buildings
    /// and technologies sorted by name. [`Recipe::equals`] compares
    /// positionally and relies on these sorts.
    pub fn new(
        mut inputs: Vec<RecipeComponent>,
        mut outputs: Vec<RecipeComponent>,
        production_time: f64,
        mut buildings: Vec<String>,
        mut technologies: Vec<String>,
    ) -> Self {
        inputs.sort_by(|a, b| a.component.cmp(&b.component));
        outputs.sort_by(|a, b| a.component.cmp(&b.component));
        buildings.sort();
        technologies.sort();
        Self {
            inputs,
            outputs,
            production_time,
            buildings,
            technologies,
        }
    }

    /// Semantic recipe equality: identical production time, technologies,
    /// inputs, and outputs. Building sets are excluded, so the same recipe
    /// running in a different machine keeps its name.
    pub fn equals(&self, other: &Recipe) -> bool {
        // Exact compare on purpose: NaN times never match.
        self.production_time == other.production_time
            && self.technologies == other.technologies
            && components_eq(&self.inputs, &other.inputs)
            && components_eq(&self.outputs, &other.outputs)
    }
}

fn components_eq(a: &[RecipeComponent], b: &[RecipeComponent]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| x.component == y.component && (x.amount - y.amount).abs() < AMOUNT_TOLERANCE)
}

/// A recipe with its assigned name and key, unique within one run.
#[derive(Debug, Clone)]
pub struct NamedRecipe {
    pub key: String,
    pub name: String,
    pub recipe: Recipe,
}

/// The downstream-facing recipe shape: one signed component map (inputs
/// negative, outputs positive, zero amounts dropped) and a dimensioned
/// production time.
#[derive(Debug, Clone)]
pub struct StandardRecipe {
    pub key: String,
    pub name: String,
    pub buildings: BTreeSet<String>,
    pub prerequisites: BTreeSet<String>,
    pub components: BTreeMap<String, f64>,
    pub production_time: Time,
}

impl StandardRecipe {
    pub fn from_named(named: &NamedRecipe) -> Self {
        let mut components = BTreeMap::new();
        for input in &named.recipe.inputs {
            if input.amount != 0.0 {
                components.insert(input.component.clone(), -input.amount);
            }
        }
        for output in &named.recipe.outputs {
            if output.amount != 0.0 {
                components.insert(output.component.clone(), output.amount);
            }
        }
        Self {
            key: named.key.clone(),
            name: named.name.clone(),
            buildings: named.recipe.buildings.iter().cloned().collect(),
            prerequisites: named.recipe.technologies.iter().cloned().collect(),
            components,
            production_time: Time::of_seconds(named.recipe.production_time),
        }
    }

    pub fn inputs(&self) -> BTreeSet<&str> {
        self.components
            .iter()
            .filter(|(_, amount)| **amount < 0.0)
            .map(|(component, _)| component.as_str())
            .collect()
    }

    pub fn outputs(&self) -> BTreeSet<&str> {
        self.components
            .iter()
            .filter(|(_, amount)| **amount > 0.0)
            .map(|(component, _)| component.as_str())
            .collect()
    }
}
