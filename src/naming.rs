//! Stable, collision-free naming for parsed recipes.
//!
//! Scraped recipe records carry no names of their own. The namer derives a
//! human-readable name (and a key) for each recipe, reuses the existing
//! entry whenever an equal recipe was already named, and disambiguates
//! genuine collisions with a distinguishing technology, building, or input.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::models::{NamedRecipe, Recipe};

const FALLBACK_NAME: &str = "Production Recipe";

/// Hard cap on the version-suffix search. Hitting it means the name map
/// itself is corrupt; realistic runs stay in the low hundreds of recipes.
const MAX_NAME_VERSIONS: usize = 10_000;

/// Assigns names and keys to recipes, one namer per ingest run. Owns the
/// accumulated name map; recipes must be fed sequentially, in a stable
/// order, for name assignment to be reproducible across runs.
#[derive(Default)]
pub struct RecipeNamer {
    assigned: HashMap<String, Rc<NamedRecipe>>,
}

impl RecipeNamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// All recipes named so far.
    pub fn assigned(&self) -> impl Iterator<Item = &Rc<NamedRecipe>> {
        self.assigned.values()
    }

    /// Name a recipe, or return the already-named entry if an equal recipe
    /// was seen before. At most one name exists per distinct recipe.
    ///
    /// The name is chosen in stages: a base name (sole output component,
    /// else sole prerequisite technology, else a generic fallback), a
    /// refined name carrying a discriminator when the base name is taken by
    /// a different recipe, and finally a `"; Version {n}"` suffix until the
    /// name is free.
    pub fn name_or_reuse(&mut self, recipe: Recipe) -> Rc<NamedRecipe> {
        let base_name = if recipe.outputs.len() == 1 {
            recipe.outputs[0].component.clone()
        } else if recipe.technologies.len() == 1 {
            recipe.technologies[0].clone()
        } else {
            FALLBACK_NAME.to_string()
        };

        if let Some(existing) = self.assigned.get(&base_name) {
            if existing.recipe.equals(&recipe) {
                return Rc::clone(existing);
            }
        }

        let mut refined_name = base_name.clone();
        if let Some(colliding) = self.assigned.get(&base_name) {
            if !recipe.buildings.is_empty() {
                if let Some(discriminator) = find_discriminator(&recipe, &colliding.recipe) {
                    refined_name = format!("{base_name} ({discriminator})");
                }
            }
        }

        if let Some(existing) = self.assigned.get(&refined_name) {
            if existing.recipe.equals(&recipe) {
                return Rc::clone(existing);
            }
        }

        let mut final_name = refined_name.clone();
        let mut version = 2;
        while self.assigned.contains_key(&final_name) {
            final_name = format!("{refined_name}; Version {version}");
            version += 1;
            if version > MAX_NAME_VERSIONS {
                panic!("no unused name under {refined_name:?} after {MAX_NAME_VERSIONS} versions");
            }
        }

        let named = Rc::new(NamedRecipe {
            key: name_to_key(&final_name),
            name: final_name.clone(),
            recipe,
        });
        self.assigned.insert(final_name, Rc::clone(&named));
        named
    }
}

/// First stage that distinguishes the candidate from the colliding recipe:
/// a technology the colliding recipe lacks, else such a building, else the
/// smallest such input component. Stops at the first non-empty stage.
fn find_discriminator(candidate: &Recipe, colliding: &Recipe) -> Option<String> {
    if let Some(technology) = first_missing(&candidate.technologies, &colliding.technologies) {
        return Some(technology.to_string());
    }
    if let Some(building) = first_missing(&candidate.buildings, &colliding.buildings) {
        return Some(building.to_string());
    }

    let colliding_inputs: HashSet<&str> = colliding
        .inputs
        .iter()
        .map(|c| c.component.as_str())
        .collect();
    let mut new_inputs: Vec<&str> = candidate
        .inputs
        .iter()
        .map(|c| c.component.as_str())
        .filter(|component| !colliding_inputs.contains(component))
        .collect();
    new_inputs.sort_unstable();
    new_inputs.first().map(|component| component.to_string())
}

fn first_missing<'a>(candidate: &'a [String], existing: &[String]) -> Option<&'a str> {
    let existing: HashSet<&str> = existing.iter().map(String::as_str).collect();
    candidate
        .iter()
        .map(String::as_str)
        .find(|item| !existing.contains(item))
}

/// Key for a name: every character that is not an ASCII letter or digit is
/// dropped.
pub fn name_to_key(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecipeComponent;

    fn component(component: &str, amount: f64) -> RecipeComponent {
        RecipeComponent {
            component: component.to_string(),
            amount,
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn gear(time: f64, buildings: &[&str]) -> Recipe {
        Recipe::new(
            vec![component("IronIngot", 1.0)],
            vec![component("Gear", 1.0)],
            time,
            strings(buildings),
            vec![],
        )
    }

    #[test]
    fn single_output_names_after_the_component() {
        let mut namer = RecipeNamer::new();
        let named = namer.name_or_reuse(gear(1.0, &["AssemblingMachineMkI"]));
        assert_eq!(named.name, "Gear");
        assert_eq!(named.key, "Gear");
    }

    #[test]
    fn single_technology_names_after_the_technology() {
        let mut namer = RecipeNamer::new();
        let named = namer.name_or_reuse(Recipe::new(
            vec![component("CrudeOil", 2.0)],
            vec![component("RefinedOil", 2.0), component("Hydrogen", 1.0)],
            4.0,
            strings(&["OilRefinery"]),
            strings(&["Plasma Extract Refining"]),
        ));
        assert_eq!(named.name, "Plasma Extract Refining");
        assert_eq!(named.key, "PlasmaExtractRefining");
    }

    #[test]
    fn multiple_outputs_and_technologies_fall_back() {
        let mut namer = RecipeNamer::new();
        let named = namer.name_or_reuse(Recipe::new(
            vec![component("CrudeOil", 1.0)],
            vec![component("RefinedOil", 1.0), component("Hydrogen", 2.0)],
            2.0,
            strings(&["OilRefinery"]),
            strings(&["Plasma Extract Refining", "Reforming Refine"]),
        ));
        assert_eq!(named.name, "Production Recipe");
        assert_eq!(named.key, "ProductionRecipe");
    }

    #[test]
    fn equal_recipes_share_one_named_recipe() {
        let mut namer = RecipeNamer::new();
        let first = namer.name_or_reuse(gear(1.0, &["AssemblingMachineMkI"]));
        let second = namer.name_or_reuse(gear(1.0, &["AssemblingMachineMkIII"]));
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(namer.len(), 1);
    }

    #[test]
    fn a_new_technology_discriminates_first() {
        let mut namer = RecipeNamer::new();
        namer.name_or_reuse(Recipe::new(
            vec![component("SiliconIngot", 1.0)],
            vec![component("CrystalSilicon", 1.0)],
            2.0,
            strings(&["Smelter"]),
            strings(&["Crystal Smelting"]),
        ));
        let variant = namer.name_or_reuse(Recipe::new(
            vec![component("FractalSilicon", 1.0)],
            vec![component("CrystalSilicon", 2.0)],
            1.5,
            strings(&["AssemblingMachineMkIII"]),
            strings(&["Particle Control"]),
        ));
        assert_eq!(variant.name, "CrystalSilicon (Particle Control)");
        assert_eq!(variant.key, "CrystalSiliconParticleControl");
    }

    #[test]
    fn a_new_building_discriminates_second() {
        let mut namer = RecipeNamer::new();
        namer.name_or_reuse(Recipe::new(
            vec![component("IronIngot", 1.0)],
            vec![component("Gear", 1.0)],
            1.0,
            strings(&["AssemblingMachineMkI"]),
            strings(&["Automation"]),
        ));
        let variant = namer.name_or_reuse(Recipe::new(
            vec![component("IronIngot", 1.0)],
            vec![component("Gear", 1.0)],
            0.5,
            strings(&["AssemblingMachineMkIII"]),
            strings(&["Automation"]),
        ));
        assert_eq!(variant.name, "Gear (AssemblingMachineMkIII)");
    }

    #[test]
    fn the_smallest_new_input_discriminates_last() {
        let mut namer = RecipeNamer::new();
        namer.name_or_reuse(gear(1.0, &["AssemblingMachineMkI"]));
        let variant = namer.name_or_reuse(Recipe::new(
            vec![component("Steel", 1.0), component("CopperIngot", 1.0)],
            vec![component("Gear", 1.0)],
            0.67,
            strings(&["AssemblingMachineMkI"]),
            vec![],
        ));
        assert_eq!(variant.name, "Gear (CopperIngot)");
    }

    #[test]
    fn shared_inputs_do_not_discriminate() {
        let mut namer = RecipeNamer::new();
        namer.name_or_reuse(gear(1.0, &["AssemblingMachineMkI"]));
        // Same input set, different time: nothing distinguishes it.
        let variant = namer.name_or_reuse(gear(0.67, &["AssemblingMachineMkI"]));
        assert_eq!(variant.name, "Gear; Version 2");
        assert_eq!(variant.key, "GearVersion2");
    }

    #[test]
    fn no_buildings_means_no_discrimination() {
        let mut namer = RecipeNamer::new();
        namer.name_or_reuse(gear(1.0, &["AssemblingMachineMkI"]));
        let variant = namer.name_or_reuse(Recipe::new(
            vec![component("Steel", 1.0)],
            vec![component("Gear", 1.0)],
            2.0,
            vec![],
            vec![],
        ));
        assert_eq!(variant.name, "Gear; Version 2");
    }

    #[test]
    fn version_suffixes_increment_until_free() {
        let mut namer = RecipeNamer::new();
        namer.name_or_reuse(gear(1.0, &["AssemblingMachineMkI"]));
        namer.name_or_reuse(gear(2.0, &["AssemblingMachineMkI"]));
        let third = namer.name_or_reuse(gear(3.0, &["AssemblingMachineMkI"]));
        assert_eq!(third.name, "Gear; Version 3");
    }

    #[test]
    fn refined_names_are_reused_for_equal_recipes() {
        let mut namer = RecipeNamer::new();
        namer.name_or_reuse(gear(1.0, &["AssemblingMachineMkI"]));
        let variant = Recipe::new(
            vec![component("IronIngot", 1.0)],
            vec![component("Gear", 1.0)],
            0.5,
            strings(&["AssemblingMachineMkI"]),
            strings(&["Advanced Automation"]),
        );
        let first = namer.name_or_reuse(variant.clone());
        let second = namer.name_or_reuse(variant);
        assert_eq!(first.name, "Gear (Advanced Automation)");
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn nan_time_recipes_are_never_reused() {
        let mut namer = RecipeNamer::new();
        let first = namer.name_or_reuse(gear(f64::NAN, &["Fractionator"]));
        let second = namer.name_or_reuse(gear(f64::NAN, &["Fractionator"]));
        assert_eq!(first.name, "Gear");
        assert_eq!(second.name, "Gear; Version 2");
    }

    #[test]
    fn distinct_recipes_get_distinct_keys() {
        let mut namer = RecipeNamer::new();
        for time in 1..=6 {
            namer.name_or_reuse(gear(f64::from(time), &["AssemblingMachineMkI"]));
        }
        let keys: HashSet<&str> = namer.assigned().map(|r| r.key.as_str()).collect();
        assert_eq!(keys.len(), 6);
    }

    #[test]
    fn name_to_key_strips_punctuation() {
        assert_eq!(name_to_key("Gear; Version 2"), "GearVersion2");
        assert_eq!(
            name_to_key("CrystalSilicon (Particle Control)"),
            "CrystalSiliconParticleControl"
        );
    }
}
