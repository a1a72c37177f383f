//! Crafting graph pipeline.
//!
//! Ingests scraped recipe records, assigns stable names and keys, and
//! serves the resulting crafting graph from a local database.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rusqlite::Connection;

use craftgraph::catalog;
use craftgraph::db;
use craftgraph::ingest;
use craftgraph::models::{Recipe, RecipeComponent, StandardRecipe};
use craftgraph::naming::RecipeNamer;
use craftgraph::units::power::WATTS;

#[derive(Parser)]
#[command(name = "craftgraph")]
#[command(about = "Crafting graph pipeline for a factory-building game")]
struct Cli {
    /// Path to the SQLite database
    #[arg(short, long, default_value = "craftgraph.db")]
    database: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest scraped recipe record files
    Ingest {
        /// Directory containing *.recipes dumps
        source_dir: PathBuf,

        /// Clear existing recipes before ingesting
        #[arg(long)]
        clear: bool,
    },

    /// List all named recipes
    ListRecipes,

    /// List every component referenced by a recipe
    ListComponents,

    /// Show details for a specific recipe
    Recipe {
        /// Recipe key
        key: String,
    },

    /// List the building catalog
    ListBuildings,

    /// Show details for a specific building
    Building {
        /// Building key
        key: String,
    },

    /// Initialize empty database with schema
    Init,

    /// Load a small sample recipe set (without scraped data)
    LoadSample,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let conn = Connection::open(&cli.database)?;
    db::init_schema(&conn)?;

    match cli.command {
        Commands::Ingest { source_dir, clear } => {
            if clear {
                println!("Clearing existing recipes...");
                db::clear_recipes(&conn)?;
            }

            let mut namer = RecipeNamer::new();
            let stats = ingest::ingest_to_database(&conn, &mut namer, &source_dir)?;
            println!("\n{stats}");
        }

        Commands::ListRecipes => {
            let recipes = db::list_recipes(&conn)?;
            if recipes.is_empty() {
                println!("No recipes in database. Run 'ingest' or 'load-sample' first.");
            } else {
                println!("{:<40} {:<32} {:>8}", "Recipe", "Key", "Time (s)");
                println!("{}", "-".repeat(82));
                for r in recipes {
                    println!("{:<40} {:<32} {:>8}", r.name, r.key, r.production_time_s);
                }
            }
        }

        Commands::ListComponents => {
            let components = db::list_components(&conn)?;
            if components.is_empty() {
                println!("No components in database. Run 'ingest' or 'load-sample' first.");
            } else {
                println!("Components:");
                for c in components {
                    println!("  {c}");
                }
            }
        }

        Commands::Recipe { key } => match db::get_recipe(&conn, &key)? {
            Some(named) => {
                let standard = StandardRecipe::from_named(&named);
                println!("Recipe: {}", standard.name);
                println!("  Key: {}", standard.key);
                println!("  Time: {}", standard.production_time);
                println!("  Components:");
                for (component, amount) in &standard.components {
                    println!("    {component} {amount:+}");
                }
                if !standard.buildings.is_empty() {
                    println!("  Buildings:");
                    for b in &standard.buildings {
                        println!("    {b}");
                    }
                }
                if !standard.prerequisites.is_empty() {
                    println!("  Prerequisites:");
                    for t in &standard.prerequisites {
                        println!("    {t}");
                    }
                }
            }
            None => println!("Recipe '{key}' not found"),
        },

        Commands::ListBuildings => {
            println!("{:<28} {:>12} {:>12}", "Building", "Work (W)", "Idle (W)");
            println!("{}", "-".repeat(54));
            for b in catalog::buildings() {
                println!(
                    "{:<28} {:>12.0} {:>12.0}",
                    b.name,
                    b.work_consumption.value_as(&WATTS),
                    b.idle_consumption.value_as(&WATTS)
                );
            }
        }

        Commands::Building { key } => match catalog::building(&key) {
            Some(b) => {
                println!("Building: {}", b.name);
                println!("  Key: {}", b.key);
                println!(
                    "  Work consumption: {} ({:.0} W)",
                    b.work_consumption,
                    b.work_consumption.value_as(&WATTS)
                );
                println!(
                    "  Idle consumption: {} ({:.0} W)",
                    b.idle_consumption,
                    b.idle_consumption.value_as(&WATTS)
                );

                let recipes = db::recipes_for_building(&conn, &key)?;
                if !recipes.is_empty() {
                    println!("  Recipes:");
                    for name in recipes {
                        println!("    {name}");
                    }
                }
            }
            None => println!("Building '{key}' not found"),
        },

        Commands::Init => {
            println!("Database initialized at: {}", cli.database.display());
        }

        Commands::LoadSample => {
            load_sample_recipes(&conn)?;
            println!("Sample data loaded successfully!");
        }
    }

    Ok(())
}

/// Load a handful of hand-written recipes for testing without scraped dumps
fn load_sample_recipes(conn: &Connection) -> Result<()> {
    db::clear_recipes(conn)?;
    let mut namer = RecipeNamer::new();

    let samples = vec![
        // Gear: runs in every assembler tier
        Recipe::new(
            vec![component("IronIngot", 1.0)],
            vec![component("Gear", 1.0)],
            1.0,
            strings(&[
                "AssemblingMachineMkI",
                "AssemblingMachineMkII",
                "AssemblingMachineMkIII",
            ]),
            strings(&["Basic Assembling Processes"]),
        ),
        Recipe::new(
            vec![component("MagneticRing", 2.0), component("CopperIngot", 1.0)],
            vec![component("MagneticCoil", 2.0)],
            1.0,
            strings(&[
                "AssemblingMachineMkI",
                "AssemblingMachineMkII",
                "AssemblingMachineMkIII",
            ]),
            strings(&["Electromagnetism"]),
        ),
        // Two crystal silicon recipes collide on the output name
        Recipe::new(
            vec![component("SiliconIngot", 1.0)],
            vec![component("CrystalSilicon", 1.0)],
            2.0,
            strings(&["Smelter"]),
            strings(&["Crystal Smelting"]),
        ),
        Recipe::new(
            vec![component("FractalSilicon", 1.0)],
            vec![component("CrystalSilicon", 2.0)],
            1.5,
            strings(&["AssemblingMachineMkIII"]),
            strings(&["Particle Control"]),
        ),
        // Multiple outputs, named after the sole technology
        Recipe::new(
            vec![component("CrudeOil", 2.0)],
            vec![component("RefinedOil", 2.0), component("Hydrogen", 1.0)],
            4.0,
            strings(&["OilRefinery"]),
            strings(&["Plasma Extract Refining"]),
        ),
        // Variable-rate recipe: the production time is not fixed
        Recipe::new(
            vec![component("Hydrogen", 1.0)],
            vec![component("Deuterium", 1.0)],
            f64::NAN,
            strings(&["Fractionator"]),
            strings(&["Deuterium Fractionation"]),
        ),
    ];

    let mut named_count = 0;
    for recipe in samples {
        let before = namer.len();
        let named = namer.name_or_reuse(recipe);
        if namer.len() > before {
            db::insert_recipe(conn, &named)?;
            named_count += 1;
        }
    }

    println!("Loaded {named_count} sample recipes");
    Ok(())
}

fn component(component: &str, amount: f64) -> RecipeComponent {
    RecipeComponent {
        component: component.to_string(),
        amount,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
