//! Record-file ingest for scraped recipe dumps.
//!
//! The scraper writes one `*.recipes` file per source page. Files are
//! line-oriented: `#` starts a comment, blank lines separate recipe blocks,
//! and each block holds one recipe:
//!
//! ```text
//! # assembler page
//! time 1
//! in IronIngot 1
//! out Gear 1
//! building AssemblingMachineMkI
//! tech Basic Assembling Processes
//! ```
//!
//! Ingest walks the dump directory in sorted order and feeds recipes to the
//! namer sequentially, so name assignment is reproducible across runs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use regex::Regex;
use rusqlite::Connection;
use thiserror::Error;
use walkdir::WalkDir;

use crate::db;
use crate::models::{Recipe, RecipeComponent};
use crate::naming::RecipeNamer;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("bad record line pattern")]
    Pattern(#[from] regex::Error),
}

impl IngestError {
    fn malformed(path: &Path, line: usize, reason: String) -> Self {
        Self::Malformed {
            path: path.to_path_buf(),
            line,
            reason,
        }
    }
}

/// Find every `*.recipes` dump under `dir`, sorted by path
pub fn find_record_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file() && e.path().extension().is_some_and(|ext| ext == "recipes")
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

struct RecordPatterns {
    time: Regex,
    component: Regex,
    building: Regex,
    technology: Regex,
}

impl RecordPatterns {
    fn new() -> Result<Self, IngestError> {
        Ok(Self {
            time: Regex::new(r"^time\s+(\S+)$")?,
            component: Regex::new(r"^(in|out)\s+([A-Za-z0-9]+)\s+(\S+)$")?,
            building: Regex::new(r"^building\s+([A-Za-z0-9]+)$")?,
            technology: Regex::new(r"^tech\s+(\S.*)$")?,
        })
    }
}

#[derive(Default)]
struct RecipeBlock {
    first_line: usize,
    time: Option<f64>,
    inputs: Vec<RecipeComponent>,
    outputs: Vec<RecipeComponent>,
    buildings: Vec<String>,
    technologies: Vec<String>,
}

impl RecipeBlock {
    fn starting_at(line: usize) -> Self {
        Self {
            first_line: line,
            ..Self::default()
        }
    }

    fn finish(self, path: &Path) -> Result<Recipe, IngestError> {
        let Some(time) = self.time else {
            return Err(IngestError::malformed(
                path,
                self.first_line,
                "recipe block has no time line".to_string(),
            ));
        };
        Ok(Recipe::new(
            self.inputs,
            self.outputs,
            time,
            self.buildings,
            self.technologies,
        ))
    }
}

/// Parse one record file into recipes
pub fn parse_records(path: &Path, content: &str) -> Result<Vec<Recipe>, IngestError> {
    let patterns = RecordPatterns::new()?;
    let mut recipes = Vec::new();
    let mut block: Option<RecipeBlock> = None;

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        let line_no = index + 1;

        if line.is_empty() {
            if let Some(done) = block.take() {
                recipes.push(done.finish(path)?);
            }
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let current = block.get_or_insert_with(|| RecipeBlock::starting_at(line_no));

        if let Some(caps) = patterns.time.captures(line) {
            current.time = Some(parse_amount(&caps[1], path, line_no)?);
        } else if let Some(caps) = patterns.component.captures(line) {
            let component = RecipeComponent {
                component: caps[2].to_string(),
                amount: parse_amount(&caps[3], path, line_no)?,
            };
            if &caps[1] == "in" {
                current.inputs.push(component);
            } else {
                current.outputs.push(component);
            }
        } else if let Some(caps) = patterns.building.captures(line) {
            current.buildings.push(caps[1].to_string());
        } else if let Some(caps) = patterns.technology.captures(line) {
            current.technologies.push(caps[1].to_string());
        } else {
            return Err(IngestError::malformed(
                path,
                line_no,
                format!("unrecognized record line {line:?}"),
            ));
        }
    }

    if let Some(done) = block.take() {
        recipes.push(done.finish(path)?);
    }
    Ok(recipes)
}

fn parse_amount(text: &str, path: &Path, line: usize) -> Result<f64, IngestError> {
    // "NaN" parses to f64::NAN, which is valid data (variable-rate recipes).
    text.parse()
        .map_err(|_| IngestError::malformed(path, line, format!("bad number {text:?}")))
}

#[derive(Debug, Default)]
pub struct IngestStats {
    pub files: usize,
    pub recipes: usize,
    pub named: usize,
    pub reused: usize,
    pub errors: usize,
}

impl std::fmt::Display for IngestStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ingested {} recipes from {} files ({} named, {} reused). Errors: {}",
            self.recipes, self.files, self.named, self.reused, self.errors
        )
    }
}

/// Ingest every record file under `source_dir`: parse, name, and store.
/// Files that fail to parse are reported and counted, not fatal.
pub fn ingest_to_database(
    conn: &Connection,
    namer: &mut RecipeNamer,
    source_dir: &Path,
) -> Result<IngestStats> {
    let mut stats = IngestStats::default();

    println!("Scanning {} for recipe records...", source_dir.display());
    let files = find_record_files(source_dir);
    println!("Found {} record files", files.len());

    for path in &files {
        let parsed = fs::read_to_string(path)
            .map_err(|source| IngestError::Io {
                path: path.clone(),
                source,
            })
            .and_then(|content| parse_records(path, &content));

        let recipes = match parsed {
            Ok(recipes) => recipes,
            Err(e) => {
                eprintln!("  Error parsing {}: {}", path.display(), e);
                stats.errors += 1;
                continue;
            }
        };

        stats.files += 1;
        let mut file_named = 0;
        let mut file_recipes = 0;
        for recipe in recipes {
            stats.recipes += 1;
            file_recipes += 1;
            let before = namer.len();
            let named = namer.name_or_reuse(recipe);
            if namer.len() > before {
                db::insert_recipe(conn, &named)?;
                stats.named += 1;
                file_named += 1;
            } else {
                stats.reused += 1;
            }
        }

        println!(
            "  Parsed: {} ({} recipes, {} new)",
            path.display(),
            file_recipes,
            file_named
        );
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# smelter page
time 2
in SiliconIngot 1
out CrystalSilicon 1
building Smelter
tech Crystal Smelting

time NaN
in Hydrogen 1
out Deuterium 1
building Fractionator
tech Deuterium Fractionation
";

    #[test]
    fn parses_blocks_into_recipes() {
        let recipes = parse_records(Path::new("smelter.recipes"), SAMPLE).unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].outputs[0].component, "CrystalSilicon");
        assert_eq!(recipes[0].production_time, 2.0);
        assert_eq!(recipes[0].buildings, vec!["Smelter"]);
        assert_eq!(recipes[1].technologies, vec!["Deuterium Fractionation"]);
        assert!(recipes[1].production_time.is_nan());
    }

    #[test]
    fn inputs_come_back_sorted() {
        let text = "time 1\nin Steel 2\nin CopperIngot 1\nout Gadget 1\n";
        let recipes = parse_records(Path::new("a.recipes"), text).unwrap();
        let inputs: Vec<&str> = recipes[0]
            .inputs
            .iter()
            .map(|c| c.component.as_str())
            .collect();
        assert_eq!(inputs, vec!["CopperIngot", "Steel"]);
    }

    #[test]
    fn rejects_unknown_lines_with_their_location() {
        let err = parse_records(Path::new("bad.recipes"), "time 1\nfrobnicate 3\n").unwrap_err();
        match err {
            IngestError::Malformed { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_blocks_without_a_time() {
        let err = parse_records(Path::new("bad.recipes"), "in IronIngot 1\nout Gear 1\n").unwrap_err();
        assert!(matches!(err, IngestError::Malformed { line: 1, .. }));
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = parse_records(Path::new("bad.recipes"), "time fast\n").unwrap_err();
        assert!(matches!(err, IngestError::Malformed { line: 1, .. }));
    }
}
