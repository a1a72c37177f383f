//! Recipe store schema and operations.

use anyhow::Result;
use rusqlite::Connection;

use crate::models::{NamedRecipe, Recipe, RecipeComponent};

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Named recipes; production_time_s NULL encodes a variable (NaN) time
        CREATE TABLE IF NOT EXISTS recipes (
            key TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            production_time_s REAL
        );

        -- What a recipe consumes
        CREATE TABLE IF NOT EXISTS recipe_inputs (
            recipe_key TEXT,
            component TEXT,
            amount REAL NOT NULL,
            PRIMARY KEY (recipe_key, component)
        );

        -- What a recipe produces
        CREATE TABLE IF NOT EXISTS recipe_outputs (
            recipe_key TEXT,
            component TEXT,
            amount REAL NOT NULL,
            PRIMARY KEY (recipe_key, component)
        );

        -- Buildings capable of running a recipe
        CREATE TABLE IF NOT EXISTS recipe_buildings (
            recipe_key TEXT,
            building TEXT,
            PRIMARY KEY (recipe_key, building)
        );

        -- Technologies that must be researched first
        CREATE TABLE IF NOT EXISTS recipe_technologies (
            recipe_key TEXT,
            technology TEXT,
            PRIMARY KEY (recipe_key, technology)
        );

        -- Indexes for common lookups
        CREATE INDEX IF NOT EXISTS idx_recipe_inputs_component ON recipe_inputs(component);
        CREATE INDEX IF NOT EXISTS idx_recipe_outputs_component ON recipe_outputs(component);
        CREATE INDEX IF NOT EXISTS idx_recipe_buildings_building ON recipe_buildings(building);
        "#,
    )?;
    Ok(())
}

/// Clear all stored recipes (for re-ingestion)
pub fn clear_recipes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DELETE FROM recipe_technologies;
        DELETE FROM recipe_buildings;
        DELETE FROM recipe_outputs;
        DELETE FROM recipe_inputs;
        DELETE FROM recipes;
        "#,
    )?;
    Ok(())
}

/// Insert or replace a named recipe with all its child rows
pub fn insert_recipe(conn: &Connection, named: &NamedRecipe) -> Result<()> {
    let time: Option<f64> = if named.recipe.production_time.is_nan() {
        None
    } else {
        Some(named.recipe.production_time)
    };
    conn.execute(
        "INSERT OR REPLACE INTO recipes (key, name, production_time_s) VALUES (?1, ?2, ?3)",
        (&named.key, &named.name, time),
    )?;

    for input in &named.recipe.inputs {
        conn.execute(
            "INSERT OR REPLACE INTO recipe_inputs (recipe_key, component, amount)
             VALUES (?1, ?2, ?3)",
            (&named.key, &input.component, input.amount),
        )?;
    }
    for output in &named.recipe.outputs {
        conn.execute(
            "INSERT OR REPLACE INTO recipe_outputs (recipe_key, component, amount)
             VALUES (?1, ?2, ?3)",
            (&named.key, &output.component, output.amount),
        )?;
    }
    for building in &named.recipe.buildings {
        conn.execute(
            "INSERT OR REPLACE INTO recipe_buildings (recipe_key, building) VALUES (?1, ?2)",
            (&named.key, building),
        )?;
    }
    for technology in &named.recipe.technologies {
        conn.execute(
            "INSERT OR REPLACE INTO recipe_technologies (recipe_key, technology) VALUES (?1, ?2)",
            (&named.key, technology),
        )?;
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct RecipeRow {
    pub key: String,
    pub name: String,
    pub production_time_s: f64,
}

/// List all recipes in the database
pub fn list_recipes(conn: &Connection) -> Result<Vec<RecipeRow>> {
    let mut stmt = conn.prepare("SELECT key, name, production_time_s FROM recipes ORDER BY name")?;

    let rows = stmt.query_map([], |row| {
        Ok(RecipeRow {
            key: row.get(0)?,
            name: row.get(1)?,
            production_time_s: row.get::<_, Option<f64>>(2)?.unwrap_or(f64::NAN),
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// Fetch one recipe with its inputs, outputs, buildings, and technologies
pub fn get_recipe(conn: &Connection, key: &str) -> Result<Option<NamedRecipe>> {
    let mut stmt = conn.prepare("SELECT key, name, production_time_s FROM recipes WHERE key = ?1")?;
    let mut rows = stmt.query_map([key], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, Option<f64>>(2)?,
        ))
    })?;

    let Some(row) = rows.next() else {
        return Ok(None);
    };
    let (key, name, time) = row?;

    let inputs = component_rows(conn, "recipe_inputs", &key)?;
    let outputs = component_rows(conn, "recipe_outputs", &key)?;
    let buildings = string_rows(
        conn,
        "SELECT building FROM recipe_buildings WHERE recipe_key = ?1",
        &key,
    )?;
    let technologies = string_rows(
        conn,
        "SELECT technology FROM recipe_technologies WHERE recipe_key = ?1",
        &key,
    )?;

    // Recipe::new re-establishes the canonical sorts for data read back
    // from the store.
    Ok(Some(NamedRecipe {
        recipe: Recipe::new(
            inputs,
            outputs,
            time.unwrap_or(f64::NAN),
            buildings,
            technologies,
        ),
        key,
        name,
    }))
}

fn component_rows(conn: &Connection, table: &str, key: &str) -> Result<Vec<RecipeComponent>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT component, amount FROM {table} WHERE recipe_key = ?1"
    ))?;

    let rows = stmt.query_map([key], |row| {
        Ok(RecipeComponent {
            component: row.get(0)?,
            amount: row.get(1)?,
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

fn string_rows(conn: &Connection, sql: &str, key: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(sql)?;

    let rows = stmt.query_map([key], |row| row.get(0))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// List every component referenced by any recipe
pub fn list_components(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT component FROM recipe_inputs
         UNION SELECT component FROM recipe_outputs
         ORDER BY component",
    )?;

    let rows = stmt.query_map([], |row| row.get(0))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// Names of all recipes a building can run
pub fn recipes_for_building(conn: &Connection, building: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT r.name FROM recipes r
         JOIN recipe_buildings rb ON r.key = rb.recipe_key
         WHERE rb.building = ?1
         ORDER BY r.name",
    )?;

    let rows = stmt.query_map([building], |row| row.get(0))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}
