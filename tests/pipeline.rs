// tests/pipeline.rs
//
// End-to-end ingest: record files on disk -> namer -> recipe store.
//
use std::fs;
use std::path::PathBuf;

use rusqlite::Connection;

use craftgraph::db;
use craftgraph::ingest;
use craftgraph::naming::RecipeNamer;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("craftgraph_{name}"));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

#[test]
fn ingest_names_and_stores_recipes() {
    let dir = tmp_dir("ingest");
    fs::write(
        dir.join("assembler.recipes"),
        "\
# assembler page
time 1
in IronIngot 1
out Gear 1
building AssemblingMachineMkI
tech Basic Assembling Processes

time 2
in SiliconIngot 1
out CrystalSilicon 1
building Smelter
tech Crystal Smelting
",
    )
    .unwrap();
    fs::write(
        dir.join("smelter.recipes"),
        "\
# the gear recipe again, seen from another page with another building set
time 1
in IronIngot 1
out Gear 1
building AssemblingMachineMkIII
tech Basic Assembling Processes

time 1.5
in FractalSilicon 1
out CrystalSilicon 2
building AssemblingMachineMkIII
tech Particle Control
",
    )
    .unwrap();

    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();

    let mut namer = RecipeNamer::new();
    let stats = ingest::ingest_to_database(&conn, &mut namer, &dir).unwrap();

    assert_eq!(stats.files, 2);
    assert_eq!(stats.recipes, 4);
    assert_eq!(stats.named, 3);
    assert_eq!(stats.reused, 1);
    assert_eq!(stats.errors, 0);

    let rows = db::list_recipes(&conn).unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["CrystalSilicon", "CrystalSilicon (Particle Control)", "Gear"]
    );

    // The reused gear recipe keeps the first-seen building set.
    let gear = db::get_recipe(&conn, "Gear").unwrap().unwrap();
    assert_eq!(gear.recipe.buildings, vec!["AssemblingMachineMkI"]);

    let variant = db::get_recipe(&conn, "CrystalSiliconParticleControl")
        .unwrap()
        .unwrap();
    assert_eq!(variant.name, "CrystalSilicon (Particle Control)");
    assert_eq!(variant.recipe.production_time, 1.5);

    let components = db::list_components(&conn).unwrap();
    assert_eq!(
        components,
        vec![
            "CrystalSilicon",
            "FractalSilicon",
            "Gear",
            "IronIngot",
            "SiliconIngot"
        ]
    );
}

#[test]
fn malformed_files_are_counted_not_fatal() {
    let dir = tmp_dir("malformed");
    fs::write(dir.join("bad.recipes"), "time 1\nfrobnicate 3\n").unwrap();
    fs::write(
        dir.join("good.recipes"),
        "time 1\nin IronIngot 1\nout Gear 1\n",
    )
    .unwrap();

    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();

    let mut namer = RecipeNamer::new();
    let stats = ingest::ingest_to_database(&conn, &mut namer, &dir).unwrap();

    assert_eq!(stats.errors, 1);
    assert_eq!(stats.files, 1);
    assert_eq!(stats.named, 1);
    assert_eq!(db::list_recipes(&conn).unwrap().len(), 1);
}

#[test]
fn reingesting_with_a_fresh_namer_reassigns_the_same_names() {
    let dir = tmp_dir("stable");
    fs::write(
        dir.join("pages.recipes"),
        "\
time 2
in SiliconIngot 1
out CrystalSilicon 1
building Smelter
tech Crystal Smelting

time 1.5
in FractalSilicon 1
out CrystalSilicon 2
building AssemblingMachineMkIII
tech Particle Control
",
    )
    .unwrap();

    let mut names_per_run = Vec::new();
    for _ in 0..2 {
        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();
        let mut namer = RecipeNamer::new();
        ingest::ingest_to_database(&conn, &mut namer, &dir).unwrap();
        let names: Vec<String> = db::list_recipes(&conn)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        names_per_run.push(names);
    }
    assert_eq!(names_per_run[0], names_per_run[1]);
    assert_eq!(
        names_per_run[0],
        vec!["CrystalSilicon", "CrystalSilicon (Particle Control)"]
    );
}
