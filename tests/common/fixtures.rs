//! Fixture database creation
//!
//! Builds a small mission plan database in a temp directory. The seeded rows
//! are described by the constants module; keep the two in sync.

use anyhow::Result;
use rusqlite::{params, Connection};
use std::path::PathBuf;
use tempfile::TempDir;

const SCHEMA: &str = "CREATE TABLE master_plan (
    id INTEGER PRIMARY KEY,
    start_time_utc TEXT,
    duration TEXT,
    date TEXT,
    team TEXT,
    spass_type TEXT,
    target TEXT,
    request_name TEXT,
    library_definition TEXT,
    title TEXT,
    description TEXT
)";

struct FixtureRow {
    date: &'static str,
    team: &'static str,
    spass_type: &'static str,
    target: &'static str,
    title: &'static str,
}

const FIXTURE_ROWS: [FixtureRow; 8] = [
    FixtureRow {
        date: "2004-07-01",
        team: "CAPS",
        spass_type: "Prime",
        target: "Saturn",
        title: "Saturn magnetospheric plasma survey",
    },
    FixtureRow {
        date: "2004-10-26",
        team: "CAPS",
        spass_type: "Prime",
        target: "Titan",
        title: "Titan flyby plasma observation",
    },
    FixtureRow {
        date: "2005-02-17",
        team: "ISS",
        spass_type: "Rider",
        target: "Saturn",
        title: "Imaging of Saturn ring spokes",
    },
    FixtureRow {
        date: "2005-10-28",
        team: "RADAR",
        spass_type: "Prime",
        target: "Titan",
        title: "Titan surface mapping pass",
    },
    FixtureRow {
        date: "2005-07-14",
        team: "UVIS",
        spass_type: "Rider",
        target: "Enceladus",
        title: "Enceladus plume spectroscopy",
    },
    FixtureRow {
        date: "2007-09-10",
        team: "ISS",
        spass_type: "Rider",
        target: "Iapetus",
        title: "Iapetus close approach imaging",
    },
    FixtureRow {
        date: "2008-03-12",
        team: "CAPS",
        spass_type: "Prime",
        target: "Enceladus",
        title: "Enceladus plume fly-through sampling",
    },
    FixtureRow {
        date: "2010-06-21",
        team: "RADAR",
        spass_type: "Prime",
        target: "Titan",
        title: "Titan lake altimetry",
    },
];

/// Creates a temp directory holding a seeded mission plan database.
///
/// Returns the temp dir (keep it alive) and the database path.
pub fn create_test_plan_db() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let db_path = dir.path().join("master_plan.db");

    let conn = Connection::open(&db_path)?;
    conn.execute(SCHEMA, [])?;

    for (i, row) in FIXTURE_ROWS.iter().enumerate() {
        let id = (i + 1) as i64;
        let description = format!("Observation of {} by the {} team", row.target, row.team);
        conn.execute(
            "INSERT INTO master_plan
                (id, start_time_utc, duration, date, team, spass_type, target,
                 request_name, library_definition, title, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                id,
                format!("{}T00:00:00Z", row.date),
                "01:00:00",
                row.date,
                row.team,
                row.spass_type,
                row.target,
                format!("{}_{:03}", row.team, id),
                "OBSERVATION",
                row.title,
                description,
            ],
        )?;
    }

    Ok((dir, db_path))
}
