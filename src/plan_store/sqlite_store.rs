//! SQLite-backed mission plan store.
//!
//! Opens a small pool of read-only connections and dispatches queries
//! round-robin so independent reads within one request can run in parallel.

use super::models::MissionPlanEntry;
use super::{DistinctColumn, PlanStore};
use crate::query::FilterSet;
use anyhow::{Context, Result};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OpenFlags, Row};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

const DEFAULT_READ_POOL_SIZE: usize = 4;

pub struct SqlitePlanStore {
    read_pool: Vec<Arc<Mutex<Connection>>>,
    read_index: AtomicUsize,
}

impl SqlitePlanStore {
    /// Open the mission plan database read-only.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        Self::open_with_pool_size(db_path, DEFAULT_READ_POOL_SIZE)
    }

    pub fn open_with_pool_size<P: AsRef<Path>>(db_path: P, pool_size: usize) -> Result<Self> {
        let db_path = db_path.as_ref();

        let mut read_pool = Vec::with_capacity(pool_size.max(1));
        for _ in 0..pool_size.max(1) {
            let conn = Connection::open_with_flags(
                db_path,
                OpenFlags::SQLITE_OPEN_READ_ONLY
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .with_context(|| format!("Failed to open mission plan database at {:?}", db_path))?;
            read_pool.push(Arc::new(Mutex::new(conn)));
        }

        let store = SqlitePlanStore {
            read_pool,
            read_index: AtomicUsize::new(0),
        };

        let total = store.count_entries(&FilterSet::default())?;
        info!("Opened mission plan database: {} entries", total);

        Ok(store)
    }

    fn get_read_conn(&self) -> Arc<Mutex<Connection>> {
        let index = self.read_index.fetch_add(1, Ordering::SeqCst) % self.read_pool.len();
        self.read_pool[index].clone()
    }
}

/// Fold the predicate list into a parameterized WHERE clause.
fn build_filtered_query(select: &str, filters: &FilterSet) -> (String, Vec<Value>) {
    let mut sql = format!("SELECT {} FROM master_plan WHERE 1=1", select);
    let mut params: Vec<Value> = Vec::new();

    for (column, value) in filters.predicates() {
        sql.push_str(&format!(" AND {} = ?{}", column, params.len() + 1));
        params.push(Value::Text(value.to_string()));
    }

    (sql, params)
}

fn entry_from_row(row: &Row) -> rusqlite::Result<MissionPlanEntry> {
    Ok(MissionPlanEntry {
        id: row.get("id")?,
        start_time_utc: row.get("start_time_utc")?,
        duration: row.get("duration")?,
        date: row.get("date")?,
        team: row.get("team")?,
        spass_type: row.get("spass_type")?,
        target: row.get("target")?,
        request_name: row.get("request_name")?,
        library_definition: row.get("library_definition")?,
        title: row.get("title")?,
        description: row.get("description")?,
    })
}

impl PlanStore for SqlitePlanStore {
    fn list_entries(
        &self,
        filters: &FilterSet,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MissionPlanEntry>> {
        let (mut sql, mut params) = build_filtered_query("*", filters);
        sql.push_str(&format!(
            " LIMIT ?{} OFFSET ?{}",
            params.len() + 1,
            params.len() + 2
        ));
        params.push(Value::Integer(limit));
        params.push(Value::Integer(offset));

        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(params), entry_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn count_entries(&self, filters: &FilterSet) -> Result<i64> {
        let (sql, params) = build_filtered_query("COUNT(*)", filters);

        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        let count = conn.query_row(&sql, params_from_iter(params), |row| row.get(0))?;
        Ok(count)
    }

    fn get_entry_by_id(&self, id: i64) -> Result<Option<MissionPlanEntry>> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        match conn.query_row(
            "SELECT * FROM master_plan WHERE id = ?1",
            params![id],
            entry_from_row,
        ) {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn search_text(&self, term: &str, limit: i64) -> Result<Vec<MissionPlanEntry>> {
        let pattern = format!("%{}%", term);

        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT * FROM master_plan WHERE title LIKE ?1 OR description LIKE ?1 LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(params![pattern, limit], entry_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn list_distinct(&self, column: DistinctColumn) -> Result<Vec<String>> {
        let column = column.column_name();
        let sql = format!(
            "SELECT DISTINCT {col} FROM master_plan WHERE {col} IS NOT NULL ORDER BY {col}",
            col = column
        );

        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        let mut stmt = conn.prepare(&sql)?;
        let values = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
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

    fn fixture_store() -> (TempDir, SqlitePlanStore) {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("master_plan.db");

        let conn = Connection::open(&db_path).unwrap();
        conn.execute(SCHEMA, []).unwrap();

        let rows: [(&str, &str, &str, &str); 6] = [
            ("CAPS", "Saturn", "Prime", "Saturn magnetospheric plasma survey"),
            ("CAPS", "Titan", "Prime", "Titan flyby plasma observation"),
            ("ISS", "Saturn", "Rider", "Imaging of Saturn ring spokes"),
            ("RADAR", "Titan", "Prime", "Titan surface mapping pass"),
            ("UVIS", "Enceladus", "Rider", "Enceladus plume occultation"),
            ("ISS", "Iapetus", "Rider", "Iapetus global color mosaic"),
        ];

        for (i, (team, target, spass_type, title)) in rows.iter().enumerate() {
            conn.execute(
                "INSERT INTO master_plan
                    (id, start_time_utc, date, team, spass_type, target, title, description)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    (i + 1) as i64,
                    format!("2005-{:03}T00:00:00", i + 1),
                    format!("2005-{:03}", i + 1),
                    team,
                    spass_type,
                    target,
                    title,
                    format!("Observation of {} by the {} team", target, team),
                ],
            )
            .unwrap();
        }

        let store = SqlitePlanStore::open(&db_path).unwrap();
        (dir, store)
    }

    fn filters(pairs: &[(&str, &str)]) -> FilterSet {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FilterSet::from_params(&map)
    }

    #[test]
    fn list_applies_equality_filters_anded() {
        let (_dir, store) = fixture_store();

        let entries = store
            .list_entries(&filters(&[("team", "CAPS")]), 100, 0)
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.team.as_deref() == Some("CAPS")));

        let entries = store
            .list_entries(&filters(&[("team", "CAPS"), ("target", "Titan")]), 100, 0)
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].target.as_deref(), Some("Titan"));
    }

    #[test]
    fn list_pages_are_disjoint() {
        let (_dir, store) = fixture_store();
        let empty = FilterSet::default();

        let first = store.list_entries(&empty, 2, 0).unwrap();
        let second = store.list_entries(&empty, 2, 2).unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        let first_ids: Vec<i64> = first.iter().map(|e| e.id).collect();
        assert!(second.iter().all(|e| !first_ids.contains(&e.id)));
    }

    #[test]
    fn count_matches_full_listing() {
        let (_dir, store) = fixture_store();
        let empty = FilterSet::default();

        let total = store.count_entries(&empty).unwrap();
        let all = store.list_entries(&empty, total, 0).unwrap();
        assert_eq!(total as usize, all.len());

        assert_eq!(store.count_entries(&filters(&[("team", "ISS")])).unwrap(), 2);
        assert_eq!(
            store
                .count_entries(&filters(&[("team", "NOPE")]))
                .unwrap(),
            0
        );
    }

    #[test]
    fn missing_id_is_none_not_an_error() {
        let (_dir, store) = fixture_store();

        let entry = store.get_entry_by_id(1).unwrap().unwrap();
        assert_eq!(entry.id, 1);
        assert_eq!(entry.team.as_deref(), Some("CAPS"));

        assert!(store.get_entry_by_id(99999).unwrap().is_none());
    }

    #[test]
    fn search_matches_title_or_description() {
        let (_dir, store) = fixture_store();

        let results = store.search_text("Saturn", 5).unwrap();
        assert!(!results.is_empty());
        assert!(results.len() <= 5);
        for entry in &results {
            let title = entry.title.as_deref().unwrap_or("");
            let description = entry.description.as_deref().unwrap_or("");
            assert!(title.contains("Saturn") || description.contains("Saturn"));
        }

        let bounded = store.search_text("Saturn", 1).unwrap();
        assert_eq!(bounded.len(), 1);
    }

    #[test]
    fn distinct_values_are_sorted_and_deduplicated() {
        let (_dir, store) = fixture_store();

        let teams = store.list_distinct(DistinctColumn::Team).unwrap();
        assert_eq!(teams, vec!["CAPS", "ISS", "RADAR", "UVIS"]);

        let spass_types = store.list_distinct(DistinctColumn::SpassType).unwrap();
        assert_eq!(spass_types, vec!["Prime", "Rider"]);
    }

    #[test]
    fn distinct_excludes_null_rows() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("master_plan.db");
        let conn = Connection::open(&db_path).unwrap();
        conn.execute(SCHEMA, []).unwrap();
        conn.execute(
            "INSERT INTO master_plan (id, team) VALUES (1, 'CAPS'), (2, NULL)",
            [],
        )
        .unwrap();

        let store = SqlitePlanStore::open(&db_path).unwrap();
        assert_eq!(
            store.list_distinct(DistinctColumn::Team).unwrap(),
            vec!["CAPS"]
        );
    }
}
