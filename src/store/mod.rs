//! SQLite persistence of flattened entity graphs.
//!
//! Table layouts come straight from each entity's [`TableDef`], so creating
//! the schema needs no hand-written DDL.

use crate::error::AppError;
use crate::model::{EntityKind, Flatten, Record, TableDef};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection, Transaction};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// How a batch treats rows whose primary key already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    /// Plain INSERT; a duplicate key fails the whole batch.
    Insert,
    /// Upsert; existing rows take the new values.
    Merge,
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (creating if needed) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        info!(path = %path.display(), "opening database");
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, AppError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> Result<Self, AppError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Database { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Creates every table that does not exist yet. With `overwrite`, existing
    /// tables (and their rows) are dropped first.
    pub fn create_schema(&mut self, overwrite: bool) -> Result<(), AppError> {
        if overwrite {
            self.drop_schema()?;
        }

        let tx = self.conn.transaction()?;
        for kind in EntityKind::ALL {
            tx.execute_batch(&create_table_sql(&kind.table()))?;
        }
        tx.commit()?;

        debug!(tables = EntityKind::ALL.len(), "schema ready");
        Ok(())
    }

    /// Drops every table, children before parents. Missing tables are skipped.
    pub fn drop_schema(&mut self) -> Result<(), AppError> {
        let tx = self.conn.transaction()?;
        for kind in EntityKind::ALL.iter().rev() {
            tx.execute_batch(&format!(
                "DROP TABLE IF EXISTS {};",
                quote(kind.table().name)
            ))?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Inserts every record of `graph`; fails on an existing primary key and
    /// leaves the database untouched in that case.
    pub fn insert<G: Flatten + ?Sized>(&mut self, graph: &G) -> Result<usize, AppError> {
        self.write(&graph.records(), WriteMode::Insert)
    }

    /// Inserts or updates every record of `graph` by primary key.
    pub fn merge<G: Flatten + ?Sized>(&mut self, graph: &G) -> Result<usize, AppError> {
        self.write(&graph.records(), WriteMode::Merge)
    }

    pub fn row_count(&self, kind: EntityKind) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote(kind.table().name));
        Ok(self.conn.query_row(&sql, [], |row| row.get(0))?)
    }

    fn write(&mut self, records: &[Record<'_>], mode: WriteMode) -> Result<usize, AppError> {
        let tx = self.conn.transaction()?;
        for record in records {
            write_record(&tx, record, mode)?;
        }
        tx.commit()?;

        debug!(rows = records.len(), ?mode, "batch written");
        Ok(records.len())
    }
}

fn write_record(tx: &Transaction<'_>, record: &Record<'_>, mode: WriteMode) -> Result<(), AppError> {
    let table = record.kind().table();
    let row = record.to_row()?;
    let values = table
        .columns
        .iter()
        .map(|column| to_sql(row.get(column.name).unwrap_or(&Value::Null)));

    let mut statement = tx.prepare_cached(&write_sql(&table, mode))?;
    statement.execute(params_from_iter(values))?;
    Ok(())
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(flag) => SqlValue::Integer(i64::from(*flag)),
        Value::Number(n) => n
            .as_i64()
            .map(SqlValue::Integer)
            .or_else(|| n.as_f64().map(SqlValue::Real))
            .unwrap_or(SqlValue::Null),
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier)
}

fn column_list<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names.into_iter().map(quote).collect::<Vec<_>>().join(", ")
}

pub fn create_table_sql(table: &TableDef) -> String {
    let mut lines: Vec<String> = table
        .columns
        .iter()
        .map(|column| {
            let null = if column.nullable { "" } else { " NOT NULL" };
            format!("    {} {}{}", quote(column.name), column.sql_type, null)
        })
        .collect();

    lines.push(format!(
        "    PRIMARY KEY ({})",
        column_list(table.key.iter().copied())
    ));
    if let Some(parent) = table.parent {
        let columns = column_list(parent.columns.iter().copied());
        lines.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {} ({})",
            columns,
            quote(parent.table),
            columns
        ));
    }

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n);",
        quote(table.name),
        lines.join(",\n")
    )
}

fn write_sql(table: &TableDef, mode: WriteMode) -> String {
    let columns = column_list(table.columns.iter().map(|c| c.name));
    let placeholders = (1..=table.columns.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    let insert = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote(table.name),
        columns,
        placeholders
    );

    match mode {
        WriteMode::Insert => insert,
        WriteMode::Merge => {
            let updates = table
                .columns
                .iter()
                .filter(|c| !table.is_key(c.name))
                .map(|c| format!("{0} = excluded.{0}", quote(c.name)))
                .collect::<Vec<_>>();
            let action = if updates.is_empty() {
                "DO NOTHING".to_string()
            } else {
                format!("DO UPDATE SET {}", updates.join(", "))
            };
            format!(
                "{} ON CONFLICT ({}) {}",
                insert,
                column_list(table.key.iter().copied()),
                action
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LeagueEntry, MiniSeries, SummonerProfile};
    use chrono::{TimeZone, Utc};

    fn profile(level: i64) -> SummonerProfile {
        SummonerProfile {
            region: "EUW".to_string(),
            summoner_id: "sid".to_string(),
            account_id: "acc".to_string(),
            puuid: "puuid".to_string(),
            summoner_name: "Player".to_string(),
            profile_icon_id: 1,
            revision_date: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            summoner_level: level,
        }
    }

    fn entry_with_series() -> LeagueEntry {
        LeagueEntry {
            region: "EUW".to_string(),
            summoner_id: "sid".to_string(),
            league_id: "lid".to_string(),
            queue_type: "RANKED_SOLO_5x5".to_string(),
            summoner_name: "Player".to_string(),
            tier: "GOLD".to_string(),
            rank: "I".to_string(),
            league_points: 100,
            wins: 10,
            losses: 9,
            hot_streak: true,
            veteran: false,
            fresh_blood: false,
            inactive: false,
            mini_series: Some(MiniSeries {
                region: "EUW".to_string(),
                summoner_id: "sid".to_string(),
                league_id: "lid".to_string(),
                wins: 1,
                losses: 1,
                target: 2,
                progress: "WLN".to_string(),
            }),
        }
    }

    fn database() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        db.create_schema(false).unwrap();
        db
    }

    #[test]
    fn create_table_sql_declares_keys() {
        let sql = create_table_sql(&crate::model::Ban::TABLE);

        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"bans\""));
        assert!(sql.contains("PRIMARY KEY (\"game_id\", \"team_id\", \"pick_turn\")"));
        assert!(sql.contains(
            "FOREIGN KEY (\"game_id\", \"team_id\") REFERENCES \"teams\" (\"game_id\", \"team_id\")"
        ));
    }

    #[test]
    fn schema_creation_is_idempotent() {
        let mut db = database();
        db.create_schema(false).unwrap();

        for kind in EntityKind::ALL {
            assert_eq!(db.row_count(kind).unwrap(), 0);
        }
    }

    #[test]
    fn insert_then_duplicate_insert_fails() {
        let mut db = database();

        assert_eq!(db.insert(&profile(30)).unwrap(), 1);
        assert!(matches!(
            db.insert(&profile(31)),
            Err(AppError::Database(_))
        ));
        assert_eq!(db.row_count(EntityKind::Summoner).unwrap(), 1);
    }

    #[test]
    fn merge_updates_existing_rows() {
        let mut db = database();
        db.insert(&profile(30)).unwrap();

        db.merge(&profile(31)).unwrap();

        let level: i64 = db
            .connection()
            .query_row("SELECT summoner_level FROM summoner", [], |row| row.get(0))
            .unwrap();
        assert_eq!(level, 31);
        assert_eq!(db.row_count(EntityKind::Summoner).unwrap(), 1);
    }

    #[test]
    fn entry_and_series_are_both_stored() {
        let mut db = database();

        assert_eq!(db.insert(&vec![entry_with_series()]).unwrap(), 2);

        assert_eq!(db.row_count(EntityKind::LeagueEntry).unwrap(), 1);
        assert_eq!(db.row_count(EntityKind::MiniSeries).unwrap(), 1);
        let hot: bool = db
            .connection()
            .query_row("SELECT hot_streak FROM league_entry", [], |row| row.get(0))
            .unwrap();
        assert!(hot);
    }

    #[test]
    fn overwrite_clears_existing_rows() {
        let mut db = database();
        db.insert(&profile(30)).unwrap();

        db.create_schema(true).unwrap();

        assert_eq!(db.row_count(EntityKind::Summoner).unwrap(), 0);
    }

    #[test]
    fn drop_schema_removes_tables_and_tolerates_repeats() {
        let mut db = database();

        db.drop_schema().unwrap();
        db.drop_schema().unwrap();

        assert!(db.row_count(EntityKind::Summoner).is_err());
    }
}
