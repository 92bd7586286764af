//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! The engine and the assignment core call store methods — they never
//! execute SQL directly.

use crate::error::RosterResult;
use crate::settings::AppSettings;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};

mod assignment;
mod audit;
mod duty;
mod person;

pub struct RosterStore {
    conn: Connection,
}

impl RosterStore {
    pub fn open(path: &str) -> RosterResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> RosterResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> RosterResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/002_assignments.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/003_audit.sql"))?;
        Ok(())
    }

    // ── Settings ───────────────────────────────────────────────

    /// Load settings, falling back to defaults when none were saved yet.
    pub fn load_settings(&self) -> RosterResult<AppSettings> {
        let json: Option<String> = self
            .conn
            .query_row("SELECT settings_json FROM settings WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?;
        match json {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(AppSettings::default()),
        }
    }

    pub fn save_settings(&self, settings: &AppSettings) -> RosterResult<()> {
        let json = serde_json::to_string(settings)?;
        self.conn.execute(
            "INSERT INTO settings (id, settings_json) VALUES (1, ?1)
             ON CONFLICT(id) DO UPDATE SET settings_json = excluded.settings_json",
            params![json],
        )?;
        Ok(())
    }

    // ── Bulk wipe ──────────────────────────────────────────────

    /// Delete every data row. Settings and the action log survive — the
    /// log is an audit trail, not data.
    pub fn wipe_data(&self) -> RosterResult<()> {
        self.conn.execute("DELETE FROM assignment", [])?;
        self.conn.execute("DELETE FROM duty", [])?;
        self.conn.execute("DELETE FROM person", [])?;
        self.conn.execute("DELETE FROM replacement_log", [])?;
        Ok(())
    }
}

// ── SQL <-> chrono helpers ─────────────────────────────────────

pub(crate) fn date_sql(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn parse_date(idx: usize, raw: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

pub(crate) fn ts_sql(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

pub(crate) fn parse_ts(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

pub(crate) fn bad_text(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, message.into())
}
