//! Audit-trail queries: the replacement log and the action log.
//! Both tables are append-only; nothing here mutates or deletes rows.

use super::{parse_ts, ts_sql, RosterStore};
use crate::duty::ReplacementEntry;
use crate::error::RosterResult;
use crate::event::ActionLogEntry;
use rusqlite::{params, Row};

fn replacement_row_mapper(row: &Row) -> rusqlite::Result<ReplacementEntry> {
    Ok(ReplacementEntry {
        id: row.get(0)?,
        duty_id: row.get(1)?,
        original_person_id: row.get(2)?,
        replacement_person_id: row.get(3)?,
        reason: row.get(4)?,
        created_at: parse_ts(5, &row.get::<_, String>(5)?)?,
    })
}

impl RosterStore {
    // ── Replacement log ────────────────────────────────────────

    pub fn append_replacement(&self, entry: &ReplacementEntry) -> RosterResult<()> {
        self.conn.execute(
            "INSERT INTO replacement_log (
                replacement_id, duty_id, original_person_id, replacement_person_id,
                reason, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                &entry.id,
                &entry.duty_id,
                &entry.original_person_id,
                &entry.replacement_person_id,
                &entry.reason,
                ts_sql(entry.created_at),
            ],
        )?;
        Ok(())
    }

    /// Newest first.
    pub fn all_replacements(&self) -> RosterResult<Vec<ReplacementEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT replacement_id, duty_id, original_person_id, replacement_person_id,
                    reason, created_at
             FROM replacement_log ORDER BY rowid DESC",
        )?;
        let rows = stmt.query_map([], replacement_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn replacement_count(&self) -> RosterResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM replacement_log", [], |row| row.get(0))
            .map_err(Into::into)
    }

    /// How many times this person was brought in as the replacement.
    pub fn replacements_received_count(&self, person_id: &str) -> RosterResult<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM replacement_log WHERE replacement_person_id = ?1",
                params![person_id],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }

    // ── Action log ─────────────────────────────────────────────

    pub fn append_action(&self, entry: &ActionLogEntry) -> RosterResult<()> {
        self.conn.execute(
            "INSERT INTO action_log (event_type, entity_type, entity_id, payload, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                &entry.event_type,
                &entry.entity_type,
                &entry.entity_id,
                &entry.payload,
                ts_sql(entry.created_at),
            ],
        )?;
        Ok(())
    }

    pub fn action_count(&self) -> RosterResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM action_log", [], |row| row.get(0))
            .map_err(Into::into)
    }

    /// Most recent entries, newest first.
    pub fn recent_actions(&self, limit: usize) -> RosterResult<Vec<ActionLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, event_type, entity_type, entity_id, payload, created_at
             FROM action_log ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(ActionLogEntry {
                id: Some(row.get(0)?),
                event_type: row.get(1)?,
                entity_type: row.get(2)?,
                entity_id: row.get(3)?,
                payload: row.get(4)?,
                created_at: parse_ts(5, &row.get::<_, String>(5)?)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
