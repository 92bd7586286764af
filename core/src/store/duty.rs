//! Duty table queries.

use super::{date_sql, parse_date, parse_ts, ts_sql, RosterStore};
use crate::duty::DutyRecord;
use crate::error::{RosterError, RosterResult};
use rusqlite::{params, OptionalExtension, Row};

const DUTY_COLUMNS: &str =
    "duty_id, duty_type, date, max_personnel, roles, comment, created_at, updated_at";

fn duty_row_mapper(row: &Row) -> rusqlite::Result<DutyRecord> {
    let roles_json: String = row.get(4)?;
    let roles: Vec<String> = serde_json::from_str(&roles_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(DutyRecord {
        id: row.get(0)?,
        duty_type: row.get(1)?,
        date: parse_date(2, &row.get::<_, String>(2)?)?,
        max_personnel: row.get::<_, i64>(3)? as u32,
        roles,
        comment: row.get(5)?,
        created_at: parse_ts(6, &row.get::<_, String>(6)?)?,
        updated_at: parse_ts(7, &row.get::<_, String>(7)?)?,
    })
}

impl RosterStore {
    pub fn insert_duty(&self, d: &DutyRecord) -> RosterResult<()> {
        let roles_json = serde_json::to_string(&d.roles)?;
        self.conn.execute(
            "INSERT INTO duty (
                duty_id, duty_type, date, max_personnel, roles, comment, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                &d.id,
                &d.duty_type,
                date_sql(d.date),
                d.max_personnel as i64,
                roles_json,
                d.comment.as_deref(),
                ts_sql(d.created_at),
                ts_sql(d.updated_at),
            ],
        )?;
        Ok(())
    }

    pub fn update_duty(&self, d: &DutyRecord) -> RosterResult<()> {
        let roles_json = serde_json::to_string(&d.roles)?;
        let affected = self.conn.execute(
            "UPDATE duty SET
                duty_type = ?2, date = ?3, max_personnel = ?4, roles = ?5,
                comment = ?6, updated_at = ?7
             WHERE duty_id = ?1",
            params![
                &d.id,
                &d.duty_type,
                date_sql(d.date),
                d.max_personnel as i64,
                roles_json,
                d.comment.as_deref(),
                ts_sql(d.updated_at),
            ],
        )?;
        if affected == 0 {
            return Err(RosterError::DutyNotFound { id: d.id.clone() });
        }
        Ok(())
    }

    pub fn get_duty(&self, duty_id: &str) -> RosterResult<DutyRecord> {
        self.conn
            .query_row(
                &format!("SELECT {DUTY_COLUMNS} FROM duty WHERE duty_id = ?1"),
                params![duty_id],
                duty_row_mapper,
            )
            .optional()?
            .ok_or_else(|| RosterError::DutyNotFound {
                id: duty_id.to_string(),
            })
    }

    pub fn all_duties(&self) -> RosterResult<Vec<DutyRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {DUTY_COLUMNS} FROM duty ORDER BY date ASC, rowid ASC"
        ))?;
        let rows = stmt.query_map([], duty_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Duties with no assignment rows yet — the runner's work queue.
    pub fn unassigned_duties(&self) -> RosterResult<Vec<DutyRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {DUTY_COLUMNS} FROM duty d
             WHERE NOT EXISTS (SELECT 1 FROM assignment a WHERE a.duty_id = d.duty_id)
             ORDER BY date ASC, rowid ASC"
        ))?;
        let rows = stmt.query_map([], duty_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Removes the duty and, via FK cascade, its assignment rows.
    pub fn delete_duty(&self, duty_id: &str) -> RosterResult<()> {
        let affected = self
            .conn
            .execute("DELETE FROM duty WHERE duty_id = ?1", params![duty_id])?;
        if affected == 0 {
            return Err(RosterError::DutyNotFound {
                id: duty_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn duty_count(&self) -> RosterResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM duty", [], |row| row.get(0))
            .map_err(Into::into)
    }
}
