//! Assignment table queries — the single source of truth for both the
//! duty view ("who is on this shift") and the person view ("this
//! person's duty history").

use super::{date_sql, parse_date, parse_ts, ts_sql, RosterStore};
use crate::duty::AssignmentRecord;
use crate::error::{RosterError, RosterResult};
use crate::types::EntityId;
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use std::collections::HashMap;

const ASSIGNMENT_COLUMNS: &str = "assignment_id, duty_id, person_id, role, date,
            replaced_by, replacement_reason, comment, created_at, updated_at";

fn assignment_row_mapper(row: &Row) -> rusqlite::Result<AssignmentRecord> {
    Ok(AssignmentRecord {
        id: row.get(0)?,
        duty_id: row.get(1)?,
        person_id: row.get(2)?,
        role: row.get(3)?,
        date: parse_date(4, &row.get::<_, String>(4)?)?,
        replaced_by: row.get(5)?,
        replacement_reason: row.get(6)?,
        comment: row.get(7)?,
        created_at: parse_ts(8, &row.get::<_, String>(8)?)?,
        updated_at: parse_ts(9, &row.get::<_, String>(9)?)?,
    })
}

impl RosterStore {
    pub fn insert_assignment(&self, a: &AssignmentRecord) -> RosterResult<()> {
        self.conn.execute(
            "INSERT INTO assignment (
                assignment_id, duty_id, person_id, role, date,
                replaced_by, replacement_reason, comment, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                &a.id,
                &a.duty_id,
                &a.person_id,
                &a.role,
                date_sql(a.date),
                a.replaced_by.as_deref(),
                a.replacement_reason.as_deref(),
                a.comment.as_deref(),
                ts_sql(a.created_at),
                ts_sql(a.updated_at),
            ],
        )?;
        Ok(())
    }

    pub fn get_assignment(&self, assignment_id: &str) -> RosterResult<AssignmentRecord> {
        self.conn
            .query_row(
                &format!("SELECT {ASSIGNMENT_COLUMNS} FROM assignment WHERE assignment_id = ?1"),
                params![assignment_id],
                assignment_row_mapper,
            )
            .optional()?
            .ok_or_else(|| RosterError::AssignmentNotFound {
                id: assignment_id.to_string(),
            })
    }

    /// A duty's filled slots in allocation order.
    pub fn assignments_for_duty(&self, duty_id: &str) -> RosterResult<Vec<AssignmentRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignment WHERE duty_id = ?1 ORDER BY rowid ASC"
        ))?;
        let rows = stmt.query_map(params![duty_id], assignment_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// A person's duty history. Append-ordered, NOT chronological —
    /// replacements re-home rows out of date order, so consumers that
    /// need chronology must sort by date.
    pub fn assignments_for_person(&self, person_id: &str) -> RosterResult<Vec<AssignmentRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignment WHERE person_id = ?1 ORDER BY rowid ASC"
        ))?;
        let rows = stmt.query_map(params![person_id], assignment_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn all_assignments(&self) -> RosterResult<Vec<AssignmentRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignment ORDER BY rowid ASC"
        ))?;
        let rows = stmt.query_map([], assignment_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Every person's history in one pass, for the ranking step.
    pub fn histories_by_person(&self) -> RosterResult<HashMap<EntityId, Vec<AssignmentRecord>>> {
        let mut histories: HashMap<EntityId, Vec<AssignmentRecord>> = HashMap::new();
        for assignment in self.all_assignments()? {
            histories
                .entry(assignment.person_id.clone())
                .or_default()
                .push(assignment);
        }
        Ok(histories)
    }

    pub fn delete_assignments_for_duty(&self, duty_id: &str) -> RosterResult<usize> {
        let affected = self.conn.execute(
            "DELETE FROM assignment WHERE duty_id = ?1",
            params![duty_id],
        )?;
        Ok(affected)
    }

    pub fn delete_assignment(&self, assignment_id: &str) -> RosterResult<()> {
        let affected = self.conn.execute(
            "DELETE FROM assignment WHERE assignment_id = ?1",
            params![assignment_id],
        )?;
        if affected == 0 {
            return Err(RosterError::AssignmentNotFound {
                id: assignment_id.to_string(),
            });
        }
        Ok(())
    }

    /// Swap the occupant in place: the row keeps its identity and slot
    /// but now shows the new person, with the replacement metadata
    /// attached and the update timestamp bumped.
    pub fn replace_occupant(
        &self,
        assignment_id: &str,
        new_person_id: &str,
        reason: &str,
        now: DateTime<Utc>,
    ) -> RosterResult<()> {
        let affected = self.conn.execute(
            "UPDATE assignment SET
                person_id = ?2, replaced_by = ?2, replacement_reason = ?3, updated_at = ?4
             WHERE assignment_id = ?1",
            params![assignment_id, new_person_id, reason, ts_sql(now)],
        )?;
        if affected == 0 {
            return Err(RosterError::AssignmentNotFound {
                id: assignment_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn assignment_count(&self) -> RosterResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM assignment", [], |row| row.get(0))
            .map_err(Into::into)
    }
}
