//! Personnel table queries.

use super::{bad_text, parse_ts, ts_sql, RosterStore};
use crate::error::{RosterError, RosterResult};
use crate::person::{PersonRecord, PersonStatus, Rank};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

const PERSON_COLUMNS: &str = "person_id, last_name, first_name, middle_name, rank, position,
            phone, room, platoon, status, staff_duty_capable, created_at, updated_at";

fn person_row_mapper(row: &Row) -> rusqlite::Result<PersonRecord> {
    let rank: String = row.get(4)?;
    let status: String = row.get(9)?;
    Ok(PersonRecord {
        id: row.get(0)?,
        last_name: row.get(1)?,
        first_name: row.get(2)?,
        middle_name: row.get(3)?,
        rank: Rank::parse(&rank).ok_or_else(|| bad_text(4, format!("unknown rank: {rank}")))?,
        position: row.get(5)?,
        phone: row.get(6)?,
        room: row.get(7)?,
        platoon: row.get(8)?,
        status: PersonStatus::parse(&status)
            .ok_or_else(|| bad_text(9, format!("unknown status: {status}")))?,
        staff_duty_capable: row.get::<_, i32>(10)? != 0,
        created_at: parse_ts(11, &row.get::<_, String>(11)?)?,
        updated_at: parse_ts(12, &row.get::<_, String>(12)?)?,
    })
}

impl RosterStore {
    pub fn insert_person(&self, p: &PersonRecord) -> RosterResult<()> {
        self.conn.execute(
            "INSERT INTO person (
                person_id, last_name, first_name, middle_name, rank, position,
                phone, room, platoon, status, staff_duty_capable, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                &p.id,
                &p.last_name,
                &p.first_name,
                &p.middle_name,
                p.rank.as_str(),
                &p.position,
                &p.phone,
                &p.room,
                &p.platoon,
                p.status.as_str(),
                if p.staff_duty_capable { 1 } else { 0 },
                ts_sql(p.created_at),
                ts_sql(p.updated_at),
            ],
        )?;
        Ok(())
    }

    pub fn update_person(&self, p: &PersonRecord) -> RosterResult<()> {
        let affected = self.conn.execute(
            "UPDATE person SET
                last_name = ?2, first_name = ?3, middle_name = ?4, rank = ?5,
                position = ?6, phone = ?7, room = ?8, platoon = ?9, status = ?10,
                staff_duty_capable = ?11, updated_at = ?12
             WHERE person_id = ?1",
            params![
                &p.id,
                &p.last_name,
                &p.first_name,
                &p.middle_name,
                p.rank.as_str(),
                &p.position,
                &p.phone,
                &p.room,
                &p.platoon,
                p.status.as_str(),
                if p.staff_duty_capable { 1 } else { 0 },
                ts_sql(p.updated_at),
            ],
        )?;
        if affected == 0 {
            return Err(RosterError::PersonNotFound { id: p.id.clone() });
        }
        Ok(())
    }

    pub fn set_person_status(
        &self,
        person_id: &str,
        status: PersonStatus,
        now: DateTime<Utc>,
    ) -> RosterResult<()> {
        let affected = self.conn.execute(
            "UPDATE person SET status = ?2, updated_at = ?3 WHERE person_id = ?1",
            params![person_id, status.as_str(), ts_sql(now)],
        )?;
        if affected == 0 {
            return Err(RosterError::PersonNotFound {
                id: person_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn get_person(&self, person_id: &str) -> RosterResult<PersonRecord> {
        self.conn
            .query_row(
                &format!("SELECT {PERSON_COLUMNS} FROM person WHERE person_id = ?1"),
                params![person_id],
                person_row_mapper,
            )
            .optional()?
            .ok_or_else(|| RosterError::PersonNotFound {
                id: person_id.to_string(),
            })
    }

    /// Full roster in insertion order. The ranking sort is stable, so
    /// this order is what breaks true ties — keep it deterministic.
    pub fn all_people(&self) -> RosterResult<Vec<PersonRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PERSON_COLUMNS} FROM person ORDER BY rowid ASC"
        ))?;
        let rows = stmt.query_map([], person_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Removes the person and, via FK cascade, their assignment rows.
    /// Replacement-log rows mentioning them survive.
    pub fn delete_person(&self, person_id: &str) -> RosterResult<()> {
        let affected = self
            .conn
            .execute("DELETE FROM person WHERE person_id = ?1", params![person_id])?;
        if affected == 0 {
            return Err(RosterError::PersonNotFound {
                id: person_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn person_count(&self) -> RosterResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM person", [], |row| row.get(0))
            .map_err(Into::into)
    }
}
