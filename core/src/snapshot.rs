//! Snapshot export/import — the full roster state as one JSON document,
//! one array per top-level collection. This is the backup/restore
//! format; import is all-or-nothing.

use crate::clock::Clock;
use crate::duty::{AssignmentRecord, DutyRecord, ReplacementEntry};
use crate::error::{RosterError, RosterResult};
use crate::person::PersonRecord;
use crate::settings::AppSettings;
use crate::store::RosterStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub exported_at: DateTime<Utc>,
    pub settings: AppSettings,
    pub people: Vec<PersonRecord>,
    pub duties: Vec<DutyRecord>,
    pub assignments: Vec<AssignmentRecord>,
    pub replacements: Vec<ReplacementEntry>,
}

pub fn export(store: &RosterStore, clock: &dyn Clock) -> RosterResult<RosterSnapshot> {
    Ok(RosterSnapshot {
        exported_at: clock.now(),
        settings: store.load_settings()?,
        people: store.all_people()?,
        duties: store.all_duties()?,
        assignments: store.all_assignments()?,
        replacements: store.all_replacements()?,
    })
}

/// Validate, wipe, insert. The store is untouched when validation
/// fails: every assignment must reference a person and a duty present
/// in the document.
pub fn import(store: &RosterStore, snap: &RosterSnapshot) -> RosterResult<()> {
    let person_ids: HashSet<&str> = snap.people.iter().map(|p| p.id.as_str()).collect();
    let duty_ids: HashSet<&str> = snap.duties.iter().map(|d| d.id.as_str()).collect();
    for assignment in &snap.assignments {
        if !duty_ids.contains(assignment.duty_id.as_str()) {
            return Err(RosterError::SnapshotIntegrity {
                detail: format!(
                    "assignment '{}' references missing duty '{}'",
                    assignment.id, assignment.duty_id
                ),
            });
        }
        if !person_ids.contains(assignment.person_id.as_str()) {
            return Err(RosterError::SnapshotIntegrity {
                detail: format!(
                    "assignment '{}' references missing person '{}'",
                    assignment.id, assignment.person_id
                ),
            });
        }
    }

    store.wipe_data()?;
    store.save_settings(&snap.settings)?;
    for person in &snap.people {
        store.insert_person(person)?;
    }
    for duty in &snap.duties {
        store.insert_duty(duty)?;
    }
    for assignment in &snap.assignments {
        store.insert_assignment(assignment)?;
    }
    // The export lists replacements newest first; re-insert oldest
    // first so append order survives the round trip.
    for entry in snap.replacements.iter().rev() {
        store.append_replacement(entry)?;
    }
    Ok(())
}
