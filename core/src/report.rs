//! Reporting views: duty distribution, personnel load, and the
//! replacement audit report. Read-only; every row is serializable so a
//! front-end can render it directly.

use crate::error::RosterResult;
use crate::person::Rank;
use crate::stats::compute_stats;
use crate::store::RosterStore;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Serialize)]
pub struct DutyDistributionRow {
    pub duty_type: String,
    pub duty_count: usize,
    pub filled_slots: usize,
}

/// Per duty-type: how many shifts exist and how many slots are filled.
/// Sorted by type name.
pub fn duty_distribution(store: &RosterStore) -> RosterResult<Vec<DutyDistributionRow>> {
    let duties = store.all_duties()?;
    let assignments = store.all_assignments()?;
    let type_of: HashMap<&str, &str> = duties
        .iter()
        .map(|d| (d.id.as_str(), d.duty_type.as_str()))
        .collect();

    let mut rows: BTreeMap<String, DutyDistributionRow> = BTreeMap::new();
    for duty in &duties {
        rows.entry(duty.duty_type.clone())
            .or_insert_with(|| DutyDistributionRow {
                duty_type: duty.duty_type.clone(),
                duty_count: 0,
                filled_slots: 0,
            })
            .duty_count += 1;
    }
    for assignment in &assignments {
        if let Some(duty_type) = type_of.get(assignment.duty_id.as_str()) {
            if let Some(row) = rows.get_mut(*duty_type) {
                row.filled_slots += 1;
            }
        }
    }
    Ok(rows.into_values().collect())
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonnelLoadRow {
    pub person_id: String,
    pub short_name: String,
    pub rank: Rank,
    pub total_duties: usize,
    pub duties_by_role: HashMap<String, usize>,
    pub last_duty_date: Option<NaiveDate>,
    pub replacements_made: usize,
    pub replacements_received: usize,
}

/// Per person, heaviest burden first. `replacements_received` comes from
/// the replacement log — the stats aggregator leaves it at zero.
pub fn personnel_load(store: &RosterStore) -> RosterResult<Vec<PersonnelLoadRow>> {
    let people = store.all_people()?;
    let duties = store.all_duties()?;
    let histories = store.histories_by_person()?;

    let mut rows = Vec::with_capacity(people.len());
    for person in &people {
        let history = histories
            .get(&person.id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let stats = compute_stats(&person.id, history, &duties);
        let received = store.replacements_received_count(&person.id)? as usize;
        rows.push(PersonnelLoadRow {
            person_id: person.id.clone(),
            short_name: person.short_name(),
            rank: person.rank,
            total_duties: stats.total_duties,
            duties_by_role: stats.duties_by_role,
            last_duty_date: stats.last_duty_date,
            replacements_made: stats.replacements_made,
            replacements_received: received,
        });
    }
    rows.sort_by(|a, b| {
        b.total_duties
            .cmp(&a.total_duties)
            .then_with(|| a.short_name.cmp(&b.short_name))
    });
    Ok(rows)
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplacementRow {
    pub replacement_id: String,
    pub duty_type: String,
    pub duty_date: Option<NaiveDate>,
    pub original: String,
    pub replacement: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// The full replacement log, newest first, with names and duty details
/// resolved. Entries referencing since-deleted duties or people degrade
/// to the raw ids — the log never errors on dangling references.
pub fn replacement_report(store: &RosterStore) -> RosterResult<Vec<ReplacementRow>> {
    let people = store.all_people()?;
    let duties = store.all_duties()?;
    let short_names: HashMap<&str, String> = people
        .iter()
        .map(|p| (p.id.as_str(), p.short_name()))
        .collect();

    let rows = store
        .all_replacements()?
        .into_iter()
        .map(|entry| {
            let duty = duties.iter().find(|d| d.id == entry.duty_id);
            ReplacementRow {
                duty_type: duty
                    .map(|d| d.duty_type.clone())
                    .unwrap_or_else(|| entry.duty_id.clone()),
                duty_date: duty.map(|d| d.date),
                original: short_names
                    .get(entry.original_person_id.as_str())
                    .cloned()
                    .unwrap_or_else(|| entry.original_person_id.clone()),
                replacement: short_names
                    .get(entry.replacement_person_id.as_str())
                    .cloned()
                    .unwrap_or_else(|| entry.replacement_person_id.clone()),
                replacement_id: entry.id,
                reason: entry.reason,
                created_at: entry.created_at,
            }
        })
        .collect();
    Ok(rows)
}
