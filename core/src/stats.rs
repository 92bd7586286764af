//! Per-person duty statistics — the input to fairness ranking and the
//! reporting views.
//!
//! Pure computation over already-fetched rows. The duty catalog is used
//! only to map duty ids to types; a history entry pointing at a duty
//! missing from the catalog is skipped for the per-type count (it still
//! counts toward the total and the per-role breakdown).

use crate::duty::{AssignmentRecord, DutyRecord};
use crate::types::EntityId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonStats {
    pub person_id: EntityId,
    pub total_duties: usize,
    pub duties_by_type: HashMap<String, usize>,
    pub duties_by_role: HashMap<String, usize>,
    pub last_duty_date: Option<NaiveDate>,
    pub replacements_made: usize,
    /// Not computed here; the report layer derives it from the
    /// replacement log. Always zero in this struct.
    pub replacements_received: usize,
}

/// Aggregate one person's history. O(history) plus one hash lookup per
/// entry against the duty catalog.
///
/// `last_duty_date` is the maximum date over all entries — history rows
/// are append-ordered, not chronological, so position means nothing.
pub fn compute_stats(
    person_id: &str,
    history: &[AssignmentRecord],
    all_duties: &[DutyRecord],
) -> PersonStats {
    let type_of: HashMap<&str, &str> = all_duties
        .iter()
        .map(|d| (d.id.as_str(), d.duty_type.as_str()))
        .collect();

    let mut duties_by_type: HashMap<String, usize> = HashMap::new();
    let mut duties_by_role: HashMap<String, usize> = HashMap::new();
    let mut last_duty_date: Option<NaiveDate> = None;
    let mut replacements_made = 0;

    for entry in history {
        if let Some(duty_type) = type_of.get(entry.duty_id.as_str()) {
            *duties_by_type.entry((*duty_type).to_string()).or_insert(0) += 1;
        }
        *duties_by_role.entry(entry.role.clone()).or_insert(0) += 1;

        if last_duty_date.map_or(true, |d| entry.date > d) {
            last_duty_date = Some(entry.date);
        }
        if entry.replaced_by.is_some() {
            replacements_made += 1;
        }
    }

    PersonStats {
        person_id: person_id.to_string(),
        total_duties: history.len(),
        duties_by_type,
        duties_by_role,
        last_duty_date,
        replacements_made,
        replacements_received: 0,
    }
}
