//! The duty auto-assignment engine: eligibility filter, fairness
//! ranking, and the slot allocator.
//!
//! All three are pure functions over already-fetched rows. The engine
//! facade fetches, calls these, and persists the result; nothing here
//! touches the store.

use crate::clock::Clock;
use crate::duty::{AssignmentRecord, DutyRecord, HEADQUARTERS_DUTY};
use crate::ident::IdGen;
use crate::person::PersonRecord;
use crate::stats::{compute_stats, PersonStats};
use crate::types::EntityId;
use std::collections::HashMap;

/// A person is eligible iff they are Active; headquarters duty
/// additionally requires the staff-duty capability flag. No other duty
/// type imposes extra filtering. An empty result is normal, not an
/// error — the allocator then assigns nobody.
pub fn eligible<'a>(duty: &DutyRecord, roster: &'a [PersonRecord]) -> Vec<&'a PersonRecord> {
    roster
        .iter()
        .filter(|p| p.is_available())
        .filter(|p| duty.duty_type != HEADQUARTERS_DUTY || p.staff_duty_capable)
        .collect()
}

pub struct RankedCandidate<'a> {
    pub person: &'a PersonRecord,
    pub stats: PersonStats,
}

/// Order candidates lightest-burden first: ascending total duty count,
/// ties broken by oldest last-duty date with never-assigned ordering
/// before any real date. The sort is stable — truly tied candidates
/// keep their input order, so the same inputs always produce the same
/// sequence.
pub fn rank<'a>(
    candidates: Vec<&'a PersonRecord>,
    histories: &HashMap<EntityId, Vec<AssignmentRecord>>,
    all_duties: &[DutyRecord],
) -> Vec<RankedCandidate<'a>> {
    let mut ranked: Vec<RankedCandidate<'a>> = candidates
        .into_iter()
        .map(|person| {
            let history = histories
                .get(&person.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            RankedCandidate {
                stats: compute_stats(&person.id, history, all_duties),
                person,
            }
        })
        .collect();

    // Option<NaiveDate> orders None before any Some, which is exactly
    // the never-assigned rule.
    ranked.sort_by(|a, b| {
        a.stats
            .total_duties
            .cmp(&b.stats.total_duties)
            .then_with(|| a.stats.last_duty_date.cmp(&b.stats.last_duty_date))
    });
    ranked
}

/// Fill the duty's role slots position-for-position: the i-th ranked
/// person takes the i-th role label. Fewer candidates than labels means
/// the trailing labels stay unfilled — a silent partial outcome.
///
/// Each record gets a fresh id, the duty's date, and creation
/// timestamps. Persisting the records (and thereby updating both the
/// duty view and each person's history view) is the caller's job.
pub fn auto_assign(
    duty: &DutyRecord,
    roster: &[PersonRecord],
    histories: &HashMap<EntityId, Vec<AssignmentRecord>>,
    all_duties: &[DutyRecord],
    ids: &mut dyn IdGen,
    clock: &dyn Clock,
) -> Vec<AssignmentRecord> {
    let ranked = rank(eligible(duty, roster), histories, all_duties);
    let now = clock.now();

    duty.roles
        .iter()
        .zip(ranked.iter())
        .map(|(role, candidate)| AssignmentRecord {
            id: ids.next_id(),
            duty_id: duty.id.clone(),
            person_id: candidate.person.id.clone(),
            role: role.clone(),
            date: duty.date,
            replaced_by: None,
            replacement_reason: None,
            comment: None,
            created_at: now,
            updated_at: now,
        })
        .collect()
}
