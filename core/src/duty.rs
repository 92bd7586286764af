//! Duty shifts, assignment records, and the replacement audit entry.
//!
//! Duty types and role labels are open string tags validated against the
//! settings allow-lists on write. The assignment core is agnostic to tag
//! values except for the single reserved headquarters comparison.

use crate::types::EntityId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The one reserved duty type: headquarters duty additionally requires
/// the person's staff_duty_capable flag.
pub const HEADQUARTERS_DUTY: &str = "headquarters_duty";

/// A scheduled shift requiring one person per role label on a given date.
///
/// `roles.len()` bounds how many people are assignable; `max_personnel`
/// is the declared capacity and conventionally equals it, but the two
/// are independent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DutyRecord {
    pub id: EntityId,
    pub duty_type: String,
    pub date: NaiveDate,
    pub max_personnel: u32,
    pub roles: Vec<String>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a duty; the engine stamps id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDuty {
    pub duty_type: String,
    pub date: NaiveDate,
    pub max_personnel: u32,
    pub roles: Vec<String>,
    pub comment: Option<String>,
}

/// One filled slot: binds one person to one role within one duty.
///
/// This is the single source of truth — a duty's crew and a person's
/// history are both queries over these rows. When a replacement is
/// recorded the row is mutated in place: `person_id` becomes the new
/// occupant and the replacement metadata is attached, so the row always
/// shows the CURRENT occupant. The original occupant survives only in
/// the replacement log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssignmentRecord {
    pub id: EntityId,
    pub duty_id: EntityId,
    pub person_id: EntityId,
    pub role: String,
    pub date: NaiveDate,
    pub replaced_by: Option<EntityId>,
    pub replacement_reason: Option<String>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Immutable audit row written once per replacement, never mutated.
/// Survives deletion of the people and duty it mentions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplacementEntry {
    pub id: EntityId,
    pub duty_id: EntityId,
    pub original_person_id: EntityId,
    pub replacement_person_id: EntityId,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}
