//! Typed action-log events.
//!
//! RULE: Every mutating engine operation appends exactly one event.
//! Variants are added as features land — never removed or reordered.

use crate::person::PersonStatus;
use crate::types::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RosterEvent {
    PersonAdded {
        person_id: EntityId,
    },
    PersonUpdated {
        person_id: EntityId,
    },
    PersonStatusChanged {
        person_id: EntityId,
        status: PersonStatus,
    },
    PersonRemoved {
        person_id: EntityId,
    },
    DutyCreated {
        duty_id: EntityId,
        duty_type: String,
    },
    DutyUpdated {
        duty_id: EntityId,
    },
    DutyRemoved {
        duty_id: EntityId,
    },
    AssignmentCreated {
        assignment_id: EntityId,
        duty_id: EntityId,
        person_id: EntityId,
    },
    AssignmentsAllocated {
        duty_id: EntityId,
        filled: usize,
        unfilled: usize,
    },
    AssignmentsCleared {
        duty_id: EntityId,
    },
    AssignmentRemoved {
        assignment_id: EntityId,
    },
    AssignmentReplaced {
        assignment_id: EntityId,
        original_person_id: EntityId,
        replacement_person_id: EntityId,
    },
    SettingsUpdated,
    SnapshotImported {
        people: usize,
        duties: usize,
    },
    DataCleared,
}

impl RosterEvent {
    /// Stable string name for the event_type column.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::PersonAdded { .. } => "person_added",
            Self::PersonUpdated { .. } => "person_updated",
            Self::PersonStatusChanged { .. } => "person_status_changed",
            Self::PersonRemoved { .. } => "person_removed",
            Self::DutyCreated { .. } => "duty_created",
            Self::DutyUpdated { .. } => "duty_updated",
            Self::DutyRemoved { .. } => "duty_removed",
            Self::AssignmentCreated { .. } => "assignment_created",
            Self::AssignmentsAllocated { .. } => "assignments_allocated",
            Self::AssignmentsCleared { .. } => "assignments_cleared",
            Self::AssignmentRemoved { .. } => "assignment_removed",
            Self::AssignmentReplaced { .. } => "assignment_replaced",
            Self::SettingsUpdated => "settings_updated",
            Self::SnapshotImported { .. } => "snapshot_imported",
            Self::DataCleared => "data_cleared",
        }
    }

    /// (entity_type, entity_id) for the log columns.
    pub fn entity_ref(&self) -> (&'static str, &str) {
        match self {
            Self::PersonAdded { person_id }
            | Self::PersonUpdated { person_id }
            | Self::PersonStatusChanged { person_id, .. }
            | Self::PersonRemoved { person_id } => ("person", person_id),
            Self::DutyCreated { duty_id, .. }
            | Self::DutyUpdated { duty_id }
            | Self::DutyRemoved { duty_id }
            | Self::AssignmentsAllocated { duty_id, .. }
            | Self::AssignmentsCleared { duty_id } => ("duty", duty_id),
            Self::AssignmentCreated { assignment_id, .. }
            | Self::AssignmentRemoved { assignment_id }
            | Self::AssignmentReplaced { assignment_id, .. } => ("assignment", assignment_id),
            Self::SettingsUpdated => ("settings", ""),
            Self::SnapshotImported { .. } | Self::DataCleared => ("store", ""),
        }
    }
}

/// An action-log row as persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub id: Option<i64>,
    pub event_type: String,
    pub entity_type: String,
    pub entity_id: EntityId,
    pub payload: String, // JSON-serialized RosterEvent
    pub created_at: DateTime<Utc>,
}
