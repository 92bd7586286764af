use crate::person::PersonStatus;
use crate::settings::AppSettings;
use crate::types::EntityId;
use serde::{Deserialize, Serialize};

/// All externally-issued mutating commands. This is the seam an
/// interactive front-end drives over IPC.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum RosterCommand {
    AutoAssignDuty {
        duty_id: EntityId,
    },
    ClearAssignments {
        duty_id: EntityId,
    },
    ReplaceAssignment {
        assignment_id: EntityId,
        new_person_id: EntityId,
        reason: String,
    },
    SetPersonStatus {
        person_id: EntityId,
        status: PersonStatus,
    },
    UpdateSettings {
        settings: AppSettings,
    },
    ClearAllData,
}

/// What a dispatched command did, reported back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    Assigned { duty_id: EntityId, filled: usize },
    Cleared { duty_id: EntityId },
    Replaced { replacement_id: EntityId },
    StatusSet { person_id: EntityId },
    SettingsSaved,
    DataCleared,
}
