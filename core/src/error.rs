use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Person '{id}' not found")]
    PersonNotFound { id: String },

    #[error("Duty '{id}' not found")]
    DutyNotFound { id: String },

    #[error("Assignment '{id}' not found")]
    AssignmentNotFound { id: String },

    #[error("{kind} '{value}' is not in the configured allow-list")]
    TagNotAllowed { kind: &'static str, value: String },

    #[error("Auto-assignment is disabled in settings")]
    AutoAssignDisabled,

    #[error("Snapshot failed integrity check: {detail}")]
    SnapshotIntegrity { detail: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type RosterResult<T> = Result<T, RosterError>;
