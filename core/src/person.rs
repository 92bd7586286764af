//! Personnel records: identity, rank, availability status, and the
//! staff-duty capability flag consulted by the assignment engine.
//!
//! A person's duty history is NOT embedded here. It is a query over the
//! assignment table (see store::assignment), so the roster view and the
//! duty view can never drift apart.

use crate::types::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonRecord {
    pub id: EntityId,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub rank: Rank,
    pub position: String,
    pub phone: String,
    pub room: String,
    pub platoon: String,
    pub status: PersonStatus,
    pub staff_duty_capable: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PersonRecord {
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.last_name, self.first_name, self.middle_name)
    }

    /// "Lastname F.M." — the form used in reports and summaries.
    pub fn short_name(&self) -> String {
        let mut name = self.last_name.clone();
        if let Some(initial) = self.first_name.chars().next() {
            name.push(' ');
            name.push(initial);
            name.push('.');
        }
        if let Some(initial) = self.middle_name.chars().next() {
            name.push(initial);
            name.push('.');
        }
        name
    }

    pub fn is_available(&self) -> bool {
        self.status == PersonStatus::Active
    }
}

/// Input for creating a person; the engine stamps id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPerson {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub rank: Rank,
    pub position: String,
    pub phone: String,
    pub room: String,
    pub platoon: String,
    pub status: PersonStatus,
    pub staff_duty_capable: bool,
}

/// Availability status. Only Active personnel are eligible for duty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PersonStatus {
    Active,
    OnLeave,
    Hospitalized,
    OnPass,
    Discharged,
}

impl PersonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OnLeave => "on_leave",
            Self::Hospitalized => "hospitalized",
            Self::OnPass => "on_pass",
            Self::Discharged => "discharged",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "on_leave" => Some(Self::OnLeave),
            "hospitalized" => Some(Self::Hospitalized),
            "on_pass" => Some(Self::OnPass),
            "discharged" => Some(Self::Discharged),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Private,
    Corporal,
    JuniorSergeant,
    Sergeant,
    SeniorSergeant,
    SergeantMajor,
    WarrantOfficer,
    SeniorWarrantOfficer,
    JuniorLieutenant,
    Lieutenant,
    SeniorLieutenant,
    Captain,
    Major,
    LieutenantColonel,
    Colonel,
}

impl Rank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Corporal => "corporal",
            Self::JuniorSergeant => "junior_sergeant",
            Self::Sergeant => "sergeant",
            Self::SeniorSergeant => "senior_sergeant",
            Self::SergeantMajor => "sergeant_major",
            Self::WarrantOfficer => "warrant_officer",
            Self::SeniorWarrantOfficer => "senior_warrant_officer",
            Self::JuniorLieutenant => "junior_lieutenant",
            Self::Lieutenant => "lieutenant",
            Self::SeniorLieutenant => "senior_lieutenant",
            Self::Captain => "captain",
            Self::Major => "major",
            Self::LieutenantColonel => "lieutenant_colonel",
            Self::Colonel => "colonel",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "private" => Some(Self::Private),
            "corporal" => Some(Self::Corporal),
            "junior_sergeant" => Some(Self::JuniorSergeant),
            "sergeant" => Some(Self::Sergeant),
            "senior_sergeant" => Some(Self::SeniorSergeant),
            "sergeant_major" => Some(Self::SergeantMajor),
            "warrant_officer" => Some(Self::WarrantOfficer),
            "senior_warrant_officer" => Some(Self::SeniorWarrantOfficer),
            "junior_lieutenant" => Some(Self::JuniorLieutenant),
            "lieutenant" => Some(Self::Lieutenant),
            "senior_lieutenant" => Some(Self::SeniorLieutenant),
            "captain" => Some(Self::Captain),
            "major" => Some(Self::Major),
            "lieutenant_colonel" => Some(Self::LieutenantColonel),
            "colonel" => Some(Self::Colonel),
            _ => None,
        }
    }
}
