//! The roster engine — the single entry point for every operation.
//!
//! RULES:
//!   - The engine owns the store plus the identity and clock seams.
//!   - Every mutating operation appends exactly one action-log event.
//!   - Duty types and role labels are validated against the settings
//!     allow-lists on write; the assignment core never re-checks them.
//!   - Re-running auto-assignment on a duty is a full re-deal: existing
//!     assignments are cleared first, never merged.

use crate::{
    assign,
    clock::{Clock, SystemClock},
    command::{CommandOutcome, RosterCommand},
    duty::{AssignmentRecord, DutyRecord, NewDuty, ReplacementEntry},
    error::{RosterError, RosterResult},
    event::{ActionLogEntry, RosterEvent},
    ident::{IdGen, UuidGen},
    person::{NewPerson, PersonRecord, PersonStatus},
    report::{self, DutyDistributionRow, PersonnelLoadRow, ReplacementRow},
    settings::AppSettings,
    snapshot::{self, RosterSnapshot},
    stats::{self, PersonStats},
    store::RosterStore,
};

pub struct RosterEngine {
    pub store: RosterStore,
    ids: Box<dyn IdGen>,
    clock: Box<dyn Clock>,
}

impl RosterEngine {
    /// Production wiring: UUID identities, system clock.
    pub fn new(store: RosterStore) -> Self {
        Self::with_parts(store, Box::new(UuidGen), Box::new(SystemClock))
    }

    /// Explicit wiring, used by tests to pin ids and time.
    pub fn with_parts(store: RosterStore, ids: Box<dyn IdGen>, clock: Box<dyn Clock>) -> Self {
        Self { store, ids, clock }
    }

    fn log_event(&self, event: &RosterEvent) -> RosterResult<()> {
        let (entity_type, entity_id) = event.entity_ref();
        self.store.append_action(&ActionLogEntry {
            id: None,
            event_type: event.type_name().to_string(),
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
            payload: serde_json::to_string(event)?,
            created_at: self.clock.now(),
        })
    }

    // ── Personnel ──────────────────────────────────────────────

    pub fn add_person(&mut self, new: NewPerson) -> RosterResult<PersonRecord> {
        let now = self.clock.now();
        let person = PersonRecord {
            id: self.ids.next_id(),
            last_name: new.last_name,
            first_name: new.first_name,
            middle_name: new.middle_name,
            rank: new.rank,
            position: new.position,
            phone: new.phone,
            room: new.room,
            platoon: new.platoon,
            status: new.status,
            staff_duty_capable: new.staff_duty_capable,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_person(&person)?;
        self.log_event(&RosterEvent::PersonAdded {
            person_id: person.id.clone(),
        })?;
        Ok(person)
    }

    /// Rewrites every mutable field; bumps the update timestamp.
    pub fn update_person(&mut self, person: &PersonRecord) -> RosterResult<PersonRecord> {
        let mut updated = person.clone();
        updated.updated_at = self.clock.now();
        self.store.update_person(&updated)?;
        self.log_event(&RosterEvent::PersonUpdated {
            person_id: updated.id.clone(),
        })?;
        Ok(updated)
    }

    pub fn set_person_status(&mut self, person_id: &str, status: PersonStatus) -> RosterResult<()> {
        self.store
            .set_person_status(person_id, status, self.clock.now())?;
        self.log_event(&RosterEvent::PersonStatusChanged {
            person_id: person_id.to_string(),
            status,
        })
    }

    /// Drops the person and their assignment rows. The replacement log
    /// keeps any rows mentioning them — audit outlives personnel churn.
    pub fn remove_person(&mut self, person_id: &str) -> RosterResult<()> {
        self.store.delete_person(person_id)?;
        self.log_event(&RosterEvent::PersonRemoved {
            person_id: person_id.to_string(),
        })
    }

    pub fn person(&self, person_id: &str) -> RosterResult<PersonRecord> {
        self.store.get_person(person_id)
    }

    pub fn roster(&self) -> RosterResult<Vec<PersonRecord>> {
        self.store.all_people()
    }

    // ── Duties ─────────────────────────────────────────────────

    pub fn add_duty(&mut self, new: NewDuty) -> RosterResult<DutyRecord> {
        let settings = self.store.load_settings()?;
        Self::check_tags(&settings, &new.duty_type, &new.roles)?;

        let now = self.clock.now();
        let duty = DutyRecord {
            id: self.ids.next_id(),
            duty_type: new.duty_type,
            date: new.date,
            max_personnel: new.max_personnel,
            roles: new.roles,
            comment: new.comment,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_duty(&duty)?;
        self.log_event(&RosterEvent::DutyCreated {
            duty_id: duty.id.clone(),
            duty_type: duty.duty_type.clone(),
        })?;
        Ok(duty)
    }

    pub fn update_duty(&mut self, duty: &DutyRecord) -> RosterResult<DutyRecord> {
        let settings = self.store.load_settings()?;
        Self::check_tags(&settings, &duty.duty_type, &duty.roles)?;

        let mut updated = duty.clone();
        updated.updated_at = self.clock.now();
        self.store.update_duty(&updated)?;
        self.log_event(&RosterEvent::DutyUpdated {
            duty_id: updated.id.clone(),
        })?;
        Ok(updated)
    }

    /// Drops the duty and its assignment rows.
    pub fn remove_duty(&mut self, duty_id: &str) -> RosterResult<()> {
        self.store.delete_duty(duty_id)?;
        self.log_event(&RosterEvent::DutyRemoved {
            duty_id: duty_id.to_string(),
        })
    }

    pub fn duty(&self, duty_id: &str) -> RosterResult<DutyRecord> {
        self.store.get_duty(duty_id)
    }

    pub fn duties(&self) -> RosterResult<Vec<DutyRecord>> {
        self.store.all_duties()
    }

    pub fn duty_assignments(&self, duty_id: &str) -> RosterResult<Vec<AssignmentRecord>> {
        self.store.get_duty(duty_id)?;
        self.store.assignments_for_duty(duty_id)
    }

    fn check_tags(settings: &AppSettings, duty_type: &str, roles: &[String]) -> RosterResult<()> {
        if !settings.allows_duty_type(duty_type) {
            return Err(RosterError::TagNotAllowed {
                kind: "duty type",
                value: duty_type.to_string(),
            });
        }
        for role in roles {
            if !settings.allows_role(role) {
                return Err(RosterError::TagNotAllowed {
                    kind: "duty role",
                    value: role.clone(),
                });
            }
        }
        Ok(())
    }

    // ── Assignment ─────────────────────────────────────────────

    /// Manual assignment of one person to one role slot.
    pub fn assign_person(
        &mut self,
        duty_id: &str,
        person_id: &str,
        role: &str,
    ) -> RosterResult<AssignmentRecord> {
        let settings = self.store.load_settings()?;
        if !settings.allows_role(role) {
            return Err(RosterError::TagNotAllowed {
                kind: "duty role",
                value: role.to_string(),
            });
        }
        let duty = self.store.get_duty(duty_id)?;
        let person = self.store.get_person(person_id)?;

        let now = self.clock.now();
        let assignment = AssignmentRecord {
            id: self.ids.next_id(),
            duty_id: duty.id.clone(),
            person_id: person.id.clone(),
            role: role.to_string(),
            date: duty.date,
            replaced_by: None,
            replacement_reason: None,
            comment: None,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_assignment(&assignment)?;
        self.log_event(&RosterEvent::AssignmentCreated {
            assignment_id: assignment.id.clone(),
            duty_id: duty.id,
            person_id: person.id,
        })?;
        Ok(assignment)
    }

    pub fn remove_assignment(&mut self, assignment_id: &str) -> RosterResult<()> {
        self.store.delete_assignment(assignment_id)?;
        self.log_event(&RosterEvent::AssignmentRemoved {
            assignment_id: assignment_id.to_string(),
        })
    }

    /// Auto-fill the duty's role slots. Clears any existing assignments
    /// first (full re-deal), then filters, ranks, and pairs. Fewer
    /// eligible people than slots is a normal, silently-partial outcome.
    pub fn auto_assign_duty(&mut self, duty_id: &str) -> RosterResult<Vec<AssignmentRecord>> {
        let settings = self.store.load_settings()?;
        if !settings.auto_assign_enabled {
            return Err(RosterError::AutoAssignDisabled);
        }
        let duty = self.store.get_duty(duty_id)?;

        // Clear before fetching histories so the dropped rows cannot
        // influence this ranking pass.
        self.store.delete_assignments_for_duty(duty_id)?;

        let roster = self.store.all_people()?;
        let all_duties = self.store.all_duties()?;
        let histories = self.store.histories_by_person()?;

        let records = assign::auto_assign(
            &duty,
            &roster,
            &histories,
            &all_duties,
            self.ids.as_mut(),
            self.clock.as_ref(),
        );
        for record in &records {
            self.store.insert_assignment(record)?;
        }

        let unfilled = duty.roles.len() - records.len();
        self.log_event(&RosterEvent::AssignmentsAllocated {
            duty_id: duty.id.clone(),
            filled: records.len(),
            unfilled,
        })?;
        log::debug!(
            "duty {duty_id}: filled {} of {} role slots",
            records.len(),
            duty.roles.len()
        );
        Ok(records)
    }

    pub fn clear_assignments(&mut self, duty_id: &str) -> RosterResult<usize> {
        self.store.get_duty(duty_id)?;
        let cleared = self.store.delete_assignments_for_duty(duty_id)?;
        self.log_event(&RosterEvent::AssignmentsCleared {
            duty_id: duty_id.to_string(),
        })?;
        Ok(cleared)
    }

    /// Swap the occupant of an existing assignment and append the audit
    /// entry. Fails without any mutation when the assignment or the
    /// incoming person is unknown.
    pub fn replace_assignment(
        &mut self,
        assignment_id: &str,
        new_person_id: &str,
        reason: &str,
    ) -> RosterResult<ReplacementEntry> {
        let assignment = self.store.get_assignment(assignment_id)?;
        let new_person = self.store.get_person(new_person_id)?;

        let now = self.clock.now();
        self.store
            .replace_occupant(assignment_id, &new_person.id, reason, now)?;

        let entry = ReplacementEntry {
            id: self.ids.next_id(),
            duty_id: assignment.duty_id.clone(),
            original_person_id: assignment.person_id.clone(),
            replacement_person_id: new_person.id.clone(),
            reason: reason.to_string(),
            created_at: now,
        };
        self.store.append_replacement(&entry)?;
        self.log_event(&RosterEvent::AssignmentReplaced {
            assignment_id: assignment_id.to_string(),
            original_person_id: assignment.person_id,
            replacement_person_id: new_person.id,
        })?;
        Ok(entry)
    }

    // ── Statistics and reports ─────────────────────────────────

    pub fn person_stats(&self, person_id: &str) -> RosterResult<PersonStats> {
        let person = self.store.get_person(person_id)?;
        let history = self.store.assignments_for_person(&person.id)?;
        let all_duties = self.store.all_duties()?;
        Ok(stats::compute_stats(&person.id, &history, &all_duties))
    }

    pub fn person_history(&self, person_id: &str) -> RosterResult<Vec<AssignmentRecord>> {
        self.store.get_person(person_id)?;
        self.store.assignments_for_person(person_id)
    }

    pub fn duty_distribution(&self) -> RosterResult<Vec<DutyDistributionRow>> {
        report::duty_distribution(&self.store)
    }

    pub fn personnel_load(&self) -> RosterResult<Vec<PersonnelLoadRow>> {
        report::personnel_load(&self.store)
    }

    pub fn replacement_report(&self) -> RosterResult<Vec<ReplacementRow>> {
        report::replacement_report(&self.store)
    }

    // ── Settings ───────────────────────────────────────────────

    pub fn settings(&self) -> RosterResult<AppSettings> {
        self.store.load_settings()
    }

    pub fn update_settings(&mut self, settings: &AppSettings) -> RosterResult<()> {
        self.store.save_settings(settings)?;
        self.log_event(&RosterEvent::SettingsUpdated)
    }

    // ── Snapshot and bulk operations ───────────────────────────

    pub fn export_snapshot(&self) -> RosterResult<RosterSnapshot> {
        snapshot::export(&self.store, self.clock.as_ref())
    }

    /// All-or-nothing: validates referential integrity, wipes, inserts.
    pub fn import_snapshot(&mut self, snap: &RosterSnapshot) -> RosterResult<()> {
        snapshot::import(&self.store, snap)?;
        self.log_event(&RosterEvent::SnapshotImported {
            people: snap.people.len(),
            duties: snap.duties.len(),
        })
    }

    /// Wipes every data collection. Settings and the action log stay.
    pub fn clear_all_data(&mut self) -> RosterResult<()> {
        self.store.wipe_data()?;
        self.log_event(&RosterEvent::DataCleared)
    }

    // ── Command dispatch ───────────────────────────────────────

    pub fn handle_command(&mut self, command: RosterCommand) -> RosterResult<CommandOutcome> {
        match command {
            RosterCommand::AutoAssignDuty { duty_id } => {
                let records = self.auto_assign_duty(&duty_id)?;
                Ok(CommandOutcome::Assigned {
                    duty_id,
                    filled: records.len(),
                })
            }
            RosterCommand::ClearAssignments { duty_id } => {
                self.clear_assignments(&duty_id)?;
                Ok(CommandOutcome::Cleared { duty_id })
            }
            RosterCommand::ReplaceAssignment {
                assignment_id,
                new_person_id,
                reason,
            } => {
                let entry = self.replace_assignment(&assignment_id, &new_person_id, &reason)?;
                Ok(CommandOutcome::Replaced {
                    replacement_id: entry.id,
                })
            }
            RosterCommand::SetPersonStatus { person_id, status } => {
                self.set_person_status(&person_id, status)?;
                Ok(CommandOutcome::StatusSet { person_id })
            }
            RosterCommand::UpdateSettings { settings } => {
                self.update_settings(&settings)?;
                Ok(CommandOutcome::SettingsSaved)
            }
            RosterCommand::ClearAllData => {
                self.clear_all_data()?;
                Ok(CommandOutcome::DataCleared)
            }
        }
    }
}
