//! Replacement recorder tests: occupant swap, audit logging, NotFound
//! behavior, and audit survival across deletions.

use chrono::NaiveDate;
use roster_core::{
    clock::FixedClock,
    duty::NewDuty,
    engine::RosterEngine,
    error::RosterError,
    ident::SeqIdGen,
    person::{NewPerson, PersonStatus, Rank},
    store::RosterStore,
};

fn build_engine() -> RosterEngine {
    let store = RosterStore::in_memory().expect("open in-memory store");
    store.migrate().expect("apply migrations");
    RosterEngine::with_parts(
        store,
        Box::new(SeqIdGen::new("t")),
        Box::new(FixedClock::at_midnight(2024, 3, 1)),
    )
}

fn new_person(last_name: &str) -> NewPerson {
    NewPerson {
        last_name: last_name.to_string(),
        first_name: "John".to_string(),
        middle_name: "Alan".to_string(),
        rank: Rank::Private,
        position: "rifleman".to_string(),
        phone: String::new(),
        room: String::new(),
        platoon: "1".to_string(),
        status: PersonStatus::Active,
        staff_duty_capable: false,
    }
}

fn new_duty(day: u32) -> NewDuty {
    NewDuty {
        duty_type: "company_duty".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, day).expect("valid day"),
        max_personnel: 1,
        roles: vec!["orderly".to_string()],
        comment: None,
    }
}

/// Scenario: replace P1 with P2 for illness. The record now shows P2
/// with the metadata attached, and the log holds both ids.
#[test]
fn replace_rewrites_occupant_and_logs() {
    let mut engine = build_engine();
    let p1 = engine.add_person(new_person("Original")).unwrap();
    let p2 = engine.add_person(new_person("Substitute")).unwrap();
    let duty = engine.add_duty(new_duty(5)).unwrap();
    let assignment = engine.assign_person(&duty.id, &p1.id, "orderly").unwrap();

    let log_entry = engine
        .replace_assignment(&assignment.id, &p2.id, "illness")
        .unwrap();

    let updated = engine.store.get_assignment(&assignment.id).unwrap();
    assert_eq!(updated.person_id, p2.id);
    assert_eq!(updated.replaced_by.as_deref(), Some(p2.id.as_str()));
    assert_eq!(updated.replacement_reason.as_deref(), Some("illness"));

    assert_eq!(log_entry.duty_id, duty.id);
    assert_eq!(log_entry.original_person_id, p1.id);
    assert_eq!(log_entry.replacement_person_id, p2.id);
    assert_eq!(log_entry.reason, "illness");
    assert_eq!(engine.store.replacement_count().unwrap(), 1);
}

/// Scenario: unknown assignment id. NotFound, no mutation, no log row.
#[test]
fn replace_unknown_assignment_is_not_found() {
    let mut engine = build_engine();
    let p2 = engine.add_person(new_person("Substitute")).unwrap();

    let err = engine
        .replace_assignment("no-such-assignment", &p2.id, "illness")
        .unwrap_err();

    assert!(matches!(err, RosterError::AssignmentNotFound { .. }));
    assert_eq!(
        engine.store.replacement_count().unwrap(),
        0,
        "failed replacement must not log"
    );
}

/// An unknown incoming person fails before any write: the assignment
/// keeps its original occupant and the log stays empty.
#[test]
fn replace_unknown_person_leaves_assignment_untouched() {
    let mut engine = build_engine();
    let p1 = engine.add_person(new_person("Original")).unwrap();
    let duty = engine.add_duty(new_duty(6)).unwrap();
    let assignment = engine.assign_person(&duty.id, &p1.id, "orderly").unwrap();

    let err = engine
        .replace_assignment(&assignment.id, "no-such-person", "illness")
        .unwrap_err();

    assert!(matches!(err, RosterError::PersonNotFound { .. }));
    let unchanged = engine.store.get_assignment(&assignment.id).unwrap();
    assert_eq!(unchanged.person_id, p1.id);
    assert_eq!(unchanged.replaced_by, None);
    assert_eq!(engine.store.replacement_count().unwrap(), 0);
}

/// Under the single-table model the mutated row re-homes to the new
/// occupant: it appears in P2's history (with the metadata) and leaves
/// P1's.
#[test]
fn replacement_rehomes_history_row() {
    let mut engine = build_engine();
    let p1 = engine.add_person(new_person("Original")).unwrap();
    let p2 = engine.add_person(new_person("Substitute")).unwrap();
    let duty = engine.add_duty(new_duty(7)).unwrap();
    let assignment = engine.assign_person(&duty.id, &p1.id, "orderly").unwrap();

    engine
        .replace_assignment(&assignment.id, &p2.id, "duty swap")
        .unwrap();

    assert!(engine.person_history(&p1.id).unwrap().is_empty());
    let history = engine.person_history(&p2.id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].replaced_by.as_deref(), Some(p2.id.as_str()));

    let stats = engine.person_stats(&p2.id).unwrap();
    assert_eq!(stats.total_duties, 1);
    assert_eq!(stats.replacements_made, 1);
    assert_eq!(engine.person_stats(&p1.id).unwrap().total_duties, 0);
}

/// Audit rows outlive the people and duty they mention; the report
/// degrades to raw ids instead of erroring.
#[test]
fn log_survives_person_and_duty_deletion() {
    let mut engine = build_engine();
    let p1 = engine.add_person(new_person("Original")).unwrap();
    let p2 = engine.add_person(new_person("Substitute")).unwrap();
    let duty = engine.add_duty(new_duty(8)).unwrap();
    let assignment = engine.assign_person(&duty.id, &p1.id, "orderly").unwrap();
    engine
        .replace_assignment(&assignment.id, &p2.id, "illness")
        .unwrap();

    engine.remove_duty(&duty.id).unwrap();
    engine.remove_person(&p1.id).unwrap();
    engine.remove_person(&p2.id).unwrap();

    assert_eq!(engine.store.replacement_count().unwrap(), 1);
    let report = engine.replacement_report().unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].duty_type, duty.id, "degrades to the raw duty id");
    assert_eq!(report[0].original, p1.id);
    assert_eq!(report[0].replacement, p2.id);
    assert_eq!(report[0].duty_date, None);
}
