//! Snapshot export/import tests: the full-state round trip and the
//! all-or-nothing integrity check.

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
        rank: Rank::Corporal,
        position: "driver".to_string(),
        phone: String::new(),
        room: String::new(),
        platoon: "3".to_string(),
        status: PersonStatus::Active,
        staff_duty_capable: true,
    }
}

fn new_duty(day: u32, roles: &[&str]) -> NewDuty {
    NewDuty {
        duty_type: "company_duty".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, day).expect("valid day"),
        max_personnel: roles.len() as u32,
        roles: roles.iter().map(|r| r.to_string()).collect(),
        comment: None,
    }
}

fn populate(engine: &mut RosterEngine) {
    let p1 = engine.add_person(new_person("First")).unwrap();
    let p2 = engine.add_person(new_person("Second")).unwrap();
    let d1 = engine
        .add_duty(new_duty(5, &["duty_officer", "orderly"]))
        .unwrap();
    let d2 = engine.add_duty(new_duty(6, &["orderly"])).unwrap();

    engine.auto_assign_duty(&d1.id).unwrap();
    let manual = engine.assign_person(&d2.id, &p1.id, "orderly").unwrap();
    engine
        .replace_assignment(&manual.id, &p2.id, "illness")
        .unwrap();
}

#[test]
fn export_wipe_import_round_trip() {
    let mut engine = build_engine();
    populate(&mut engine);

    let people_before = engine.roster().unwrap();
    let stats_before: Vec<_> = people_before
        .iter()
        .map(|p| engine.person_stats(&p.id).unwrap())
        .collect();
    let replacements_before = engine.store.all_replacements().unwrap();

    let snapshot = engine.export_snapshot().unwrap();
    engine.clear_all_data().unwrap();
    assert_eq!(engine.store.person_count().unwrap(), 0);

    engine.import_snapshot(&snapshot).unwrap();

    assert_eq!(engine.roster().unwrap(), people_before);
    for (person, before) in people_before.iter().zip(stats_before.iter()) {
        assert_eq!(
            &engine.person_stats(&person.id).unwrap(),
            before,
            "stats must survive the round trip for {}",
            person.id
        );
    }
    assert_eq!(engine.store.all_replacements().unwrap(), replacements_before);
    assert_eq!(engine.settings().unwrap(), snapshot.settings);
}

#[test]
fn import_rejects_dangling_assignment() {
    let mut engine = build_engine();
    populate(&mut engine);

    let mut snapshot = engine.export_snapshot().unwrap();
    snapshot.assignments[0].person_id = "no-such-person".to_string();

    let people_before = engine.store.person_count().unwrap();
    let assignments_before = engine.store.assignment_count().unwrap();

    let err = engine.import_snapshot(&snapshot).unwrap_err();
    assert!(matches!(err, RosterError::SnapshotIntegrity { .. }));

    // All-or-nothing: the failed import must not have wiped anything.
    assert_eq!(engine.store.person_count().unwrap(), people_before);
    assert_eq!(engine.store.assignment_count().unwrap(), assignments_before);
}

#[test]
fn snapshot_serializes_as_one_document() {
    let mut engine = build_engine();
    populate(&mut engine);

    let snapshot = engine.export_snapshot().unwrap();
    let json = serde_json::to_string(&snapshot).unwrap();
    let parsed: roster_core::snapshot::RosterSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.people.len(), snapshot.people.len());
    assert_eq!(parsed.assignments.len(), snapshot.assignments.len());
    assert_eq!(parsed.settings, snapshot.settings);
}
