//! Reporting view tests: duty distribution, personnel load ordering,
//! and replacement-report name resolution.

use chrono::NaiveDate;
use roster_core::{
    clock::FixedClock,
    duty::NewDuty,
    engine::RosterEngine,
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

fn new_person(last_name: &str, first_name: &str) -> NewPerson {
    NewPerson {
        last_name: last_name.to_string(),
        first_name: first_name.to_string(),
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

fn new_duty(duty_type: &str, day: u32, roles: &[&str]) -> NewDuty {
    NewDuty {
        duty_type: duty_type.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, day).expect("valid day"),
        max_personnel: roles.len() as u32,
        roles: roles.iter().map(|r| r.to_string()).collect(),
        comment: None,
    }
}

#[test]
fn duty_distribution_counts_types_and_slots() {
    let mut engine = build_engine();
    engine.add_person(new_person("Able", "Adam")).unwrap();
    engine.add_person(new_person("Baker", "Bill")).unwrap();

    let patrol_a = engine
        .add_duty(new_duty("patrol", 3, &["orderly", "orderly"]))
        .unwrap();
    engine.add_duty(new_duty("patrol", 4, &["orderly"])).unwrap();
    engine
        .add_duty(new_duty("company_duty", 5, &["duty_officer"]))
        .unwrap();

    engine.auto_assign_duty(&patrol_a.id).unwrap();

    let distribution = engine.duty_distribution().unwrap();
    assert_eq!(distribution.len(), 2);

    let patrol = distribution
        .iter()
        .find(|r| r.duty_type == "patrol")
        .expect("patrol row");
    assert_eq!(patrol.duty_count, 2);
    assert_eq!(patrol.filled_slots, 2);

    let company = distribution
        .iter()
        .find(|r| r.duty_type == "company_duty")
        .expect("company_duty row");
    assert_eq!(company.duty_count, 1);
    assert_eq!(company.filled_slots, 0);
}

#[test]
fn personnel_load_orders_heaviest_first() {
    let mut engine = build_engine();
    let heavy = engine.add_person(new_person("Heavy", "Hank")).unwrap();
    engine.add_person(new_person("Light", "Lou")).unwrap();

    for day in [2, 3] {
        let duty = engine.add_duty(new_duty("patrol", day, &["orderly"])).unwrap();
        engine.assign_person(&duty.id, &heavy.id, "orderly").unwrap();
    }

    let load = engine.personnel_load().unwrap();
    assert_eq!(load.len(), 2);
    assert_eq!(load[0].person_id, heavy.id);
    assert_eq!(load[0].total_duties, 2);
    assert_eq!(load[0].short_name, "Heavy H.A.");
    assert_eq!(
        load[0].last_duty_date,
        NaiveDate::from_ymd_opt(2024, 3, 3),
        "latest of the two duty dates"
    );
    assert_eq!(load[1].total_duties, 0);
    assert_eq!(load[1].last_duty_date, None);
}

/// `replacements_received` comes from the replacement log, completing
/// the placeholder the stats aggregator leaves at zero.
#[test]
fn personnel_load_counts_replacements_received() {
    let mut engine = build_engine();
    let original = engine.add_person(new_person("Out", "Oscar")).unwrap();
    let substitute = engine.add_person(new_person("In", "Ivan")).unwrap();

    let duty = engine.add_duty(new_duty("patrol", 9, &["orderly"])).unwrap();
    let assignment = engine
        .assign_person(&duty.id, &original.id, "orderly")
        .unwrap();
    engine
        .replace_assignment(&assignment.id, &substitute.id, "illness")
        .unwrap();

    let load = engine.personnel_load().unwrap();
    let row = load
        .iter()
        .find(|r| r.person_id == substitute.id)
        .expect("substitute row");
    assert_eq!(row.replacements_received, 1);
    assert_eq!(row.replacements_made, 1, "the re-homed row carries metadata");

    let original_row = load
        .iter()
        .find(|r| r.person_id == original.id)
        .expect("original row");
    assert_eq!(original_row.replacements_received, 0);
}

#[test]
fn replacement_report_resolves_names_newest_first() {
    let mut engine = build_engine();
    let p1 = engine.add_person(new_person("Out", "Oscar")).unwrap();
    let p2 = engine.add_person(new_person("In", "Ivan")).unwrap();
    let p3 = engine.add_person(new_person("Next", "Nick")).unwrap();

    let duty = engine.add_duty(new_duty("patrol", 9, &["orderly"])).unwrap();
    let assignment = engine.assign_person(&duty.id, &p1.id, "orderly").unwrap();
    engine
        .replace_assignment(&assignment.id, &p2.id, "illness")
        .unwrap();
    engine
        .replace_assignment(&assignment.id, &p3.id, "training")
        .unwrap();

    let report = engine.replacement_report().unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].reason, "training", "newest entry first");
    assert_eq!(report[0].original, "In I.A.");
    assert_eq!(report[0].replacement, "Next N.A.");
    assert_eq!(report[1].reason, "illness");
    assert_eq!(report[1].duty_type, "patrol");
    assert_eq!(report[1].duty_date, Some(duty.date));
}
