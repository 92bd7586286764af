//! roster-cli: headless runner for the duty roster engine.
//!
//! Usage:
//!   roster-cli --db roster.db --demo --seed 12345 --assign-all
//!   roster-cli --db roster.db --ipc-mode

use anyhow::Result;
use chrono::Utc;
use roster_core::{
    command::RosterCommand,
    demo::DemoGenerator,
    engine::RosterEngine,
    report::{DutyDistributionRow, PersonnelLoadRow},
    store::RosterStore,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Command { command: RosterCommand },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    people:       i64,
    duties:       i64,
    assignments:  i64,
    replacements: i64,
    distribution: Vec<DutyDistributionRow>,
    load:         Vec<PersonnelLoadRow>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let demo = args.iter().any(|a| a == "--demo");
    let assign_all = args.iter().any(|a| a == "--assign-all");
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");

    if !ipc_mode {
        println!("roster-cli — duty roster runner");
        println!("  db:   {db}");
        println!("  seed: {seed}");
        println!();
    }

    let store = if db == ":memory:" {
        RosterStore::in_memory()?
    } else {
        RosterStore::open(db)?
    };
    store.migrate()?;
    let mut engine = RosterEngine::new(store);

    if demo {
        seed_demo_data(&mut engine, seed)?;
    }

    if assign_all {
        assign_unfilled_duties(&mut engine)?;
    }

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else {
        print_summary(&engine)?;
    }

    Ok(())
}

fn seed_demo_data(engine: &mut RosterEngine, seed: u64) -> Result<()> {
    let mut generator = DemoGenerator::new(seed);
    let people = generator.people(20);
    let duties = generator.duties(Utc::now().date_naive(), 30);

    let people_count = people.len();
    let duties_count = duties.len();
    for person in people {
        engine.add_person(person)?;
    }
    for duty in duties {
        engine.add_duty(duty)?;
    }
    log::info!("seeded {people_count} people and {duties_count} duties");
    Ok(())
}

fn assign_unfilled_duties(engine: &mut RosterEngine) -> Result<()> {
    let unfilled = engine.store.unassigned_duties()?;
    for duty in &unfilled {
        let records = engine.auto_assign_duty(&duty.id)?;
        if records.len() < duty.roles.len() {
            log::warn!(
                "duty {} ({}): only {} of {} slots filled",
                duty.id,
                duty.duty_type,
                records.len(),
                duty.roles.len()
            );
        }
    }
    log::info!("auto-assigned {} duties", unfilled.len());
    Ok(())
}

fn run_ipc_loop(engine: &mut RosterEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {
                let state = build_ui_state(engine)?;
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            }
            IpcCommand::Command { command } => {
                match engine.handle_command(command) {
                    Ok(outcome) => {
                        writeln!(stdout, "{}", serde_json::to_string(&outcome)?)?;
                    }
                    Err(e) => {
                        let err_json = serde_json::json!({ "error": e.to_string() });
                        writeln!(stdout, "{}", err_json)?;
                    }
                }
                let state = build_ui_state(engine)?;
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn build_ui_state(engine: &RosterEngine) -> Result<UiState> {
    Ok(UiState {
        people:       engine.store.person_count()?,
        duties:       engine.store.duty_count()?,
        assignments:  engine.store.assignment_count()?,
        replacements: engine.store.replacement_count()?,
        distribution: engine.duty_distribution()?,
        load:         engine.personnel_load()?,
    })
}

fn print_summary(engine: &RosterEngine) -> Result<()> {
    let people = engine.store.person_count()?;
    let duties = engine.store.duty_count()?;
    let assignments = engine.store.assignment_count()?;
    let replacements = engine.store.replacement_count()?;
    let unfilled = engine.store.unassigned_duties()?.len();

    println!("=== ROSTER SUMMARY ===");
    println!("  people:        {people}");
    println!("  duties:        {duties}");
    println!("  assignments:   {assignments}");
    println!("  unfilled:      {unfilled}");
    println!("  replacements:  {replacements}");

    println!();
    println!("=== DUTY DISTRIBUTION ===");
    let distribution = engine.duty_distribution()?;
    if distribution.is_empty() {
        println!("  (no duties)");
    }
    for row in &distribution {
        println!(
            "  {:<20} duties: {:>3}  filled slots: {:>3}",
            row.duty_type, row.duty_count, row.filled_slots
        );
    }

    println!();
    println!("=== PERSONNEL LOAD (heaviest first) ===");
    for row in engine.personnel_load()?.iter().take(10) {
        let last = row
            .last_duty_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "never".to_string());
        println!(
            "  {:<24} {:<16} duties: {:>2}  last: {last}",
            row.short_name,
            row.rank.as_str(),
            row.total_duties
        );
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
