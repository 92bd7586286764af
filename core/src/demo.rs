//! Deterministic demo dataset generation using curated name lists.
//!
//! Same seed = same dataset; nothing here touches a platform RNG. Used
//! by the runner's --demo flag and by tests that want a populated store.

use crate::duty::{NewDuty, HEADQUARTERS_DUTY};
use crate::person::{NewPerson, PersonStatus, Rank};
use chrono::{Duration, NaiveDate};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Seeded RNG with the few draws demo generation needs.
pub struct DemoRng {
    inner: Pcg64Mcg,
}

impl DemoRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Roll a u64 in [0, n).
    pub fn below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        let bits = self.inner.next_u64();
        ((bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)) < p
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }
}

const FIRST_NAMES: &[&str] = &[
    "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph", "Thomas",
    "Daniel", "Matthew", "Anthony", "Mark", "Steven", "Andrew", "Joshua", "Kevin", "Brian",
    "George", "Edward", "Ryan", "Jacob", "Nicholas", "Eric",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Miller", "Davis", "Wilson", "Anderson",
    "Taylor", "Moore", "Jackson", "Martin", "Thompson", "White", "Harris", "Clark", "Lewis",
    "Walker", "Young", "Allen", "King", "Wright", "Hill",
];

const MIDDLE_NAMES: &[&str] = &[
    "Alan", "Blake", "Carl", "Dean", "Earl", "Frank", "Glenn", "Hugh", "Ivan", "Jay", "Kyle",
    "Lee", "Neil", "Owen", "Paul", "Ray", "Scott", "Troy", "Wade", "Zane",
];

const POSITIONS: &[&str] = &[
    "rifleman",
    "machine_gunner",
    "grenadier",
    "sniper",
    "radio_operator",
    "driver",
];

const DEMO_RANKS: &[Rank] = &[
    Rank::Private,
    Rank::Corporal,
    Rank::JuniorSergeant,
    Rank::Sergeant,
];

// Weighted toward Active so auto-assignment has candidates to work with.
const DEMO_STATUSES: &[PersonStatus] = &[
    PersonStatus::Active,
    PersonStatus::Active,
    PersonStatus::Active,
    PersonStatus::Active,
    PersonStatus::OnLeave,
    PersonStatus::OnPass,
];

const DEMO_DUTY_TYPES: &[&str] = &["company_duty", HEADQUARTERS_DUTY, "patrol"];

pub struct DemoGenerator {
    rng: DemoRng,
}

impl DemoGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: DemoRng::new(seed),
        }
    }

    /// A platoon-sized roster in the default tag vocabulary.
    pub fn people(&mut self, count: usize) -> Vec<NewPerson> {
        (0..count)
            .map(|_| NewPerson {
                last_name: self.rng.pick(LAST_NAMES).to_string(),
                first_name: self.rng.pick(FIRST_NAMES).to_string(),
                middle_name: self.rng.pick(MIDDLE_NAMES).to_string(),
                rank: DEMO_RANKS[self.rng.below(DEMO_RANKS.len() as u64) as usize],
                position: self.rng.pick(POSITIONS).to_string(),
                phone: format!(
                    "+1 ({}) {}-{:04}",
                    100 + self.rng.below(900),
                    100 + self.rng.below(900),
                    self.rng.below(10_000)
                ),
                room: format!("{}{}", 1 + self.rng.below(3), 1 + self.rng.below(10)),
                platoon: format!("{}", 1 + self.rng.below(3)),
                status: DEMO_STATUSES[self.rng.below(DEMO_STATUSES.len() as u64) as usize],
                staff_duty_capable: self.rng.chance(0.3),
            })
            .collect()
    }

    /// One to two duties per day over the given range, four role slots
    /// each, matching the default settings vocabulary.
    pub fn duties(&mut self, start: NaiveDate, days: u32) -> Vec<NewDuty> {
        let mut duties = Vec::new();
        for day in 0..days {
            let date = start + Duration::days(day as i64);
            let per_day = 1 + self.rng.below(2);
            for _ in 0..per_day {
                duties.push(NewDuty {
                    duty_type: self.rng.pick(DEMO_DUTY_TYPES).to_string(),
                    date,
                    max_personnel: 4,
                    roles: vec![
                        "duty_officer".to_string(),
                        "orderly".to_string(),
                        "orderly".to_string(),
                        "orderly".to_string(),
                    ],
                    comment: if self.rng.chance(0.3) {
                        Some("reinforced detail".to_string())
                    } else {
                        None
                    },
                });
            }
        }
        duties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let mut gen_a = DemoGenerator::new(12345);
        let people_a = gen_a.people(20);
        let duties_a = gen_a.duties(start, 30);

        let mut gen_b = DemoGenerator::new(12345);
        let people_b = gen_b.people(20);
        let duties_b = gen_b.duties(start, 30);

        for (a, b) in people_a.iter().zip(people_b.iter()) {
            assert_eq!(a.last_name, b.last_name, "Same seed should produce same roster");
            assert_eq!(a.status, b.status);
        }
        assert_eq!(duties_a.len(), duties_b.len());
    }

    #[test]
    fn duties_use_default_vocabulary() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut gen = DemoGenerator::new(7);

        for duty in gen.duties(start, 10) {
            assert!(
                DEMO_DUTY_TYPES.contains(&duty.duty_type.as_str()),
                "Unexpected duty type: {}",
                duty.duty_type
            );
            assert_eq!(duty.roles.len(), 4);
            assert!(duty.date >= start);
        }
    }

    #[test]
    fn roster_has_assignable_people() {
        let mut gen = DemoGenerator::new(42);
        let people = gen.people(20);

        let active = people
            .iter()
            .filter(|p| p.status == PersonStatus::Active)
            .count();
        assert!(active > 0, "Demo roster should contain active personnel");
    }
}
