//! End-to-end scenarios driven through the public API:
//! CSV text (or a hand-built `Input`) in, leximin-optimal assignment(s) out.

use std::collections::BTreeMap;

use leximatch::common::{Person, Position, Preference};
use leximatch::distribution::Distribution;
use leximatch::ingest::read_csv_str;
use leximatch::prepare::{seed, Input};
use leximatch::step::StepMachine;

fn solve(input: &Input) -> StepMachine {
    let mut machine = StepMachine::new(seed(input));
    let mut guard = 0;
    while !machine.finished() {
        machine.step();
        guard += 1;
        assert!(guard < 1_000_000, "search did not terminate");
    }
    machine
}

fn input_of(prefs: &[(&str, &str, u32, bool)], slots: &[(&str, u32)]) -> Input {
    let mut preferences: BTreeMap<_, _> = BTreeMap::new();
    for (p, c, r, fixed) in prefs {
        let pref = if *fixed { Preference::fixed(*r) } else { Preference::new(*r) };
        preferences.insert((Person::from(*p), Position::from(*c)), pref);
    }
    let slots = slots.iter().map(|(c, n)| (Position::from(*c), *n)).collect();
    Input { slots, preferences }
}

#[test]
fn scenario_1_trivial_identity() {
    let input = input_of(
        &[("P1", "A", 1, false), ("P1", "B", 2, false), ("P2", "A", 2, false), ("P2", "B", 1, false)],
        &[("A", 1), ("B", 1)],
    );
    let machine = solve(&input);
    let best = machine.result();
    assert_eq!(best.distribution(), Some(&Distribution::count(vec![1, 1])));
    let assignments = best.assignments().unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].get(&Person::from("P1")), Some(&(Position::from("A"), 1)));
    assert_eq!(assignments[0].get(&Person::from("P2")), Some(&(Position::from("B"), 1)));
}

#[test]
fn scenario_2_forced_tie_break() {
    let mut prefs = Vec::new();
    for p in ["P1", "P2", "P3"] {
        prefs.push((p, "A", 1, false));
        prefs.push((p, "B", 2, false));
        prefs.push((p, "C", 3, false));
    }
    let input = input_of(&prefs, &[("A", 1), ("B", 1), ("C", 1)]);
    let machine = solve(&input);
    let best = machine.result();
    assert_eq!(best.distribution(), Some(&Distribution::count(vec![1, 2, 3])));
    assert_eq!(best.assignments().unwrap().len(), 6);
}

#[test]
fn scenario_3_leximin_beats_utilitarian() {
    let input = input_of(
        &[("P1", "A", 1, false), ("P1", "B", 3, false), ("P2", "A", 1, false), ("P2", "B", 2, false)],
        &[("A", 1), ("B", 1)],
    );
    let machine = solve(&input);
    let best = machine.result();
    assert_eq!(best.distribution(), Some(&Distribution::count(vec![1, 2])));
    let assignments = best.assignments().unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].get(&Person::from("P1")), Some(&(Position::from("A"), 1)));
    assert_eq!(assignments[0].get(&Person::from("P2")), Some(&(Position::from("B"), 2)));
}

#[test]
fn scenario_4_fixed_assignment() {
    let input = input_of(
        &[("P1", "A", 2, true), ("P1", "B", 1, false), ("P2", "A", 1, false), ("P2", "B", 2, false)],
        &[("A", 1), ("B", 1)],
    );
    let machine = solve(&input);
    let best = machine.result();
    assert_eq!(best.distribution(), Some(&Distribution::count(vec![2, 2])));
    let assignments = best.assignments().unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].get(&Person::from("P1")), Some(&(Position::from("A"), 2)));
    assert_eq!(assignments[0].get(&Person::from("P2")), Some(&(Position::from("B"), 2)));
}

#[test]
fn scenario_5_forbidden_assignment() {
    // P2 forbids A: no preference entry for (P2, A).
    let input = input_of(
        &[("P1", "A", 1, false), ("P1", "B", 2, false), ("P2", "B", 1, false)],
        &[("A", 1), ("B", 1)],
    );
    let machine = solve(&input);
    let best = machine.result();
    assert_eq!(best.distribution(), Some(&Distribution::count(vec![1, 1])));
    let assignments = best.assignments().unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].get(&Person::from("P1")), Some(&(Position::from("A"), 1)));
    assert_eq!(assignments[0].get(&Person::from("P2")), Some(&(Position::from("B"), 1)));
}

#[test]
fn scenario_6_infeasible_after_conflicting_fixes() {
    // Both P1 and P2 fixed to A; validation/prepare keeps only the first fix
    // (P1, in iteration order), leaving P2 unassignable and one slot filled.
    let input = input_of(&[("P1", "A", 1, true), ("P2", "A", 1, true)], &[("A", 1)]);
    let machine = solve(&input);
    let best = machine.result();
    assert!(best.is_present());
    let assignments = best.assignments().unwrap();
    assert_eq!(assignments[0].len(), 1);
    assert!(assignments[0].contains_key(&Person::from("P1")));
}

#[test]
fn csv_round_trip_matches_hand_built_input() {
    let csv = "Courses,A,B\nNumber of slots,1,1\nP1,1,2\nP2,2,1\n";
    let (input, warnings) = read_csv_str(csv).unwrap();
    assert!(warnings.is_empty());
    let machine = solve(&input);
    let best = machine.result();
    assert_eq!(best.distribution(), Some(&Distribution::count(vec![1, 1])));
}
