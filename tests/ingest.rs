//! Black-box ingestion tests: CSV text in, validated `Input` + `Warning`s
//! out, exercised through the crate's public API rather than the private
//! helpers unit-tested inside `src/ingest.rs`.

use leximatch::common::{Person, Position};
use leximatch::ingest::{read_csv_str, Warning};

#[test]
fn clean_instance_produces_no_warnings() {
    let csv = "Courses,Math,Art,Music\n\
               Number of slots,1,1,1\n\
               Alice,1,2,3\n\
               Bob,2,1,3\n\
               Carol,3,2,1\n";
    let (input, warnings) = read_csv_str(csv).unwrap();
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    assert_eq!(input.slots.len(), 3);
    assert_eq!(input.preferences.len(), 9);
}

#[test]
fn several_warning_classes_fire_independently() {
    let csv = "Courses,Math,Art\n\
               Number of slots,1,0\n\
               Alice,*1,*2\n\
               Bob,9,-\n\
               Carol,-,-\n";
    let (_input, warnings) = read_csv_str(csv).unwrap();

    assert!(warnings.iter().any(|w| matches!(w, Warning::MultipleFixed { person, .. } if *person == Person::from("Alice"))));
    assert!(warnings.iter().any(|w| matches!(w, Warning::RankOutOfRange { person, position, .. }
        if *person == Person::from("Bob") && *position == Position::from("Math"))));
    assert!(warnings.iter().any(|w| matches!(w, Warning::Unassignable { person } if *person == Person::from("Carol"))));
    assert!(warnings.iter().any(|w| matches!(w, Warning::SlotMismatch { .. })));
}

#[test]
fn malformed_header_is_rejected() {
    let csv = "Courses\nNumber of slots\nAlice\n";
    let result = read_csv_str(csv);
    assert!(result.is_ok(), "a zero-position instance is degenerate but not malformed");

    let bad = "Nope,Math\nNumber of slots,1\nAlice,1\n";
    assert!(read_csv_str(bad).is_err());
}
