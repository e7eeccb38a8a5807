//! CSV ingestion and validation, in the idiom of
//! `alexjago-nparty`'s `csv`-driven electoral-data ingestion: parse first,
//! validate as a second, independent pass that only ever downgrades into a
//! `Warning`, never an error. This layer is the "external collaborator"
//! the solver core stays decoupled from; nothing here is called
//! by `prepare`, `step`, or any other solver module.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::common::{Person, Position, Preference, Rank};
use crate::error::{IngestError, IngestResult};
use crate::prepare::Input;

/// A non-fatal diagnostic raised while ingesting or validating a CSV file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Warning {
    /// Total people != total slots.
    SlotMismatch { people: usize, slots: u32 },
    /// A person listed more than one fixed preference; only the first
    /// (in column order) was kept.
    MultipleFixed { person: Person, kept: Position },
    /// A person's ranks were not competition-consistent and were
    /// renormalized.
    RanksRenormalized { person: Person },
    /// A rank fell outside `[1, position_count]` and was clamped to last
    /// place.
    RankOutOfRange { person: Person, position: Position, original: Rank },
    /// A position received more fixed preferences than it has slots.
    ConflictingFixed { position: Position, fixed_count: usize, slots: u32 },
    /// A person forbids or fails to rank every position and can never be
    /// assigned.
    Unassignable { person: Person },
}

/// Reads and validates a CSV file at `path`.
pub fn read_csv_file(path: &Path) -> IngestResult<(Input, Vec<Warning>)> {
    let mut file = std::fs::File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    read_csv_str(&contents)
}

/// Reads and validates CSV content already in memory. Split out from
/// `read_csv_file` so tests (and callers embedding a CSV string) don't need
/// a filesystem round-trip.
pub fn read_csv_str(contents: &str) -> IngestResult<(Input, Vec<Warning>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let mut records = reader.records();

    let header = records
        .next()
        .ok_or_else(|| IngestError::Header("missing header row".to_string()))??;
    if header.get(0).map(str::trim) != Some("Courses") {
        return Err(IngestError::Header(
            "row 1 must begin with the literal \"Courses\"".to_string(),
        ));
    }
    let positions: Vec<Position> = header.iter().skip(1).map(|c| Position::from(c.trim())).collect();

    let slots_row = records
        .next()
        .ok_or_else(|| IngestError::Header("missing slots row".to_string()))??;
    if slots_row.get(0).map(str::trim) != Some("Number of slots") {
        return Err(IngestError::Header(
            "row 2 must begin with the literal \"Number of slots\"".to_string(),
        ));
    }

    let mut slots: BTreeMap<Position, u32> = BTreeMap::new();
    for (i, position) in positions.iter().enumerate() {
        let cell = slots_row.get(i + 1).unwrap_or("").trim();
        let n: u32 = cell
            .parse()
            .map_err(|_| IngestError::Row { row: 2, msg: format!("slot count {cell:?} is not a non-negative integer") })?;
        slots.insert(position.clone(), n);
    }

    let position_count = positions.len() as Rank;
    let mut preferences: BTreeMap<(Person, Position), Preference> = BTreeMap::new();
    let mut warnings: Vec<Warning> = Vec::new();
    let mut people: Vec<Person> = Vec::new();

    for (row_idx, record) in records.enumerate() {
        let record = record?;
        let row = row_idx + 3; // 1-indexed, after the two header rows
        let Some(name) = record.get(0) else { continue };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let person = Person::from(name);
        people.push(person.clone());

        for (i, position) in positions.iter().enumerate() {
            let cell = record.get(i + 1).unwrap_or("").trim();
            if cell.is_empty() || cell.starts_with('-') {
                continue; // forbidden cell: no preference entry
            }
            let (rank_text, fixed) = match cell.strip_prefix('*') {
                Some(rest) => (rest, true),
                None => (cell, false),
            };
            let rank: Rank = rank_text
                .trim()
                .parse()
                .map_err(|_| IngestError::Row { row, msg: format!("cell {cell:?} for {name:?} is not a valid rank") })?;

            let (clamped, original) = if rank < 1 || rank > position_count.max(1) {
                (position_count.max(1), Some(rank))
            } else {
                (rank, None)
            };
            if let Some(original) = original {
                warnings.push(Warning::RankOutOfRange { person: person.clone(), position: position.clone(), original });
            }

            let pref = if fixed { Preference::fixed(clamped) } else { Preference::new(clamped) };
            preferences.insert((person.clone(), position.clone()), pref);
        }
    }

    dedupe_fixed(&mut preferences, &positions, &people, &mut warnings);
    renormalize_ranks(&mut preferences, &people, &mut warnings);
    check_slot_mismatch(people.len(), &slots, &mut warnings);
    check_conflicting_fixed(&preferences, &slots, &mut warnings);
    check_unassignable(&preferences, &people, &mut warnings);

    Ok((Input { slots, preferences }, warnings))
}

/// Keeps only the first fixed preference (in column order) for each person;
/// later fixed markers for the same person are demoted to ordinary
/// preferences and a warning is raised.
fn dedupe_fixed(
    preferences: &mut BTreeMap<(Person, Position), Preference>,
    positions: &[Position],
    people: &[Person],
    warnings: &mut Vec<Warning>,
) {
    for person in people {
        let fixed_positions: Vec<Position> = positions
            .iter()
            .filter(|position| preferences.get(&(person.clone(), (*position).clone())).is_some_and(|pref| pref.fixed))
            .cloned()
            .collect();
        if fixed_positions.len() > 1 {
            let kept = fixed_positions[0].clone();
            for extra in &fixed_positions[1..] {
                if let Some(pref) = preferences.get_mut(&(person.clone(), extra.clone())) {
                    pref.fixed = false;
                }
            }
            warnings.push(Warning::MultipleFixed { person: person.clone(), kept });
        }
    }
}

/// Renormalizes a person's ranks to be competition-consistent: "for each n
/// >= 1, at least n of their listed ranks are <= n". When
/// violated, each rank is replaced with "(number of strictly smaller ranks
/// held by the same person) + 1".
fn renormalize_ranks(
    preferences: &mut BTreeMap<(Person, Position), Preference>,
    people: &[Person],
    warnings: &mut Vec<Warning>,
) {
    for person in people {
        let mut entries: Vec<(Position, Rank)> = preferences
            .iter()
            .filter(|((p, _), _)| p == person)
            .map(|((_, c), pref)| (c.clone(), pref.rank))
            .collect();
        entries.sort_by_key(|(_, r)| *r);

        let is_consistent = entries.iter().enumerate().all(|(i, (_, r))| *r <= (i as Rank + 1));
        if is_consistent {
            continue;
        }

        let ranks: Vec<Rank> = entries.iter().map(|(_, r)| *r).collect();
        for (position, original_rank) in &entries {
            let new_rank = ranks.iter().filter(|&&r| r < *original_rank).count() as Rank + 1;
            if let Some(pref) = preferences.get_mut(&(person.clone(), position.clone())) {
                pref.rank = new_rank;
            }
        }
        warnings.push(Warning::RanksRenormalized { person: person.clone() });
    }
}

fn check_slot_mismatch(people_count: usize, slots: &BTreeMap<Position, u32>, warnings: &mut Vec<Warning>) {
    let total_slots: u32 = slots.values().sum();
    if people_count as u32 != total_slots {
        warnings.push(Warning::SlotMismatch { people: people_count, slots: total_slots });
    }
}

fn check_conflicting_fixed(
    preferences: &BTreeMap<(Person, Position), Preference>,
    slots: &BTreeMap<Position, u32>,
    warnings: &mut Vec<Warning>,
) {
    let mut fixed_counts: BTreeMap<&Position, usize> = BTreeMap::new();
    for ((_, position), pref) in preferences.iter() {
        if pref.fixed {
            *fixed_counts.entry(position).or_insert(0) += 1;
        }
    }
    for (position, &fixed_count) in fixed_counts.iter() {
        let slot_count = slots.get(*position).copied().unwrap_or(0);
        if fixed_count as u32 > slot_count {
            warnings.push(Warning::ConflictingFixed {
                position: (*position).clone(),
                fixed_count,
                slots: slot_count,
            });
        }
    }
}

fn check_unassignable(
    preferences: &BTreeMap<(Person, Position), Preference>,
    people: &[Person],
    warnings: &mut Vec<Warning>,
) {
    for person in people {
        if !preferences.keys().any(|(p, _)| p == person) {
            warnings.push(Warning::Unassignable { person: person.clone() });
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
