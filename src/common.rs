//! The most basic data types shared by every module in this crate: the two
//! opaque entity identifiers (`Person`, `Position`), the `Rank` alias, and the
//! `Preference` a person holds toward a position.

use std::fmt;

// ----------------------------------------------------------------------------
// --- PERSON -------------------------------------------------------------
// ----------------------------------------------------------------------------
/// An opaque person identifier. Two persons are the same iff their names are
/// equal; ordering is lexicographic on the name, which is what gives the
/// branch selector (`branch::select`) its deterministic tie-break.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Person(pub String);

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Person {
    fn from(s: &str) -> Self {
        Person(s.to_string())
    }
}

impl From<String> for Person {
    fn from(s: String) -> Self {
        Person(s)
    }
}

// ----------------------------------------------------------------------------
// --- POSITION -----------------------------------------------------------
// ----------------------------------------------------------------------------
/// An opaque position identifier (a "course", a "seat", whatever the caller's
/// domain calls it). Capacities for each position live in `Slots`.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Position(pub String);

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Position {
    fn from(s: &str) -> Self {
        Position(s.to_string())
    }
}

impl From<String> for Position {
    fn from(s: String) -> Self {
        Position(s)
    }
}

// ----------------------------------------------------------------------------
// --- RANK -----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A preference rank. Lower is more preferred; 1 is the top choice. Ranks
/// are always >= 1 — nothing in this crate constructs a `Rank` of 0.
pub type Rank = u32;

// ----------------------------------------------------------------------------
// --- PREFERENCE -------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A single person's rating of a single position. Absence of a `Preference`
/// for a (person, position) pair denotes a forbidden cell.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Preference {
    pub rank: Rank,
    pub fixed: bool,
}

impl Preference {
    pub fn new(rank: Rank) -> Self {
        Preference { rank, fixed: false }
    }

    pub fn fixed(rank: Rank) -> Self {
        Preference { rank, fixed: true }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_orders_lexicographically() {
        let mut people = vec![Person::from("Bob"), Person::from("Alice")];
        people.sort();
        assert_eq!(people, vec![Person::from("Alice"), Person::from("Bob")]);
    }

    #[test]
    fn preference_constructors() {
        assert!(!Preference::new(3).fixed);
        assert!(Preference::fixed(1).fixed);
    }
}
