//! The mutable working data of a single search-tree node: remaining
//! preferences, remaining slot counts, and the partial assignment built so
//! far. Mirrors the role `ddo`'s `SubProblem<T>` plays for an MDD-based
//! solver — a residual problem plus the path taken to reach it — but here the
//! "state" *is* the residual preference table, so no separate state type is
//! needed.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::common::{Person, Position, Preference, Rank};

/// Remaining preferences, keyed by (person, position), shared via `Rc` so
/// that branching into two children is O(1) plus the cost of the touched
/// entries rather than a full clone.
pub type PreferenceTable = Rc<BTreeMap<(Person, Position), Preference>>;
/// Remaining capacity per position.
pub type SlotTable = Rc<BTreeMap<Position, u32>>;
/// Committed placements so far: person -> (position, rank).
pub type Assignment = BTreeMap<Person, (Position, Rank)>;

/// One node of the search tree.
#[derive(Clone, Debug)]
pub struct SearchSpace {
    pub preferences: PreferenceTable,
    pub slots: SlotTable,
    pub partial: Assignment,
}

impl SearchSpace {
    pub fn new(preferences: PreferenceTable, slots: SlotTable, partial: Assignment) -> Self {
        SearchSpace { preferences, slots, partial }
    }

    /// A node is complete when every remaining slot count has been
    /// exhausted.
    pub fn is_complete(&self) -> bool {
        self.slots.values().all(|&n| n == 0)
    }

    /// A node is infeasible when some position's remaining slots exceed the
    /// number of people who still hold a preference for it.
    pub fn is_infeasible(&self) -> bool {
        let mut claimants: BTreeMap<&Position, u32> = BTreeMap::new();
        for (_, position) in self.preferences.keys() {
            *claimants.entry(position).or_insert(0) += 1;
        }
        self.slots
            .iter()
            .any(|(position, &remaining)| remaining > 0 && claimants.get(position).copied().unwrap_or(0) < remaining)
    }

    /// Produces a new space in which `person` is committed to `position` at
    /// `rank`: the position's remaining slots are decremented (removed at
    /// zero), the partial assignment gains the placement, and every
    /// preference entry for `person` — or for any position that just ran out
    /// of slots — is dropped.
    pub fn assign(&self, person: &Person, position: &Position, rank: Rank) -> SearchSpace {
        let mut slots = (*self.slots).clone();
        let remaining = slots.get(position).copied().unwrap_or(0);
        debug_assert!(remaining > 0, "assign called on an exhausted position");
        if remaining <= 1 {
            slots.remove(position);
        } else {
            slots.insert(position.clone(), remaining - 1);
        }

        let mut partial = self.partial.clone();
        partial.insert(person.clone(), (position.clone(), rank));

        let exhausted: Option<&Position> = if slots.get(position).is_none() { Some(position) } else { None };
        let preferences: BTreeMap<(Person, Position), Preference> = self
            .preferences
            .iter()
            .filter(|((p, c), _)| p != person && exhausted.map(|e| c != e).unwrap_or(true))
            .map(|(k, v)| (k.clone(), *v))
            .collect();

        SearchSpace::new(Rc::new(preferences), Rc::new(slots), partial)
    }

    /// Produces a new space identical to `self` except that the (person,
    /// position) preference entry is removed. This is the "don't take this
    /// branch" sibling used by the step machine.
    pub fn drop_preference(&self, person: &Person, position: &Position) -> SearchSpace {
        let mut preferences = (*self.preferences).clone();
        preferences.remove(&(person.clone(), position.clone()));
        SearchSpace::new(Rc::new(preferences), self.slots.clone(), self.partial.clone())
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod tests {
    use super::*;

    fn space(prefs: &[(&str, &str, u32)], slots: &[(&str, u32)]) -> SearchSpace {
        let preferences = prefs
            .iter()
            .map(|(p, c, r)| ((Person::from(*p), Position::from(*c)), Preference::new(*r)))
            .collect();
        let slots = slots.iter().map(|(c, n)| (Position::from(*c), *n)).collect();
        SearchSpace::new(Rc::new(preferences), Rc::new(slots), Assignment::new())
    }

    #[test]
    fn assign_decrements_slots_and_filters_preferences() {
        let s = space(&[("P1", "A", 1), ("P2", "A", 2), ("P1", "B", 3)], &[("A", 1), ("B", 1)]);
        let next = s.assign(&Person::from("P1"), &Position::from("A"), 1);
        assert_eq!(next.slots.get(&Position::from("A")), None);
        assert_eq!(next.partial.get(&Person::from("P1")), Some(&(Position::from("A"), 1)));
        // P2's entry for A is gone (slots exhausted), P1's entry for B is gone (person assigned)
        assert!(next.preferences.is_empty());
    }

    #[test]
    fn assign_keeps_unrelated_entries() {
        let s = space(&[("P1", "A", 1), ("P2", "B", 2)], &[("A", 1), ("B", 1)]);
        let next = s.assign(&Person::from("P1"), &Position::from("A"), 1);
        assert_eq!(next.preferences.len(), 1);
        assert!(next.preferences.contains_key(&(Person::from("P2"), Position::from("B"))));
    }

    #[test]
    fn drop_removes_single_entry() {
        let s = space(&[("P1", "A", 1), ("P1", "B", 2)], &[("A", 1), ("B", 1)]);
        let next = s.drop_preference(&Person::from("P1"), &Position::from("A"));
        assert_eq!(next.preferences.len(), 1);
        assert!(!next.preferences.contains_key(&(Person::from("P1"), Position::from("A"))));
        assert_eq!(next.slots, s.slots);
        assert_eq!(next.partial, s.partial);
    }

    #[test]
    fn complete_iff_all_slots_exhausted() {
        let s = space(&[], &[("A", 0), ("B", 0)]);
        assert!(s.is_complete());
        let s2 = space(&[], &[("A", 1)]);
        assert!(!s2.is_complete());
    }

    #[test]
    fn infeasible_when_fewer_claimants_than_slots() {
        let s = space(&[("P1", "A", 1)], &[("A", 2)]);
        assert!(s.is_infeasible());
        let s2 = space(&[("P1", "A", 1), ("P2", "A", 2)], &[("A", 2)]);
        assert!(!s2.is_infeasible());
    }
}
