//! Input preparation: seeds the initial search space from a validated
//! `Input`, applying fixed assignments eagerly. Plays the role
//! `ddo`'s `Problem::initial_state` plays in seeding a dynamic program's
//! root node.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::common::{Person, Position, Preference};
use crate::search_space::{Assignment, SearchSpace};

/// A validated problem instance: slot capacities and every (person,
/// position) preference entry.
#[derive(Clone, Debug, Default)]
pub struct Input {
    pub slots: BTreeMap<Position, u32>,
    pub preferences: BTreeMap<(Person, Position), Preference>,
}

/// Builds the initial search space from `input`:
/// 1. starts with all preferences, all slots, an empty partial assignment;
/// 2. applies every `fixed` preference via `assign`, in the deterministic
///    iteration order of the preference table. A fixed preference whose
///    position has no remaining slot when reached is silently dropped — the
///    ingestion/validation layer is responsible for warning about
///    conflicting fixes.
pub fn seed(input: &Input) -> SearchSpace {
    let mut space = SearchSpace::new(
        Rc::new(input.preferences.clone()),
        Rc::new(input.slots.clone()),
        Assignment::new(),
    );

    let fixed: Vec<(Person, Position, crate::common::Rank)> = input
        .preferences
        .iter()
        .filter(|(_, pref)| pref.fixed)
        .map(|((p, c), pref)| (p.clone(), c.clone(), pref.rank))
        .collect();

    for (person, position, rank) in fixed {
        let still_free = space.preferences.contains_key(&(person.clone(), position.clone()));
        let has_slot = space.slots.get(&position).copied().unwrap_or(0) > 0;
        if still_free && has_slot {
            space = space.assign(&person, &position, rank);
        }
    }

    space
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
