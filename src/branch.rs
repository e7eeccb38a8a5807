//! The branch selector and the optimistic bound used to prune subtrees.
//!
//! Mirrors the role `ddo`'s width/ranking heuristics play in choosing which
//! dimension of the search to restrict first (`ddo`'s
//! `implementation/heuristics/width.rs` picks the "hardest" layer to narrow;
//! here we pick the "hardest" position to commit first) and the role
//! `Relaxation`/bound computation plays in yielding an optimistic estimate to
//! prune against (`ddo`'s `abstraction/mdd.rs`).

use std::collections::BTreeMap;

use crate::common::{Person, Position, Rank};
use crate::distribution::Distribution;
use crate::search_space::SearchSpace;

/// The next (person, position, rank) to branch on, together with the
/// optimistic bound for the subtree rooted at that branch. `bound` is
/// `None` when any position's shortlist is incomplete.
pub struct Branch {
    pub person: Person,
    pub position: Position,
    pub rank: Rank,
    pub bound: Option<Distribution>,
}

/// For a position with `k` remaining slots, the `k` people with the best
/// (lowest) remaining rank for it, ties broken by person id.
fn shortlist<'a>(
    position: &Position,
    k: u32,
    preferences: &'a BTreeMap<(Person, Position), crate::common::Preference>,
) -> Vec<(&'a Person, Rank)> {
    let mut claimants: Vec<(&Person, Rank)> = preferences
        .iter()
        .filter(|((_, c), _)| c == position)
        .map(|((p, _), pref)| (p, pref.rank))
        .collect();
    claimants.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    claimants.truncate(k as usize);
    claimants
}

/// Chooses the next branch: among all positions with remaining slots, picks
/// the one whose shortlist head (best claimant) has the worst rank, i.e. the
/// position where even the most enthusiastic remaining candidate is least
/// enthusiastic. Returns `None` if no position has any
/// candidate at all.
pub fn select(space: &SearchSpace) -> Option<Branch> {
    let mut hardest: Option<(&Position, Vec<(&Person, Rank)>)> = None;

    for (position, &remaining) in space.slots.iter() {
        if remaining == 0 {
            continue;
        }
        let list = shortlist(position, remaining, &space.preferences);
        let Some(&(_, head_rank)) = list.first() else {
            continue;
        };
        let is_harder = match &hardest {
            None => true,
            Some((_, current)) => {
                let current_head = current.first().map(|&(_, r)| r).unwrap_or(0);
                head_rank > current_head
            }
        };
        if is_harder {
            hardest = Some((position, list));
        }
    }

    let (position, list) = hardest?;
    let &(person, rank) = list.first().expect("non-empty shortlist guaranteed above");

    let bound = compute_bound(space);

    Some(Branch {
        person: person.clone(),
        position: position.clone(),
        rank,
        bound,
    })
}

/// Computes the optimistic bound for the subtree rooted at `space`: the
/// leximin-better of the position-wise and person-wise candidate
/// distributions, joined with the partial assignment's committed ranks
/// `None` when any position's shortlist is incomplete.
fn compute_bound(space: &SearchSpace) -> Option<Distribution> {
    let mut position_wise_ranks: Vec<Rank> = Vec::new();
    for (position, &remaining) in space.slots.iter() {
        if remaining == 0 {
            continue;
        }
        let list = shortlist(position, remaining, &space.preferences);
        if (list.len() as u32) < remaining {
            return None;
        }
        position_wise_ranks.extend(list.iter().map(|&(_, r)| r));
    }

    let mut people_with_prefs: BTreeMap<&Person, Rank> = BTreeMap::new();
    for ((person, _), pref) in space.preferences.iter() {
        people_with_prefs
            .entry(person)
            .and_modify(|r| *r = (*r).min(pref.rank))
            .or_insert(pref.rank);
    }
    let person_wise_ranks: Vec<Rank> = people_with_prefs.values().copied().collect();

    let committed_ranks: Vec<Rank> = space.partial.values().map(|&(_, r)| r).collect();

    let position_wise = Distribution::count(position_wise_ranks.into_iter().chain(committed_ranks.clone()));
    let person_wise = Distribution::count(person_wise_ranks.into_iter().chain(committed_ranks));

    Some(if crate::comparator::compare(&position_wise, &person_wise) == std::cmp::Ordering::Greater {
        person_wise
    } else {
        position_wise
    })
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Preference;
    use std::rc::Rc;

    fn space(prefs: &[(&str, &str, u32)], slots: &[(&str, u32)]) -> SearchSpace {
        let preferences = prefs
            .iter()
            .map(|(p, c, r)| ((Person::from(*p), Position::from(*c)), Preference::new(*r)))
            .collect();
        let slots = slots.iter().map(|(c, n)| (Position::from(*c), *n)).collect();
        SearchSpace::new(Rc::new(preferences), Rc::new(slots), Default::default())
    }

    #[test]
    fn selects_hardest_position_first() {
        // A's best claimant has rank 1; B's best claimant has rank 2: B is harder.
        let s = space(
            &[("P1", "A", 1), ("P2", "B", 2), ("P3", "B", 3)],
            &[("A", 1), ("B", 1)],
        );
        let branch = select(&s).unwrap();
        assert_eq!(branch.position, Position::from("B"));
        assert_eq!(branch.person, Person::from("P2"));
        assert_eq!(branch.rank, 2);
    }

    #[test]
    fn ties_broken_by_person_id() {
        let s = space(&[("Bob", "A", 1), ("Alice", "A", 1)], &[("A", 1)]);
        let branch = select(&s).unwrap();
        assert_eq!(branch.person, Person::from("Alice"));
    }

    #[test]
    fn no_candidate_returns_none() {
        let s = space(&[], &[("A", 1)]);
        assert!(select(&s).is_none());
    }

    #[test]
    fn bound_absent_when_shortlist_incomplete() {
        // A needs 2 slots filled but only 1 person wants it.
        let s = space(&[("P1", "A", 1)], &[("A", 2)]);
        assert!(compute_bound(&s).is_none());
    }

    #[test]
    fn bound_present_when_shortlists_complete() {
        let s = space(&[("P1", "A", 1), ("P2", "A", 2)], &[("A", 2)]);
        let bound = compute_bound(&s).unwrap();
        assert_eq!(bound.get(1), 1);
        assert_eq!(bound.get(2), 1);
    }
}
