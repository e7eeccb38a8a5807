//! The leximin comparator: a total order over `Distribution`s obtained by
//! scanning ranks from worst (largest) to best (smallest) and stopping at the
//! first rank where the two distributions disagree.
//!
//! # Sign convention
//! `compare(a, b)` returns `Greater` when `a` is **worse** than `b` (more
//! people at the first differing, worst rank). This lets callers write
//! "prune the subtree if its bound compares `Greater` than the current best"
//! using the natural meaning of `Ordering`. Every caller in this crate must
//! preserve this convention — do not flip it locally.

use std::cmp::Ordering;

use crate::distribution::Distribution;

/// Compares two distributions under the leximin order. See the module docs
/// for the sign convention.
pub fn compare(a: &Distribution, b: &Distribution) -> Ordering {
    let ranks = merged_ranks(a, b);
    for rank in ranks.into_iter().rev() {
        let ord = a.get(rank).cmp(&b.get(rank));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Every rank that appears (with a positive count) in either distribution,
/// sorted ascending. `compare` walks this list back-to-front so it inspects
/// the worst rank first.
fn merged_ranks(a: &Distribution, b: &Distribution) -> Vec<u32> {
    let mut ranks: Vec<u32> = a
        .iter_worst_to_best()
        .map(|(r, _)| r)
        .chain(b.iter_worst_to_best().map(|(r, _)| r))
        .collect();
    ranks.sort_unstable();
    ranks.dedup();
    ranks
}

/// True when `candidate` is no worse than `current`, i.e. the branch-and-bound
/// pruning test should *not* fire.
pub fn at_least_as_good(candidate: &Distribution, current: &Distribution) -> bool {
    compare(candidate, current) != Ordering::Greater
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
