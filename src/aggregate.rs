//! The result aggregator: holds the current best known distribution together
//! with every complete assignment that achieves it, and merges new
//! candidates in by comparator verdict. Plays the role `ddo`'s `Solver`
//! primal bookkeeping (`best_value`/`best_solution`/`set_primal`) plays for
//! an MDD solver, generalized from a single best value to a full leximin
//! distribution plus the set of ties that realize it.

use std::cmp::Ordering;

use crate::comparator::compare;
use crate::distribution::Distribution;
use crate::search_space::Assignment;

/// The best distribution found so far, together with every complete
/// assignment that realizes it. `None` means no feasible complete
/// assignment has been discovered yet.
#[derive(Clone, Debug, Default)]
pub struct BestResult {
    inner: Option<(Distribution, Vec<Assignment>)>,
}

impl BestResult {
    pub fn none() -> Self {
        BestResult { inner: None }
    }

    pub fn distribution(&self) -> Option<&Distribution> {
        self.inner.as_ref().map(|(d, _)| d)
    }

    pub fn assignments(&self) -> Option<&[Assignment]> {
        self.inner.as_ref().map(|(_, a)| a.as_slice())
    }

    pub fn is_present(&self) -> bool {
        self.inner.is_some()
    }

    /// Merges a single candidate complete assignment and its distribution
    /// into the current best:
    /// - no best yet -> replace
    /// - candidate strictly better -> replace
    /// - candidate tied -> append to the assignment list
    /// - candidate worse -> discard
    pub fn merge(&mut self, distribution: Distribution, assignment: Assignment) {
        match &mut self.inner {
            None => {
                self.inner = Some((distribution, vec![assignment]));
            }
            Some((best_distribution, assignments)) => match compare(&distribution, best_distribution) {
                Ordering::Less => {
                    *best_distribution = distribution;
                    *assignments = vec![assignment];
                }
                Ordering::Equal => {
                    assignments.push(assignment);
                }
                Ordering::Greater => {
                    // candidate is worse: discard
                }
            },
        }
    }

    /// Projects every tied assignment after the first into its *difference*
    /// against the first: entries where the position differs. A pure view
    /// operation; never mutates the stored result set.
    pub fn tidy(&self) -> Vec<Assignment> {
        let Some((_, assignments)) = &self.inner else {
            return Vec::new();
        };
        let Some(first) = assignments.first() else {
            return Vec::new();
        };

        let mut out = vec![first.clone()];
        for candidate in &assignments[1..] {
            let mut diff: Assignment = Assignment::new();
            for (person, placement) in candidate.iter() {
                if first.get(person) != Some(placement) {
                    diff.insert(person.clone(), placement.clone());
                }
            }
            out.push(diff);
        }
        out
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
