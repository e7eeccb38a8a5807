//! The resumable search driver: a state machine that advances one
//! branch-or-backtrack unit of work per call to `step`, so a host can
//! interleave search with other work.
//!
//! Generalizes `ddo`'s one-shot `Solver::maximize` (`abstraction/solver.rs`)
//! into a steppable value: instead of a single blocking call that walks the
//! whole fringe, `Frame` holds exactly the continuation needed to resume —
//! the linked-list-of-siblings shape instead of native call-stack recursion.

use crate::aggregate::BestResult;
use crate::branch::select;
use crate::comparator::at_least_as_good;
use crate::search_space::SearchSpace;

/// The continuation of branches yet to try: either the search is done, or
/// there is a node to examine followed by whatever comes after it.
#[derive(Debug)]
pub enum Frame {
    /// Search is complete; nothing left to explore.
    Finish,
    /// Examine `space` next; `next` is the sibling/parent continuation to
    /// resume once this subtree is fully explored.
    Step(Box<SearchSpace>, Box<Frame>),
}

impl Frame {
    pub fn start(initial: SearchSpace) -> Self {
        Frame::Step(Box::new(initial), Box::new(Frame::Finish))
    }

    pub fn is_finish(&self) -> bool {
        matches!(self, Frame::Finish)
    }
}

/// Drives the search. Owns the current continuation and the best result
/// accumulated so far.
#[derive(Debug)]
pub struct StepMachine {
    top: Frame,
    best: BestResult,
}

impl StepMachine {
    pub fn new(initial: SearchSpace) -> Self {
        StepMachine { top: Frame::start(initial), best: BestResult::none() }
    }

    /// True iff the top continuation is `Finish`. Once true, `result()` is
    /// final and further calls to `step` are no-ops.
    pub fn finished(&self) -> bool {
        self.top.is_finish()
    }

    /// The accumulated best result: `None` if no feasible complete
    /// assignment has been found yet (or ever, if infeasible).
    pub fn result(&self) -> &BestResult {
        &self.best
    }

    /// Advances the search by one branch-or-backtrack unit of work. A no-op
    /// once `finished()` is true.
    pub fn step(&mut self) {
        let top = std::mem::replace(&mut self.top, Frame::Finish);
        let Frame::Step(space, next) = top else {
            // top was already Finish; mem::replace above already restored it.
            return;
        };

        match select(&space) {
            None if space.is_complete() => {
                self.best.merge(distribution_of(&space), space.partial.clone());
                self.top = *next;
            }
            None => {
                // no candidate and not complete: infeasible node, discard.
                self.top = *next;
            }
            Some(branch) => {
                let prune = match &branch.bound {
                    None => true,
                    Some(bound) => match self.best.distribution() {
                        None => false,
                        Some(current) => !at_least_as_good(bound, current),
                    },
                };
                if prune {
                    self.top = *next;
                } else {
                    let taken = space.assign(&branch.person, &branch.position, branch.rank);
                    let skipped = space.drop_preference(&branch.person, &branch.position);
                    self.top = Frame::Step(Box::new(taken), Box::new(Frame::Step(Box::new(skipped), next)));
                }
            }
        }
    }

    /// Runs `step` until `finished()`, or until `budget` steps have been
    /// taken, whichever comes first. Returns the number of steps actually
    /// taken — the host can use this to interleave batches of work with
    /// other responsibilities, e.g. a GUI event loop calling `step` a fixed
    /// number of times per frame.
    pub fn run_batch(&mut self, budget: usize) -> usize {
        let mut taken = 0;
        while taken < budget && !self.finished() {
            self.step();
            taken += 1;
        }
        taken
    }
}

/// The distribution induced by a complete assignment: the ranks its
/// placements carry.
fn distribution_of(space: &SearchSpace) -> crate::distribution::Distribution {
    crate::distribution::Distribution::count(space.partial.values().map(|&(_, r)| r))
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
