//! # leximatch
//!
//! `leximatch` computes an optimal assignment of *people* to *positions*
//! (each with a fixed capacity) given each person's ranked preferences over
//! positions, plus optional per-cell constraints that force or forbid
//! particular assignments. Optimality is the **leximin** criterion over the
//! multiset of received ranks: the outcome in which the worst-off person is
//! as well-off as possible, breaking ties by the next-worst, and so on.
//!
//! ## Core vs. ambient layers
//! The core is a deterministic leximin branch-and-bound search: given an
//! [`Input`](prepare::Input), it provably enumerates every assignment whose
//! rank distribution is leximin-optimal. It is exposed as a resumable state
//! machine, [`StepMachine`](step::StepMachine), so a host can interleave
//! search with other work instead of blocking until the whole tree is
//! explored.
//!
//! Around that core sit two ambient layers that make the crate runnable
//! end-to-end without changing solver semantics: [`ingest`] turns the CSV
//! format described below into an `Input`, and the `leximatch` binary drives
//! the step machine to completion and prints the result.
//!
//! ## Quick example
//! ```
//! use leximatch::prepare::{seed, Input};
//! use leximatch::step::StepMachine;
//! use leximatch::common::{Person, Position, Preference};
//!
//! let mut preferences = std::collections::BTreeMap::new();
//! preferences.insert((Person::from("Alice"), Position::from("Math")), Preference::new(1));
//! preferences.insert((Person::from("Alice"), Position::from("Art")), Preference::new(2));
//! preferences.insert((Person::from("Bob"), Position::from("Math")), Preference::new(2));
//! preferences.insert((Person::from("Bob"), Position::from("Art")), Preference::new(1));
//!
//! let mut slots = std::collections::BTreeMap::new();
//! slots.insert(Position::from("Math"), 1);
//! slots.insert(Position::from("Art"), 1);
//!
//! let input = Input { slots, preferences };
//! let mut machine = StepMachine::new(seed(&input));
//! while !machine.finished() {
//!     machine.step();
//! }
//! let best = machine.result();
//! assert!(best.is_present());
//! ```
//!
//! ## Input CSV format
//! Row 1 begins with the literal header `Courses`, followed by one position
//! name per column. Row 2 begins with `Number of slots`, followed by
//! non-negative integers in matching columns. Subsequent rows give a person
//! name, then one cell per position: a positive integer rank, the rank
//! prefixed by `*` for a fixed assignment, or a token beginning with `-` for
//! a forbidden assignment.

pub mod aggregate;
pub mod branch;
pub mod comparator;
pub mod common;
pub mod distribution;
pub mod error;
pub mod ingest;
pub mod prepare;
pub mod search_space;
pub mod step;

pub use aggregate::BestResult;
pub use comparator::compare;
pub use distribution::Distribution;
pub use error::{IngestError, IngestResult};
pub use ingest::Warning;
pub use prepare::{seed, Input};
pub use step::StepMachine;
