// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Cetsp-BnB: exact branch-and-bound for the close-enough TSP
//!
//! Solves the close-enough traveling salesman problem to a user-specified
//! optimality gap. Nodes of the search tree fix a *sequence* of disks; the
//! cone relaxation turns a sequence into its optimal trajectory, whose
//! length bounds every completion from below. Branching inserts the most
//! distant uncovered disk at every position of the sequence, filtered by
//! convex-hull ordering rules that prove large classes of sequences cannot
//! be optimal.
//!
//! Core flow
//! - Build a `cetsp_model::Instance`.
//! - Choose a `root::RootNodeStrategy`, a `branching::BranchingStrategy`
//!   (with optional `rules`), and a `search::SearchStrategy`.
//! - Optionally warm-start via `heuristics` and register `callbacks`.
//! - Run `bnb::BranchAndBound::optimize`.
//!
//! Module map
//! - `bnb`: the driver and its main loop.
//! - `branching`: branch disk selection and insertion enumeration.
//! - `callbacks`: user hooks around node exploration (lazy constraints).
//! - `heuristics`: 2-opt construction for warm starts.
//! - `pool`: the monotone best-solution store (upper bound).
//! - `relaxation`: sequence-anchored relaxed solutions.
//! - `result`: termination reasons.
//! - `root`: initial sequence construction.
//! - `rules`: convex-hull sequence filters.
//! - `search`: open-node queue disciplines.
//! - `stats`: run counters.
//! - `tree`: the node arena with bound propagation.

pub mod bnb;
pub mod branching;
pub mod callbacks;
pub mod error;
pub mod heuristics;
pub mod pool;
pub mod relaxation;
pub mod result;
pub mod root;
pub mod rules;
pub mod search;
pub mod stats;
pub mod tree;

pub use bnb::BranchAndBound;
pub use error::SearchError;
pub use pool::SolutionPool;
pub use relaxation::PartialSequenceSolution;
pub use result::TerminationReason;
pub use stats::BnbStatistics;
pub use tree::{NodeId, SearchTree};
