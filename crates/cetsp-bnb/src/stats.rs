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

use std::time::Duration;

/// Statistics collected during a branch-and-bound run.
#[derive(Debug, Clone, PartialEq)]
pub struct BnbStatistics {
    /// Main loop iterations.
    pub iterations: u64,
    /// Nodes popped from the queue and explored.
    pub nodes_explored: u64,
    /// Branch operations that produced children.
    pub branches: u64,
    /// Nodes pruned by the incumbent bound.
    pub prunings_bound: u64,
    /// Feasible trajectories accepted into the pool.
    pub solutions_found: u64,
    /// The global lower bound at termination.
    pub lower_bound: f64,
    /// The incumbent upper bound at termination.
    pub upper_bound: f64,
    /// Total wall-clock time of the run.
    pub elapsed: Duration,
}

impl Default for BnbStatistics {
    fn default() -> Self {
        Self {
            iterations: 0,
            nodes_explored: 0,
            branches: 0,
            prunings_bound: 0,
            solutions_found: 0,
            lower_bound: 0.0,
            upper_bound: f64::INFINITY,
            elapsed: Duration::ZERO,
        }
    }
}

impl BnbStatistics {
    #[inline]
    pub fn on_iteration(&mut self) {
        self.iterations = self.iterations.saturating_add(1);
    }

    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_branch(&mut self) {
        self.branches = self.branches.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn set_bounds(&mut self, lower: f64, upper: f64) {
        self.lower_bound = lower;
        self.upper_bound = upper;
    }

    #[inline]
    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    /// The relative optimality gap `(ub - lb) / lb`, or `+inf` without a
    /// meaningful pair of bounds.
    pub fn gap(&self) -> f64 {
        if self.lower_bound > 0.0 && self.upper_bound.is_finite() {
            (self.upper_bound - self.lower_bound) / self.lower_bound
        } else if self.upper_bound <= self.lower_bound {
            0.0
        } else {
            f64::INFINITY
        }
    }
}

impl std::fmt::Display for BnbStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CETSP BnB Statistics:")?;
        writeln!(f, "  Iterations:        {}", self.iterations)?;
        writeln!(f, "  Nodes explored:    {}", self.nodes_explored)?;
        writeln!(f, "  Branches:          {}", self.branches)?;
        writeln!(f, "  Prunings (bound):  {}", self.prunings_bound)?;
        writeln!(f, "  Solutions found:   {}", self.solutions_found)?;
        writeln!(f, "  Lower bound:       {:.6}", self.lower_bound)?;
        writeln!(f, "  Upper bound:       {:.6}", self.upper_bound)?;
        writeln!(f, "  Elapsed:           {:.2?}", self.elapsed)?;
        Ok(())
    }
}
