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

//! The branch-and-bound driver.
//!
//! The main loop is single-threaded and cooperative: pop a node, prune it
//! against the incumbent, run the user callbacks, then either feed its
//! trajectory to the pool (feasible) or expand it (infeasible). The only
//! parallel section is the batch evaluation of sibling children inside the
//! branching strategy; the driver blocks on that barrier before recording
//! anything.
//!
//! Termination is cooperative too: the wall clock is checked between
//! iterations, in-flight child evaluations are never interrupted. The run
//! ends when the incumbent is within the requested gap of the root bound,
//! when the tree is exhausted, or when the time budget runs out.

use crate::branching::BranchingStrategy;
use crate::callbacks::{EventContext, NodeCallback};
use crate::error::SearchError;
use crate::pool::SolutionPool;
use crate::result::TerminationReason;
use crate::root::RootNodeStrategy;
use crate::search::SearchStrategy;
use crate::stats::BnbStatistics;
use crate::tree::{NodeId, SearchTree};
use cetsp_model::{Instance, Trajectory};
use std::time::{Duration, Instant};

/// The exact close-enough TSP solver.
pub struct BranchAndBound {
    tree: SearchTree,
    pool: SolutionPool,
    branching: Box<dyn BranchingStrategy>,
    search: Box<dyn SearchStrategy>,
    callbacks: Vec<Box<dyn NodeCallback>>,
    stats: BnbStatistics,
    iterations: u64,
    /// Minimum bound over all subtrees pruned against the incumbent. The
    /// tree's root bound ignores pruned subtrees, so without this floor it
    /// could overshoot the bound the run actually proved (up to `+inf`
    /// when bound pruning empties the tree).
    bound_prune_floor: f64,
}

impl BranchAndBound {
    /// Builds the solver: the root strategy produces the initial sequence,
    /// the branching strategy (and its rules) is validated against it, and
    /// the search strategy is seeded with the root node.
    pub fn new(
        instance: Instance,
        root_strategy: &dyn RootNodeStrategy,
        mut branching: Box<dyn BranchingStrategy>,
        mut search: Box<dyn SearchStrategy>,
    ) -> Result<Self, SearchError> {
        let root_sequence = root_strategy.root_sequence(&instance)?;
        let tree = SearchTree::new(instance, root_sequence)?;
        let pool = SolutionPool::new();
        branching.setup(&tree, &pool)?;
        search.init(&tree, tree.root());
        Ok(Self {
            tree,
            pool,
            branching,
            search,
            callbacks: Vec::new(),
            stats: BnbStatistics::default(),
            iterations: 0,
            bound_prune_floor: f64::INFINITY,
        })
    }

    /// Adds a feasible trajectory as an upper bound. It must also obey all
    /// lazy constraints the callbacks will add. Adding good solutions early
    /// lets the search prune aggressively; only the best one is used.
    pub fn add_upper_bound(&mut self, trajectory: Trajectory) {
        self.pool.add(trajectory);
    }

    /// Adds an external lower bound to the root of the tree.
    pub fn add_lower_bound(&mut self, bound: f64) {
        let root = self.tree.root();
        self.tree.add_lower_bound(root, bound);
    }

    /// Registers a user callback; callbacks run in registration order.
    pub fn add_node_callback(&mut self, callback: Box<dyn NodeCallback>) {
        self.callbacks.push(callback);
    }

    /// The global lower bound: the root's bound, capped by the weakest
    /// bound pruning argument used so far.
    pub fn lower_bound(&self) -> f64 {
        self.tree
            .lower_bound(self.tree.root())
            .min(self.bound_prune_floor)
    }

    /// The incumbent upper bound; `+inf` without a feasible solution.
    pub fn upper_bound(&self) -> f64 {
        self.pool.upper_bound()
    }

    /// A clone of the best solution found so far.
    pub fn solution(&self) -> Option<Trajectory> {
        self.pool.best()
    }

    /// The instance under optimization (lazy constraints included).
    pub fn instance(&self) -> &Instance {
        self.tree.instance()
    }

    /// Aggregate counters of the run so far.
    pub fn statistics(&self) -> &BnbStatistics {
        &self.stats
    }

    /// Runs the search until the gap is proven, the tree is exhausted, or
    /// the time limit expires.
    pub fn optimize(
        &mut self,
        time_limit: Duration,
        gap: f64,
        verbose: bool,
    ) -> Result<TerminationReason, SearchError> {
        debug_assert!(
            gap >= 0.0,
            "called `BranchAndBound::optimize` with negative gap {}",
            gap
        );
        let start = Instant::now();
        if verbose {
            println!("{:>10}  {:>14} | {:<14}", "iter", "LB", "UB");
        }

        let reason = loop {
            if !self.step(gap)? {
                break TerminationReason::TreeExhausted;
            }
            let lower = self.lower_bound();
            let upper = self.upper_bound();
            if verbose && Self::should_log(self.iterations) {
                println!("{:>10}  {:>14.6} | {:<14.6}", self.iterations, lower, upper);
            }
            if upper <= (1.0 + gap) * lower {
                break TerminationReason::GapProven;
            }
            self.iterations += 1;
            self.stats.on_iteration();
            if start.elapsed() >= time_limit {
                if verbose {
                    println!("Timeout.");
                }
                break TerminationReason::TimeLimit;
            }
        };

        self.stats.set_bounds(self.lower_bound(), self.upper_bound());
        self.stats.set_elapsed(start.elapsed());
        if verbose {
            println!("---------------");
            println!(
                "{:>10}  {:>14.6} | {:<14.6}",
                self.iterations,
                self.lower_bound(),
                self.upper_bound()
            );
        }
        Ok(reason)
    }

    fn should_log(iteration: u64) -> bool {
        iteration <= 10
            || (iteration < 100 && iteration % 10 == 0)
            || iteration % 100 == 0
    }

    /// Explores one node. Returns `false` once the queue is exhausted.
    fn step(&mut self, gap: f64) -> Result<bool, SearchError> {
        let Some(node) = self.search.next(&self.tree) else {
            return Ok(false);
        };

        // Prune against the incumbent before doing any work.
        if self.tree.is_pruned(node)
            || self.tree.lower_bound(node) >= (1.0 - gap) * self.pool.upper_bound()
        {
            self.prune_and_notify(node);
            return Ok(true);
        }

        self.stats.on_node_explored();
        let root = self.tree.root();
        let bound_before_callbacks = self.tree.lower_bound(node);
        self.for_each_callback(node, root, |callback, context| {
            callback.on_entering_node(context)
        });
        if self.tree.is_pruned(node) {
            // a callback cut the node off; its pre-callback bound still
            // holds for the discarded subtree
            self.bound_prune_floor = self.bound_prune_floor.min(bound_before_callbacks);
            self.for_each_callback(node, root, |callback, context| {
                callback.on_leaving_node(context)
            });
            return Ok(true);
        }

        if self.tree.is_feasible(node) {
            // give the callbacks a chance to cut the solution off
            self.for_each_callback(node, root, |callback, context| {
                callback.add_lazy_constraints(context)
            });
        }
        if self.tree.is_feasible(node) {
            // feasibility survived the lazy constraints
            let trajectory = self.tree.node(node).relaxation().trajectory().clone();
            if self.pool.add(trajectory) {
                self.stats.on_solution_found();
            }
            self.search.notify_of_feasible(&self.tree, node);
        } else if self.tree.lower_bound(node) >= (1.0 - gap) * self.pool.upper_bound() {
            // lazy constraints or callbacks may have moved the bounds
            self.prune_and_notify(node);
        } else if self.branching.branch(&mut self.tree, node)? {
            self.stats.on_branch();
            self.search.notify_of_branch(&self.tree, node);
        }

        self.for_each_callback(node, root, |callback, context| {
            callback.on_leaving_node(context)
        });
        Ok(true)
    }

    fn prune_and_notify(&mut self, node: NodeId) {
        self.bound_prune_floor = self.bound_prune_floor.min(self.tree.lower_bound(node));
        self.tree.prune(node);
        self.stats.on_pruning_bound();
        self.search.notify_of_prune(&self.tree, node);
    }

    fn for_each_callback(
        &mut self,
        node: NodeId,
        root: NodeId,
        mut invoke: impl FnMut(&mut dyn NodeCallback, &mut EventContext),
    ) {
        for callback in &mut self.callbacks {
            let mut context =
                EventContext::new(&mut self.tree, &self.pool, node, root, self.iterations);
            invoke(callback.as_mut(), &mut context);
        }
    }
}
