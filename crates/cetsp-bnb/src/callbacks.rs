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

//! User callbacks into the node exploration loop.
//!
//! Callbacks run synchronously on the driver thread, between the parallel
//! child evaluation barriers. Through the [`EventContext`] they can add
//! lazy constraint disks, inject solutions, tighten the current node's
//! bound, or prune it, and nothing else: the search strategy and the rest
//! of the tree stay out of reach.

use crate::pool::SolutionPool;
use crate::tree::{NodeId, SearchTree};
use cetsp_model::{Disk, Instance, Trajectory};

/// The driver state handed to callbacks while a node is explored.
pub struct EventContext<'a> {
    tree: &'a mut SearchTree,
    pool: &'a SolutionPool,
    node: NodeId,
    root: NodeId,
    iteration: u64,
}

impl<'a> EventContext<'a> {
    pub(crate) fn new(
        tree: &'a mut SearchTree,
        pool: &'a SolutionPool,
        node: NodeId,
        root: NodeId,
        iteration: u64,
    ) -> Self {
        Self {
            tree,
            pool,
            node,
            root,
            iteration,
        }
    }

    /// The node currently being explored.
    #[inline]
    pub fn current_node(&self) -> NodeId {
        self.node
    }

    /// The root of the search tree.
    #[inline]
    pub fn root_node(&self) -> NodeId {
        self.root
    }

    /// The instance under optimization.
    #[inline]
    pub fn instance(&self) -> &Instance {
        self.tree.instance()
    }

    /// The driver's iteration counter.
    #[inline]
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Adds a disk as a lazy constraint. Accepted additions bump the
    /// instance revision and invalidate confirmed-feasible nodes.
    pub fn add_lazy_disk(&mut self, disk: Disk) {
        self.tree.add_lazy_disk(disk);
    }

    /// Injects a feasible trajectory into the solution pool. The caller
    /// guarantees it covers every disk, lazy constraints included.
    pub fn add_solution(&mut self, trajectory: Trajectory) {
        self.pool.add(trajectory);
    }

    /// Tightens the current node's lower bound.
    pub fn add_lower_bound(&mut self, bound: f64) {
        self.tree.add_lower_bound(self.node, bound);
    }

    /// Prunes the current node (and its subtree).
    pub fn prune_current_node(&mut self) {
        self.tree.prune(self.node);
    }

    /// The global lower bound (the root's bound).
    #[inline]
    pub fn lower_bound(&self) -> f64 {
        self.tree.lower_bound(self.root)
    }

    /// The incumbent upper bound.
    #[inline]
    pub fn upper_bound(&self) -> f64 {
        self.pool.upper_bound()
    }

    /// Returns true if the current node is pruned.
    #[inline]
    pub fn is_pruned(&self) -> bool {
        self.tree.is_pruned(self.node)
    }

    /// Checks the current node's feasibility (revision-aware).
    pub fn is_feasible(&mut self) -> bool {
        self.tree.is_feasible(self.node)
    }

    /// The current node's relaxed trajectory.
    pub fn relaxed_trajectory(&self) -> &Trajectory {
        self.tree.node(self.node).relaxation().trajectory()
    }

    /// A clone of the best solution found so far, if any.
    pub fn best_solution(&self) -> Option<Trajectory> {
        self.pool.best()
    }
}

/// User hooks invoked around every node exploration.
///
/// All hooks default to no-ops; implement only what you need.
pub trait NodeCallback {
    /// Invoked when the driver starts exploring a node.
    fn on_entering_node(&mut self, _context: &mut EventContext) {}

    /// Invoked on feasible nodes before their trajectory enters the pool;
    /// the place to add violated lazy constraints.
    fn add_lazy_constraints(&mut self, _context: &mut EventContext) {}

    /// Invoked when the driver is done with the node.
    fn on_leaving_node(&mut self, _context: &mut EventContext) {}
}

/// A callback that does nothing; useful as a placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOperationCallback;

impl NodeCallback for NoOperationCallback {}

#[cfg(test)]
mod tests {
    use super::*;
    use cetsp_core::geom::Point;
    use cetsp_model::DiskIndex;

    fn disk(x: f64, y: f64, r: f64) -> Disk {
        Disk::new(Point::new(x, y), r)
    }

    fn context_fixture() -> (SearchTree, SolutionPool) {
        let instance = Instance::new(vec![disk(0.0, 0.0, 1.0), disk(3.0, 0.0, 1.0)]);
        let tree = SearchTree::new(
            instance,
            vec![DiskIndex::new(0), DiskIndex::new(1)],
        )
        .unwrap();
        (tree, SolutionPool::new())
    }

    #[test]
    fn test_context_reads_bounds() {
        let (mut tree, pool) = context_fixture();
        let root = tree.root();
        let context = EventContext::new(&mut tree, &pool, root, root, 0);
        assert!((context.lower_bound() - 2.0).abs() < 1e-6);
        assert_eq!(context.upper_bound(), f64::INFINITY);
        assert_eq!(context.iteration(), 0);
    }

    #[test]
    fn test_context_mutations_reach_tree_and_pool() {
        let (mut tree, pool) = context_fixture();
        let root = tree.root();
        {
            let mut context = EventContext::new(&mut tree, &pool, root, root, 3);
            assert!(context.is_feasible());
            context.add_lazy_disk(disk(50.0, 0.0, 1.0));
            assert!(!context.is_feasible());

            let trajectory = Trajectory::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
            context.add_solution(trajectory);
            context.add_lower_bound(10.0);
        }
        assert_eq!(tree.instance().len(), 3);
        assert_eq!(pool.upper_bound(), 1.0);
        assert_eq!(tree.lower_bound(tree.root()), 10.0);
    }

    #[test]
    fn test_prune_via_context() {
        let (mut tree, pool) = context_fixture();
        let root = tree.root();
        {
            let mut context = EventContext::new(&mut tree, &pool, root, root, 0);
            assert!(!context.is_pruned());
            context.prune_current_node();
            assert!(context.is_pruned());
        }
        assert!(tree.is_pruned(root));
    }
}
