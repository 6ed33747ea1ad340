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

//! Search strategies: which open node to explore next.
//!
//! Depth-first quickly walks down (always into the cheapest child) to reach
//! a feasible solution; best-first raises the lower bound quickly but takes
//! long to find anything feasible. `DfsBfs` combines the two: it dives
//! depth-first until a feasible solution (or a prune) is observed, then
//! re-sorts the open set so the cheapest open node comes next.
//!
//! Queues hold non-owning node handles; entries pruned in the meantime are
//! discarded lazily when they surface.

use crate::tree::{NodeId, SearchTree};
use cetsp_core::num::fuzzy_cmp;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::cmp::Ordering;

/// Lower bounds within this distance count as equal for queue ordering.
const BOUND_TIE_TOLERANCE: f64 = 0.001;

/// Queue discipline over open nodes.
pub trait SearchStrategy {
    /// Seeds the queue with the root.
    fn init(&mut self, tree: &SearchTree, root: NodeId);

    /// Called after `node` has branched; enqueues its children.
    fn notify_of_branch(&mut self, tree: &SearchTree, node: NodeId);

    /// Called when the last explored node was feasible.
    fn notify_of_feasible(&mut self, _tree: &SearchTree, _node: NodeId) {}

    /// Called when the last explored node was pruned.
    fn notify_of_prune(&mut self, _tree: &SearchTree, _node: NodeId) {}

    /// The next node to explore; it will not be returned again.
    fn next(&mut self, tree: &SearchTree) -> Option<NodeId>;

    /// Returns true if an open node is left.
    fn has_next(&mut self, tree: &SearchTree) -> bool;
}

/// Orders nodes by descending lower bound so the cheapest node sits at the
/// back of the queue; near-ties are broken by the longer relaxation first.
fn descending_bound_order(tree: &SearchTree, a: NodeId, b: NodeId) -> Ordering {
    let bound_a = tree.lower_bound(a);
    let bound_b = tree.lower_bound(b);
    fuzzy_cmp(bound_b, bound_a, BOUND_TIE_TOLERANCE).then_with(|| {
        let obj_a = tree.node(a).relaxation().obj();
        let obj_b = tree.node(b).relaxation().obj();
        obj_b.partial_cmp(&obj_a).unwrap_or(Ordering::Equal)
    })
}

fn sorted_children(tree: &SearchTree, node: NodeId) -> Vec<NodeId> {
    let mut children = tree.node(node).children().to_vec();
    children.sort_by(|&a, &b| descending_bound_order(tree, a, b));
    children
}

fn pop_skipping_pruned(queue: &mut Vec<NodeId>, tree: &SearchTree) -> Option<NodeId> {
    while let Some(&back) = queue.last() {
        if tree.is_pruned(back) {
            queue.pop();
        } else {
            return queue.pop();
        }
    }
    None
}

fn trim_pruned_back(queue: &mut Vec<NodeId>, tree: &SearchTree) -> bool {
    while let Some(&back) = queue.last() {
        if tree.is_pruned(back) {
            queue.pop();
        } else {
            return true;
        }
    }
    false
}

/// Depth-first into the cheapest child, always.
#[derive(Debug, Default)]
pub struct CheapestChildDepthFirst {
    queue: Vec<NodeId>,
}

impl CheapestChildDepthFirst {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SearchStrategy for CheapestChildDepthFirst {
    fn init(&mut self, _tree: &SearchTree, root: NodeId) {
        self.queue.push(root);
    }

    fn notify_of_branch(&mut self, tree: &SearchTree, node: NodeId) {
        self.queue.extend(sorted_children(tree, node));
    }

    fn next(&mut self, tree: &SearchTree) -> Option<NodeId> {
        pop_skipping_pruned(&mut self.queue, tree)
    }

    fn has_next(&mut self, tree: &SearchTree) -> bool {
        trim_pruned_back(&mut self.queue, tree)
    }
}

/// Depth-first until a feasible solution (or a prune) is observed, then the
/// open set is re-sorted so the cheapest open node comes next.
#[derive(Debug, Default)]
pub struct DfsBfs {
    queue: Vec<NodeId>,
}

impl DfsBfs {
    pub fn new() -> Self {
        Self::default()
    }

    fn prioritize_cheapest(&mut self, tree: &SearchTree) {
        self.queue
            .sort_by(|&a, &b| descending_bound_order(tree, a, b));
    }
}

impl SearchStrategy for DfsBfs {
    fn init(&mut self, _tree: &SearchTree, root: NodeId) {
        self.queue.push(root);
    }

    fn notify_of_branch(&mut self, tree: &SearchTree, node: NodeId) {
        self.queue.extend(sorted_children(tree, node));
    }

    fn notify_of_feasible(&mut self, tree: &SearchTree, _node: NodeId) {
        self.prioritize_cheapest(tree);
    }

    fn notify_of_prune(&mut self, tree: &SearchTree, _node: NodeId) {
        self.prioritize_cheapest(tree);
    }

    fn next(&mut self, tree: &SearchTree) -> Option<NodeId> {
        pop_skipping_pruned(&mut self.queue, tree)
    }

    fn has_next(&mut self, tree: &SearchTree) -> bool {
        trim_pruned_back(&mut self.queue, tree)
    }
}

/// Pure best-first: the whole open set is re-sorted after every branch.
#[derive(Debug, Default)]
pub struct CheapestBreadthFirst {
    queue: Vec<NodeId>,
}

impl CheapestBreadthFirst {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SearchStrategy for CheapestBreadthFirst {
    fn init(&mut self, _tree: &SearchTree, root: NodeId) {
        self.queue.push(root);
    }

    fn notify_of_branch(&mut self, tree: &SearchTree, node: NodeId) {
        self.queue.extend(tree.node(node).children());
        self.queue
            .sort_by(|&a, &b| descending_bound_order(tree, a, b));
    }

    fn next(&mut self, tree: &SearchTree) -> Option<NodeId> {
        pop_skipping_pruned(&mut self.queue, tree)
    }

    fn has_next(&mut self, tree: &SearchTree) -> bool {
        trim_pruned_back(&mut self.queue, tree)
    }
}

/// Pops a uniformly random open node; ablations only.
#[derive(Debug)]
pub struct RandomNextNode {
    queue: Vec<NodeId>,
    rng: StdRng,
}

impl RandomNextNode {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// A reproducible variant for tests and benchmarks.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            queue: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomNextNode {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStrategy for RandomNextNode {
    fn init(&mut self, _tree: &SearchTree, root: NodeId) {
        self.queue.push(root);
    }

    fn notify_of_branch(&mut self, tree: &SearchTree, node: NodeId) {
        self.queue.extend(tree.node(node).children());
    }

    fn next(&mut self, tree: &SearchTree) -> Option<NodeId> {
        while !self.queue.is_empty() {
            let at = self.rng.gen_range(0..self.queue.len());
            let node = self.queue.swap_remove(at);
            if !tree.is_pruned(node) {
                return Some(node);
            }
        }
        None
    }

    fn has_next(&mut self, tree: &SearchTree) -> bool {
        self.queue.retain(|&node| !tree.is_pruned(node));
        !self.queue.is_empty()
    }
}
