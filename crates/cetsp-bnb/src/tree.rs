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

//! The branch-and-bound search tree.
//!
//! An arena owns every node; parent and child links are typed indices into
//! the arena. That expresses the parent↔child cycle of the tree without
//! shared mutability: bound propagation is an index walk whose mutable
//! borrows are short-lived and non-overlapping.
//!
//! Per node the tree maintains:
//! - the relaxed solution anchored at the node's disk sequence,
//! - a lower bound that is monotone along every root-to-leaf path,
//! - the pruned flag (pruning forces the bound to `+inf` and cascades to
//!   every descendant),
//! - a feasibility verdict memoized against the instance revision, so lazy
//!   constraint additions invalidate it.

use crate::error::SearchError;
use crate::relaxation::PartialSequenceSolution;
use cetsp_core::utils::index::{TypedIndex, TypedIndexTag};
use cetsp_model::{Disk, DiskIndex, Instance};

/// A tag type for search tree node identifiers.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeIdTag;

impl TypedIndexTag for NodeIdTag {
    const NAME: &'static str = "NodeId";
}

/// A typed index identifying a node within a [`SearchTree`].
pub type NodeId = TypedIndex<NodeIdTag>;

/// Memoized feasibility verdict of a node.
///
/// Infeasibility is permanent: adding disks can never make an uncovered
/// trajectory cover everything. A positive verdict only holds for the
/// instance revision it was confirmed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeasibleMemo {
    Unknown,
    Infeasible,
    FeasibleAt(u64),
}

/// A node of the search tree.
#[derive(Debug)]
pub struct Node {
    relaxation: PartialSequenceSolution,
    lower_bound: f64,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    depth: usize,
    pruned: bool,
    feasible: FeasibleMemo,
}

impl Node {
    /// The relaxed solution anchoring this node.
    #[inline]
    pub fn relaxation(&self) -> &PartialSequenceSolution {
        &self.relaxation
    }

    /// The node's lower bound.
    #[inline]
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    /// The parent node, if any.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The adopted children.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Depth in the tree; the root has depth zero.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns true if the node has been pruned.
    #[inline]
    pub fn is_pruned(&self) -> bool {
        self.pruned
    }
}

/// Arena-owned search tree over partial sequence solutions.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<Node>,
    instance: Instance,
    root: NodeId,
}

impl SearchTree {
    /// Creates the tree with its root node anchored at `root_sequence`.
    pub fn new(instance: Instance, root_sequence: Vec<DiskIndex>) -> Result<Self, SearchError> {
        let relaxation = PartialSequenceSolution::new(&instance, root_sequence)?;
        let lower_bound = relaxation.obj();
        let root = Node {
            relaxation,
            lower_bound,
            parent: None,
            children: Vec::new(),
            depth: 0,
            pruned: false,
            feasible: FeasibleMemo::Unknown,
        };
        Ok(Self {
            nodes: vec![root],
            instance,
            root: NodeId::new(0),
        })
    }

    /// The instance this tree searches over.
    #[inline]
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// The root node identifier.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes ever created (pruned nodes included).
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The node behind the identifier.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.get()]
    }

    /// Shorthand for the node's lower bound.
    #[inline]
    pub fn lower_bound(&self, id: NodeId) -> f64 {
        self.nodes[id.get()].lower_bound
    }

    /// Adds a disk as a lazy constraint, bumping the instance revision when
    /// accepted. Nodes with confirmed feasibility fall back to "unknown" at
    /// their next feasibility check.
    pub fn add_lazy_disk(&mut self, disk: Disk) -> Option<DiskIndex> {
        self.instance.add_disk(disk)
    }

    /// Raises the node's lower bound to `lb` if that improves it, then
    /// propagates: the parent re-evaluates the minimum over its children,
    /// and descendants inherit the bound.
    pub fn add_lower_bound(&mut self, id: NodeId, lb: f64) {
        if self.nodes[id.get()].lower_bound >= lb {
            return;
        }
        self.nodes[id.get()].lower_bound = lb;
        if let Some(parent) = self.nodes[id.get()].parent {
            if self.nodes[parent.get()].lower_bound < lb {
                self.reevaluate_children(parent);
            }
        }
        let children = self.nodes[id.get()].children.clone();
        for child in children {
            self.add_lower_bound(child, lb);
        }
    }

    /// Recomputes the node's bound as the minimum over its children.
    fn reevaluate_children(&mut self, id: NodeId) {
        let children = &self.nodes[id.get()].children;
        if children.is_empty() {
            return;
        }
        let lb = children
            .iter()
            .map(|child| {
                let node = &self.nodes[child.get()];
                if node.pruned {
                    f64::INFINITY
                } else {
                    node.lower_bound
                }
            })
            .fold(f64::INFINITY, f64::min);
        self.add_lower_bound(id, lb);
    }

    /// Adopts the child solutions under `id`.
    ///
    /// An empty child list prunes the node (no legal extension exists).
    /// The node's lower bound is re-evaluated from the children, whose own
    /// bounds start at `max(relaxation length, parent bound)`.
    pub fn branch(
        &mut self,
        id: NodeId,
        children: Vec<PartialSequenceSolution>,
    ) -> Result<(), SearchError> {
        if self.nodes[id.get()].pruned {
            return Err(SearchError::Invariant("cannot branch on a pruned node"));
        }
        if children.is_empty() {
            self.prune(id);
            return Ok(());
        }

        let depth = self.nodes[id.get()].depth + 1;
        let parent_bound = self.nodes[id.get()].lower_bound;
        let mut ids = Vec::with_capacity(children.len());
        for relaxation in children {
            let lower_bound = relaxation.obj().max(parent_bound);
            ids.push(NodeId::new(self.nodes.len()));
            self.nodes.push(Node {
                relaxation,
                lower_bound,
                parent: Some(id),
                children: Vec::new(),
                depth,
                pruned: false,
                feasible: FeasibleMemo::Unknown,
            });
        }
        self.nodes[id.get()].children = ids;
        self.reevaluate_children(id);
        Ok(())
    }

    /// Marks the node as not leading to an optimal solution.
    ///
    /// Idempotent. Forces the subtree's bounds to `+inf` and prunes every
    /// descendant.
    pub fn prune(&mut self, id: NodeId) {
        if self.nodes[id.get()].pruned {
            return;
        }
        self.nodes[id.get()].pruned = true;
        self.add_lower_bound(id, f64::INFINITY);
        let children = self.nodes[id.get()].children.clone();
        for child in children {
            self.prune(child);
        }
    }

    /// Returns true if the node has been pruned.
    #[inline]
    pub fn is_pruned(&self, id: NodeId) -> bool {
        self.nodes[id.get()].pruned
    }

    /// Checks whether the node's trajectory covers every instance disk.
    ///
    /// The verdict is memoized against the instance revision: confirmed
    /// feasibility is re-verified once lazy constraints moved the revision
    /// past the one it was confirmed at. Infeasibility is final.
    pub fn is_feasible(&mut self, id: NodeId) -> bool {
        match self.nodes[id.get()].feasible {
            FeasibleMemo::FeasibleAt(revision) if revision == self.instance.revision() => true,
            FeasibleMemo::Infeasible => false,
            _ => {
                let covered = self.nodes[id.get()].relaxation.trajectory().covers_all(
                    self.instance.disks(),
                    self.instance.feasibility_tolerance(),
                );
                self.nodes[id.get()].feasible = if covered {
                    FeasibleMemo::FeasibleAt(self.instance.revision())
                } else {
                    FeasibleMemo::Infeasible
                };
                covered
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cetsp_core::geom::Point;

    fn disk(x: f64, y: f64, r: f64) -> Disk {
        Disk::new(Point::new(x, y), r)
    }

    fn seq(indices: &[usize]) -> Vec<DiskIndex> {
        indices.iter().map(|&i| DiskIndex::new(i)).collect()
    }

    fn two_disk_tree() -> SearchTree {
        let instance = Instance::new(vec![disk(0.0, 0.0, 1.0), disk(3.0, 0.0, 1.0)]);
        SearchTree::new(instance, seq(&[0, 1])).unwrap()
    }

    #[test]
    fn test_root_bound_equals_relaxation() {
        let mut tree = two_disk_tree();
        let root = tree.root();
        assert!((tree.node(root).relaxation().obj() - 2.0).abs() < 1e-6);
        assert!((tree.lower_bound(root) - 2.0).abs() < 1e-6);
        assert!(tree.is_feasible(root));
    }

    #[test]
    fn test_branch_reevaluates_parent_bound() {
        let instance = Instance::new(vec![
            disk(0.0, 0.0, 1.0),
            disk(10.0, 0.0, 1.0),
            disk(5.0, 8.0, 1.0),
        ]);
        let mut tree = SearchTree::new(instance, seq(&[0, 1])).unwrap();
        let root = tree.root();
        let root_bound = tree.lower_bound(root);

        let c1 = PartialSequenceSolution::new(tree.instance(), seq(&[0, 2, 1])).unwrap();
        let c2 = PartialSequenceSolution::new(tree.instance(), seq(&[0, 1, 2])).unwrap();
        tree.branch(root, vec![c1, c2]).unwrap();

        let children = tree.node(root).children().to_vec();
        assert_eq!(children.len(), 2);
        let min_child = children
            .iter()
            .map(|&c| tree.lower_bound(c))
            .fold(f64::INFINITY, f64::min);
        // the parent bound rises to the cheapest child
        assert!(tree.lower_bound(root) >= root_bound);
        assert!((tree.lower_bound(root) - min_child).abs() < 1e-9);

        // child bounds dominate the parent bound at adoption
        for &c in &children {
            assert!(tree.lower_bound(c) >= root_bound);
            assert!(tree.lower_bound(c) >= tree.node(c).relaxation().obj() - 1e-9);
        }
    }

    #[test]
    fn test_branching_on_pruned_node_is_an_error() {
        let mut tree = two_disk_tree();
        let root = tree.root();
        tree.prune(root);
        let child = PartialSequenceSolution::new(tree.instance(), seq(&[0, 1])).unwrap();
        assert!(matches!(
            tree.branch(root, vec![child]),
            Err(SearchError::Invariant(_))
        ));
    }

    #[test]
    fn test_empty_branch_prunes() {
        let mut tree = two_disk_tree();
        let root = tree.root();
        tree.branch(root, Vec::new()).unwrap();
        assert!(tree.is_pruned(root));
        assert_eq!(tree.lower_bound(root), f64::INFINITY);
    }

    #[test]
    fn test_prune_cascades_to_descendants() {
        let mut tree = two_disk_tree();
        let root = tree.root();
        let child = PartialSequenceSolution::new(tree.instance(), seq(&[0, 1])).unwrap();
        tree.branch(root, vec![child]).unwrap();
        let child_id = tree.node(root).children()[0];

        tree.prune(root);
        assert!(tree.is_pruned(root));
        assert!(tree.is_pruned(child_id));
        assert_eq!(tree.lower_bound(child_id), f64::INFINITY);

        // idempotent
        tree.prune(root);
        assert!(tree.is_pruned(root));
    }

    #[test]
    fn test_add_lower_bound_propagates_down() {
        let mut tree = two_disk_tree();
        let root = tree.root();
        let child = PartialSequenceSolution::new(tree.instance(), seq(&[0, 1])).unwrap();
        tree.branch(root, vec![child]).unwrap();
        let child_id = tree.node(root).children()[0];

        tree.add_lower_bound(root, 100.0);
        assert_eq!(tree.lower_bound(root), 100.0);
        assert_eq!(tree.lower_bound(child_id), 100.0);
    }

    #[test]
    fn test_lazy_disk_invalidates_feasibility() {
        let mut tree = two_disk_tree();
        let root = tree.root();
        assert!(tree.is_feasible(root));

        // an uncovered disk far away flips the verdict after re-verification
        assert!(tree.add_lazy_disk(disk(50.0, 50.0, 1.0)).is_some());
        assert!(!tree.is_feasible(root));
    }

    #[test]
    fn test_infeasible_memo_is_final() {
        let instance = Instance::new(vec![
            disk(0.0, 0.0, 1.0),
            disk(3.0, 0.0, 1.0),
            disk(40.0, 40.0, 1.0),
        ]);
        let mut tree = SearchTree::new(instance, seq(&[0, 1])).unwrap();
        let root = tree.root();
        assert!(!tree.is_feasible(root));
        assert!(!tree.is_feasible(root));
    }
}
