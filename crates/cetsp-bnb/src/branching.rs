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

//! Branching strategies: how a node's solution space is split.
//!
//! The primary decision is which disk to integrate next; the produced
//! children insert it at every position of the node's sequence. Candidate
//! sequences pass through the configured sequence rules before any
//! relaxation is computed, and the surviving children are evaluated as one
//! batch on a bounded worker pool: their cone programs are mutually
//! independent, and this batch is the engine's only suspension point.
//!
//! Provided strategies:
//! - `FarthestCircle`: branch on the disk most distant from the relaxed
//!   trajectory (optionally with node simplification).
//! - `FarthestCircle::with_convex_hull_rule`: the same, pre-loaded with the
//!   global convex-hull rule.
//! - `RandomCircle`: branch on a random uncovered disk; ablations only.

use crate::error::SearchError;
use crate::pool::SolutionPool;
use crate::relaxation::PartialSequenceSolution;
use crate::rules::{GlobalConvexHullRule, SequenceRule};
use crate::tree::{NodeId, SearchTree};
use cetsp_model::{DiskIndex, Instance};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

/// Expands open nodes into children.
pub trait BranchingStrategy {
    /// Prepares the strategy (and its rules) for the tree's instance.
    fn setup(&mut self, tree: &SearchTree, pool: &SolutionPool) -> Result<(), SearchError>;

    /// Branches the node. Returns `false` if every disk is already covered
    /// (nothing to branch on); otherwise the node has adopted its children
    /// (possibly none, which prunes it) and `true` is returned.
    fn branch(&mut self, tree: &mut SearchTree, node: NodeId) -> Result<bool, SearchError>;
}

/// The disk with the maximum distance to the relaxed trajectory, or `None`
/// if the trajectory covers every disk.
fn most_distant_uncovered_disk(instance: &Instance, node: &crate::tree::Node) -> Option<DiskIndex> {
    let relaxation = node.relaxation();
    let tolerance = instance.feasibility_tolerance();
    let mut best: Option<(DiskIndex, f64)> = None;
    for (index, _) in instance.iter() {
        let distance = relaxation.distance(instance, index);
        if distance <= tolerance {
            continue;
        }
        if best.map_or(true, |(_, d)| distance > d) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

/// All disks not covered by the node's relaxed trajectory.
fn uncovered_disks(instance: &Instance, node: &crate::tree::Node) -> Vec<DiskIndex> {
    let relaxation = node.relaxation();
    let tolerance = instance.feasibility_tolerance();
    instance
        .iter()
        .filter(|(index, _)| relaxation.distance(instance, *index) > tolerance)
        .map(|(index, _)| index)
        .collect()
}

/// Enumerates the insertions of `branch_disk` into the base sequence and
/// keeps those every rule accepts.
///
/// For tours, inserting before the first element equals appending at the
/// end up to rotation, so only `len` positions are distinct; paths get all
/// `len + 1` positions.
fn insertion_candidates(
    base: &[DiskIndex],
    branch_disk: DiskIndex,
    is_path: bool,
    rules: &[Box<dyn SequenceRule>],
) -> Vec<Vec<DiskIndex>> {
    let accepted = |sequence: &[DiskIndex]| rules.iter().all(|rule| rule.is_ok(sequence));

    let mut sequence = base.to_vec();
    sequence.push(branch_disk);
    let mut candidates = Vec::with_capacity(sequence.len() + 1);
    if is_path && accepted(&sequence) {
        candidates.push(sequence.clone());
    }
    // walk the new disk towards the front, one swap at a time
    for i in (1..sequence.len()).rev() {
        sequence.swap(i, i - 1);
        if accepted(&sequence) {
            candidates.push(sequence.clone());
        }
    }
    candidates
}

/// Evaluates the candidates' relaxations as one parallel batch.
fn evaluate_candidates(
    worker_pool: &rayon::ThreadPool,
    instance: &Instance,
    candidates: Vec<Vec<DiskIndex>>,
    simplify: bool,
) -> Result<Vec<PartialSequenceSolution>, SearchError> {
    worker_pool.install(|| {
        candidates
            .into_par_iter()
            .map(|sequence| {
                let mut solution = PartialSequenceSolution::new(instance, sequence)?;
                if simplify {
                    solution.simplify();
                }
                Ok(solution)
            })
            .collect()
    })
}

fn build_worker_pool(num_threads: usize) -> Result<rayon::ThreadPool, SearchError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| SearchError::Configuration(format!("cannot build worker pool: {}", e)))
}

fn expand(
    tree: &mut SearchTree,
    node: NodeId,
    branch_disk: DiskIndex,
    simplify: bool,
    rules: &[Box<dyn SequenceRule>],
    worker_pool: &rayon::ThreadPool,
) -> Result<(), SearchError> {
    let children = {
        let instance = tree.instance();
        let node_ref = tree.node(node);
        let base = if simplify {
            node_ref.relaxation().spanning_sequence()
        } else {
            node_ref.relaxation().sequence().to_vec()
        };
        let candidates = insertion_candidates(&base, branch_disk, instance.is_path(), rules);
        evaluate_candidates(worker_pool, instance, candidates, simplify)?
    };
    tree.branch(node, children)
}

/// Branches on the disk most distanced from the relaxed trajectory.
pub struct FarthestCircle {
    simplify: bool,
    rules: Vec<Box<dyn SequenceRule>>,
    worker_pool: rayon::ThreadPool,
}

impl FarthestCircle {
    /// Creates the strategy. With `simplify` enabled, children branch from
    /// the spanning subsequence and are simplified after evaluation.
    pub fn new(simplify: bool, num_threads: usize) -> Result<Self, SearchError> {
        Ok(Self {
            simplify,
            rules: Vec::new(),
            worker_pool: build_worker_pool(num_threads)?,
        })
    }

    /// The strategy pre-loaded with the global convex-hull rule. Requires
    /// the root to obey the rule; incompatible with lazy constraints that
    /// change the hull.
    pub fn with_convex_hull_rule(simplify: bool, num_threads: usize) -> Result<Self, SearchError> {
        let mut strategy = Self::new(simplify, num_threads)?;
        strategy.add_rule(Box::new(GlobalConvexHullRule::new()));
        Ok(strategy)
    }

    /// Appends a sequence rule; rules are evaluated in insertion order.
    pub fn add_rule(&mut self, rule: Box<dyn SequenceRule>) {
        self.rules.push(rule);
    }
}

impl BranchingStrategy for FarthestCircle {
    fn setup(&mut self, tree: &SearchTree, pool: &SolutionPool) -> Result<(), SearchError> {
        let root_sequence = tree.node(tree.root()).relaxation().sequence().to_vec();
        for rule in &mut self.rules {
            rule.setup(tree.instance(), &root_sequence, pool)?;
        }
        Ok(())
    }

    fn branch(&mut self, tree: &mut SearchTree, node: NodeId) -> Result<bool, SearchError> {
        let Some(branch_disk) = most_distant_uncovered_disk(tree.instance(), tree.node(node))
        else {
            return Ok(false);
        };
        expand(
            tree,
            node,
            branch_disk,
            self.simplify,
            &self.rules,
            &self.worker_pool,
        )?;
        Ok(true)
    }
}

/// Branches on a uniformly random uncovered disk.
pub struct RandomCircle {
    simplify: bool,
    rules: Vec<Box<dyn SequenceRule>>,
    worker_pool: rayon::ThreadPool,
    rng: StdRng,
}

impl RandomCircle {
    pub fn new(simplify: bool, num_threads: usize) -> Result<Self, SearchError> {
        Ok(Self {
            simplify,
            rules: Vec::new(),
            worker_pool: build_worker_pool(num_threads)?,
            rng: StdRng::from_entropy(),
        })
    }

    /// A reproducible variant for tests and benchmarks.
    pub fn with_seed(simplify: bool, num_threads: usize, seed: u64) -> Result<Self, SearchError> {
        let mut strategy = Self::new(simplify, num_threads)?;
        strategy.rng = StdRng::seed_from_u64(seed);
        Ok(strategy)
    }

    /// Appends a sequence rule; rules are evaluated in insertion order.
    pub fn add_rule(&mut self, rule: Box<dyn SequenceRule>) {
        self.rules.push(rule);
    }
}

impl BranchingStrategy for RandomCircle {
    fn setup(&mut self, tree: &SearchTree, pool: &SolutionPool) -> Result<(), SearchError> {
        let root_sequence = tree.node(tree.root()).relaxation().sequence().to_vec();
        for rule in &mut self.rules {
            rule.setup(tree.instance(), &root_sequence, pool)?;
        }
        Ok(())
    }

    fn branch(&mut self, tree: &mut SearchTree, node: NodeId) -> Result<bool, SearchError> {
        let uncovered = uncovered_disks(tree.instance(), tree.node(node));
        if uncovered.is_empty() {
            return Ok(false);
        }
        let branch_disk = uncovered[self.rng.gen_range(0..uncovered.len())];
        expand(
            tree,
            node,
            branch_disk,
            self.simplify,
            &self.rules,
            &self.worker_pool,
        )?;
        Ok(true)
    }
}
