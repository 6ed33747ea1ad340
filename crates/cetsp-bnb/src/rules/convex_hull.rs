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

//! The global convex-hull ordering rule.
//!
//! Disks that reach the convex hull boundary of the centers are assigned an
//! arc-length position along the hull. An optimal tour visits them in
//! counter-clockwise hull order; an optimal path visits them in a bitonic
//! pattern (monotonically out, then monotonically back). Candidate
//! sequences violating this cannot be optimal and are discarded.

use crate::error::SearchError;
use crate::pool::SolutionPool;
use crate::rules::{canonical_visit_order, SequenceRule};
use cetsp_core::geom::hull_order::ConvexHullOrder;
use cetsp_core::geom::Point;
use cetsp_model::{DiskIndex, Instance};
use smallvec::SmallVec;

/// Rejects sequences that contradict the convex-hull visiting order.
#[derive(Debug, Default)]
pub struct GlobalConvexHullRule {
    /// Arc-length position per disk; meaningless where `is_ordered` is false.
    order_values: Vec<f64>,
    /// Which disks lie on (or reach) the hull boundary.
    is_ordered: Vec<bool>,
    path_mode: bool,
}

impl GlobalConvexHullRule {
    /// Creates an unconfigured rule; call [`SequenceRule::setup`] before use.
    pub fn new() -> Self {
        Self::default()
    }

    fn compute_weights(&mut self, instance: &Instance) {
        let centers: Vec<Point> = instance.disks().iter().map(|d| d.center).collect();
        let hull_order = ConvexHullOrder::new(&centers);
        self.order_values = vec![0.0; instance.len()];
        self.is_ordered = vec![false; instance.len()];
        for (i, disk) in instance.disks().iter().enumerate() {
            if let Some(weight) = hull_order.order_value(disk.center, disk.radius) {
                self.order_values[i] = weight;
                self.is_ordered[i] = true;
            }
        }
    }

    fn sequence_is_hull_ordered(&self, sequence: &[DiskIndex]) -> bool {
        if self.path_mode {
            is_path_visit_order_possible(sequence, &self.is_ordered, &self.order_values)
        } else {
            let mut values: SmallVec<[f64; 16]> = sequence
                .iter()
                .filter(|i| self.is_ordered[i.get()])
                .map(|i| self.order_values[i.get()])
                .collect();
            // the minimal element may sit in the middle of the cycle
            if let Some(min_at) = values
                .iter()
                .enumerate()
                .min_by(|a, b| a.1.partial_cmp(b.1).unwrap())
                .map(|(i, _)| i)
            {
                values.rotate_left(min_at);
            }
            values.windows(2).all(|w| w[0] <= w[1])
        }
    }
}

impl SequenceRule for GlobalConvexHullRule {
    fn setup(
        &mut self,
        instance: &Instance,
        root_sequence: &[DiskIndex],
        _pool: &SolutionPool,
    ) -> Result<(), SearchError> {
        self.path_mode = instance.is_path();
        self.compute_weights(instance);
        if !self.is_ok(root_sequence) {
            return Err(SearchError::Configuration(
                "root sequence does not obey the convex hull order".into(),
            ));
        }
        Ok(())
    }

    fn is_ok(&self, sequence: &[DiskIndex]) -> bool {
        self.sequence_is_hull_ordered(sequence)
    }
}

/// Checks whether a path may visit the hull-ordered disks in the given
/// sequence: the visits must run monotonically along the hull in one
/// direction, then monotonically back.
pub fn is_path_visit_order_possible(
    sequence: &[DiskIndex],
    is_ordered: &[bool],
    order_values: &[f64],
) -> bool {
    // rank the ordered disks by arc-length position: rank == hull position
    let mut ordered: Vec<usize> = (0..is_ordered.len()).filter(|&i| is_ordered[i]).collect();
    ordered.sort_by(|&a, &b| order_values[a].partial_cmp(&order_values[b]).unwrap());
    let mut hull_position = vec![None; is_ordered.len()];
    for (rank, &disk) in ordered.iter().enumerate() {
        hull_position[disk] = Some(rank);
    }

    let mut visits_by_position = vec![None; ordered.len()];
    let mut visit_num = 0usize;
    for index in sequence {
        if let Some(position) = hull_position[index.get()] {
            visits_by_position[position] = Some(visit_num);
            visit_num += 1;
        }
    }
    if visit_num <= 2 {
        return true;
    }
    let hull_visits: Vec<usize> = visits_by_position.into_iter().flatten().collect();
    canonical_visit_order(hull_visits, true).is_some()
}
