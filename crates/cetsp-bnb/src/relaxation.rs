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

//! The relaxed solution anchored at a fixed disk sequence.
//!
//! A `PartialSequenceSolution` wraps a sequence of disk indices together
//! with the optimal trajectory through that order and the spanning mask
//! reported by the relaxation. Its length is a lower bound for every
//! completion of the sequence, which is what makes it the backbone of a
//! search tree node.

use crate::error::SearchError;
use cetsp_core::geom::Point;
use cetsp_model::{Disk, DiskIndex, Instance, Trajectory};
use cetsp_socp::{shortest_trajectory, SocpSettings};
use fixedbitset::FixedBitSet;

/// A disk sequence with its optimal trajectory and spanning mask.
#[derive(Debug, Clone)]
pub struct PartialSequenceSolution {
    sequence: Vec<DiskIndex>,
    trajectory: Trajectory,
    spanning: FixedBitSet,
    /// Path mode; a closed trajectory alone cannot tell (a path whose
    /// endpoints coincide looks like a tour).
    path: bool,
    feasible: Option<bool>,
    simplified: bool,
}

impl PartialSequenceSolution {
    /// Computes the relaxation for the given sequence.
    ///
    /// Tour instances reject empty sequences; a path instance accepts them
    /// (the trajectory is the straight connection of the endpoints).
    pub fn new(instance: &Instance, sequence: Vec<DiskIndex>) -> Result<Self, SearchError> {
        if instance.is_tour() && sequence.is_empty() {
            return Err(SearchError::Invariant(
                "cannot compute a tour trajectory from an empty sequence",
            ));
        }
        debug_assert!(
            sequence.iter().all(|i| i.get() < instance.len()),
            "called `PartialSequenceSolution::new` with a disk index out of bounds: the len is {}",
            instance.len()
        );

        let settings = SocpSettings::default();
        let k = sequence.len();
        let (trajectory, spanning) = match instance.path_endpoints() {
            None => {
                let disks: Vec<Disk> = sequence.iter().map(|&i| *instance.disk(i)).collect();
                let relaxed = shortest_trajectory(&disks, false, &settings)?;
                let mut mask = FixedBitSet::with_capacity(k);
                for (i, &s) in relaxed.spanning().iter().enumerate() {
                    mask.set(i, s);
                }
                (Trajectory::closed(relaxed.into_points()), mask)
            }
            Some((start, end)) => {
                let mut disks: Vec<Disk> = Vec::with_capacity(k + 2);
                disks.push(Disk::point(start));
                disks.extend(sequence.iter().map(|&i| *instance.disk(i)));
                disks.push(Disk::point(end));
                let relaxed = shortest_trajectory(&disks, true, &settings)?;
                // the endpoint pseudo-disks are not part of the sequence
                let mut mask = FixedBitSet::with_capacity(k);
                for (i, &s) in relaxed.spanning()[1..=k].iter().enumerate() {
                    mask.set(i, s);
                }
                (Trajectory::new(relaxed.into_points()), mask)
            }
        };

        Ok(Self {
            sequence,
            trajectory,
            spanning,
            path: instance.is_path(),
            feasible: None,
            simplified: false,
        })
    }

    /// The disk sequence anchoring this solution.
    #[inline]
    pub fn sequence(&self) -> &[DiskIndex] {
        &self.sequence
    }

    /// The relaxed trajectory (closed for tours, open for paths).
    #[inline]
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// The objective value: the trajectory length.
    #[inline]
    pub fn obj(&self) -> f64 {
        self.trajectory.length()
    }

    /// Distance from the trajectory to the given disk.
    #[inline]
    pub fn distance(&self, instance: &Instance, index: DiskIndex) -> f64 {
        self.trajectory.distance(instance.disk(index))
    }

    /// Returns true if the trajectory covers the given disk within the
    /// instance tolerance.
    #[inline]
    pub fn covers(&self, instance: &Instance, index: DiskIndex) -> bool {
        self.distance(instance, index) <= instance.feasibility_tolerance()
    }

    /// Returns true if the trajectory covers every disk of the instance.
    /// Memoized; see the search tree for revision-aware re-checks.
    pub fn is_feasible(&mut self, instance: &Instance) -> bool {
        if self.feasible.is_none() {
            self.feasible = Some(
                self.trajectory
                    .covers_all(instance.disks(), instance.feasibility_tolerance()),
            );
        }
        self.feasible.unwrap()
    }

    /// Returns true if the sequence position `i` spans the trajectory.
    #[inline]
    pub fn is_spanning(&self, i: usize) -> bool {
        self.spanning.contains(i)
    }

    /// The subsequence of disk indices at spanning positions.
    pub fn spanning_sequence(&self) -> Vec<DiskIndex> {
        self.sequence
            .iter()
            .enumerate()
            .filter(|(i, _)| self.spanning.contains(*i))
            .map(|(_, &d)| d)
            .collect()
    }

    /// The hitting point of sequence position `i`.
    #[inline]
    pub fn hitting_point(&self, i: usize) -> Point {
        if self.path {
            self.trajectory.point(i + 1)
        } else {
            self.trajectory.point(i)
        }
    }

    /// Rewrites the sequence to its spanning positions and rebuilds the
    /// trajectory through their hitting points.
    ///
    /// Idempotent, does not change the objective, and does not change
    /// feasibility. It does change which insertions the branching layer
    /// enumerates, which is why it is opt-in there.
    pub fn simplify(&mut self) {
        if self.simplified {
            return;
        }
        let k = self.sequence.len();
        let mut points = Vec::with_capacity(k + 2);
        let mut sequence = Vec::with_capacity(k);
        let mut spanning = FixedBitSet::with_capacity(k);

        let is_path = self.path;
        if is_path {
            points.push(self.trajectory.point(0));
        }
        for i in 0..k {
            if self.spanning.contains(i) {
                points.push(self.hitting_point(i));
                spanning.set(sequence.len(), true);
                sequence.push(self.sequence[i]);
            }
        }
        if is_path {
            points.push(self.trajectory.point(self.trajectory.num_points() - 1));
            self.trajectory = Trajectory::new(points);
        } else {
            if sequence.is_empty() {
                // a fully degenerate tour still needs one anchor point
                points.push(self.hitting_point(0));
                spanning.set(0, true);
                sequence.push(self.sequence[0]);
            }
            self.trajectory = Trajectory::closed(points);
        }
        self.sequence = sequence;
        self.spanning = spanning;
        self.simplified = true;
    }
}

impl std::fmt::Display for PartialSequenceSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PartialSequenceSolution(sequence: {}, obj: {:.4})",
            self.sequence.len(),
            self.obj()
        )
    }
}
