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

//! The problem instance: a disk collection in tour or path mode.
//!
//! Instances are normalized on construction: disks are sorted by increasing
//! radius and a disk that entirely contains an already accepted disk is
//! dropped, because it is implicitly covered. The same redundancy filter
//! applies to disks added later as lazy constraints; an accepted addition
//! bumps the `revision` counter, which invalidates feasibility verdicts
//! cached by search tree nodes.

use crate::disk::Disk;
use crate::index::DiskIndex;
use cetsp_core::geom::Point;

/// Default feasibility tolerance: a disk counts as covered when the
/// trajectory comes within this distance of it.
pub const DEFAULT_FEASIBILITY_TOLERANCE: f64 = 0.01;

/// A close-enough TSP instance.
///
/// Without endpoints the instance asks for a closed tour; with a
/// `(start, end)` pair it asks for an open path between the two fixed
/// points.
#[derive(Clone, Debug)]
pub struct Instance {
    disks: Vec<Disk>,
    path: Option<(Point, Point)>,
    revision: u64,
    feasibility_tolerance: f64,
}

impl Instance {
    /// Creates a tour instance from the given disks.
    pub fn new(disks: Vec<Disk>) -> Self {
        let mut instance = Self {
            disks: Vec::with_capacity(disks.len()),
            path: None,
            revision: 0,
            feasibility_tolerance: DEFAULT_FEASIBILITY_TOLERANCE,
        };
        instance.insert_normalized(disks);
        instance
    }

    /// Creates a path instance with fixed start and end points.
    pub fn new_path(disks: Vec<Disk>, start: Point, end: Point) -> Self {
        let mut instance = Self::new(disks);
        instance.path = Some((start, end));
        instance
    }

    /// Overrides the feasibility tolerance (default 0.01).
    pub fn with_feasibility_tolerance(mut self, tolerance: f64) -> Self {
        debug_assert!(
            tolerance >= 0.0,
            "called `Instance::with_feasibility_tolerance` with negative tolerance {}",
            tolerance
        );
        self.feasibility_tolerance = tolerance;
        self
    }

    fn insert_normalized(&mut self, mut disks: Vec<Disk>) {
        disks.sort_by(|a, b| a.radius.partial_cmp(&b.radius).unwrap());
        for disk in disks {
            if !self.is_redundant(&disk) {
                self.disks.push(disk);
            }
        }
    }

    /// A disk containing an already accepted disk is implicitly covered.
    #[inline]
    fn is_redundant(&self, disk: &Disk) -> bool {
        self.disks.iter().any(|existing| disk.contains_disk(existing))
    }

    /// Adds a disk after construction (a lazy constraint).
    ///
    /// Redundant additions are silently discarded. An accepted addition
    /// bumps the revision counter and returns the new disk's index.
    pub fn add_disk(&mut self, disk: Disk) -> Option<DiskIndex> {
        if self.is_redundant(&disk) {
            return None;
        }
        self.disks.push(disk);
        self.revision += 1;
        Some(DiskIndex::new(self.disks.len() - 1))
    }

    /// Returns true if this instance asks for a closed tour.
    #[inline]
    pub fn is_tour(&self) -> bool {
        self.path.is_none()
    }

    /// Returns true if this instance asks for an open path.
    #[inline]
    pub fn is_path(&self) -> bool {
        self.path.is_some()
    }

    /// The fixed path endpoints, if this is a path instance.
    #[inline]
    pub fn path_endpoints(&self) -> Option<(Point, Point)> {
        self.path
    }

    /// Number of disks.
    #[inline]
    pub fn len(&self) -> usize {
        self.disks.len()
    }

    /// Returns true if the instance has no disks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// The disk at the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn disk(&self, index: DiskIndex) -> &Disk {
        &self.disks[index.get()]
    }

    /// All disks in index order.
    #[inline]
    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    /// Iterates over `(index, disk)` pairs.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (DiskIndex, &Disk)> {
        self.disks
            .iter()
            .enumerate()
            .map(|(i, d)| (DiskIndex::new(i), d))
    }

    /// The current revision; bumped by every accepted lazy addition.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The feasibility tolerance ε.
    #[inline]
    pub fn feasibility_tolerance(&self) -> f64 {
        self.feasibility_tolerance
    }
}

impl std::fmt::Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_tour() { "tour" } else { "path" };
        write!(
            f,
            "Instance({}, disks: {}, revision: {})",
            kind,
            self.disks.len(),
            self.revision
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk(x: f64, y: f64, r: f64) -> Disk {
        Disk::new(Point::new(x, y), r)
    }

    #[test]
    fn test_tour_and_path_modes() {
        let tour = Instance::new(vec![disk(0.0, 0.0, 1.0)]);
        assert!(tour.is_tour());
        assert!(!tour.is_path());

        let path = Instance::new_path(
            vec![disk(0.0, 0.0, 1.0)],
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
        );
        assert!(path.is_path());
        assert_eq!(
            path.path_endpoints(),
            Some((Point::new(0.0, 0.0), Point::new(5.0, 0.0)))
        );
    }

    #[test]
    fn test_disks_sorted_by_radius() {
        let instance = Instance::new(vec![
            disk(0.0, 0.0, 3.0),
            disk(10.0, 0.0, 1.0),
            disk(20.0, 0.0, 2.0),
        ]);
        let radii: Vec<f64> = instance.disks().iter().map(|d| d.radius).collect();
        assert_eq!(radii, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_containing_disk_is_dropped() {
        // The big disk swallows the small one and is implicitly covered.
        let instance = Instance::new(vec![disk(0.0, 0.0, 0.5), disk(0.1, 0.0, 5.0)]);
        assert_eq!(instance.len(), 1);
        assert_eq!(instance.disk(DiskIndex::new(0)).radius, 0.5);
    }

    #[test]
    fn test_identical_disks_collapse() {
        let instance = Instance::new(vec![disk(1.0, 1.0, 2.0); 4]);
        assert_eq!(instance.len(), 1);
    }

    #[test]
    fn test_add_disk_bumps_revision() {
        let mut instance = Instance::new(vec![disk(0.0, 0.0, 1.0)]);
        assert_eq!(instance.revision(), 0);

        let idx = instance.add_disk(disk(10.0, 0.0, 1.0));
        assert_eq!(idx, Some(DiskIndex::new(1)));
        assert_eq!(instance.revision(), 1);

        // redundant addition: contains the first disk
        let idx = instance.add_disk(disk(0.0, 0.0, 4.0));
        assert_eq!(idx, None);
        assert_eq!(instance.revision(), 1);
    }

    #[test]
    fn test_feasibility_tolerance_override() {
        let instance = Instance::new(vec![]).with_feasibility_tolerance(0.001);
        assert_eq!(instance.feasibility_tolerance(), 0.001);
    }
}
