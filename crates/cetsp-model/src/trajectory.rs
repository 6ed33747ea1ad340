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

//! The realized polyline of a (partial or complete) solution.
//!
//! A tour trajectory is closed (first point equals last point), a path
//! trajectory is open. Trajectories are immutable after construction; the
//! total length is computed once and cached.

use crate::disk::Disk;
use cetsp_core::geom::point::Point;
use cetsp_core::geom::segment::{segments_properly_intersect, squared_distance_to_segment};

/// An ordered sequence of points in the plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    points: Vec<Point>,
    length: f64,
}

impl Trajectory {
    /// Creates a trajectory from the given points.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `points` is empty.
    pub fn new(points: Vec<Point>) -> Self {
        debug_assert!(
            !points.is_empty(),
            "called `Trajectory::new` with an empty point list"
        );
        let length = points
            .windows(2)
            .map(|w| w[0].dist(w[1]))
            .sum();
        Self { points, length }
    }

    /// Creates a closed trajectory by appending the first point at the end.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `points` is empty.
    pub fn closed(mut points: Vec<Point>) -> Self {
        debug_assert!(
            !points.is_empty(),
            "called `Trajectory::closed` with an empty point list"
        );
        points.push(points[0]);
        Self::new(points)
    }

    /// Total Euclidean length; cached at construction.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns true if the trajectory is closed.
    #[inline]
    pub fn is_tour(&self) -> bool {
        self.points[0] == self.points[self.points.len() - 1]
    }

    /// Number of points.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The point at the given position.
    #[inline]
    pub fn point(&self, index: usize) -> Point {
        self.points[index]
    }

    /// All points in order.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Minimum distance from the trajectory to the disk boundary.
    ///
    /// Negative values mean the trajectory enters the disk interior deeper
    /// than its boundary, zero means it touches the boundary exactly.
    pub fn distance(&self, disk: &Disk) -> f64 {
        let mut min_sq = f64::INFINITY;
        if self.points.len() == 1 {
            min_sq = self.points[0].squared_dist(disk.center);
        }
        for w in self.points.windows(2) {
            let d = squared_distance_to_segment(w[0], w[1], disk.center);
            if d < min_sq {
                min_sq = d;
            }
        }
        min_sq.sqrt() - disk.radius
    }

    /// Returns true if the trajectory covers the disk within tolerance.
    #[inline]
    pub fn covers(&self, disk: &Disk, tolerance: f64) -> bool {
        self.distance(disk) <= tolerance
    }

    /// Returns true if the trajectory covers every disk within tolerance.
    pub fn covers_all<'a>(
        &self,
        disks: impl IntoIterator<Item = &'a Disk>,
        tolerance: f64,
    ) -> bool {
        disks.into_iter().all(|d| self.covers(d, tolerance))
    }

    /// Returns true if no two non-adjacent segments properly intersect.
    pub fn is_simple(&self) -> bool {
        let segments: Vec<(Point, Point)> = self
            .points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .collect();
        let n = segments.len();
        let closed = self.is_tour();
        for i in 0..n {
            for j in (i + 2)..n {
                // in a closed trajectory the last and first segment are adjacent
                if closed && i == 0 && j == n - 1 {
                    continue;
                }
                let (a1, a2) = segments[i];
                let (b1, b2) = segments[j];
                if segments_properly_intersect(a1, a2, b1, b2) {
                    return false;
                }
            }
        }
        true
    }
}

impl std::fmt::Display for Trajectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Trajectory(points: {}, length: {:.4})",
            self.points.len(),
            self.length
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_length_and_distance() {
        let traj = Trajectory::new(vec![p(0.0, 0.0), p(5.0, 0.0), p(5.0, 5.0)]);
        assert!(!traj.is_tour());
        assert_eq!(traj.length(), 10.0);

        let c1 = Disk::new(p(0.0, 0.0), 1.0);
        assert_eq!(traj.distance(&c1), -1.0);
        assert!(traj.covers(&c1, 0.0));
    }

    #[test]
    fn test_closed_trajectory() {
        let traj = Trajectory::closed(vec![p(0.0, 0.0), p(5.0, 0.0), p(5.0, 5.0), p(0.0, 5.0)]);
        assert!(traj.is_tour());
        assert_eq!(traj.length(), 20.0);
        assert_eq!(traj.num_points(), 5);
    }

    #[test]
    fn test_single_point_trajectory() {
        let traj = Trajectory::new(vec![p(3.0, 4.0)]);
        assert_eq!(traj.length(), 0.0);
        let disk = Disk::new(p(0.0, 0.0), 1.0);
        assert!((traj.distance(&disk) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_covers_all() {
        let traj = Trajectory::new(vec![p(0.0, 0.0), p(10.0, 0.0)]);
        let disks = vec![
            Disk::new(p(2.0, 0.5), 1.0),
            Disk::new(p(8.0, -0.5), 1.0),
        ];
        assert!(traj.covers_all(&disks, 0.0));
        let far = vec![Disk::new(p(5.0, 5.0), 1.0)];
        assert!(!traj.covers_all(&far, 0.0));
    }

    #[test]
    fn test_is_simple() {
        let simple = Trajectory::closed(vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)]);
        assert!(simple.is_simple());

        // a figure-eight: the two diagonals cross
        let crossing =
            Trajectory::closed(vec![p(0.0, 0.0), p(4.0, 4.0), p(4.0, 0.0), p(0.0, 4.0)]);
        assert!(!crossing.is_simple());
    }

    #[test]
    fn test_cached_length_matches_recomputation() {
        let points = vec![p(0.0, 0.0), p(1.0, 2.0), p(-3.0, 1.0), p(0.5, 0.5)];
        let traj = Trajectory::new(points.clone());
        let recomputed: f64 = points.windows(2).map(|w| w[0].dist(w[1])).sum();
        assert_eq!(traj.length(), recomputed);
    }
}
