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

//! Arc-length order of disks along a convex hull boundary.
//!
//! An optimal close-enough tour visits the disks that touch the convex hull
//! of the centers in counter-clockwise hull order. To check a candidate
//! sequence against that theorem, each such disk is assigned a scalar: the
//! arc length from a canonical hull start to the disk's projection onto the
//! hull boundary. Disks whose circle never reaches the hull boundary get no
//! order value and are unconstrained.

use crate::geom::convex_hull::convex_hull_indices;
use crate::geom::point::Point;
use crate::geom::segment::{projection_on_segment, squared_distance_to_segment};

/// Assigns arc-length positions along the convex hull of a point set.
///
/// Construction computes the hull once; [`ConvexHullOrder::order_value`] is
/// then evaluated per disk.
#[derive(Debug, Clone)]
pub struct ConvexHullOrder {
    /// Hull boundary segments in counter-clockwise order, starting at the
    /// canonical hull start vertex.
    segments: Vec<(Point, Point)>,
}

impl ConvexHullOrder {
    /// Builds the hull order over the given centers.
    pub fn new(points: &[Point]) -> Self {
        let hull = convex_hull_indices(points);
        let segments = (0..hull.len())
            .map(|i| (points[hull[i]], points[hull[(i + 1) % hull.len()]]))
            .collect();
        Self { segments }
    }

    /// Number of hull boundary segments.
    #[inline]
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Arc-length position of the disk `(center, radius)` along the hull
    /// boundary, or `None` if the disk does not reach the hull boundary.
    ///
    /// The position is the accumulated length of the hull segments preceding
    /// the disk's projection, plus the along-segment offset of the projection
    /// itself.
    pub fn order_value(&self, center: Point, radius: f64) -> Option<f64> {
        let mut weight = 0.0;
        for &(a, b) in &self.segments {
            let seg_len = a.dist(b);
            if squared_distance_to_segment(a, b, center) > radius * radius {
                // disk does not touch this hull segment
                weight += seg_len;
                continue;
            }
            match projection_on_segment(a, b, center) {
                Some(along) => return Some(weight + along),
                None => weight += seg_len,
            }
        }
        None
    }
}
