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

//! Point-to-segment distances and segment intersection predicates.

use crate::geom::point::Point;

/// Squared distance from point `p` to the closed segment `[a, b]`.
///
/// Degenerate segments (`a == b`) collapse to a point distance.
#[inline]
pub fn squared_distance_to_segment(a: Point, b: Point, p: Point) -> f64 {
    let ab = (b.x - a.x, b.y - a.y);
    let ap = (p.x - a.x, p.y - a.y);
    let len_sq = ab.0 * ab.0 + ab.1 * ab.1;
    if len_sq == 0.0 {
        return a.squared_dist(p);
    }
    let t = ((ap.0 * ab.0 + ap.1 * ab.1) / len_sq).clamp(0.0, 1.0);
    let closest = Point::new(a.x + t * ab.0, a.y + t * ab.1);
    closest.squared_dist(p)
}

/// Distance from point `p` to the closed segment `[a, b]`.
#[inline]
pub fn distance_to_segment(a: Point, b: Point, p: Point) -> f64 {
    squared_distance_to_segment(a, b, p).sqrt()
}

/// Projection parameter of `p` onto the line through `a` and `b`, expressed
/// as a distance from `a` along the segment direction. `None` when the
/// perpendicular foot falls outside the closed segment.
#[inline]
pub fn projection_on_segment(a: Point, b: Point, p: Point) -> Option<f64> {
    let ab = (b.x - a.x, b.y - a.y);
    let ap = (p.x - a.x, p.y - a.y);
    let len = (ab.0 * ab.0 + ab.1 * ab.1).sqrt();
    if len == 0.0 {
        return None;
    }
    let t = (ap.0 * ab.0 + ap.1 * ab.1) / len;
    if (0.0..=len).contains(&t) {
        Some(t)
    } else {
        None
    }
}

/// Tests whether the open segments `[p11, p12]` and `[p21, p22]` properly
/// intersect (shared endpoints and collinear overlaps do not count).
#[inline]
pub fn segments_properly_intersect(p11: Point, p12: Point, p21: Point, p22: Point) -> bool {
    let ccw =
        |a: Point, b: Point, c: Point| (c.y - a.y) * (b.x - a.x) > (b.y - a.y) * (c.x - a.x);

    ccw(p11, p21, p22) != ccw(p12, p21, p22) && ccw(p11, p12, p21) != ccw(p11, p12, p22)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_distance_to_segment() {
        assert!((distance_to_segment(p(0.0, 0.0), p(10.0, 0.0), p(0.0, 0.0))).abs() < 1e-12);
        assert!((distance_to_segment(p(0.0, 0.0), p(10.0, 0.0), p(0.0, 1.0)) - 1.0).abs() < 1e-12);
        assert!((distance_to_segment(p(0.0, 0.0), p(10.0, 0.0), p(0.0, -1.0)) - 1.0).abs() < 1e-12);
        assert!((distance_to_segment(p(0.0, 0.0), p(10.0, 0.0), p(-1.0, 0.0)) - 1.0).abs() < 1e-12);
        assert!((distance_to_segment(p(0.0, 0.0), p(10.0, 0.0), p(11.0, 0.0)) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_segment() {
        assert!((distance_to_segment(p(1.0, 1.0), p(1.0, 1.0), p(4.0, 5.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_projection_on_segment() {
        assert_eq!(projection_on_segment(p(0.0, 0.0), p(10.0, 0.0), p(3.0, 4.0)), Some(3.0));
        assert_eq!(projection_on_segment(p(0.0, 0.0), p(10.0, 0.0), p(-1.0, 4.0)), None);
        assert_eq!(projection_on_segment(p(0.0, 0.0), p(10.0, 0.0), p(11.0, 4.0)), None);
    }

    #[test]
    fn test_proper_intersection() {
        // crossing diagonals
        assert!(segments_properly_intersect(
            p(0.0, 0.0),
            p(2.0, 2.0),
            p(0.0, 2.0),
            p(2.0, 0.0)
        ));
        // parallel
        assert!(!segments_properly_intersect(
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(0.0, 1.0),
            p(2.0, 1.0)
        ));
        // touching at a shared endpoint is not proper
        assert!(!segments_properly_intersect(
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 0.0),
            p(3.0, 3.0)
        ));
    }
}
