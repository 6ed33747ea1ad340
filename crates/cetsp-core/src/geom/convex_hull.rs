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

//! Counter-clockwise convex hulls via Andrew's monotone chain.

use crate::geom::point::Point;

/// Computes the convex hull of `points` and returns the indices of the hull
/// vertices in counter-clockwise order, starting from the lexicographically
/// smallest point.
///
/// Collinear points on the hull boundary are not kept as vertices. Inputs
/// with fewer than three points return all (distinct) indices.
pub fn convex_hull_indices(points: &[Point]) -> Vec<usize> {
    let n = points.len();
    if n <= 2 {
        return (0..n).collect();
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        points[a]
            .x
            .partial_cmp(&points[b].x)
            .unwrap()
            .then(points[a].y.partial_cmp(&points[b].y).unwrap())
    });

    let cross = |o: usize, a: usize, b: usize| -> f64 {
        let (po, pa, pb) = (points[o], points[a], points[b]);
        (pa.x - po.x) * (pb.y - po.y) - (pa.y - po.y) * (pb.x - po.x)
    };

    // Lower hull, then upper hull; each ends at the other's starting vertex.
    let mut hull: Vec<usize> = Vec::with_capacity(n + 1);
    for &i in &order {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], i) <= 0.0 {
            hull.pop();
        }
        hull.push(i);
    }
    let lower_len = hull.len() + 1;
    for &i in order.iter().rev() {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], i) <= 0.0
        {
            hull.pop();
        }
        hull.push(i);
    }
    hull.pop();
    hull
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_square_hull_is_ccw() {
        let points = vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(1.0, 1.0)];
        let hull = convex_hull_indices(&points);
        assert_eq!(hull, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_collinear_points_are_dropped() {
        let points = vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(1.0, 2.0)];
        let hull = convex_hull_indices(&points);
        assert_eq!(hull, vec![0, 2, 3]);
    }

    #[test]
    fn test_small_inputs() {
        assert_eq!(convex_hull_indices(&[p(1.0, 1.0)]), vec![0]);
        assert_eq!(convex_hull_indices(&[p(1.0, 1.0), p(2.0, 2.0)]), vec![0, 1]);
    }

    #[test]
    fn test_hull_orientation() {
        // Walking the returned hull must keep the interior on the left.
        let points = vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 3.0), p(2.0, 5.0), p(0.0, 3.0)];
        let hull = convex_hull_indices(&points);
        assert_eq!(hull.len(), 5);
        for w in 0..hull.len() {
            let a = points[hull[w]];
            let b = points[hull[(w + 1) % hull.len()]];
            let c = points[hull[(w + 2) % hull.len()]];
            let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
            assert!(cross > 0.0, "hull must turn left at every vertex");
        }
    }
}
