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

//! Iterated convex-hull peeling ("onion layers") of disk centers.
//!
//! Layer 0 is the convex hull of all centers; layer 1 is the hull of what
//! remains after removing layer 0, and so on until every disk is assigned.
//! Each layer carries bidirectional maps between global disk indices and
//! positions on the layer's hull, numbered by counter-clockwise order from
//! an arbitrary start.

use crate::geom::hull_order::ConvexHullOrder;
use crate::geom::point::Point;

/// One layer of the hull onion.
#[derive(Debug, Clone)]
pub struct HullLayer {
    /// For each global disk index `i`, `Some(q)` iff disk `i` lies on this
    /// layer, where `q` is its counter-clockwise hull position.
    global_to_hull: Vec<Option<usize>>,
    /// For each hull position `q`, the global disk index at that position.
    hull_to_global: Vec<usize>,
}

impl HullLayer {
    /// Number of disks on this layer's hull.
    #[inline]
    pub fn hull_size(&self) -> usize {
        self.hull_to_global.len()
    }

    /// Hull position of the global disk index, if it lies on this layer.
    #[inline]
    pub fn hull_position(&self, global: usize) -> Option<usize> {
        self.global_to_hull[global]
    }

    /// Global disk index at the given hull position.
    #[inline]
    pub fn global_index(&self, hull_position: usize) -> usize {
        self.hull_to_global[hull_position]
    }

    /// Returns true if the global disk index lies on this layer.
    #[inline]
    pub fn contains(&self, global: usize) -> bool {
        self.global_to_hull[global].is_some()
    }
}

/// Peels the centers into hull layers.
///
/// A disk belongs to the outermost layer whose hull boundary it reaches
/// (its circle may reach the boundary even when its center is interior).
/// Every disk ends up in exactly one layer.
pub fn peel_hull_layers(centers: &[Point], radii: &[f64]) -> Vec<HullLayer> {
    debug_assert_eq!(
        centers.len(),
        radii.len(),
        "called `peel_hull_layers` with mismatched centers/radii: {} centers but {} radii",
        centers.len(),
        radii.len()
    );

    let n = centers.len();
    let mut layers = Vec::new();
    let mut handled = vec![false; n];
    let mut num_handled = 0;

    while num_handled < n {
        let unhandled: Vec<usize> = (0..n).filter(|&i| !handled[i]).collect();
        let unhandled_points: Vec<Point> = unhandled.iter().map(|&i| centers[i]).collect();

        let order = ConvexHullOrder::new(&unhandled_points);
        let mut layer_hull: Vec<(usize, f64)> = Vec::new();
        for (local, &global) in unhandled.iter().enumerate() {
            if let Some(weight) = order.order_value(unhandled_points[local], radii[global]) {
                layer_hull.push((global, weight));
            }
        }
        if layer_hull.is_empty() {
            // Degenerate remainder (e.g. a single point); close the onion.
            layer_hull = unhandled.iter().map(|&g| (g, g as f64)).collect();
        }
        layer_hull.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());

        let mut global_to_hull = vec![None; n];
        let mut hull_to_global = Vec::with_capacity(layer_hull.len());
        for (hull_position, &(global, _)) in layer_hull.iter().enumerate() {
            global_to_hull[global] = Some(hull_position);
            hull_to_global.push(global);
            handled[global] = true;
            num_handled += 1;
        }
        layers.push(HullLayer {
            global_to_hull,
            hull_to_global,
        });
    }
    layers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_nested_squares_peel_into_layers() {
        let centers = vec![
            p(-12.0, -12.0),
            p(-12.0, 12.0),
            p(12.0, -12.0),
            p(12.0, 12.0),
            p(-9.0, -9.0),
            p(-9.0, 9.0),
            p(9.0, -9.0),
            p(9.0, 9.0),
            p(-6.0, -6.0),
            p(-6.0, 6.0),
            p(6.0, -6.0),
            p(6.0, 6.0),
            p(-3.0, -3.0),
            p(-3.0, 3.0),
            p(3.0, -3.0),
            p(3.0, 3.0),
            p(0.0, 0.0),
        ];
        let radii = vec![1.0; centers.len()];
        let layers = peel_hull_layers(&centers, &radii);

        let layer_set = |layer: &HullLayer| {
            let mut v: Vec<usize> = layer.hull_to_global.clone();
            v.sort_unstable();
            v
        };

        assert_eq!(layers.len(), 5);
        assert_eq!(layer_set(&layers[0]), vec![0, 1, 2, 3]);
        assert_eq!(layer_set(&layers[1]), vec![4, 5, 6, 7]);
        assert_eq!(layer_set(&layers[2]), vec![8, 9, 10, 11]);
        assert_eq!(layer_set(&layers[3]), vec![12, 13, 14, 15]);
        assert_eq!(layer_set(&layers[4]), vec![16]);
    }

    #[test]
    fn test_layer_maps_are_inverse() {
        let centers = vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0), p(2.0, 2.0)];
        let radii = vec![0.5; 5];
        let layers = peel_hull_layers(&centers, &radii);
        for layer in &layers {
            for q in 0..layer.hull_size() {
                let g = layer.global_index(q);
                assert_eq!(layer.hull_position(g), Some(q));
                assert!(layer.contains(g));
            }
        }
    }

    #[test]
    fn test_every_disk_lands_in_exactly_one_layer() {
        let centers: Vec<Point> = (0..9)
            .map(|i| p((i % 3) as f64 * 2.0, (i / 3) as f64 * 2.0))
            .collect();
        let radii = vec![0.25; centers.len()];
        let layers = peel_hull_layers(&centers, &radii);
        let mut seen = vec![0usize; centers.len()];
        for layer in &layers {
            for q in 0..layer.hull_size() {
                seen[layer.global_index(q)] += 1;
            }
        }
        assert!(seen.iter().all(|&c| c == 1));
    }
}
