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

//! Construction heuristics for warm-starting the search.
//!
//! A 2-opt pass over the disk *centers* produces a reasonable visiting
//! order cheaply; one relaxation call then turns the order into a proper
//! trajectory. Ignoring the radii can leave the order noticeably
//! suboptimal on instances with large disks, but any full-sequence
//! solution is feasible and gives the pool a finite upper bound to prune
//! against.

use crate::error::SearchError;
use crate::relaxation::PartialSequenceSolution;
use cetsp_model::{DiskIndex, Instance};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Returns true if reversing `order[i..=j]` shortens the center tour by
/// more than a thousandth.
fn swap_improves(instance: &Instance, order: &[DiskIndex], i: usize, j: usize) -> bool {
    debug_assert!(i < j, "called `swap_improves` with i >= j: {} >= {}", i, j);
    let n = order.len();
    let prev_i = if i == 0 { n - 1 } else { i - 1 };
    let next_j = (j + 1) % n;
    if prev_i == j || next_j == i {
        return false;
    }
    let center = |p: usize| instance.disk(order[p]).center;
    let current = center(i).dist(center(prev_i)) + center(j).dist(center(next_j));
    let proposed = center(i).dist(center(next_j)) + center(j).dist(center(prev_i));
    proposed < 0.999 * current
}

/// Computes a heuristic solution with a 2-opt procedure over a shuffled
/// disk order. Only the centers are considered, which can be quite
/// suboptimal for large radii, but the result always covers every disk.
pub fn compute_tour_by_2opt(instance: &Instance) -> Result<PartialSequenceSolution, SearchError> {
    let mut rng = StdRng::from_entropy();
    compute_tour_by_2opt_with_rng(instance, &mut rng)
}

/// The deterministic variant of [`compute_tour_by_2opt`].
pub fn compute_tour_by_2opt_with_rng<R: Rng>(
    instance: &Instance,
    rng: &mut R,
) -> Result<PartialSequenceSolution, SearchError> {
    if instance.is_empty() && instance.is_tour() {
        return Err(SearchError::Configuration(
            "cannot build a heuristic tour for an empty instance".into(),
        ));
    }
    let mut order: Vec<DiskIndex> = (0..instance.len()).map(DiskIndex::new).collect();
    order.shuffle(rng);

    let n = order.len();
    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..n {
            for j in 0..i {
                if swap_improves(instance, &order, j, i) {
                    order[j..=i].reverse();
                    changed = true;
                }
            }
        }
    }
    PartialSequenceSolution::new(instance, order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cetsp_core::geom::Point;
    use cetsp_model::Disk;

    fn disk(x: f64, y: f64, r: f64) -> Disk {
        Disk::new(Point::new(x, y), r)
    }

    #[test]
    fn test_unit_square_of_points() {
        let instance = Instance::new(vec![
            disk(0.0, 0.0, 0.0),
            disk(1.0, 1.0, 0.0),
            disk(1.0, 0.0, 0.0),
            disk(0.0, 1.0, 0.0),
        ]);
        let mut rng = StdRng::seed_from_u64(42);
        let solution = compute_tour_by_2opt_with_rng(&instance, &mut rng).unwrap();
        assert!((solution.obj() - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_result_is_always_feasible() {
        let instance = Instance::new(vec![
            disk(0.0, 0.0, 1.0),
            disk(3.0, 0.0, 1.0),
            disk(5.0, 2.0, 1.0),
            disk(3.0, 3.0, 1.0),
            disk(0.0, 4.0, 1.0),
        ]);
        let mut rng = StdRng::seed_from_u64(7);
        let mut solution = compute_tour_by_2opt_with_rng(&instance, &mut rng).unwrap();
        assert!(solution.is_feasible(&instance));
        assert!(solution.obj() >= 1.0);
    }

    #[test]
    fn test_path_instances_are_supported() {
        let instance = Instance::new_path(
            vec![disk(2.0, 2.0, 0.5), disk(6.0, -1.0, 0.5)],
            Point::new(0.0, 0.0),
            Point::new(8.0, 0.0),
        );
        let mut rng = StdRng::seed_from_u64(1);
        let mut solution = compute_tour_by_2opt_with_rng(&instance, &mut rng).unwrap();
        assert!(solution.is_feasible(&instance));
    }
}
