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

//! Root node strategies: picking the initial sequence of the search.
//!
//! A tour over three disks is order-free (every cyclic order of three has
//! the same optimum), so three well-spread disks anchor the tree without
//! committing to anything. The alternative is to seed with the convex hull
//! order, which front-loads the hull theorem into the root.

use crate::error::SearchError;
use crate::relaxation::PartialSequenceSolution;
use cetsp_model::{DiskIndex, Instance};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};

/// Produces the sequence the root node is anchored at.
pub trait RootNodeStrategy {
    /// The initial disk sequence for the instance.
    fn root_sequence(&self, instance: &Instance) -> Result<Vec<DiskIndex>, SearchError>;
}

/// Seeds a tour with the farthest center pair plus the disk maximizing the
/// summed distance to both; seeds a path with the single disk farthest from
/// the endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestEdgePlusFurthestCircle;

impl LongestEdgePlusFurthestCircle {
    pub fn new() -> Self {
        Self
    }
}

/// The center pair with the largest distance; ties keep the last pair
/// scanned in index order.
fn find_max_pair(instance: &Instance) -> (usize, usize) {
    let disks = instance.disks();
    let mut max_dist = 0.0;
    let mut best_pair = (0, 0);
    for i in 0..disks.len() {
        for j in 0..i {
            let dist = disks[i].center.squared_dist(disks[j].center);
            if dist >= max_dist {
                best_pair = (i, j);
                max_dist = dist;
            }
        }
    }
    best_pair
}

impl RootNodeStrategy for LongestEdgePlusFurthestCircle {
    fn root_sequence(&self, instance: &Instance) -> Result<Vec<DiskIndex>, SearchError> {
        if instance.is_empty() {
            // an empty path degenerates to the endpoint connection
            return if instance.is_path() {
                Ok(Vec::new())
            } else {
                Err(SearchError::Configuration(
                    "cannot build a root node for an empty tour instance".into(),
                ))
            };
        }
        if let Some((start, end)) = instance.path_endpoints() {
            // the disk with the largest detour relative to the endpoints
            let farthest = instance
                .disks()
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| {
                    let da = start.dist(a.center) + end.dist(a.center);
                    let db = start.dist(b.center) + end.dist(b.center);
                    da.partial_cmp(&db).unwrap()
                })
                .map(|(i, _)| i)
                .unwrap();
            return Ok(vec![DiskIndex::new(farthest)]);
        }

        if instance.len() <= 3 {
            return Ok((0..instance.len()).map(DiskIndex::new).collect());
        }

        let (first, second) = find_max_pair(instance);
        let c1 = instance.disks()[first].center;
        let c2 = instance.disks()[second].center;
        let mut third = first;
        let mut max_dist = 0.0;
        for (i, disk) in instance.disks().iter().enumerate() {
            if i == first || i == second {
                continue;
            }
            let dist = c1.dist(disk.center) + c2.dist(disk.center);
            if dist > max_dist {
                max_dist = dist;
                third = i;
            }
        }
        Ok(vec![
            DiskIndex::new(first),
            DiskIndex::new(third),
            DiskIndex::new(second),
        ])
    }
}

/// Seeds a tour with the spanning subset of the convex hull order.
///
/// Path instances reject this strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvexHullRoot;

impl ConvexHullRoot {
    pub fn new() -> Self {
        Self
    }
}

impl RootNodeStrategy for ConvexHullRoot {
    fn root_sequence(&self, instance: &Instance) -> Result<Vec<DiskIndex>, SearchError> {
        if instance.is_path() {
            return Err(SearchError::Configuration(
                "the convex hull root strategy only applies to tours".into(),
            ));
        }
        if instance.is_empty() {
            return Err(SearchError::Configuration(
                "cannot build a root node for an empty instance".into(),
            ));
        }
        let centers: Vec<_> = instance.disks().iter().map(|d| d.center).collect();
        let hull: Vec<DiskIndex> = cetsp_core::geom::convex_hull_indices(&centers)
            .into_iter()
            .map(DiskIndex::new)
            .collect();
        // keep only disks the hull trajectory actually turns at
        let solution = PartialSequenceSolution::new(instance, hull)?;
        Ok(solution.spanning_sequence())
    }
}

/// Emits all disks in a random order; used for ablations only.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRoot {
    seed: Option<u64>,
}

impl RandomRoot {
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// A reproducible variant for tests and benchmarks.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl RootNodeStrategy for RandomRoot {
    fn root_sequence(&self, instance: &Instance) -> Result<Vec<DiskIndex>, SearchError> {
        if instance.is_empty() && instance.is_tour() {
            return Err(SearchError::Configuration(
                "cannot build a root node for an empty tour instance".into(),
            ));
        }
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut sequence: Vec<DiskIndex> = (0..instance.len()).map(DiskIndex::new).collect();
        sequence.shuffle(&mut rng);
        Ok(sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cetsp_core::geom::Point;
    use cetsp_model::Disk;

    fn disk(x: f64, y: f64, r: f64) -> Disk {
        Disk::new(Point::new(x, y), r)
    }

    fn triangle_with_center() -> Instance {
        Instance::new(vec![
            disk(0.0, 0.0, 1.0),
            disk(3.0, 0.0, 1.0),
            disk(6.0, 0.0, 1.0),
            disk(3.0, 6.0, 1.0),
        ])
    }

    #[test]
    fn test_longest_edge_root_is_feasible_for_triangle_instance() {
        // the three-disk seed implicitly covers the middle disk
        let instance = triangle_with_center();
        let sequence = LongestEdgePlusFurthestCircle::new()
            .root_sequence(&instance)
            .unwrap();
        assert_eq!(sequence.len(), 3);
        let mut solution = PartialSequenceSolution::new(&instance, sequence).unwrap();
        assert!(solution.is_feasible(&instance));
    }

    #[test]
    fn test_small_tour_emits_all_disks() {
        let instance = Instance::new(vec![disk(0.0, 0.0, 1.0), disk(3.0, 0.0, 1.0)]);
        let sequence = LongestEdgePlusFurthestCircle::new()
            .root_sequence(&instance)
            .unwrap();
        assert_eq!(sequence.len(), 2);
    }

    #[test]
    fn test_path_root_picks_farthest_disk() {
        let instance = Instance::new_path(
            vec![disk(1.0, 0.0, 0.1), disk(8.0, 8.0, 0.1)],
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
        );
        let sequence = LongestEdgePlusFurthestCircle::new()
            .root_sequence(&instance)
            .unwrap();
        assert_eq!(sequence.len(), 1);
        assert_eq!(instance.disk(sequence[0]).center, Point::new(8.0, 8.0));
    }

    #[test]
    fn test_convex_hull_root_covers_hull_in_order() {
        let instance = Instance::new(vec![
            disk(0.0, 0.0, 0.1),
            disk(6.0, 0.0, 0.1),
            disk(6.0, 6.0, 0.1),
            disk(0.0, 6.0, 0.1),
            disk(3.0, 3.0, 0.1),
        ]);
        let sequence = ConvexHullRoot::new().root_sequence(&instance).unwrap();
        // the interior disk is not part of the hull seed
        assert_eq!(sequence.len(), 4);
    }

    #[test]
    fn test_convex_hull_root_rejects_paths() {
        let instance = Instance::new_path(
            vec![disk(1.0, 0.0, 0.1)],
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
        );
        let result = ConvexHullRoot::new().root_sequence(&instance);
        assert!(matches!(result, Err(SearchError::Configuration(_))));
    }

    #[test]
    fn test_random_root_is_a_permutation() {
        let instance = triangle_with_center();
        let sequence = RandomRoot::with_seed(42).root_sequence(&instance).unwrap();
        let mut raw: Vec<usize> = sequence.iter().map(|i| i.get()).collect();
        raw.sort_unstable();
        assert_eq!(raw, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_instance_is_rejected() {
        let instance = Instance::new(Vec::new());
        assert!(LongestEdgePlusFurthestCircle::new()
            .root_sequence(&instance)
            .is_err());
    }
}
