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

//! Lazy constraint scenarios: disks added through callbacks while the
//! search runs. The global convex-hull rule is off here, because lazy
//! additions may change the hull.

use cetsp_bnb::branching::FarthestCircle;
use cetsp_bnb::callbacks::{EventContext, NodeCallback};
use cetsp_bnb::root::LongestEdgePlusFurthestCircle;
use cetsp_bnb::search::DfsBfs;
use cetsp_bnb::BranchAndBound;
use cetsp_core::geom::Point;
use cetsp_model::{Disk, Instance};
use std::time::Duration;

fn disk(x: f64, y: f64, r: f64) -> Disk {
    Disk::new(Point::new(x, y), r)
}

fn unit_grid() -> Vec<Disk> {
    let mut disks = Vec::new();
    let mut x = 0.0;
    while x <= 10.0 {
        let mut y = 0.0;
        while y <= 10.0 {
            disks.push(disk(x, y, 1.0));
            y += 2.0;
        }
        x += 2.0;
    }
    disks
}

/// Feeds the grid disks in as lazy constraints whenever the candidate
/// solution leaves one uncovered.
struct GridLazyConstraints {
    pending: Vec<Disk>,
}

impl NodeCallback for GridLazyConstraints {
    fn add_lazy_constraints(&mut self, context: &mut EventContext) {
        let tolerance = context.instance().feasibility_tolerance();
        let violated: Vec<Disk> = self
            .pending
            .iter()
            .filter(|d| !context.relaxed_trajectory().covers(d, tolerance))
            .copied()
            .collect();
        for d in &violated {
            context.add_lazy_disk(*d);
        }
    }
}

#[test]
fn test_lazy_grid_disks_are_eventually_covered() {
    // start from the four corners of the 10x10 square only
    let corners = vec![
        disk(0.0, 0.0, 1.0),
        disk(10.0, 0.0, 1.0),
        disk(10.0, 10.0, 1.0),
        disk(0.0, 10.0, 1.0),
    ];
    let instance = Instance::new(corners);
    let mut bnb = BranchAndBound::new(
        instance,
        &LongestEdgePlusFurthestCircle::new(),
        Box::new(FarthestCircle::new(true, 8).unwrap()),
        Box::new(DfsBfs::new()),
    )
    .unwrap();
    bnb.add_node_callback(Box::new(GridLazyConstraints {
        pending: unit_grid(),
    }));

    bnb.optimize(Duration::from_secs(30), 0.01, false).unwrap();

    // every grid disk ended up in the instance (some may have been dropped
    // as redundant against the seeded corners)
    let instance = bnb.instance();
    assert!(instance.len() >= 30, "only {} disks materialized", instance.len());
    assert!(instance.revision() > 0);

    let solution = bnb.solution().expect("lazy grid instance is solvable");
    let tolerance = instance.feasibility_tolerance();
    for d in unit_grid() {
        assert!(
            solution.covers(&d, tolerance),
            "grid disk at ({}, {}) left uncovered",
            d.center.x,
            d.center.y
        );
    }
    assert!(bnb.upper_bound() <= 41.0, "upper bound {}", bnb.upper_bound());
    assert!(bnb.lower_bound() >= 39.0, "lower bound {}", bnb.lower_bound());
}

#[test]
fn test_lazy_disk_invalidates_incumbent_feasibility() {
    struct OneShotInjection {
        injected: bool,
    }

    impl NodeCallback for OneShotInjection {
        fn add_lazy_constraints(&mut self, context: &mut EventContext) {
            if !self.injected {
                self.injected = true;
                context.add_lazy_disk(disk(6.0, 6.0, 0.5));
            }
        }
    }

    let instance = Instance::new(vec![disk(0.0, 0.0, 0.5), disk(4.0, 0.0, 0.5)]);
    let mut bnb = BranchAndBound::new(
        instance,
        &LongestEdgePlusFurthestCircle::new(),
        Box::new(FarthestCircle::new(false, 2).unwrap()),
        Box::new(DfsBfs::new()),
    )
    .unwrap();
    bnb.add_node_callback(Box::new(OneShotInjection { injected: false }));

    bnb.optimize(Duration::from_secs(30), 0.01, false).unwrap();

    let solution = bnb.solution().expect("must recover after the injection");
    let tolerance = bnb.instance().feasibility_tolerance();
    assert_eq!(bnb.instance().len(), 3);
    assert!(solution.covers_all(bnb.instance().disks(), tolerance));
}

#[test]
fn test_callback_lower_bound_tightens_root() {
    struct RootBoundInjection;

    impl NodeCallback for RootBoundInjection {
        fn on_entering_node(&mut self, context: &mut EventContext) {
            if context.current_node() == context.root_node() {
                let bound = context.lower_bound();
                context.add_lower_bound(bound + 0.5);
            }
        }
    }

    let instance = Instance::new(vec![
        disk(0.0, 0.0, 0.0),
        disk(5.0, 0.0, 0.0),
        disk(5.0, 5.0, 0.0),
        disk(0.0, 5.0, 0.0),
    ]);
    let mut bnb = BranchAndBound::new(
        instance,
        &LongestEdgePlusFurthestCircle::new(),
        Box::new(FarthestCircle::new(false, 2).unwrap()),
        Box::new(DfsBfs::new()),
    )
    .unwrap();
    let before = bnb.lower_bound();
    bnb.add_node_callback(Box::new(RootBoundInjection));
    bnb.optimize(Duration::from_secs(30), 0.01, false).unwrap();

    assert!(bnb.lower_bound() >= before + 0.5 - 1e-9);
    // the square optimum is well above the injected bound, so the result
    // is unaffected
    assert!((bnb.upper_bound() - 20.0).abs() < 1e-3);
}
