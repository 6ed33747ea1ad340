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

//! End-to-end path scenarios.

use cetsp_bnb::branching::FarthestCircle;
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

fn path_solver(instance: Instance) -> BranchAndBound {
    BranchAndBound::new(
        instance,
        &LongestEdgePlusFurthestCircle::new(),
        Box::new(FarthestCircle::new(false, 8).unwrap()),
        Box::new(DfsBfs::new()),
    )
    .unwrap()
}

#[test]
fn test_grid_path_with_coinciding_endpoints() {
    let instance = Instance::new_path(unit_grid(), Point::new(0.0, 0.0), Point::new(0.0, 0.0));
    let mut bnb = path_solver(instance);
    bnb.optimize(Duration::from_secs(30), 0.01, false).unwrap();

    let solution = bnb.solution().expect("grid path must be solvable");
    // the known optimum is ~42.0747; termination guarantees the incumbent
    // lies within the proven gap of it
    let ub = bnb.upper_bound();
    assert!(ub >= 41.5, "upper bound {} beats the known optimum", ub);
    assert!(ub <= 42.6, "upper bound {} too far from the optimum", ub);
    assert_eq!(solution.point(0), Point::new(0.0, 0.0));
    assert_eq!(solution.point(solution.num_points() - 1), Point::new(0.0, 0.0));
}

#[test]
fn test_single_disk_path() {
    let instance = Instance::new_path(
        vec![disk(2.0, 2.0, 1.0)],
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
    );
    let mut bnb = path_solver(instance);
    bnb.optimize(Duration::from_secs(5), 0.01, false).unwrap();

    let solution = bnb.solution().expect("single-disk path is feasible");
    // detour through the disk: endpoints fixed, one touching point between
    assert_eq!(solution.num_points(), 3);
    assert!(solution.length() >= 4.0 - 1e-9);
    assert!(solution.point(0) == Point::new(0.0, 0.0));
}

#[test]
fn test_empty_path_with_coinciding_endpoints() {
    let instance = Instance::new_path(Vec::new(), Point::new(0.0, 0.0), Point::new(0.0, 0.0));
    let mut bnb = path_solver(instance);
    bnb.optimize(Duration::from_secs(5), 0.01, false).unwrap();

    let solution = bnb.solution().expect("the empty path is trivially feasible");
    assert_eq!(solution.length(), 0.0);
    assert_eq!(bnb.upper_bound(), 0.0);
}

#[test]
fn test_path_between_distinct_endpoints() {
    let instance = Instance::new_path(
        vec![disk(3.0, 4.0, 1.0), disk(7.0, -3.0, 1.0)],
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
    );
    let mut bnb = path_solver(instance);
    bnb.optimize(Duration::from_secs(30), 0.01, false).unwrap();

    let solution = bnb.solution().expect("two-disk path is feasible");
    assert!(!solution.is_tour());
    let tolerance = bnb.instance().feasibility_tolerance();
    assert!(solution.covers_all(bnb.instance().disks(), tolerance));
    // never shorter than the straight connection
    assert!(solution.length() >= 10.0 - 1e-9);
}
