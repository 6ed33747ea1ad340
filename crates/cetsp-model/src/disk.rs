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

use cetsp_core::geom::Point;

/// A disk in the plane, defined by a center and a non-negative radius.
///
/// The tour must touch at least one point of every disk. A radius of zero
/// encodes a fixed waypoint; path endpoints are modeled this way.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disk {
    pub center: Point,
    pub radius: f64,
}

impl Disk {
    /// Creates a new disk.
    #[inline(always)]
    pub const fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Creates a disk of radius zero, i.e. a fixed waypoint.
    #[inline(always)]
    pub const fn point(center: Point) -> Self {
        Self { center, radius: 0.0 }
    }

    /// Returns true if the point lies inside or on the boundary.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        self.center.squared_dist(point) <= self.radius * self.radius
    }

    /// Returns true if `other` lies entirely inside this disk.
    ///
    /// A disk containing another one is redundant for coverage: any
    /// trajectory touching the inner disk also touches the outer one.
    #[inline]
    pub fn contains_disk(&self, other: &Disk) -> bool {
        self.center.dist(other.center) + other.radius <= self.radius
    }
}

impl std::fmt::Display for Disk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Disk({}, r={})", self.center, self.radius)
    }
}

impl From<((f64, f64), f64)> for Disk {
    fn from(value: ((f64, f64), f64)) -> Self {
        Self::new(Point::new(value.0 .0, value.0 .1), value.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point() {
        let c1 = Disk::new(Point::new(0.0, 0.0), 1.0);
        let c2 = Disk::new(Point::new(0.0, 0.0), 0.5);
        let p = Point::new(1.0, 0.0);
        assert!(c1.contains(p));
        assert!(!c2.contains(p));
    }

    #[test]
    fn test_contains_disk() {
        let big = Disk::new(Point::new(0.0, 0.0), 2.0);
        let small = Disk::new(Point::new(0.5, 0.0), 1.0);
        assert!(big.contains_disk(&small));
        assert!(!small.contains_disk(&big));
        // a disk contains itself
        assert!(big.contains_disk(&big));
    }

    #[test]
    fn test_point_disk() {
        let d = Disk::point(Point::new(3.0, 4.0));
        assert_eq!(d.radius, 0.0);
        assert!(d.contains(Point::new(3.0, 4.0)));
        assert!(!d.contains(Point::new(3.0, 4.1)));
    }
}
