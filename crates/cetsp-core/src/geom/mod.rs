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

//! Planar geometry for the close-enough TSP
//!
//! Everything the search needs from computational geometry:
//!
//! - `point`/`segment`: distances in the Euclidean plane.
//! - `convex_hull`: counter-clockwise hulls over index sets.
//! - `hull_order`: arc-length position of a disk along the hull boundary,
//!   the scalar the convex-hull sequence rules sort by.
//! - `layers`: iterated hull peeling ("onion layers") of disk centers.

pub mod convex_hull;
pub mod hull_order;
pub mod layers;
pub mod point;
pub mod segment;

pub use convex_hull::convex_hull_indices;
pub use point::Point;
