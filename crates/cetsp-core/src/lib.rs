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

//! Cetsp-Core: numeric and geometric primitives
//!
//! Foundation crate for the close-enough TSP solver stack. It contains the
//! small, dependency-light building blocks the upper layers are built on:
//!
//! - `num`: tolerance-aware floating point comparisons.
//! - `utils`: strongly typed indices.
//! - `geom`: points, segments, convex hulls, arc-length hull orders and
//!   onion (layered) hull peeling of disk centers.
//!
//! Nothing in this crate knows about instances, trajectories or the search
//! tree; those live in `cetsp-model` and `cetsp-bnb`.

pub mod geom;
pub mod num;
pub mod utils;
