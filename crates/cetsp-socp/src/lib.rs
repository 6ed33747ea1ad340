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

//! Cetsp-Socp: the fixed-sequence trajectory relaxation
//!
//! Given an *ordered* sequence of disks, the shortest closed tour (or open
//! path) touching each disk in order is a second-order cone program: one
//! hitting point per disk, segment lengths in the objective, one disk-
//! membership cone per point. Because the order is fixed the program is
//! convex, and it is the only numerical workhorse of the branch-and-bound
//! engine.
//!
//! This crate solves that program by cyclic coordinate descent on the
//! hitting points. Each inner step moves a single point to its exact
//! optimum given its two neighbors, which keeps every sweep monotone in the
//! objective; sweeps repeat until the iterate stops moving.
//!
//! Alongside the trajectory, the solver reports a *spanning mask*: the
//! positions whose hitting point genuinely turns the trajectory. Dropping a
//! non-spanning position from the sequence leaves the optimal length
//! unchanged, which the branching layer exploits to shrink sequences.

mod solve;

pub use solve::{
    shortest_trajectory, RelaxedTrajectory, SocpError, SocpSettings,
};
