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

//! Cetsp-Model: the close-enough TSP data model
//!
//! Defines the problem objects shared by every layer of the solver:
//!
//! - `disk`: a disk in the plane that the tour must touch.
//! - `index`: the strongly typed disk index.
//! - `instance`: the disk collection, tour/path mode, feasibility tolerance
//!   and the revision counter driving lazy-constraint invalidation.
//! - `trajectory`: the realized polyline with its distance and coverage
//!   queries.
//!
//! Instances normalize their input: disks are sorted by increasing radius
//! and any disk that entirely contains another accepted disk is dropped,
//! because touching the contained disk already touches it.

pub mod disk;
pub mod index;
pub mod instance;
pub mod trajectory;

pub use disk::Disk;
pub use index::DiskIndex;
pub use instance::Instance;
pub use trajectory::Trajectory;
