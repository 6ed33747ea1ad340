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

//! Tolerance-aware floating point comparisons.
//!
//! Objective values in this solver are Euclidean lengths, so strict equality
//! is meaningless. The helpers here centralize the fuzzy comparisons used by
//! queue ordering and bound bookkeeping.

use num_traits::Float;

/// Returns true if `a` and `b` differ by no more than `tol`.
#[inline(always)]
pub fn fuzzy_eq<T: Float>(a: T, b: T, tol: T) -> bool {
    (a - b).abs() <= tol
}

/// Returns true if `a` is smaller than `b` by more than `tol`.
#[inline(always)]
pub fn fuzzy_lt<T: Float>(a: T, b: T, tol: T) -> bool {
    a < b - tol
}

/// Compares two values for ordering, treating values within `tol` as equal.
///
/// Useful as the primary key of a sort with a tie-breaking secondary key.
#[inline]
pub fn fuzzy_cmp<T: Float>(a: T, b: T, tol: T) -> std::cmp::Ordering {
    if fuzzy_eq(a, b, tol) {
        std::cmp::Ordering::Equal
    } else if a < b {
        std::cmp::Ordering::Less
    } else {
        std::cmp::Ordering::Greater
    }
}
