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

//! Sequence rules: geometric filters over candidate branch sequences
//!
//! A rule looks at a candidate disk sequence and decides whether an optimal
//! solution can visit the disks in that order. Rules are sound filters:
//! rejecting a sequence proves that no optimal completion has that visiting
//! order, so the corresponding child is never constructed.
//!
//! Provided rules:
//! - `convex_hull`: the global convex-hull order theorem. An optimal tour
//!   visits the disks reaching the hull boundary in counter-clockwise hull
//!   order; paths visit them in a bitonic (up-then-down) pattern.
//! - `layered`: the same argument applied to every onion layer of the
//!   centers, with a recursive check between consecutively visited hull
//!   neighbors of a tour's outermost layer.
//!
//! Configured rules are evaluated left-to-right; the first rejection wins.

pub mod convex_hull;
pub mod layered;

use crate::error::SearchError;
use crate::pool::SolutionPool;
use cetsp_model::{DiskIndex, Instance};

pub use convex_hull::GlobalConvexHullRule;
pub use layered::LayeredConvexHullRule;

/// A filter over candidate branch sequences.
pub trait SequenceRule {
    /// Prepares the rule for the instance and validates the root sequence.
    ///
    /// Returns a configuration error when the root sequence itself violates
    /// the rule, because then no descendant could ever be accepted.
    fn setup(
        &mut self,
        instance: &Instance,
        root_sequence: &[DiskIndex],
        pool: &SolutionPool,
    ) -> Result<(), SearchError>;

    /// Returns true if an optimal solution may visit the disks in this
    /// order.
    fn is_ok(&self, sequence: &[DiskIndex]) -> bool;
}

/// Canonicalizes a hull visit order and checks it for monotonicity.
///
/// `hull_visits` holds, for the visited hull vertices in counter-clockwise
/// hull order, the rank at which the sequence visits them. The list is
/// rotated so the first-visited vertex leads and reflected if the visit
/// direction runs clockwise; `bitonic` selects between the path-style
/// up-then-down check and the tour-style fully monotone check.
///
/// Returns the canonicalized list and whether a reflection was applied, or
/// `None` when the visit order is impossible.
pub(crate) fn canonical_visit_order(
    mut hull_visits: Vec<usize>,
    bitonic: bool,
) -> Option<(Vec<usize>, bool)> {
    let n = hull_visits.len();
    if n <= 2 {
        return Some((hull_visits, false));
    }

    // rotate the first-visited vertex to the front
    let zero_at = hull_visits.iter().position(|&v| v == 0).unwrap();
    hull_visits.rotate_left(zero_at);

    // reflect if the second visit runs clockwise along the hull
    let reversed = hull_visits[1] != 1;
    if reversed {
        hull_visits.reverse();
        hull_visits.rotate_right(1);
    }
    debug_assert_eq!(hull_visits[0], 0);

    if bitonic {
        // a monotone increase followed by a monotone decrease; lists of
        // fewer than five visits are always arrangeable this way
        if n >= 5 {
            let mut i = 0;
            while i < n - 1 && hull_visits[i] < hull_visits[i + 1] {
                i += 1;
            }
            while i < n - 1 && hull_visits[i] > hull_visits[i + 1] {
                i += 1;
            }
            if i != n - 1 {
                return None;
            }
        }
    } else if n >= 4 {
        for w in hull_visits.windows(2) {
            if w[0] > w[1] {
                return None;
            }
        }
    }
    Some((hull_visits, reversed))
}
