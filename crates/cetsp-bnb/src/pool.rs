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

//! # Solution Pool (Best Feasible Trajectory Holder)
//!
//! A concurrent container for the best feasible trajectory discovered so
//! far. It exposes a fast, lock-free upper bound via an atomic (the `f64`
//! bit pattern in an `AtomicU64`) and stores the trajectory history behind a
//! `Mutex` as the source of truth. Child evaluation tasks may all discover
//! feasible trajectories, so `add` must be atomic under the monotone
//! upper-bound rule: only strictly improving trajectories are installed.
//!
//! The cheap atomic bound short-circuits obviously worse candidates without
//! locking; the mutex re-check keeps the installed history strictly
//! decreasing in length even under contention.

use cetsp_model::Trajectory;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Monotone store of feasible trajectories; the incumbent upper bound.
#[derive(Debug)]
pub struct SolutionPool {
    /// Length of the best trajectory, stored as `f64` bits for atomic
    /// access. Starts at `+inf`, meaning "no solution yet".
    upper_bound: AtomicU64,
    /// History of strictly improving trajectories; the best is last.
    solutions: Mutex<Vec<Trajectory>>,
}

impl Default for SolutionPool {
    fn default() -> Self {
        Self::new()
    }
}

impl SolutionPool {
    /// Creates an empty pool with upper bound `+inf`.
    pub fn new() -> Self {
        Self {
            upper_bound: AtomicU64::new(f64::INFINITY.to_bits()),
            solutions: Mutex::new(Vec::new()),
        }
    }

    /// The current upper bound; `+inf` while the pool is empty.
    #[inline]
    pub fn upper_bound(&self) -> f64 {
        f64::from_bits(self.upper_bound.load(Ordering::Relaxed))
    }

    /// Returns true if no solution has been installed yet.
    pub fn is_empty(&self) -> bool {
        self.solutions.lock().unwrap().is_empty()
    }

    /// Installs the trajectory if it is strictly shorter than the incumbent.
    /// Returns `true` if it became the new best.
    pub fn add(&self, trajectory: Trajectory) -> bool {
        let candidate = trajectory.length();
        if candidate >= self.upper_bound() {
            return false;
        }

        let mut guard = self.solutions.lock().unwrap();
        // Another task may have installed a better trajectory while we were
        // waiting for the lock; compare against the locked source of truth.
        if let Some(best) = guard.last() {
            if candidate >= best.length() {
                return false;
            }
        }
        self.upper_bound
            .store(candidate.to_bits(), Ordering::Relaxed);
        guard.push(trajectory);
        true
    }

    /// A clone of the best trajectory, if any.
    pub fn best(&self) -> Option<Trajectory> {
        self.solutions.lock().unwrap().last().cloned()
    }
}

impl std::fmt::Display for SolutionPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SolutionPool(upper_bound: {})", self.upper_bound())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cetsp_core::geom::Point;

    fn trajectory(length: f64) -> Trajectory {
        Trajectory::new(vec![Point::new(0.0, 0.0), Point::new(length, 0.0)])
    }

    #[test]
    fn test_upper_bound_is_monotone() {
        let pool = SolutionPool::new();
        assert_eq!(pool.upper_bound(), f64::INFINITY);
        assert!(pool.is_empty());

        assert!(pool.add(trajectory(10.0)));
        assert_eq!(pool.upper_bound(), 10.0);

        // worse and equal candidates are rejected
        assert!(!pool.add(trajectory(12.0)));
        assert!(!pool.add(trajectory(10.0)));
        assert_eq!(pool.upper_bound(), 10.0);

        assert!(pool.add(trajectory(8.0)));
        assert_eq!(pool.upper_bound(), 8.0);
    }

    #[test]
    fn test_re_adding_the_best_is_a_no_op() {
        let pool = SolutionPool::new();
        let t = trajectory(5.0);
        assert!(pool.add(t.clone()));
        assert!(!pool.add(t));
        assert_eq!(pool.best().unwrap().length(), 5.0);
    }

    #[test]
    fn test_best_tracks_latest_improvement() {
        let pool = SolutionPool::new();
        assert!(pool.best().is_none());
        pool.add(trajectory(7.0));
        pool.add(trajectory(3.0));
        assert_eq!(pool.best().unwrap().length(), 3.0);
    }

    #[test]
    fn test_concurrent_adds_keep_the_minimum() {
        use std::sync::Arc;
        use std::thread;

        let pool = Arc::new(SolutionPool::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let pool = Arc::clone(&pool);
            handles.push(thread::spawn(move || {
                for j in 0..50 {
                    pool.add(trajectory(1.0 + ((i * 50 + j) % 97) as f64));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(pool.upper_bound(), 1.0);
        let history = pool.best().unwrap();
        assert_eq!(history.length(), 1.0);
    }
}
