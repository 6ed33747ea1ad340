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

//! Named strategy configuration.
//!
//! The names match the strings the bindings expose, so a configuration can
//! round-trip through text without translation tables.

use crate::solver::ConfigError;
use std::str::FromStr;
use std::time::Duration;

/// How the root node is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootStrategyKind {
    /// The spanning subset of the convex hull order (tours only).
    ConvexHull,
    /// The farthest center pair plus the farthest third disk.
    #[default]
    LongestEdgePlusFurthestCircle,
    /// A random permutation of all disks; ablations only.
    Random,
}

impl FromStr for RootStrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ConvexHull" => Ok(Self::ConvexHull),
            "LongestEdgePlusFurthestCircle" => Ok(Self::LongestEdgePlusFurthestCircle),
            "Random" => Ok(Self::Random),
            _ => Err(ConfigError::unknown("root strategy", s)),
        }
    }
}

impl std::fmt::Display for RootStrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConvexHull => write!(f, "ConvexHull"),
            Self::LongestEdgePlusFurthestCircle => write!(f, "LongestEdgePlusFurthestCircle"),
            Self::Random => write!(f, "Random"),
        }
    }
}

/// How open nodes are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchingKind {
    /// Branch on the disk most distant from the relaxation.
    #[default]
    FarthestCircle,
    /// `FarthestCircle` plus the global convex-hull rule.
    ChFarthestCircle,
    /// `ChFarthestCircle` with node simplification enabled.
    ChFarthestCircleSimplifying,
    /// Branch on a random uncovered disk; ablations only.
    Random,
}

impl FromStr for BranchingKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FarthestCircle" => Ok(Self::FarthestCircle),
            "ChFarthestCircle" => Ok(Self::ChFarthestCircle),
            "ChFarthestCircleSimplifying" => Ok(Self::ChFarthestCircleSimplifying),
            "Random" => Ok(Self::Random),
            _ => Err(ConfigError::unknown("branching strategy", s)),
        }
    }
}

impl std::fmt::Display for BranchingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FarthestCircle => write!(f, "FarthestCircle"),
            Self::ChFarthestCircle => write!(f, "ChFarthestCircle"),
            Self::ChFarthestCircleSimplifying => write!(f, "ChFarthestCircleSimplifying"),
            Self::Random => write!(f, "Random"),
        }
    }
}

/// Which open node is explored next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
    /// Depth-first until feasible, then cheapest-first.
    #[default]
    DfsBfs,
    /// Always into the cheapest child.
    CheapestChildDepthFirst,
    /// Pure best-first.
    CheapestBreadthFirst,
    /// A random open node; ablations only.
    Random,
}

impl FromStr for SearchKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DfsBfs" => Ok(Self::DfsBfs),
            "CheapestChildDepthFirst" => Ok(Self::CheapestChildDepthFirst),
            "CheapestBreadthFirst" => Ok(Self::CheapestBreadthFirst),
            "Random" => Ok(Self::Random),
            _ => Err(ConfigError::unknown("search strategy", s)),
        }
    }
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DfsBfs => write!(f, "DfsBfs"),
            Self::CheapestChildDepthFirst => write!(f, "CheapestChildDepthFirst"),
            Self::CheapestBreadthFirst => write!(f, "CheapestBreadthFirst"),
            Self::Random => write!(f, "Random"),
        }
    }
}

/// The sequence rules filtering branch candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    GlobalConvexHullRule,
    LayeredConvexHullRule,
}

impl FromStr for RuleKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GlobalConvexHullRule" => Ok(Self::GlobalConvexHullRule),
            "LayeredConvexHullRule" => Ok(Self::LayeredConvexHullRule),
            _ => Err(ConfigError::unknown("sequence rule", s)),
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GlobalConvexHullRule => write!(f, "GlobalConvexHullRule"),
            Self::LayeredConvexHullRule => write!(f, "LayeredConvexHullRule"),
        }
    }
}

/// The full solver configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub root_strategy: RootStrategyKind,
    pub branching: BranchingKind,
    pub search: SearchKind,
    pub rules: Vec<RuleKind>,
    /// Worker pool size for batch child evaluation.
    pub num_threads: usize,
    /// Relative optimality gap the run must prove.
    pub optimality_gap: f64,
    /// Wall-clock budget.
    pub time_limit: Duration,
    /// Coverage tolerance applied to the instance.
    pub feasibility_tolerance: f64,
    /// Warm-start the pool with a 2-opt tour.
    pub warm_start: bool,
    /// Print progress to the console.
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            root_strategy: RootStrategyKind::default(),
            branching: BranchingKind::default(),
            search: SearchKind::default(),
            rules: Vec::new(),
            num_threads: 8,
            optimality_gap: 0.01,
            time_limit: Duration::from_secs(60),
            feasibility_tolerance: 0.01,
            warm_start: true,
            verbose: false,
        }
    }
}
