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

//! Strategy assembly and the one-call solve entry point.

use crate::config::{BranchingKind, RootStrategyKind, RuleKind, SearchKind, SolverConfig};
use cetsp_bnb::branching::{BranchingStrategy, FarthestCircle, RandomCircle};
use cetsp_bnb::heuristics::compute_tour_by_2opt;
use cetsp_bnb::root::{ConvexHullRoot, LongestEdgePlusFurthestCircle, RandomRoot, RootNodeStrategy};
use cetsp_bnb::rules::{GlobalConvexHullRule, LayeredConvexHullRule, SequenceRule};
use cetsp_bnb::search::{
    CheapestBreadthFirst, CheapestChildDepthFirst, DfsBfs, RandomNextNode, SearchStrategy,
};
use cetsp_bnb::{BnbStatistics, BranchAndBound, SearchError, TerminationReason};
use cetsp_model::{Instance, Trajectory};

/// A configuration name that does not resolve to a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    kind: &'static str,
    name: String,
}

impl ConfigError {
    pub(crate) fn unknown(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {}: '{}'", self.kind, self.name)
    }
}

impl std::error::Error for ConfigError {}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub solution: Option<Trajectory>,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub termination: TerminationReason,
    pub statistics: BnbStatistics,
}

fn build_root(kind: RootStrategyKind) -> Box<dyn RootNodeStrategy> {
    match kind {
        RootStrategyKind::ConvexHull => Box::new(ConvexHullRoot::new()),
        RootStrategyKind::LongestEdgePlusFurthestCircle => {
            Box::new(LongestEdgePlusFurthestCircle::new())
        }
        RootStrategyKind::Random => Box::new(RandomRoot::new()),
    }
}

fn build_branching(
    kind: BranchingKind,
    rules: &[RuleKind],
    num_threads: usize,
) -> Result<Box<dyn BranchingStrategy>, SearchError> {
    let extra_rule = |rule: &RuleKind| -> Box<dyn SequenceRule> {
        match rule {
            RuleKind::GlobalConvexHullRule => Box::new(GlobalConvexHullRule::new()),
            RuleKind::LayeredConvexHullRule => Box::new(LayeredConvexHullRule::new()),
        }
    };
    let strategy: Box<dyn BranchingStrategy> = match kind {
        BranchingKind::FarthestCircle => {
            let mut strategy = FarthestCircle::new(false, num_threads)?;
            for rule in rules {
                strategy.add_rule(extra_rule(rule));
            }
            Box::new(strategy)
        }
        BranchingKind::ChFarthestCircle => {
            let mut strategy = FarthestCircle::with_convex_hull_rule(false, num_threads)?;
            for rule in rules.iter().filter(|r| **r != RuleKind::GlobalConvexHullRule) {
                strategy.add_rule(extra_rule(rule));
            }
            Box::new(strategy)
        }
        BranchingKind::ChFarthestCircleSimplifying => {
            let mut strategy = FarthestCircle::with_convex_hull_rule(true, num_threads)?;
            for rule in rules.iter().filter(|r| **r != RuleKind::GlobalConvexHullRule) {
                strategy.add_rule(extra_rule(rule));
            }
            Box::new(strategy)
        }
        BranchingKind::Random => {
            let mut strategy = RandomCircle::new(true, num_threads)?;
            for rule in rules {
                strategy.add_rule(extra_rule(rule));
            }
            Box::new(strategy)
        }
    };
    Ok(strategy)
}

fn build_search(kind: SearchKind) -> Box<dyn SearchStrategy> {
    match kind {
        SearchKind::DfsBfs => Box::new(DfsBfs::new()),
        SearchKind::CheapestChildDepthFirst => Box::new(CheapestChildDepthFirst::new()),
        SearchKind::CheapestBreadthFirst => Box::new(CheapestBreadthFirst::new()),
        SearchKind::Random => Box::new(RandomNextNode::new()),
    }
}

/// Solves the instance with the given configuration.
pub fn solve(instance: Instance, config: &SolverConfig) -> Result<SolveOutcome, SearchError> {
    let instance = instance.with_feasibility_tolerance(config.feasibility_tolerance);
    let root = build_root(config.root_strategy);
    let branching = build_branching(config.branching, &config.rules, config.num_threads)?;
    let search = build_search(config.search);

    let warm_start = if config.warm_start && !instance.is_empty() {
        Some(compute_tour_by_2opt(&instance)?)
    } else {
        None
    };

    let mut bnb = BranchAndBound::new(instance, root.as_ref(), branching, search)?;
    if let Some(solution) = warm_start {
        bnb.add_upper_bound(solution.trajectory().clone());
    }
    let termination = bnb.optimize(config.time_limit, config.optimality_gap, config.verbose)?;

    Ok(SolveOutcome {
        solution: bnb.solution(),
        lower_bound: bnb.lower_bound(),
        upper_bound: bnb.upper_bound(),
        termination,
        statistics: bnb.statistics().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cetsp_core::geom::Point;
    use cetsp_model::Disk;
    use std::time::Duration;

    fn disk(x: f64, y: f64, r: f64) -> Disk {
        Disk::new(Point::new(x, y), r)
    }

    fn square_instance() -> Instance {
        Instance::new(vec![
            disk(0.0, 0.0, 0.0),
            disk(5.0, 0.0, 0.0),
            disk(5.0, 5.0, 0.0),
            disk(0.0, 5.0, 0.0),
        ])
    }

    #[test]
    fn test_default_configuration_solves_the_square() {
        let config = SolverConfig {
            time_limit: Duration::from_secs(30),
            ..SolverConfig::default()
        };
        let outcome = solve(square_instance(), &config).unwrap();
        let solution = outcome.solution.expect("square is solvable");
        assert!((solution.length() - 20.0).abs() < 1e-3);
        assert_ne!(outcome.termination, TerminationReason::TimeLimit);
    }

    #[test]
    fn test_hull_branching_with_layered_rule() {
        let config = SolverConfig {
            branching: BranchingKind::ChFarthestCircleSimplifying,
            rules: vec![RuleKind::LayeredConvexHullRule],
            time_limit: Duration::from_secs(30),
            ..SolverConfig::default()
        };
        let outcome = solve(square_instance(), &config).unwrap();
        assert!((outcome.upper_bound - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_convex_hull_root_rejects_path_instances() {
        let instance = Instance::new_path(
            vec![disk(1.0, 1.0, 0.5)],
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
        );
        let config = SolverConfig {
            root_strategy: RootStrategyKind::ConvexHull,
            ..SolverConfig::default()
        };
        assert!(matches!(
            solve(instance, &config),
            Err(SearchError::Configuration(_))
        ));
    }

    #[test]
    fn test_feasibility_tolerance_is_applied() {
        let config = SolverConfig {
            feasibility_tolerance: 0.001,
            time_limit: Duration::from_secs(30),
            ..SolverConfig::default()
        };
        let instance = Instance::new(vec![disk(0.0, 0.0, 1.0), disk(4.0, 0.0, 1.0)]);
        let outcome = solve(instance, &config).unwrap();
        assert!(outcome.solution.is_some());
        assert!(outcome.upper_bound <= 2.0 * 2.0 + 0.01);
    }

    #[test]
    fn test_statistics_are_populated() {
        let config = SolverConfig {
            time_limit: Duration::from_secs(30),
            ..SolverConfig::default()
        };
        let outcome = solve(square_instance(), &config).unwrap();
        assert!(outcome.statistics.nodes_explored >= 1);
        assert!(outcome.statistics.upper_bound.is_finite());
        assert!(outcome.statistics.elapsed > Duration::ZERO);
    }
}
