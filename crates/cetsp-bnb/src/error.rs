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

use cetsp_socp::SocpError;

/// The error type of the branch-and-bound engine.
///
/// Configuration and invariant errors are fatal and abort the run; solver
/// errors follow the fall-back policy described on the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A strategy or rule is incompatible with the instance, e.g. a convex
    /// hull root for a path instance, or a root sequence violating a
    /// configured rule.
    Configuration(String),
    /// An internal invariant was broken, e.g. branching on a pruned node.
    /// Indicates a bug in the engine or a strategy implementation.
    Invariant(&'static str),
    /// The external relaxation solver failed to produce a result.
    Solver(SocpError),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::Configuration(msg) => write!(f, "configuration error: {}", msg),
            SearchError::Invariant(msg) => write!(f, "invariant violation: {}", msg),
            SearchError::Solver(e) => write!(f, "relaxation solver failure: {}", e),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Solver(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SocpError> for SearchError {
    fn from(e: SocpError) -> Self {
        SearchError::Solver(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = SearchError::Configuration("bad root".into());
        assert_eq!(format!("{}", e), "configuration error: bad root");

        let e = SearchError::Invariant("cannot branch on a pruned node");
        assert_eq!(
            format!("{}", e),
            "invariant violation: cannot branch on a pruned node"
        );
    }

    #[test]
    fn test_from_socp_error() {
        let e: SearchError = SocpError::EmptySequence.into();
        assert!(matches!(e, SearchError::Solver(SocpError::EmptySequence)));
    }
}
