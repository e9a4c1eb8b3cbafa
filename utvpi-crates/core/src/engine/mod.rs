//! The decision procedure.
//!
//! A call runs in two phases over a read-only [`ConstraintGraph`](crate::ConstraintGraph):
//! 1. Bellman-Ford from the root. A negative cycle is reported straight away; it is inconsistent
//!    over the rationals already.
//! 2. The edges that are tight under the resulting distances form a subgraph whose strongly
//!    connected components are computed. If every component is a single vertex the graph is
//!    satisfiable over the integers. Otherwise a variable whose two occurrences share a component
//!    at odd distance from each other proves unsatisfiability.
//!
//! All scratch structures live for one call only.
mod components;
mod path_reconstruction;
mod shortest_paths;
mod solver;
mod tight_subgraph;
mod tightening;

pub use solver::UtvpiSolver;

/// Options for the [`UtvpiSolver`] which determine how it explores the graph and which conflict it
/// reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SatisfiabilityOptions {
    pub relaxation: RelaxationStrategy,
    pub explanation: ExplanationSelection,
}

/// How many relaxation rounds Bellman-Ford runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum RelaxationStrategy {
    /// Always run `|V| - 1` rounds before the detection round.
    Full,
    /// Stop as soon as a round improves no distance. A round without improvements means the
    /// distances are final, so no negative cycle can be missed.
    #[default]
    EarlyExit,
}

/// Which conflict is reported when several variables violate the tightening condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ExplanationSelection {
    /// Report the variable with the lowest vertex, without looking at the others.
    #[default]
    FirstViolation,
    /// Explain every violation and report the one with the fewest reasons; ties go to the lowest
    /// vertex.
    Smallest,
}
