use thiserror::Error;

use crate::graph::SignedOccurrence;
#[cfg(doc)]
use crate::graph::ConstraintGraph;

/// Errors related to adding vertices, edges and constraints to a [`ConstraintGraph`].
///
/// Solving never produces these; an unsatisfiable graph is a regular answer.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge or constraint refers to an occurrence that has no vertex in the graph.
    #[error("the occurrence {0} has not been registered with the graph")]
    UnregisteredOccurrence(SignedOccurrence),
    /// A single-variable constraint `±x <= c` is stored as `2c`, which does not fit the weight
    /// type.
    #[error("doubling the bound of a single-variable constraint overflows the weight type")]
    BoundOverflow,
}
