//! Verification of unsatisfiability certificates against the graph they were derived from.
//!
//! The checker only trusts the graph: it re-reads every edge of the reported cycle, so it can be
//! used to validate conflicts regardless of how they were produced.

use std::fmt::Debug;
use std::fmt::Display;

use itertools::Itertools;
use thiserror::Error;

use crate::basic_types::Conflict;
use crate::basic_types::ConflictKind;
use crate::basic_types::Weight;
use crate::graph::ConstraintGraph;
use crate::graph::Edge;
use crate::graph::Variable;
use crate::graph::VertexId;

/// The ways in which a [`Conflict`] can fail to prove unsatisfiability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConflictCheckError<W: Display + Debug> {
    #[error("the cycle does not start and end at the same vertex")]
    OpenCycle,
    #[error("the cycle passes through the root")]
    ThroughRoot,
    #[error("the graph has no edge from {from} to {to}")]
    MissingEdge { from: VertexId, to: VertexId },
    #[error("the total weight of the cycle overflows")]
    WeightOverflow,
    #[error("a negative cycle was reported, but the cycle has weight {0}")]
    NonNegativeCycle(W),
    #[error("a tightening cycle must have weight 0, but it has weight {0}")]
    NonZeroCycle(W),
    #[error("the cycle does not visit both occurrences of {0}")]
    MissingOccurrence(Variable),
    #[error("the path from {variable}+ to {variable}- has even weight {weight}")]
    EvenParity { variable: Variable, weight: W },
    #[error("the reasons do not match the edges along the cycle")]
    ReasonMismatch,
}

/// Check that `conflict` proves `graph` unsatisfiable over the integers.
///
/// The cycle must be a closed walk over edges of the graph avoiding the root, and the reasons
/// must be exactly the edge reasons along it. A negative cycle must have negative weight. A
/// tightening cycle must have weight zero and visit both occurrences of its variable, with an odd
/// weight on the way from `x+` to `x-`.
pub fn check_conflict<W: Weight, R: Clone + PartialEq>(
    graph: &ConstraintGraph<W, R>,
    conflict: &Conflict<R>,
) -> Result<(), ConflictCheckError<W>> {
    check_cycle(graph, conflict)?;

    if graph.reason_map().along_path(conflict.cycle()) != conflict.reasons() {
        return Err(ConflictCheckError::ReasonMismatch);
    }

    Ok(())
}

/// Everything [`check_conflict`] checks except the reasons.
pub(crate) fn check_cycle<W: Weight, R: Clone>(
    graph: &ConstraintGraph<W, R>,
    conflict: &Conflict<R>,
) -> Result<(), ConflictCheckError<W>> {
    let cycle = conflict.cycle();
    if cycle.len() < 2 || cycle.first() != cycle.last() {
        return Err(ConflictCheckError::OpenCycle);
    }

    if cycle.contains(&graph.root()) {
        return Err(ConflictCheckError::ThroughRoot);
    }

    let weights = cycle
        .iter()
        .copied()
        .tuple_windows()
        .map(|(from, to)| {
            graph
                .edge_between(from, to)
                .map(Edge::weight)
                .ok_or(ConflictCheckError::MissingEdge { from, to })
        })
        .collect::<Result<Vec<_>, _>>()?;

    match conflict.kind() {
        ConflictKind::NegativeCycle => {
            let (negative, positive): (Vec<W>, Vec<W>) =
                weights.iter().partition(|&&weight| weight < W::zero());
            let positive = total_weight(positive)?;

            // A negative part below the minimum outweighs any positive part that fits.
            if let Ok(negative) = total_weight(negative) {
                let total = negative + positive;
                if total >= W::zero() {
                    return Err(ConflictCheckError::NonNegativeCycle(total));
                }
            }
        }
        ConflictKind::Tightening { variable } => {
            let total = total_weight(weights.iter().copied())?;
            if total != W::zero() {
                return Err(ConflictCheckError::NonZeroCycle(total));
            }

            // Drop the closing vertex so positions are unique.
            let steps = &cycle[..weights.len()];
            let position = |occurrence| {
                graph
                    .vertex(occurrence)
                    .and_then(|vertex| steps.iter().position(|&step| step == vertex))
                    .ok_or(ConflictCheckError::MissingOccurrence(variable))
            };
            let positive = position(variable.positive())?;
            let negative = position(variable.negative())?;

            let half = total_weight(
                (0..weights.len())
                    .map(|offset| (positive + offset) % weights.len())
                    .take_while(|&index| index != negative)
                    .map(|index| weights[index]),
            )?;

            if !half.is_odd() {
                return Err(ConflictCheckError::EvenParity {
                    variable,
                    weight: half,
                });
            }
        }
    }

    Ok(())
}

fn total_weight<W: Weight>(
    weights: impl IntoIterator<Item = W>,
) -> Result<W, ConflictCheckError<W>> {
    weights
        .into_iter()
        .try_fold(W::zero(), |sum, weight| sum.checked_add(&weight))
        .ok_or(ConflictCheckError::WeightOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::UtvpiConstraint;
    use crate::UtvpiSolver;

    fn contradictory_bounds() -> (ConstraintGraph<i32, &'static str>, Variable) {
        let mut graph = ConstraintGraph::new();
        let x = graph.new_variable();
        graph
            .add_constraint(UtvpiConstraint::upper_bound(x, 0), "x <= 0")
            .expect("registered");
        graph
            .add_constraint(
                UtvpiConstraint::lower_bound(x, 1).expect("no overflow"),
                "x >= 1",
            )
            .expect("registered");

        (graph, x)
    }

    fn vertices(graph: &ConstraintGraph<i32, &'static str>, x: Variable) -> (VertexId, VertexId) {
        (
            graph.vertex(x.positive()).expect("registered"),
            graph.vertex(x.negative()).expect("registered"),
        )
    }

    #[test]
    fn solver_conflicts_are_accepted() {
        let (graph, _) = contradictory_bounds();

        let answer = UtvpiSolver::default().satisfiable(&graph);

        assert_eq!(
            Ok(()),
            check_conflict(&graph, answer.conflict().expect("unsatisfiable"))
        );
    }

    #[test]
    fn open_and_rooted_cycles_are_rejected() {
        let (graph, x) = contradictory_bounds();
        let (positive, negative) = vertices(&graph, x);

        let open = Conflict::new(ConflictKind::NegativeCycle, vec![positive, negative], vec![]);
        assert_eq!(
            Err(ConflictCheckError::OpenCycle),
            check_conflict(&graph, &open)
        );

        let rooted = Conflict::new(
            ConflictKind::NegativeCycle,
            vec![graph.root(), positive, graph.root()],
            vec![],
        );
        assert_eq!(
            Err(ConflictCheckError::ThroughRoot),
            check_conflict(&graph, &rooted)
        );
    }

    #[test]
    fn cycles_must_follow_edges() {
        let (graph, x) = contradictory_bounds();
        let (positive, _) = vertices(&graph, x);

        let conflict = Conflict::new(
            ConflictKind::NegativeCycle,
            vec![positive, positive],
            vec!["x <= 0"],
        );

        assert_eq!(
            Err(ConflictCheckError::MissingEdge {
                from: positive,
                to: positive
            }),
            check_conflict(&graph, &conflict)
        );
    }

    #[test]
    fn reasons_must_match_the_cycle() {
        let (graph, x) = contradictory_bounds();
        let (positive, negative) = vertices(&graph, x);

        let conflict = Conflict::new(
            ConflictKind::NegativeCycle,
            vec![positive, negative, positive],
            vec!["x <= 0", "x >= 1"],
        );

        assert_eq!(
            Err(ConflictCheckError::ReasonMismatch),
            check_conflict(&graph, &conflict)
        );
    }

    #[test]
    fn even_tight_cycles_are_not_tightening_conflicts() {
        let mut graph = ConstraintGraph::<i32, &str>::new();
        let x = graph.new_variable();
        let _ = graph
            .add_edge(x.negative(), x.positive(), 2, "x <= 1")
            .expect("registered");
        let _ = graph
            .add_edge(x.positive(), x.negative(), -2, "x >= 1")
            .expect("registered");
        let (positive, negative) = vertices(&graph, x);

        let conflict = Conflict::new(
            ConflictKind::Tightening { variable: x },
            vec![positive, negative, positive],
            vec!["x >= 1", "x <= 1"],
        );

        assert_eq!(
            Err(ConflictCheckError::EvenParity {
                variable: x,
                weight: -2
            }),
            check_conflict(&graph, &conflict)
        );

        let as_negative_cycle = Conflict::new(
            ConflictKind::NegativeCycle,
            vec![positive, negative, positive],
            vec!["x >= 1", "x <= 1"],
        );
        assert_eq!(
            Err(ConflictCheckError::NonNegativeCycle(0)),
            check_conflict(&graph, &as_negative_cycle)
        );
    }

    #[test]
    fn tightening_cycles_may_start_anywhere() {
        let mut graph = ConstraintGraph::<i32, &str>::new();
        let x = graph.new_variable();
        let _ = graph
            .add_edge(x.negative(), x.positive(), 1, "2x <= 1")
            .expect("registered");
        let _ = graph
            .add_edge(x.positive(), x.negative(), -1, "2x >= 1")
            .expect("registered");
        let (positive, negative) = vertices(&graph, x);

        let conflict = Conflict::new(
            ConflictKind::Tightening { variable: x },
            vec![negative, positive, negative],
            vec!["2x <= 1", "2x >= 1"],
        );

        assert_eq!(Ok(()), check_conflict(&graph, &conflict));
    }

    #[test]
    fn negative_cycles_below_the_minimum_are_accepted() {
        let mut graph = ConstraintGraph::<i8, &str>::new();
        let x = graph.new_variable();
        let y = graph.new_variable();
        let positive = graph.vertex(x.positive()).expect("registered");
        let other = graph.vertex(y.positive()).expect("registered");
        let _ = graph
            .add_edge(x.positive(), y.positive(), -100, "first")
            .expect("registered");
        let _ = graph
            .add_edge(y.positive(), x.positive(), -100, "second")
            .expect("registered");

        let conflict = Conflict::new(
            ConflictKind::NegativeCycle,
            vec![positive, other, positive],
            vec!["first", "second"],
        );

        assert_eq!(Ok(()), check_conflict(&graph, &conflict));
    }
}
