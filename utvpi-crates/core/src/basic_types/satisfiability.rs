use std::fmt::Display;
use std::fmt::Formatter;

use crate::basic_types::Weight;
use crate::graph::ConstraintGraph;
use crate::graph::Variable;
use crate::graph::VertexId;

/// The answer to a satisfiability query over a [`ConstraintGraph`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Satisfiability<R> {
    /// There is an integer assignment satisfying every constraint in the graph.
    Satisfiable,
    /// The constraints are jointly inconsistent; the conflict explains why.
    Unsatisfiable(Conflict<R>),
}

impl<R> Satisfiability<R> {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, Satisfiability::Satisfiable)
    }

    pub fn conflict(&self) -> Option<&Conflict<R>> {
        match self {
            Satisfiability::Satisfiable => None,
            Satisfiability::Unsatisfiable(conflict) => Some(conflict),
        }
    }

    /// The answer as `(is_satisfiable, reasons)`; the reasons are empty when satisfiable.
    pub fn into_parts(self) -> (bool, Vec<R>) {
        match self {
            Satisfiability::Satisfiable => (true, Vec::new()),
            Satisfiability::Unsatisfiable(conflict) => (false, conflict.into_reasons()),
        }
    }
}

/// How a conflict was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    /// A cycle with negative total weight; inconsistent over the rationals already.
    NegativeCycle,
    /// A zero-weight cycle of tight edges through both occurrences of `variable`, along which
    /// `x+ -> x-` has odd weight. Rounding `2x <= odd` down to the next even bound turns it into a
    /// negative cycle, so it is only inconsistent over the integers.
    Tightening { variable: Variable },
}

/// A minimal explanation of unsatisfiability: a closed walk through the graph together with the
/// reasons of the edges it uses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conflict<R> {
    kind: ConflictKind,
    /// Closed: the first and last vertex coincide.
    cycle: Vec<VertexId>,
    reasons: Vec<R>,
}

impl<R> Conflict<R> {
    pub(crate) fn new(kind: ConflictKind, cycle: Vec<VertexId>, reasons: Vec<R>) -> Self {
        Conflict {
            kind,
            cycle,
            reasons,
        }
    }

    pub fn kind(&self) -> ConflictKind {
        self.kind
    }

    /// The vertices of the cycle in edge order, starting and ending at the same vertex.
    pub fn cycle(&self) -> &[VertexId] {
        &self.cycle
    }

    /// The reasons of the cycle's edges, in cycle order.
    pub fn reasons(&self) -> &[R] {
        &self.reasons
    }

    pub fn into_reasons(self) -> Vec<R> {
        self.reasons
    }

    /// Print the cycle using the occurrence (and variable names) of each vertex.
    pub fn display<'a, W: Weight>(&'a self, graph: &'a ConstraintGraph<W, R>) -> impl Display + 'a
    where
        R: Clone,
    {
        ConflictDisplay {
            conflict: self,
            graph,
        }
    }
}

struct ConflictDisplay<'a, W, R> {
    conflict: &'a Conflict<R>,
    graph: &'a ConstraintGraph<W, R>,
}

impl<W: Weight, R: Clone> Display for ConflictDisplay<'_, W, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.conflict.kind {
            ConflictKind::NegativeCycle => write!(f, "negative cycle")?,
            ConflictKind::Tightening { variable } => write!(f, "tightening of {variable}")?,
        }

        let names = self.graph.variable_names();
        for (index, &vertex) in self.conflict.cycle.iter().enumerate() {
            let separator = if index == 0 { ": " } else { " -> " };
            match self.graph.occurrence(vertex) {
                Some(occurrence) => {
                    write!(f, "{separator}{}", names.display_occurrence(occurrence))?
                }
                None => write!(f, "{separator}root")?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn satisfiable_has_no_reasons() {
        let answer: Satisfiability<u32> = Satisfiability::Satisfiable;

        assert!(answer.is_satisfiable());
        assert!(answer.conflict().is_none());
        assert_eq!((true, vec![]), answer.into_parts());
    }

    #[test]
    fn conflicts_display_with_variable_names() {
        let mut graph = ConstraintGraph::<i32, u32>::new();
        let x = graph.new_named_variable("x");
        let positive = graph.vertex(x.positive()).expect("registered");
        let negative = graph.vertex(x.negative()).expect("registered");

        let conflict = Conflict::new(
            ConflictKind::Tightening { variable: x },
            vec![positive, negative, positive],
            vec![1, 2],
        );

        assert_eq!(
            "tightening of x0: x+ -> x- -> x+",
            conflict.display(&graph).to_string()
        );

        let answer = Satisfiability::Unsatisfiable(conflict);
        assert!(!answer.is_satisfiable());
        assert_eq!((false, vec![1, 2]), answer.into_parts());
    }
}
