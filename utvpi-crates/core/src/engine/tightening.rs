use super::components::StronglyConnectedComponents;
use super::path_reconstruction::path_in_subgraph;
use super::shortest_paths::ShortestPaths;
use super::tight_subgraph::InducedSubgraph;
use super::tight_subgraph::InducedVertex;
use crate::basic_types::Weight;
use crate::graph::ConstraintGraph;
use crate::graph::Polarity;
use crate::graph::Variable;

/// A variable whose two occurrences lie on a common cycle of tight edges, at distances of odd
/// difference.
///
/// Along the tight path `x+ -> x-` this says `2x <= k` (or `2x >= k`) for an odd `k`; over the
/// integers this rounds to `k - 1`, and the cycle back through `x- -> x+` becomes negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TighteningViolation {
    pub(crate) variable: Variable,
    pub(crate) positive: InducedVertex,
    pub(crate) negative: InducedVertex,
}

impl TighteningViolation {
    /// The closed cycle `x+ -> .. -> x- -> .. -> x+` inside the tight subgraph.
    pub(crate) fn cycle<W, R>(&self, subgraph: &InducedSubgraph<W, R>) -> Vec<InducedVertex> {
        let mut cycle = path_in_subgraph(subgraph, self.positive, self.negative);
        let way_back = path_in_subgraph(subgraph, self.negative, self.positive);
        cycle.extend_from_slice(&way_back[1..]);
        cycle
    }
}

/// All variables violating the tightening condition, in ascending vertex order of their positive
/// occurrence.
///
/// Variables with an occurrence that is not on any tight edge are skipped; such an occurrence is
/// not on a tight cycle.
pub(crate) fn find_violations<'a, W: Weight, R: Clone>(
    graph: &'a ConstraintGraph<W, R>,
    paths: &'a ShortestPaths<W>,
    subgraph: &'a InducedSubgraph<W, R>,
    components: &'a StronglyConnectedComponents,
) -> impl Iterator<Item = TighteningViolation> + 'a {
    graph.vertices().filter_map(move |vertex| {
        let occurrence = graph.occurrence(vertex)?;
        if occurrence.polarity() != Polarity::Positive {
            return None;
        }

        let negated = graph.vertex(occurrence.negate())?;
        let positive = subgraph.induced(vertex)?;
        let negative = subgraph.induced(negated)?;

        if !components.same_component(positive, negative) {
            return None;
        }

        paths
            .distance(vertex)
            .has_odd_difference(paths.distance(negated))
            .then_some(TighteningViolation {
                variable: occurrence.variable(),
                positive,
                negative,
            })
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::Rng;
    use rand::SeedableRng;

    use super::*;
    use crate::engine::shortest_paths::bellman_ford;
    use crate::engine::shortest_paths::ShortestPathOutcome;
    use crate::engine::RelaxationStrategy;
    use crate::graph::Term;
    use crate::graph::UtvpiConstraint;

    fn violations<W: Weight>(
        graph: &ConstraintGraph<W, &'static str>,
    ) -> Vec<TighteningViolation> {
        let ShortestPathOutcome::Distances(paths) =
            bellman_ford(graph, RelaxationStrategy::EarlyExit, &mut 0)
        else {
            panic!("no negative cycle expected");
        };
        let subgraph = InducedSubgraph::build(graph, &paths);
        let components = StronglyConnectedComponents::compute(&subgraph);

        find_violations(graph, &paths, &subgraph, &components).collect()
    }

    #[test]
    fn halved_odd_bound_is_a_violation() {
        let mut graph = ConstraintGraph::<i32, &str>::new();
        let x = graph.new_variable();
        // x+ - x- <= 1 and x- - x+ <= -1, i.e. 2x = 1.
        let _ = graph
            .add_edge(x.negative(), x.positive(), 1, "2x <= 1")
            .expect("registered");
        let _ = graph
            .add_edge(x.positive(), x.negative(), -1, "2x >= 1")
            .expect("registered");

        let found = violations(&graph);

        assert_eq!(1, found.len());
        assert_eq!(x, found[0].variable);
    }

    #[test]
    fn even_parity_is_not_a_violation() {
        let mut graph = ConstraintGraph::<i32, &str>::new();
        let x = graph.new_variable();
        // x = 1
        graph
            .add_constraint(UtvpiConstraint::upper_bound(x, 1), "x <= 1")
            .expect("registered");
        graph
            .add_constraint(
                UtvpiConstraint::lower_bound(x, 1).expect("no overflow"),
                "x >= 1",
            )
            .expect("registered");

        assert!(violations(&graph).is_empty());
    }

    #[test]
    fn parity_is_exact_at_the_edges_of_the_range() {
        let mut graph = ConstraintGraph::<i8, &str>::new();
        let x = graph.new_variable();
        let y = graph.new_variable();
        // 2x >= 64 puts x- at the minimum while x+ stays at 0. Their difference does not fit.
        graph
            .add_constraint(
                UtvpiConstraint::lower_bound(x, 64).expect("no overflow"),
                "x >= 64",
            )
            .expect("registered");
        let _ = graph
            .add_edge(x.negative(), y.positive(), 64, "first half")
            .expect("registered");
        let _ = graph
            .add_edge(y.positive(), x.positive(), 64, "second half")
            .expect("registered");

        assert!(violations(&graph).is_empty());

        // 2x = -127 is odd and still fits.
        let mut graph = ConstraintGraph::<i8, &str>::new();
        let x = graph.new_variable();
        let _ = graph
            .add_edge(x.negative(), x.positive(), -127, "2x <= -127")
            .expect("registered");
        let _ = graph
            .add_edge(x.positive(), x.negative(), 127, "2x >= -127")
            .expect("registered");

        let found = violations(&graph);
        assert_eq!(1, found.len());
        assert_eq!(x, found[0].variable);
    }

    #[test]
    fn sum_and_difference_force_half_integers() {
        let mut graph = ConstraintGraph::<i32, &str>::new();
        let x = graph.new_variable();
        let y = graph.new_variable();
        // x = y and x + y = 1
        for (constraint, reason) in [
            (UtvpiConstraint::sum(x, y, 1), "x + y <= 1"),
            (UtvpiConstraint::difference(x, y, 0), "x - y <= 0"),
            (
                UtvpiConstraint::new(Term::negative(x), Some(Term::negative(y)), -1),
                "-x - y <= -1",
            ),
            (UtvpiConstraint::difference(y, x, 0), "y - x <= 0"),
        ] {
            graph.add_constraint(constraint, reason).expect("registered");
        }

        let ShortestPathOutcome::Distances(paths) =
            bellman_ford(&graph, RelaxationStrategy::EarlyExit, &mut 0)
        else {
            panic!("no negative cycle expected");
        };
        let subgraph = InducedSubgraph::build(&graph, &paths);
        let components = StronglyConnectedComponents::compute(&subgraph);
        let found = find_violations(&graph, &paths, &subgraph, &components).collect::<Vec<_>>();

        assert_eq!(vec![x, y], found.iter().map(|v| v.variable).collect::<Vec<_>>());

        let cycle = found[0].cycle(&subgraph);
        let as_occurrences = cycle
            .iter()
            .map(|&vertex| graph.occurrence(subgraph.original(vertex)).expect("not root"))
            .collect::<Vec<_>>();
        assert_eq!(
            vec![
                x.positive(),
                y.negative(),
                x.negative(),
                y.positive(),
                x.positive()
            ],
            as_occurrences
        );
        assert_eq!(
            vec!["-x - y <= -1", "y - x <= 0", "x + y <= 1", "x - y <= 0"],
            subgraph.reasons().along_path(&cycle)
        );
    }

    #[test]
    fn singleton_partitions_have_no_violations() {
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..200 {
            let mut graph = ConstraintGraph::<i32, &str>::new();
            let variables = (0..3).map(|_| graph.new_variable()).collect::<Vec<_>>();

            for _ in 0..rng.gen_range(0..6) {
                let source = variables[rng.gen_range(0..3)];
                let target = variables[rng.gen_range(0..3)];
                let source = if rng.gen_bool(0.5) {
                    source.positive()
                } else {
                    source.negative()
                };
                let target = if rng.gen_bool(0.5) {
                    target.positive()
                } else {
                    target.negative()
                };
                let _ = graph
                    .add_edge(source, target, rng.gen_range(-3..=3), "random")
                    .expect("registered");
            }

            let ShortestPathOutcome::Distances(paths) =
                bellman_ford(&graph, RelaxationStrategy::Full, &mut 0)
            else {
                continue;
            };
            let subgraph = InducedSubgraph::build(&graph, &paths);
            let components = StronglyConnectedComponents::compute(&subgraph);

            if components.is_singleton_partition() {
                assert_eq!(
                    0,
                    find_violations(&graph, &paths, &subgraph, &components).count()
                );
            }
        }
    }
}
