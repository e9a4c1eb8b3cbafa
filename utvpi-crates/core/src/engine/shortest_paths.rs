use log::debug;
use log::trace;

use super::path_reconstruction::leads_into_cycle;
use super::path_reconstruction::Predecessors;
use super::RelaxationStrategy;
use crate::basic_types::Weight;
use crate::containers::KeyedVec;
use crate::graph::ConstraintGraph;
use crate::graph::VertexId;
use crate::utvpi_asserts::utvpi_assert_advanced;

/// Distances from the root and the vertex each distance was last improved from.
#[derive(Clone, Debug)]
pub(crate) struct ShortestPaths<W> {
    distance: KeyedVec<VertexId, W>,
    predecessor: KeyedVec<VertexId, Option<VertexId>>,
}

impl<W: Weight> ShortestPaths<W> {
    pub(crate) fn distance(&self, vertex: VertexId) -> W {
        self.distance[vertex]
    }

    pub(crate) fn num_vertices(&self) -> usize {
        self.distance.len()
    }

    /// Relax `source -> target` and record `source` as the predecessor of `target` if the path
    /// through it is shorter.
    fn relax(&mut self, source: VertexId, target: VertexId, weight: W) -> Relaxation {
        let Some(candidate) = self.distance[source].combine(weight) else {
            // Shorter than anything representable, so certainly shorter than the current one.
            self.predecessor[target] = Some(source);
            return Relaxation::Underflow;
        };

        if candidate < self.distance[target] {
            self.distance[target] = candidate;
            self.predecessor[target] = Some(source);
            Relaxation::Improved
        } else {
            Relaxation::Unchanged
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Relaxation {
    Unchanged,
    Improved,
    /// The new distance is below the minimum of the weight type.
    Underflow,
}

impl<W: Weight> Predecessors<VertexId> for ShortestPaths<W> {
    fn predecessor(&self, vertex: VertexId) -> Option<VertexId> {
        self.predecessor[vertex]
    }
}

/// The outcome of [`bellman_ford`].
#[derive(Clone, Debug)]
pub(crate) enum ShortestPathOutcome<W> {
    /// No negative cycle; the distances are exact shortest-path distances from the root.
    Distances(ShortestPaths<W>),
    /// A negative cycle is reachable from the root. `last_relaxed` is a vertex whose distance
    /// could still be improved after `|V| - 1` rounds, or whose distance dropped below the
    /// minimum of `W`; walking its predecessors leads into the cycle.
    NegativeCycle {
        paths: ShortestPaths<W>,
        last_relaxed: VertexId,
    },
}

/// Single-source shortest paths from the root of `graph`, with negative-cycle detection.
///
/// Distances start at the maximum of `W` (unreached) except for the root, which is 0. Every round
/// relaxes all edges in insertion order, which makes the result deterministic. After `|V| - 1`
/// rounds one more round is run; any improvement in it proves a negative cycle.
pub(crate) fn bellman_ford<W: Weight, R: Clone>(
    graph: &ConstraintGraph<W, R>,
    strategy: RelaxationStrategy,
    rounds: &mut usize,
) -> ShortestPathOutcome<W> {
    let num_vertices = graph.num_vertices();
    let mut paths = ShortestPaths {
        distance: KeyedVec::filled(num_vertices, W::max_value()),
        predecessor: KeyedVec::filled(num_vertices, None),
    };
    paths.distance[graph.root()] = W::zero();

    let mut converged = false;
    for round in 1..num_vertices {
        *rounds += 1;

        let mut num_improvements = 0;
        for edge in graph.edges() {
            match paths.relax(edge.source(), edge.target(), edge.weight()) {
                Relaxation::Unchanged => {}
                Relaxation::Improved => num_improvements += 1,
                Relaxation::Underflow => return underflow(paths, edge.target()),
            }
        }

        trace!("Relaxation round {round}: {num_improvements} improvements");

        if num_improvements == 0 && strategy == RelaxationStrategy::EarlyExit {
            converged = true;
            break;
        }
    }

    if !converged {
        let mut last_relaxed = None;
        for edge in graph.edges() {
            match paths.relax(edge.source(), edge.target(), edge.weight()) {
                Relaxation::Unchanged => {}
                Relaxation::Improved => last_relaxed = Some(edge.target()),
                Relaxation::Underflow => return underflow(paths, edge.target()),
            }
        }

        if let Some(last_relaxed) = last_relaxed {
            return ShortestPathOutcome::NegativeCycle {
                paths,
                last_relaxed,
            };
        }
    }

    utvpi_assert_advanced!(
        graph.edges().all(|edge| paths
            .distance(edge.source())
            .combine(edge.weight())
            .is_some_and(|distance| paths.distance(edge.target()) <= distance)),
        "the distances violate an edge after convergence"
    );

    ShortestPathOutcome::Distances(paths)
}

/// A distance dropped below the minimum of `W` while relaxing into `target`.
///
/// Continuing would either wrap around or pin the distance, and both can hide a negative cycle.
/// If the predecessors of `target` lead into a cycle, that cycle is negative and is reported.
///
/// # Panics
/// If they do not, some shortest path is more negative than `W` can represent. The weights do
/// not fit the chosen weight type, which is a caller error.
fn underflow<W: Weight>(paths: ShortestPaths<W>, target: VertexId) -> ShortestPathOutcome<W> {
    assert!(
        leads_into_cycle(&paths, target, paths.num_vertices()),
        "a path to {target:?} is shorter than the minimum of {}; use a wider weight type",
        std::any::type_name::<W>()
    );

    debug!("A distance underflowed on a negative cycle through {target:?}");
    ShortestPathOutcome::NegativeCycle {
        paths,
        last_relaxed: target,
    }
}
