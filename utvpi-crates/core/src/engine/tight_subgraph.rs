use log::trace;

use super::shortest_paths::ShortestPaths;
use crate::basic_types::Weight;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::graph::ConstraintGraph;
use crate::graph::ReasonMap;
use crate::graph::VertexId;
use crate::utvpi_asserts::utvpi_assert_eq_simple;

/// Index of a vertex in an [`InducedSubgraph`]; unrelated to the [`VertexId`] it stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct InducedVertex {
    id: u32,
}

impl StorageKey for InducedVertex {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        InducedVertex { id: index as u32 }
    }
}

/// The subgraph of edges that are tight under a shortest-path solution, i.e. `source -> target`
/// with `distance[target] - distance[source] == weight`.
///
/// Only tight edges can lie on a cycle that integer rounding makes negative: an edge with slack
/// absorbs the rounding. Vertices are added the first time they take part in a tight edge, so
/// the subgraph has its own, denser numbering, and its own copy of the edge reasons.
#[derive(Clone, Debug)]
pub(crate) struct InducedSubgraph<W, R> {
    original: KeyedVec<InducedVertex, VertexId>,
    induced: KeyedVec<VertexId, Option<InducedVertex>>,
    successors: KeyedVec<InducedVertex, Vec<(InducedVertex, W)>>,
    reasons: ReasonMap<InducedVertex, R>,
    num_edges: usize,
}

impl<W, R> InducedSubgraph<W, R> {
    pub(crate) fn num_vertices(&self) -> usize {
        self.original.len()
    }

    pub(crate) fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub(crate) fn vertices(&self) -> impl Iterator<Item = InducedVertex> {
        self.original.keys()
    }

    /// The tight edges leaving `vertex`, as `(target, weight)` in the order they were found.
    pub(crate) fn successors(&self, vertex: InducedVertex) -> &[(InducedVertex, W)] {
        &self.successors[vertex]
    }

    /// The vertex in the original graph that `vertex` stands for.
    pub(crate) fn original(&self, vertex: InducedVertex) -> VertexId {
        self.original[vertex]
    }

    /// The subgraph vertex of `vertex`, if it takes part in a tight edge.
    pub(crate) fn induced(&self, vertex: VertexId) -> Option<InducedVertex> {
        self.induced[vertex]
    }

    pub(crate) fn reasons(&self) -> &ReasonMap<InducedVertex, R> {
        &self.reasons
    }
}

impl<W: Weight, R: Clone> InducedSubgraph<W, R> {
    /// Collect the tight edges of `graph` under `paths`.
    ///
    /// Edges leaving the root are skipped: the root belongs to no variable and has no incoming
    /// edges, so it cannot be on a cycle.
    pub(crate) fn build(graph: &ConstraintGraph<W, R>, paths: &ShortestPaths<W>) -> Self {
        utvpi_assert_eq_simple!(graph.num_vertices(), paths.num_vertices());

        let mut subgraph = InducedSubgraph {
            original: KeyedVec::default(),
            induced: KeyedVec::filled(graph.num_vertices(), None),
            successors: KeyedVec::default(),
            reasons: ReasonMap::default(),
            num_edges: 0,
        };

        for edge in graph.edges() {
            let source = edge.source();
            let target = edge.target();

            if source == graph.root() {
                continue;
            }

            let is_tight = paths
                .distance(target)
                .difference(paths.distance(source))
                .is_some_and(|difference| difference == edge.weight());
            if !is_tight {
                continue;
            }

            let induced_source = subgraph.add_vertex(source);
            let induced_target = subgraph.add_vertex(target);

            subgraph.successors[induced_source].push((induced_target, edge.weight()));
            subgraph.reasons.set(
                induced_source,
                induced_target,
                graph.reasons(source, target).to_vec(),
            );
            subgraph.num_edges += 1;
        }

        trace!(
            "Tight subgraph has {} vertices and {} edges",
            subgraph.num_vertices(),
            subgraph.num_edges
        );

        subgraph
    }

    fn add_vertex(&mut self, vertex: VertexId) -> InducedVertex {
        if let Some(induced) = self.induced[vertex] {
            return induced;
        }

        let induced = self.original.push(vertex);
        let _ = self.successors.push(Vec::new());
        self.induced[vertex] = Some(induced);
        induced
    }
}
