//! Turning predecessor links into paths, and paths into reasons.
//!
//! Both kinds of conflict are reported this way: a negative cycle is read off the predecessor
//! links left behind by Bellman-Ford, a tightening cycle off breadth-first trees grown inside the
//! tight-edge subgraph.

use std::collections::VecDeque;

use super::tight_subgraph::InducedSubgraph;
use super::tight_subgraph::InducedVertex;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::utvpi_asserts::utvpi_assert_simple;

/// A relation assigning each vertex the vertex it was reached from.
pub(crate) trait Predecessors<Vertex> {
    fn predecessor(&self, vertex: Vertex) -> Option<Vertex>;
}

/// Walk the predecessor links backwards from `end` until `start` is reached.
///
/// Returns the vertices in forward order, beginning with `start` and ending with `end`. When
/// `start == end` at least one link is followed, so the result is a closed cycle.
///
/// # Panics
/// If the walk runs into a vertex without predecessor or does not reach `start` within
/// `max_steps` links. Both mean the caller's claim that such a path exists was wrong.
pub(crate) fn trace_path<Vertex, P>(
    predecessors: &P,
    start: Vertex,
    end: Vertex,
    max_steps: usize,
) -> Vec<Vertex>
where
    Vertex: Copy + Eq + std::fmt::Debug,
    P: Predecessors<Vertex>,
{
    let mut path = vec![end];
    let mut current = end;

    for _ in 0..max_steps {
        let previous = predecessors.predecessor(current).unwrap_or_else(|| {
            panic!("the walk from {end:?} back to {start:?} ran out of predecessors at {current:?}")
        });
        path.push(previous);

        if previous == start {
            path.reverse();
            return path;
        }

        current = previous;
    }

    panic!("no path from {start:?} to {end:?} closed within {max_steps} steps")
}

/// Find a cycle in the predecessor relation by following the links from `from` until a vertex
/// repeats.
///
/// The cycle is returned closed and in forward (edge) order, starting and ending at the first
/// repeated vertex.
pub(crate) fn cycle_in_predecessors<Vertex, P>(
    predecessors: &P,
    from: Vertex,
    num_vertices: usize,
) -> Vec<Vertex>
where
    Vertex: StorageKey + Copy + Eq + std::fmt::Debug,
    P: Predecessors<Vertex>,
{
    let mut visited: KeyedVec<Vertex, bool> = KeyedVec::filled(num_vertices, false);
    let mut current = from;

    while !visited[current] {
        visited[current] = true;
        current = predecessors.predecessor(current).unwrap_or_else(|| {
            panic!("the predecessors of {from:?} reach {current:?} without closing a cycle")
        });
    }

    trace_path(predecessors, current, current, num_vertices)
}

/// Whether following the predecessor links from `from` runs into a cycle instead of ending at a
/// vertex without predecessor.
pub(crate) fn leads_into_cycle<Vertex, P>(
    predecessors: &P,
    from: Vertex,
    num_vertices: usize,
) -> bool
where
    Vertex: Copy,
    P: Predecessors<Vertex>,
{
    let mut current = from;

    // A walk of `num_vertices` links visits some vertex twice.
    for _ in 0..num_vertices {
        match predecessors.predecessor(current) {
            Some(previous) => current = previous,
            None => return false,
        }
    }

    true
}

/// A breadth-first tree of the induced subgraph, rooted at `source`.
#[derive(Debug)]
pub(crate) struct BreadthFirstTree {
    parent: KeyedVec<InducedVertex, Option<InducedVertex>>,
}

impl Predecessors<InducedVertex> for BreadthFirstTree {
    fn predecessor(&self, vertex: InducedVertex) -> Option<InducedVertex> {
        self.parent[vertex]
    }
}

impl BreadthFirstTree {
    /// Explore from `source` until `target` is discovered (or everything reachable is).
    ///
    /// Successors are visited in edge insertion order, so the tree and the resulting paths are
    /// deterministic and use as few edges as possible.
    pub(crate) fn grow<W, R>(
        subgraph: &InducedSubgraph<W, R>,
        source: InducedVertex,
        target: InducedVertex,
    ) -> Self {
        utvpi_assert_simple!(source != target, "a tree path needs distinct endpoints");

        let mut tree = BreadthFirstTree {
            parent: KeyedVec::filled(subgraph.num_vertices(), None),
        };
        let mut discovered: KeyedVec<InducedVertex, bool> =
            KeyedVec::filled(subgraph.num_vertices(), false);
        let mut queue = VecDeque::from([source]);
        discovered[source] = true;

        while let Some(vertex) = queue.pop_front() {
            for &(successor, _) in subgraph.successors(vertex) {
                if discovered[successor] {
                    continue;
                }

                discovered[successor] = true;
                tree.parent[successor] = Some(vertex);

                if successor == target {
                    return tree;
                }

                queue.push_back(successor);
            }
        }

        tree
    }
}

/// A path from `source` to `target` inside the induced subgraph.
///
/// # Panics
/// If `target` is not reachable from `source`; callers only ask for vertices that share a
/// strongly connected component.
pub(crate) fn path_in_subgraph<W, R>(
    subgraph: &InducedSubgraph<W, R>,
    source: InducedVertex,
    target: InducedVertex,
) -> Vec<InducedVertex> {
    let tree = BreadthFirstTree::grow(subgraph, source, target);
    trace_path(&tree, source, target, subgraph.num_vertices())
}
