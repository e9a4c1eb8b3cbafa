//! Strongly connected components of the tight subgraph, following Tarjan.
//!
//! The depth-first search keeps its own stack of frames instead of recursing, since the tight
//! subgraph can contain paths as long as the graph itself.

use super::tight_subgraph::InducedSubgraph;
use super::tight_subgraph::InducedVertex;
use crate::containers::KeyedVec;

/// Label of a strongly connected component; labels are consecutive from 0 in the order the
/// components are completed.
pub(crate) type ComponentId = usize;

/// The partition of the induced subgraph into strongly connected components.
#[derive(Clone, Debug)]
pub(crate) struct StronglyConnectedComponents {
    component: KeyedVec<InducedVertex, ComponentId>,
    num_components: usize,
}

impl StronglyConnectedComponents {
    pub(crate) fn compute<W, R>(subgraph: &InducedSubgraph<W, R>) -> Self {
        let mut search = TarjanSearch::new(subgraph.num_vertices());

        for vertex in subgraph.vertices() {
            if search.dfs_number[vertex].is_none() {
                search.explore(subgraph, vertex);
            }
        }

        StronglyConnectedComponents {
            component: search.component,
            num_components: search.num_components,
        }
    }

    pub(crate) fn num_components(&self) -> usize {
        self.num_components
    }

    pub(crate) fn same_component(&self, first: InducedVertex, second: InducedVertex) -> bool {
        self.component[first] == self.component[second]
    }

    /// Whether every vertex is in a component of its own, in which case no cycle of tight edges
    /// exists apart from self-loops.
    pub(crate) fn is_singleton_partition(&self) -> bool {
        self.num_components == self.component.len()
    }
}

struct TarjanSearch {
    dfs_number: KeyedVec<InducedVertex, Option<usize>>,
    low_link: KeyedVec<InducedVertex, usize>,
    on_stack: KeyedVec<InducedVertex, bool>,
    stack: Vec<InducedVertex>,
    component: KeyedVec<InducedVertex, ComponentId>,
    next_dfs_number: usize,
    num_components: usize,
}

impl TarjanSearch {
    fn new(num_vertices: usize) -> Self {
        TarjanSearch {
            dfs_number: KeyedVec::filled(num_vertices, None),
            low_link: KeyedVec::filled(num_vertices, 0),
            on_stack: KeyedVec::filled(num_vertices, false),
            stack: Vec::new(),
            component: KeyedVec::filled(num_vertices, 0),
            next_dfs_number: 0,
            num_components: 0,
        }
    }

    fn visit(&mut self, vertex: InducedVertex) {
        self.dfs_number[vertex] = Some(self.next_dfs_number);
        self.low_link[vertex] = self.next_dfs_number;
        self.next_dfs_number += 1;
        self.stack.push(vertex);
        self.on_stack[vertex] = true;
    }

    fn explore<W, R>(&mut self, subgraph: &InducedSubgraph<W, R>, start: InducedVertex) {
        // Each frame is a vertex and the index of the next successor to look at.
        let mut frames = vec![(start, 0)];
        self.visit(start);

        while let Some(frame) = frames.last_mut() {
            let vertex = frame.0;

            if let Some(&(successor, _)) = subgraph.successors(vertex).get(frame.1) {
                frame.1 += 1;

                match self.dfs_number[successor] {
                    None => {
                        self.visit(successor);
                        frames.push((successor, 0));
                    }
                    Some(number) if self.on_stack[successor] => {
                        self.low_link[vertex] = self.low_link[vertex].min(number);
                    }
                    Some(_) => {}
                }

                continue;
            }

            let _ = frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                self.low_link[parent] = self.low_link[parent].min(self.low_link[vertex]);
            }

            if Some(self.low_link[vertex]) == self.dfs_number[vertex] {
                self.close_component(vertex);
            }
        }
    }

    /// Pop the stack down to and including `root`; everything popped forms one component.
    fn close_component(&mut self, root: InducedVertex) {
        while let Some(member) = self.stack.pop() {
            self.on_stack[member] = false;
            self.component[member] = self.num_components;

            if member == root {
                break;
            }
        }

        self.num_components += 1;
    }
}
