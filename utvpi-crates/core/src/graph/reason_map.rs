use std::hash::Hash;

use crate::containers::HashMap;

/// The reasons attached to each `(source, target)` pair of a graph.
///
/// Parameterised over the vertex type so the induced subgraph can keep its own copy keyed by its
/// own vertices.
#[derive(Clone, Debug)]
pub(crate) struct ReasonMap<Vertex, R> {
    reasons: HashMap<(Vertex, Vertex), Vec<R>>,
}

impl<Vertex, R> Default for ReasonMap<Vertex, R> {
    fn default() -> Self {
        Self {
            reasons: HashMap::default(),
        }
    }
}

impl<Vertex: Copy + Hash + Eq, R> ReasonMap<Vertex, R> {
    /// The reasons of the edge `source -> target`; empty if there is no such edge.
    pub(crate) fn get(&self, source: Vertex, target: Vertex) -> &[R] {
        self.reasons
            .get(&(source, target))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Overwrite the reasons of the edge `source -> target`.
    pub(crate) fn set(&mut self, source: Vertex, target: Vertex, reasons: Vec<R>) {
        let _ = self.reasons.insert((source, target), reasons);
    }
}

impl<Vertex: Copy + Hash + Eq, R: Clone> ReasonMap<Vertex, R> {
    /// Concatenate the reasons of every edge along `path`, in path order.
    pub(crate) fn along_path(&self, path: &[Vertex]) -> Vec<R> {
        path.windows(2)
            .flat_map(|step| self.get(step[0], step[1]).iter().cloned())
            .collect()
    }
}
