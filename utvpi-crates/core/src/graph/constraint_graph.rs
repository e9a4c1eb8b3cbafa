use log::trace;

use super::EdgeId;
use super::ReasonMap;
use super::SignedOccurrence;
use super::UtvpiConstraint;
use super::Variable;
use super::VariableNames;
use super::VertexId;
use crate::basic_types::GraphError;
use crate::basic_types::Weight;
use crate::containers::HashMap;
use crate::containers::KeyGenerator;
use crate::containers::KeyedVec;

/// A directed edge `source -> target` with weight `w`, meaning `target <= source + w`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge<W> {
    source: VertexId,
    target: VertexId,
    weight: W,
}

impl<W: Weight> Edge<W> {
    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn target(&self) -> VertexId {
        self.target
    }

    pub fn weight(&self) -> W {
        self.weight
    }
}

#[derive(Clone, Debug, Default)]
struct VertexData {
    /// `None` only for the root.
    occurrence: Option<SignedOccurrence>,
    outgoing: Vec<EdgeId>,
}

/// The difference-constraint graph over split variables.
///
/// Vertices live in an arena and are addressed by [`VertexId`]. Vertex 0 is the root: it has no
/// occurrence, and every registered occurrence gets a synthetic zero-weight edge from it, so
/// that every vertex is reachable from a single source. The root never has incoming edges.
///
/// There is at most one edge per `(source, target)` pair. Adding a parallel edge keeps the one
/// with the smaller weight; on equal weights the edge that was there first is kept, together with
/// its reasons. Self-loops are allowed.
#[derive(Clone, Debug)]
pub struct ConstraintGraph<W, R> {
    vertices: KeyedVec<VertexId, VertexData>,
    edges: KeyedVec<EdgeId, Edge<W>>,
    edge_by_endpoints: HashMap<(VertexId, VertexId), EdgeId>,
    reasons: ReasonMap<VertexId, R>,
    vertex_by_occurrence: HashMap<SignedOccurrence, VertexId>,
    variables: KeyGenerator<Variable>,
    variable_names: VariableNames,
    root: VertexId,
}

impl<W: Weight, R: Clone> Default for ConstraintGraph<W, R> {
    fn default() -> Self {
        let mut vertices = KeyedVec::default();
        let root = vertices.push(VertexData::default());

        ConstraintGraph {
            vertices,
            edges: KeyedVec::default(),
            edge_by_endpoints: HashMap::default(),
            reasons: ReasonMap::default(),
            vertex_by_occurrence: HashMap::default(),
            variables: KeyGenerator::default(),
            variable_names: VariableNames::default(),
            root,
        }
    }
}

impl<W: Weight, R: Clone> ConstraintGraph<W, R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh variable and register both of its occurrences.
    pub fn new_variable(&mut self) -> Variable {
        let variable = self.variables.next_key();
        self.register_variable(variable);
        variable
    }

    /// Create a fresh variable with a name that is used when displaying conflicts.
    pub fn new_named_variable(&mut self, name: impl Into<String>) -> Variable {
        let variable = self.new_variable();
        self.variable_names.add(variable, name.into());
        variable
    }

    /// Register both occurrences of a variable whose identifier is managed by the caller.
    pub fn register_variable(&mut self, variable: Variable) {
        let _ = self.register_occurrence(variable.positive());
        let _ = self.register_occurrence(variable.negative());
    }

    /// Make sure `occurrence` has a vertex, and return it.
    ///
    /// A new vertex is connected to the root with a zero-weight edge.
    pub fn register_occurrence(&mut self, occurrence: SignedOccurrence) -> VertexId {
        if let Some(&vertex) = self.vertex_by_occurrence.get(&occurrence) {
            return vertex;
        }

        self.variables.skip_past(&occurrence.variable());

        let vertex = self.vertices.push(VertexData {
            occurrence: Some(occurrence),
            outgoing: Vec::new(),
        });
        let _ = self.vertex_by_occurrence.insert(occurrence, vertex);

        let edge = self.edges.push(Edge {
            source: self.root,
            target: vertex,
            weight: W::zero(),
        });
        self.vertices[self.root].outgoing.push(edge);
        let _ = self.edge_by_endpoints.insert((self.root, vertex), edge);

        vertex
    }

    /// Add the edge `source -> target`, meaning `target <= source + weight`, justified by
    /// `reason`.
    ///
    /// Both occurrences must have been registered. If the pair is already connected, the edge with
    /// the smaller weight is kept and its id is returned.
    pub fn add_edge(
        &mut self,
        source: SignedOccurrence,
        target: SignedOccurrence,
        weight: W,
        reason: R,
    ) -> Result<EdgeId, GraphError> {
        let source_vertex = self
            .vertex(source)
            .ok_or(GraphError::UnregisteredOccurrence(source))?;
        let target_vertex = self
            .vertex(target)
            .ok_or(GraphError::UnregisteredOccurrence(target))?;

        if let Some(&existing) = self.edge_by_endpoints.get(&(source_vertex, target_vertex)) {
            if weight < self.edges[existing].weight {
                trace!(
                    "Tightening {source} -> {target} from {} to {weight}",
                    self.edges[existing].weight
                );
                self.edges[existing].weight = weight;
                self.reasons.set(source_vertex, target_vertex, vec![reason]);
            }

            return Ok(existing);
        }

        let edge = self.edges.push(Edge {
            source: source_vertex,
            target: target_vertex,
            weight,
        });
        self.vertices[source_vertex].outgoing.push(edge);
        let _ = self
            .edge_by_endpoints
            .insert((source_vertex, target_vertex), edge);
        self.reasons.set(source_vertex, target_vertex, vec![reason]);

        Ok(edge)
    }

    /// Lower a UTVPI constraint into difference edges, all justified by `reason`.
    ///
    /// Nothing is added if the constraint refers to an unregistered variable or its bound
    /// overflows.
    pub fn add_constraint(
        &mut self,
        constraint: UtvpiConstraint<W>,
        reason: R,
    ) -> Result<(), GraphError> {
        let edges = constraint.lower()?;

        if let Some(missing) = edges
            .iter()
            .flat_map(|&(source, target, _)| [source, target])
            .find(|&occurrence| self.vertex(occurrence).is_none())
        {
            return Err(GraphError::UnregisteredOccurrence(missing));
        }

        for (source, target, weight) in edges {
            let _ = self.add_edge(source, target, weight, reason.clone())?;
        }

        Ok(())
    }

    /// The vertex every other vertex is reachable from.
    pub fn root(&self) -> VertexId {
        self.root
    }

    /// The number of vertices, including the root.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// One more than the largest variable id seen so far.
    pub fn num_variables(&self) -> usize {
        self.variables.num_keys()
    }

    /// The number of edges, including the synthetic edges leaving the root.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        self.vertices.keys()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<W>> {
        self.edges.iter()
    }

    pub fn edge(&self, edge: EdgeId) -> &Edge<W> {
        &self.edges[edge]
    }

    /// The edge `source -> target`, if present.
    pub fn edge_between(&self, source: VertexId, target: VertexId) -> Option<&Edge<W>> {
        self.edge_by_endpoints
            .get(&(source, target))
            .map(|&edge| &self.edges[edge])
    }

    pub fn outgoing(&self, vertex: VertexId) -> impl Iterator<Item = &Edge<W>> {
        self.vertices[vertex]
            .outgoing
            .iter()
            .map(|&edge| &self.edges[edge])
    }

    /// The vertex of `occurrence`, if it was registered.
    pub fn vertex(&self, occurrence: SignedOccurrence) -> Option<VertexId> {
        self.vertex_by_occurrence.get(&occurrence).copied()
    }

    /// The occurrence a vertex stands for; `None` for the root.
    pub fn occurrence(&self, vertex: VertexId) -> Option<SignedOccurrence> {
        self.vertices[vertex].occurrence
    }

    /// The reasons of the edge `source -> target`; empty for synthetic root edges and for pairs
    /// that are not connected.
    pub fn reasons(&self, source: VertexId, target: VertexId) -> &[R] {
        self.reasons.get(source, target)
    }

    pub(crate) fn reason_map(&self) -> &ReasonMap<VertexId, R> {
        &self.reasons
    }

    pub fn variable_names(&self) -> &VariableNames {
        &self.variable_names
    }
}
