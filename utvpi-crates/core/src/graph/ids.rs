use crate::containers::StorageKey;

/// Stable index of a vertex in a [`ConstraintGraph`](super::ConstraintGraph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId {
    id: u32,
}

impl StorageKey for VertexId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        VertexId { id: index as u32 }
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.id)
    }
}

/// Stable index of an edge in a [`ConstraintGraph`](super::ConstraintGraph), in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    id: u32,
}

impl StorageKey for EdgeId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        EdgeId { id: index as u32 }
    }
}
