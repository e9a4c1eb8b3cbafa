//! The constraint graph: an arena of vertices, one per signed variable occurrence plus a root,
//! connected by weighted edges that carry the reasons of the constraints they came from.
mod constraint_graph;
mod ids;
mod occurrence;
mod reason_map;
mod utvpi_constraint;
mod variable_names;

pub use constraint_graph::*;
pub use ids::*;
pub use occurrence::*;
pub(crate) use reason_map::ReasonMap;
pub use utvpi_constraint::*;
pub use variable_names::VariableNames;
