mod graph_error;
mod satisfiability;
mod weight;

pub use graph_error::GraphError;
pub use satisfiability::*;
pub use weight::Weight;
