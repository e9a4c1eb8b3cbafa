//! # UTVPI
//! A theory solver for conjunctions of *unit two variable per inequality* constraints over the
//! integers, i.e. inequalities `±x ± y <= c` and `±x <= c`.
//!
//! Each variable `x` is split into two occurrences `x+` and `x-` (standing for `x` and `-x`), so
//! that every constraint becomes a difference constraint between two occurrences. These live in a
//! [`ConstraintGraph`]; an edge `s -> t` with weight `w` means `t <= s + w`, and carries the
//! reasons (opaque tokens chosen by the caller) of the constraints it came from.
//!
//! A [`UtvpiSolver`] decides whether the graph has an integer solution. If it does not, it returns
//! a [`Conflict`]: a cycle in the graph and, in cycle order, the reasons along it. Over the
//! rationals such a cycle has negative weight; over the integers a cycle of weight zero can be
//! enough, when it forces `2x` to equal an odd number. The [`check_conflict`] function verifies a
//! conflict against the graph independently of the solver.
//!
//! # Example
//! ```rust
//! use utvpi_core::ConflictKind;
//! use utvpi_core::ConstraintGraph;
//! use utvpi_core::Term;
//! use utvpi_core::UtvpiConstraint;
//! use utvpi_core::UtvpiSolver;
//!
//! let mut graph = ConstraintGraph::<i64, usize>::new();
//! let x = graph.new_named_variable("x");
//! let y = graph.new_named_variable("y");
//!
//! // x = y and x + y = 1 have the rational solution x = y = 1/2, but no integer one.
//! graph.add_constraint(UtvpiConstraint::difference(x, y, 0), 0)?;
//! graph.add_constraint(UtvpiConstraint::difference(y, x, 0), 1)?;
//! graph.add_constraint(UtvpiConstraint::sum(x, y, 1), 2)?;
//! graph.add_constraint(
//!     UtvpiConstraint::new(Term::negative(x), Some(Term::negative(y)), -1),
//!     3,
//! )?;
//!
//! let mut solver = UtvpiSolver::default();
//! let answer = solver.satisfiable(&graph);
//!
//! let conflict = answer.conflict().expect("x + y = 1 has no integral solution with x = y");
//! assert_eq!(ConflictKind::Tightening { variable: x }, conflict.kind());
//! assert!(utvpi_core::check_conflict(&graph, conflict).is_ok());
//!
//! let mut reasons = conflict.reasons().to_vec();
//! reasons.sort();
//! assert_eq!(vec![0, 1, 2, 3], reasons);
//! # Ok::<(), utvpi_core::GraphError>(())
//! ```
pub(crate) mod basic_types;
pub(crate) mod checking;
pub mod containers;
pub(crate) mod engine;
pub(crate) mod graph;
pub mod statistics;
pub(crate) mod utvpi_asserts;

pub use convert_case;

pub use crate::basic_types::Conflict;
pub use crate::basic_types::ConflictKind;
pub use crate::basic_types::GraphError;
pub use crate::basic_types::Satisfiability;
pub use crate::basic_types::Weight;
pub use crate::checking::check_conflict;
pub use crate::checking::ConflictCheckError;
pub use crate::engine::ExplanationSelection;
pub use crate::engine::RelaxationStrategy;
pub use crate::engine::SatisfiabilityOptions;
pub use crate::engine::UtvpiSolver;
pub use crate::graph::ConstraintGraph;
pub use crate::graph::Edge;
pub use crate::graph::EdgeId;
pub use crate::graph::Polarity;
pub use crate::graph::SignedOccurrence;
pub use crate::graph::Term;
pub use crate::graph::UtvpiConstraint;
pub use crate::graph::Variable;
pub use crate::graph::VariableNames;
pub use crate::graph::VertexId;
