//! Index-addressed storage used by the graph arena and the per-call scratch arrays.
mod key_generator;
mod keyed_vec;

use fnv::FnvBuildHasher;
pub use key_generator::*;
pub use keyed_vec::*;

/// [`std::collections::HashMap`] that defaults to a deterministic hasher.
#[allow(clippy::disallowed_types, reason = "this is how we define our HashMap")]
pub type HashMap<K, V, Hasher = FnvBuildHasher> = std::collections::HashMap<K, V, Hasher>;
