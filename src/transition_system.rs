//! Graph level functionality of a [`crate::DFA`]: traversals, predecessors, structural
//! operations and the DOT representation.

/// Fluent construction of automata from lists of states and edges.
pub mod builder;

/// Conversion into the DOT graph description language and rendering through graphviz.
pub mod dot;

/// Structural transformations: completion, negation and products.
pub mod operations;

/// Incoming transitions of states.
pub mod predecessors;

/// Forward and backward reachability.
pub mod reachable;
pub use reachable::MinimalRepresentatives;
