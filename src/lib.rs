//! Library for working with deterministic finite automata (DFAs) in Rust.
//!
//! A [`DFA`] consists of a finite set of states, an alphabet of `char` symbols, a partial
//! transition function which assigns to each state and symbol at most one successor, an
//! initial state and a set of accepting states. It accepts a finite word if reading the word
//! from the initial state ends in an accepting state. States are stored in an arena and are
//! referred to by their [`automaton::StateIndex`] or by their unique name, see
//! [`automaton::Indexes`].
//!
//! On top of the data model, the crate provides
//! - running words through an automaton, see [`DFA::accepts`] and [`DFA::run`],
//! - reachability analysis, e.g. [`DFA::accessible_states`], [`DFA::coaccessible_states`] and
//!   [`DFA::trim`],
//! - structural transformations like [`DFA::complete`], [`DFA::negate`] and the synchronized
//!   [`DFA::product`] of two automata,
//! - minimization through Moore's partition refinement (behind the `minimize` feature), see
//!   [`DFA::minimize`],
//! - a line based text format which can be saved and loaded, see [`script`],
//! - conversion into the DOT language and rendering with graphviz, see
//!   [`transition_system::dot::Dottable`].
//!
//! # Example
//! ```
//! use dfakit::prelude::*;
//!
//! let dfa = DFA::builder()
//!     .with_accepting([1])
//!     .with_edges([(0, 'a', 1), (0, 'b', 0), (1, 'a', 1), (1, 'b', 1)])
//!     .into_dfa(0)
//!     .unwrap();
//! assert!(dfa.accepts("aab"));
//! assert!(!dfa.accepts("bb"));
//! assert!(dfa.is_complete());
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use dfakit::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::CharAlphabet,
        automaton::{FiniteRun, Indexes, RunOutcome, StateIndex, DFA},
        error::DfaError,
        math,
        script::{ScriptError, Statement},
        transition_system::{
            builder::DFABuilder,
            dot::{DotOptions, Dottable},
            operations::ProductIndex,
            MinimalRepresentatives,
        },
        word::FiniteWord,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

/// Module that contains definitions for dealing with alphabets.
pub mod alphabet;

/// Errors that are reported when constructing or transforming automata.
pub mod error;
pub use error::DfaError;

/// Module that contains definitions for dealing with words.
pub mod word;

/// Defines the [`DFA`] and running words on it.
#[allow(clippy::upper_case_acronyms)]
pub mod automaton;
pub use automaton::DFA;

/// This module defines the reachability analysis, construction helpers and transformations
/// of automata as well as their DOT representation.
pub mod transition_system;

/// Contains the implementation of Moore's minimization algorithm. This is feature gated behind the `minimize` feature.
#[cfg(feature = "minimize")]
pub mod minimization;

/// Reading and writing automata in a simple line based format.
pub mod script;

/// Implements the generation of random automata.
#[cfg(feature = "random")]
pub mod random;
