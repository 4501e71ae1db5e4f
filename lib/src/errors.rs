use thiserror::Error;

/// Errors returned by this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// An automaton was built without designating a start state.
    #[error("automaton has no start state")]
    MissingStartState,

    /// A derivation can be reconstructed in more than one way and the
    /// engine was configured to reject ambiguous derivations.
    #[error(
        "ambiguous derivation: more than one step reaches state {state} at position {position}"
    )]
    AmbiguousDerivation {
        /// Position of the node where the derivation forks.
        position: usize,
        /// Automaton state reached by every candidate step.
        state: usize,
    },

    /// None of the rules of a language matched the tree.
    #[error("no syntax matched the tree")]
    NoSyntaxMatched,

    /// The configuration couldn't be loaded.
    #[error(transparent)]
    Config(#[from] figment::Error),
}
