use log::debug;

use super::Regex;
use crate::automaton::{Automaton, AutomatonBuilder};
use crate::config::CompileConfig;
use crate::Error;

/// Compiles a [`Regex`] into an [`Automaton`].
///
/// The compiler allocates a start state, injects the expression from it and
/// marks the state where the expression ends as the only accepting state.
/// The resulting automaton contains epsilon transitions, which are removed
/// by default with [`Automaton::to_dfa`].
#[derive(Debug, Clone)]
pub struct Compiler {
    eliminate_epsilon: bool,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    /// Creates a new compiler that eliminates epsilon transitions.
    pub fn new() -> Self {
        Self { eliminate_epsilon: true }
    }

    /// Specifies whether epsilon transitions are eliminated after building
    /// the automaton. If `false` the compiler returns the automaton produced
    /// by Thompson's construction as is.
    pub fn eliminate_epsilon(mut self, yes: bool) -> Self {
        self.eliminate_epsilon = yes;
        self
    }

    /// Compiles `re`.
    pub fn compile<M>(&self, re: &Regex<M>) -> Result<Automaton<M>, Error>
    where
        M: Clone + PartialEq,
    {
        let mut builder = AutomatonBuilder::new();
        let start = builder.new_state(true, false);
        let end = re.inject(&mut builder, start);

        builder.accept(end);

        let automaton = builder.build()?;

        debug!(
            "regexp compiled into an automaton with {} states",
            automaton.num_states()
        );

        if self.eliminate_epsilon {
            Ok(automaton.to_dfa())
        } else {
            Ok(automaton)
        }
    }
}

impl From<&CompileConfig> for Compiler {
    fn from(config: &CompileConfig) -> Self {
        Self::new().eliminate_epsilon(config.eliminate_epsilon)
    }
}
