/*! Groups patterns into a language with an action per pattern.

A [`Language`] is an ordered list of rules. Each rule pairs a [`Regex`]
with an action that is invoked with the nodes consumed by the rule when it
matches. Applying the language to a tree runs every rule at once and
executes the action of the earliest rule that matched.
*/

use log::debug;

use treematch_tree::{Node, NodeId, Tree};

use crate::automaton::{Automaton, Matchable};
use crate::config::Config;
use crate::engine::Engine;
use crate::regex::{Compiler, Regex};
use crate::Error;

type Action<T, R> = Box<dyn Fn(&Tree<T>, &[NodeId]) -> R>;

/// An ordered list of patterns, each one with its own action.
pub struct Language<M, T = (), R = ()> {
    compiler: Compiler,
    engine: Engine<M>,
    actions: Vec<Action<T, R>>,
}

impl<M, T, R> Default for Language<M, T, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M, T, R> Language<M, T, R> {
    /// Creates an empty language with the default configuration.
    pub fn new() -> Self {
        Self {
            compiler: Compiler::new(),
            engine: Engine::new(Vec::<Automaton<M>>::new()),
            actions: Vec::new(),
        }
    }

    /// Creates an empty language that compiles its rules and runs them
    /// according to `config`.
    pub fn with_config(config: &Config) -> Self {
        Self {
            compiler: Compiler::from(&config.compile),
            engine: Engine::with_config(
                Vec::<Automaton<M>>::new(),
                config.engine.clone(),
            ),
            actions: Vec::new(),
        }
    }

    /// Number of rules in the language.
    #[inline]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if the language has no rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The engine running the rules, automata are in rule order.
    #[inline]
    pub fn engine(&self) -> &Engine<M> {
        &self.engine
    }
}

impl<M, T, R> Language<M, T, R>
where
    M: Clone + PartialEq + Matchable<Node<T>>,
{
    /// Adds a rule after the existing ones.
    ///
    /// `action` receives the tree and the nodes consumed by the pattern, in
    /// the order in which they were consumed.
    pub fn rule<F>(&mut self, re: &Regex<M>, action: F) -> Result<&mut Self, Error>
    where
        F: Fn(&Tree<T>, &[NodeId]) -> R + 'static,
    {
        let automaton = self.compiler.compile(re)?;
        let idx = self.engine.add_automaton(automaton);

        debug_assert_eq!(idx, self.actions.len());

        self.actions.push(Box::new(action));
        Ok(self)
    }

    /// Applies the language to `tree`.
    ///
    /// When more than one rule matches, the one that was added first wins.
    /// Returns [`Error::NoSyntaxMatched`] if no rule matches.
    pub fn apply(&self, tree: &Tree<T>) -> Result<R, Error> {
        let traversal = self.engine.traverse(tree);

        let Some(accepted) = self
            .engine
            .accepted_tuples(&traversal)
            .into_iter()
            .min_by_key(|t| t.belongs_to)
        else {
            return Err(Error::NoSyntaxMatched);
        };

        let derivation = self.engine.backtrack_for(&traversal, &accepted)?;
        let nodes = self.engine.derivation_nodes(&traversal, &derivation);

        debug!(
            "rule #{} matched {} nodes of `{}`",
            accepted.belongs_to,
            nodes.len(),
            tree.node(tree.root()).symbol()
        );

        Ok((self.actions[accepted.belongs_to])(tree, nodes.as_slice()))
    }
}
