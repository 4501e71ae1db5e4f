use rustc_hash::FxHashSet;

use super::{Automaton, Condition, State, TransitionTable};
use crate::Error;

/// Builds an [`Automaton`].
///
/// The builder hands out fresh states with increasing ordinals and
/// accumulates transitions. Exactly one start state must be designated
/// before calling [`AutomatonBuilder::build`].
#[derive(Debug)]
pub struct AutomatonBuilder<M> {
    next_id: usize,
    start: Option<State>,
    accept: FxHashSet<State>,
    table: TransitionTable<M>,
}

impl<M> Default for AutomatonBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> AutomatonBuilder<M> {
    /// Creates a builder without states.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            start: None,
            accept: FxHashSet::default(),
            table: TransitionTable::default(),
        }
    }

    /// Adds a new state to the automaton and returns it.
    ///
    /// If `start` is true the new state replaces any previous start state.
    /// If `accept` is true the new state is added to the accepting states.
    pub fn new_state(&mut self, start: bool, accept: bool) -> State {
        let state = State(self.next_id);
        self.next_id += 1;
        self.table.ensure_state(state);
        if start {
            self.start(state);
        }
        if accept {
            self.accept(state);
        }
        state
    }

    /// Shorthand for `new_state(false, false)`.
    #[inline]
    pub fn state(&mut self) -> State {
        self.new_state(false, false)
    }

    /// Appends a transition from `from` to `to` labeled with `condition`.
    pub fn add_transition(
        &mut self,
        from: State,
        condition: Condition<M>,
        to: State,
    ) -> &mut Self {
        self.table.add_transition(from, condition, to);
        self
    }

    /// Designates `state` as the start state.
    pub fn start(&mut self, state: State) -> &mut Self {
        self.start = Some(state);
        self
    }

    /// Adds `state` to the set of accepting states.
    pub fn accept(&mut self, state: State) -> &mut Self {
        self.accept.insert(state);
        self
    }

    /// Returns the automaton.
    ///
    /// Fails with [`Error::MissingStartState`] if no start state was
    /// designated.
    pub fn build(self) -> Result<Automaton<M>, Error> {
        let start = self.start.ok_or(Error::MissingStartState)?;
        Ok(Automaton { start, accept: self.accept, table: self.table })
    }
}
