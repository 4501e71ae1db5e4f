/*! Finite automata whose transitions are labeled with conditions.

An [`Automaton`] is an immutable triple formed by a start [`State`], a set of
accepting states and a [`TransitionTable`]. Automata are created with an
[`AutomatonBuilder`], either by hand or by compiling a [`crate::Regex`].

Transitions are labeled with a [`Condition`], which is either a value that
implements [`Matchable`] or the special [`Condition::Epsilon`], which is
traversed without consuming any input. Automata containing epsilon
transitions can be reduced to equivalent automata without them using
[`Automaton::to_dfa`].
*/

use std::fmt::{Debug, Display, Formatter};

use rustc_hash::FxHashSet;

pub use builder::AutomatonBuilder;
pub use state_set::StateSet;

mod builder;
mod epsilon;
mod state_set;


/// A state in an automaton.
///
/// States are plain identities, they don't carry any data. Their ordinals
/// are assigned by [`AutomatonBuilder`] in increasing order starting at 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State(usize);

impl State {
    /// Returns the ordinal of this state.
    #[inline]
    pub fn id(&self) -> usize {
        self.0
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Types that can be used as transition conditions.
///
/// The type parameter `V` is the type of the values that the condition is
/// tested against. The same condition type can implement `Matchable` for
/// several value types.
///
/// Two conditions are considered identical when they are equal according to
/// [`PartialEq`], this is what the subset construction relies on when
/// grouping transitions.
pub trait Matchable<V: ?Sized>: PartialEq {
    /// Returns true if `value` satisfies the condition.
    fn matches(&self, value: &V) -> bool;
}

/// The label of a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Condition<M> {
    /// Traversed without consuming any input. Never matches a value.
    Epsilon,
    /// Traversed when the consumed value satisfies the condition.
    Match(M),
}

impl<M> Condition<M> {
    /// Returns true if this is [`Condition::Epsilon`].
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Condition::Epsilon)
    }

    /// Returns the inner condition, or `None` for [`Condition::Epsilon`].
    #[inline]
    pub fn as_match(&self) -> Option<&M> {
        match self {
            Condition::Epsilon => None,
            Condition::Match(m) => Some(m),
        }
    }

    /// Returns true if `value` satisfies the condition. Epsilon doesn't
    /// match anything.
    #[inline]
    pub fn matches<V: ?Sized>(&self, value: &V) -> bool
    where
        M: Matchable<V>,
    {
        match self {
            Condition::Epsilon => false,
            Condition::Match(m) => m.matches(value),
        }
    }
}

impl<M: Display> Display for Condition<M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Epsilon => write!(f, "ε"),
            Condition::Match(m) => write!(f, "{}", m),
        }
    }
}

/// A transition leaving some state.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<M> {
    /// Condition that must be satisfied.
    pub condition: Condition<M>,
    /// State reached after the transition.
    pub destination: State,
}

/// Maps each state to the ordered list of transitions leaving it.
///
/// The list preserves insertion order and no deduplication is performed.
/// Several transitions with the same condition may leave the same state.
#[derive(Clone, Debug)]
pub struct TransitionTable<M> {
    // Indexed by state ordinal.
    table: Vec<Vec<Transition<M>>>,
}

impl<M> Default for TransitionTable<M> {
    fn default() -> Self {
        Self { table: Vec::new() }
    }
}

impl<M> TransitionTable<M> {
    /// Appends a transition from `from` to `to` labeled with `condition`.
    pub fn add_transition(
        &mut self,
        from: State,
        condition: Condition<M>,
        to: State,
    ) {
        let min_len = from.0.max(to.0) + 1;
        if self.table.len() < min_len {
            self.table.resize_with(min_len, Vec::new);
        }
        self.table[from.0].push(Transition { condition, destination: to });
    }

    /// Transitions leaving `state`, in insertion order.
    #[inline]
    pub fn transitions(&self, state: State) -> &[Transition<M>] {
        self.table.get(state.0).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the destination of the first transition leaving `state` whose
    /// condition matches `value`.
    ///
    /// Transitions are scanned in insertion order and the first match wins,
    /// later transitions are never considered even if they also match.
    pub fn destination<V: ?Sized>(&self, state: State, value: &V) -> Option<State>
    where
        M: Matchable<V>,
    {
        self.transitions(state)
            .iter()
            .find(|t| t.condition.matches(value))
            .map(|t| t.destination)
    }

    /// Iterates over every transition in the table as `(from, transition)`
    /// pairs, ordered by source state and then by insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (State, &Transition<M>)> {
        self.table.iter().enumerate().flat_map(|(from, transitions)| {
            transitions.iter().map(move |t| (State(from), t))
        })
    }

    /// Number of states known to the table.
    #[inline]
    pub(crate) fn num_states(&self) -> usize {
        self.table.len()
    }

    pub(crate) fn ensure_state(&mut self, state: State) {
        if self.table.len() <= state.0 {
            self.table.resize_with(state.0 + 1, Vec::new);
        }
    }
}

/// An immutable finite automaton.
#[derive(Clone, Debug)]
pub struct Automaton<M> {
    start: State,
    accept: FxHashSet<State>,
    table: TransitionTable<M>,
}

impl<M> Automaton<M> {
    /// The start state.
    #[inline]
    pub fn start(&self) -> State {
        self.start
    }

    /// Returns true if `state` is an accepting state.
    #[inline]
    pub fn accept(&self, state: State) -> bool {
        self.accept.contains(&state)
    }

    /// Accepting states, in increasing order.
    pub fn accept_states(&self) -> Vec<State> {
        let mut states: Vec<State> = self.accept.iter().copied().collect();
        states.sort();
        states
    }

    /// The transition table.
    #[inline]
    pub fn transition_table(&self) -> &TransitionTable<M> {
        &self.table
    }

    /// Number of states in the automaton.
    #[inline]
    pub fn num_states(&self) -> usize {
        self.table.num_states()
    }

    /// Returns the state reached from `state` after consuming `value`, using
    /// first-match-wins semantics. See [`TransitionTable::destination`].
    #[inline]
    pub fn destination<V: ?Sized>(&self, state: State, value: &V) -> Option<State>
    where
        M: Matchable<V>,
    {
        self.table.destination(state, value)
    }

    /// Returns true if any transition is labeled with [`Condition::Epsilon`].
    pub fn has_epsilon(&self) -> bool {
        self.table.iter().any(|(_, t)| t.condition.is_epsilon())
    }

    /// Returns true if the automaton accepts the sequence `input`.
    ///
    /// This simulates the automaton over sets of states, following every
    /// matching transition and every epsilon transition, so it works both
    /// for deterministic automata and for automata with epsilon transitions.
    pub fn accepts<'a, V, I>(&self, input: I) -> bool
    where
        V: ?Sized + 'a,
        I: IntoIterator<Item = &'a V>,
        M: Matchable<V>,
    {
        let mut current = self.epsilon_closure(&StateSet::from_iter([self.start]));

        for value in input {
            let mut next = StateSet::new();
            for state in current.iter() {
                for t in self.table.transitions(state) {
                    if t.condition.matches(value) {
                        next.insert(t.destination);
                    }
                }
            }
            if next.is_empty() {
                return false;
            }
            current = self.epsilon_closure(&next);
        }

        let accepted = current.iter().any(|state| self.accept(state));
        accepted
    }
}

/// Writes the automaton as text, one line per transition with the form
/// `from -[condition]-> to`, followed by one `accept N` line per accepting
/// state and a final `start N` line.
impl<M: Display> Display for Automaton<M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (from, t) in self.table.iter() {
            writeln!(f, "{} -[{}]-> {}", from, t.condition, t.destination)?;
        }
        for state in self.accept_states() {
            writeln!(f, "accept {}", state)?;
        }
        write!(f, "start {}", self.start)
    }
}
