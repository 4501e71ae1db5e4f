/*! Epsilon closures and the reduction of automata with epsilon transitions
to automata without them (subset construction).
*/

use std::collections::VecDeque;

use log::debug;
use rustc_hash::FxHashMap;

use super::{Automaton, AutomatonBuilder, Condition, State, StateSet};

impl<M> Automaton<M> {
    /// Computes the epsilon-closure of `states`.
    ///
    /// The closure contains `states` plus every state reachable from them
    /// following only [`Condition::Epsilon`] transitions. States already in
    /// the closure are never visited twice, so this terminates even when
    /// epsilon transitions form cycles.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut queue: VecDeque<State> = states.iter().collect();

        while let Some(state) = queue.pop_front() {
            for t in self.table.transitions(state) {
                if t.condition.is_epsilon() && closure.insert(t.destination) {
                    queue.push_back(t.destination);
                }
            }
        }

        closure
    }

    /// Returns the distinct conditions, other than epsilon, labeling the
    /// transitions that leave `state`. Conditions are returned in the order
    /// in which they appear first.
    pub fn non_epsilon_conditions(&self, state: State) -> Vec<&M>
    where
        M: PartialEq,
    {
        let mut conditions = Vec::new();
        for t in self.table.transitions(state) {
            if let Some(cond) = t.condition.as_match() {
                if !conditions.contains(&cond) {
                    conditions.push(cond);
                }
            }
        }
        conditions
    }

    /// Returns an equivalent automaton without epsilon transitions.
    ///
    /// Each state in the new automaton corresponds to an epsilon-closure of
    /// states in this one. Starting with the closure of the start state,
    /// every closure is expanded by grouping the transitions that leave any
    /// of its states by condition; the destinations of each group are
    /// epsilon-closed and become a new state unless an equal closure was
    /// seen before. A state is accepting if its closure contains some
    /// accepting state of this automaton.
    ///
    /// Transitions leaving each new state keep the order in which their
    /// conditions were first found.
    ///
    /// Conditions are grouped by equality, not by the values they match.
    /// Two different conditions that match the same value, like `num` and
    /// `num("1")`, produce two transitions out of the same state, so the
    /// result accepts the same sequences as this automaton but is not
    /// strictly deterministic.
    ///
    /// # Panics
    ///
    /// If a condition advertised as leaving a closure yields no destination,
    /// which means that the transition table is corrupt.
    pub fn to_dfa(&self) -> Automaton<M>
    where
        M: Clone + PartialEq,
    {
        let mut builder = AutomatonBuilder::new();
        let start_closure =
            self.epsilon_closure(&StateSet::from_iter([self.start]));
        let start_state = builder.new_state(true, false);

        let mut closure_map = FxHashMap::default();
        let mut closures = vec![(start_closure.clone(), start_state)];
        let mut queue = VecDeque::from([start_closure.clone()]);

        closure_map.insert(start_closure, start_state);

        while let Some(closure) = queue.pop_front() {
            let current = closure_map[&closure];

            let mut conditions: Vec<&M> = Vec::new();
            for state in closure.iter() {
                for cond in self.non_epsilon_conditions(state) {
                    if !conditions.contains(&cond) {
                        conditions.push(cond);
                    }
                }
            }

            for cond in conditions {
                let destinations: StateSet = closure
                    .iter()
                    .flat_map(|state| self.table.transitions(state))
                    .filter(|t| t.condition.as_match() == Some(cond))
                    .map(|t| t.destination)
                    .collect();

                assert!(
                    !destinations.is_empty(),
                    "no destination states for a condition leaving {:?}",
                    closure
                );

                let next = self.epsilon_closure(&destinations);

                let destination = match closure_map.get(&next) {
                    Some(state) => *state,
                    None => {
                        let state = builder.state();
                        closure_map.insert(next.clone(), state);
                        closures.push((next.clone(), state));
                        queue.push_back(next);
                        state
                    }
                };

                builder.add_transition(
                    current,
                    Condition::Match(cond.clone()),
                    destination,
                );
            }
        }

        for (closure, state) in &closures {
            if closure.iter().any(|s| self.accept(s)) {
                builder.accept(*state);
            }
        }

        debug!(
            "epsilon elimination: {} states reduced to {}",
            self.num_states(),
            closures.len()
        );

        match builder.build() {
            Ok(dfa) => dfa,
            Err(_) => unreachable!("the start state is always designated"),
        }
    }
}
