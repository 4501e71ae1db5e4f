use std::hash::{Hash, Hasher};

use bitvec::vec::BitVec;

use super::State;

/// A set of automaton states backed by a bitmap.
///
/// Bit `n` is set when the state with ordinal `n` belongs to the set. The
/// bitmap grows on demand, so two sets holding the same states are equal
/// regardless of how much each bitmap grew. States are iterated in
/// increasing order.
#[derive(Clone, Debug, Default)]
pub struct StateSet {
    bits: BitVec<usize>,
}

impl StateSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self { bits: BitVec::new() }
    }

    /// Adds a state to the set.
    ///
    /// Returns `true` if the state was not already in the set.
    pub fn insert(&mut self, state: State) -> bool {
        let index = state.id();
        if self.bits.len() <= index {
            self.bits.resize(index + 1, false);
        }
        let added = !self.bits[index];
        self.bits.set(index, true);
        added
    }

    /// Returns `true` if `state` is in the set.
    #[inline]
    pub fn contains(&self, state: State) -> bool {
        self.bits.get(state.id()).map(|bit| *bit).unwrap_or(false)
    }

    /// Number of states in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Returns `true` if the set has no states.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Returns an iterator for the states in the set, in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = State> + '_ {
        self.bits.iter_ones().map(State)
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for StateSet {}

impl Hash for StateSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for s in self.iter() {
            s.hash(state);
        }
    }
}

impl FromIterator<State> for StateSet {
    fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
        let mut set = StateSet::new();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

impl Extend<State> for StateSet {
    fn extend<I: IntoIterator<Item = State>>(&mut self, iter: I) {
        for state in iter {
            self.insert(state);
        }
    }
}
