use std::fmt::{Display, Formatter};

use crate::automaton::State;

/// Depth-first index of a node, assigned while traversing a tree.
pub type Position = usize;

/// A live match attempt entering a node.
///
/// The attempt entered the node in automaton state `q`, and the overall
/// pattern began right after the node at position `p`. When `p` is `None`
/// the pattern begins at the node itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tuple2 {
    /// Position of the node preceding the attempt, if any.
    pub p: Option<Position>,
    /// State in which the attempt enters the node.
    pub q: State,
    /// Index of the automaton that produced the tuple.
    pub belongs_to: usize,
}

/// One step of a live match attempt.
///
/// The attempt described by `(p, q)` consumed the node at position
/// `p_prime` and moved the automaton to state `q_prime`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tuple4 {
    /// Position of the node consumed by the previous step, if any.
    pub p: Option<Position>,
    /// State before consuming the node.
    pub q: State,
    /// Position of the consumed node.
    pub p_prime: Position,
    /// State after consuming the node.
    pub q_prime: State,
    /// Index of the automaton that produced the tuple.
    pub belongs_to: usize,
}

impl Tuple4 {
    /// The start tuple that this step hands off to the nodes that follow.
    #[inline]
    pub(crate) fn handoff(&self) -> Tuple2 {
        Tuple2 {
            p: Some(self.p_prime),
            q: self.q_prime,
            belongs_to: self.belongs_to,
        }
    }
}

impl Display for Tuple4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.p {
            Some(p) => write!(f, "({}, {}", p, self.q)?,
            None => write!(f, "(-1, {}", self.q)?,
        }
        write!(f, ", {}, {})@{}", self.p_prime, self.q_prime, self.belongs_to)
    }
}
