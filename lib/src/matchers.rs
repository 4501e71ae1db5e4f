//! Conditions used for labeling automaton transitions.

use std::fmt::{Debug, Display, Formatter};

use treematch_tree::Node;

use crate::automaton::Matchable;

/// Matches tree nodes by symbol and, optionally, by token value.
///
/// A matcher without value matches any node with the given symbol, either
/// an inner node or a leaf. A matcher with value only matches leaves whose
/// value is equal to it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeMatcher {
    symbol: String,
    value: Option<String>,
}

impl NodeMatcher {
    /// Creates a matcher for nodes with the given symbol.
    pub fn new<S: Into<String>>(symbol: S) -> Self {
        Self { symbol: symbol.into(), value: None }
    }

    /// Creates a matcher for leaves with the given symbol and value.
    pub fn with_value<S: Into<String>, V: Into<String>>(
        symbol: S,
        value: V,
    ) -> Self {
        Self { symbol: symbol.into(), value: Some(value.into()) }
    }

    /// Symbol that nodes must have.
    #[inline]
    pub fn symbol(&self) -> &str {
        self.symbol.as_str()
    }

    /// Value that leaves must have, if any.
    #[inline]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl<T> Matchable<Node<T>> for NodeMatcher {
    fn matches(&self, node: &Node<T>) -> bool {
        node.symbol() == self.symbol
            && match &self.value {
                None => true,
                Some(value) => {
                    node.is_leaf() && node.value() == Some(value.as_str())
                }
            }
    }
}

impl Display for NodeMatcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}({:?})", self.symbol, value),
            None => write!(f, "{}", self.symbol),
        }
    }
}

/// A condition that matches values equal to the wrapped one.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal<V>(pub V);

impl<V: PartialEq> Matchable<V> for Literal<V> {
    #[inline]
    fn matches(&self, value: &V) -> bool {
        self.0 == *value
    }
}

impl<V: Debug> Debug for Literal<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl<V: Display> Display for Literal<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
