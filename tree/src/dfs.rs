//! Depth-first traversal of a [`Tree`].
//!
//! [`DFSIter`] walks the tree and emits a [`DFSEvent`] for each node. An
//! `Enter` event is emitted when a node is visited for the first time, before
//! visiting its children. A `Leave` event is emitted after all the node's
//! children have been visited. Children are visited from left to right.
//!
//! # Example
//!
//! ```rust
//! use treematch_tree::TreeBuilder;
//! use treematch_tree::dfs::DFSEvent;
//!
//! let tree = TreeBuilder::<()>::root("pair", |b| {
//!     b.leaf("key", "color");
//!     b.leaf("value", "blue");
//! })
//! .build();
//!
//! let mut symbols = Vec::new();
//!
//! for event in tree.dfs() {
//!     if let DFSEvent::Enter(id) = event {
//!         symbols.push(tree.node(id).symbol());
//!     }
//! }
//!
//! assert_eq!(symbols, vec!["pair", "key", "value"]);
//! ```
use crate::{NodeId, Tree};

/// Events yielded by [`DFSIter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DFSEvent<T> {
    Enter(T),
    Leave(T),
}

/// An iterator that performs a depth-first search traversal of a [`Tree`].
///
/// This iterator yields an [`DFSEvent::Enter`] when entering a node and a
/// [`DFSEvent::Leave`] when leaving it. For leaves, the `Enter` and `Leave`
/// events are emitted consecutively.
pub struct DFSIter<'t, T> {
    tree: &'t Tree<T>,
    stack: Vec<DFSEvent<NodeId>>,
}

impl<'t, T> DFSIter<'t, T> {
    /// Creates a new [`DFSIter`] that traverses the subtree rooted at
    /// `start`.
    pub fn new(tree: &'t Tree<T>, start: NodeId) -> Self {
        Self { tree, stack: vec![DFSEvent::Enter(start)] }
    }

    /// Returns an iterator that yields the nodes currently being visited,
    /// from the innermost one up to the node where the traversal started.
    ///
    /// Right after an [`DFSEvent::Enter`] the first item is the node that
    /// was just entered.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.stack.iter().rev().filter_map(|event| match event {
            DFSEvent::Enter(_) => None,
            DFSEvent::Leave(id) => Some(*id),
        })
    }

    /// Prunes the search tree, preventing the traversal from visiting the
    /// children of the current node.
    ///
    /// If `prune` is called immediately after an [`DFSEvent::Enter`], none
    /// of the entered node's children are visited, and the next event will
    /// be the corresponding [`DFSEvent::Leave`]. If it is called right after
    /// a [`DFSEvent::Leave`], the remaining siblings of the node that was
    /// just left are not visited.
    pub fn prune(&mut self) {
        while let Some(DFSEvent::Enter(_)) = self.stack.last() {
            self.stack.pop();
        }
    }
}

impl<'t, T> Iterator for DFSIter<'t, T> {
    type Item = DFSEvent<NodeId>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.stack.pop()? {
            DFSEvent::Enter(id) => {
                self.stack.push(DFSEvent::Leave(id));
                // Children are pushed in reverse order so that the leftmost
                // one is at the top of the stack.
                for child in self.tree.node(id).children().iter().rev() {
                    self.stack.push(DFSEvent::Enter(*child));
                }
                Some(DFSEvent::Enter(id))
            }
            DFSEvent::Leave(id) => Some(DFSEvent::Leave(id)),
        }
    }
}
