/*! Ordered, labeled trees that the treematch engine runs automata over.

A [`Tree`] is an arena of [`Node`]s. Each node has a symbol (its label), an
ordered list of children, a non-owning reference to its parent, its 0-based
position among its siblings and, for leaves, an optional token value. Nodes
are addressed by [`NodeId`], which is an index into the arena, so there are
no ownership cycles between parents and children.

Trees are usually produced by converting some other syntax tree, but for
tests and small programs [`TreeBuilder`] provides a compact way of writing
them down:

```rust
use treematch_tree::TreeBuilder;

let tree = TreeBuilder::<()>::root("call", |b| {
    b.leaf("symbol", "graph");
    b.node("args", |b| {
        b.leaf("number", "1");
    });
})
.build();

let root = tree.root();
assert_eq!(tree.node(root).symbol(), "call");
assert_eq!(tree.node(root).children().len(), 2);
assert_eq!(tree.to_string(), r#"(call (symbol "graph") (args (number "1")))"#);
```
*/

#![cfg_attr(docsrs, feature(doc_cfg))]

use std::fmt::{Display, Formatter};

pub mod dfs;


/// Identifies a node within a [`Tree`].
///
/// This is an index into the tree's arena, it is meaningful only for the
/// tree that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the position of the node within the arena.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A node in a [`Tree`].
#[derive(Debug, Clone)]
pub struct Node<T = ()> {
    symbol: String,
    value: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    index: usize,
    payload: Option<T>,
}

impl<T> Node<T> {
    /// The label of this node.
    #[inline]
    pub fn symbol(&self) -> &str {
        self.symbol.as_str()
    }

    /// The token value of a leaf, if any.
    #[inline]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The parent of this node, `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children of this node, in order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        self.children.as_slice()
    }

    /// Position of this node among its siblings. The root has index 0.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns true if this node doesn't have children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns true if this node doesn't have a parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Data attached to the node by whoever produced the tree.
    #[inline]
    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }
}

/// An ordered, labeled tree.
#[derive(Debug, Clone)]
pub struct Tree<T = ()> {
    nodes: Vec<Node<T>>,
}

impl<T> Tree<T> {
    /// Creates a tree consisting of a single leaf.
    pub fn leaf<S: Into<String>>(symbol: S, value: Option<&str>) -> Self {
        Self {
            nodes: vec![Node {
                symbol: symbol.into(),
                value: value.map(String::from),
                parent: None,
                children: Vec::new(),
                index: 0,
                payload: None,
            }],
        }
    }

    /// Returns the root of the tree.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the node identified by `id`.
    ///
    /// # Panics
    ///
    /// If `id` doesn't belong to this tree.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    /// Returns the node identified by `id`, or `None` if it doesn't exist.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes. Trees built with
    /// [`Tree::leaf`] or [`TreeBuilder`] always have a root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the sibling that immediately precedes `id`, if any.
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id);
        let parent = node.parent?;
        node.index
            .checked_sub(1)
            .map(|index| self.node(parent).children[index])
    }

    /// Returns the rightmost path that starts at `id`.
    ///
    /// The rightmost path of a node is the node itself followed by the
    /// rightmost path of its last child. For a leaf it is just the leaf. The
    /// nodes are returned from `id` downwards.
    pub fn rightmost_path(&self, id: NodeId) -> Vec<NodeId> {
        std::iter::successors(Some(id), |id| {
            self.node(*id).children.last().copied()
        })
        .collect()
    }

    /// Returns an iterator that traverses the tree in depth-first order,
    /// starting at the root. See [`dfs::DFSIter`].
    pub fn dfs(&self) -> dfs::DFSIter<'_, T> {
        dfs::DFSIter::new(self, self.root())
    }

    /// Returns the nodes of the tree in depth-first pre-order.
    pub fn preorder(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.dfs().filter_map(|event| match event {
            dfs::DFSEvent::Enter(id) => Some(id),
            dfs::DFSEvent::Leave(_) => None,
        })
    }

    fn fmt_node(&self, id: NodeId, f: &mut Formatter<'_>) -> std::fmt::Result {
        let node = self.node(id);
        if node.is_leaf() {
            return match node.value() {
                Some(value) => write!(f, "({} {:?})", node.symbol, value),
                None => write!(f, "{}", node.symbol),
            };
        }
        write!(f, "({}", node.symbol)?;
        for child in &node.children {
            write!(f, " ")?;
            self.fmt_node(*child, f)?;
        }
        write!(f, ")")
    }

    /// Returns an ASCII tree that represents the tree.
    #[cfg(feature = "ascii-tree")]
    #[cfg_attr(docsrs, doc(cfg(feature = "ascii-tree")))]
    pub fn ascii_tree(&self) -> ascii_tree::Tree {
        self.ascii_tree_at(self.root())
    }

    #[cfg(feature = "ascii-tree")]
    fn ascii_tree_at(&self, id: NodeId) -> ascii_tree::Tree {
        let node = self.node(id);
        if node.is_leaf() {
            let label = match node.value() {
                Some(value) => format!("{} {:?}", node.symbol, value),
                None => node.symbol.clone(),
            };
            ascii_tree::Tree::Leaf(vec![label])
        } else {
            ascii_tree::Tree::Node(
                node.symbol.clone(),
                node.children
                    .iter()
                    .map(|child| self.ascii_tree_at(*child))
                    .collect(),
            )
        }
    }

    /// Returns a String with an ASCII tree that represents the tree.
    #[cfg(feature = "ascii-tree")]
    #[cfg_attr(docsrs, doc(cfg(feature = "ascii-tree")))]
    pub fn ascii_tree_string(&self) -> String {
        let mut buf = String::new();
        ascii_tree::write_tree(&mut buf, &self.ascii_tree()).unwrap();
        buf
    }
}

/// Renders the tree as an s-expression. Leaves with a value are written as
/// `(symbol "value")`, leaves without value as a bare `symbol`.
impl<T> Display for Tree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.fmt_node(self.root(), f)
    }
}

/// Builds a [`Tree`] in depth-first pre-order.
///
/// Nodes are appended to the arena in the same order in which they are
/// declared, so the [`NodeId`] of each node matches its depth-first index.
pub struct TreeBuilder<T = ()> {
    nodes: Vec<Node<T>>,
    current: NodeId,
}

impl<T> TreeBuilder<T> {
    /// Creates a builder for a tree whose root has the given symbol, the
    /// closure declares the root's children.
    pub fn root<S, F>(symbol: S, f: F) -> Self
    where
        S: Into<String>,
        F: FnOnce(&mut Self),
    {
        let mut builder = Self {
            nodes: vec![Node {
                symbol: symbol.into(),
                value: None,
                parent: None,
                children: Vec::new(),
                index: 0,
                payload: None,
            }],
            current: NodeId(0),
        };
        f(&mut builder);
        builder
    }

    /// Adds an inner node as the last child of the current node. The
    /// closure declares the children of the new node.
    pub fn node<S, F>(&mut self, symbol: S, f: F) -> NodeId
    where
        S: Into<String>,
        F: FnOnce(&mut Self),
    {
        let id = self.push(symbol.into(), None);
        let parent = self.current;
        self.current = id;
        f(self);
        self.current = parent;
        id
    }

    /// Adds a leaf with the given value as the last child of the current
    /// node.
    pub fn leaf<S, V>(&mut self, symbol: S, value: V) -> NodeId
    where
        S: Into<String>,
        V: Into<String>,
    {
        self.push(symbol.into(), Some(value.into()))
    }

    /// Adds a leaf without value as the last child of the current node.
    pub fn empty_leaf<S: Into<String>>(&mut self, symbol: S) -> NodeId {
        self.push(symbol.into(), None)
    }

    /// Attaches a payload to the current node.
    pub fn payload(&mut self, payload: T) -> &mut Self {
        self.nodes[self.current.0].payload = Some(payload);
        self
    }

    /// Attaches a payload to an arbitrary node created by this builder.
    pub fn payload_of(&mut self, id: NodeId, payload: T) -> &mut Self {
        self.nodes[id.0].payload = Some(payload);
        self
    }

    /// Consumes the builder and returns the tree.
    pub fn build(self) -> Tree<T> {
        Tree { nodes: self.nodes }
    }

    fn push(&mut self, symbol: String, value: Option<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = &mut self.nodes[self.current.0];
        let index = parent.children.len();
        parent.children.push(id);
        self.nodes.push(Node {
            symbol,
            value,
            parent: Some(self.current),
            children: Vec::new(),
            index,
            payload: None,
        });
        id
    }
}
