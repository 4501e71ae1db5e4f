/*! Runs automata over trees.

The [`Engine`] simulates one or more automata over the nodes of a [`Tree`].
Consuming the next input value is mapped to moving to the next node along
the tree, which lets a linear pattern match not only siblings in sequence
but also nested structure that ends at the right edge of a preceding
sibling.

The traversal visits the nodes in depth-first pre-order, assigning each one
an increasing position, and computes for every automaton two sets per node:

- `start`: the [`Tuple2`]s describing the match attempts that enter the
  node. The root starts a fresh attempt, a first child inherits the
  attempts entering its parent, and any other node continues the attempts
  that consumed some node on the rightmost path of its preceding sibling.

- `trans`: the [`Tuple4`]s describing how each of those attempts moves
  through the node, one per attempt for which the automaton has a
  transition matching the node.

A match is accepted when some tuple on the rightmost path of the whole tree
reaches an accepting state. The sequence of nodes consumed by the match is
recovered by following the tuples backwards.

Each attempt follows only the first transition whose condition matches the
node. Automata produced by [`Automaton::to_dfa`] can still have several
transitions matching the same node when their conditions overlap, for
instance `num` and `num("1")`. In that case the engine may miss a match
that [`Automaton::accepts`] finds.

```rust
use treematch::{Engine, NodeMatcher, Regex};
use treematch_tree::TreeBuilder;

let tree = TreeBuilder::<()>::root("call", |b| {
    b.leaf("left", "(");
    b.leaf("num", "1");
    b.leaf("right", ")");
})
.build();

let re = Regex::concat([
    Regex::literal(NodeMatcher::new("left")),
    Regex::repeat(Regex::literal(NodeMatcher::new("num"))),
    Regex::literal(NodeMatcher::new("right")),
]);

let engine = Engine::new([re.to_automaton().unwrap()]);
let traversal = engine.traverse(&tree);
let accepted = engine.accepted_tuples(&traversal);

assert_eq!(accepted.len(), 1);

let derivation = engine.backtrack_for(&traversal, &accepted[0]).unwrap();
let positions: Vec<usize> = derivation.iter().map(|t| t.p_prime).collect();

assert_eq!(positions, vec![1, 2, 3]);
```
*/

use std::collections::BTreeSet;
use std::time::Instant;

use log::{info, trace};

use treematch_tree::{Node, NodeId, Tree};

use crate::automaton::{Automaton, Matchable};
use crate::config::{Ambiguity, EngineConfig};
use crate::Error;

pub use tuple::{Position, Tuple2, Tuple4};

mod tuple;

#[cfg(test)]
mod tests;

/// The role that a node plays in the traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeType {
    /// The root of the tree.
    Root,
    /// The first child of its parent.
    FirstChild,
    /// A child that has some preceding sibling.
    LaterSibling,
}

/// Per-node working state computed by a traversal.
#[derive(Clone, Debug, Default)]
pub struct Field {
    /// Position of the node in the traversal, `None` until it is visited.
    pub id: Option<Position>,
    /// Start tuples, one set per automaton.
    pub start: Vec<BTreeSet<Tuple2>>,
    /// Transition tuples, one set per automaton.
    pub trans: Vec<BTreeSet<Tuple4>>,
}

impl Field {
    fn new(num_automata: usize) -> Self {
        Self {
            id: None,
            start: vec![BTreeSet::new(); num_automata],
            trans: vec![BTreeSet::new(); num_automata],
        }
    }
}

/// The result of traversing a tree with an [`Engine`].
///
/// Holds the [`Field`] of every node and the table that maps positions back
/// to nodes. Fields are derived data, valid only for the traversal that
/// produced them.
pub struct Traversal<'t, T> {
    tree: &'t Tree<T>,
    // Indexed by `NodeId::index`.
    fields: Vec<Field>,
    // Indexed by position.
    nodes: Vec<NodeId>,
}

impl<'t, T> Traversal<'t, T> {
    fn new(tree: &'t Tree<T>, num_automata: usize) -> Self {
        Self {
            tree,
            fields: vec![Field::new(num_automata); tree.len()],
            nodes: Vec::with_capacity(tree.len()),
        }
    }

    /// The traversed tree.
    #[inline]
    pub fn tree(&self) -> &'t Tree<T> {
        self.tree
    }

    /// The field computed for `node`.
    #[inline]
    pub fn field(&self, node: NodeId) -> &Field {
        &self.fields[node.index()]
    }

    /// Returns the node visited at `position`.
    #[inline]
    pub fn node_of(&self, position: Position) -> Option<NodeId> {
        self.nodes.get(position).copied()
    }

    /// Returns the position assigned to `node`.
    #[inline]
    pub fn position_of(&self, node: NodeId) -> Option<Position> {
        self.fields.get(node.index()).and_then(|field| field.id)
    }

    /// Discards all the computed fields, making room for the tuples of
    /// `num_automata` automata.
    pub fn reset(&mut self, num_automata: usize) {
        for field in self.fields.iter_mut() {
            *field = Field::new(num_automata);
        }
        self.nodes.clear();
    }

    fn node_at(&self, position: Position) -> NodeId {
        self.node_of(position).unwrap_or_else(|| {
            panic!("no node at position {} of the traversal", position)
        })
    }
}

/// Runs a list of automata over trees.
///
/// Automata are identified by their index in the list, which is what
/// [`Tuple2::belongs_to`] and [`Tuple4::belongs_to`] refer to.
pub struct Engine<M> {
    automata: Vec<Automaton<M>>,
    config: EngineConfig,
}

impl<M> Engine<M> {
    /// Creates an engine for the given automata.
    pub fn new<I: IntoIterator<Item = Automaton<M>>>(automata: I) -> Self {
        Self::with_config(automata, EngineConfig::default())
    }

    /// Creates an engine for the given automata with a custom
    /// configuration.
    pub fn with_config<I: IntoIterator<Item = Automaton<M>>>(
        automata: I,
        config: EngineConfig,
    ) -> Self {
        Self { automata: automata.into_iter().collect(), config }
    }

    /// Appends an automaton to the engine and returns its index.
    pub fn add_automaton(&mut self, automaton: Automaton<M>) -> usize {
        self.automata.push(automaton);
        self.automata.len() - 1
    }

    /// The automata run by this engine.
    #[inline]
    pub fn automata(&self) -> &[Automaton<M>] {
        self.automata.as_slice()
    }

    /// Classifies `node` according to its position in the tree.
    pub fn node_type<T>(&self, tree: &Tree<T>, node: NodeId) -> NodeType {
        let node = tree.node(node);
        if node.is_root() {
            NodeType::Root
        } else if node.index() == 0 {
            NodeType::FirstChild
        } else {
            NodeType::LaterSibling
        }
    }

    /// Returns the rightmost path of `node`, from the node downwards.
    pub fn rightmost_path<T>(&self, tree: &Tree<T>, node: NodeId) -> Vec<NodeId> {
        tree.rightmost_path(node)
    }

    /// Traverses `tree` once, computing the field of every node.
    pub fn traverse<'t, T>(&self, tree: &'t Tree<T>) -> Traversal<'t, T>
    where
        M: Matchable<Node<T>>,
    {
        let mut traversal = Traversal::new(tree, self.automata.len());
        self.run(&mut traversal);
        traversal
    }

    /// Traverses the tree in `traversal` again, discarding the fields
    /// computed by the previous traversal.
    ///
    /// The previous traversal may come from another engine, or from this
    /// one before more automata were added.
    pub fn retraverse<T>(&self, traversal: &mut Traversal<'_, T>)
    where
        M: Matchable<Node<T>>,
    {
        traversal.reset(self.automata.len());
        self.run(traversal);
    }

    fn run<T>(&self, traversal: &mut Traversal<'_, T>)
    where
        M: Matchable<Node<T>>,
    {
        let start = Instant::now();
        let tree = traversal.tree;

        for (position, node) in tree.preorder().enumerate() {
            traversal.fields[node.index()].id = Some(position);
            traversal.nodes.push(node);
            self.assign_start(traversal, node);
            self.assign_trans(traversal, node);
            trace!(
                "visited `{}` at position {}",
                tree.node(node).symbol(),
                position
            );
        }

        info!(
            "traversal of {} nodes with {} automata took {:?}",
            tree.len(),
            self.automata.len(),
            Instant::elapsed(&start)
        );
    }

    fn assign_start<T>(&self, traversal: &mut Traversal<'_, T>, node: NodeId) {
        let tree = traversal.tree;
        let node_type = self.node_type(tree, node);

        for (idx, automaton) in self.automata.iter().enumerate() {
            let start = match node_type {
                NodeType::Root => BTreeSet::from([Tuple2 {
                    p: None,
                    q: automaton.start(),
                    belongs_to: idx,
                }]),
                NodeType::FirstChild => {
                    // The root is the only node without parent.
                    let parent = tree.node(node).parent().unwrap_or(node);
                    traversal.fields[parent.index()].start[idx].clone()
                }
                NodeType::LaterSibling => {
                    let brother = tree.previous_sibling(node).unwrap_or(node);
                    tree.rightmost_path(brother)
                        .into_iter()
                        .flat_map(|n| traversal.fields[n.index()].trans[idx].iter())
                        .map(Tuple4::handoff)
                        .collect()
                }
            };
            traversal.fields[node.index()].start[idx] = start;
        }
    }

    fn assign_trans<T>(&self, traversal: &mut Traversal<'_, T>, node: NodeId)
    where
        M: Matchable<Node<T>>,
    {
        let tree = traversal.tree;
        let value = tree.node(node);
        let field = &mut traversal.fields[node.index()];
        let Some(position) = field.id else {
            unreachable!("position must be assigned before transitions")
        };

        for (idx, automaton) in self.automata.iter().enumerate() {
            field.trans[idx] = field.start[idx]
                .iter()
                .filter_map(|t| {
                    automaton.destination(t.q, value).map(|q_prime| Tuple4 {
                        p: t.p,
                        q: t.q,
                        p_prime: position,
                        q_prime,
                        belongs_to: idx,
                    })
                })
                .collect();
        }
    }

    /// Returns the tuples on the rightmost path of the tree whose
    /// destination is an accepting state of their automaton.
    ///
    /// An empty result means that no automaton matched the tree.
    pub fn accepted_tuples<T>(&self, traversal: &Traversal<'_, T>) -> Vec<Tuple4> {
        let tree = traversal.tree;
        let accepted: BTreeSet<Tuple4> = tree
            .rightmost_path(tree.root())
            .into_iter()
            .flat_map(|node| traversal.field(node).trans.iter())
            .flatten()
            .filter(|t| self.automata[t.belongs_to].accept(t.q_prime))
            .copied()
            .collect();

        accepted.into_iter().collect()
    }

    /// Reconstructs the sequence of steps that led to `tuple`, which is
    /// usually one of the tuples returned by [`Engine::accepted_tuples`].
    ///
    /// The first step in the sequence is the one that started the match,
    /// the last one is `tuple` itself.
    ///
    /// When more than one step could precede some other, the first one is
    /// chosen, unless the engine is configured with [`Ambiguity::Strict`],
    /// in which case [`Error::AmbiguousDerivation`] is returned.
    ///
    /// # Panics
    ///
    /// If `tuple` was not produced by this traversal.
    pub fn backtrack_for<T>(
        &self,
        traversal: &Traversal<'_, T>,
        tuple: &Tuple4,
    ) -> Result<Vec<Tuple4>, Error> {
        let mut derivation = vec![*tuple];
        let mut current = *tuple;

        while let Some(p) = current.p {
            let prev = traversal.node_at(p);
            let mut candidates = traversal.field(prev).trans[current.belongs_to]
                .iter()
                .filter(|c| c.p_prime == p && c.q_prime == current.q);

            let Some(found) = candidates.next() else {
                panic!("no tuple precedes {} at position {}", current, p);
            };

            if self.config.ambiguity == Ambiguity::Strict
                && candidates.next().is_some()
            {
                return Err(Error::AmbiguousDerivation {
                    position: p,
                    state: current.q.id(),
                });
            }

            current = *found;
            derivation.push(current);
        }

        derivation.reverse();
        Ok(derivation)
    }

    /// Backtracks every accepted tuple, returning one derivation per match.
    pub fn backtrack<T>(
        &self,
        traversal: &Traversal<'_, T>,
    ) -> Result<Vec<Vec<Tuple4>>, Error> {
        self.accepted_tuples(traversal)
            .iter()
            .map(|tuple| self.backtrack_for(traversal, tuple))
            .collect()
    }

    /// Returns the node visited at `position`.
    #[inline]
    pub fn node_of<T>(
        &self,
        traversal: &Traversal<'_, T>,
        position: Position,
    ) -> Option<NodeId> {
        traversal.node_of(position)
    }

    /// Maps a derivation to the nodes consumed by each of its steps.
    pub fn derivation_nodes<T>(
        &self,
        traversal: &Traversal<'_, T>,
        derivation: &[Tuple4],
    ) -> Vec<NodeId> {
        derivation.iter().map(|t| traversal.node_at(t.p_prime)).collect()
    }
}
