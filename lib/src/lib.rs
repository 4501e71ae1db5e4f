/*! Structural pattern matching over ordered trees using finite automata.

Patterns are written as regular expressions whose atoms are conditions on
tree nodes. A pattern is compiled into an [`Automaton`], and the [`Engine`]
runs one or more automata over a tree, where consuming the next input value
means moving to the next node. Sequences of siblings are matched as usual,
but a pattern can also continue from the last descendant of a sibling,
which makes it possible to match the leaves of a syntax tree even when a
parser nested them in intermediate nodes.

There are three main types in this crate: [`Regex`], [`Automaton`] and
[`Engine`]. A [`Language`] builds on top of them, pairing each pattern with
an action that is invoked with the nodes consumed by the pattern.

# Example

```rust
use treematch::{Engine, NodeMatcher, Regex};
use treematch_tree::TreeBuilder;

// (point 0 0), where the parser wrapped each argument in an `expr` node.
let tree = TreeBuilder::<()>::root("call", |b| {
    b.leaf("left", "(");
    b.node("expr", |b| {
        b.leaf("sym", "point");
    });
    b.node("expr", |b| {
        b.leaf("num", "0");
    });
    b.node("expr", |b| {
        b.leaf("num", "0");
    });
    b.leaf("right", ")");
})
.build();

// left sym("point") num* right
let re = Regex::concat([
    Regex::literal(NodeMatcher::new("left")),
    Regex::literal(NodeMatcher::with_value("sym", "point")),
    Regex::repeat(Regex::literal(NodeMatcher::new("num"))),
    Regex::literal(NodeMatcher::new("right")),
]);

let engine = Engine::new([re.to_automaton().unwrap()]);
let traversal = engine.traverse(&tree);
let derivations = engine.backtrack(&traversal).unwrap();

assert_eq!(derivations.len(), 1);

let symbols: Vec<&str> = engine
    .derivation_nodes(&traversal, &derivations[0])
    .into_iter()
    .map(|node| tree.node(node).symbol())
    .collect();

assert_eq!(symbols, vec!["left", "sym", "num", "num", "right"]);
```
*/

#![deny(missing_docs)]

pub use automaton::Automaton;
pub use automaton::AutomatonBuilder;
pub use automaton::Condition;
pub use automaton::Matchable;
pub use automaton::State;
pub use automaton::StateSet;
pub use automaton::Transition;
pub use automaton::TransitionTable;

pub use config::Config;

pub use engine::Engine;
pub use engine::Field;
pub use engine::NodeType;
pub use engine::Position;
pub use engine::Traversal;
pub use engine::Tuple2;
pub use engine::Tuple4;

pub use errors::Error;

pub use language::Language;

pub use matchers::Literal;
pub use matchers::NodeMatcher;

pub use regex::Compiler;
pub use regex::Regex;

pub mod automaton;
pub mod config;
pub mod engine;
pub mod language;
pub mod matchers;
pub mod regex;

mod errors;
