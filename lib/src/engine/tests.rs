use pretty_assertions::assert_eq;

use treematch_tree::{Tree, TreeBuilder};

use super::{Engine, NodeType, Tuple4};
use crate::automaton::Automaton;
use crate::config::{Ambiguity, EngineConfig};
use crate::matchers::NodeMatcher;
use crate::{Error, Regex};

type Re = Regex<NodeMatcher>;

fn node(symbol: &str) -> Re {
    Regex::literal(NodeMatcher::new(symbol))
}

fn token(symbol: &str, value: &str) -> Re {
    Regex::literal(NodeMatcher::with_value(symbol, value))
}

/// Runs the engine over `tree` and checks that the automaton with index
/// `$idx` accepts exactly once, with a derivation that consumes the nodes
/// at `$positions`.
macro_rules! assert_derivation {
    ($engine:expr, $traversal:expr, $idx:expr, $positions:expr) => {{
        let accepted: Vec<Tuple4> = $engine
            .accepted_tuples(&$traversal)
            .into_iter()
            .filter(|t| t.belongs_to == $idx)
            .collect();

        assert_eq!(accepted.len(), 1, "automaton {} accepted {:?}", $idx, accepted);

        let derivation = $engine.backtrack_for(&$traversal, &accepted[0]).unwrap();

        assert_eq!(
            derivation.iter().map(|t| t.p_prime).collect::<Vec<_>>(),
            $positions
        );
        assert!(derivation.iter().all(|t| t.belongs_to == $idx));
        assert_eq!(derivation[0].p, None);

        // Consecutive steps chain without gaps.
        for pair in derivation.windows(2) {
            assert_eq!(pair[1].p, Some(pair[0].p_prime));
            assert_eq!(pair[1].q, pair[0].q_prime);
        }
    }};
}

/// `(point 0 0)` as produced by a parser that nests argument lists.
fn point_call() -> Tree {
    TreeBuilder::root("expr", |b| {
        b.leaf("left", "(");
        b.node("args", |b| {
            b.node("args", |b| {
                b.node("args", |b| {
                    b.node("expr", |b| {
                        b.node("literal", |b| {
                            b.leaf("sym", "point");
                        });
                    });
                });
                b.node("expr", |b| {
                    b.node("literal", |b| {
                        b.leaf("num", "0");
                    });
                });
            });
            b.node("expr", |b| {
                b.node("literal", |b| {
                    b.leaf("num", "0");
                });
            });
        });
        b.leaf("right", ")");
    })
    .build()
}

/// `graph { A == B; A == C({"color" => 'blue'}); }`
fn graph_block() -> Tree {
    TreeBuilder::root("expr", |b| {
        b.node("call", |b| {
            b.leaf("symbol", "graph");
            b.node("block", |b| {
                b.leaf("left_curly", "{");
                b.node("exprs", |b| {
                    b.node("expr", |b| {
                        b.node("binary", |b| {
                            b.node("expr", |b| {
                                b.leaf("symbol", "A");
                            });
                            b.leaf("equal", "==");
                            b.node("expr", |b| {
                                b.leaf("symbol", "B");
                            });
                        });
                    });
                    b.leaf("semi", ";");
                    b.node("exprs", |b| {
                        b.node("expr", |b| {
                            b.node("binary", |b| {
                                b.node("expr", |b| {
                                    b.leaf("symbol", "A");
                                });
                                b.leaf("equal", "==");
                                b.node("expr", |b| {
                                    b.node("call", |b| {
                                        b.leaf("symbol", "C");
                                        b.node("args", |b| {
                                            b.node("expr", |b| {
                                                b.node("hash", |b| {
                                                    b.leaf("left_curly", "{");
                                                    b.node("pair", |b| {
                                                        b.leaf("string", "color");
                                                        b.leaf("arrow", "=>");
                                                        b.leaf("string", "'blue'");
                                                    });
                                                    b.leaf("right_curly", "}");
                                                });
                                            });
                                        });
                                    });
                                });
                            });
                        });
                        b.leaf("semi", ";");
                    });
                });
                b.leaf("right_curly", "}");
            });
        });
    })
    .build()
}

fn graph_pattern() -> Re {
    Regex::concat([
        token("symbol", "graph"),
        node("left_curly"),
        Regex::repeat(Regex::concat([
            node("symbol"),
            node("equal"),
            node("symbol"),
            Regex::optional(node("hash")),
            node("semi"),
        ])),
        node("right_curly"),
    ])
}

#[test]
fn node_types() {
    let tree = point_call();
    let engine = Engine::new(Vec::<Automaton<NodeMatcher>>::new());
    let root = tree.root();
    let children = tree.node(root).children();

    assert_eq!(engine.node_type(&tree, root), NodeType::Root);
    assert_eq!(engine.node_type(&tree, children[0]), NodeType::FirstChild);
    assert_eq!(engine.node_type(&tree, children[1]), NodeType::LaterSibling);
}

#[test]
fn rightmost_path_single_node() {
    let tree = TreeBuilder::<()>::root("foo", |_| {}).build();
    let engine = Engine::new(Vec::<Automaton<NodeMatcher>>::new());

    let rmp = engine.rightmost_path(&tree, tree.root());
    assert_eq!(rmp.len(), 1);
    assert_eq!(tree.node(rmp[0]).symbol(), "foo");

    // Without automata the traversal still assigns positions.
    let traversal = engine.traverse(&tree);
    assert_eq!(traversal.position_of(tree.root()), Some(0));
    assert!(engine.accepted_tuples(&traversal).is_empty());
}

#[test]
fn rightmost_path_nested() {
    let tree = point_call();
    let engine = Engine::new(Vec::<Automaton<NodeMatcher>>::new());

    let symbols: Vec<&str> = engine
        .rightmost_path(&tree, tree.root())
        .into_iter()
        .map(|n| tree.node(n).symbol())
        .collect();

    assert_eq!(symbols, vec!["expr", "right"]);
}

#[test]
fn flat_sequence() {
    let tree = TreeBuilder::<()>::root("call", |b| {
        b.leaf("left", "(");
        b.leaf("sym", "point");
        b.leaf("num", "0");
        b.leaf("num", "0");
        b.leaf("right", ")");
    })
    .build();

    let automaton = Regex::concat([
        node("left"),
        token("sym", "point"),
        node("num"),
        node("num"),
        node("right"),
    ])
    .to_automaton()
    .unwrap();

    let engine = Engine::new([automaton]);
    let traversal = engine.traverse(&tree);

    assert_derivation!(engine, traversal, 0, vec![1, 2, 3, 4, 5]);
}

#[test]
fn single_automaton_nested_literals() {
    let tree = point_call();
    let automaton = Regex::concat([
        node("left"),
        token("sym", "point"),
        node("num"),
        node("num"),
        node("right"),
    ])
    .to_automaton()
    .unwrap();

    let engine = Engine::new([automaton]);
    let traversal = engine.traverse(&tree);

    assert_derivation!(engine, traversal, 0, vec![1, 7, 10, 13, 14]);

    let accepted = engine.accepted_tuples(&traversal);
    let derivation = engine.backtrack_for(&traversal, &accepted[0]).unwrap();
    let symbols: Vec<&str> = engine
        .derivation_nodes(&traversal, &derivation)
        .into_iter()
        .map(|n| tree.node(n).symbol())
        .collect();

    assert_eq!(symbols, vec!["left", "sym", "num", "num", "right"]);
}

#[test]
fn single_automaton_nested_repetition() {
    let tree = point_call();
    let automaton = Regex::concat([
        node("left"),
        node("expr"),
        Regex::repeat(node("expr")),
        node("right"),
    ])
    .to_automaton()
    .unwrap();

    let engine = Engine::new([automaton]);
    let traversal = engine.traverse(&tree);

    assert_derivation!(engine, traversal, 0, vec![1, 5, 8, 11, 14]);
}

#[test]
fn single_automaton_block() {
    let tree = graph_block();
    let engine = Engine::new([graph_pattern().to_automaton().unwrap()]);
    let traversal = engine.traverse(&tree);

    assert_derivation!(
        engine,
        traversal,
        0,
        vec![2, 4, 9, 10, 12, 13, 18, 19, 22, 25, 32, 33]
    );
}

#[test]
fn no_match() {
    let tree = point_call();
    let automaton = Regex::concat([node("left"), node("right")])
        .to_automaton()
        .unwrap();

    let engine = Engine::new([automaton]);
    let traversal = engine.traverse(&tree);

    assert!(engine.accepted_tuples(&traversal).is_empty());
    assert!(engine.backtrack(&traversal).unwrap().is_empty());
}

#[test]
fn multiple_automata() {
    let tree = point_call();
    let automata = [
        node("args"),
        Regex::concat([node("left"), Regex::repeat(node("literal")), node("right")]),
        node("expr"),
    ]
    .iter()
    .map(|re| re.to_automaton().unwrap())
    .collect::<Vec<_>>();

    let engine = Engine::new(automata);
    let traversal = engine.traverse(&tree);

    assert_eq!(engine.accepted_tuples(&traversal).len(), 2);
    assert_derivation!(engine, traversal, 1, vec![1, 6, 9, 12, 14]);
    assert_derivation!(engine, traversal, 2, vec![0]);

    let derivations = engine.backtrack(&traversal).unwrap();
    assert_eq!(derivations.len(), 2);
    for derivation in derivations {
        let idx = derivation[0].belongs_to;
        assert!(idx < engine.automata().len());
        assert!(derivation.iter().all(|t| t.belongs_to == idx));
    }
}

#[test]
fn multiple_automata_block() {
    let tree = graph_block();
    let automata = [
        graph_pattern(),
        Regex::concat([node("symbol"), Regex::optional(node("args")), node("block")]),
        node("call"),
    ]
    .iter()
    .map(|re| re.to_automaton().unwrap())
    .collect::<Vec<_>>();

    let engine = Engine::new(automata);
    let traversal = engine.traverse(&tree);

    assert_eq!(engine.accepted_tuples(&traversal).len(), 3);
    assert_derivation!(
        engine,
        traversal,
        0,
        vec![2, 4, 9, 10, 12, 13, 18, 19, 22, 25, 32, 33]
    );
    assert_derivation!(engine, traversal, 1, vec![2, 3]);
    assert_derivation!(engine, traversal, 2, vec![1]);
}

#[test]
fn retraverse() {
    let tree = point_call();
    let automaton = Regex::concat([node("left"), Regex::plus(node("expr")), node("right")])
        .to_automaton()
        .unwrap();

    let engine = Engine::new([automaton]);
    let mut traversal = engine.traverse(&tree);
    let first = engine.backtrack(&traversal).unwrap();

    engine.retraverse(&mut traversal);

    assert_eq!(engine.backtrack(&traversal).unwrap(), first);
    assert_eq!(engine.node_of(&traversal, 14), Some(tree.rightmost_path(tree.root())[1]));
    assert_eq!(engine.node_of(&traversal, 15), None);
}

#[test]
fn ambiguous_derivation() {
    // Both `x` and its last child `y` are on the rightmost path preceding
    // `z`, so the step consuming `z` can continue either of them.
    let tree = TreeBuilder::<()>::root("root", |b| {
        b.node("x", |b| {
            b.empty_leaf("y");
        });
        b.empty_leaf("z");
        b.empty_leaf("v");
    })
    .build();

    let automaton = Regex::concat([
        Regex::choice([node("x"), node("y")]),
        node("z"),
        node("v"),
    ])
    .to_automaton()
    .unwrap();

    let engine = Engine::new([automaton.clone()]);
    let traversal = engine.traverse(&tree);

    assert_derivation!(engine, traversal, 0, vec![1, 3, 4]);

    let engine = Engine::with_config(
        [automaton],
        EngineConfig { ambiguity: Ambiguity::Strict },
    );
    let traversal = engine.traverse(&tree);

    assert!(matches!(
        engine.backtrack(&traversal),
        Err(Error::AmbiguousDerivation { position: 3, .. })
    ));
}

fn point_sequence() -> Tree {
    TreeBuilder::root("call", |b| {
        b.leaf("left", "(");
        b.leaf("sym", "point");
        b.leaf("num", "0");
        b.leaf("num", "0");
        b.leaf("right", ")");
    })
    .build()
}

fn point_pattern() -> Re {
    Regex::concat([
        node("left"),
        token("sym", "point"),
        Regex::repeat(node("num")),
        node("right"),
    ])
}

#[test]
fn retraverse_after_adding_automaton() {
    let tree = point_sequence();
    let mut engine = Engine::new([point_pattern().to_automaton().unwrap()]);
    let mut traversal = engine.traverse(&tree);

    assert_eq!(engine.accepted_tuples(&traversal).len(), 1);

    assert_eq!(engine.add_automaton(node("call").to_automaton().unwrap()), 1);
    engine.retraverse(&mut traversal);

    assert_eq!(traversal.field(tree.root()).start.len(), 2);
    assert_eq!(engine.accepted_tuples(&traversal).len(), 2);
    assert_derivation!(engine, traversal, 0, vec![1, 2, 3, 4, 5]);
    assert_derivation!(engine, traversal, 1, vec![0]);
}

#[test]
fn retraverse_with_another_engine() {
    let tree = point_sequence();
    let small = Engine::new([node("call").to_automaton().unwrap()]);
    let mut traversal = small.traverse(&tree);

    assert_derivation!(small, traversal, 0, vec![0]);

    let large = Engine::new([
        point_pattern().to_automaton().unwrap(),
        node("call").to_automaton().unwrap(),
    ]);
    large.retraverse(&mut traversal);

    assert_derivation!(large, traversal, 0, vec![1, 2, 3, 4, 5]);
    assert_derivation!(large, traversal, 1, vec![0]);

    // Back to fewer automata.
    small.retraverse(&mut traversal);

    assert_eq!(traversal.field(tree.root()).trans.len(), 1);
    assert_derivation!(small, traversal, 0, vec![0]);
}

#[test]
fn overlapping_conditions_follow_first_transition() {
    // `num` and `num("1")` are different conditions, so the start state
    // keeps a transition for each even though both match `num "1"`.
    let automaton = Regex::choice([
        Regex::concat([node("num"), node("x")]),
        Regex::concat([token("num", "1"), node("y")]),
    ])
    .to_automaton()
    .unwrap();

    assert_eq!(
        automaton.transition_table().transitions(automaton.start()).len(),
        2
    );

    let tree = TreeBuilder::<()>::root("list", |b| {
        b.leaf("num", "1");
        b.empty_leaf("y");
    })
    .build();

    let children = tree.node(tree.root()).children();
    assert!(automaton.accepts(children.iter().map(|id| tree.node(*id))));

    // The engine only takes the first matching transition, which expects
    // `x` after `num`.
    let engine = Engine::new([automaton]);
    let traversal = engine.traverse(&tree);

    assert!(engine.accepted_tuples(&traversal).is_empty());
}
