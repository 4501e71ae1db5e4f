/*! Regular expressions over arbitrary conditions.

A [`Regex`] is a small algebraic pattern language whose atoms are
conditions (any type implementing [`crate::Matchable`]) instead of
characters. Regular expressions are converted into automata by a
[`Compiler`], which follows [Thompson's construction][1]: each node of the
expression is injected into an [`AutomatonBuilder`] starting at some state,
and returns the single state where its sub-automaton ends. Choices and
repetitions are wired together with epsilon transitions, which the compiler
eliminates afterwards unless told otherwise.

```rust
use treematch::{Literal, Regex};

// a (b | c)*
let re = Regex::concat([
    Regex::literal(Literal('a')),
    Regex::repeat(Regex::choice([
        Regex::literal(Literal('b')),
        Regex::literal(Literal('c')),
    ])),
]);

let automaton = re.to_automaton().unwrap();

assert!(automaton.accepts(&['a', 'b', 'c', 'b']));
assert!(!automaton.accepts(&['b']));
```

[1]: https://en.wikipedia.org/wiki/Thompson%27s_construction
*/

use crate::automaton::{Automaton, AutomatonBuilder, Condition, State};
use crate::Error;

pub use compiler::Compiler;

mod compiler;


/// A regular expression whose atoms are conditions of type `M`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Regex<M> {
    /// Matches a single value that satisfies the condition.
    Literal(M),
    /// Matches the concatenation of the expressions, in order.
    Concat(Vec<Regex<M>>),
    /// Matches any of the expressions.
    Choice(Vec<Regex<M>>),
    /// Matches zero or more repetitions of the expression.
    Repeat(Box<Regex<M>>),
    /// Matches the empty sequence.
    Empty,
}

impl<M> Regex<M> {
    /// A single condition.
    pub fn literal(condition: M) -> Self {
        Regex::Literal(condition)
    }

    /// `items` one after the other.
    pub fn concat<I: IntoIterator<Item = Regex<M>>>(items: I) -> Self {
        Regex::Concat(items.into_iter().collect())
    }

    /// Any of `items`.
    pub fn choice<I: IntoIterator<Item = Regex<M>>>(items: I) -> Self {
        Regex::Choice(items.into_iter().collect())
    }

    /// Zero or more repetitions of `re`.
    pub fn repeat(re: Regex<M>) -> Self {
        Regex::Repeat(Box::new(re))
    }

    /// The empty sequence.
    pub fn empty() -> Self {
        Regex::Empty
    }

    /// One or more repetitions of `re`, expressed as `re` followed by
    /// zero or more repetitions of `re`.
    pub fn plus(re: Regex<M>) -> Self
    where
        M: Clone,
    {
        Regex::Concat(vec![re.clone(), Regex::repeat(re)])
    }

    /// Zero or one occurrence of `re`. The empty alternative is the first
    /// one.
    pub fn optional(re: Regex<M>) -> Self {
        Regex::Choice(vec![Regex::Empty, re])
    }

    /// Adds the states and transitions that recognize this expression to
    /// `builder`, starting at `start`, and returns the state where the
    /// recognition ends.
    ///
    /// This never changes the start state nor the accepting states of the
    /// builder.
    pub fn inject(&self, builder: &mut AutomatonBuilder<M>, start: State) -> State
    where
        M: Clone,
    {
        match self {
            Regex::Literal(condition) => {
                let end = builder.state();
                builder.add_transition(
                    start,
                    Condition::Match(condition.clone()),
                    end,
                );
                end
            }
            Regex::Concat(items) => items
                .iter()
                .fold(start, |current, item| item.inject(builder, current)),
            Regex::Choice(items) => {
                let end = builder.state();
                for item in items {
                    let branch_start = builder.state();
                    builder.add_transition(
                        start,
                        Condition::Epsilon,
                        branch_start,
                    );
                    let branch_end = item.inject(builder, branch_start);
                    builder.add_transition(branch_end, Condition::Epsilon, end);
                }
                end
            }
            Regex::Repeat(item) => {
                let end = item.inject(builder, start);
                builder.add_transition(start, Condition::Epsilon, end);
                builder.add_transition(end, Condition::Epsilon, start);
                end
            }
            Regex::Empty => start,
        }
    }

    /// Compiles the expression into an automaton without epsilon
    /// transitions, using a default [`Compiler`].
    pub fn to_automaton(&self) -> Result<Automaton<M>, Error>
    where
        M: Clone + PartialEq,
    {
        Compiler::new().compile(self)
    }
}
