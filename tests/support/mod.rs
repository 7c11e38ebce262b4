#![allow(dead_code)]

use chomsky::{Automaton, Grammar, Rhs, Symbol};

/// Parses a right-hand side from one character per symbol: uppercase
/// characters are non-terminals, everything else is a terminal. The empty
/// string is ε.
pub fn rhs(text: &str) -> Rhs {
    Rhs::new(
        text.chars()
            .map(|c| {
                if c.is_uppercase() {
                    Symbol::non_terminal(c.to_string())
                } else {
                    Symbol::terminal(c.to_string())
                }
            })
            .collect(),
    )
}

/// A right-linear grammar over {a, b, c, d}:
/// S → dA, A → d | aB, B → bC, C → cA | aS.
pub fn regular_grammar() -> Grammar {
    Grammar::builder("S")
        .rule("S").rhs(rhs("dA"))
        .rule("A").rhs(rhs("d")).rhs(rhs("aB"))
        .rule("B").rhs(rhs("bC"))
        .rule("C").rhs(rhs("cA")).rhs(rhs("aS"))
        .finish()
        .unwrap()
}

/// A nondeterministic automaton over {a, b, c}: q0 forks on `a` into
/// {q0, q1}, and only q3 accepts.
pub fn nondeterministic_automaton() -> Automaton {
    Automaton::builder("q0")
        .transition("q0", "a", ["q0", "q1"])
        .transition("q1", "b", ["q2"])
        .transition("q2", "a", ["q2"])
        .transition("q2", "c", ["q3"])
        .transition("q3", "c", ["q3"])
        .accepting(["q3"])
        .finish()
        .unwrap()
}

/// A context-free grammar exercising every normalization stage: it has an
/// ε production, unit productions, the unreachable non-terminal C, and
/// alternatives longer than two symbols.
pub fn cnf_input_grammar() -> Grammar {
    Grammar::builder("S")
        .rule("S").rhs(rhs("aB")).rhs(rhs("bA")).rhs(rhs("A"))
        .rule("A").rhs(rhs("B")).rhs(rhs("Sa")).rhs(rhs("bBA")).rhs(rhs("b"))
        .rule("B").rhs(rhs("b")).rhs(rhs("bS")).rhs(rhs("aD")).empty()
        .rule("D").rhs(rhs("AA"))
        .rule("C").rhs(rhs("Ba"))
        .finish()
        .unwrap()
}
