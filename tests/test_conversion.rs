mod support;

use std::collections::BTreeSet;

use chomsky::{ConversionError, Grammar, Label, Rhs, Symbol};

fn names(set: &BTreeSet<String>) -> Vec<&str> {
    set.iter().map(String::as_str).collect()
}

#[test]
fn grammar_to_automaton_maps_nonterminals_to_states() {
    let fa = support::regular_grammar().to_automaton().unwrap();
    // S maps to q0, the rest follow in sorted order, plus the sink.
    assert_eq!(fa.start(), "q0");
    assert_eq!(names(fa.states()), ["q0", "q1", "q2", "q3", "qf"]);
    assert_eq!(names(fa.alphabet()), ["a", "b", "c", "d"]);
    // The sink alone accepts; A's state q1 merely feeds it on d.
    assert_eq!(names(fa.accepting_states()), ["qf"]);
}

#[test]
fn converted_automaton_recognizes_the_language() {
    let fa = support::regular_grammar().to_automaton().unwrap();
    // S → dA → dd
    assert!(fa.accepts_str("dd"));
    // S → dA → daB → dabC → dabcA → dabcd
    assert!(fa.accepts_str("dabcd"));
    assert!(!fa.accepts_str("abc"));
    assert!(!fa.accepts_str("d"));
    assert!(!fa.accepts_str(""));
}

#[test]
fn conversion_rejects_non_right_linear_productions() {
    let grammar = Grammar::builder("S")
        .rule("S").rhs(support::rhs("aSb")).rhs(support::rhs("c"))
        .finish()
        .unwrap();
    assert_eq!(
        grammar.to_automaton().unwrap_err(),
        ConversionError::NotRightLinear {
            lhs: "S".to_string(),
            rhs: "a S b".to_string(),
        }
    );
}

#[test]
fn start_state_accepts_when_nothing_else_would() {
    // No all-terminal production, so no state earns acceptance and the
    // sink is never created; the start state is the fallback.
    let grammar = Grammar::builder("S")
        .rule("S").rhs(support::rhs("aS"))
        .finish()
        .unwrap();
    let fa = grammar.to_automaton().unwrap();
    assert_eq!(names(fa.states()), ["q0"]);
    assert_eq!(names(fa.accepting_states()), ["q0"]);
    assert!(fa.accepts_str(""));
    assert!(fa.accepts_str("aa"));
}

#[test]
fn automaton_to_grammar_is_total() {
    let grammar = support::nondeterministic_automaton().to_grammar();
    assert_eq!(grammar.start(), "q0");
    assert_eq!(names(grammar.nonterminals()), ["q0", "q1", "q2", "q3"]);
    assert_eq!(names(grammar.terminals()), ["a", "b", "c"]);

    let q0 = grammar.alternatives("q0").unwrap();
    assert!(q0.contains(&Rhs::from([
        Symbol::terminal("a"),
        Symbol::non_terminal("q0"),
    ])));
    assert!(q0.contains(&Rhs::from([
        Symbol::terminal("a"),
        Symbol::non_terminal("q1"),
    ])));
    assert_eq!(q0.len(), 2);

    // Only the accepting state derives ε.
    assert!(grammar.alternatives("q3").unwrap().contains(&Rhs::empty()));
    assert!(grammar
        .rules()
        .all(|(lhs, rhs)| !rhs.is_empty() || lhs == "q3"));
}

#[test]
fn epsilon_transitions_become_unit_productions() {
    let fa = chomsky::Automaton::builder("q0")
        .epsilon("q0", ["q1"])
        .transition("q1", "a", ["q1"])
        .accepting(["q1"])
        .finish()
        .unwrap();
    assert!(fa
        .transitions()
        .contains_key(&("q0".to_string(), Label::Epsilon)));
    let grammar = fa.to_grammar();
    assert!(grammar
        .alternatives("q0")
        .unwrap()
        .contains(&Rhs::from([Symbol::non_terminal("q1")])));
}
