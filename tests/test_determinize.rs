mod support;

use test_case::test_case;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn subset_construction_produces_a_dfa() {
    init_logging();
    let nfa = support::nondeterministic_automaton();
    assert!(!nfa.is_deterministic());

    let dfa = nfa.determinize();
    assert!(dfa.is_deterministic());
    assert_eq!(dfa.start(), "q0");
    assert_eq!(dfa.alphabet(), nfa.alphabet());
    // The fork on (q0, a) collapses into one composite state.
    assert!(dfa.states().contains("q0_q1"));
    assert!(dfa.accepting_states().contains("q3"));
}

#[test_case("abc", true)]
#[test_case("aabcc", true)]
#[test_case("abcc", true)]
#[test_case("ab", false)]
#[test_case("aab", false)]
#[test_case("", false)]
#[test_case("bca", false)]
fn dfa_accepts_exactly_what_the_nfa_accepts(input: &str, expected: bool) {
    let nfa = support::nondeterministic_automaton();
    let dfa = nfa.determinize();
    assert_eq!(nfa.accepts_str(input), expected);
    assert_eq!(dfa.accepts_str(input), expected);
}

#[test]
fn determinize_is_idempotent() {
    let dfa = support::nondeterministic_automaton().determinize();
    assert_eq!(dfa.determinize(), dfa);
}

#[test]
fn converted_grammar_automaton_determinizes() {
    // No two productions of one non-terminal start with the same
    // terminal here, so every subset stays a singleton and keeps its
    // original state name.
    let nfa = support::regular_grammar().to_automaton().unwrap();
    let dfa = nfa.determinize();
    assert!(dfa.is_deterministic());
    for input in ["dd", "dabcd", "dabadd", "abc", "d", "da"] {
        assert_eq!(dfa.accepts_str(input), nfa.accepts_str(input));
    }
    assert!(dfa.accepts_str("dd"));
    assert!(!dfa.accepts_str("abc"));
}
