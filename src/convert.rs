//! Conversions between grammars and finite automata.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

use crate::automaton::{Automaton, Label};
use crate::grammar::{Grammar, Rhs};
use crate::symbol::Symbol;

/// The name of the absorbing accepting sink state.
const SINK: &str = "qf";

/// The reason a grammar could not be converted to an automaton.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ConversionError {
    /// A production is not of the form `terminal` or
    /// `terminal non-terminal`.
    #[error("production '{lhs} → {rhs}' is not right-linear")]
    NotRightLinear {
        /// The production's left-hand side.
        lhs: String,
        /// The offending right-hand side, rendered.
        rhs: String,
    },
}

impl Grammar {
    /// Builds a finite automaton whose states are images of this grammar's
    /// non-terminals.
    ///
    /// The start symbol always maps to `q0` and the remaining
    /// non-terminals map to `q1`, `q2`, … in sorted order, so automata
    /// built from different grammars are comparable. A production `A → a`
    /// becomes a transition from `A`'s state to the absorbing accepting
    /// sink `qf`; a production `A → a B` becomes a transition to `B`'s
    /// state. Targets accumulate per `(state, symbol)` pair, which yields
    /// nondeterminism whenever one non-terminal has several productions
    /// starting with the same terminal.
    ///
    /// `qf` is the sole accepting state, so the automaton accepts exactly
    /// the strings the grammar derives; a grammar with no all-terminal
    /// production never creates the sink, and the start state is marked
    /// accepting instead so the automaton stays non-trivial.
    ///
    /// Only right-linear grammars convert; any other production shape is a
    /// [`ConversionError::NotRightLinear`] rather than a silently
    /// incorrect automaton.
    pub fn to_automaton(&self) -> Result<Automaton, ConversionError> {
        let mut state_of: BTreeMap<&str, String> = BTreeMap::new();
        state_of.insert(&self.start, "q0".to_string());
        for (index, nonterminal) in self
            .nonterminals
            .iter()
            .filter(|nt| **nt != self.start)
            .enumerate()
        {
            state_of.insert(nonterminal, format!("q{}", index + 1));
        }

        let mut transitions: IndexMap<(String, Label), BTreeSet<String>> = IndexMap::new();
        let mut accepting: BTreeSet<String> = BTreeSet::new();
        let mut sink_used = false;
        for (lhs, rhs) in self.rules() {
            let from = state_of[lhs].clone();
            let (terminal, target) = match rhs.symbols() {
                [Symbol::Terminal(a)] => {
                    sink_used = true;
                    (a.clone(), SINK.to_string())
                }
                [Symbol::Terminal(a), Symbol::NonTerminal(b)] => {
                    (a.clone(), state_of[b.as_str()].clone())
                }
                _ => {
                    return Err(ConversionError::NotRightLinear {
                        lhs: lhs.to_string(),
                        rhs: rhs.to_string(),
                    })
                }
            };
            transitions
                .entry((from, Label::Symbol(terminal)))
                .or_default()
                .insert(target);
        }

        let mut states: BTreeSet<String> = state_of.values().cloned().collect();
        if sink_used {
            states.insert(SINK.to_string());
            accepting.insert(SINK.to_string());
        }
        if accepting.is_empty() {
            accepting.insert("q0".to_string());
        }

        Ok(Automaton {
            states,
            alphabet: self.terminals.clone(),
            transitions,
            start: "q0".to_string(),
            accepting,
        })
    }
}

impl Automaton {
    /// Builds a right-linear grammar from this automaton's transitions.
    ///
    /// States become non-terminals, the alphabet becomes the terminal set,
    /// and the start state becomes the start symbol. Every transition
    /// `(q, a) → q'` adds the production `q → a q'`, an ε-labelled
    /// transition adds the unit production `q → q'`, and every accepting
    /// state gets the ε production. The mapping is direct and total; no
    /// transition information is lost.
    pub fn to_grammar(&self) -> Grammar {
        let mut productions: IndexMap<String, IndexSet<Rhs>> = self
            .states
            .iter()
            .map(|state| (state.clone(), IndexSet::new()))
            .collect();
        for ((from, label), targets) in &self.transitions {
            for target in targets {
                let rhs = match label {
                    Label::Symbol(name) => Rhs::from([
                        Symbol::terminal(name.clone()),
                        Symbol::non_terminal(target.clone()),
                    ]),
                    Label::Epsilon => Rhs::from([Symbol::non_terminal(target.clone())]),
                };
                productions
                    .entry(from.clone())
                    .or_default()
                    .insert(rhs);
            }
        }
        for state in &self.accepting {
            productions
                .entry(state.clone())
                .or_default()
                .insert(Rhs::empty());
        }

        Grammar {
            nonterminals: self.states.clone(),
            terminals: self.alphabet.clone(),
            start: self.start.clone(),
            productions,
        }
    }
}
