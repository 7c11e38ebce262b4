//! Definitions of the finite automaton type and its membership simulation.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

/// A transition label: an alphabet symbol, or the empty-symbol marker.
///
/// ε may label a transition, but it is never an alphabet symbol.
#[cfg_attr(
    feature = "serialize",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Label {
    /// A regular input symbol.
    Symbol(String),
    /// An ε-transition.
    Epsilon,
}

impl Label {
    /// Creates a regular input symbol label.
    pub fn symbol(name: impl Into<String>) -> Self {
        Label::Symbol(name.into())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Symbol(name) => f.write_str(name),
            Label::Epsilon => f.write_str("ε"),
        }
    }
}

/// The reason an automaton literal was rejected.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum AutomatonError {
    /// A transition endpoint, the start state, or an accepting state is
    /// not a declared state.
    #[error("state '{0}' is referenced but not declared")]
    UndeclaredState(String),
    /// A transition is labelled with a symbol outside the alphabet.
    #[error("symbol '{0}' labels a transition but is not in the alphabet")]
    UndeclaredSymbol(String),
    /// A name is declared as both a state and an alphabet symbol.
    #[error("'{0}' is declared as both a state and an alphabet symbol")]
    StateSymbolOverlap(String),
}

/// A finite automaton: states, an input alphabet, a transition relation
/// from `(state, label)` pairs to sets of destination states, a start
/// state, and a set of accepting states.
///
/// The transition relation maps to state *sets*, so nondeterminism and
/// ε-transitions are representable directly.
#[cfg_attr(
    feature = "serialize",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Automaton {
    pub(crate) states: BTreeSet<String>,
    pub(crate) alphabet: BTreeSet<String>,
    pub(crate) transitions: IndexMap<(String, Label), BTreeSet<String>>,
    pub(crate) start: String,
    pub(crate) accepting: BTreeSet<String>,
}

impl Automaton {
    /// Creates an automaton from a literal specification, failing fast on
    /// the first malformed part.
    pub fn new<'a>(
        states: impl IntoIterator<Item = &'a str>,
        alphabet: impl IntoIterator<Item = &'a str>,
        transitions: impl IntoIterator<Item = ((&'a str, Label), Vec<&'a str>)>,
        start: &str,
        accepting: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, AutomatonError> {
        let states: BTreeSet<String> = states.into_iter().map(str::to_string).collect();
        let alphabet: BTreeSet<String> = alphabet.into_iter().map(str::to_string).collect();
        let mut relation: IndexMap<(String, Label), BTreeSet<String>> = IndexMap::new();
        for ((from, label), targets) in transitions {
            relation
                .entry((from.to_string(), label))
                .or_default()
                .extend(targets.into_iter().map(str::to_string));
        }
        let automaton = Automaton {
            states,
            alphabet,
            transitions: relation,
            start: start.to_string(),
            accepting: accepting.into_iter().map(str::to_string).collect(),
        };
        automaton.validate()?;
        Ok(automaton)
    }

    /// Starts building an automaton. States and the alphabet are inferred
    /// from the transitions added.
    pub fn builder(start: &str) -> AutomatonBuilder {
        let mut states = BTreeSet::new();
        states.insert(start.to_string());
        AutomatonBuilder {
            states,
            alphabet: BTreeSet::new(),
            transitions: IndexMap::new(),
            start: start.to_string(),
            accepting: BTreeSet::new(),
        }
    }

    fn validate(&self) -> Result<(), AutomatonError> {
        if let Some(name) = self.states.intersection(&self.alphabet).next() {
            return Err(AutomatonError::StateSymbolOverlap(name.clone()));
        }
        let declared = |state: &String| -> Result<(), AutomatonError> {
            if self.states.contains(state) {
                Ok(())
            } else {
                Err(AutomatonError::UndeclaredState(state.clone()))
            }
        };
        declared(&self.start)?;
        for state in &self.accepting {
            declared(state)?;
        }
        for ((from, label), targets) in &self.transitions {
            declared(from)?;
            if let Label::Symbol(name) = label {
                if !self.alphabet.contains(name) {
                    return Err(AutomatonError::UndeclaredSymbol(name.clone()));
                }
            }
            for target in targets {
                declared(target)?;
            }
        }
        Ok(())
    }

    /// Returns the set of states.
    pub fn states(&self) -> &BTreeSet<String> {
        &self.states
    }

    /// Returns the input alphabet. ε is never part of it.
    pub fn alphabet(&self) -> &BTreeSet<String> {
        &self.alphabet
    }

    /// Returns the transition relation.
    pub fn transitions(&self) -> &IndexMap<(String, Label), BTreeSet<String>> {
        &self.transitions
    }

    /// Returns the start state.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Returns the set of accepting states.
    pub fn accepting_states(&self) -> &BTreeSet<String> {
        &self.accepting
    }

    /// Runs the nondeterministic breadth simulation over the input.
    ///
    /// A set of current states starts as the start state alone; each input
    /// symbol maps it to the union of transition targets over its members.
    /// An empty union rejects immediately, without consuming the rest of
    /// the input. After the last symbol, the input is accepted iff some
    /// current state is accepting.
    ///
    /// ε-transitions are not expanded; a caller that needs ε-closure must
    /// pre-expand the automaton.
    pub fn accepts<I>(&self, input: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut current: BTreeSet<String> = BTreeSet::new();
        current.insert(self.start.clone());
        for sym in input {
            let label = Label::Symbol(sym.into());
            let mut next = BTreeSet::new();
            for state in &current {
                if let Some(targets) = self.transitions.get(&(state.clone(), label.clone())) {
                    next.extend(targets.iter().cloned());
                }
            }
            if next.is_empty() {
                return false;
            }
            current = next;
        }
        current.iter().any(|state| self.accepting.contains(state))
    }

    /// Runs [`accepts`] over the characters of a string, one input symbol
    /// per character.
    ///
    /// [`accepts`]: Automaton::accepts
    pub fn accepts_str(&self, input: &str) -> bool {
        self.accepts(input.chars().map(|c| c.to_string()))
    }

    /// Checks whether the automaton is deterministic: no `(state, symbol)`
    /// pair has more than one destination, and no transition is labelled
    /// with ε.
    pub fn is_deterministic(&self) -> bool {
        self.transitions.iter().all(|((_, label), targets)| {
            targets.len() <= 1 && !matches!(label, Label::Epsilon)
        })
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |set: &BTreeSet<String>| set.iter().cloned().collect::<Vec<_>>().join(", ");
        writeln!(f, "States (Q): {{{}}}", join(&self.states))?;
        writeln!(f, "Alphabet (Σ): {{{}}}", join(&self.alphabet))?;
        writeln!(f, "Initial state (q0): {}", self.start)?;
        writeln!(f, "Accepting states (F): {{{}}}", join(&self.accepting))?;
        writeln!(f, "Transitions (δ):")?;
        for ((from, label), targets) in &self.transitions {
            for target in targets {
                writeln!(f, "  {} --{}--> {}", from, label, target)?;
            }
        }
        Ok(())
    }
}

/// Builds an automaton transition by transition.
///
/// Every state and symbol mentioned is recorded, so a built automaton
/// cannot reference an undeclared state. Using one name as both a state
/// and an input symbol is still rejected when the automaton is finished.
#[derive(Clone, Debug)]
pub struct AutomatonBuilder {
    states: BTreeSet<String>,
    alphabet: BTreeSet<String>,
    transitions: IndexMap<(String, Label), BTreeSet<String>>,
    start: String,
    accepting: BTreeSet<String>,
}

impl AutomatonBuilder {
    /// Adds transitions from `from` to every state in `to`, labelled with
    /// the given input symbol.
    pub fn transition<'a>(
        mut self,
        from: &str,
        symbol: &str,
        to: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.alphabet.insert(symbol.to_string());
        self.insert(from, Label::symbol(symbol), to)
    }

    /// Adds ε-transitions from `from` to every state in `to`.
    pub fn epsilon<'a>(self, from: &str, to: impl IntoIterator<Item = &'a str>) -> Self {
        self.insert(from, Label::Epsilon, to)
    }

    fn insert<'a>(
        mut self,
        from: &str,
        label: Label,
        to: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.states.insert(from.to_string());
        let targets = self
            .transitions
            .entry((from.to_string(), label))
            .or_default();
        for state in to {
            targets.insert(state.to_string());
        }
        self.states.extend(targets.iter().cloned());
        self
    }

    /// Declares a state that no transition mentions.
    pub fn state(mut self, name: &str) -> Self {
        self.states.insert(name.to_string());
        self
    }

    /// Marks states as accepting, declaring them if necessary.
    pub fn accepting<'a>(mut self, states: impl IntoIterator<Item = &'a str>) -> Self {
        for state in states {
            self.states.insert(state.to_string());
            self.accepting.insert(state.to_string());
        }
        self
    }

    /// Finishes the automaton, rejecting a name declared as both a state
    /// and an alphabet symbol.
    pub fn finish(self) -> Result<Automaton, AutomatonError> {
        let automaton = Automaton {
            states: self.states,
            alphabet: self.alphabet,
            transitions: self.transitions,
            start: self.start,
            accepting: self.accepting,
        };
        automaton.validate()?;
        Ok(automaton)
    }
}
