//! Definitions of the grammar type and its productions.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

use crate::symbol::Symbol;

/// A production right-hand side: a sequence of symbols. The empty sequence
/// is the ε production.
#[cfg_attr(
    feature = "serialize",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Rhs(Vec<Symbol>);

impl Rhs {
    /// Creates a right-hand side from a sequence of symbols.
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Rhs(symbols)
    }

    /// Creates the ε right-hand side.
    pub fn empty() -> Self {
        Rhs(vec![])
    }

    /// Returns the symbols of this right-hand side.
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    /// Returns the number of symbols.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks whether this is the ε right-hand side.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the target of a unit production `A → B`, if this right-hand
    /// side is one.
    pub fn unit_target(&self) -> Option<&str> {
        match self.symbols() {
            [Symbol::NonTerminal(name)] => Some(name),
            _ => None,
        }
    }
}

impl From<Vec<Symbol>> for Rhs {
    fn from(symbols: Vec<Symbol>) -> Self {
        Rhs(symbols)
    }
}

impl<const N: usize> From<[Symbol; N]> for Rhs {
    fn from(symbols: [Symbol; N]) -> Self {
        Rhs(symbols.into())
    }
}

impl fmt::Display for Rhs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("ε");
        }
        for (i, sym) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", sym)?;
        }
        Ok(())
    }
}

/// The reason a grammar literal was rejected.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum GrammarError {
    /// A name is declared as both a terminal and a non-terminal.
    #[error("'{0}' is declared as both a non-terminal and a terminal symbol")]
    TerminalNonTerminal(String),
    /// The start symbol is missing from the non-terminal set.
    #[error("the start symbol '{0}' is not a non-terminal")]
    StartNotNonTerminal(String),
    /// A production is keyed by an undeclared non-terminal.
    #[error("'{0}' has productions but is not a non-terminal symbol")]
    ProductionsNotNonTerminal(String),
    /// A right-hand side references an undeclared symbol.
    #[error("'{sym}' appears in a production of '{lhs}' but is not declared with that kind")]
    UndeclaredSymbol {
        /// The offending symbol's name.
        sym: String,
        /// The production's left-hand side.
        lhs: String,
    },
}

/// A formal grammar: non-terminals, terminals, a start symbol, and a
/// mapping from each non-terminal to its alternative right-hand sides.
///
/// The grammar is value-like. Every transformation in this crate takes the
/// grammar by reference and returns an independent result.
#[cfg_attr(
    feature = "serialize",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grammar {
    pub(crate) nonterminals: BTreeSet<String>,
    pub(crate) terminals: BTreeSet<String>,
    pub(crate) start: String,
    pub(crate) productions: IndexMap<String, IndexSet<Rhs>>,
}

impl Grammar {
    /// Creates a grammar from a literal specification, failing fast on the
    /// first malformed part.
    pub fn new<'a>(
        nonterminals: impl IntoIterator<Item = &'a str>,
        terminals: impl IntoIterator<Item = &'a str>,
        start: &str,
        productions: impl IntoIterator<Item = (&'a str, Vec<Rhs>)>,
    ) -> Result<Self, GrammarError> {
        let nonterminals: BTreeSet<String> =
            nonterminals.into_iter().map(str::to_string).collect();
        let terminals: BTreeSet<String> = terminals.into_iter().map(str::to_string).collect();
        let mut table: IndexMap<String, IndexSet<Rhs>> = IndexMap::new();
        for (lhs, alternatives) in productions {
            table
                .entry(lhs.to_string())
                .or_default()
                .extend(alternatives);
        }
        let grammar = Grammar {
            nonterminals,
            terminals,
            start: start.to_string(),
            productions: table,
        };
        grammar.validate()?;
        Ok(grammar)
    }

    /// Starts building a grammar rule by rule. The symbol sets are
    /// inferred from the tags of the symbols used.
    pub fn builder(start: &str) -> GrammarBuilder {
        GrammarBuilder {
            start: start.to_string(),
            productions: IndexMap::new(),
        }
    }

    fn validate(&self) -> Result<(), GrammarError> {
        if let Some(name) = self.nonterminals.intersection(&self.terminals).next() {
            return Err(GrammarError::TerminalNonTerminal(name.clone()));
        }
        if !self.nonterminals.contains(&self.start) {
            return Err(GrammarError::StartNotNonTerminal(self.start.clone()));
        }
        for (lhs, alternatives) in &self.productions {
            if !self.nonterminals.contains(lhs) {
                return Err(GrammarError::ProductionsNotNonTerminal(lhs.clone()));
            }
            for rhs in alternatives {
                for sym in rhs.symbols() {
                    let declared = match sym {
                        Symbol::Terminal(name) => self.terminals.contains(name),
                        Symbol::NonTerminal(name) => self.nonterminals.contains(name),
                    };
                    if !declared {
                        return Err(GrammarError::UndeclaredSymbol {
                            sym: sym.name().to_string(),
                            lhs: lhs.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns the set of non-terminal names.
    pub fn nonterminals(&self) -> &BTreeSet<String> {
        &self.nonterminals
    }

    /// Returns the set of terminal names.
    pub fn terminals(&self) -> &BTreeSet<String> {
        &self.terminals
    }

    /// Returns the start symbol's name.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Returns the production table: per non-terminal, a duplicate-free
    /// collection of alternatives.
    pub fn productions(&self) -> &IndexMap<String, IndexSet<Rhs>> {
        &self.productions
    }

    /// Returns the alternatives of the given non-terminal, or `None` if it
    /// has no productions.
    pub fn alternatives(&self, nonterminal: &str) -> Option<&IndexSet<Rhs>> {
        self.productions.get(nonterminal)
    }

    /// Returns an iterator over all productions as `(lhs, rhs)` pairs.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &Rhs)> {
        self.productions
            .iter()
            .flat_map(|(lhs, alternatives)| alternatives.iter().map(move |rhs| (lhs.as_str(), rhs)))
    }
}

impl fmt::Display for Grammar {
    /// Prints the start symbol's alternatives first, then the remaining
    /// non-terminals in sorted order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_rule = |f: &mut fmt::Formatter<'_>, lhs: &str| -> fmt::Result {
            if let Some(alternatives) = self.productions.get(lhs) {
                if alternatives.is_empty() {
                    return Ok(());
                }
                let joined = alternatives
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" | ");
                writeln!(f, "{} → {}", lhs, joined)?;
            }
            Ok(())
        };
        write_rule(f, &self.start)?;
        for lhs in &self.nonterminals {
            if *lhs != self.start {
                write_rule(f, lhs)?;
            }
        }
        Ok(())
    }
}

/// Builds a grammar rule by rule.
///
/// The terminal and non-terminal sets are collected from the symbol tags,
/// so a grammar built this way cannot reference an undeclared symbol.
#[derive(Clone, Debug)]
pub struct GrammarBuilder {
    start: String,
    productions: IndexMap<String, IndexSet<Rhs>>,
}

impl GrammarBuilder {
    /// Starts a new rule for the given left-hand side.
    pub fn rule(self, lhs: &str) -> RuleBuilder {
        RuleBuilder {
            lhs: lhs.to_string(),
            builder: self,
        }
    }

    /// Finishes the grammar, inferring the symbol sets.
    pub fn finish(self) -> Result<Grammar, GrammarError> {
        let mut nonterminals: BTreeSet<String> = self.productions.keys().cloned().collect();
        nonterminals.insert(self.start.clone());
        let mut terminals = BTreeSet::new();
        for alternatives in self.productions.values() {
            for rhs in alternatives {
                for sym in rhs.symbols() {
                    match sym {
                        Symbol::Terminal(name) => {
                            terminals.insert(name.clone());
                        }
                        Symbol::NonTerminal(name) => {
                            nonterminals.insert(name.clone());
                        }
                    }
                }
            }
        }
        let grammar = Grammar {
            nonterminals,
            terminals,
            start: self.start,
            productions: self.productions,
        };
        grammar.validate()?;
        Ok(grammar)
    }
}

/// Adds alternatives to one rule of a [`GrammarBuilder`].
#[derive(Clone, Debug)]
pub struct RuleBuilder {
    lhs: String,
    builder: GrammarBuilder,
}

impl RuleBuilder {
    /// Adds one alternative to the current rule.
    pub fn rhs(mut self, rhs: impl Into<Rhs>) -> Self {
        self.builder
            .productions
            .entry(self.lhs.clone())
            .or_default()
            .insert(rhs.into());
        self
    }

    /// Adds the ε alternative to the current rule.
    pub fn empty(self) -> Self {
        self.rhs(Rhs::empty())
    }

    /// Starts a new rule for another left-hand side.
    pub fn rule(self, lhs: &str) -> RuleBuilder {
        self.builder.rule(lhs)
    }

    /// Finishes the grammar.
    pub fn finish(self) -> Result<Grammar, GrammarError> {
        self.builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(name: &str) -> Symbol {
        Symbol::terminal(name)
    }

    fn nt(name: &str) -> Symbol {
        Symbol::non_terminal(name)
    }

    #[test]
    fn builder_infers_symbol_sets() {
        let grammar = Grammar::builder("S")
            .rule("S").rhs([t("d"), nt("A")])
            .rule("A").rhs([t("d")]).rhs([t("a"), nt("B")])
            .rule("B").rhs([t("b"), nt("S")])
            .finish()
            .unwrap();
        assert_eq!(grammar.start(), "S");
        assert!(grammar.nonterminals().contains("B"));
        assert!(grammar.terminals().contains("d"));
        assert_eq!(grammar.rules().count(), 4);
    }

    #[test]
    fn duplicate_alternatives_collapse() {
        let grammar = Grammar::builder("S")
            .rule("S").rhs([t("a")]).rhs([t("a")])
            .finish()
            .unwrap();
        assert_eq!(grammar.alternatives("S").unwrap().len(), 1);
    }

    #[test]
    fn literal_construction_fails_fast() {
        let undeclared = Grammar::new(
            ["S"],
            ["a"],
            "S",
            vec![("S", vec![Rhs::from([t("a"), nt("B")])])],
        );
        assert_eq!(
            undeclared.unwrap_err(),
            GrammarError::UndeclaredSymbol {
                sym: "B".to_string(),
                lhs: "S".to_string(),
            }
        );

        let bad_start = Grammar::new(["S"], ["a"], "T", vec![]);
        assert_eq!(
            bad_start.unwrap_err(),
            GrammarError::StartNotNonTerminal("T".to_string())
        );

        let overlap = Grammar::new(["S", "a"], ["a"], "S", vec![]);
        assert_eq!(
            overlap.unwrap_err(),
            GrammarError::TerminalNonTerminal("a".to_string())
        );
    }

    #[test]
    fn display_puts_start_first() {
        let grammar = Grammar::builder("S")
            .rule("A").rhs([t("a")])
            .rule("S").rhs([t("d"), nt("A")]).empty()
            .finish()
            .unwrap();
        let text = format!("{}", grammar);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("S → d A | ε"));
        assert_eq!(lines.next(), Some("A → a"));
    }
}
