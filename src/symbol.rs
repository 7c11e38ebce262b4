//! Grammar symbols, tagged by kind, and a source of fresh non-terminal
//! names.

use std::collections::BTreeSet;
use std::fmt;

/// A grammar symbol.
///
/// Symbol names are single characters or interned identifiers, such as the
/// fresh `X_n` names introduced by binarization or the composite state
/// names produced by determinization. The kind is part of the symbol, so
/// every conversion can match on it exhaustively instead of testing a name
/// for membership in some set.
#[cfg_attr(
    feature = "serialize",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Symbol {
    /// A symbol that appears in final derived strings.
    Terminal(String),
    /// A symbol that must be rewritten further.
    NonTerminal(String),
}

impl Symbol {
    /// Creates a terminal symbol.
    pub fn terminal(name: impl Into<String>) -> Self {
        Symbol::Terminal(name.into())
    }

    /// Creates a non-terminal symbol.
    pub fn non_terminal(name: impl Into<String>) -> Self {
        Symbol::NonTerminal(name.into())
    }

    /// Returns the symbol's name, without its kind.
    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(name) | Symbol::NonTerminal(name) => name,
        }
    }

    /// Checks whether this symbol is a terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    /// Checks whether this symbol is a non-terminal.
    pub fn is_non_terminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A source of fresh non-terminal names `X_1`, `X_2`, and so on.
///
/// The counter is an explicit value scoped to one transformation run, so
/// two runs over the same grammar hand out the same names. Names already
/// taken by the grammar are skipped.
#[allow(missing_copy_implementations)]
#[derive(Clone, Debug)]
pub struct SymbolSource {
    next_id: u32,
}

impl SymbolSource {
    /// Creates a source with an empty name space.
    pub fn new() -> Self {
        SymbolSource { next_id: 1 }
    }

    /// Generates the next fresh name and records it as taken.
    pub fn next_name(&mut self, taken: &mut BTreeSet<String>) -> String {
        loop {
            let name = format!("X_{}", self.next_id);
            self.next_id += 1;
            if taken.insert(name.clone()) {
                return name;
            }
        }
    }
}

impl Default for SymbolSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_kinds() {
        let a = Symbol::terminal("a");
        let s = Symbol::non_terminal("S");
        assert!(a.is_terminal() && !a.is_non_terminal());
        assert!(s.is_non_terminal() && !s.is_terminal());
        assert_eq!(a.name(), "a");
        assert_ne!(Symbol::terminal("a"), Symbol::non_terminal("a"));
    }

    #[test]
    fn fresh_names_skip_taken() {
        let mut taken: BTreeSet<String> = ["X_1".to_string(), "X_3".to_string()].into();
        let mut source = SymbolSource::new();
        assert_eq!(source.next_name(&mut taken), "X_2");
        assert_eq!(source.next_name(&mut taken), "X_4");
        assert_eq!(source.next_name(&mut taken), "X_5");
    }
}
