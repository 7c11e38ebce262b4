//! Classification of grammars in the Chomsky hierarchy.

use std::fmt;

use crate::grammar::Grammar;
use crate::symbol::Symbol;

/// A level of the Chomsky hierarchy. Higher levels are more specific:
/// `Type0 < Type1 < Type2 < Type3`.
#[cfg_attr(
    feature = "serialize",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum ChomskyLevel {
    /// Unrestricted grammar.
    Type0,
    /// Context-sensitive grammar: no shrinking productions.
    Type1,
    /// Context-free grammar: a single non-terminal on every left-hand
    /// side.
    Type2,
    /// Regular grammar: right-linear productions only.
    Type3,
}

impl fmt::Display for ChomskyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ChomskyLevel::Type0 => "Type 0: Unrestricted Grammar",
            ChomskyLevel::Type1 => "Type 1: Context-Sensitive Grammar",
            ChomskyLevel::Type2 => "Type 2: Context-Free Grammar",
            ChomskyLevel::Type3 => "Type 3: Regular Grammar",
        };
        f.write_str(text)
    }
}

impl Grammar {
    /// Reports the most specific Chomsky level this grammar satisfies.
    /// Read-only; the grammar is not modified.
    ///
    /// A grammar with no productions at all is vacuously regular.
    pub fn classify(&self) -> ChomskyLevel {
        for level in [
            ChomskyLevel::Type3,
            ChomskyLevel::Type2,
            ChomskyLevel::Type1,
        ] {
            if self.satisfies(level) {
                return level;
            }
        }
        ChomskyLevel::Type0
    }

    /// Checks this grammar against the structural constraints of one
    /// hierarchy level directly, independently of [`classify`].
    ///
    /// The production table keys every production by a single
    /// non-terminal, so the multi-symbol left-hand side exclusions of the
    /// lower levels hold vacuously; the remaining constraints are the
    /// right-hand side shapes and the ε convention. ε productions are
    /// admitted below Type 2 only when the start symbol derives ε and
    /// never appears on a right-hand side.
    ///
    /// [`classify`]: Grammar::classify
    pub fn satisfies(&self, level: ChomskyLevel) -> bool {
        match level {
            ChomskyLevel::Type0 => true,
            ChomskyLevel::Type1 => !self.contains_empty_rhs() || self.empty_rhs_convention_holds(),
            ChomskyLevel::Type2 => true,
            ChomskyLevel::Type3 => {
                let linear = self.rules().all(|(_, rhs)| {
                    if !rhs.symbols().iter().any(Symbol::is_non_terminal) {
                        return true;
                    }
                    match rhs.symbols() {
                        [Symbol::Terminal(_)] => true,
                        [Symbol::Terminal(_), Symbol::NonTerminal(_)] => true,
                        _ => false,
                    }
                });
                linear && (!self.contains_empty_rhs() || self.empty_rhs_convention_holds())
            }
        }
    }

    fn contains_empty_rhs(&self) -> bool {
        self.rules().any(|(_, rhs)| rhs.is_empty())
    }

    /// The standard removal-of-ε convention: only the start symbol derives
    /// ε, and the start symbol appears on no right-hand side.
    fn empty_rhs_convention_holds(&self) -> bool {
        let start_derives_empty = self
            .alternatives(&self.start)
            .is_some_and(|alternatives| alternatives.iter().any(|rhs| rhs.is_empty()));
        let only_start_derives_empty = self
            .rules()
            .all(|(lhs, rhs)| !rhs.is_empty() || lhs == self.start);
        let start_on_rhs = self.rules().any(|(_, rhs)| {
            rhs.symbols()
                .iter()
                .any(|sym| matches!(sym, Symbol::NonTerminal(name) if *name == self.start))
        });
        start_derives_empty && only_start_derives_empty && !start_on_rhs
    }
}
