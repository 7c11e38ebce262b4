//! Elimination of ε productions.

use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::grammar::{Grammar, Rhs};
use crate::symbol::Symbol;

/// Removes all ε productions.
///
/// The nullable set holds the non-terminals with a literal ε alternative.
/// Every remaining alternative is expanded over its nullable occurrences:
/// for each subset of those positions, the variant with that subset
/// deleted is added, except the fully-empty variant. Literal ε
/// alternatives are dropped.
///
/// The resulting grammar derives the same language minus the empty string;
/// ε acceptance is not re-introduced for a nullable start symbol. The
/// expansion of one alternative is bounded by `2^k` for `k` nullable
/// occurrences in it.
pub fn eliminate_nulling(grammar: &Grammar) -> Grammar {
    let nullable: BTreeSet<&str> = grammar
        .productions
        .iter()
        .filter(|(_, alternatives)| alternatives.iter().any(Rhs::is_empty))
        .map(|(lhs, _)| lhs.as_str())
        .collect();
    debug!("nullable symbols: {:?}", nullable);

    let mut productions: IndexMap<String, IndexSet<Rhs>> = IndexMap::new();
    for (lhs, alternatives) in &grammar.productions {
        let mut rewritten = IndexSet::new();
        for rhs in alternatives {
            if rhs.is_empty() {
                continue;
            }
            rewritten.insert(rhs.clone());
            for variant in nullable_deletions(rhs, &nullable) {
                if !variant.is_empty() {
                    rewritten.insert(variant);
                }
            }
        }
        productions.insert(lhs.clone(), rewritten);
    }

    Grammar {
        nonterminals: grammar.nonterminals.clone(),
        terminals: grammar.terminals.clone(),
        start: grammar.start.clone(),
        productions,
    }
}

/// Generates every variant of `rhs` with some subset of its nullable
/// occurrences deleted.
fn nullable_deletions(rhs: &Rhs, nullable: &BTreeSet<&str>) -> Vec<Rhs> {
    let positions: Vec<usize> = rhs
        .symbols()
        .iter()
        .enumerate()
        .filter(|(_, sym)| matches!(sym, Symbol::NonTerminal(name) if nullable.contains(name.as_str())))
        .map(|(index, _)| index)
        .collect();

    let mut variants = Vec::new();
    for mask in 0..(1usize << positions.len()) {
        let kept: Vec<Symbol> = rhs
            .symbols()
            .iter()
            .enumerate()
            .filter(|(index, _)| {
                match positions.iter().position(|pos| pos == index) {
                    // Bit unset: this nullable occurrence is deleted.
                    Some(bit) => mask & (1 << bit) != 0,
                    None => true,
                }
            })
            .map(|(_, sym)| sym.clone())
            .collect();
        variants.push(Rhs::new(kept));
    }
    variants
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
    fn expands_over_each_nullable_occurrence() {
        let grammar = Grammar::builder("S")
            .rule("S").rhs([nt("B"), t("a"), nt("B")])
            .rule("B").rhs([t("b")]).empty()
            .finish()
            .unwrap();
        let result = eliminate_nulling(&grammar);
        let alternatives = result.alternatives("S").unwrap();
        assert!(alternatives.contains(&Rhs::from([nt("B"), t("a"), nt("B")])));
        assert!(alternatives.contains(&Rhs::from([nt("B"), t("a")])));
        assert!(alternatives.contains(&Rhs::from([t("a"), nt("B")])));
        assert!(alternatives.contains(&Rhs::from([t("a")])));
        assert_eq!(alternatives.len(), 4);
        assert!(!result.alternatives("B").unwrap().contains(&Rhs::empty()));
    }

    #[test]
    fn full_deletion_is_excluded() {
        let grammar = Grammar::builder("S")
            .rule("S").rhs([nt("B")])
            .rule("B").rhs([t("b")]).empty()
            .finish()
            .unwrap();
        let result = eliminate_nulling(&grammar);
        // The variant with B deleted would be ε and is not added.
        assert_eq!(result.alternatives("S").unwrap().len(), 1);
    }

    #[test]
    fn no_op_without_epsilon() {
        let grammar = Grammar::builder("S")
            .rule("S").rhs([t("a"), nt("S")]).rhs([t("a")])
            .finish()
            .unwrap();
        assert_eq!(eliminate_nulling(&grammar), grammar);
    }
}
