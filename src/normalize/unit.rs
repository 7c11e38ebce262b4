//! Elimination of unit productions.

use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::grammar::{Grammar, Rhs};

/// Removes all unit productions `A → B`.
///
/// For every non-terminal, the closure of non-terminals reachable through
/// unit chains is traversed with a stack and a visited set, so cyclic
/// chains terminate. The non-terminal's alternatives are replaced with the
/// union of all non-unit alternatives found anywhere in its closure.
pub fn eliminate_unit_rules(grammar: &Grammar) -> Grammar {
    let mut productions: IndexMap<String, IndexSet<Rhs>> = IndexMap::new();
    for lhs in grammar.productions.keys() {
        let mut collected = IndexSet::new();
        let mut stack = vec![lhs.as_str()];
        let mut visited: BTreeSet<&str> = BTreeSet::new();
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(alternatives) = grammar.productions.get(current) else {
                continue;
            };
            for rhs in alternatives {
                match rhs.unit_target() {
                    Some(target) => stack.push(target),
                    None => {
                        collected.insert(rhs.clone());
                    }
                }
            }
        }
        if visited.len() > 1 {
            debug!("unit closure of {}: {:?}", lhs, visited);
        }
        productions.insert(lhs.clone(), collected);
    }

    Grammar {
        nonterminals: grammar.nonterminals.clone(),
        terminals: grammar.terminals.clone(),
        start: grammar.start.clone(),
        productions,
    }
}
