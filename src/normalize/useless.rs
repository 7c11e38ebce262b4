//! Elimination of unreachable and non-productive symbols.

use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::grammar::{Grammar, Rhs};
use crate::symbol::Symbol;

/// Removes every non-terminal the start symbol cannot reach.
///
/// Reachability is the forward walk from the start symbol over the
/// non-terminals mentioned in right-hand sides.
pub fn remove_unreachable(grammar: &Grammar) -> Grammar {
    let mut reachable: BTreeSet<&str> = BTreeSet::new();
    let mut to_visit = vec![grammar.start.as_str()];
    while let Some(current) = to_visit.pop() {
        if !reachable.insert(current) {
            continue;
        }
        let Some(alternatives) = grammar.productions.get(current) else {
            continue;
        };
        for rhs in alternatives {
            for sym in rhs.symbols() {
                if let Symbol::NonTerminal(name) = sym {
                    if !reachable.contains(name.as_str()) {
                        to_visit.push(name);
                    }
                }
            }
        }
    }
    debug!("reachable symbols: {:?}", reachable);

    Grammar {
        nonterminals: grammar
            .nonterminals
            .iter()
            .filter(|nt| reachable.contains(nt.as_str()))
            .cloned()
            .collect(),
        terminals: grammar.terminals.clone(),
        start: grammar.start.clone(),
        productions: grammar
            .productions
            .iter()
            .filter(|(lhs, _)| reachable.contains(lhs.as_str()))
            .map(|(lhs, alternatives)| (lhs.clone(), alternatives.clone()))
            .collect(),
    }
}

/// Removes every non-productive non-terminal.
///
/// The productive set grows to a fixed point: a non-terminal is productive
/// once some alternative consists entirely of terminals and non-terminals
/// already known productive. Surviving non-terminals keep only their
/// fully-productive alternatives.
pub fn remove_unproductive(grammar: &Grammar) -> Grammar {
    let mut productive: BTreeSet<&str> = BTreeSet::new();
    let mut changed = true;
    while changed {
        changed = false;
        for (lhs, alternatives) in &grammar.productions {
            if productive.contains(lhs.as_str()) {
                continue;
            }
            if alternatives.iter().any(|rhs| all_productive(rhs, &productive)) {
                productive.insert(lhs);
                changed = true;
            }
        }
    }
    debug!("productive symbols: {:?}", productive);

    let productions: IndexMap<String, IndexSet<Rhs>> = grammar
        .productions
        .iter()
        .filter(|(lhs, _)| productive.contains(lhs.as_str()))
        .map(|(lhs, alternatives)| {
            let kept: IndexSet<Rhs> = alternatives
                .iter()
                .filter(|rhs| all_productive(rhs, &productive))
                .cloned()
                .collect();
            (lhs.clone(), kept)
        })
        .collect();

    Grammar {
        nonterminals: grammar
            .nonterminals
            .iter()
            .filter(|nt| productive.contains(nt.as_str()))
            .cloned()
            .collect(),
        terminals: grammar.terminals.clone(),
        start: grammar.start.clone(),
        productions,
    }
}

fn all_productive(rhs: &Rhs, productive: &BTreeSet<&str>) -> bool {
    rhs.symbols().iter().all(|sym| match sym {
        Symbol::Terminal(_) => true,
        Symbol::NonTerminal(name) => productive.contains(name.as_str()),
    })
}
