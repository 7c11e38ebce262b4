//! Terminal isolation and binarization.

use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::grammar::{Grammar, Rhs};
use crate::symbol::{Symbol, SymbolSource};

/// Rewrites the grammar so that every right-hand side is a single
/// terminal or a pair of non-terminals.
///
/// Terminals inside alternatives longer than one symbol are replaced with
/// fresh non-terminals deriving exactly that terminal, one per distinct
/// terminal. Alternatives longer than two symbols are then folded into a
/// chain of fresh binary non-terminals over adjacent symbol pairs, with
/// identical pairs sharing one fresh non-terminal. Fresh names come from
/// one [`SymbolSource`] scoped to this call and never collide with
/// symbols already in the grammar.
pub fn binarize(grammar: &Grammar) -> Grammar {
    let mut taken = grammar.nonterminals.clone();
    taken.extend(grammar.terminals.iter().cloned());
    let mut source = SymbolSource::new();
    let mut nonterminals = grammar.nonterminals.clone();

    // Terminal isolation. Alternatives of length one stay as they are.
    let mut terminal_names: IndexMap<String, String> = IndexMap::new();
    let mut isolated: IndexMap<String, Vec<Vec<Symbol>>> = IndexMap::new();
    for (lhs, alternatives) in &grammar.productions {
        let mut rewritten = Vec::new();
        for rhs in alternatives {
            if rhs.len() > 1 {
                let symbols = rhs
                    .symbols()
                    .iter()
                    .map(|sym| match sym {
                        Symbol::Terminal(name) => {
                            let fresh = terminal_names
                                .entry(name.clone())
                                .or_insert_with(|| source.next_name(&mut taken));
                            Symbol::non_terminal(fresh.clone())
                        }
                        Symbol::NonTerminal(_) => sym.clone(),
                    })
                    .collect();
                rewritten.push(symbols);
            } else {
                rewritten.push(rhs.symbols().to_vec());
            }
        }
        isolated.insert(lhs.clone(), rewritten);
    }
    for (terminal, fresh) in &terminal_names {
        isolated.insert(fresh.clone(), vec![vec![Symbol::terminal(terminal.clone())]]);
        nonterminals.insert(fresh.clone());
    }
    debug!("isolated {} terminals", terminal_names.len());

    // Pair chaining for alternatives longer than two symbols.
    let mut pair_names: IndexMap<(String, String), String> = IndexMap::new();
    let mut productions: IndexMap<String, IndexSet<Rhs>> = IndexMap::new();
    let mut pair_rules: Vec<(String, Rhs)> = Vec::new();
    for (lhs, alternatives) in &isolated {
        let mut rewritten = IndexSet::new();
        for symbols in alternatives {
            if symbols.len() <= 2 {
                rewritten.insert(Rhs::new(symbols.clone()));
                continue;
            }
            let mut names: Vec<String> = symbols
                .iter()
                .map(|sym| sym.name().to_string())
                .collect();
            for index in 1..names.len() - 1 {
                let pair = (names[index].clone(), names[index + 1].clone());
                let fresh = pair_names.entry(pair.clone()).or_insert_with(|| {
                    let name = source.next_name(&mut taken);
                    nonterminals.insert(name.clone());
                    pair_rules.push((
                        name.clone(),
                        Rhs::from([
                            Symbol::non_terminal(pair.0.clone()),
                            Symbol::non_terminal(pair.1.clone()),
                        ]),
                    ));
                    name
                });
                names[index + 1] = fresh.clone();
            }
            rewritten.insert(Rhs::from([
                Symbol::non_terminal(names[0].clone()),
                Symbol::non_terminal(names[names.len() - 1].clone()),
            ]));
        }
        productions.insert(lhs.clone(), rewritten);
    }
    for (lhs, rhs) in pair_rules {
        let mut alternatives = IndexSet::new();
        alternatives.insert(rhs);
        productions.insert(lhs, alternatives);
    }

    Grammar {
        nonterminals,
        terminals: grammar.terminals.clone(),
        start: grammar.start.clone(),
        productions,
    }
}
