//! NFA → DFA conversion by subset construction.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use log::debug;

use crate::automaton::{Automaton, Label};

/// Names a composite state after the sorted, `_`-joined names of its
/// constituents. Two independently discovered identical subsets collapse
/// to the same name, and a singleton keeps its original name.
fn composite_name(subset: &BTreeSet<String>) -> String {
    subset.iter().cloned().collect::<Vec<_>>().join("_")
}

impl Automaton {
    /// Builds an equivalent deterministic automaton by subset
    /// construction.
    ///
    /// The work-list holds unexplored subsets of the source states, seeded
    /// with the start state alone; each subset and alphabet symbol yields
    /// the union of destinations over the subset's members. Every subset
    /// is enqueued at most once and the subsets of a finite state set are
    /// finite, so the construction halts. Composite states are fresh
    /// identifiers named by [`composite_name`]; the result never aliases
    /// states of the source.
    ///
    /// A composite state is accepting iff its constituents meet the source
    /// accepting set. Transitions labelled ε are not followed; the input
    /// is expected to be ε-free (see [`accepts`]).
    ///
    /// [`accepts`]: Automaton::accepts
    pub fn determinize(&self) -> Automaton {
        let mut start_subset = BTreeSet::new();
        start_subset.insert(self.start.clone());
        let start_name = composite_name(&start_subset);

        let mut discovered: BTreeSet<BTreeSet<String>> = BTreeSet::new();
        discovered.insert(start_subset.clone());
        let mut work = vec![start_subset];
        let mut transitions: IndexMap<(String, Label), BTreeSet<String>> = IndexMap::new();

        while let Some(subset) = work.pop() {
            let subset_name = composite_name(&subset);
            for symbol in &self.alphabet {
                let mut union = BTreeSet::new();
                for state in &subset {
                    let key = (state.clone(), Label::symbol(symbol.clone()));
                    if let Some(targets) = self.transitions.get(&key) {
                        union.extend(targets.iter().cloned());
                    }
                }
                if union.is_empty() {
                    continue;
                }
                let union_name = composite_name(&union);
                debug!("δ({}, {}) = {}", subset_name, symbol, union_name);
                let mut target = BTreeSet::new();
                target.insert(union_name);
                transitions.insert((subset_name.clone(), Label::symbol(symbol.clone())), target);
                if discovered.insert(union.clone()) {
                    work.push(union);
                }
            }
        }

        let states: BTreeSet<String> = discovered.iter().map(composite_name).collect();
        let accepting: BTreeSet<String> = discovered
            .iter()
            .filter(|subset| subset.iter().any(|state| self.accepting.contains(state)))
            .map(composite_name)
            .collect();
        debug!(
            "subset construction: {} states, {} accepting",
            states.len(),
            accepting.len()
        );

        Automaton {
            states,
            alphabet: self.alphabet.clone(),
            transitions,
            start: start_name,
            accepting,
        }
    }
}
