//! Generation of random strings from a grammar.

use rand::Rng;
use thiserror::Error;

use crate::grammar::Grammar;
use crate::symbol::Symbol;

/// Derivations attempted per requested string before giving up.
const MAX_ATTEMPTS: usize = 1_000;

/// The reason random generation failed.
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum RandomGenError {
    /// Too many derivations in a row hit the step bound while still
    /// holding non-terminals.
    #[error("derivation attempt limit exceeded")]
    LimitExceeded,
}

impl Grammar {
    /// Derives `count` random terminal strings from the start symbol.
    ///
    /// Each derivation step picks a uniformly random non-terminal
    /// occurrence that has productions, then a uniformly random
    /// alternative for it, up to `max_steps` rewrites. A derivation still
    /// holding non-terminals at the bound is discarded and retried; after
    /// too many discarded attempts in a row the whole call fails with
    /// [`RandomGenError::LimitExceeded`].
    ///
    /// This sampler is explicitly probabilistic; it sits outside the
    /// deterministic transformation contracts of the rest of the crate.
    pub fn derive_random<R: Rng>(
        &self,
        count: usize,
        max_steps: usize,
        rng: &mut R,
    ) -> Result<Vec<String>, RandomGenError> {
        let mut strings = Vec::with_capacity(count);
        let mut attempts = 0;
        while strings.len() < count {
            attempts += 1;
            if attempts > MAX_ATTEMPTS {
                return Err(RandomGenError::LimitExceeded);
            }
            if let Some(string) = self.derive_once(max_steps, rng) {
                strings.push(string);
                attempts = 0;
            }
        }
        Ok(strings)
    }

    /// Derives `count` random terminal strings with the thread-local RNG.
    pub fn derive_random_with_thread_rng(
        &self,
        count: usize,
        max_steps: usize,
    ) -> Result<Vec<String>, RandomGenError> {
        let mut thread_rng = rand::thread_rng();
        self.derive_random(count, max_steps, &mut thread_rng)
    }

    fn derive_once<R: Rng>(&self, max_steps: usize, rng: &mut R) -> Option<String> {
        let mut form = vec![Symbol::non_terminal(self.start.clone())];
        for _ in 0..max_steps {
            let rewritable: Vec<usize> = form
                .iter()
                .enumerate()
                .filter(|(_, sym)| {
                    matches!(sym, Symbol::NonTerminal(name)
                        if self.productions.get(name).is_some_and(|alts| !alts.is_empty()))
                })
                .map(|(index, _)| index)
                .collect();
            if rewritable.is_empty() {
                break;
            }
            let position = rewritable[rng.gen_range(0..rewritable.len())];
            let name = form[position].name().to_string();
            let alternatives = &self.productions[&name];
            let replacement = &alternatives[rng.gen_range(0..alternatives.len())];
            form.splice(position..=position, replacement.symbols().iter().cloned());
        }
        if form.iter().any(Symbol::is_non_terminal) {
            return None;
        }
        Some(form.iter().map(Symbol::name).collect())
    }
}
