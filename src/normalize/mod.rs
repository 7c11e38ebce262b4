//! Normalization of context-free grammars into Chomsky Normal Form.
//!
//! The pipeline is four classical simplification passes followed by
//! binarization:
//!
//! 1. [`eliminate_nulling`] — removes ε productions.
//! 2. [`eliminate_unit_rules`] — removes `A → B` chains.
//! 3. [`remove_unreachable`] — drops symbols the start symbol cannot
//!    reach.
//! 4. [`remove_unproductive`] — drops symbols that derive no terminal
//!    string.
//! 5. [`binarize`] — isolates terminals and caps right-hand sides at two
//!    non-terminals.
//!
//! Every stage is a pure function from grammar to grammar, independently
//! callable, and a no-op on a grammar already satisfying its
//! postcondition. Calling a later stage before an earlier one runs fine
//! but guarantees nothing about the result being in CNF; the caller owns
//! the ordering, which [`chomsky_normal_form`] provides.

mod binarize;
mod nulling;
mod unit;
mod useless;

pub use self::binarize::binarize;
pub use self::nulling::eliminate_nulling;
pub use self::unit::eliminate_unit_rules;
pub use self::useless::{remove_unproductive, remove_unreachable};

use crate::grammar::Grammar;

/// Runs the five normalization stages in order, producing an equivalent
/// grammar in Chomsky Normal Form.
///
/// The language is preserved except for the empty string: ε elimination
/// does not re-introduce ε acceptance for a nullable start symbol, so the
/// result derives exactly the non-empty strings of the input's language.
pub fn chomsky_normal_form(grammar: &Grammar) -> Grammar {
    let grammar = eliminate_nulling(grammar);
    let grammar = eliminate_unit_rules(&grammar);
    let grammar = remove_unreachable(&grammar);
    let grammar = remove_unproductive(&grammar);
    binarize(&grammar)
}
