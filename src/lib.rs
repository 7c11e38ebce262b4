//! Library for manipulations on formal grammars and finite automata:
//! classification in the Chomsky hierarchy, conversion between regular
//! grammars and automata, determinization by subset construction, and
//! normalization of context-free grammars into Chomsky Normal Form.
//!
//! Both models are plain values. Transformations take their input by
//! reference and return an independent result, so pipelines compose by
//! explicit sequencing.

#![deny(
    missing_docs,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![cfg_attr(test, allow(missing_docs))]
#![cfg_attr(test, deny(warnings))]

pub mod automaton;
pub mod classification;
mod convert;
mod determinize;
#[cfg(feature = "generation")]
pub mod generate;
pub mod grammar;
pub mod normalize;
pub mod symbol;

pub use automaton::{Automaton, AutomatonBuilder, AutomatonError, Label};
pub use classification::ChomskyLevel;
pub use convert::ConversionError;
#[cfg(feature = "generation")]
pub use generate::RandomGenError;
pub use grammar::{Grammar, GrammarBuilder, GrammarError, Rhs, RuleBuilder};
pub use normalize::chomsky_normal_form;
pub use symbol::{Symbol, SymbolSource};
