//! paslite scanner crate.
//!
//! Turns source text into a [`Token`](paslite_types::Token) stream with
//! error recovery. See [`Scanner`].

mod scanner;

pub use scanner::{LexResult, Scanner};
