//! paslite parser crate.
//!
//! Turns a token stream into [`Stmt`](paslite_types::ast::Stmt) nodes
//! with error recovery at statement boundaries. See [`Parser`].

mod parser;

pub use parser::{ParseResult, Parser};
