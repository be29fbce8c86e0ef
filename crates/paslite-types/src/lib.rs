//! Shared types for the paslite pipeline.
//!
//! This crate owns everything the other crates exchange: tokens, AST
//! nodes, source files for diagnostics, and the static-phase error type.

pub mod ast;
pub mod error;
pub mod source;
pub mod token;

pub use error::{Diagnostic, PasError};
pub use source::SourceFile;
pub use token::{Literal, Token, TokenKind};

/// Convenience alias for static-phase results.
pub type Result<T> = std::result::Result<T, PasError>;
