//! Runtime error and control-flow signalling.
//!
//! Every non-local exit travels as the `Err` side of a `Result`:
//! runtime faults, `Exit` and `break` all unwind the same way and the
//! interpreter peels off the variant it handles.

use thiserror::Error;

use paslite_types::Token;

use crate::value::Value;

/// A runtime fault, positioned at the token that triggered it. A
/// `raise` statement carries its payload in `value` so `except`
/// clauses can bind it.
#[derive(Debug, Clone, Error)]
#[error("{message}\n[line {}]", .token.line)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
    pub value: Option<Value>,
}

impl RuntimeError {
    pub fn new(token: &Token, message: impl Into<String>) -> Self {
        Self {
            token: token.clone(),
            message: message.into(),
            value: None,
        }
    }

    pub fn with_value(token: &Token, message: impl Into<String>, value: Value) -> Self {
        Self {
            token: token.clone(),
            message: message.into(),
            value: Some(value),
        }
    }
}

/// Non-local control flow during evaluation.
#[derive(Debug, Clone)]
pub enum Unwind {
    /// A runtime fault, catchable by `try`/`except`.
    Error(RuntimeError),
    /// `Exit` from the enclosing function, with its value.
    Return(Value),
    /// `break` out of the enclosing loop.
    Break,
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

pub type EvalResult<T> = Result<T, Unwind>;
