//! Shared error type for the static phases (scanner, parser, resolver,
//! type checker), plus the serializable diagnostic record the CLI emits.

use serde::{Deserialize, Serialize};

use crate::source::SourceFile;
use crate::token::{Token, TokenKind};

/// An error produced before execution, anchored to the token where it
/// was detected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("[line {}] Error at {}: {message}", .token.line, describe(.token))]
pub struct PasError {
    pub token: Token,
    pub message: String,
}

impl PasError {
    pub fn new(token: &Token, message: impl Into<String>) -> Self {
        Self {
            token: token.clone(),
            message: message.into(),
        }
    }

    /// Render this error as a serializable diagnostic, attaching the
    /// offending source line when the file is available.
    pub fn to_diagnostic(&self, source: Option<&SourceFile>) -> Diagnostic {
        Diagnostic {
            file: self.token.file.clone(),
            line: self.token.line,
            column: self.token.offset,
            lexeme: self.token.lexeme.clone(),
            message: self.message.clone(),
            source_line: source
                .and_then(|s| s.line(self.token.line))
                .map(str::to_string),
        }
    }
}

fn describe(token: &Token) -> String {
    if token.kind == TokenKind::Eof {
        "end".to_string()
    } else {
        format!("'{}'", token.lexeme)
    }
}

/// A machine-readable diagnostic record, for `--json` output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub lexeme: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_line: Option<String>,
}
