//! Token types for the paslite scanner.
//!
//! Defines [`TokenKind`] covering every lexeme in the language and
//! [`Token`], which pairs a kind with its lexeme, optional literal
//! payload and source position.

use std::fmt;

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind in the language.
///
/// Keywords are recognised case-insensitively; `begin`, `BEGIN` and
/// `Begin` all produce [`TokenKind::Begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ── Single-character tokens ──────────────────────────────
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `-`
    Minus,
    /// `+`
    Plus,
    /// `;`
    Semicolon,
    /// `/`
    Slash,
    /// `*`
    Star,
    /// `:`
    Colon,
    /// `=` (equality, not assignment)
    Equal,

    // ── Digraphs ─────────────────────────────────────────────
    /// `:=`
    Assign,
    /// `<>`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,

    // ── Literals ─────────────────────────────────────────────
    /// User-defined name.
    Identifier,
    /// Single-quoted string literal.
    Str,
    /// `#NN` character literal.
    Char,
    /// Integer literal.
    Integer,
    /// Floating-point literal.
    Number,

    // ── Keywords ─────────────────────────────────────────────
    And,
    As,
    Begin,
    Break,
    Case,
    Class,
    Const,
    Constructor,
    Do,
    Else,
    End,
    Except,
    Exit,
    False,
    Finally,
    For,
    Function,
    If,
    Nil,
    Not,
    Of,
    Or,
    Print,
    Procedure,
    Raise,
    Super,
    Test,
    Then,
    This,
    True,
    Try,
    Type,
    Unit,
    Uses,
    Var,
    While,

    /// End of input.
    Eof,
}

impl TokenKind {
    /// Look up a keyword by its lowercased spelling. Returns `None`
    /// for user identifiers.
    pub fn from_keyword(s: &str) -> Option<TokenKind> {
        Some(match s {
            "and" => TokenKind::And,
            "as" => TokenKind::As,
            "begin" => TokenKind::Begin,
            "break" => TokenKind::Break,
            "case" => TokenKind::Case,
            "class" => TokenKind::Class,
            "const" => TokenKind::Const,
            "constructor" => TokenKind::Constructor,
            "do" => TokenKind::Do,
            "else" => TokenKind::Else,
            "end" => TokenKind::End,
            "except" => TokenKind::Except,
            "exit" => TokenKind::Exit,
            "false" => TokenKind::False,
            "finally" => TokenKind::Finally,
            "for" => TokenKind::For,
            "function" => TokenKind::Function,
            "if" => TokenKind::If,
            "nil" => TokenKind::Nil,
            "not" => TokenKind::Not,
            "of" => TokenKind::Of,
            "or" => TokenKind::Or,
            "print" => TokenKind::Print,
            "procedure" => TokenKind::Procedure,
            "raise" => TokenKind::Raise,
            "super" => TokenKind::Super,
            "test" => TokenKind::Test,
            "then" => TokenKind::Then,
            "this" => TokenKind::This,
            "true" => TokenKind::True,
            "try" => TokenKind::Try,
            "type" => TokenKind::Type,
            "unit" => TokenKind::Unit,
            "uses" => TokenKind::Uses,
            "var" => TokenKind::Var,
            "while" => TokenKind::While,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Minus => "-",
            TokenKind::Plus => "+",
            TokenKind::Semicolon => ";",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Colon => ":",
            TokenKind::Equal => "=",
            TokenKind::Assign => ":=",
            TokenKind::NotEqual => "<>",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::Identifier => "identifier",
            TokenKind::Str => "string",
            TokenKind::Char => "char",
            TokenKind::Integer => "integer",
            TokenKind::Number => "number",
            TokenKind::And => "and",
            TokenKind::As => "as",
            TokenKind::Begin => "begin",
            TokenKind::Break => "break",
            TokenKind::Case => "case",
            TokenKind::Class => "class",
            TokenKind::Const => "const",
            TokenKind::Constructor => "constructor",
            TokenKind::Do => "do",
            TokenKind::Else => "else",
            TokenKind::End => "end",
            TokenKind::Except => "except",
            TokenKind::Exit => "exit",
            TokenKind::False => "false",
            TokenKind::Finally => "finally",
            TokenKind::For => "for",
            TokenKind::Function => "function",
            TokenKind::If => "if",
            TokenKind::Nil => "nil",
            TokenKind::Not => "not",
            TokenKind::Of => "of",
            TokenKind::Or => "or",
            TokenKind::Print => "print",
            TokenKind::Procedure => "procedure",
            TokenKind::Raise => "raise",
            TokenKind::Super => "super",
            TokenKind::Test => "test",
            TokenKind::Then => "then",
            TokenKind::This => "this",
            TokenKind::True => "true",
            TokenKind::Try => "try",
            TokenKind::Type => "type",
            TokenKind::Unit => "unit",
            TokenKind::Uses => "uses",
            TokenKind::Var => "var",
            TokenKind::While => "while",
            TokenKind::Eof => "end of file",
        };
        f.write_str(text)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Literal
// ─────────────────────────────────────────────────────────────────────

/// Literal payload carried by literal tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Number(f64),
    Str(String),
    Char(char),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{n}"),
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Str(s) => f.write_str(s),
            Literal::Char(c) => write!(f, "{c}"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The exact source text.
    pub lexeme: String,
    /// Literal payload for string/char/number tokens.
    pub literal: Option<Literal>,
    /// 1-based source line.
    pub line: u32,
    /// 0-based column offset within the line.
    pub offset: u32,
    /// Name of the file the token came from.
    pub file: String,
}

impl Token {
    /// Create a new token.
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        literal: Option<Literal>,
        line: u32,
        offset: u32,
        file: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            line,
            offset,
            file: file.into(),
        }
    }

    /// Create a synthesized token at the position of an existing one.
    ///
    /// The parser uses this for desugared constructs (for-loop counters,
    /// case comparisons) so runtime errors still point at real source.
    pub fn derived(&self, kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line: self.line,
            offset: self.offset,
            file: self.file.clone(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexeme)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_keyword_recognises_keywords() {
        assert_eq!(TokenKind::from_keyword("begin"), Some(TokenKind::Begin));
        assert_eq!(TokenKind::from_keyword("end"), Some(TokenKind::End));
        assert_eq!(
            TokenKind::from_keyword("procedure"),
            Some(TokenKind::Procedure)
        );
        assert_eq!(TokenKind::from_keyword("raise"), Some(TokenKind::Raise));
    }

    #[test]
    fn test_from_keyword_returns_none_for_identifiers() {
        for name in ["foo", "WriteLn", "Animal", "x1"] {
            assert!(TokenKind::from_keyword(name).is_none());
        }
    }

    #[test]
    fn test_display_matches_source_text() {
        assert_eq!(TokenKind::Assign.to_string(), ":=");
        assert_eq!(TokenKind::NotEqual.to_string(), "<>");
        assert_eq!(TokenKind::Begin.to_string(), "begin");
    }

    #[test]
    fn test_derived_token_keeps_position() {
        let base = Token::new(TokenKind::For, "for", None, 7, 2, "demo.pas");
        let counter = base.derived(TokenKind::Identifier, "i");
        assert_eq!(counter.line, 7);
        assert_eq!(counter.offset, 2);
        assert_eq!(counter.file, "demo.pas");
        assert_eq!(counter.lexeme, "i");
    }
}
