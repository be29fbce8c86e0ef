//! The paslite scanner — converts source text to a token stream.
//!
//! Features:
//! - Case-insensitive keywords (`BEGIN`, `begin` and `Begin` agree)
//! - `:=`, `<>`, `<=`, `>=` digraphs
//! - `//` line comments
//! - Single-quoted string literals and `#NN` char literals
//! - Integer vs floating-point numeric literals
//! - Error recovery: collects errors and keeps scanning

use paslite_types::{Literal, PasError, SourceFile, Token, TokenKind};

/// Result of scanning: tokens plus any errors collected.
///
/// The token stream always ends with [`TokenKind::Eof`].
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<PasError>,
}

/// The scanner.
pub struct Scanner<'src> {
    source: &'src [u8],
    file_name: &'src str,
    /// Byte offset where the current lexeme started.
    start: usize,
    /// Current byte offset.
    pos: usize,
    /// Current 1-based line.
    line: u32,
    /// Byte offset of the first character of the current line.
    line_start: usize,
    tokens: Vec<Token>,
    errors: Vec<PasError>,
}

impl<'src> Scanner<'src> {
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self {
            source: source_file.source.as_bytes(),
            file_name: &source_file.name,
            start: 0,
            pos: 0,
            line: 1,
            line_start: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Scan the entire source into a token stream.
    pub fn scan_tokens(mut self) -> LexResult {
        while !self.at_end() {
            self.start = self.pos;
            self.scan_token();
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            "",
            None,
            self.line,
            0,
            self.file_name,
        ));

        LexResult {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn scan_token(&mut self) {
        let c = self.advance();
        match c {
            b'(' => self.add_token(TokenKind::LeftParen),
            b')' => self.add_token(TokenKind::RightParen),
            b'[' => self.add_token(TokenKind::LeftBracket),
            b']' => self.add_token(TokenKind::RightBracket),
            b',' => self.add_token(TokenKind::Comma),
            b'.' => self.add_token(TokenKind::Dot),
            b'+' => self.add_token(TokenKind::Plus),
            b'-' => self.add_token(TokenKind::Minus),
            b';' => self.add_token(TokenKind::Semicolon),
            b'*' => self.add_token(TokenKind::Star),
            b'=' => self.add_token(TokenKind::Equal),

            b':' => {
                let kind = if self.matches(b'=') {
                    TokenKind::Assign
                } else {
                    TokenKind::Colon
                };
                self.add_token(kind);
            }

            b'<' => {
                let kind = if self.matches(b'=') {
                    TokenKind::LessEqual
                } else if self.matches(b'>') {
                    TokenKind::NotEqual
                } else {
                    TokenKind::Less
                };
                self.add_token(kind);
            }

            b'>' => {
                let kind = if self.matches(b'=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                };
                self.add_token(kind);
            }

            b'/' => {
                if self.matches(b'/') {
                    // A comment goes until the end of the line.
                    while self.peek() != b'\n' && !self.at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            b' ' | b'\r' | b'\t' => {}

            b'\n' => {
                self.line += 1;
                self.line_start = self.pos;
            }

            b'\'' => self.string(),

            b'#' => self.char_literal(),

            _ => {
                if c.is_ascii_digit() {
                    self.number();
                } else if is_alpha(c) {
                    self.identifier();
                } else {
                    self.error(format!("Unexpected character: {}", c as char));
                }
            }
        }
    }

    fn identifier(&mut self) {
        while is_alphanumeric(self.peek()) {
            self.advance();
        }

        let text = self.lexeme_text();
        let kind =
            TokenKind::from_keyword(&text.to_lowercase()).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        let mut is_integer = true;

        // Look for a fractional part.
        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            is_integer = false;
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text = self.lexeme_text();
        if is_integer {
            match text.parse::<i64>() {
                Ok(n) => self.add_literal(TokenKind::Integer, Literal::Integer(n)),
                Err(_) => self.error("Integer literal out of range."),
            }
        } else {
            match text.parse::<f64>() {
                Ok(n) => self.add_literal(TokenKind::Number, Literal::Number(n)),
                Err(_) => self.error("Malformed number literal."),
            }
        }
    }

    fn string(&mut self) {
        while self.peek() != b'\'' && !self.at_end() {
            if self.peek() == b'\n' {
                self.line += 1;
                self.line_start = self.pos + 1;
            }
            self.advance();
        }

        if self.at_end() {
            self.error("Unterminated string.");
            return;
        }

        // The closing quote.
        self.advance();

        let value = self.lexeme_text();
        let value = value[1..value.len() - 1].to_string();
        self.add_literal(TokenKind::Str, Literal::Str(value));
    }

    /// `#NN` char literal, decimal code point.
    fn char_literal(&mut self) {
        if !self.peek().is_ascii_digit() {
            self.error(format!("Invalid character: {}", self.peek() as char));
            return;
        }

        while self.peek().is_ascii_digit() {
            self.advance();
        }

        let text = self.lexeme_text();
        let code = text[1..].parse::<u32>().ok().and_then(char::from_u32);
        match code {
            Some(c) => self.add_literal(TokenKind::Char, Literal::Char(c)),
            None => self.error(format!("Invalid character code: {}", &text[1..])),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn matches(&mut self, expected: u8) -> bool {
        if self.at_end() || self.source[self.pos] != expected {
            return false;
        }
        self.pos += 1;
        true
    }

    fn peek(&self) -> u8 {
        self.source.get(self.pos).copied().unwrap_or(b'\0')
    }

    fn peek_next(&self) -> u8 {
        self.source.get(self.pos + 1).copied().unwrap_or(b'\0')
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn advance(&mut self) -> u8 {
        let c = self.source[self.pos];
        self.pos += 1;
        c
    }

    fn lexeme_text(&self) -> String {
        String::from_utf8_lossy(&self.source[self.start..self.pos]).into_owned()
    }

    fn offset(&self) -> u32 {
        self.start.saturating_sub(self.line_start) as u32
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add(kind, None);
    }

    fn add_literal(&mut self, kind: TokenKind, literal: Literal) {
        self.add(kind, Some(literal));
    }

    fn add(&mut self, kind: TokenKind, literal: Option<Literal>) {
        let token = Token::new(
            kind,
            self.lexeme_text(),
            literal,
            self.line,
            self.offset(),
            self.file_name,
        );
        self.tokens.push(token);
    }

    fn error(&mut self, message: impl Into<String>) {
        let token = Token::new(
            TokenKind::Eof,
            self.lexeme_text(),
            None,
            self.line,
            self.offset(),
            self.file_name,
        );
        self.errors.push(PasError::new(&token, message));
    }
}

fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_alphanumeric(c: u8) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<Token> {
        let file = SourceFile::new("test", source);
        let result = Scanner::new(&file).scan_tokens();
        assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);
        result.tokens
    }

    #[test]
    fn test_assign_vs_colon() {
        let tokens = scan("x := 1; y: Integer");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert!(kinds.contains(&TokenKind::Assign));
        assert!(kinds.contains(&TokenKind::Colon));
    }

    #[test]
    fn test_keywords_case_insensitive() {
        let tokens = scan("BEGIN Begin begin");
        assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Begin));
    }

    #[test]
    fn test_quoted_literal_is_always_string() {
        let tokens = scan("'x'");
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].literal, Some(Literal::Str("x".into())));
    }

    #[test]
    fn test_char_literal() {
        let tokens = scan("#65");
        assert_eq!(tokens[0].kind, TokenKind::Char);
        assert_eq!(tokens[0].literal, Some(Literal::Char('A')));
    }

    #[test]
    fn test_integer_vs_double() {
        let tokens = scan("42 3.5");
        assert_eq!(tokens[0].literal, Some(Literal::Integer(42)));
        assert_eq!(tokens[1].literal, Some(Literal::Number(3.5)));
    }

    #[test]
    fn test_comment_skipped() {
        let tokens = scan("1 // the rest is ignored\n2");
        assert_eq!(tokens[0].literal, Some(Literal::Integer(1)));
        assert_eq!(tokens[1].literal, Some(Literal::Integer(2)));
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_unterminated_string_reported() {
        let file = SourceFile::new("test", "'oops");
        let result = Scanner::new(&file).scan_tokens();
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("Unterminated string."));
    }

    #[test]
    fn test_offsets_track_line_starts() {
        let tokens = scan("ab\n  cd");
        assert_eq!(tokens[0].offset, 0);
        assert_eq!(tokens[1].offset, 2);
        assert_eq!(tokens[1].line, 2);
    }
}
