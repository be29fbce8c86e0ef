//! Scanner integration tests.
//!
//! Covers keywords (and their case-insensitivity), digraphs, every
//! literal form, comments, position tracking and error recovery.

use paslite_lexer::Scanner;
use paslite_types::{Literal, SourceFile, Token, TokenKind};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

/// Scan source text and return just the token kinds (excluding Eof).
fn kinds(source: &str) -> Vec<TokenKind> {
    tokens(source)
        .into_iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| t.kind)
        .collect()
}

fn tokens(source: &str) -> Vec<Token> {
    let file = SourceFile::new("test.pas", source);
    let result = Scanner::new(&file).scan_tokens();
    assert!(
        result.errors.is_empty(),
        "unexpected errors: {:?}",
        result.errors
    );
    result.tokens
}

fn errors(source: &str) -> Vec<String> {
    let file = SourceFile::new("test.pas", source);
    let result = Scanner::new(&file).scan_tokens();
    result.errors.into_iter().map(|e| e.message).collect()
}

// ─────────────────────────────────────────────────────────────────────
// Keywords
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_keywords() {
    let pairs = [
        ("and", TokenKind::And),
        ("begin", TokenKind::Begin),
        ("break", TokenKind::Break),
        ("case", TokenKind::Case),
        ("class", TokenKind::Class),
        ("constructor", TokenKind::Constructor),
        ("do", TokenKind::Do),
        ("else", TokenKind::Else),
        ("end", TokenKind::End),
        ("except", TokenKind::Except),
        ("exit", TokenKind::Exit),
        ("for", TokenKind::For),
        ("function", TokenKind::Function),
        ("if", TokenKind::If),
        ("nil", TokenKind::Nil),
        ("not", TokenKind::Not),
        ("of", TokenKind::Of),
        ("or", TokenKind::Or),
        ("print", TokenKind::Print),
        ("procedure", TokenKind::Procedure),
        ("raise", TokenKind::Raise),
        ("super", TokenKind::Super),
        ("test", TokenKind::Test),
        ("then", TokenKind::Then),
        ("this", TokenKind::This),
        ("try", TokenKind::Try),
        ("type", TokenKind::Type),
        ("var", TokenKind::Var),
        ("while", TokenKind::While),
    ];
    for (src, expected) in &pairs {
        assert_eq!(kinds(src), vec![*expected], "keyword '{src}'");
    }
}

#[test]
fn test_keywords_are_case_insensitive() {
    for src in ["begin", "BEGIN", "Begin", "bEgIn"] {
        assert_eq!(kinds(src), vec![TokenKind::Begin], "spelling '{src}'");
    }
}

#[test]
fn test_identifier_is_not_a_keyword() {
    let toks = tokens("beginning WriteLn x_1");
    assert!(toks[..3].iter().all(|t| t.kind == TokenKind::Identifier));
}

// ─────────────────────────────────────────────────────────────────────
// Operators and digraphs
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_single_character_tokens() {
    assert_eq!(
        kinds("( ) [ ] , . + - ; * / : ="),
        vec![
            TokenKind::LeftParen,
            TokenKind::RightParen,
            TokenKind::LeftBracket,
            TokenKind::RightBracket,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Semicolon,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Colon,
            TokenKind::Equal,
        ]
    );
}

#[test]
fn test_digraphs() {
    assert_eq!(
        kinds(":= <> <= >= < >"),
        vec![
            TokenKind::Assign,
            TokenKind::NotEqual,
            TokenKind::LessEqual,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::Greater,
        ]
    );
}

#[test]
fn test_assign_vs_colon() {
    assert_eq!(
        kinds("x := 1; y: Integer"),
        vec![
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Integer,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Identifier,
        ]
    );
}

// ─────────────────────────────────────────────────────────────────────
// Literals
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_integer_literal() {
    let toks = tokens("42");
    assert_eq!(toks[0].kind, TokenKind::Integer);
    assert_eq!(toks[0].literal, Some(Literal::Integer(42)));
}

#[test]
fn test_double_literal() {
    let toks = tokens("3.5");
    assert_eq!(toks[0].kind, TokenKind::Number);
    assert_eq!(toks[0].literal, Some(Literal::Number(3.5)));
}

#[test]
fn test_integer_followed_by_dot_is_not_a_double() {
    // `5.Foo` is a member access on an integer.
    assert_eq!(
        kinds("5.Foo"),
        vec![TokenKind::Integer, TokenKind::Dot, TokenKind::Identifier]
    );
}

#[test]
fn test_string_literal() {
    let toks = tokens("'Hello, World'");
    assert_eq!(toks[0].kind, TokenKind::Str);
    assert_eq!(toks[0].literal, Some(Literal::Str("Hello, World".into())));
}

#[test]
fn test_empty_string_literal() {
    let toks = tokens("''");
    assert_eq!(toks[0].literal, Some(Literal::Str(String::new())));
}

#[test]
fn test_single_character_quotes_still_lex_as_string() {
    let toks = tokens("'x'");
    assert_eq!(toks[0].kind, TokenKind::Str);
}

#[test]
fn test_char_literal() {
    let toks = tokens("#65");
    assert_eq!(toks[0].kind, TokenKind::Char);
    assert_eq!(toks[0].literal, Some(Literal::Char('A')));
}

#[test]
fn test_char_literal_out_of_range() {
    let msgs = errors("#99999999999");
    assert_eq!(msgs.len(), 1);
    assert!(msgs[0].contains("Invalid character code"));
}

#[test]
fn test_integer_literal_out_of_range() {
    let msgs = errors("99999999999999999999");
    assert_eq!(msgs.len(), 1);
    assert!(msgs[0].contains("Integer literal out of range."));
}

// ─────────────────────────────────────────────────────────────────────
// Comments and whitespace
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_line_comment_runs_to_end_of_line() {
    let toks = tokens("1 // ignored := ; end\n2");
    assert_eq!(toks[0].literal, Some(Literal::Integer(1)));
    assert_eq!(toks[1].literal, Some(Literal::Integer(2)));
}

#[test]
fn test_slash_alone_is_division() {
    assert_eq!(
        kinds("1 / 2"),
        vec![TokenKind::Integer, TokenKind::Slash, TokenKind::Integer]
    );
}

#[test]
fn test_lines_and_offsets() {
    let toks = tokens("a\n  bb\nc");
    assert_eq!((toks[0].line, toks[0].offset), (1, 0));
    assert_eq!((toks[1].line, toks[1].offset), (2, 2));
    assert_eq!((toks[2].line, toks[2].offset), (3, 0));
}

#[test]
fn test_newline_inside_string_counts_lines() {
    let toks = tokens("'a\nb' x");
    assert_eq!(toks[1].line, 2);
}

// ─────────────────────────────────────────────────────────────────────
// Errors and recovery
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_unterminated_string() {
    let msgs = errors("'oops");
    assert_eq!(msgs, vec!["Unterminated string.".to_string()]);
}

#[test]
fn test_unexpected_character_keeps_scanning() {
    let file = SourceFile::new("test.pas", "$ x");
    let result = Scanner::new(&file).scan_tokens();
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].message.contains("Unexpected character"));
    assert_eq!(result.tokens[0].kind, TokenKind::Identifier);
}

#[test]
fn test_stream_always_ends_with_eof() {
    for src in ["", "x", "'unterminated"] {
        let file = SourceFile::new("test.pas", src);
        let result = Scanner::new(&file).scan_tokens();
        assert_eq!(result.tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }
}
