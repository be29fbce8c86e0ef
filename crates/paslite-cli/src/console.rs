//! Formatted build output.
//!
//! Maven-style build banners plus three-line error reports that quote
//! the offending source line and point a caret at the token.

use paslite_types::Diagnostic;

pub const BAR: &str =
    "------------------------------------------------------------------------";

pub const ANSI_RESET: &str = "\u{1b}[0m";
pub const ANSI_RED: &str = "\u{1b}[31m";
pub const ANSI_GREEN: &str = "\u{1b}[32m";
pub const ANSI_BLUE: &str = "\u{1b}[34m";
pub const ANSI_CYAN: &str = "\u{1b}[36m";
pub const ANSI_WHITE: &str = "\u{1b}[37m";

/// `[INFO] ---------------------------[ name ]---------------------------`
pub fn header(name: &str) {
    let length = (BAR.len().saturating_sub(4 + name.len())) / 2;
    info(&format!(
        "{}[ {ANSI_CYAN}{name}{ANSI_RESET} ]{}",
        "-".repeat(length),
        "-".repeat(length)
    ));
}

pub fn info(text: &str) {
    println!("{ANSI_WHITE}[{ANSI_BLUE}INFO{ANSI_WHITE}] {ANSI_RESET}{text}");
}

/// `[INFO] name ......................................... SUCCESS`
pub fn success(name: &str) {
    let dots = BAR.len().saturating_sub(10 + name.len());
    info(&format!(
        "{name} {}{ANSI_GREEN} SUCCESS{ANSI_RESET}",
        ".".repeat(dots)
    ));
}

/// `[INFO] name .......................................... FAILED`
pub fn fail(name: &str) {
    let dots = BAR.len().saturating_sub(10 + name.len());
    info(&format!(
        "{name} {}{ANSI_RED} FAILED{ANSI_RESET}",
        ".".repeat(dots)
    ));
}

/// Three lines: the message, the source line, a caret under the token.
///
/// ```text
/// [ERROR] demo.pas: Type mismatch!
/// [ERROR] 16 ║ X := 'oops';
/// [ERROR]    ║ ^
/// ```
pub fn error(diagnostic: &Diagnostic) {
    error_line(&format!("{}: {}", diagnostic.file, diagnostic.message));

    let Some(source_line) = &diagnostic.source_line else {
        return;
    };
    let line = diagnostic.line;
    error_line(&format!("{line} ║ {source_line}"));

    let carets = diagnostic.lexeme.chars().count().max(1);
    error_line(&format!(
        "{} ║{ANSI_RED}{}{}{ANSI_RESET}",
        " ".repeat(line.to_string().len()),
        " ".repeat(diagnostic.column as usize + 1),
        "^".repeat(carets)
    ));
}

fn error_line(text: &str) {
    println!("{ANSI_WHITE}[{ANSI_RED}ERROR{ANSI_WHITE}] {ANSI_RESET}{text}");
}
