//! paslite command-line driver.
//!
//! Runs a script through the whole pipeline: scan, parse, resolve,
//! type-check, then either interpret the program or run its inline
//! tests (`--test`). Static errors exit with 65, runtime faults with
//! 70. `--json` swaps the build banners for machine-readable
//! diagnostics. With no script, drops into a line-at-a-time prompt.

mod console;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use paslite_eval::{Interpreter, RuntimeError, TestRunner};
use paslite_lexer::Scanner;
use paslite_parser::Parser;
use paslite_sema::{Locals, Resolver, TypeChecker};
use paslite_types::ast::Stmt;
use paslite_types::{Diagnostic, PasError, SourceFile};

const EXIT_USAGE: u8 = 64;
const EXIT_STATIC: u8 = 65;
const EXIT_RUNTIME: u8 = 70;

struct Options {
    path: Option<String>,
    test: bool,
    json: bool,
}

impl Options {
    fn parse(args: impl Iterator<Item = String>) -> Result<Options, String> {
        let mut options = Options {
            path: None,
            test: false,
            json: false,
        };
        for arg in args {
            match arg.as_str() {
                "--test" => options.test = true,
                "--json" => options.json = true,
                _ if arg.starts_with('-') => return Err(format!("Unknown option '{arg}'.")),
                _ => {
                    if options.path.is_some() {
                        return Err("Expect a single script.".to_string());
                    }
                    options.path = Some(arg);
                }
            }
        }
        Ok(options)
    }
}

fn main() -> ExitCode {
    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("Usage: paslite [--test] [--json] [script]");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match options.path.clone() {
        Some(path) => run_file(&path, &options),
        None => run_prompt(),
    }
}

fn run_file(path: &str, options: &Options) -> ExitCode {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Could not read '{path}': {error}");
            return ExitCode::from(EXIT_USAGE);
        }
    };
    let file = SourceFile::new(path, source);

    if !options.json {
        console::header(path);
        console::info("Building...");
        console::info("");
    }

    let (statements, locals) = match build(&file) {
        Ok(front) => front,
        Err(errors) => {
            report_static(&errors, &file, options);
            if !options.json {
                console::fail(path);
                banner(false);
            }
            return ExitCode::from(EXIT_STATIC);
        }
    };

    if !options.json {
        console::success(path);
        banner(true);
    }

    if options.test {
        run_tests(&statements, locals, &file, options)
    } else {
        run_program(&statements, locals, &file, options)
    }
}

/// The static half of the pipeline. Stops at the first phase that
/// reports anything.
fn build(file: &SourceFile) -> Result<(Vec<Stmt>, Locals), Vec<PasError>> {
    let lexed = Scanner::new(file).scan_tokens();
    if !lexed.errors.is_empty() {
        return Err(lexed.errors);
    }

    let parsed = Parser::new(lexed.tokens).parse();
    if !parsed.errors.is_empty() {
        return Err(parsed.errors);
    }

    let (locals, errors) = Resolver::new().resolve(&parsed.statements);
    if !errors.is_empty() {
        return Err(errors);
    }

    if let Err(error) = TypeChecker::new().check(&parsed.statements) {
        return Err(vec![error]);
    }

    Ok((parsed.statements, locals))
}

fn run_program(
    statements: &[Stmt],
    locals: Locals,
    file: &SourceFile,
    options: &Options,
) -> ExitCode {
    let mut interpreter = Interpreter::new(locals);
    match interpreter.interpret(statements) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report_runtime(&error, file, options);
            ExitCode::from(EXIT_RUNTIME)
        }
    }
}

fn run_tests(
    statements: &[Stmt],
    locals: Locals,
    file: &SourceFile,
    options: &Options,
) -> ExitCode {
    let mut runner = TestRunner::new(locals);
    match runner.run(statements) {
        Ok(summary) => {
            if options.json {
                if let Ok(text) = serde_json::to_string_pretty(&summary) {
                    println!("{text}");
                }
            } else {
                println!("{summary}");
            }
            if summary.all_passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(error) => {
            report_runtime(&error, file, options);
            ExitCode::from(EXIT_RUNTIME)
        }
    }
}

fn run_prompt() -> ExitCode {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let file = SourceFile::new("repl", line.clone());
        match build(&file) {
            Ok((statements, locals)) => {
                let mut interpreter = Interpreter::new(locals);
                if let Err(error) = interpreter.interpret(&statements) {
                    console::error(&runtime_diagnostic(&error, &file));
                }
            }
            Err(errors) => {
                for error in &errors {
                    console::error(&error.to_diagnostic(Some(&file)));
                }
            }
        }
    }
    ExitCode::SUCCESS
}

fn report_static(errors: &[PasError], file: &SourceFile, options: &Options) {
    if options.json {
        let diagnostics: Vec<Diagnostic> = errors
            .iter()
            .map(|error| error.to_diagnostic(Some(file)))
            .collect();
        if let Ok(text) = serde_json::to_string_pretty(&diagnostics) {
            println!("{text}");
        }
    } else {
        for error in errors {
            console::error(&error.to_diagnostic(Some(file)));
        }
    }
}

fn report_runtime(error: &RuntimeError, file: &SourceFile, options: &Options) {
    let diagnostic = runtime_diagnostic(error, file);
    if options.json {
        if let Ok(text) = serde_json::to_string_pretty(&diagnostic) {
            println!("{text}");
        }
    } else {
        console::error(&diagnostic);
    }
}

fn runtime_diagnostic(error: &RuntimeError, file: &SourceFile) -> Diagnostic {
    Diagnostic {
        file: error.token.file.clone(),
        line: error.token.line,
        column: error.token.offset,
        lexeme: error.token.lexeme.clone(),
        message: error.message.clone(),
        source_line: file.line(error.token.line).map(str::to_string),
    }
}

fn banner(success: bool) {
    console::info(console::BAR);
    if success {
        console::info(&format!(
            "{}BUILD SUCCESS{}",
            console::ANSI_GREEN,
            console::ANSI_RESET
        ));
    } else {
        console::info(&format!(
            "{}BUILD FAILED{}",
            console::ANSI_RED,
            console::ANSI_RESET
        ));
    }
    console::info(console::BAR);
}
