//! Inline test execution.
//!
//! `test 'description'; begin ... end` blocks parse as zero-argument
//! functions. The runner executes the program's declarations, then
//! calls each test in order. A test passes when it completes without a
//! runtime fault; the first fault fails it with its message.

use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use paslite_sema::Locals;
use paslite_types::ast::{FunctionKind, Stmt};
use paslite_types::Literal;

use crate::error::{RuntimeError, Unwind};
use crate::interpreter::Interpreter;
use crate::value::Value;

#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed {
            write!(f, "✓ {}", self.name)
        } else {
            match &self.message {
                Some(message) => write!(f, "✗ {}: {}", self.name, message),
                None => write!(f, "✗ {}", self.name),
            }
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct TestRunSummary {
    pub results: Vec<TestResult>,
}

impl TestRunSummary {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

impl fmt::Display for TestRunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            writeln!(f, "{result}")?;
        }
        write!(f, "{} passed, {} failed", self.passed(), self.failed())
    }
}

pub struct TestRunner {
    interpreter: Interpreter,
}

impl TestRunner {
    pub fn new(locals: Locals) -> Self {
        Self {
            interpreter: Interpreter::new(locals),
        }
    }

    /// Redirect program output into a buffer, returning it.
    pub fn capture_output(&mut self) -> Rc<std::cell::RefCell<String>> {
        self.interpreter.capture_output()
    }

    /// Execute declarations, then run every inline test.
    pub fn run(&mut self, statements: &[Stmt]) -> Result<TestRunSummary, RuntimeError> {
        for statement in statements {
            let is_declaration = matches!(
                statement,
                Stmt::Function(_) | Stmt::Class(_) | Stmt::Enum { .. } | Stmt::Var(_)
            );
            if !is_declaration {
                continue;
            }
            match self.interpreter.execute(statement) {
                Ok(()) => {}
                Err(Unwind::Error(error)) => return Err(error),
                Err(_) => {}
            }
        }

        let mut summary = TestRunSummary::default();
        for statement in statements {
            let Stmt::Function(decl) = statement else {
                continue;
            };
            if decl.kind != FunctionKind::Test {
                continue;
            }
            let display_name = match &decl.name.literal {
                Some(Literal::Str(text)) => text.clone(),
                _ => decl.name.lexeme.clone(),
            };
            let function = match self.interpreter.globals.borrow().get(&decl.name.lexeme) {
                Some(Value::Function(function)) => function,
                _ => continue,
            };
            let result = match self.interpreter.call_function(&function, Vec::new()) {
                Ok(_) | Err(Unwind::Return(_)) | Err(Unwind::Break) => TestResult {
                    name: display_name,
                    passed: true,
                    message: None,
                },
                Err(Unwind::Error(error)) => TestResult {
                    name: display_name,
                    passed: false,
                    message: Some(error.message),
                },
            };
            summary.results.push(result);
        }
        Ok(summary)
    }
}
