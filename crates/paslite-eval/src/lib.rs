//! paslite evaluation crate.
//!
//! The runtime half of the pipeline: values, environments, the
//! tree-walking [`Interpreter`], the built-in functions and the inline
//! test runner.

mod env;
mod error;
mod interpreter;
mod native;
mod object;
mod test_runner;
mod value;

pub use env::{EnvRef, Environment};
pub use error::{EvalResult, RuntimeError, Unwind};
pub use interpreter::Interpreter;
pub use native::NativeFunction;
pub use object::{Class, Function, Instance};
pub use test_runner::{TestResult, TestRunSummary, TestRunner};
pub use value::{EnumValue, MapKey, Value};
