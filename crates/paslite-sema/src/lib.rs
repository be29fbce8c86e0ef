//! paslite semantic analysis crate.
//!
//! Two front-half passes that run between parsing and evaluation:
//!
//! - [`Resolver`] computes lexical distances for variable accesses and
//!   reports scope errors.
//! - [`TypeChecker`] verifies declared types structurally, treating
//!   `Any` as a wildcard that unifies with everything.

mod checker;
mod lookup;
mod reduce;
mod resolver;

pub use checker::TypeChecker;
pub use lookup::TypeLookup;
pub use reduce::{reduce, TypeTables};
pub use resolver::{Locals, Resolver};
