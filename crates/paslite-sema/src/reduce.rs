//! Static type reduction for expressions.
//!
//! [`reduce`] computes the best-known static type name of an
//! expression from the checker's tables. `"Any"` is the escape hatch:
//! anything unknown reduces to it and unifies with everything.

use paslite_types::ast::{Expr, LitValue};
use paslite_types::{PasError, TokenKind};

use crate::lookup::TypeLookup;

/// The checker's type tables, threaded through reduction.
#[derive(Debug, Default)]
pub struct TypeTables {
    /// Declared types, scoped.
    pub lookup: TypeLookup,
    /// Types inferred for `Any`-declared names.
    pub inferred: TypeLookup,
    /// Class name → parent class name ("Any" at the root).
    pub parents: TypeLookup,
    /// Container name → element type.
    pub generics: TypeLookup,
    /// Name of the class whose methods are being checked.
    pub current_class: Option<String>,
}

impl TypeTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `actual` names `expected` or one of its ancestors
    /// matches, case-insensitively.
    pub fn satisfies(&self, expected: &str, actual: &str) -> bool {
        if expected.eq_ignore_ascii_case(actual) {
            return true;
        }
        let mut parent = self.parents.get(actual);
        while let Some(p) = parent {
            if expected.eq_ignore_ascii_case(p) {
                return true;
            }
            parent = self.parents.get(p);
        }
        false
    }
}

/// Reduce an expression to a type name using the declared-type table.
pub fn reduce(expr: &Expr, tables: &TypeTables) -> Result<String, PasError> {
    reduce_in(expr, &tables.lookup, tables)
}

/// Reduce with an explicit primary table. Member access re-reduces its
/// receiver under the inferred table when the declared type is `Any`.
fn reduce_in(expr: &Expr, primary: &TypeLookup, tables: &TypeTables) -> Result<String, PasError> {
    match expr {
        Expr::Literal { value } => Ok(match value {
            LitValue::Str(_) => "String".to_string(),
            LitValue::Integer(_) => "Integer".to_string(),
            LitValue::Boolean(_) => "Boolean".to_string(),
            LitValue::Char(_) => "Char".to_string(),
            LitValue::Double(_) => "Double".to_string(),
            LitValue::Nil => "Any".to_string(),
        }),

        Expr::Variable { name, .. } => {
            if let Some(ty) = primary.get(&name.lexeme) {
                return Ok(ty.to_string());
            }
            Ok(builtin_type(&name.lexeme).unwrap_or("Any").to_string())
        }

        Expr::Binary {
            left,
            operator,
            right,
        } => {
            if matches!(
                operator.kind,
                TokenKind::Less
                    | TokenKind::LessEqual
                    | TokenKind::Greater
                    | TokenKind::GreaterEqual
                    | TokenKind::Equal
                    | TokenKind::NotEqual
            ) {
                return Ok("Boolean".to_string());
            }

            let left_type = reduce_in(left, primary, tables)?;
            let right_type = reduce_in(right, primary, tables)?;
            if left_type.eq_ignore_ascii_case("any") || right_type.eq_ignore_ascii_case("any") {
                return Ok(left_type);
            }

            if operator.kind == TokenKind::Plus
                && (left_type == "String" || right_type == "String")
            {
                return Ok("String".to_string());
            }

            if left_type != right_type {
                return Err(PasError::new(operator, "Type mismatch."));
            }
            Ok(left_type)
        }

        Expr::Logical {
            left,
            operator,
            right,
        } => {
            let left_type = reduce_in(left, primary, tables)?;
            let right_type = reduce_in(right, primary, tables)?;

            if left_type.eq_ignore_ascii_case("any") || right_type.eq_ignore_ascii_case("any") {
                return Ok("Boolean".to_string());
            }
            if left_type != right_type {
                return Err(PasError::new(operator, "Type mismatch."));
            }
            Ok("Boolean".to_string())
        }

        Expr::Call { callee, .. } => {
            let mut result = reduce_in(callee, primary, tables)?;
            if let Expr::Variable { name, .. } = callee.as_ref() {
                if name.lexeme.eq_ignore_ascii_case("Str")
                    || name.lexeme.eq_ignore_ascii_case("Copy")
                {
                    return Ok("String".to_string());
                }
                if name.lexeme.eq_ignore_ascii_case("Length") {
                    return Ok("Integer".to_string());
                }

                if result.eq_ignore_ascii_case("any") {
                    if let Some(class) = &tables.current_class {
                        if let Some(ty) =
                            primary.get(&format!("{}::{}", class, name.lexeme))
                        {
                            result = ty.to_string();
                        }
                    }
                }
            }
            Ok(result)
        }

        Expr::Get { object, name } => {
            let mut class = reduce_in(object, primary, tables)?;
            if class.eq_ignore_ascii_case("any") {
                class = reduce_in(object, &tables.inferred, tables)?;
            }
            Ok(primary
                .get(&format!("{}::{}", class, name.lexeme))
                .unwrap_or("Any")
                .to_string())
        }

        Expr::Grouping { expression } => reduce_in(expression, primary, tables),

        Expr::Unary { right, .. } => reduce_in(right, primary, tables),

        Expr::Subscript { target, .. } => {
            let target_type = reduce_in(target, primary, tables)?;
            if target_type.eq_ignore_ascii_case("string") {
                return Ok("Char".to_string());
            }
            if let Expr::Variable { name, .. } = target.as_ref() {
                if let Some(element) = tables.generics.get(&name.lexeme) {
                    return Ok(element.to_string());
                }
            }
            Ok("Any".to_string())
        }

        _ => Ok("Any".to_string()),
    }
}

/// Return types of the built-in functions and container constructors.
fn builtin_type(name: &str) -> Option<&'static str> {
    if name.eq_ignore_ascii_case("Str") || name.eq_ignore_ascii_case("Copy") {
        Some("String")
    } else if name.eq_ignore_ascii_case("Length") {
        Some("Integer")
    } else if name.eq_ignore_ascii_case("List") {
        Some("List")
    } else if name.eq_ignore_ascii_case("Map") {
        Some("Map")
    } else if name.eq_ignore_ascii_case("Array") {
        Some("Array")
    } else if name.eq_ignore_ascii_case("Stack") {
        Some("Stack")
    } else {
        None
    }
}
