//! Structural type checker.
//!
//! Two passes over the program. The first maps every declared name to
//! its type so forward references work. The second walks the tree and
//! verifies assignments, initializers and returns against the declared
//! types, using [`reduce`](crate::reduce::reduce) for static
//! inference. Checking stops at the first error.
//!
//! The checker is permissive by construction. The `Any` type unifies
//! with everything, in both directions, and a name with no recorded
//! type reduces to `Any`.

use paslite_types::ast::*;
use paslite_types::{PasError, Result};

use crate::reduce::{reduce, TypeTables};

/// The type checker. One instance checks one program.
pub struct TypeChecker {
    tables: TypeTables,
    current_function: Option<(FunctionKind, String)>,
}

impl TypeChecker {
    pub fn new() -> Self {
        Self {
            tables: TypeTables::new(),
            current_function: None,
        }
    }

    /// Check a program. Returns the first type error found, if any.
    pub fn check(mut self, statements: &[Stmt]) -> Result<()> {
        for statement in statements {
            self.map_type(statement)?;
        }
        for statement in statements {
            self.check_stmt(statement)?;
        }
        Ok(())
    }

    // ── Pass 1: declaration mapping ──────────────────────────────────

    fn map_type(&mut self, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::Enum { name, members } => {
                for member in members {
                    if self.tables.lookup.get(&member.lexeme).is_some() {
                        return Err(PasError::new(
                            member,
                            &format!("{}already exists!!!", member.lexeme),
                        ));
                    }
                    self.tables.lookup.set(&member.lexeme, &name.lexeme);
                }
            }
            Stmt::Function(decl) => {
                self.tables
                    .lookup
                    .set(&decl.name.lexeme, &decl.return_type.lexeme);
            }
            Stmt::Class(class) => {
                let parent = class
                    .superclass
                    .as_ref()
                    .map(|s| s.name.lexeme.clone())
                    .unwrap_or_else(|| "Any".to_string());
                self.tables.parents.set(&class.name.lexeme, parent);
                self.tables.lookup.set(&class.name.lexeme, &class.name.lexeme);

                for method in &class.methods {
                    self.tables.lookup.set(
                        format!("{}::{}", class.name.lexeme, method.name.lexeme),
                        &method.return_type.lexeme,
                    );
                }
                for field in &class.fields {
                    self.tables.lookup.set(
                        format!("{}::{}", class.name.lexeme, field.name.lexeme),
                        &field.type_name.lexeme,
                    );
                    if let Some(element) = &field.element_type {
                        self.tables.generics.set(&field.name.lexeme, &element.lexeme);
                    }
                }
            }
            Stmt::Var(decl) => {
                self.tables
                    .lookup
                    .set(&decl.name.lexeme, &decl.type_name.lexeme);
                if let Some(element) = &decl.element_type {
                    self.tables.generics.set(&decl.name.lexeme, &element.lexeme);
                }
            }
            _ => {}
        }
        Ok(())
    }

    // ── Pass 2: checking ─────────────────────────────────────────────

    fn check_stmts(&mut self, statements: &[Stmt]) -> Result<()> {
        for statement in statements {
            self.check_stmt(statement)?;
        }
        Ok(())
    }

    fn check_stmt(&mut self, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::Block { statements } => {
                self.tables.lookup.begin_scope();
                let result = self.check_stmts(statements);
                self.tables.lookup.end_scope();
                result
            }
            Stmt::Class(class) => self.check_class(class),
            Stmt::Expression(expr) => self.check_expr(expr),
            Stmt::Function(decl) => self.check_function(decl),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.check_expr(condition)?;
                self.check_stmt(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.check_stmt(else_branch)?;
                }
                Ok(())
            }
            Stmt::Return { keyword, value } => self.check_return(keyword, value.as_ref()),
            Stmt::Var(decl) => self.check_var(decl),
            Stmt::While { condition, body } => {
                self.check_expr(condition)?;
                self.check_stmt(body)
            }
            Stmt::Try {
                body,
                clauses,
                default,
                ..
            } => {
                self.check_stmts(body)?;
                for clause in clauses {
                    self.tables.lookup.begin_scope();
                    self.tables
                        .lookup
                        .set(&clause.var.lexeme, &clause.type_name.lexeme);
                    let result = self.check_stmt(&clause.body);
                    self.tables.lookup.end_scope();
                    result?;
                }
                if let Some(default) = default {
                    self.check_stmts(default)?;
                }
                Ok(())
            }
            Stmt::Print { .. } | Stmt::Raise { .. } | Stmt::Break { .. } | Stmt::Enum { .. } => {
                Ok(())
            }
        }
    }

    fn check_class(&mut self, class: &ClassDecl) -> Result<()> {
        let enclosing = self.tables.current_class.take();
        self.tables.current_class = Some(class.name.lexeme.clone());

        if class.superclass.is_some() {
            self.tables.lookup.begin_scope();
        }
        self.tables.lookup.begin_scope();

        let mut result = Ok(());
        for field in &class.fields {
            self.tables
                .lookup
                .set(&field.name.lexeme, &field.type_name.lexeme);
            if let Some(initializer) = &field.initializer {
                result = self.check_expr(initializer);
                if result.is_err() {
                    break;
                }
            }
        }
        if result.is_ok() {
            for method in &class.methods {
                result = self.check_function(method);
                if result.is_err() {
                    break;
                }
            }
        }

        self.tables.lookup.end_scope();
        if class.superclass.is_some() {
            self.tables.lookup.end_scope();
        }
        self.tables.current_class = enclosing;
        result
    }

    fn check_function(&mut self, decl: &FunctionDecl) -> Result<()> {
        let enclosing = self.current_function.take();
        self.current_function = Some((decl.kind, decl.return_type.lexeme.clone()));

        self.tables.lookup.begin_scope();
        let result = self.check_stmts(&decl.body);
        self.tables.lookup.end_scope();

        self.current_function = enclosing;
        result
    }

    fn check_return(&mut self, keyword: &paslite_types::Token, value: Option<&Expr>) -> Result<()> {
        let Some(value) = value else {
            return Ok(());
        };
        let Some((kind, return_type)) = self.current_function.clone() else {
            return self.check_expr(value);
        };
        if kind == FunctionKind::Procedure {
            return Err(PasError::new(keyword, "Can't return value from procedure."));
        }
        self.check_expr(value)?;

        if return_type.eq_ignore_ascii_case("any") {
            return Ok(());
        }
        let exit_type = reduce(value, &self.tables)?;
        if exit_type.eq_ignore_ascii_case("any") || self.tables.satisfies(&return_type, &exit_type)
        {
            return Ok(());
        }
        Err(PasError::new(keyword, "Type mismatch!"))
    }

    fn check_var(&mut self, decl: &VarDecl) -> Result<()> {
        let declared = &decl.type_name.lexeme;
        let Some(initializer) = &decl.initializer else {
            self.tables.lookup.set(&decl.name.lexeme, declared);
            return Ok(());
        };
        self.check_expr(initializer)?;
        let inferred = reduce(initializer, &self.tables)?;

        if declared.eq_ignore_ascii_case("any") {
            self.tables.inferred.set(&decl.name.lexeme, inferred);
            self.tables.lookup.set(&decl.name.lexeme, declared);
            return Ok(());
        }
        self.tables.lookup.set(&decl.name.lexeme, declared);

        if inferred.eq_ignore_ascii_case("any") || self.tables.satisfies(declared, &inferred) {
            return Ok(());
        }
        Err(PasError::new(&decl.name, "Type mismatch!"))
    }

    fn check_expr(&mut self, expr: &Expr) -> Result<()> {
        match expr {
            Expr::Assign { name, value, .. } => {
                self.check_expr(value)?;
                let Some(declared) = self.tables.lookup.get(&name.lexeme).map(str::to_string)
                else {
                    return Ok(());
                };
                let inferred = reduce(value, &self.tables)?;
                if declared.eq_ignore_ascii_case("any") {
                    self.tables.inferred.set(&name.lexeme, inferred);
                    return Ok(());
                }
                if inferred.eq_ignore_ascii_case("any")
                    || self.tables.satisfies(&declared, &inferred)
                {
                    return Ok(());
                }
                Err(PasError::new(name, "Type mismatch!"))
            }
            Expr::Set {
                object,
                name,
                value,
            } => {
                self.check_expr(value)?;
                self.check_expr(object)?;
                let Some(expected) = self.tables.lookup.get(&name.lexeme).map(str::to_string)
                else {
                    return Ok(());
                };
                if expected.eq_ignore_ascii_case("any") {
                    return Ok(());
                }
                let inferred = reduce(value, &self.tables)?;
                if inferred.eq_ignore_ascii_case("any")
                    || self.tables.satisfies(&expected, &inferred)
                {
                    return Ok(());
                }
                Err(PasError::new(name, "Type mismatch."))
            }
            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.check_expr(left)?;
                self.check_expr(right)
            }
            Expr::Call {
                callee, arguments, ..
            } => {
                self.check_expr(callee)?;
                for argument in arguments {
                    self.check_expr(argument)?;
                }
                Ok(())
            }
            Expr::Get { object, .. } => self.check_expr(object),
            Expr::Grouping { expression } => self.check_expr(expression),
            Expr::Unary { right, .. } => self.check_expr(right),
            Expr::Subscript { target, index, .. } => {
                self.check_expr(target)?;
                self.check_expr(index)
            }
            Expr::ListLiteral { elements, .. } => {
                for element in elements {
                    self.check_expr(element)?;
                }
                Ok(())
            }
            Expr::MapLiteral { keys, values, .. } => {
                for key in keys {
                    self.check_expr(key)?;
                }
                for value in values {
                    self.check_expr(value)?;
                }
                Ok(())
            }
            Expr::Literal { .. } | Expr::Variable { .. } | Expr::This { .. } | Expr::Super { .. } => {
                Ok(())
            }
        }
    }
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}
