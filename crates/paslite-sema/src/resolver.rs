//! Lexical scope resolution.
//!
//! One pass over the tree that records, for every variable access,
//! assignment, `this` and `super`, how many environment hops separate
//! the use from the frame that will hold the binding at runtime. Names
//! that resolve to no enclosing scope fall through to the globals and
//! get no entry.

use std::collections::HashMap;

use paslite_types::ast::*;
use paslite_types::{PasError, Token};

/// Side table: resolvable expression → environment distance.
pub type Locals = HashMap<ExprId, usize>;

#[derive(Clone, Copy, PartialEq)]
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

#[derive(Clone, Copy, PartialEq)]
enum ClassType {
    None,
    Class,
    Subclass,
}

/// The resolver.
pub struct Resolver {
    scopes: Vec<HashMap<String, bool>>,
    locals: Locals,
    errors: Vec<PasError>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            scopes: Vec::new(),
            locals: Locals::new(),
            errors: Vec::new(),
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    /// Resolve a whole program, producing the distance table and any
    /// scope errors.
    pub fn resolve(mut self, statements: &[Stmt]) -> (Locals, Vec<PasError>) {
        self.resolve_stmts(statements);
        (self.locals, self.errors)
    }

    fn resolve_stmts(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block { statements } => {
                self.begin_scope();
                self.resolve_stmts(statements);
                self.end_scope();
            }
            Stmt::Class(class) => self.resolve_class(class),
            Stmt::Enum { members, .. } => {
                for member in members {
                    self.declare(member);
                    self.define(member);
                }
            }
            Stmt::Expression(expr) => self.resolve_expr(expr),
            Stmt::Function(decl) => {
                self.declare(&decl.name);
                self.define(&decl.name);
                self.resolve_function(decl, FunctionType::Function);
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(condition);
                self.resolve_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch);
                }
            }
            Stmt::Print { expression, .. } => self.resolve_expr(expression),
            Stmt::Return { keyword, value } => {
                if self.current_function == FunctionType::None {
                    self.error(keyword, "Can't return from top-level code.");
                }
                if let Some(value) = value {
                    if self.current_function == FunctionType::Initializer {
                        self.error(keyword, "Can't return a value from an initializer.");
                    }
                    self.resolve_expr(value);
                }
            }
            Stmt::Var(decl) => {
                self.declare(&decl.name);
                if let Some(initializer) = &decl.initializer {
                    self.resolve_expr(initializer);
                }
                self.define(&decl.name);
            }
            Stmt::While { condition, body } => {
                self.resolve_expr(condition);
                self.resolve_stmt(body);
            }
            Stmt::Break { .. } => {}
            Stmt::Raise { value, .. } => {
                if let Some(value) = value {
                    self.resolve_expr(value);
                }
            }
            Stmt::Try {
                body,
                clauses,
                default,
                ..
            } => {
                self.begin_scope();
                self.resolve_stmts(body);
                self.end_scope();
                for clause in clauses {
                    self.begin_scope();
                    self.declare(&clause.var);
                    self.define(&clause.var);
                    self.resolve_stmt(&clause.body);
                    self.end_scope();
                }
                if let Some(default) = default {
                    self.begin_scope();
                    self.resolve_stmts(default);
                    self.end_scope();
                }
            }
        }
    }

    fn resolve_class(&mut self, class: &ClassDecl) {
        let enclosing_class = self.current_class;
        self.current_class = ClassType::Class;

        self.declare(&class.name);
        self.define(&class.name);

        if let Some(superclass) = &class.superclass {
            if superclass.name.lexeme == class.name.lexeme {
                self.error(&superclass.name, "A class can't inherit from itself.");
            }
            self.current_class = ClassType::Subclass;
            self.resolve_local(superclass.id, &superclass.name);

            self.begin_scope();
            self.scope_define("super");
        }

        self.begin_scope();
        self.scope_define("this");

        // Field initializers run inside the construction frame, which
        // sits directly on the class's declaration environment.
        for field in &class.fields {
            if let Some(initializer) = &field.initializer {
                self.resolve_expr(initializer);
            }
        }

        for method in &class.methods {
            let declaration = if method.name.lexeme == "Init" {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };
            self.resolve_function(method, declaration);
        }

        self.end_scope();

        if class.superclass.is_some() {
            self.end_scope();
        }
        self.current_class = enclosing_class;
    }

    fn resolve_function(&mut self, decl: &FunctionDecl, fn_type: FunctionType) {
        let enclosing = self.current_function;
        self.current_function = fn_type;

        self.begin_scope();
        for param in &decl.params {
            self.declare(&param.name);
            self.define(&param.name);
        }
        self.resolve_stmts(&decl.body);
        self.end_scope();

        self.current_function = enclosing;
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Assign { id, name, value } => {
                self.resolve_expr(value);
                self.resolve_local(*id, name);
            }
            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            Expr::Call {
                callee, arguments, ..
            } => {
                self.resolve_expr(callee);
                for argument in arguments {
                    self.resolve_expr(argument);
                }
            }
            Expr::Get { object, .. } => self.resolve_expr(object),
            Expr::Grouping { expression } => self.resolve_expr(expression),
            Expr::Literal { .. } => {}
            Expr::Set { object, value, .. } => {
                self.resolve_expr(value);
                self.resolve_expr(object);
            }
            Expr::Super { id, keyword, .. } => {
                match self.current_class {
                    ClassType::None => {
                        self.error(keyword, "Can't use 'super' outside of a class.");
                    }
                    ClassType::Class => {
                        self.error(keyword, "Can't use 'super' in a class with no superclass.");
                    }
                    ClassType::Subclass => {}
                }
                self.resolve_local_name(*id, "super");
            }
            Expr::This { id, keyword } => {
                if self.current_class == ClassType::None {
                    self.error(keyword, "Can't use 'this' outside of a class.");
                    return;
                }
                self.resolve_local_name(*id, "this");
            }
            Expr::Unary { right, .. } => self.resolve_expr(right),
            Expr::Variable { id, name } => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&name.lexeme) == Some(&false) {
                        self.error(name, "Can't read local variable in its own initializer.");
                    }
                }
                self.resolve_local(*id, name);
            }
            Expr::Subscript { target, index, .. } => {
                self.resolve_expr(target);
                self.resolve_expr(index);
            }
            Expr::ListLiteral { elements, .. } => {
                for element in elements {
                    self.resolve_expr(element);
                }
            }
            Expr::MapLiteral { keys, values, .. } => {
                for key in keys {
                    self.resolve_expr(key);
                }
                for value in values {
                    self.resolve_expr(value);
                }
            }
        }
    }

    fn resolve_local(&mut self, id: ExprId, name: &Token) {
        let lexeme = name.lexeme.clone();
        self.resolve_local_name(id, &lexeme);
    }

    fn resolve_local_name(&mut self, id: ExprId, name: &str) {
        for (i, scope) in self.scopes.iter().enumerate().rev() {
            if scope.contains_key(name) {
                self.locals.insert(id, self.scopes.len() - 1 - i);
                return;
            }
        }
        // Not found: assumed global.
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }
        let duplicate = self
            .scopes
            .last()
            .is_some_and(|s| s.contains_key(&name.lexeme));
        if duplicate {
            self.error(name, "Already a variable with this name in this scope.");
            return;
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), false);
        }
    }

    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), true);
        }
    }

    fn scope_define(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), true);
        }
    }

    fn error(&mut self, token: &Token, message: &str) {
        self.errors.push(PasError::new(token, message));
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}
