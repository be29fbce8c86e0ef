//! AST node definitions shared by the parser, the semantic passes and
//! the interpreter.
//!
//! Nodes are plain data: all semantic logic (scope distances, static
//! type reduction) lives in `paslite-sema`. Expressions that resolve
//! through the scope chain (variables, assignments, `this`, `super`)
//! carry a parser-issued [`ExprId`] so the resolver can record their
//! lexical distance in a side table without mutating the tree.

use crate::token::Token;

// ══════════════════════════════════════════════════════════════════════════════
// Identity
// ══════════════════════════════════════════════════════════════════════════════

/// Identity of a resolvable expression node, unique within one parse.
pub type ExprId = u32;

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

/// A literal value embedded in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum LitValue {
    Nil,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    Str(String),
    Char(char),
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `name := value`
    Assign {
        id: ExprId,
        name: Token,
        value: Box<Expr>,
    },
    /// `left op right` for arithmetic, comparison and equality.
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    /// `callee(arg, ...)` — `paren` is the closing parenthesis, kept
    /// for runtime error positions.
    Call {
        callee: Box<Expr>,
        paren: Token,
        arguments: Vec<Expr>,
    },
    /// `object.name`
    Get {
        object: Box<Expr>,
        name: Token,
    },
    /// `(expression)`
    Grouping {
        expression: Box<Expr>,
    },
    /// A literal.
    Literal {
        value: LitValue,
    },
    /// `left and right` / `left or right` (short-circuit).
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    /// `object.name := value`
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },
    /// `super.method`
    Super {
        id: ExprId,
        keyword: Token,
        method: Token,
    },
    /// `this`
    This {
        id: ExprId,
        keyword: Token,
    },
    /// `not right` / `-right`
    Unary {
        operator: Token,
        right: Box<Expr>,
    },
    /// A name.
    Variable {
        id: ExprId,
        name: Token,
    },
    /// `target[index]` — `bracket` is the opening bracket.
    Subscript {
        target: Box<Expr>,
        bracket: Token,
        index: Box<Expr>,
    },
    /// `[a, b, c]` list display.
    ListLiteral {
        bracket: Token,
        elements: Vec<Expr>,
    },
    /// `[k: v, ...]` map display.
    MapLiteral {
        bracket: Token,
        keys: Vec<Expr>,
        values: Vec<Expr>,
    },
}

// ══════════════════════════════════════════════════════════════════════════════
// Declarations
// ══════════════════════════════════════════════════════════════════════════════

/// A formal parameter: `name: Type`.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Token,
    /// Declared parameter type; `Any` when omitted.
    pub type_name: Token,
}

/// What flavour of routine a [`FunctionDecl`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// `function` — returns a value.
    Function,
    /// `procedure` — no return value.
    Procedure,
    /// `constructor` — a class `Init`.
    Constructor,
    /// `test 'description'` — zero-argument inline test.
    Test,
}

/// A function, procedure, constructor or inline test declaration.
///
/// Inline tests reuse this node: the name token is the description
/// string literal and the parameter list is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Token,
    pub kind: FunctionKind,
    pub params: Vec<Param>,
    /// Declared return type; `Any` for procedures and tests.
    pub return_type: Token,
    pub body: Vec<Stmt>,
}

/// A `var` declaration: `var name: Type [of Elem] [:= init];`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Token,
    /// Declared type; `Any` when omitted.
    pub type_name: Token,
    /// Element type for `List of T` / `Array of T` declarations.
    pub element_type: Option<Token>,
    pub initializer: Option<Expr>,
}

/// Reference to a superclass in a class header, resolved like a
/// variable read.
#[derive(Debug, Clone, PartialEq)]
pub struct SuperclassRef {
    pub id: ExprId,
    pub name: Token,
}

/// `class Name (Super); var ... begin methods end`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: Token,
    pub superclass: Option<SuperclassRef>,
    /// Field declarations from the class `var` section. Initializers
    /// run at construction, before `Init`.
    pub fields: Vec<VarDecl>,
    pub methods: Vec<FunctionDecl>,
}

/// One `on v: Type do stmt` clause of a try/except statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ExceptClause {
    pub var: Token,
    pub type_name: Token,
    pub body: Box<Stmt>,
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `begin ... end`
    Block {
        statements: Vec<Stmt>,
    },
    Class(ClassDecl),
    /// `type Name = (A, B, C);`
    Enum {
        name: Token,
        members: Vec<Token>,
    },
    Expression(Expr),
    Function(FunctionDecl),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    Print {
        keyword: Token,
        expression: Expr,
    },
    /// `exit` / `exit(value)`
    Return {
        keyword: Token,
        value: Option<Expr>,
    },
    Var(VarDecl),
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    Break {
        keyword: Token,
    },
    /// `raise` / `raise expr`
    Raise {
        keyword: Token,
        value: Option<Expr>,
    },
    /// `try ... except on ... do ... [else-style default] end`
    Try {
        keyword: Token,
        body: Vec<Stmt>,
        clauses: Vec<ExceptClause>,
        /// Handler for raises no clause matched.
        default: Option<Vec<Stmt>>,
    },
}

impl Expr {
    /// The token best representing this expression's source position.
    pub fn position(&self) -> Option<&Token> {
        match self {
            Expr::Assign { name, .. } => Some(name),
            Expr::Binary { operator, .. } => Some(operator),
            Expr::Call { paren, .. } => Some(paren),
            Expr::Get { name, .. } => Some(name),
            Expr::Grouping { expression } => expression.position(),
            Expr::Literal { .. } => None,
            Expr::Logical { operator, .. } => Some(operator),
            Expr::Set { name, .. } => Some(name),
            Expr::Super { keyword, .. } => Some(keyword),
            Expr::This { keyword, .. } => Some(keyword),
            Expr::Unary { operator, .. } => Some(operator),
            Expr::Variable { name, .. } => Some(name),
            Expr::Subscript { bracket, .. } => Some(bracket),
            Expr::ListLiteral { bracket, .. } => Some(bracket),
            Expr::MapLiteral { bracket, .. } => Some(bracket),
        }
    }
}
