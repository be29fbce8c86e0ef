//! Recursive-descent parser — converts a token stream into statements.
//!
//! Besides the straightforward grammar productions, several constructs
//! are desugared during parsing:
//! - `for init; cond; incr do body` becomes a While statement wrapped
//!   in blocks for the initializer and increment
//! - `case x of a, b: s; ... end` becomes a chain of If statements
//!   whose conditions are `=` comparisons joined with `or`
//! - `test 'description'; begin ... end` becomes a zero-argument
//!   function whose name token is the description string literal
//!
//! Errors are collected and parsing resumes at the next statement
//! boundary, so one bad statement does not hide the rest.

use paslite_types::ast::*;
use paslite_types::{Literal, PasError, Token, TokenKind};

/// Result of parsing: statements plus any errors collected.
pub struct ParseResult {
    pub statements: Vec<Stmt>,
    pub errors: Vec<PasError>,
}

/// The parser.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    errors: Vec<PasError>,
    next_id: ExprId,
}

type Parsed<T> = Result<T, PasError>;

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
            next_id: 0,
        }
    }

    /// Parse the whole token stream.
    pub fn parse(mut self) -> ParseResult {
        let mut statements = Vec::new();

        while !self.at_end() {
            if self.check(TokenKind::Uses) {
                let keyword = self.advance().clone();
                self.errors
                    .push(PasError::new(&keyword, "File includes are not supported."));
                self.synchronize();
            } else if self.check(TokenKind::Test) {
                match self.test_declaration() {
                    Ok(stmt) => statements.push(stmt),
                    Err(err) => {
                        self.errors.push(err);
                        self.synchronize();
                    }
                }
            } else if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        ParseResult {
            statements,
            errors: self.errors,
        }
    }

    fn declaration(&mut self) -> Option<Stmt> {
        let result = if self.matches(TokenKind::Class) {
            self.class_declaration()
        } else if self.matches(TokenKind::Function)
            || self.matches(TokenKind::Procedure)
            || self.matches(TokenKind::Constructor)
        {
            let kind_token = self.previous().clone();
            self.function(&kind_token, "function").map(Stmt::Function)
        } else if self.matches(TokenKind::Var) {
            self.var_declaration()
        } else if self.matches(TokenKind::Type) {
            self.type_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                self.errors.push(err);
                self.synchronize();
                None
            }
        }
    }

    /// `test 'description'; begin ... end`
    fn test_declaration(&mut self) -> Parsed<Stmt> {
        let keyword = self.advance().clone();
        let name = self.consume(TokenKind::Str, "Expect test case name.")?;
        self.consume(TokenKind::Semicolon, "Expect ';'")?;
        self.consume(TokenKind::Begin, "Expect 'begin' before test body.")?;
        let body = self.block()?;

        Ok(Stmt::Function(FunctionDecl {
            name,
            kind: FunctionKind::Test,
            params: Vec::new(),
            return_type: keyword.derived(TokenKind::Identifier, "Any"),
            body,
        }))
    }

    fn class_declaration(&mut self) -> Parsed<Stmt> {
        let name = self.consume(TokenKind::Identifier, "Expect class name.")?;

        let mut superclass = None;
        if self.matches(TokenKind::LeftParen) {
            let super_name = self.consume(TokenKind::Identifier, "Expect superclass name.")?;
            superclass = Some(SuperclassRef {
                id: self.id(),
                name: super_name,
            });
            self.consume(TokenKind::RightParen, "Expect ')' after superclass name.")?;
        }
        self.consume(TokenKind::Semicolon, "Expect ';' after class declaration.")?;

        let mut fields = Vec::new();
        while self.matches(TokenKind::Var) {
            fields.extend(self.variable_section()?);
        }

        self.consume(TokenKind::Begin, "Expect 'begin' before class body.")?;

        let mut methods = Vec::new();
        while !self.check(TokenKind::End) && !self.at_end() {
            if self.matches(TokenKind::Function)
                || self.matches(TokenKind::Procedure)
                || self.matches(TokenKind::Constructor)
            {
                let kind_token = self.previous().clone();
                methods.push(self.function(&kind_token, "method")?);
            } else {
                return Err(self.error(self.peek().clone(), "Expect method declaration."));
            }
        }
        self.consume(TokenKind::End, "Expect 'end' after class body.")?;

        Ok(Stmt::Class(ClassDecl {
            name,
            superclass,
            fields,
            methods,
        }))
    }

    /// `type Name = (A, B, C);`
    fn type_declaration(&mut self) -> Parsed<Stmt> {
        let name = self.consume(TokenKind::Identifier, "Expect enum name.")?;
        self.consume(TokenKind::Equal, "Expect '=' after enum declaration.")?;
        self.consume(TokenKind::LeftParen, "Expect '('")?;

        let mut members = Vec::new();
        loop {
            members.push(self.consume(TokenKind::Identifier, "Expect enum identifier.")?);
            if !self.matches(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::RightParen, "Expect ')'")?;
        self.consume(TokenKind::Semicolon, "Expect ';'")?;

        Ok(Stmt::Enum { name, members })
    }

    fn statement(&mut self) -> Parsed<Stmt> {
        if self.matches(TokenKind::For) {
            return self.for_statement();
        }
        if self.matches(TokenKind::If) {
            return self.if_statement();
        }
        if self.matches(TokenKind::Try) {
            return self.try_statement();
        }
        if self.matches(TokenKind::Case) {
            return self.case_statement();
        }
        if self.matches(TokenKind::Print) {
            return self.print_statement();
        }
        if self.matches(TokenKind::Exit) {
            return self.exit_statement();
        }
        if self.matches(TokenKind::Raise) {
            return self.raise_statement();
        }
        if self.matches(TokenKind::While) {
            return self.while_statement();
        }
        if self.matches(TokenKind::Break) {
            let keyword = self.previous().clone();
            self.consume(TokenKind::Semicolon, "Expect ';' after 'break'.")?;
            return Ok(Stmt::Break { keyword });
        }
        if self.matches(TokenKind::Begin) {
            return Ok(Stmt::Block {
                statements: self.block()?,
            });
        }

        self.expression_statement()
    }

    /// Desugars to While: initializer and increment get wrapping blocks.
    fn for_statement(&mut self) -> Parsed<Stmt> {
        let initializer = if self.matches(TokenKind::Semicolon) {
            None
        } else if self.matches(TokenKind::Var) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(TokenKind::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after loop condition")?;

        let increment = if !self.check(TokenKind::Do) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Do, "Expect 'do' after for clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block {
                statements: vec![body, Stmt::Expression(increment)],
            };
        }

        let condition = condition.unwrap_or(Expr::Literal {
            value: LitValue::Boolean(true),
        });
        body = Stmt::While {
            condition,
            body: Box::new(body),
        };

        if let Some(initializer) = initializer {
            body = Stmt::Block {
                statements: vec![initializer, body],
            };
        }
        Ok(body)
    }

    fn if_statement(&mut self) -> Parsed<Stmt> {
        let condition = self.expression()?;
        self.consume(TokenKind::Then, "Expect 'then' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.matches(TokenKind::Else) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    /// `try stmts except on v: T do stmt ... default-stmts end`
    fn try_statement(&mut self) -> Parsed<Stmt> {
        let keyword = self.previous().clone();

        let mut body = Vec::new();
        while !self.check(TokenKind::Except) && !self.at_end() {
            body.push(self.statement()?);
        }
        self.consume(TokenKind::Except, "Expect 'except' after try block.")?;

        let mut clauses = Vec::new();
        while self.check_identifier("on") {
            self.advance();
            let var = self.consume(TokenKind::Identifier, "Expect variable name.")?;
            let type_name = if self.matches(TokenKind::Colon) {
                self.consume(TokenKind::Identifier, "Expect type.")?
            } else {
                var.derived(TokenKind::Identifier, "Any")
            };
            self.consume(TokenKind::Do, "Expect 'do'.")?;
            let body = Box::new(self.statement()?);
            clauses.push(ExceptClause {
                var,
                type_name,
                body,
            });
        }

        let mut default_stmts = Vec::new();
        while !self.check(TokenKind::End) && !self.at_end() {
            default_stmts.push(self.statement()?);
        }
        self.consume(TokenKind::End, "Expect 'end' after except block.")?;

        let default = if default_stmts.is_empty() {
            None
        } else {
            Some(default_stmts)
        };

        Ok(Stmt::Try {
            keyword,
            body,
            clauses,
            default,
        })
    }

    /// Desugars to a chain of If statements.
    fn case_statement(&mut self) -> Parsed<Stmt> {
        let subject = self.expression()?;
        self.consume(TokenKind::Of, "Expect 'of' after case condition.")?;

        let mut arms: Vec<(Expr, Stmt)> = Vec::new();
        let mut else_arm = None;

        loop {
            let right = self.expression()?;
            let eq = self.previous().derived(TokenKind::Equal, "=");
            let mut condition = Expr::Binary {
                left: Box::new(subject.clone()),
                operator: eq,
                right: Box::new(right),
            };

            while self.matches(TokenKind::Comma) {
                let right = self.expression()?;
                let eq = self.previous().derived(TokenKind::Equal, "=");
                let additional = Expr::Binary {
                    left: Box::new(subject.clone()),
                    operator: eq,
                    right: Box::new(right),
                };
                let or = self.previous().derived(TokenKind::Or, "or");
                condition = Expr::Logical {
                    left: Box::new(condition),
                    operator: or,
                    right: Box::new(additional),
                };
            }

            self.consume(TokenKind::Colon, "Expect ':' after condition.")?;
            let stmt = self.statement()?;
            arms.push((condition, stmt));

            if self.matches(TokenKind::Else) {
                else_arm = Some(self.statement()?);
                self.consume(TokenKind::End, "Expect 'end'.")?;
                break;
            }
            if self.matches(TokenKind::End) {
                break;
            }
        }

        // Fold arms into nested If statements, last arm innermost.
        let mut result = else_arm;
        for (condition, stmt) in arms.into_iter().rev() {
            result = Some(Stmt::If {
                condition,
                then_branch: Box::new(stmt),
                else_branch: result.map(Box::new),
            });
        }

        // At least one arm was parsed above.
        result.ok_or_else(|| {
            PasError::new(self.previous(), "Expect at least one case arm.")
        })
    }

    fn print_statement(&mut self) -> Parsed<Stmt> {
        let keyword = self.previous().clone();
        let expression = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print {
            keyword,
            expression,
        })
    }

    fn exit_statement(&mut self) -> Parsed<Stmt> {
        let keyword = self.previous().clone();
        let value = if !self.check(TokenKind::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after exit value.")?;
        Ok(Stmt::Return { keyword, value })
    }

    fn raise_statement(&mut self) -> Parsed<Stmt> {
        let keyword = self.previous().clone();
        let value = if !self.check(TokenKind::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after raise value.")?;
        Ok(Stmt::Raise { keyword, value })
    }

    /// Statement-level `var name [: Type [of Elem]] [:= init];`
    fn var_declaration(&mut self) -> Parsed<Stmt> {
        let name = self.consume(TokenKind::Identifier, "Expect variable name.")?;
        let (type_name, element_type) = self.type_annotation(&name)?;

        let initializer = if self.matches(TokenKind::Assign) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after variable declaration.")?;

        Ok(Stmt::Var(VarDecl {
            name,
            type_name,
            element_type,
            initializer,
        }))
    }

    /// `: Type [of Elem]`, defaulting to `Any` when absent.
    fn type_annotation(&mut self, at: &Token) -> Parsed<(Token, Option<Token>)> {
        if self.matches(TokenKind::Colon) {
            let type_name = self.consume(TokenKind::Identifier, "Expect type.")?;
            let element_type = if self.matches(TokenKind::Of) {
                Some(self.consume(TokenKind::Identifier, "Expect element type.")?)
            } else {
                None
            };
            Ok((type_name, element_type))
        } else {
            Ok((at.derived(TokenKind::Identifier, "Any"), None))
        }
    }

    fn while_statement(&mut self) -> Parsed<Stmt> {
        let condition = self.expression()?;
        self.consume(TokenKind::Do, "Expect 'do' after condition.")?;
        let body = Box::new(self.statement()?);
        Ok(Stmt::While { condition, body })
    }

    fn expression_statement(&mut self) -> Parsed<Stmt> {
        let value = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Expression(value))
    }

    fn function(&mut self, kind_token: &Token, kind: &str) -> Parsed<FunctionDecl> {
        let name = self.consume(TokenKind::Identifier, &format!("Expect {kind} name."))?;

        let mut params = Vec::new();
        if self.matches(TokenKind::LeftParen) {
            if !self.check(TokenKind::RightParen) {
                loop {
                    if params.len() >= 255 {
                        return Err(self
                            .error(self.peek().clone(), "Can't have more than 255 parameters."));
                    }
                    let param_name =
                        self.consume(TokenKind::Identifier, "Expect parameter name.")?;
                    let type_name = if self.matches(TokenKind::Colon) {
                        self.consume(TokenKind::Identifier, "Expect type.")?
                    } else {
                        param_name.derived(TokenKind::Identifier, "Any")
                    };
                    params.push(Param {
                        name: param_name,
                        type_name,
                    });
                    if !self.matches(TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.consume(TokenKind::RightParen, "Expect ')' after parameters.")?;
        }

        let fn_kind = match kind_token.kind {
            TokenKind::Procedure => FunctionKind::Procedure,
            TokenKind::Constructor => FunctionKind::Constructor,
            _ => FunctionKind::Function,
        };

        let mut return_type = name.derived(TokenKind::Identifier, "Any");
        if self.matches(TokenKind::Colon) {
            if fn_kind == FunctionKind::Procedure {
                return Err(
                    self.error(self.peek().clone(), "Procedures cannot have return type.")
                );
            }
            return_type = self.consume(TokenKind::Identifier, "Expect type.")?;
        }

        self.consume(TokenKind::Semicolon, "Expect ';'")?;

        let mut body = Vec::new();
        loop {
            if self.matches(TokenKind::Var) {
                for decl in self.variable_section()? {
                    body.push(Stmt::Var(decl));
                }
            } else if self.matches(TokenKind::Type) {
                body.push(self.type_declaration()?);
            } else {
                break;
            }
        }

        self.consume(
            TokenKind::Begin,
            &format!("Expect 'begin' before {kind} body."),
        )?;
        body.extend(self.block()?);

        Ok(FunctionDecl {
            name,
            kind: fn_kind,
            params,
            return_type,
            body,
        })
    }

    /// One `var` section: comma-grouped names sharing a type and
    /// initializer, repeated until the next section starts.
    fn variable_section(&mut self) -> Parsed<Vec<VarDecl>> {
        let mut decls = Vec::new();

        while !self.next_section() {
            let mut names = vec![self.consume(TokenKind::Identifier, "Expect variable name.")?];
            while self.matches(TokenKind::Comma) {
                names.push(self.consume(TokenKind::Identifier, "Expect variable name.")?);
            }

            let (type_name, element_type) = self.type_annotation(&names[0])?;

            let initializer = if self.matches(TokenKind::Assign) {
                Some(self.expression()?)
            } else {
                None
            };
            self.consume(TokenKind::Semicolon, "Expect ';' after variable declaration.")?;

            for name in names {
                decls.push(VarDecl {
                    name,
                    type_name: type_name.clone(),
                    element_type: element_type.clone(),
                    initializer: initializer.clone(),
                });
            }
        }

        Ok(decls)
    }

    fn next_section(&self) -> bool {
        self.check(TokenKind::Begin)
            || self.check(TokenKind::Type)
            || self.check(TokenKind::Var)
            || self.at_end()
    }

    fn block(&mut self) -> Parsed<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::End) && !self.at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.consume(TokenKind::End, "Expect 'end' after block.")?;
        Ok(statements)
    }

    // ─────────────────────────────────────────────────────────────
    // Expressions
    // ─────────────────────────────────────────────────────────────

    fn expression(&mut self) -> Parsed<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> Parsed<Expr> {
        let expr = self.or()?;

        if self.matches(TokenKind::Assign) {
            let equals = self.previous().clone();
            let value = Box::new(self.assignment()?);

            return match expr {
                Expr::Variable { name, .. } => Ok(Expr::Assign {
                    id: self.id(),
                    name,
                    value,
                }),
                Expr::Get { object, name } => Ok(Expr::Set {
                    object,
                    name,
                    value,
                }),
                _ => Err(self.error(equals, "Invalid assignment target.")),
            };
        }

        Ok(expr)
    }

    fn or(&mut self) -> Parsed<Expr> {
        let mut expr = self.and()?;

        while self.matches(TokenKind::Or) {
            let operator = self.previous().clone();
            let right = self.and()?;
            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn and(&mut self) -> Parsed<Expr> {
        let mut expr = self.equality()?;

        while self.matches(TokenKind::And) {
            let operator = self.previous().clone();
            let right = self.equality()?;
            expr = Expr::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn equality(&mut self) -> Parsed<Expr> {
        let mut expr = self.comparison()?;

        while self.matches(TokenKind::NotEqual) || self.matches(TokenKind::Equal) {
            let operator = self.previous().clone();
            let right = self.comparison()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Parsed<Expr> {
        let mut expr = self.term()?;

        while self.matches(TokenKind::Greater)
            || self.matches(TokenKind::GreaterEqual)
            || self.matches(TokenKind::Less)
            || self.matches(TokenKind::LessEqual)
        {
            let operator = self.previous().clone();
            let right = self.term()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn term(&mut self) -> Parsed<Expr> {
        let mut expr = self.factor()?;

        while self.matches(TokenKind::Minus) || self.matches(TokenKind::Plus) {
            let operator = self.previous().clone();
            let right = self.factor()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Parsed<Expr> {
        let mut expr = self.unary()?;

        while self.matches(TokenKind::Slash) || self.matches(TokenKind::Star) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Parsed<Expr> {
        if self.matches(TokenKind::Not) || self.matches(TokenKind::Minus) {
            let operator = self.previous().clone();
            let right = Box::new(self.unary()?);
            return Ok(Expr::Unary { operator, right });
        }
        self.call()
    }

    fn call(&mut self) -> Parsed<Expr> {
        let mut expr = self.primary()?;

        loop {
            if self.matches(TokenKind::LeftParen) {
                expr = self.finish_call(expr)?;
            } else if self.matches(TokenKind::LeftBracket) {
                let bracket = self.previous().clone();
                let index = Box::new(self.expression()?);
                self.consume(TokenKind::RightBracket, "Expect ']' after subscript.")?;
                expr = Expr::Subscript {
                    target: Box::new(expr),
                    bracket,
                    index,
                };
            } else if self.matches(TokenKind::Dot) {
                let name =
                    self.consume(TokenKind::Identifier, "Expect property name after '.'.")?;
                expr = Expr::Get {
                    object: Box::new(expr),
                    name,
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> Parsed<Expr> {
        let mut arguments = Vec::new();

        if !self.check(TokenKind::RightParen) {
            loop {
                if arguments.len() >= 255 {
                    return Err(
                        self.error(self.peek().clone(), "Can't have more than 255 arguments.")
                    );
                }
                arguments.push(self.expression()?);
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }

        let paren = self.consume(TokenKind::RightParen, "Expect ')' after arguments.")?;

        Ok(Expr::Call {
            callee: Box::new(callee),
            paren,
            arguments,
        })
    }

    fn primary(&mut self) -> Parsed<Expr> {
        if self.matches(TokenKind::False) {
            return Ok(Expr::Literal {
                value: LitValue::Boolean(false),
            });
        }
        if self.matches(TokenKind::True) {
            return Ok(Expr::Literal {
                value: LitValue::Boolean(true),
            });
        }
        if self.matches(TokenKind::Nil) {
            return Ok(Expr::Literal {
                value: LitValue::Nil,
            });
        }

        if self.matches(TokenKind::Integer)
            || self.matches(TokenKind::Number)
            || self.matches(TokenKind::Str)
            || self.matches(TokenKind::Char)
        {
            let value = match self.previous().literal.clone() {
                Some(Literal::Integer(n)) => LitValue::Integer(n),
                Some(Literal::Number(n)) => LitValue::Double(n),
                Some(Literal::Str(s)) => LitValue::Str(s),
                Some(Literal::Char(c)) => LitValue::Char(c),
                None => LitValue::Nil,
            };
            return Ok(Expr::Literal { value });
        }

        if self.matches(TokenKind::Super) {
            let keyword = self.previous().clone();
            self.consume(TokenKind::Dot, "Expect '.' after 'super'.")?;
            let method =
                self.consume(TokenKind::Identifier, "Expect superclass method name.")?;
            return Ok(Expr::Super {
                id: self.id(),
                keyword,
                method,
            });
        }

        if self.matches(TokenKind::This) {
            return Ok(Expr::This {
                id: self.id(),
                keyword: self.previous().clone(),
            });
        }

        if self.matches(TokenKind::Identifier) {
            return Ok(Expr::Variable {
                id: self.id(),
                name: self.previous().clone(),
            });
        }

        if self.matches(TokenKind::LeftBracket) {
            return self.collection_literal();
        }

        if self.matches(TokenKind::LeftParen) {
            let expression = Box::new(self.expression()?);
            self.consume(TokenKind::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping { expression });
        }

        Err(self.error(self.peek().clone(), "Expect expression."))
    }

    /// `[a, b, c]` list display or `[k: v, ...]` map display.
    fn collection_literal(&mut self) -> Parsed<Expr> {
        let bracket = self.previous().clone();

        if self.matches(TokenKind::RightBracket) {
            return Ok(Expr::ListLiteral {
                bracket,
                elements: Vec::new(),
            });
        }

        let first = self.expression()?;

        if self.matches(TokenKind::Colon) {
            let mut keys = vec![first];
            let mut values = vec![self.expression()?];
            while self.matches(TokenKind::Comma) {
                keys.push(self.expression()?);
                self.consume(TokenKind::Colon, "Expect ':' after key.")?;
                values.push(self.expression()?);
            }
            self.consume(TokenKind::RightBracket, "Expect ']' after map.")?;
            return Ok(Expr::MapLiteral {
                bracket,
                keys,
                values,
            });
        }

        let mut elements = vec![first];
        while self.matches(TokenKind::Comma) {
            elements.push(self.expression()?);
        }
        self.consume(TokenKind::RightBracket, "Expect ']' after list.")?;
        Ok(Expr::ListLiteral { bracket, elements })
    }

    // ─────────────────────────────────────────────────────────────
    // Token-stream helpers
    // ─────────────────────────────────────────────────────────────

    fn id(&mut self) -> ExprId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }
        false
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Parsed<Token> {
        if self.check(kind) {
            return Ok(self.advance().clone());
        }
        Err(self.error(self.peek().clone(), message))
    }

    fn error(&mut self, token: Token, message: &str) -> PasError {
        PasError::new(&token, message)
    }

    fn synchronize(&mut self) {
        self.advance();
        while !self.at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            match self.peek().kind {
                TokenKind::Class
                | TokenKind::For
                | TokenKind::Function
                | TokenKind::Procedure
                | TokenKind::If
                | TokenKind::Print
                | TokenKind::Exit
                | TokenKind::Var
                | TokenKind::While => return,
                _ => {}
            }
            self.advance();
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.at_end() && self.peek().kind == kind
    }

    fn check_identifier(&self, lexeme: &str) -> bool {
        !self.at_end()
            && self.peek().kind == TokenKind::Identifier
            && self.peek().lexeme.eq_ignore_ascii_case(lexeme)
    }

    fn advance(&mut self) -> &Token {
        if !self.at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }
}
