//! The tree-walking evaluator.
//!
//! Executes resolved statements against a chain of environments.
//! Function calls dispatch on the runtime types of the arguments, so
//! several declarations may share a name with different signatures.
//! Inside a method, a bare name that resolves nowhere falls back to a
//! property of `this`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use paslite_types::ast::*;
use paslite_types::{Token, TokenKind};

use paslite_sema::Locals;

use crate::env::{EnvRef, Environment};
use crate::error::{EvalResult, RuntimeError, Unwind};
use crate::native;
use crate::object::{Class, Function, Instance};
use crate::value::{EnumValue, MapKey, Value};

pub struct Interpreter {
    pub globals: EnvRef,
    environment: EnvRef,
    locals: Locals,
    output: Option<Rc<RefCell<String>>>,
}

impl Interpreter {
    pub fn new(locals: Locals) -> Self {
        let globals = Environment::new();
        native::install(&globals);
        Self {
            environment: Rc::clone(&globals),
            globals,
            locals,
            output: None,
        }
    }

    /// Redirect `Write`/`WriteLn`/`Print` output into a buffer and
    /// return it. Used by the test runner and the test suite.
    pub fn capture_output(&mut self) -> Rc<RefCell<String>> {
        let buffer = Rc::new(RefCell::new(String::new()));
        self.output = Some(Rc::clone(&buffer));
        buffer
    }

    pub fn write(&mut self, text: &str) {
        match &self.output {
            Some(buffer) => buffer.borrow_mut().push_str(text),
            None => print!("{text}"),
        }
    }

    pub fn write_line(&mut self, text: &str) {
        self.write(text);
        self.write("\n");
    }

    /// Run a program. The first runtime fault stops execution.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {}
                Err(Unwind::Error(error)) => return Err(error),
                // Break or Return escaping to the top just stops.
                Err(_) => return Ok(()),
            }
        }
        Ok(())
    }

    // ── Statements ───────────────────────────────────────────────────

    pub(crate) fn execute(&mut self, stmt: &Stmt) -> EvalResult<()> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(())
            }
            Stmt::Print { expression, .. } => {
                let value = self.evaluate(expression)?;
                let text = value.stringify();
                self.write_line(&text);
                Ok(())
            }
            Stmt::Var(decl) => {
                let value = match &decl.initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Value::Nil,
                };
                self.environment
                    .borrow_mut()
                    .define(&decl.name.lexeme, value)
                    .map_err(|message| RuntimeError::new(&decl.name, message))?;
                Ok(())
            }
            Stmt::Block { statements } => {
                let env = Environment::with_enclosing(Rc::clone(&self.environment));
                self.execute_block(statements, env)
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    match self.execute(body) {
                        Err(Unwind::Break) => break,
                        other => other?,
                    }
                }
                Ok(())
            }
            Stmt::Break { .. } => Err(Unwind::Break),
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(value) => self.evaluate(value)?,
                    None => Value::Nil,
                };
                Err(Unwind::Return(value))
            }
            Stmt::Function(decl) => self.define_function(decl),
            Stmt::Class(decl) => self.execute_class(decl),
            Stmt::Enum { name, members } => {
                for (ordinal, member) in members.iter().enumerate() {
                    let value = Value::Enum(Rc::new(EnumValue {
                        enum_name: name.lexeme.clone(),
                        name: member.lexeme.clone(),
                        ordinal: ordinal as i64,
                    }));
                    self.environment
                        .borrow_mut()
                        .define(&member.lexeme, value)
                        .map_err(|message| RuntimeError::new(member, message))?;
                }
                Ok(())
            }
            Stmt::Raise { keyword, value } => {
                let payload = match value {
                    Some(value) => Some(self.evaluate(value)?),
                    None => None,
                };
                let message = payload
                    .as_ref()
                    .map(Value::stringify)
                    .unwrap_or_else(|| "nil".to_string());
                let mut error = RuntimeError::new(keyword, message);
                error.value = payload;
                Err(error.into())
            }
            Stmt::Try {
                body,
                clauses,
                default,
                ..
            } => {
                let env = Environment::with_enclosing(Rc::clone(&self.environment));
                match self.execute_block(body, env) {
                    Err(Unwind::Error(error)) => {
                        self.handle_except(error, clauses, default.as_deref())
                    }
                    other => other,
                }
            }
        }
    }

    pub fn execute_block(&mut self, statements: &[Stmt], env: EnvRef) -> EvalResult<()> {
        let previous = std::mem::replace(&mut self.environment, env);
        let mut result = Ok(());
        for statement in statements {
            result = self.execute(statement);
            if result.is_err() {
                break;
            }
        }
        self.environment = previous;
        result
    }

    fn define_function(&mut self, decl: &FunctionDecl) -> EvalResult<()> {
        let function = Function::new(
            Rc::new(decl.clone()),
            Rc::clone(&self.environment),
            false,
        );
        let existing = self.environment.borrow().get_local(&decl.name.lexeme);
        match existing {
            // Same name again in the same frame: a new overload.
            Some(Value::Function(first)) => {
                first.overloads.borrow_mut().push(function);
                Ok(())
            }
            Some(_) => Err(RuntimeError::new(
                &decl.name,
                format!("Redefined: {}", decl.name.lexeme),
            )
            .into()),
            None => {
                self.environment
                    .borrow_mut()
                    .define(&decl.name.lexeme, Value::Function(function))
                    .map_err(|message| RuntimeError::new(&decl.name, message))?;
                Ok(())
            }
        }
    }

    fn execute_class(&mut self, decl: &ClassDecl) -> EvalResult<()> {
        self.environment
            .borrow_mut()
            .define(&decl.name.lexeme, Value::Nil)
            .map_err(|message| RuntimeError::new(&decl.name, message))?;

        let superclass = match &decl.superclass {
            Some(superclass) => match self.lookup_variable(superclass.id, &superclass.name)? {
                Value::Class(class) => Some(class),
                _ => {
                    return Err(RuntimeError::new(
                        &superclass.name,
                        "Superclass must be a class.",
                    )
                    .into())
                }
            },
            None => None,
        };

        // With a superclass the methods close over an extra frame
        // holding `super`.
        let class_env = match &superclass {
            Some(superclass) => {
                let env = Environment::with_enclosing(Rc::clone(&self.environment));
                let _ = env
                    .borrow_mut()
                    .define("super", Value::Class(Rc::clone(superclass)));
                env
            }
            None => Rc::clone(&self.environment),
        };

        let mut methods: HashMap<String, Rc<Function>> = HashMap::new();
        for method in &decl.methods {
            let is_initializer = method.name.lexeme == "Init";
            let function = Function::new(
                Rc::new(method.clone()),
                Rc::clone(&class_env),
                is_initializer,
            );
            match methods.get(&method.name.lexeme) {
                Some(first) => first.overloads.borrow_mut().push(function),
                None => {
                    methods.insert(method.name.lexeme.clone(), function);
                }
            }
        }

        let class = Rc::new(Class {
            name: decl.name.lexeme.clone(),
            superclass,
            methods,
            fields: decl.fields.clone(),
            closure: class_env,
        });
        self.environment
            .borrow_mut()
            .assign(&decl.name.lexeme, Value::Class(class));
        Ok(())
    }

    fn handle_except(
        &mut self,
        error: RuntimeError,
        clauses: &[ExceptClause],
        default: Option<&[Stmt]>,
    ) -> EvalResult<()> {
        let tag = error
            .value
            .as_ref()
            .map(Value::type_tag)
            .unwrap_or_else(|| "Any".to_string());

        for clause in clauses {
            if !clause_matches(&clause.type_name.lexeme, &tag, error.value.as_ref()) {
                continue;
            }
            let payload = error
                .value
                .clone()
                .unwrap_or_else(|| Value::Str(error.message.clone()));
            let env = Environment::with_enclosing(Rc::clone(&self.environment));
            env.borrow_mut()
                .define(&clause.var.lexeme, payload)
                .map_err(|message| RuntimeError::new(&clause.var, message))?;
            return self.execute_block(std::slice::from_ref(clause.body.as_ref()), env);
        }

        if let Some(default) = default {
            let env = Environment::with_enclosing(Rc::clone(&self.environment));
            return self.execute_block(default, env);
        }
        Err(error.into())
    }

    // ── Expressions ──────────────────────────────────────────────────

    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value } => Ok(match value {
                LitValue::Nil => Value::Nil,
                LitValue::Boolean(b) => Value::Boolean(*b),
                LitValue::Integer(n) => Value::Integer(*n),
                LitValue::Double(d) => Value::Double(*d),
                LitValue::Str(s) => Value::Str(s.clone()),
                LitValue::Char(c) => Value::Char(*c),
            }),
            Expr::Grouping { expression } => self.evaluate(expression),
            Expr::Unary { operator, right } => {
                let right = self.evaluate(right)?;
                match operator.kind {
                    TokenKind::Minus => match right {
                        Value::Integer(n) => Ok(Value::Integer(n.wrapping_neg())),
                        Value::Double(d) => Ok(Value::Double(-d)),
                        _ => Err(RuntimeError::new(operator, "Operand must be a number.").into()),
                    },
                    _ => Ok(Value::Boolean(!right.is_truthy())),
                }
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                binary_op(operator, left, right).map_err(Unwind::from)
            }
            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                if operator.kind == TokenKind::Or {
                    if left.is_truthy() {
                        return Ok(left);
                    }
                } else if !left.is_truthy() {
                    return Ok(left);
                }
                self.evaluate(right)
            }
            Expr::Variable { id, name } => match self.lookup_variable(*id, name) {
                Ok(value) => Ok(value),
                Err(error) => match self.implicit_this_get(name) {
                    Some(value) => Ok(value),
                    None => Err(error.into()),
                },
            },
            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;
                if let Some(&distance) = self.locals.get(id) {
                    Environment::assign_at(&self.environment, distance, &name.lexeme, value.clone());
                    return Ok(value);
                }
                if self.globals.borrow_mut().assign(&name.lexeme, value.clone()) {
                    return Ok(value);
                }
                // Unqualified field assignment inside a method.
                if let Some(Value::Instance(instance)) = self.environment.borrow().get("this") {
                    instance.set(&name.lexeme, value.clone());
                    return Ok(value);
                }
                Err(RuntimeError::new(
                    name,
                    format!("Undefined variable '{}'.", name.lexeme),
                )
                .into())
            }
            Expr::Call {
                callee,
                paren,
                arguments,
            } => self.evaluate_call(callee, paren, arguments),
            Expr::Get { object, name } => {
                let object = self.evaluate(object)?;
                match &object {
                    Value::Instance(instance) => Instance::get(instance, &name.lexeme).ok_or_else(|| {
                        RuntimeError::new(
                            name,
                            format!("Undefined property '{}'.", name.lexeme),
                        )
                        .into()
                    }),
                    Value::List(_) | Value::Array(_) | Value::Stack(_) | Value::Map(_) => {
                        native::container_member(&object, name).map_err(Unwind::from)
                    }
                    _ => Err(RuntimeError::new(name, "Only instances have properties.").into()),
                }
            }
            Expr::Set {
                object,
                name,
                value,
            } => {
                let object = self.evaluate(object)?;
                match &object {
                    Value::Instance(instance) => {
                        let instance = Rc::clone(instance);
                        let value = self.evaluate(value)?;
                        instance.set(&name.lexeme, value.clone());
                        Ok(value)
                    }
                    Value::List(_) | Value::Array(_) | Value::Stack(_) | Value::Map(_) => {
                        Err(native::container_set_error(&object, name).into())
                    }
                    _ => Err(RuntimeError::new(name, "Only instances have fields.").into()),
                }
            }
            Expr::This { id, keyword } => {
                self.lookup_variable(*id, keyword).map_err(Unwind::from)
            }
            Expr::Super {
                id,
                keyword,
                method,
            } => {
                let distance = self.locals.get(id).copied().unwrap_or(0);
                let superclass = match Environment::get_at(&self.environment, distance, "super") {
                    Some(Value::Class(class)) => class,
                    _ => {
                        return Err(RuntimeError::new(
                            keyword,
                            "Can't use 'super' outside of a class.",
                        )
                        .into())
                    }
                };
                let instance = match Environment::get_at(
                    &self.environment,
                    distance.saturating_sub(1),
                    "this",
                ) {
                    Some(Value::Instance(instance)) => instance,
                    _ => {
                        return Err(RuntimeError::new(
                            keyword,
                            "Can't use 'super' outside of a class.",
                        )
                        .into())
                    }
                };
                match superclass.find_method(&method.lexeme) {
                    Some(found) => Ok(Value::Function(found.bind(instance))),
                    None => Err(RuntimeError::new(
                        method,
                        format!("Undefined property '{}'.", method.lexeme),
                    )
                    .into()),
                }
            }
            Expr::Subscript {
                target,
                bracket,
                index,
            } => {
                let target = self.evaluate(target)?;
                let index = match self.evaluate(index)? {
                    Value::Integer(n) => n,
                    _ => {
                        return Err(RuntimeError::new(
                            bracket,
                            "Subscript index must be an integer.",
                        )
                        .into())
                    }
                };
                self.subscript(&target, bracket, index).map_err(Unwind::from)
            }
            Expr::ListLiteral { elements, .. } => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.evaluate(element)?);
                }
                Ok(Value::List(Rc::new(RefCell::new(items))))
            }
            Expr::MapLiteral {
                bracket,
                keys,
                values,
            } => {
                let mut entries = HashMap::new();
                for (key, value) in keys.iter().zip(values) {
                    let key = self.evaluate(key)?;
                    let key = MapKey::from_value(&key).ok_or_else(|| {
                        RuntimeError::new(
                            bracket,
                            "Map key must be a string, integer, char or boolean.",
                        )
                    })?;
                    let value = self.evaluate(value)?;
                    entries.insert(key, value);
                }
                Ok(Value::Map(Rc::new(RefCell::new(entries))))
            }
        }
    }

    fn subscript(
        &self,
        target: &Value,
        bracket: &Token,
        index: i64,
    ) -> Result<Value, RuntimeError> {
        let out_of_range = || RuntimeError::new(bracket, "Subscript out of range.");
        if index < 0 {
            return match target {
                Value::Str(_) | Value::List(_) | Value::Array(_) => Err(out_of_range()),
                _ => Err(RuntimeError::new(
                    bracket,
                    "Subscript target should be an ordinal.",
                )),
            };
        }
        match target {
            Value::Str(text) => text
                .chars()
                .nth(index as usize)
                .map(Value::Char)
                .ok_or_else(out_of_range),
            Value::List(items) | Value::Array(items) => items
                .borrow()
                .get(index as usize)
                .cloned()
                .ok_or_else(out_of_range),
            _ => Err(RuntimeError::new(
                bracket,
                "Subscript target should be an ordinal.",
            )),
        }
    }

    // ── Calls and dispatch ───────────────────────────────────────────

    fn evaluate_call(
        &mut self,
        callee: &Expr,
        paren: &Token,
        arguments: &[Expr],
    ) -> EvalResult<Value> {
        // A bare-name callee gets the implicit-this fallback too, so a
        // method can call a sibling method without qualifying it.
        let callee_value = match callee {
            Expr::Variable { id, name } => match self.lookup_variable(*id, name) {
                Ok(value) => value,
                Err(error) => match self.implicit_this_get(name) {
                    Some(value) => value,
                    None => return Err(error.into()),
                },
            },
            _ => self.evaluate(callee)?,
        };

        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(self.evaluate(argument)?);
        }
        let types: Vec<String> = args.iter().map(Value::type_tag).collect();

        match callee_value {
            Value::Function(function) => {
                let Some(chosen) = self.dispatch(&function, &types) else {
                    return Err(RuntimeError::new(
                        paren,
                        "No matching signature for function.",
                    )
                    .into());
                };
                if args.len() != chosen.arity() {
                    return Err(RuntimeError::new(
                        paren,
                        format!(
                            "Expected {} arguments but got {}.",
                            chosen.arity(),
                            args.len()
                        ),
                    )
                    .into());
                }
                self.call_function(&chosen, args)
            }
            Value::Native(native) => {
                if args.len() != native.arity {
                    return Err(RuntimeError::new(
                        paren,
                        format!(
                            "Expected {} arguments but got {}.",
                            native.arity,
                            args.len()
                        ),
                    )
                    .into());
                }
                native.call(self, paren, args).map_err(Unwind::from)
            }
            Value::Class(class) => self.instantiate(&class, paren, args, &types),
            _ => Err(RuntimeError::new(paren, "Can only call functions and classes.").into()),
        }
    }

    /// Find the signature for a call. In order: the resolved function
    /// and its overloads, methods of the bound instance, functions of
    /// the same name in enclosing environments, then the globals.
    fn dispatch(&self, function: &Rc<Function>, types: &[String]) -> Option<Rc<Function>> {
        if let Some(matched) = Function::matches(function, types) {
            return Some(matched);
        }
        let name = &function.declaration.name.lexeme;
        if let Some(parent) = function.parent() {
            if let Some(method) = parent.class.find_method(name) {
                if let Some(matched) = Function::matches(&method, types) {
                    return Some(matched.bind(Rc::clone(&parent)));
                }
            }
        }
        if let Some(matched) = self.environment.borrow().find_function(name, types) {
            return Some(matched);
        }
        self.globals.borrow().find_function(name, types)
    }

    pub fn call_function(
        &mut self,
        function: &Rc<Function>,
        arguments: Vec<Value>,
    ) -> EvalResult<Value> {
        let env = Environment::with_enclosing(Rc::clone(&function.closure));
        for (param, value) in function.declaration.params.iter().zip(arguments) {
            env.borrow_mut()
                .define(&param.name.lexeme, value)
                .map_err(|message| RuntimeError::new(&param.name, message))?;
        }
        match self.execute_block(&function.declaration.body, env) {
            Ok(()) => Ok(if function.is_initializer {
                function.this_value()
            } else {
                Value::Nil
            }),
            Err(Unwind::Return(value)) => Ok(if function.is_initializer {
                function.this_value()
            } else {
                value
            }),
            Err(other) => Err(other),
        }
    }

    fn instantiate(
        &mut self,
        class: &Rc<Class>,
        paren: &Token,
        args: Vec<Value>,
        types: &[String],
    ) -> EvalResult<Value> {
        let instance = Instance::new(Rc::clone(class));

        // Field initializers run with `this` bound to the fresh
        // instance, before Init.
        let fields = class.all_fields();
        if !fields.is_empty() {
            let env = Environment::with_enclosing(Rc::clone(&class.closure));
            let _ = env
                .borrow_mut()
                .define("this", Value::Instance(Rc::clone(&instance)));
            let previous = std::mem::replace(&mut self.environment, env);
            let mut failure = None;
            for field in &fields {
                let value = match &field.initializer {
                    Some(initializer) => match self.evaluate(initializer) {
                        Ok(value) => value,
                        Err(error) => {
                            failure = Some(error);
                            break;
                        }
                    },
                    None => Value::Nil,
                };
                instance.set(&field.name.lexeme, value);
            }
            self.environment = previous;
            if let Some(error) = failure {
                return Err(error);
            }
        }

        match class.find_method("Init") {
            Some(init) => {
                let Some(chosen) = Function::matches(&init, types) else {
                    return Err(RuntimeError::new(
                        paren,
                        "No matching signature for function.",
                    )
                    .into());
                };
                if args.len() != chosen.arity() {
                    return Err(RuntimeError::new(
                        paren,
                        format!(
                            "Expected {} arguments but got {}.",
                            chosen.arity(),
                            args.len()
                        ),
                    )
                    .into());
                }
                self.call_function(&chosen.bind(Rc::clone(&instance)), args)?;
            }
            None => {
                if !args.is_empty() {
                    return Err(RuntimeError::new(
                        paren,
                        format!("Expected 0 arguments but got {}.", args.len()),
                    )
                    .into());
                }
            }
        }
        Ok(Value::Instance(instance))
    }

    // ── Lookup ───────────────────────────────────────────────────────

    fn lookup_variable(&self, id: ExprId, name: &Token) -> Result<Value, RuntimeError> {
        let found = match self.locals.get(&id) {
            Some(&distance) => Environment::get_at(&self.environment, distance, &name.lexeme),
            None => self.globals.borrow().get(&name.lexeme),
        };
        found.ok_or_else(|| {
            RuntimeError::new(name, format!("Undefined variable '{}'.", name.lexeme))
        })
    }

    fn implicit_this_get(&self, name: &Token) -> Option<Value> {
        match self.environment.borrow().get("this") {
            Some(Value::Instance(instance)) => Instance::get(&instance, &name.lexeme),
            _ => None,
        }
    }
}

fn clause_matches(declared: &str, tag: &str, value: Option<&Value>) -> bool {
    if declared.eq_ignore_ascii_case("any") || declared.eq_ignore_ascii_case(tag) {
        return true;
    }
    if let Some(Value::Instance(instance)) = value {
        return instance.is_a(declared);
    }
    false
}

// ── Operators ────────────────────────────────────────────────────────

fn binary_op(operator: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match operator.kind {
        TokenKind::Plus => match (&left, &right) {
            (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a.wrapping_add(*b))),
            (Value::Double(a), Value::Double(b)) => Ok(Value::Double(a + b)),
            (Value::Str(_), _) | (_, Value::Str(_)) => Ok(Value::Str(format!(
                "{}{}",
                left.stringify(),
                right.stringify()
            ))),
            _ => Err(RuntimeError::new(
                operator,
                "Operands must be two numbers, or two strings.",
            )),
        },
        TokenKind::Minus | TokenKind::Star | TokenKind::Slash => {
            arithmetic(operator, &left, &right)
        }
        TokenKind::Greater | TokenKind::GreaterEqual | TokenKind::Less | TokenKind::LessEqual => {
            comparison(operator, &left, &right)
        }
        TokenKind::Equal => Ok(Value::Boolean(left.is_equal(&right))),
        TokenKind::NotEqual => Ok(Value::Boolean(!left.is_equal(&right))),
        _ => Err(RuntimeError::new(operator, "Operands must be numbers.")),
    }
}

fn arithmetic(operator: &Token, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(match operator.kind {
            TokenKind::Minus => Value::Integer(a.wrapping_sub(*b)),
            TokenKind::Star => Value::Integer(a.wrapping_mul(*b)),
            _ => {
                if *b == 0 {
                    return Err(RuntimeError::new(operator, "Division by zero."));
                }
                Value::Integer(a.wrapping_div(*b))
            }
        }),
        (Value::Double(a), Value::Double(b)) => Ok(match operator.kind {
            TokenKind::Minus => Value::Double(a - b),
            TokenKind::Star => Value::Double(a * b),
            _ => Value::Double(a / b),
        }),
        // Chars compute on their code points and come out as integers.
        (Value::Char(a), Value::Char(b)) => {
            let (a, b) = (*a as i64, *b as i64);
            Ok(match operator.kind {
                TokenKind::Minus => Value::Integer(a - b),
                TokenKind::Star => Value::Integer(a * b),
                _ => {
                    if b == 0 {
                        return Err(RuntimeError::new(operator, "Division by zero."));
                    }
                    Value::Integer(a / b)
                }
            })
        }
        _ => Err(RuntimeError::new(operator, "Operands must be numbers.")),
    }
}

fn comparison(operator: &Token, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    fn ordered<T: PartialOrd>(kind: TokenKind, a: T, b: T) -> bool {
        match kind {
            TokenKind::Greater => a > b,
            TokenKind::GreaterEqual => a >= b,
            TokenKind::Less => a < b,
            _ => a <= b,
        }
    }
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => {
            Ok(Value::Boolean(ordered(operator.kind, a, b)))
        }
        (Value::Double(a), Value::Double(b)) => Ok(Value::Boolean(ordered(operator.kind, a, b))),
        (Value::Char(a), Value::Char(b)) => Ok(Value::Boolean(ordered(operator.kind, a, b))),
        _ => Err(RuntimeError::new(operator, "Operands must be numbers.")),
    }
}
