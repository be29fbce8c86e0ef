//! Built-in functions.
//!
//! Installed into the global environment before any user code runs.
//! Each native receives the interpreter (for output), the call's
//! closing paren (for error positions) and its evaluated arguments.
//! Container member functions are also built here, as natives closing
//! over the container's shared storage.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use paslite_types::Token;

use crate::env::EnvRef;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::value::{MapKey, Value};

type NativeFn = Box<dyn Fn(&mut Interpreter, &Token, Vec<Value>) -> Result<Value, RuntimeError>>;

pub struct NativeFunction {
    pub name: String,
    pub arity: usize,
    func: NativeFn,
}

impl NativeFunction {
    pub fn new(
        name: impl Into<String>,
        arity: usize,
        func: impl Fn(&mut Interpreter, &Token, Vec<Value>) -> Result<Value, RuntimeError> + 'static,
    ) -> Rc<Self> {
        Rc::new(NativeFunction {
            name: name.into(),
            arity,
            func: Box::new(func),
        })
    }

    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        paren: &Token,
        arguments: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        (self.func)(interpreter, paren, arguments)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// Install the standard natives into the global environment.
pub fn install(globals: &EnvRef) {
    let mut env = globals.borrow_mut();
    let mut add = |native: Rc<NativeFunction>| {
        let name = native.name.clone();
        // Globals start empty, defines cannot collide.
        let _ = env.define(&name, Value::Native(native));
    };

    add(NativeFunction::new("WriteLn", 1, |interp, _, args| {
        interp.write_line(&args[0].stringify());
        Ok(Value::Nil)
    }));

    add(NativeFunction::new("Write", 1, |interp, _, args| {
        interp.write(&args[0].stringify());
        Ok(Value::Nil)
    }));

    add(NativeFunction::new("Str", 1, |_, _, args| {
        Ok(Value::Str(args[0].stringify()))
    }));

    add(NativeFunction::new("Copy", 3, |_, paren, args| {
        let Value::Str(text) = &args[0] else {
            return Err(RuntimeError::new(paren, "Operand must be a string."));
        };
        let (begin, end) = match (&args[1], &args[2]) {
            (Value::Integer(b), Value::Integer(e)) => (*b, *e),
            _ => return Err(RuntimeError::new(paren, "Operands must be numbers.")),
        };
        let chars: Vec<char> = text.chars().collect();
        if begin < 0 || end < begin || end as usize > chars.len() {
            return Err(RuntimeError::new(paren, "Subscript out of range."));
        }
        Ok(Value::Str(chars[begin as usize..end as usize].iter().collect()))
    }));

    add(NativeFunction::new("Length", 1, |_, paren, args| {
        match &args[0] {
            Value::Str(text) => Ok(Value::Integer(text.chars().count() as i64)),
            _ => Err(RuntimeError::new(paren, "Operand must be a string.")),
        }
    }));

    add(NativeFunction::new("clock", 0, |_, _, _| {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        Ok(Value::Double(now))
    }));

    add(NativeFunction::new("Array", 1, |_, paren, args| {
        let Value::Integer(size) = args[0] else {
            return Err(RuntimeError::new(paren, "Array size must be an integer."));
        };
        if size < 0 {
            return Err(RuntimeError::new(paren, "Array size must be an integer."));
        }
        Ok(Value::Array(Rc::new(RefCell::new(vec![
            Value::Nil;
            size as usize
        ]))))
    }));

    add(NativeFunction::new("List", 0, |_, _, _| {
        Ok(Value::List(Rc::new(RefCell::new(Vec::new()))))
    }));

    add(NativeFunction::new("Stack", 0, |_, _, _| {
        Ok(Value::Stack(Rc::new(RefCell::new(Vec::new()))))
    }));

    add(NativeFunction::new("Map", 0, |_, _, _| {
        Ok(Value::Map(Rc::new(RefCell::new(
            std::collections::HashMap::new(),
        ))))
    }));

    add(NativeFunction::new("AssertTrue", 1, |_, paren, args| {
        if !args[0].is_truthy() {
            return Err(RuntimeError::new(paren, "Assertion 'left = right' failed."));
        }
        Ok(Value::Nil)
    }));

    add(NativeFunction::new("AssertEqual", 2, |_, paren, args| {
        if !args[0].is_equal(&args[1]) {
            return Err(RuntimeError::new(
                paren,
                format!(
                    "Assertion 'left = right' failed.  Expected '{}' but got '{}'.",
                    args[0].stringify(),
                    args[1].stringify()
                ),
            ));
        }
        Ok(Value::Nil)
    }));
}

/// Resolve a member access on a container value. Mutating members come
/// back as natives closing over the container's storage.
pub fn container_member(target: &Value, name: &Token) -> Result<Value, RuntimeError> {
    let member = name.lexeme.to_ascii_lowercase();
    match target {
        Value::List(items) => match member.as_str() {
            "get" => {
                let items = Rc::clone(items);
                Ok(native_member("get", 1, move |paren, args| {
                    let index = integer_index(paren, &args[0])?;
                    items
                        .borrow()
                        .get(index)
                        .cloned()
                        .ok_or_else(|| RuntimeError::new(paren, "Subscript out of range."))
                }))
            }
            "add" => {
                let items = Rc::clone(items);
                Ok(native_member("add", 1, move |_, mut args| {
                    items.borrow_mut().push(args.remove(0));
                    Ok(Value::Nil)
                }))
            }
            "length" => Ok(Value::Integer(items.borrow().len() as i64)),
            _ => Err(undefined_property(name)),
        },

        Value::Array(items) => match member.as_str() {
            "get" => {
                let items = Rc::clone(items);
                Ok(native_member("get", 1, move |paren, args| {
                    let index = integer_index(paren, &args[0])?;
                    items
                        .borrow()
                        .get(index)
                        .cloned()
                        .ok_or_else(|| RuntimeError::new(paren, "Subscript out of range."))
                }))
            }
            "set" => {
                let items = Rc::clone(items);
                Ok(native_member("set", 2, move |paren, mut args| {
                    let value = args.remove(1);
                    let index = integer_index(paren, &args[0])?;
                    let mut items = items.borrow_mut();
                    let slot = items
                        .get_mut(index)
                        .ok_or_else(|| RuntimeError::new(paren, "Subscript out of range."))?;
                    *slot = value.clone();
                    Ok(value)
                }))
            }
            "length" => Ok(Value::Integer(items.borrow().len() as i64)),
            _ => Err(undefined_property(name)),
        },

        Value::Stack(items) => match member.as_str() {
            "push" => {
                let items = Rc::clone(items);
                Ok(native_member("push", 1, move |_, mut args| {
                    let value = args.remove(0);
                    items.borrow_mut().push(value.clone());
                    Ok(value)
                }))
            }
            "pop" => {
                let items = Rc::clone(items);
                Ok(native_member("pop", 0, move |paren, _| {
                    items
                        .borrow_mut()
                        .pop()
                        .ok_or_else(|| RuntimeError::new(paren, "Stack is empty."))
                }))
            }
            "peek" => {
                let items = Rc::clone(items);
                Ok(native_member("peek", 0, move |paren, _| {
                    items
                        .borrow()
                        .last()
                        .cloned()
                        .ok_or_else(|| RuntimeError::new(paren, "Stack is empty."))
                }))
            }
            "isempty" => {
                let items = Rc::clone(items);
                Ok(native_member("isempty", 0, move |_, _| {
                    Ok(Value::Boolean(items.borrow().is_empty()))
                }))
            }
            "length" => Ok(Value::Integer(items.borrow().len() as i64)),
            _ => Err(undefined_property(name)),
        },

        Value::Map(entries) => match member.as_str() {
            "get" => {
                let entries = Rc::clone(entries);
                Ok(native_member("get", 1, move |paren, args| {
                    let key = map_key(paren, &args[0])?;
                    Ok(entries.borrow().get(&key).cloned().unwrap_or(Value::Nil))
                }))
            }
            "put" => {
                let entries = Rc::clone(entries);
                Ok(native_member("put", 2, move |paren, mut args| {
                    let value = args.remove(1);
                    let key = map_key(paren, &args[0])?;
                    entries.borrow_mut().insert(key, value);
                    Ok(Value::Nil)
                }))
            }
            "contains" => {
                let entries = Rc::clone(entries);
                Ok(native_member("contains", 1, move |paren, args| {
                    let key = map_key(paren, &args[0])?;
                    Ok(Value::Boolean(entries.borrow().contains_key(&key)))
                }))
            }
            _ => Err(undefined_property(name)),
        },

        _ => Err(undefined_property(name)),
    }
}

/// The error for assigning a property on a container.
pub fn container_set_error(target: &Value, name: &Token) -> RuntimeError {
    let what = match target {
        Value::List(_) => "lists",
        Value::Array(_) => "arrays",
        Value::Stack(_) => "stacks",
        _ => "maps",
    };
    RuntimeError::new(name, format!("Can't add properties to {what}."))
}

fn native_member(
    name: &str,
    arity: usize,
    func: impl Fn(&Token, Vec<Value>) -> Result<Value, RuntimeError> + 'static,
) -> Value {
    Value::Native(NativeFunction::new(name, arity, move |_, paren, args| {
        func(paren, args)
    }))
}

fn integer_index(paren: &Token, value: &Value) -> Result<usize, RuntimeError> {
    match value {
        Value::Integer(n) if *n >= 0 => Ok(*n as usize),
        Value::Integer(_) => Err(RuntimeError::new(paren, "Subscript out of range.")),
        _ => Err(RuntimeError::new(paren, "Subscript index must be an integer.")),
    }
}

fn map_key(paren: &Token, value: &Value) -> Result<MapKey, RuntimeError> {
    MapKey::from_value(value).ok_or_else(|| {
        RuntimeError::new(
            paren,
            "Map key must be a string, integer, char or boolean.",
        )
    })
}

fn undefined_property(name: &Token) -> RuntimeError {
    RuntimeError::new(name, format!("Undefined property '{}'.", name.lexeme))
}
