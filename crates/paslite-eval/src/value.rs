//! Runtime values.
//!
//! Scalars are stored inline; everything with identity or interior
//! mutability sits behind an `Rc`. Containers are shared-mutable, so
//! passing a list to a function passes the list, not a copy.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::native::NativeFunction;
use crate::object::{Class, Function, Instance};

/// A member of a declared enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub enum_name: String,
    pub name: String,
    pub ordinal: i64,
}

/// Keys a map can hold. Doubles are excluded so keys stay hashable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    Integer(i64),
    Str(String),
    Char(char),
    Boolean(bool),
}

impl MapKey {
    /// Convert a value into a key, if the value is a valid key type.
    pub fn from_value(value: &Value) -> Option<MapKey> {
        match value {
            Value::Integer(n) => Some(MapKey::Integer(*n)),
            Value::Str(s) => Some(MapKey::Str(s.clone())),
            Value::Char(c) => Some(MapKey::Char(*c)),
            Value::Boolean(b) => Some(MapKey::Boolean(*b)),
            _ => None,
        }
    }
}

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    Nil,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    Char(char),
    Str(String),
    Enum(Rc<EnumValue>),
    Function(Rc<Function>),
    Native(Rc<NativeFunction>),
    Class(Rc<Class>),
    Instance(Rc<Instance>),
    List(Rc<RefCell<Vec<Value>>>),
    Array(Rc<RefCell<Vec<Value>>>),
    Stack(Rc<RefCell<Vec<Value>>>),
    Map(Rc<RefCell<HashMap<MapKey, Value>>>),
}

impl Value {
    /// The runtime type tag used for overload dispatch and `except`
    /// clause matching. `nil` is tagged `Any` so it matches anything.
    pub fn type_tag(&self) -> String {
        match self {
            Value::Nil => "Any".to_string(),
            Value::Boolean(_) => "Boolean".to_string(),
            Value::Integer(_) => "Integer".to_string(),
            Value::Double(_) => "Double".to_string(),
            Value::Char(_) => "Char".to_string(),
            Value::Str(_) => "String".to_string(),
            Value::Enum(e) => e.enum_name.clone(),
            Value::Instance(i) => i.class.name.clone(),
            Value::Class(c) => c.name.clone(),
            Value::Function(_) | Value::Native(_) => "Any".to_string(),
            Value::List(_) => "List".to_string(),
            Value::Array(_) => "Array".to_string(),
            Value::Stack(_) => "Stack".to_string(),
            Value::Map(_) => "Map".to_string(),
        }
    }

    /// Truthiness: `nil` and `False` are falsey, zero integers and
    /// zero-ordinal enum members are falsey, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Boolean(b) => *b,
            Value::Integer(n) => *n != 0,
            Value::Enum(e) => e.ordinal != 0,
            _ => true,
        }
    }

    /// Value equality. Scalars compare by value, objects and
    /// containers by identity. An `Integer` never equals a `Double`.
    pub fn is_equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => {
                a.enum_name == b.enum_name && a.ordinal == b.ordinal
            }
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Stack(a), Value::Stack(b)) => Rc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Render a value for output.
    pub fn stringify(&self) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Double(d) => {
                let text = d.to_string();
                match text.strip_suffix(".0") {
                    Some(stripped) => stripped.to_string(),
                    None => text,
                }
            }
            Value::Char(c) => c.to_string(),
            Value::Str(s) => s.clone(),
            Value::Enum(e) => e.name.clone(),
            Value::Function(f) => format!("<fn {}>", f.declaration.name.lexeme),
            Value::Native(n) => format!("<native fn {}>", n.name),
            Value::Class(c) => c.name.clone(),
            Value::Instance(i) => format!("{} instance", i.class.name),
            Value::List(items) | Value::Array(items) | Value::Stack(items) => {
                let rendered: Vec<String> =
                    items.borrow().iter().map(Value::stringify).collect();
                format!("[{}]", rendered.join(", "))
            }
            Value::Map(_) => "<map>".to_string(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stringify())
    }
}
