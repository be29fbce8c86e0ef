//! User-defined callables and objects.
//!
//! A function value carries its declaration, the environment it closed
//! over, and any overloads appended by later declarations of the same
//! name. Classes hold their methods, field declarations and the
//! environment they were declared in, which is where constructed
//! instances evaluate their field initializers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use paslite_types::ast::{FunctionDecl, VarDecl};

use crate::env::{EnvRef, Environment};
use crate::value::Value;

#[derive(Debug)]
pub struct Function {
    pub declaration: Rc<FunctionDecl>,
    pub closure: EnvRef,
    pub is_initializer: bool,
    /// Later declarations of the same name, tried in order when this
    /// signature does not match.
    pub overloads: RefCell<Vec<Rc<Function>>>,
}

impl Function {
    pub fn new(declaration: Rc<FunctionDecl>, closure: EnvRef, is_initializer: bool) -> Rc<Self> {
        Rc::new(Function {
            declaration,
            closure,
            is_initializer,
            overloads: RefCell::new(Vec::new()),
        })
    }

    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    /// Whether this signature accepts the given argument type tags.
    /// An `Any` parameter accepts anything; otherwise the declared
    /// type must match the tag, case-insensitively.
    pub fn is_match(&self, types: &[String]) -> bool {
        if types.len() != self.declaration.params.len() {
            return false;
        }
        self.declaration.params.iter().zip(types).all(|(param, tag)| {
            let declared = &param.type_name.lexeme;
            declared.eq_ignore_ascii_case("any")
                || tag.eq_ignore_ascii_case("any")
                || declared.eq_ignore_ascii_case(tag)
        })
    }

    /// Pick the function or one of its overloads by argument types.
    pub fn matches(function: &Rc<Function>, types: &[String]) -> Option<Rc<Function>> {
        if function.is_match(types) {
            return Some(Rc::clone(function));
        }
        function
            .overloads
            .borrow()
            .iter()
            .find(|overload| overload.is_match(types))
            .map(Rc::clone)
    }

    /// Produce a copy whose closure has `this` bound to the instance.
    pub fn bind(&self, instance: Rc<Instance>) -> Rc<Function> {
        let env = Environment::with_enclosing(Rc::clone(&self.closure));
        // Fresh frame, name cannot collide.
        let _ = env.borrow_mut().define("this", Value::Instance(instance));
        Function::new(
            Rc::clone(&self.declaration),
            env,
            self.is_initializer,
        )
    }

    /// The instance this function is bound to, if any.
    pub fn parent(&self) -> Option<Rc<Instance>> {
        match self.closure.borrow().get("this") {
            Some(Value::Instance(instance)) => Some(instance),
            _ => None,
        }
    }

    /// The instance in the binding frame, for initializer returns.
    pub fn this_value(&self) -> Value {
        Environment::get_at(&self.closure, 0, "this").unwrap_or(Value::Nil)
    }
}

#[derive(Debug)]
pub struct Class {
    pub name: String,
    pub superclass: Option<Rc<Class>>,
    pub methods: HashMap<String, Rc<Function>>,
    /// Field declarations, evaluated per instance at construction.
    pub fields: Vec<VarDecl>,
    /// The environment the class was declared in, including the frame
    /// holding `super` when there is a superclass.
    pub closure: EnvRef,
}

impl Class {
    /// Look a method up on this class or up the inheritance chain.
    pub fn find_method(&self, name: &str) -> Option<Rc<Function>> {
        if let Some(method) = self.methods.get(name) {
            return Some(Rc::clone(method));
        }
        self.superclass
            .as_ref()
            .and_then(|superclass| superclass.find_method(name))
    }

    /// Field declarations of the whole chain, root first, so subclass
    /// fields shadow superclass fields of the same name.
    pub fn all_fields(&self) -> Vec<VarDecl> {
        let mut fields = match &self.superclass {
            Some(superclass) => superclass.all_fields(),
            None => Vec::new(),
        };
        fields.extend(self.fields.iter().cloned());
        fields
    }
}

#[derive(Debug)]
pub struct Instance {
    pub class: Rc<Class>,
    pub fields: RefCell<HashMap<String, Value>>,
}

impl Instance {
    pub fn new(class: Rc<Class>) -> Rc<Self> {
        Rc::new(Instance {
            class,
            fields: RefCell::new(HashMap::new()),
        })
    }

    /// A property: fields shadow methods, methods come back bound.
    pub fn get(instance: &Rc<Instance>, name: &str) -> Option<Value> {
        if let Some(value) = instance.fields.borrow().get(name) {
            return Some(value.clone());
        }
        instance
            .class
            .find_method(name)
            .map(|method| Value::Function(method.bind(Rc::clone(instance))))
    }

    pub fn set(&self, name: &str, value: Value) {
        self.fields.borrow_mut().insert(name.to_string(), value);
    }

    /// True when this instance's class is `name` or inherits from it.
    pub fn is_a(&self, name: &str) -> bool {
        let mut class = Some(Rc::clone(&self.class));
        while let Some(current) = class {
            if current.name.eq_ignore_ascii_case(name) {
                return true;
            }
            class = current.superclass.as_ref().map(Rc::clone);
        }
        false
    }
}
