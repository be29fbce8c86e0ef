//! Runtime environments.
//!
//! A parent-linked chain of frames, each a name → value map. Frames
//! are shared (`Rc<RefCell<..>>`) because closures keep their defining
//! frame alive. Distances computed by the resolver address frames
//! directly through `get_at`/`assign_at`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Function;
use crate::value::Value;

pub type EnvRef = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    enclosing: Option<EnvRef>,
    values: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> EnvRef {
        Rc::new(RefCell::new(Environment::default()))
    }

    pub fn with_enclosing(enclosing: EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Environment {
            enclosing: Some(enclosing),
            values: HashMap::new(),
        }))
    }

    /// Bind a name in this frame. Rebinding is an error, except that a
    /// function over a function is left alone so the caller can append
    /// an overload instead.
    pub fn define(&mut self, name: &str, value: Value) -> Result<(), String> {
        if let Some(existing) = self.values.get(name) {
            if matches!(existing, Value::Function(_)) && matches!(value, Value::Function(_)) {
                return Ok(());
            }
            return Err(format!("Redefined: {name}"));
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// A binding in this frame only, ignoring enclosing frames.
    pub fn get_local(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    /// Look a name up through the chain.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.get(name) {
            return Some(value.clone());
        }
        self.enclosing.as_ref().and_then(|e| e.borrow().get(name))
    }

    /// Assign to an existing binding somewhere in the chain. Returns
    /// false when the name is not bound anywhere.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return true;
        }
        match &self.enclosing {
            Some(enclosing) => enclosing.borrow_mut().assign(name, value),
            None => false,
        }
    }

    /// The frame `distance` hops up the chain.
    pub fn ancestor(env: &EnvRef, distance: usize) -> EnvRef {
        let mut frame = Rc::clone(env);
        for _ in 0..distance {
            let next = frame
                .borrow()
                .enclosing
                .as_ref()
                .map(Rc::clone);
            match next {
                Some(enclosing) => frame = enclosing,
                None => break,
            }
        }
        frame
    }

    pub fn get_at(env: &EnvRef, distance: usize, name: &str) -> Option<Value> {
        Environment::ancestor(env, distance).borrow().values.get(name).cloned()
    }

    pub fn assign_at(env: &EnvRef, distance: usize, name: &str, value: Value) {
        Environment::ancestor(env, distance)
            .borrow_mut()
            .values
            .insert(name.to_string(), value);
    }

    /// Search the chain for a function bound to `name` whose signature
    /// matches the argument types.
    pub fn find_function(&self, name: &str, types: &[String]) -> Option<Rc<Function>> {
        if let Some(Value::Function(function)) = self.values.get(name) {
            if let Some(matched) = Function::matches(function, types) {
                return Some(matched);
            }
        }
        self.enclosing
            .as_ref()
            .and_then(|e| e.borrow().find_function(name, types))
    }
}
