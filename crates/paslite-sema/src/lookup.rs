//! Symbol-to-type lookup with lexically scoped bindings.
//!
//! [`TypeLookup`] maps a symbol name to a type name in a stack of
//! scopes over a flat global table. The type checker owns one primary
//! instance plus flat satellite instances for inferred types, subtype
//! links and container element types.

use std::collections::HashMap;

/// A scoped symbol → type-name table.
#[derive(Debug, Default)]
pub struct TypeLookup {
    scopes: Vec<HashMap<String, String>>,
    types: HashMap<String, String>,
}

impl TypeLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a type in the current scope, or globally when no scope
    /// is open.
    pub fn set(&mut self, symbol: impl Into<String>, type_name: impl Into<String>) {
        let table = self.scopes.last_mut().unwrap_or(&mut self.types);
        table.insert(symbol.into(), type_name.into());
    }

    /// Look a symbol up, innermost scope outward, then globals.
    pub fn get(&self, symbol: &str) -> Option<&str> {
        for scope in self.scopes.iter().rev() {
            if let Some(ty) = scope.get(symbol) {
                return Some(ty);
            }
        }
        self.types.get(symbol).map(String::as_str)
    }

    pub fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn end_scope(&mut self) {
        self.scopes.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_set_and_get() {
        let mut lookup = TypeLookup::new();
        lookup.set("x", "Integer");
        assert_eq!(lookup.get("x"), Some("Integer"));
        assert_eq!(lookup.get("y"), None);
    }

    #[test]
    fn test_scope_shadows_global() {
        let mut lookup = TypeLookup::new();
        lookup.set("x", "Integer");
        lookup.begin_scope();
        lookup.set("x", "String");
        assert_eq!(lookup.get("x"), Some("String"));
        lookup.end_scope();
        assert_eq!(lookup.get("x"), Some("Integer"));
    }

    #[test]
    fn test_outer_scope_visible_from_inner() {
        let mut lookup = TypeLookup::new();
        lookup.begin_scope();
        lookup.set("a", "Double");
        lookup.begin_scope();
        assert_eq!(lookup.get("a"), Some("Double"));
        lookup.end_scope();
        lookup.end_scope();
    }
}
