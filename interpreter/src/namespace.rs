// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::collections::HashMap;

use snek::Value;

/// Name of the variable holding [`Value::Wildcard`].
pub const WILDCARD_NAME: &str = "_";

#[derive(Debug, Clone)]
pub struct Namespace {
    variables: HashMap<String, Value>,
}

impl Namespace {
    pub fn new() -> Self {
        let mut variables = HashMap::new();
        variables.insert(WILDCARD_NAME.to_string(), Value::Wildcard);

        Self {
            variables,
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// The value of the variable, or the name itself as a string when no
    /// such variable exists, so commands can be handed bare names.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Value {
        match self.variables.get(name) {
            Some(value) => value.clone(),
            None => Value::String(name.to_string()),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.variables.remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.variables.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Into<String>> Extend<(S, Value)> for Namespace {
    fn extend<T: IntoIterator<Item = (S, Value)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_resolve_to_themselves() {
        let mut namespace = Namespace::new();
        assert_eq!(namespace.resolve("level"), Value::String("level".into()));

        namespace.set("level", Value::Integer(3));
        assert_eq!(namespace.resolve("level"), Value::Integer(3));
    }

    #[test]
    fn seeded_with_wildcard() {
        let namespace = Namespace::new();
        assert!(matches!(namespace.get(WILDCARD_NAME), Some(Value::Wildcard)));
        assert_eq!(namespace.len(), 1);
    }

    #[test]
    fn start_variables_override_wildcard() {
        let mut namespace = Namespace::new();
        namespace.extend([("_", Value::Null), ("x", Value::Bool(true))]);

        assert!(matches!(namespace.get("_"), Some(Value::Null)));
        assert_eq!(namespace.len(), 2);
    }
}
