// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{collections::HashMap, fmt::Debug, rc::Rc};

use snek::Value;

use crate::{Builtin, Command, CommandFactory, RuntimeErrorKind, SimpleCommand, SimpleFunction};

/// Maps command names to the factories creating their instances. Built-in
/// and host commands share this table.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    factories: HashMap<String, CommandFactory>,
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_builtins() -> Self {
        let mut this = Self::new();
        Builtin::register_all(&mut this);
        this
    }

    /// Registers a command, replacing any previous one with this name.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
            where F: Fn(Vec<Value>) -> Result<Box<dyn Command>, RuntimeErrorKind> + 'static {
        self.factories.insert(name.into(), Rc::new(factory));
    }

    /// Registers a function that always completes in a single step.
    pub fn register_simple<F>(&mut self, name: impl Into<String>, function: F)
            where F: Fn(Vec<Value>) -> Result<Value, RuntimeErrorKind> + 'static {
        let function: SimpleFunction = Rc::new(function);

        self.register(name, move |arguments| {
            Ok(Box::new(SimpleCommand::new(Rc::clone(&function), arguments)) as Box<dyn Command>)
        });
    }

    pub fn instantiate(&self, name: &str, arguments: Vec<Value>) -> Result<Box<dyn Command>, RuntimeErrorKind> {
        let Some(factory) = self.factories.get(name) else {
            return Err(RuntimeErrorKind::UnknownCommand { name: name.to_string() });
        };

        factory(arguments)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// All registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Copies every command of `other` into this registry, overriding
    /// commands with the same name.
    pub fn extend(&mut self, other: &CommandRegistry) {
        for (name, factory) in &other.factories {
            self.factories.insert(name.clone(), Rc::clone(factory));
        }
    }
}

impl Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommandStep;

    #[test]
    fn unknown_command() {
        let registry = CommandRegistry::new();
        let error = registry.instantiate("dialog", Vec::new()).err();
        assert_eq!(error, Some(RuntimeErrorKind::UnknownCommand { name: "dialog".into() }));
    }

    #[test]
    fn register_simple() {
        let mut registry = CommandRegistry::new();
        registry.register_simple("answer", |_| Ok(Value::Integer(42)));

        let mut command = registry.instantiate("answer", Vec::new()).unwrap();
        assert_eq!(command.next(), Ok(CommandStep::Finished(Value::Integer(42))));
    }

    #[test]
    fn extend_overrides() {
        let mut registry = CommandRegistry::with_builtins();
        let mut host = CommandRegistry::new();
        host.register_simple("print", |_| Ok(Value::Bool(true)));
        host.register_simple("dialog", |_| Ok(Value::Null));

        let before = registry.names().len();
        registry.extend(&host);

        assert_eq!(registry.names().len(), before + 1);
        assert!(registry.contains("dialog"));

        let mut command = registry.instantiate("print", vec![Value::Integer(1)]).unwrap();
        assert_eq!(command.next(), Ok(CommandStep::Finished(Value::Bool(true))));
    }
}
