// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::rc::Rc;

use snek::Value;

use crate::RuntimeErrorKind;

/// What a [`Command`] reports each time it is stepped.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandStep {
    /// The call is complete and evaluates to this value.
    Finished(Value),

    /// Not done yet; step again on the next cycle.
    Suspend,

    /// Evaluate this expression in the namespace of the program, hand the
    /// result to [`Command::supply_context`], then step again.
    RequestContext(String),

    /// Logged by the program, after which the command is stepped again
    /// within the same cycle.
    Warning(String),
}

/// One invocation of a callable. An instance lives until it yields
/// [`CommandStep::Finished`], and the same instance is stepped on every
/// cycle until then.
pub trait Command {
    fn next(&mut self) -> Result<CommandStep, RuntimeErrorKind>;

    fn supply_context(&mut self, expression: &str, value: Value) {
        _ = expression;
        _ = value;
    }
}

pub type CommandFactory = Rc<dyn Fn(Vec<Value>) -> Result<Box<dyn Command>, RuntimeErrorKind>>;

pub type SimpleFunction = Rc<dyn Fn(Vec<Value>) -> Result<Value, RuntimeErrorKind>>;

/// Adapts a plain function into a [`Command`] that finishes on its first
/// step.
pub struct SimpleCommand {
    function: SimpleFunction,
    arguments: Option<Vec<Value>>,
}

impl SimpleCommand {
    #[must_use]
    pub fn new(function: SimpleFunction, arguments: Vec<Value>) -> Self {
        Self {
            function,
            arguments: Some(arguments),
        }
    }
}

impl Command for SimpleCommand {
    fn next(&mut self) -> Result<CommandStep, RuntimeErrorKind> {
        let Some(arguments) = self.arguments.take() else {
            return Ok(CommandStep::Finished(Value::Null));
        };

        (self.function)(arguments).map(CommandStep::Finished)
    }
}
