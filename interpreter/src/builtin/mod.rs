// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod functions;
mod wait;

use std::fmt::{Debug, Display};

use snek::Value;

use crate::{Command, CommandRegistry, RuntimeErrorKind};

pub use self::wait::{WaitCommand, WaitUntilCommand};

pub type BuiltinFunctionSignature = &'static (dyn Fn(Vec<Value>) -> Result<Value, RuntimeErrorKind> + Send + Sync);
pub type BuiltinCommandSignature = &'static (dyn Fn(Vec<Value>) -> Result<Box<dyn Command>, RuntimeErrorKind> + Send + Sync);

/// A built-in that always completes in one step.
#[derive(Clone, Copy)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub documentation: &'static str,
    pub function: BuiltinFunctionSignature,
}

impl Display for BuiltinFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}()", self.name))
    }
}

impl Debug for BuiltinFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinFunction")
            .field("name", &self.name)
            .field("documentation", &self.documentation)
            .field("function", &"(native)")
            .finish()
    }
}

/// A built-in that may take several steps.
#[derive(Clone, Copy)]
pub struct BuiltinCommand {
    pub name: &'static str,
    pub documentation: &'static str,
    pub factory: BuiltinCommandSignature,
}

impl Debug for BuiltinCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinCommand")
            .field("name", &self.name)
            .field("documentation", &self.documentation)
            .finish_non_exhaustive()
    }
}

pub struct Builtin;

impl Builtin {
    pub fn register_all(registry: &mut CommandRegistry) {
        for function in Self::FUNCTIONS {
            registry.register_simple(function.name, function.function);
        }

        for command in Self::COMMANDS {
            registry.register(command.name, command.factory);
        }
    }

    #[must_use]
    pub fn documentation(name: &str) -> Option<&'static str> {
        Self::FUNCTIONS.iter().find(|function| function.name == name).map(|function| function.documentation)
            .or_else(|| Self::COMMANDS.iter().find(|command| command.name == name).map(|command| command.documentation))
    }

    pub const FUNCTIONS: &'static [BuiltinFunction] = &[
        BuiltinFunction {
            name: "abs",
            documentation: "Absolute value of a number",
            function: &functions::abs,
        },
        BuiltinFunction {
            name: "add",
            documentation: "Same as `a + b`",
            function: &functions::add,
        },
        BuiltinFunction {
            name: "sub",
            documentation: "Same as `a - b`",
            function: &functions::sub,
        },
        BuiltinFunction {
            name: "mul",
            documentation: "Same as `a * b`",
            function: &functions::mul,
        },
        BuiltinFunction {
            name: "div",
            documentation: "Integer division, rounding down. Same as `a // b`",
            function: &functions::div,
        },
        BuiltinFunction {
            name: "fdiv",
            documentation: "Division with a floating point result. Same as `a / b`",
            function: &functions::fdiv,
        },
        BuiltinFunction {
            name: "mod",
            documentation: "Remainder with the sign of the divisor. Same as `a % b`",
            function: &functions::modulo,
        },
        BuiltinFunction {
            name: "min",
            documentation: "The smallest of the arguments",
            function: &functions::min,
        },
        BuiltinFunction {
            name: "max",
            documentation: "The largest of the arguments",
            function: &functions::max,
        },
        BuiltinFunction {
            name: "round",
            documentation: "Rounds to the nearest integer, or to `digits` decimals when given",
            function: &functions::round,
        },
        BuiltinFunction {
            name: "int",
            documentation: "Converts a number, boolean or numeric string to an integer",
            function: &functions::int,
        },
        BuiltinFunction {
            name: "float",
            documentation: "Converts a number, boolean or numeric string to a float",
            function: &functions::float,
        },
        BuiltinFunction {
            name: "str",
            documentation: "Text representation of a value",
            function: &functions::str,
        },
        BuiltinFunction {
            name: "bool",
            documentation: "Whether the value is truthy",
            function: &functions::bool,
        },
        BuiltinFunction {
            name: "len",
            documentation: "Number of characters in a string",
            function: &functions::len,
        },
        BuiltinFunction {
            name: "upper",
            documentation: "The string in upper case",
            function: &functions::upper,
        },
        BuiltinFunction {
            name: "lower",
            documentation: "The string in lower case",
            function: &functions::lower,
        },
        BuiltinFunction {
            name: "title",
            documentation: "The string with every word capitalized",
            function: &functions::title,
        },
        BuiltinFunction {
            name: "capitalize",
            documentation: "The string with its first character in upper case and the rest in lower case",
            function: &functions::capitalize,
        },
        BuiltinFunction {
            name: "print",
            documentation: "Writes the arguments, separated by spaces, to the standard output",
            function: &functions::print,
        },
        BuiltinFunction {
            name: "format",
            documentation: "Replaces `{}` and `{0}` placeholders in the template with the arguments",
            function: &functions::format,
        },
        BuiltinFunction {
            name: "randint",
            documentation: "Random integer between `low` and `high`, both inclusive",
            function: &functions::randint,
        },
    ];

    pub const COMMANDS: &'static [BuiltinCommand] = &[
        BuiltinCommand {
            name: "wait",
            documentation: "Suspends the program until `ms` milliseconds have passed",
            factory: &WaitCommand::create,
        },
        BuiltinCommand {
            name: "wait_until",
            documentation: "Suspends the program until the given expression is truthy",
            factory: &WaitUntilCommand::create,
        },
    ];
}
