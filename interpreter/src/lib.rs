// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

#![deny(elided_lifetimes_in_paths)]

mod builtin;
mod command;
mod config;
mod debugger;
mod error;
mod evaluation;
mod frame;
mod logger;
mod namespace;
mod operators;
mod program;
mod registry;

pub use snek;

pub use self::{
    builtin::{
        Builtin,
        BuiltinCommand,
        BuiltinFunction,
        WaitCommand,
        WaitUntilCommand,
    },
    command::{
        Command,
        CommandFactory,
        CommandStep,
        SimpleCommand,
        SimpleFunction,
    },
    config::{
        ConfigError,
        ConfigRoot,
        ConfigSectionLog,
        ConfigSectionRun,
    },
    debugger::Debugger,
    error::{
        ErrorPrinter,
        RuntimeError,
        RuntimeErrorKind,
    },
    evaluation::{
        EvalContext,
        Evaluation,
        Progress,
    },
    frame::Frame,
    logger::Logger,
    namespace::{Namespace, WILDCARD_NAME},
    operators::{apply_binary, apply_unary},
    program::{Program, ProgramState},
    registry::CommandRegistry,
};
