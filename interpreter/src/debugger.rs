// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use snek::{Statement, Value};

use crate::{Frame, RuntimeError};

/// Observes a running [`Program`](crate::Program). Every hook defaults to
/// doing nothing.
pub trait Debugger {
    /// Called once when the program starts on a statement, not on every
    /// resumption of it.
    fn on_line(&mut self, index: usize, statement: &Statement) {
        _ = index;
        _ = statement;
    }

    fn enter_command(&mut self, name: &str, args: &[Value]) {
        _ = name;
        _ = args;
    }

    fn leave_command(&mut self, name: &str, result: &Value) {
        _ = name;
        _ = result;
    }

    fn on_warning(&mut self, command: &str, message: &str) {
        _ = command;
        _ = message;
    }

    fn on_frame_pushed(&mut self, frame: &Frame) {
        _ = frame;
    }

    fn on_frame_popped(&mut self, frame: &Frame) {
        _ = frame;
    }

    fn on_runtime_error(&mut self, error: &RuntimeError) {
        _ = error;
    }
}

impl Debugger for () {
}
