// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{collections::HashMap, rc::Rc};

use snek::{ScriptCache, Statement, Value};
use snek_interpreter::{CommandRegistry, Debugger, Frame, Program, RuntimeError};

pub fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter(None, log::LevelFilter::max())
        .try_init();
}

/// The built-ins plus `write`, which does nothing itself: its arguments are
/// recorded by [`TestDebugger`].
pub fn test_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::with_builtins();
    registry.register_simple("write", |_| Ok(Value::Null));
    registry
}

pub fn program(source: &str) -> Program<TestDebugger> {
    program_with(source, test_registry(), HashMap::new())
}

pub fn program_with(source: &str, registry: CommandRegistry, start_variables: HashMap<String, Value>) -> Program<TestDebugger> {
    init_logger();

    let cache = Rc::new(ScriptCache::new());
    Program::with_debugger(cache, source, start_variables, registry, TestDebugger::default())
        .unwrap_or_else(|e| panic!("failed to parse {source:?}: {e}"))
}

/// Cycles until the program is done, failing the test on a runtime error or
/// when it takes more than `max_cycles`.
pub fn run_to_completion<D: Debugger>(program: &mut Program<D>, max_cycles: usize) -> usize {
    for cycle in 0..max_cycles {
        if program.done() {
            return cycle;
        }

        if let Err(e) = program.cycle() {
            panic!("runtime error: {e}");
        }
    }

    assert!(program.done(), "program did not finish within {max_cycles} cycles");
    max_cycles
}

/// Runs `result = <input>;` and returns the value of `result`.
pub fn interpret_expression(input: &str) -> Value {
    let mut program = program(&format!("result = {input};"));
    run_to_completion(&mut program, 1000);

    program.namespace()
        .get("result")
        .cloned()
        .unwrap_or_else(|| panic!("no result for {input:?}"))
}

/// Everything passed to `print` and `write`, one entry per call.
pub fn interpret_and_return_stdout(input: &str) -> Vec<String> {
    let mut program = program(input);
    run_to_completion(&mut program, 10_000);
    program.into_debugger().output
}

#[derive(Debug, Default)]
pub struct TestDebugger {
    pub output: Vec<String>,
    pub warnings: Vec<(String, String)>,
    pub lines: Vec<usize>,
    pub commands: Vec<String>,
    pub frames_pushed: usize,
    pub frames_popped: usize,
    pub errors: Vec<RuntimeError>,
}

impl Debugger for TestDebugger {
    fn on_line(&mut self, index: usize, statement: &Statement) {
        _ = statement;
        self.lines.push(index);
    }

    fn enter_command(&mut self, name: &str, args: &[Value]) {
        self.commands.push(name.to_string());

        if name == "print" || name == "write" {
            let line: Vec<String> = args.iter().map(ToString::to_string).collect();
            self.output.push(line.join(" "));
        }
    }

    fn on_warning(&mut self, command: &str, message: &str) {
        self.warnings.push((command.to_string(), message.to_string()));
    }

    fn on_frame_pushed(&mut self, frame: &Frame) {
        _ = frame;
        self.frames_pushed += 1;
    }

    fn on_frame_popped(&mut self, frame: &Frame) {
        _ = frame;
        self.frames_popped += 1;
    }

    fn on_runtime_error(&mut self, error: &RuntimeError) {
        self.errors.push(error.clone());
    }
}
