// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{rc::Rc, time::Duration};

use log::{debug, error, trace};
use snek::{BlockKeyword, Expression, ParseError, Script, ScriptCache, StatementKind, Value};
use strum::AsRefStr;

use crate::{CommandRegistry, Debugger, EvalContext, Evaluation, Frame, Namespace, Progress, RuntimeError, RuntimeErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum ProgramState {
    Running,
    Done,
    Failed,
}

#[derive(Debug, Clone)]
enum Status {
    Running,
    Done,
    Failed(RuntimeError),
}

/// One running instance of a script, advanced by the host a bit at a time
/// through [`Program::cycle`].
pub struct Program<D: Debugger = ()> {
    name: String,
    script: Rc<Script>,
    cache: Rc<ScriptCache>,
    registry: CommandRegistry,
    namespace: Namespace,
    call_stack: Vec<Frame>,
    program_counter: usize,

    /// The expression of the current statement, when it is suspended.
    evaluation: Option<Evaluation>,

    status: Status,
    debugger: D,
}

impl Program<()> {
    pub fn new<I, S>(cache: Rc<ScriptCache>, source: &str, start_variables: I, registry: CommandRegistry) -> Result<Self, ParseError>
            where I: IntoIterator<Item = (S, Value)>,
                  S: Into<String> {
        Self::with_debugger(cache, source, start_variables, registry, ())
    }
}

impl<D: Debugger> Program<D> {
    pub fn with_debugger<I, S>(cache: Rc<ScriptCache>, source: &str, start_variables: I, registry: CommandRegistry, debugger: D) -> Result<Self, ParseError>
            where I: IntoIterator<Item = (S, Value)>,
                  S: Into<String> {
        let script = cache.tokenize(source)?;

        let mut namespace = Namespace::new();
        namespace.extend(start_variables);

        let status = if script.is_empty() { Status::Done } else { Status::Running };

        Ok(Self {
            name: String::from("<script>"),
            script,
            cache,
            registry,
            namespace,
            call_stack: Vec::new(),
            program_counter: 0,
            evaluation: None,
            status,
            debugger,
        })
    }

    /// Sets the name used in diagnostics.
    #[must_use]
    pub fn named(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Performs one step of work: starts or resumes the current statement.
    /// Does nothing once the program is done, and returns the same error
    /// again once it has failed.
    pub fn cycle(&mut self) -> Result<(), RuntimeError> {
        match &self.status {
            Status::Running => (),
            Status::Done => return Ok(()),
            Status::Failed(error) => return Err(error.clone()),
        }

        if let Err(kind) = self.step() {
            let range = self.script.get(self.program_counter)
                .map(|statement| statement.range)
                .unwrap_or_default();

            let error = RuntimeError {
                script: self.name.clone(),
                range,
                kind,
            };

            error!("Program {} failed: {error}", self.name);
            self.debugger.on_runtime_error(&error);
            self.evaluation = None;
            self.status = Status::Failed(error.clone());
            return Err(error);
        }

        if self.program_counter >= self.script.len() {
            debug!("Program {} is done", self.name);
            self.status = Status::Done;
        }

        Ok(())
    }

    #[must_use]
    pub fn done(&self) -> bool {
        !matches!(self.status, Status::Running)
    }

    #[must_use]
    pub fn state(&self) -> ProgramState {
        match self.status {
            Status::Running => ProgramState::Running,
            Status::Done => ProgramState::Done,
            Status::Failed(..) => ProgramState::Failed,
        }
    }

    /// Cycles until done, sleeping `step_delay` between cycles. Only meant
    /// for tools and tests: this blocks the calling thread.
    pub fn run(&mut self, step_delay: Duration) -> Result<(), RuntimeError> {
        while !self.done() {
            self.cycle()?;

            if !self.done() && !step_delay.is_zero() {
                std::thread::sleep(step_delay);
            }
        }

        match &self.status {
            Status::Failed(error) => Err(error.clone()),
            _ => Ok(()),
        }
    }

    fn step(&mut self) -> Result<(), RuntimeErrorKind> {
        let script = Rc::clone(&self.script);
        let Some(statement) = script.get(self.program_counter) else {
            return Ok(());
        };

        if self.evaluation.is_none() {
            trace!("{}:{} {statement}", self.name, statement.source_line() + 1);
            self.debugger.on_line(self.program_counter, statement);
        }

        match &statement.kind {
            StatementKind::BlockEnd => self.close_block()?,

            StatementKind::Assignment(assign) => {
                if let Some(value) = self.evaluate(&assign.expression)? {
                    self.namespace.set(assign.name.as_str(), value);
                    self.program_counter += 1;
                }
            }

            StatementKind::Expression(expression) => {
                if self.evaluate(expression)?.is_some() {
                    self.program_counter += 1;
                }
            }

            StatementKind::Header(header) => {
                if let Some(value) = self.evaluate(&header.expression)? {
                    self.enter_block(header.keyword, value)?;
                }
            }
        }

        Ok(())
    }

    /// Steps the evaluation of the current statement's expression, returning
    /// its value once complete.
    fn evaluate(&mut self, expression: &Expression) -> Result<Option<Value>, RuntimeErrorKind> {
        let mut evaluation = self.evaluation.take().unwrap_or_default();

        let mut ctx = EvalContext {
            namespace: &self.namespace,
            registry: &self.registry,
            cache: &self.cache,
            debugger: &mut self.debugger,
        };

        match evaluation.step(expression, &mut ctx)? {
            Progress::Suspended => {
                self.evaluation = Some(evaluation);
                Ok(None)
            }
            Progress::Complete(value) => Ok(Some(value)),
        }
    }

    fn enter_block(&mut self, keyword: BlockKeyword, value: Value) -> Result<(), RuntimeErrorKind> {
        match keyword {
            BlockKeyword::If if value.is_truthy() => self.push_frame(Frame::If),

            BlockKeyword::While if value.is_truthy() => self.push_frame(Frame::While { line: self.program_counter }),

            BlockKeyword::If | BlockKeyword::While => self.skip_block(keyword)?,

            BlockKeyword::Switch => self.push_frame(Frame::Switch { scrutinee: value, matched: false }),

            BlockKeyword::Case => {
                let Some(index) = self.call_stack.iter().rposition(|frame| matches!(frame, Frame::Switch { .. })) else {
                    return Err(RuntimeErrorKind::CaseWithoutSwitch);
                };

                let Frame::Switch { scrutinee, matched } = &mut self.call_stack[index] else {
                    return Err(RuntimeErrorKind::CaseWithoutSwitch);
                };

                if !*matched && *scrutinee == value {
                    *matched = true;
                    self.push_frame(Frame::Case);
                } else {
                    self.skip_block(keyword)?;
                }
            }
        }

        Ok(())
    }

    fn push_frame(&mut self, frame: Frame) {
        debug!("Entering `{}` block at line {}", frame.name(), self.program_counter);
        self.debugger.on_frame_pushed(&frame);
        self.call_stack.push(frame);
        self.program_counter += 1;
    }

    fn skip_block(&mut self, keyword: BlockKeyword) -> Result<(), RuntimeErrorKind> {
        let Some(end) = self.script.matching_block_end(self.program_counter) else {
            return Err(RuntimeErrorKind::UnterminatedBlock { keyword: keyword.into() });
        };

        debug!("Skipping `{}` block from line {} to {end}", keyword.as_ref(), self.program_counter);
        self.program_counter = end + 1;
        Ok(())
    }

    fn close_block(&mut self) -> Result<(), RuntimeErrorKind> {
        let Some(frame) = self.call_stack.pop() else {
            return Err(RuntimeErrorKind::UnmatchedBlockEnd);
        };

        debug!("Leaving `{}` block at line {}", frame.name(), self.program_counter);
        self.debugger.on_frame_popped(&frame);

        match frame {
            Frame::While { line } => self.program_counter = line,
            _ => self.program_counter += 1,
        }

        Ok(())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn script(&self) -> &Script {
        &self.script
    }

    #[must_use]
    pub const fn program_counter(&self) -> usize {
        self.program_counter
    }

    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn namespace_mut(&mut self) -> &mut Namespace {
        &mut self.namespace
    }

    #[must_use]
    pub fn call_stack(&self) -> &[Frame] {
        &self.call_stack
    }

    #[must_use]
    pub fn call_stack_depth(&self) -> usize {
        self.call_stack.len()
    }

    /// Whether the current statement is suspended on a command.
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.evaluation.is_some()
    }

    #[must_use]
    pub fn debugger(&self) -> &D {
        &self.debugger
    }

    pub fn into_debugger(self) -> D {
        self.debugger
    }

    #[must_use]
    pub fn error(&self) -> Option<&RuntimeError> {
        match &self.status {
            Status::Failed(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use pretty_assertions::assert_eq;

    fn program(source: &str) -> Program {
        Program::new(Rc::new(ScriptCache::new()), source, HashMap::<String, Value>::new(), CommandRegistry::with_builtins()).unwrap()
    }

    fn run(source: &str) -> Program {
        let mut program = program(source);
        for _ in 0..1000 {
            if program.done() {
                break;
            }
            program.cycle().unwrap();
        }

        assert!(program.done());
        program
    }

    #[test]
    fn empty_program_is_done() {
        let program = program("# nothing here");
        assert!(program.done());
        assert_eq!(program.state(), ProgramState::Done);
    }

    #[test]
    fn one_statement_per_cycle() {
        let mut program = program("a = 1; b = 2;");

        program.cycle().unwrap();
        assert_eq!(program.program_counter(), 1);
        assert!(!program.done());

        program.cycle().unwrap();
        assert_eq!(program.program_counter(), 2);
        assert!(program.done());

        program.cycle().unwrap();
        assert_eq!(program.program_counter(), 2);
    }

    #[test]
    fn while_loop() {
        let program = run("i = 0; total = 0; while i < 5 { total = total + i; i = i + 1; } done = true;");

        assert_eq!(program.namespace().get("i"), Some(&Value::Integer(5)));
        assert_eq!(program.namespace().get("total"), Some(&Value::Integer(10)));
        assert_eq!(program.namespace().get("done"), Some(&Value::Bool(true)));
        assert_eq!(program.call_stack_depth(), 0);
    }

    #[test]
    fn false_condition_skips_nested_blocks() {
        let program = run("x = 0; if 0 { if 1 { x = 1; } x = 2; } y = x;");
        assert_eq!(program.namespace().get("y"), Some(&Value::Integer(0)));
    }

    #[test]
    fn switch_default_case() {
        let program = run("s = 'b'; switch s { case 'a' { r = 1; } case 'b' { r = 2; } case _ { r = 3; } }");
        assert_eq!(program.namespace().get("r"), Some(&Value::Integer(2)));

        let program = run("s = 'z'; switch s { case 'a' { r = 1; } case _ { r = 3; } }");
        assert_eq!(program.namespace().get("r"), Some(&Value::Integer(3)));
    }

    #[test]
    fn failed_program_keeps_failing() {
        let mut program = program("x = 1;\n}\ny = 2;");

        program.cycle().unwrap();
        let error = program.cycle().unwrap_err();
        assert_eq!(error.kind, RuntimeErrorKind::UnmatchedBlockEnd);
        assert_eq!(error.line(), 2);

        assert!(program.done());
        assert_eq!(program.state(), ProgramState::Failed);
        assert_eq!(program.cycle(), Err(error));
        assert_eq!(program.namespace().get("y"), None);
    }

    #[test]
    fn unterminated_block() {
        let mut program = program("if false {\nx = 1;");
        let error = program.cycle().unwrap_err();
        assert_eq!(error.kind, RuntimeErrorKind::UnterminatedBlock { keyword: "if" });
    }
}
