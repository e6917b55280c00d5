// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{cell::{Cell, RefCell}, collections::HashMap, rc::Rc, thread::sleep, time::Duration};

use pretty_assertions::assert_eq;
use snek::{HostValue, Value};
use snek_interpreter::{Command, CommandStep, ProgramState, RuntimeErrorKind};
use tests::{program, program_with, run_to_completion, test_registry};

#[test]
fn wait_keeps_program_at_same_statement() {
    let mut program = program("write('before'); wait(300); write('after');");

    program.cycle().unwrap();
    assert_eq!(program.program_counter(), 1);

    for _ in 0..10 {
        program.cycle().unwrap();
        assert_eq!(program.program_counter(), 1);
        assert_eq!(program.state(), ProgramState::Running);
        assert!(program.is_suspended());
    }

    sleep(Duration::from_millis(350));

    program.cycle().unwrap();
    assert_eq!(program.program_counter(), 2);
    assert!(!program.is_suspended());

    program.cycle().unwrap();
    assert!(program.done());
    assert_eq!(program.debugger().output, ["before", "after"]);
}

#[test]
fn run_sleeps_between_cycles() {
    let mut program = program("wait(20); write('done');");
    program.run(Duration::from_millis(1)).unwrap();

    assert!(program.done());
    assert_eq!(program.debugger().output, ["done"]);
}

/// Suspends `remaining` times before finishing with `value`.
struct Slow {
    remaining: u32,
    value: Value,
}

impl Command for Slow {
    fn next(&mut self) -> Result<CommandStep, RuntimeErrorKind> {
        if self.remaining == 0 {
            return Ok(CommandStep::Finished(self.value.clone()));
        }

        self.remaining -= 1;
        Ok(CommandStep::Suspend)
    }
}

#[test]
fn suspended_command_is_resumed_not_recreated() {
    let created = Rc::new(Cell::new(0));

    let mut registry = test_registry();
    let counter = Rc::clone(&created);
    registry.register("slow", move |args| {
        counter.set(counter.get() + 1);
        let value = args.into_iter().next().unwrap_or(Value::Null);
        Ok(Box::new(Slow { remaining: 3, value }) as Box<dyn Command>)
    });

    let mut program = program_with("x = slow(5) + 1;", registry, HashMap::new());
    let cycles = run_to_completion(&mut program, 100);

    assert_eq!(cycles, 4);
    assert_eq!(created.get(), 1);
    assert_eq!(program.namespace().get("x"), Some(&Value::Integer(6)));
}

/// Asks for `get_player_pos()` and finishes with whatever it was given.
struct AskPosition {
    answer: Option<Value>,
    received: Rc<RefCell<Vec<(String, Value)>>>,
}

impl Command for AskPosition {
    fn next(&mut self) -> Result<CommandStep, RuntimeErrorKind> {
        match self.answer.take() {
            None => Ok(CommandStep::RequestContext("get_player_pos()".into())),
            Some(value) => Ok(CommandStep::Finished(value)),
        }
    }

    fn supply_context(&mut self, expression: &str, value: Value) {
        self.received.borrow_mut().push((expression.to_string(), value.clone()));
        self.answer = Some(value);
    }
}

fn position_registry(received: &Rc<RefCell<Vec<(String, Value)>>>, position_delay: u32) -> snek_interpreter::CommandRegistry {
    let mut registry = test_registry();

    registry.register("get_player_pos", move |_| {
        Ok(Box::new(Slow { remaining: position_delay, value: Value::from("3,4") }) as Box<dyn Command>)
    });

    let received = Rc::clone(received);
    registry.register("ask_position", move |_| {
        Ok(Box::new(AskPosition { answer: None, received: Rc::clone(&received) }) as Box<dyn Command>)
    });

    registry
}

#[test]
fn context_request_receives_direct_evaluation() {
    let received = Rc::new(RefCell::new(Vec::new()));
    let mut program = program_with(
        "direct = get_player_pos(); asked = ask_position();",
        position_registry(&received, 0),
        HashMap::new(),
    );

    run_to_completion(&mut program, 100);

    let direct = program.namespace().get("direct").cloned();
    assert_eq!(direct, Some(Value::from("3,4")));
    assert_eq!(program.namespace().get("asked").cloned(), direct);
    assert_eq!(*received.borrow(), [("get_player_pos()".to_string(), Value::from("3,4"))]);
}

#[test]
fn context_request_may_suspend() {
    let received = Rc::new(RefCell::new(Vec::new()));
    let mut program = program_with("asked = ask_position();", position_registry(&received, 2), HashMap::new());

    program.cycle().unwrap();
    assert!(program.is_suspended());
    assert!(received.borrow().is_empty());

    program.cycle().unwrap();
    assert!(received.borrow().is_empty());

    program.cycle().unwrap();
    assert!(program.done());
    assert_eq!(program.namespace().get("asked"), Some(&Value::from("3,4")));
    assert_eq!(received.borrow().len(), 1);
}

#[test]
fn context_request_sees_host_values() {
    let level = HostValue::new("level", String::from("forest"));

    struct LevelName {
        level: Option<Value>,
    }

    impl Command for LevelName {
        fn next(&mut self) -> Result<CommandStep, RuntimeErrorKind> {
            let Some(level) = self.level.take() else {
                return Ok(CommandStep::RequestContext("level".into()));
            };

            let Value::Host(host) = level else {
                return Ok(CommandStep::Finished(Value::Null));
            };

            let name = host.downcast_ref::<String>().cloned().unwrap_or_default();
            Ok(CommandStep::Finished(Value::String(name)))
        }

        fn supply_context(&mut self, _: &str, value: Value) {
            self.level = Some(value);
        }
    }

    let mut registry = test_registry();
    registry.register("level_name", |_| Ok(Box::new(LevelName { level: None }) as Box<dyn Command>));

    let mut program = program_with(
        "name = level_name();",
        registry,
        HashMap::from([("level".to_string(), Value::Host(level))]),
    );
    run_to_completion(&mut program, 10);

    assert_eq!(program.namespace().get("name"), Some(&Value::from("forest")));
}

/// Opens a dialog on the current level. Without a level it warns and
/// completes with `null`.
struct Dialog {
    phase: DialogPhase,
}

enum DialogPhase {
    Start,
    Level(Value),
    Done,
}

impl Command for Dialog {
    fn next(&mut self) -> Result<CommandStep, RuntimeErrorKind> {
        match std::mem::replace(&mut self.phase, DialogPhase::Done) {
            DialogPhase::Start => {
                self.phase = DialogPhase::Start;
                Ok(CommandStep::RequestContext("level".into()))
            }
            DialogPhase::Level(Value::Null) => Ok(CommandStep::Warning("no level to open a dialog on".into())),
            DialogPhase::Level(..) => Ok(CommandStep::Finished(Value::Bool(true))),
            DialogPhase::Done => Ok(CommandStep::Finished(Value::Null)),
        }
    }

    fn supply_context(&mut self, _: &str, value: Value) {
        self.phase = DialogPhase::Level(value);
    }
}

fn dialog_program(level: Value) -> snek_interpreter::Program<tests::TestDebugger> {
    let mut registry = test_registry();
    registry.register("dialog", |_| Ok(Box::new(Dialog { phase: DialogPhase::Start }) as Box<dyn Command>));

    program_with(
        "answer = dialog('Hello'); write('continued');",
        registry,
        HashMap::from([("level".to_string(), level)]),
    )
}

#[test]
fn missing_host_object_is_a_warning() {
    let mut program = dialog_program(Value::Null);
    run_to_completion(&mut program, 10);

    assert_eq!(program.namespace().get("answer"), Some(&Value::Null));
    assert_eq!(program.debugger().warnings, [("dialog".to_string(), "no level to open a dialog on".to_string())]);
    assert_eq!(program.debugger().output, ["continued"]);
}

#[test]
fn present_host_object() {
    let mut program = dialog_program(Value::Host(HostValue::new("level", ())));
    run_to_completion(&mut program, 10);

    assert_eq!(program.namespace().get("answer"), Some(&Value::Bool(true)));
    assert!(program.debugger().warnings.is_empty());
}

#[test]
fn wait_until_polls_every_cycle() {
    let polls = Rc::new(Cell::new(0));

    let mut registry = test_registry();
    let counter = Rc::clone(&polls);
    registry.register_simple("door_open", move |_| {
        counter.set(counter.get() + 1);
        Ok(Value::Bool(counter.get() >= 3))
    });

    let mut program = program_with("opened = wait_until('door_open()');", registry, HashMap::new());

    program.cycle().unwrap();
    program.cycle().unwrap();
    assert!(!program.done());
    assert_eq!(polls.get(), 2);

    program.cycle().unwrap();
    assert!(program.done());
    assert_eq!(polls.get(), 3);
    assert_eq!(program.namespace().get("opened"), Some(&Value::Bool(true)));
}

#[test]
fn wait_until_gives_up_on_null() {
    let mut program = program_with("wait_until('level'); write('next');", test_registry(), HashMap::from([("level".to_string(), Value::Null)]));
    run_to_completion(&mut program, 10);

    assert_eq!(program.debugger().warnings.len(), 1);
    assert_eq!(program.debugger().warnings[0].0, "wait_until");
    assert_eq!(program.debugger().output, ["next"]);
}
