// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{collections::HashMap, rc::Rc};

use pretty_assertions::assert_eq;
use snek::{ScriptCache, Value};
use snek_interpreter::Program;
use tests::{run_to_completion, test_registry, TestDebugger};

const SOURCE: &str = "
count = start;
while count < 3 {
    count = count + 1;
}
";

#[test]
fn tokenizing_twice_returns_same_script() {
    let cache = ScriptCache::new();

    let first = cache.tokenize(SOURCE).unwrap();
    let second = cache.tokenize(SOURCE).unwrap();

    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn failed_parses_are_not_cached() {
    let cache = ScriptCache::new();

    assert!(cache.tokenize("x = ;").is_err());
    assert!(cache.tokenize("x = ;").is_err());
    assert!(cache.is_empty());
}

#[test]
fn programs_share_a_cache_but_not_state() {
    tests::init_logger();
    let cache = Rc::new(ScriptCache::new());

    let spawn = |start: i64| {
        Program::with_debugger(
            Rc::clone(&cache),
            SOURCE,
            HashMap::from([("start", Value::Integer(start))]),
            test_registry(),
            TestDebugger::default(),
        ).unwrap()
    };

    let mut first = spawn(0);
    let mut second = spawn(2);
    assert_eq!(cache.len(), 1);

    // Interleave them the way a host would.
    while !first.done() || !second.done() {
        first.cycle().unwrap();
        second.cycle().unwrap();
    }

    assert_eq!(first.namespace().get("count"), Some(&Value::Integer(3)));
    assert_eq!(second.namespace().get("count"), Some(&Value::Integer(3)));
    assert!(first.debugger().lines.len() > second.debugger().lines.len());

    let mut third = spawn(5);
    run_to_completion(&mut third, 100);
    assert_eq!(third.namespace().get("count"), Some(&Value::Integer(5)));
    assert_eq!(cache.len(), 1);
}

#[test]
fn context_requests_use_the_cache() {
    let cache = ScriptCache::new();

    let first = cache.expression("get_player_pos()").unwrap();
    let second = cache.expression("get_player_pos()").unwrap();

    assert!(Rc::ptr_eq(&first, &second));
}
