// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::time::{Duration, Instant};

use snek::Value;

use crate::{Command, CommandStep, RuntimeErrorKind};

/// `wait(ms)`: suspends until the duration has passed since the call
/// started. Never blocks.
#[derive(Debug)]
pub struct WaitCommand {
    started: Instant,
    duration: Duration,
}

impl WaitCommand {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            started: Instant::now(),
            duration,
        }
    }

    pub fn create(arguments: Vec<Value>) -> Result<Box<dyn Command>, RuntimeErrorKind> {
        let milliseconds = match arguments.as_slice() {
            [Value::Integer(ms)] => *ms as f64,
            [Value::Float(ms)] => *ms,
            _ => return Err(RuntimeErrorKind::invalid_argument("wait", "expected a single number of milliseconds")),
        };

        if !milliseconds.is_finite() || milliseconds < 0.0 {
            return Err(RuntimeErrorKind::invalid_argument("wait", format!("cannot wait for {milliseconds} ms")));
        }

        let duration = Duration::try_from_secs_f64(milliseconds / 1000.0)
            .map_err(|_| RuntimeErrorKind::invalid_argument("wait", format!("cannot wait for {milliseconds} ms")))?;

        Ok(Box::new(Self::new(duration)))
    }
}

impl Command for WaitCommand {
    fn next(&mut self) -> Result<CommandStep, RuntimeErrorKind> {
        if self.started.elapsed() >= self.duration {
            Ok(CommandStep::Finished(Value::Null))
        } else {
            Ok(CommandStep::Suspend)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum WaitUntilPhase {
    Request,
    Requested,
    Evaluated(Value),
    Abandoned,
}

/// `wait_until(expression)`: asks the program to evaluate the expression
/// every cycle and finishes with its value once it is truthy. Gives up with
/// a warning when the expression evaluates to `null`.
#[derive(Debug)]
pub struct WaitUntilCommand {
    expression: String,
    phase: WaitUntilPhase,
}

impl WaitUntilCommand {
    #[must_use]
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            phase: WaitUntilPhase::Request,
        }
    }

    pub fn create(arguments: Vec<Value>) -> Result<Box<dyn Command>, RuntimeErrorKind> {
        match <[Value; 1]>::try_from(arguments) {
            Ok([Value::String(expression)]) => Ok(Box::new(Self::new(expression))),
            _ => Err(RuntimeErrorKind::invalid_argument("wait_until", "expected the expression as a single string")),
        }
    }
}

impl Command for WaitUntilCommand {
    fn next(&mut self) -> Result<CommandStep, RuntimeErrorKind> {
        match std::mem::replace(&mut self.phase, WaitUntilPhase::Requested) {
            WaitUntilPhase::Request | WaitUntilPhase::Requested => {
                Ok(CommandStep::RequestContext(self.expression.clone()))
            }

            WaitUntilPhase::Evaluated(Value::Null) => {
                self.phase = WaitUntilPhase::Abandoned;
                Ok(CommandStep::Warning(format!("`{}` evaluated to null, no longer waiting", self.expression)))
            }

            WaitUntilPhase::Evaluated(value) if value.is_truthy() => Ok(CommandStep::Finished(value)),

            WaitUntilPhase::Evaluated(..) => {
                self.phase = WaitUntilPhase::Request;
                Ok(CommandStep::Suspend)
            }

            WaitUntilPhase::Abandoned => {
                self.phase = WaitUntilPhase::Abandoned;
                Ok(CommandStep::Finished(Value::Null))
            }
        }
    }

    fn supply_context(&mut self, expression: &str, value: Value) {
        if expression == self.expression {
            self.phase = WaitUntilPhase::Evaluated(value);
        }
    }
}
