// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::rc::Rc;

use log::{trace, warn};
use snek::{CallExpression, Expression, ScriptCache, Value};

use crate::{operators, Command, CommandRegistry, CommandStep, Debugger, Namespace, RuntimeErrorKind};

/// Everything an [`Evaluation`] may consult while it is stepped.
pub struct EvalContext<'program> {
    pub namespace: &'program Namespace,
    pub registry: &'program CommandRegistry,
    pub cache: &'program ScriptCache,
    pub debugger: &'program mut dyn Debugger,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// Waiting on a command; step again with the same expression.
    Suspended,
    Complete(Value),
}

/// The resumable state of evaluating one expression.
///
/// Operands are reduced depth-first, left to right. Each finished operand is
/// kept in `operands`, while the one in progress has its own nested
/// evaluation in `pending`. Once all operands are known the expression
/// itself is applied, which for a call means stepping its command until it
/// finishes.
#[derive(Default)]
pub struct Evaluation {
    operands: Vec<Value>,
    pending: Option<Box<Evaluation>>,
    call: Option<PendingCall>,
}

impl Evaluation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the evaluation of `expression` as far as possible without
    /// waiting. Must be called with the same expression until it completes.
    pub fn step(&mut self, expression: &Expression, ctx: &mut EvalContext<'_>) -> Result<Progress, RuntimeErrorKind> {
        if self.call.is_none() {
            while let Some(operand) = expression.operand(self.operands.len()) {
                let evaluation = self.pending.get_or_insert_with(Box::default);

                match evaluation.step(operand, ctx)? {
                    Progress::Suspended => return Ok(Progress::Suspended),
                    Progress::Complete(value) => {
                        self.pending = None;
                        self.operands.push(value);
                    }
                }
            }
        }

        let value = match expression {
            Expression::Literal(value) => value.clone(),
            Expression::Reference(name) => ctx.namespace.resolve(name),

            Expression::Unary(unary) => {
                let operand = self.operands.pop().unwrap_or(Value::Null);
                operators::apply_unary(unary.operator, operand)?
            }

            Expression::Binary(bi) => {
                let rhs = self.operands.pop().unwrap_or(Value::Null);
                let lhs = self.operands.pop().unwrap_or(Value::Null);
                operators::apply_binary(bi.operator, lhs, rhs)?
            }

            Expression::Call(call) => return self.step_call(call, ctx),
        };

        Ok(Progress::Complete(value))
    }

    #[must_use]
    pub fn is_waiting_on_command(&self) -> bool {
        self.call.is_some() || self.pending.as_ref().is_some_and(|pending| pending.is_waiting_on_command())
    }

    fn step_call(&mut self, call: &CallExpression, ctx: &mut EvalContext<'_>) -> Result<Progress, RuntimeErrorKind> {
        let mut pending = match self.call.take() {
            Some(pending) => pending,
            None => PendingCall::start(call, std::mem::take(&mut self.operands), ctx)?,
        };

        match pending.step(ctx)? {
            Some(value) => {
                trace!("Command `{}` finished with {value}", call.name);
                ctx.debugger.leave_command(&call.name, &value);
                Ok(Progress::Complete(value))
            }

            None => {
                self.call = Some(pending);
                Ok(Progress::Suspended)
            }
        }
    }
}

struct PendingCall {
    name: Rc<str>,
    command: Box<dyn Command>,
    context: Option<ContextRequest>,
}

struct ContextRequest {
    source: String,
    expression: Rc<Expression>,
    evaluation: Box<Evaluation>,
}

impl PendingCall {
    fn start(call: &CallExpression, arguments: Vec<Value>, ctx: &mut EvalContext<'_>) -> Result<Self, RuntimeErrorKind> {
        ctx.debugger.enter_command(&call.name, &arguments);
        let command = ctx.registry.instantiate(&call.name, arguments)?;

        Ok(Self {
            name: Rc::from(call.name.as_str()),
            command,
            context: None,
        })
    }

    /// Steps the command until it finishes or suspends. Warnings and
    /// context requests are handled in between.
    fn step(&mut self, ctx: &mut EvalContext<'_>) -> Result<Option<Value>, RuntimeErrorKind> {
        loop {
            if let Some(request) = &mut self.context {
                match request.evaluation.step(&request.expression, ctx)? {
                    Progress::Suspended => return Ok(None),
                    Progress::Complete(value) => {
                        let source = std::mem::take(&mut request.source);
                        self.context = None;

                        trace!("Supplying `{source}` = {value} to `{}`", self.name);
                        self.command.supply_context(&source, value);
                    }
                }
            }

            match self.command.next()? {
                CommandStep::Finished(value) => return Ok(Some(value)),
                CommandStep::Suspend => return Ok(None),

                CommandStep::Warning(message) => {
                    warn!("{}: {message}", self.name);
                    ctx.debugger.on_warning(&self.name, &message);
                }

                CommandStep::RequestContext(source) => {
                    let expression = match ctx.cache.expression(&source) {
                        Ok(expression) => expression,
                        Err(error) => return Err(RuntimeErrorKind::ContextParse { request: source, error }),
                    };

                    self.context = Some(ContextRequest {
                        source,
                        expression,
                        evaluation: Box::default(),
                    });
                }
            }
        }
    }
}
