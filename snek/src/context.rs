// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{cell::RefCell, collections::HashMap, fmt::Debug, rc::Rc};

use log::trace;

use crate::{parse_expression_source, parse_script, Expression, ParseError, Script};

/// Parsed scripts and expressions, keyed by their source text. Create one
/// per runtime and share it between programs; [`ScriptCache::clear`] it on a
/// full reload.
#[derive(Default)]
pub struct ScriptCache {
    scripts: RefCell<HashMap<String, Rc<Script>>>,
    expressions: RefCell<HashMap<String, Rc<Expression>>>,
}

impl ScriptCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached script for this source, parsing it on first use.
    /// Failures are not cached.
    pub fn tokenize(&self, source: &str) -> Result<Rc<Script>, ParseError> {
        if let Some(script) = self.scripts.borrow().get(source) {
            return Ok(Rc::clone(script));
        }

        trace!("Parsing script of {} bytes", source.len());
        let script = Rc::new(parse_script(source)?);

        self.scripts.borrow_mut().insert(source.to_string(), Rc::clone(&script));
        Ok(script)
    }

    /// Like [`ScriptCache::tokenize`], for a lone expression such as the
    /// text of a context request.
    pub fn expression(&self, source: &str) -> Result<Rc<Expression>, ParseError> {
        if let Some(expression) = self.expressions.borrow().get(source) {
            return Ok(Rc::clone(expression));
        }

        let expression = Rc::new(parse_expression_source(source)?);

        self.expressions.borrow_mut().insert(source.to_string(), Rc::clone(&expression));
        Ok(expression)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scripts.borrow().len() + self.expressions.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.scripts.borrow_mut().clear();
        self.expressions.borrow_mut().clear();
    }
}

impl Debug for ScriptCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptCache")
            .field("scripts", &self.scripts.borrow().len())
            .field("expressions", &self.expressions.borrow().len())
            .finish()
    }
}
