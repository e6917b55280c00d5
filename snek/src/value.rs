// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{any::Any, cmp::Ordering, fmt::{Debug, Display}, rc::Rc};

use crate::Comparison;

#[derive(Clone, Debug)]
pub enum Value {
    /// hehe 5 billion dollar problem
    Null,

    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),

    /// Compares equal to every other value, but is never greater or less.
    Wildcard,

    Host(HostValue),
}

impl Value {
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Integer(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Wildcard => true,
            Self::Host(..) => true,
        }
    }

    #[must_use]
    pub fn compare(&self, other: &Self, comparison: Comparison) -> bool {
        let ordering = self.partial_cmp(other);

        match comparison {
            Comparison::Equality => self == other,
            Comparison::Inequality => self != other,
            Comparison::GreaterThan => ordering == Some(Ordering::Greater),
            Comparison::GreaterThanOrEqual => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            Comparison::LessThan => ordering == Some(Ordering::Less),
            Comparison::LessThanOrEqual => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        }
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(..) => "bool",
            Self::Integer(..) => "int",
            Self::Float(..) => "float",
            Self::String(..) => "str",
            Self::Wildcard => "wildcard",
            Self::Host(host) => host.type_name(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Wildcard, _) | (_, Self::Wildcard) => true,
            (Self::Null, Self::Null) => true,
            (Self::Bool(this), Self::Bool(that)) => this == that,
            (Self::Integer(this), Self::Integer(that)) => this == that,
            (Self::Integer(this), Self::Float(that)) => (*this as f64) == *that,
            (Self::Float(this), Self::Integer(that)) => *this == (*that as f64),
            (Self::Float(this), Self::Float(that)) => this == that,
            (Self::String(this), Self::String(that)) => this == that,
            (Self::Host(this), Self::Host(that)) => this.ptr_eq(that),
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Bool(this), Self::Bool(that)) => Some(this.cmp(that)),
            (Self::Integer(this), Self::Integer(that)) => Some(this.cmp(that)),
            (Self::Integer(this), Self::Float(that)) => (*this as f64).partial_cmp(that),
            (Self::Float(this), Self::Integer(that)) => this.partial_cmp(&(*that as f64)),
            (Self::Float(this), Self::Float(that)) => this.partial_cmp(that),
            (Self::String(this), Self::String(that)) => Some(this.cmp(that)),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(false) => f.write_str("false"),
            Self::Bool(true) => f.write_str("true"),
            Self::Integer(i) => Display::fmt(i, f),
            Self::Float(float) => f.write_fmt(format_args!("{float:?}")),
            Self::String(str) => f.write_str(str),
            Self::Wildcard => f.write_str("_"),
            Self::Host(host) => f.write_fmt(format_args!("<host {}>", host.type_name())),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<HostValue> for Value {
    fn from(value: HostValue) -> Self {
        Self::Host(value)
    }
}

/// An object owned by the embedding program, e.g. the active level.
#[derive(Clone)]
pub struct HostValue {
    name: &'static str,
    inner: Rc<dyn Any>,
}

impl HostValue {
    #[must_use]
    pub fn new<T: Any>(name: &'static str, value: T) -> Self {
        Self {
            name,
            inner: Rc::new(value),
        }
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Debug for HostValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostValue")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
