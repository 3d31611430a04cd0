//! Borrowed dynamic values for untyped boundaries
//!
//! Scripting layers and option bags hand the emitter loosely-typed data.
//! `Value` carries that data without allocating so shape errors surface as
//! `TypeMismatch` instead of being impossible to express.

use crate::error::{EmitterError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Nil,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(&'a str),
    List(&'a [Value<'a>]),
}

impl<'a> Value<'a> {
    /// Numeric view of the value; integers widen to floats.
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Value::Integer(i) => Some(i as f64),
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match *self {
            Value::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&'a [Value<'a>]> {
        match *self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub(crate) fn expect_number(&self, expected: &'static str) -> Result<f32> {
        self.as_number()
            .map(|n| n as f32)
            .ok_or(EmitterError::type_mismatch(expected))
    }
}

impl From<f32> for Value<'_> {
    fn from(n: f32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<f64> for Value<'_> {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value<'_> {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Text(s)
    }
}

impl<'a> From<&'a [Value<'a>]> for Value<'a> {
    fn from(items: &'a [Value<'a>]) -> Self {
        Value::List(items)
    }
}
