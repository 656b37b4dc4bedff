//! Normalized result values
//!
//! Every platform reply is translated into a [`Value`], and every `exec`
//! returns an [`ExecResult`] carrying at most one value. Which shape a given
//! command produces is documented per [`CommandKind`](crate::CommandKind),
//! not discoverable at runtime.

use crate::error::CommandError;
use serde::{Deserialize, Serialize};

/// A normalized device reading or acknowledgment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Integer reading (angles, distances, levels, acks)
    Int(i32),
    /// Boolean reading (touch state)
    Bool(bool),
    /// Float sequence (RGB channels, all three preserved)
    Floats(Vec<f32>),
}

impl Value {
    fn shape(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Bool(_) => "boolean",
            Value::Floats(_) => "float sequence",
        }
    }
}

/// Outcome of one dispatched command
///
/// The uniform "one mapping out" shape shared by every driver: either empty
/// or one value under the conventional single slot. The NXT driver leaves it
/// empty for command kinds it does not handle; the other platforms never
/// produce an empty result for a supported kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecResult {
    value: Option<Value>,
}

impl ExecResult {
    /// An empty result (the NXT unimplemented-kind policy)
    pub fn empty() -> Self {
        Self { value: None }
    }

    /// A result carrying one value
    pub fn with_value(value: Value) -> Self {
        Self { value: Some(value) }
    }

    /// Whether the result carries no value
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Borrow the carried value, if any
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Take the carried value, if any
    pub fn into_value(self) -> Option<Value> {
        self.value
    }

    /// Extract an integer reading
    ///
    /// `kind` is the command that produced this result, used for the error
    /// message when the shape does not match.
    pub fn int(&self, kind: impl ToString) -> Result<i32, CommandError> {
        match &self.value {
            Some(Value::Int(v)) => Ok(*v),
            Some(other) => Err(CommandError::ValueType {
                expected: "integer",
                actual: other.shape(),
            }),
            None => Err(CommandError::EmptyResult {
                kind: kind.to_string(),
            }),
        }
    }

    /// Extract a boolean reading
    pub fn bool(&self, kind: impl ToString) -> Result<bool, CommandError> {
        match &self.value {
            Some(Value::Bool(v)) => Ok(*v),
            Some(other) => Err(CommandError::ValueType {
                expected: "boolean",
                actual: other.shape(),
            }),
            None => Err(CommandError::EmptyResult {
                kind: kind.to_string(),
            }),
        }
    }

    /// Extract a float-sequence reading
    pub fn floats(&self, kind: impl ToString) -> Result<Vec<f32>, CommandError> {
        match &self.value {
            Some(Value::Floats(v)) => Ok(v.clone()),
            Some(other) => Err(CommandError::ValueType {
                expected: "float sequence",
                actual: other.shape(),
            }),
            None => Err(CommandError::EmptyResult {
                kind: kind.to_string(),
            }),
        }
    }
}
