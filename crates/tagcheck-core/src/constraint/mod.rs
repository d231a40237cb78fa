//! Constraint kinds and evaluation.
//!
//! Four kinds are supported:
//! - `len:N` - text length equals N
//! - `in:a,b,c` - value is one of the listed members
//! - `min:N` - integer value (or text length) is at least N
//! - `max:N` - integer value (or text length) is at most N

mod evaluators;
mod violation;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::LengthUnit;
use crate::error::FieldError;
use crate::record::Scalar;

pub use violation::Violation;

/// The closed set of constraint kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    /// Exact text length.
    Len,
    /// Membership in an allowed set.
    In,
    /// Lower bound.
    Min,
    /// Upper bound.
    Max,
}

impl ConstraintKind {
    /// All kinds, in a fixed order.
    pub const ALL: [ConstraintKind; 4] = [
        ConstraintKind::Len,
        ConstraintKind::In,
        ConstraintKind::Min,
        ConstraintKind::Max,
    ];

    /// Returns the identifier used in constraint expressions.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::Len => "len",
            ConstraintKind::In => "in",
            ConstraintKind::Min => "min",
            ConstraintKind::Max => "max",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstraintKind {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConstraintKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| FieldError::UnknownConstraintKind(s.to_string()))
    }
}

/// A parsed constraint: a resolved kind plus its raw argument.
///
/// The argument is interpreted by the evaluator for each value, so argument
/// errors are reported per evaluated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraint<'a> {
    kind: ConstraintKind,
    argument: &'a str,
}

impl<'a> Constraint<'a> {
    /// Create a constraint.
    pub fn new(kind: ConstraintKind, argument: &'a str) -> Self {
        Self { kind, argument }
    }

    /// Get the constraint kind.
    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// Get the raw argument.
    pub fn argument(&self) -> &'a str {
        self.argument
    }

    /// Evaluate the constraint against a single value.
    pub fn evaluate(&self, value: Scalar<'_>, unit: LengthUnit) -> Result<(), FieldError> {
        match self.kind {
            ConstraintKind::Len => evaluators::check_len(self, value, unit),
            ConstraintKind::In => evaluators::check_in(self, value),
            ConstraintKind::Min => evaluators::check_min(self, value, unit),
            ConstraintKind::Max => evaluators::check_max(self, value, unit),
        }
    }

    /// Build a syntax error for this constraint's argument.
    pub(crate) fn syntax_error(&self, reason: &str) -> FieldError {
        FieldError::invalid_syntax(self.to_string(), reason)
    }
}

impl fmt::Display for Constraint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.argument)
    }
}
