//! Constraint expression parsing.
//!
//! An expression has the form `kind:argument`. It is split on the first `:`;
//! both halves must be non-empty. The argument is not interpreted here.

use crate::constraint::{Constraint, ConstraintKind};
use crate::error::FieldError;

/// Separator between the kind and the argument.
pub const SEPARATOR: char = ':';

/// A syntactically valid constraint expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    kind: &'a str,
    argument: &'a str,
}

impl<'a> Tag<'a> {
    /// Raw kind identifier.
    pub fn kind_str(&self) -> &'a str {
        self.kind
    }

    /// Raw argument.
    pub fn argument(&self) -> &'a str {
        self.argument
    }

    /// Resolve the kind identifier.
    pub fn kind(&self) -> Result<ConstraintKind, FieldError> {
        self.kind.parse()
    }

    /// Resolve the kind and pair it with the argument.
    pub fn into_constraint(self) -> Result<Constraint<'a>, FieldError> {
        Ok(Constraint::new(self.kind()?, self.argument))
    }
}

/// Split a constraint expression into kind and argument.
pub fn parse_tag(expression: &str) -> Result<Tag<'_>, FieldError> {
    let (kind, argument) = expression
        .split_once(SEPARATOR)
        .ok_or_else(|| FieldError::invalid_syntax(expression, "missing ':' separator"))?;

    if kind.is_empty() {
        return Err(FieldError::invalid_syntax(expression, "empty constraint kind"));
    }
    if argument.is_empty() {
        return Err(FieldError::invalid_syntax(
            expression,
            "empty constraint argument",
        ));
    }

    Ok(Tag { kind, argument })
}
