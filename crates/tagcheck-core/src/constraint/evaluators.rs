//! Per-kind constraint evaluators.
//!
//! Each evaluator takes one scalar value and the constraint, parses the
//! argument for that kind, and reports either success, a syntax error for an
//! unusable argument, or a [`Violation`].

use crate::config::LengthUnit;
use crate::error::FieldError;
use crate::record::Scalar;

use super::{Constraint, ConstraintKind, Violation};

/// Separator between members of an `in` argument.
const MEMBER_SEPARATOR: char = ',';

/// `len:N` - text length must equal N.
pub(super) fn check_len(
    constraint: &Constraint<'_>,
    value: Scalar<'_>,
    unit: LengthUnit,
) -> Result<(), FieldError> {
    let text = match value {
        Scalar::Text(text) => text,
        Scalar::Integer(_) => return Err(type_mismatch(ConstraintKind::Len, "text", value)),
    };

    let expected: i64 = constraint
        .argument()
        .parse()
        .map_err(|_| constraint.syntax_error("length must be an integer"))?;

    let actual = unit.measure(text);
    if length_as_i64(actual) != expected {
        return Err(Violation::LengthMismatch {
            value: text.to_string(),
            actual,
            expected,
        }
        .into());
    }

    Ok(())
}

/// `in:a,b,c` - value must be one of the listed members.
///
/// Integer values require every member to parse as an integer. An empty
/// member between separators stands for the empty string.
pub(super) fn check_in(constraint: &Constraint<'_>, value: Scalar<'_>) -> Result<(), FieldError> {
    let members: Vec<&str> = constraint.argument().split(MEMBER_SEPARATOR).collect();
    if members.iter().all(|member| member.is_empty()) {
        return Err(constraint.syntax_error("allowed set is empty"));
    }

    let found = match value {
        Scalar::Integer(v) => {
            let allowed = members
                .iter()
                .map(|member| member.parse::<i64>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| constraint.syntax_error("allowed set members must be integers"))?;
            allowed.contains(&v)
        }
        Scalar::Text(text) => members.contains(&text),
    };

    if !found {
        return Err(Violation::NotInSet {
            value: value.to_string(),
            allowed: members.iter().map(|m| m.to_string()).collect(),
        }
        .into());
    }

    Ok(())
}

/// `min:N` - integer value, or text length, must be at least N.
pub(super) fn check_min(
    constraint: &Constraint<'_>,
    value: Scalar<'_>,
    unit: LengthUnit,
) -> Result<(), FieldError> {
    let min = parse_bound(constraint)?;

    match value {
        Scalar::Integer(v) if v < min => Err(Violation::BelowMinimum { value: v, min }.into()),
        Scalar::Text(text) => {
            let len = unit.measure(text);
            if length_as_i64(len) < min {
                Err(Violation::TooShort {
                    value: text.to_string(),
                    len,
                    min,
                }
                .into())
            } else {
                Ok(())
            }
        }
        Scalar::Integer(_) => Ok(()),
    }
}

/// `max:N` - integer value, or text length, must be at most N.
pub(super) fn check_max(
    constraint: &Constraint<'_>,
    value: Scalar<'_>,
    unit: LengthUnit,
) -> Result<(), FieldError> {
    let max = parse_bound(constraint)?;

    match value {
        Scalar::Integer(v) if v > max => Err(Violation::AboveMaximum { value: v, max }.into()),
        Scalar::Text(text) => {
            let len = unit.measure(text);
            if length_as_i64(len) > max {
                Err(Violation::TooLong {
                    value: text.to_string(),
                    len,
                    max,
                }
                .into())
            } else {
                Ok(())
            }
        }
        Scalar::Integer(_) => Ok(()),
    }
}

fn parse_bound(constraint: &Constraint<'_>) -> Result<i64, FieldError> {
    constraint
        .argument()
        .parse()
        .map_err(|_| constraint.syntax_error("bound must be an integer"))
}

fn length_as_i64(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

fn type_mismatch(kind: ConstraintKind, expected: &'static str, value: Scalar<'_>) -> FieldError {
    Violation::TypeMismatch {
        kind,
        expected,
        found: format!("{} {}", value.kind_name(), value),
    }
    .into()
}
