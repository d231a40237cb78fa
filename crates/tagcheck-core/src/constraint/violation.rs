//! Constraint violation types.

use thiserror::Error;

use super::ConstraintKind;

/// A readable value that fails its constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// Text length differs from the required length.
    #[error("wrong length of {value:?}: len {actual}, want {expected}")]
    LengthMismatch {
        /// The offending text.
        value: String,
        /// Observed length.
        actual: usize,
        /// Required length. May be negative, in which case nothing matches.
        expected: i64,
    },

    /// The constraint does not apply to this kind of value.
    #[error("`{kind}` constraint applies to {expected} values, got {found}")]
    TypeMismatch {
        /// Constraint kind.
        kind: ConstraintKind,
        /// Value kind the constraint accepts.
        expected: &'static str,
        /// Description of the value found.
        found: String,
    },

    /// Value is not a member of the allowed set.
    #[error("value {value} not in allowed set [{}]", .allowed.join(", "))]
    NotInSet {
        /// The offending value, rendered.
        value: String,
        /// Allowed members.
        allowed: Vec<String>,
    },

    /// Integer below its lower bound.
    #[error("value {value} is less than minimum {min}")]
    BelowMinimum {
        /// The offending value.
        value: i64,
        /// Lower bound.
        min: i64,
    },

    /// Integer above its upper bound.
    #[error("value {value} is greater than maximum {max}")]
    AboveMaximum {
        /// The offending value.
        value: i64,
        /// Upper bound.
        max: i64,
    },

    /// Text shorter than its lower bound.
    #[error("length of {value:?} is {len}, less than minimum {min}")]
    TooShort {
        /// The offending text.
        value: String,
        /// Observed length.
        len: usize,
        /// Lower bound.
        min: i64,
    },

    /// Text longer than its upper bound.
    #[error("length of {value:?} is {len}, greater than maximum {max}")]
    TooLong {
        /// The offending text.
        value: String,
        /// Observed length.
        len: usize,
        /// Upper bound.
        max: i64,
    },
}

impl Violation {
    /// Returns the constraint kind this violation belongs to.
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Violation::LengthMismatch { .. } => ConstraintKind::Len,
            Violation::TypeMismatch { kind, .. } => *kind,
            Violation::NotInSet { .. } => ConstraintKind::In,
            Violation::BelowMinimum { .. } | Violation::TooShort { .. } => ConstraintKind::Min,
            Violation::AboveMaximum { .. } | Violation::TooLong { .. } => ConstraintKind::Max,
        }
    }
}
