//! Error types.
//!
//! A validation call either aborts with [`Error::NotARecord`] or collects
//! every per-field failure into [`ValidationErrors`].

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::constraint::Violation;

/// Errors returned by a validation call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input is not record-shaped. Nothing was validated.
    #[error("wrong argument given, expected a record but got {type_name}")]
    NotARecord {
        /// Type name of the rejected input.
        type_name: &'static str,
    },

    /// One or more fields failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

impl Error {
    /// Returns the collected field failures, if any.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Error::Validation(errors) => Some(errors),
            Error::NotARecord { .. } => None,
        }
    }
}

/// Result type for validation calls.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Why a single field (or sequence element) failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The constraint expression or its argument cannot be parsed.
    #[error("invalid constraint syntax in {expression:?}: {reason}")]
    InvalidConstraintSyntax {
        /// The offending expression.
        expression: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A constraint is declared on a field that is not exported.
    #[error("validation for unexported field is not allowed")]
    UnexportedFieldValidation,

    /// The constraint kind is not recognized.
    #[error("unknown constraint kind {0:?}")]
    UnknownConstraintKind(String),

    /// A constraint is declared on a field of a type the engine cannot evaluate.
    #[error("constraint on unsupported field type {type_name}")]
    UnsupportedFieldType {
        /// Declared type of the field.
        type_name: &'static str,
    },

    /// The value fails its constraint.
    #[error(transparent)]
    ConstraintViolation(#[from] Violation),
}

impl FieldError {
    /// Create a syntax error.
    pub fn invalid_syntax(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        FieldError::InvalidConstraintSyntax {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    /// Returns a stable, machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::InvalidConstraintSyntax { .. } => "invalid_constraint_syntax",
            FieldError::UnexportedFieldValidation => "unexported_field_validation",
            FieldError::UnknownConstraintKind(_) => "unknown_constraint_kind",
            FieldError::UnsupportedFieldType { .. } => "unsupported_field_type",
            FieldError::ConstraintViolation(_) => "constraint_violation",
        }
    }

    /// Check if this is a value failing its rule, as opposed to a
    /// declaration problem.
    pub fn is_violation(&self) -> bool {
        matches!(self, FieldError::ConstraintViolation(_))
    }
}

/// A failure attributed to one field, or one element of a sequence field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    field: String,
    index: Option<usize>,
    #[source]
    cause: FieldError,
}

impl ValidationError {
    /// Create an error for a whole field.
    pub fn new(field: impl Into<String>, cause: FieldError) -> Self {
        Self {
            field: field.into(),
            index: None,
            cause,
        }
    }

    /// Create an error for one element of a sequence field.
    pub fn at_index(field: impl Into<String>, index: usize, cause: FieldError) -> Self {
        Self {
            field: field.into(),
            index: Some(index),
            cause,
        }
    }

    /// Field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Element index within a sequence field.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Underlying cause.
    pub fn cause(&self) -> &FieldError {
        &self.cause
    }

    /// Field path, e.g. `tags` or `tags[2]`.
    pub fn path(&self) -> String {
        match self.index {
            Some(index) => format!("{}[{}]", self.field, index),
            None => self.field.clone(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path(), self.cause)
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationError", 4)?;
        state.serialize_field("field", &self.field)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("code", self.cause.code())?;
        state.serialize_field("message", &self.cause.to_string())?;
        state.end()
    }
}

/// Ordered collection of field failures from one validation call.
///
/// Order is field declaration order, then element order. Rendered as one
/// message per line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a failure.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Check if nothing failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate failures in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// All failures as a slice.
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    /// One rendered message per failure, in order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Errors loading a [`ValidatorConfig`](crate::config::ValidatorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config is not valid JSON for the expected schema.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
