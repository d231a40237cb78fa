//! Record validation.
//!
//! The [`Validator`] walks a record's fields in declaration order, evaluates
//! each field's constraint, and collects every failure. Only a non-record
//! input aborts the call.

use tracing::{debug, trace};

use crate::config::{UnsupportedFieldPolicy, ValidatorConfig};
use crate::constraint::Constraint;
use crate::error::{Error, FieldError, Result, ValidationError, ValidationErrors};
use crate::record::{Field, FieldValue, Inspect, Scalar, Shape};
use crate::tag::parse_tag;

/// Validates records against their field constraints.
///
/// Holds only configuration; a validator can be shared across threads and
/// reused for any number of calls.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Create a validator with the given configuration.
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a record.
    ///
    /// Returns `Ok(())` when every constrained field passes,
    /// [`Error::Validation`] with all failures otherwise, or
    /// [`Error::NotARecord`] when the input is not record-shaped.
    pub fn validate<T: Inspect + ?Sized>(&self, input: &T) -> Result<()> {
        let record = match input.inspect() {
            Shape::Record(record) => record,
            Shape::Other(type_name) => {
                debug!(type_name, "Rejected non-record input");
                return Err(Error::NotARecord { type_name });
            }
        };

        let mut errors = ValidationErrors::new();
        for field in record.fields() {
            self.validate_field(&field, &mut errors);
        }

        if errors.is_empty() {
            return Ok(());
        }

        debug!(
            record = record.record_name(),
            failures = errors.len(),
            "Record failed validation"
        );
        Err(Error::Validation(errors))
    }

    /// Validate one field, appending its failures.
    fn validate_field(&self, field: &Field<'_>, errors: &mut ValidationErrors) {
        let Some(expression) = field.tag else {
            return;
        };

        if !field.exported {
            errors.push(ValidationError::new(
                field.name,
                FieldError::UnexportedFieldValidation,
            ));
            return;
        }

        let constraint = match parse_tag(expression).and_then(|tag| tag.into_constraint()) {
            Ok(constraint) => constraint,
            Err(cause) => {
                errors.push(ValidationError::new(field.name, cause));
                return;
            }
        };

        match field.value.field_value() {
            FieldValue::Integer(value) => {
                self.check(field.name, None, &constraint, Scalar::Integer(value), errors);
            }
            FieldValue::Text(value) => {
                self.check(field.name, None, &constraint, Scalar::Text(value), errors);
            }
            FieldValue::IntegerSequence(values) => {
                for (i, value) in values.into_iter().enumerate() {
                    self.check(field.name, Some(i), &constraint, Scalar::Integer(value), errors);
                }
            }
            FieldValue::TextSequence(values) => {
                for (i, value) in values.into_iter().enumerate() {
                    self.check(field.name, Some(i), &constraint, Scalar::Text(value), errors);
                }
            }
            FieldValue::Unsupported(type_name) => match self.config.unsupported_fields {
                UnsupportedFieldPolicy::Report => {
                    errors.push(ValidationError::new(
                        field.name,
                        FieldError::UnsupportedFieldType { type_name },
                    ));
                }
                UnsupportedFieldPolicy::Skip => {
                    trace!(
                        field = field.name,
                        type_name,
                        "Skipping constraint on unsupported field type"
                    );
                }
            },
        }
    }

    fn check(
        &self,
        field: &str,
        index: Option<usize>,
        constraint: &Constraint<'_>,
        value: Scalar<'_>,
        errors: &mut ValidationErrors,
    ) {
        if let Err(cause) = constraint.evaluate(value, self.config.length_unit) {
            let error = match index {
                Some(index) => ValidationError::at_index(field, index, cause),
                None => ValidationError::new(field, cause),
            };
            errors.push(error);
        }
    }
}

/// Validate a record with the default configuration.
pub fn validate<T: Inspect + ?Sized>(input: &T) -> Result<()> {
    Validator::default().validate(input)
}
