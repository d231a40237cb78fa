//! tagcheck core - declarative field validation for flat records.
//!
//! Each field of a record may carry a constraint expression of the form
//! `kind:argument` (`len:5`, `in:1,2,3`, `min:1`, `max:100`). [`validate`]
//! evaluates every constrained field, element by element for sequence
//! fields, and returns all failures at once.
//!
//! ```
//! use tagcheck_core::{record, validate, Error};
//!
//! record! {
//!     pub struct User {
//!         #[validate("len:5")]
//!         pub code: String,
//!         #[validate("min:18")]
//!         pub age: i64,
//!         #[validate("max:5")]
//!         pub ratings: Vec<i32>,
//!     }
//! }
//!
//! let user = User { code: "hi".into(), age: 20, ratings: vec![1, 5, 10] };
//! let err = validate(&user).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "code: wrong length of \"hi\": len 2, want 5\n\
//!      ratings[2]: value 10 is greater than maximum 5"
//! );
//!
//! assert!(matches!(validate(&42i64), Err(Error::NotARecord { .. })));
//! ```

pub mod config;
pub mod constraint;
pub mod error;
pub mod record;
pub mod tag;
pub mod validator;

pub use config::{LengthUnit, UnsupportedFieldPolicy, ValidatorConfig};
pub use constraint::{Constraint, ConstraintKind, Violation};
pub use error::{ConfigError, Error, FieldError, Result, ValidationError, ValidationErrors};
pub use record::{Field, FieldKind, FieldValue, Inspect, Record, Scalar, SequenceElement, Shape};
pub use tag::{parse_tag, Tag};
pub use validator::{validate, Validator};
