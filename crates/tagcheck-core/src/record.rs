//! Record model.
//!
//! The validator never sees concrete record types. It asks a value for its
//! [`Shape`] through [`Inspect`], and a record lists its [`Field`]s through
//! [`Record`]. Each field exposes its value through [`FieldKind`], which maps
//! the declared Rust type onto the closed [`FieldValue`] set.
//!
//! Records are usually declared with the [`record!`](crate::record!) macro,
//! which derives all of the above from the struct definition.

use std::any::type_name;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// The shape of a value handed to the validator.
pub enum Shape<'a> {
    /// A record with a fixed, named set of fields.
    Record(&'a dyn Record),
    /// Anything else (scalar, sequence, mapping). Carries the type name.
    Other(&'static str),
}

impl Shape<'_> {
    /// Check if this is a record.
    pub fn is_record(&self) -> bool {
        matches!(self, Shape::Record(_))
    }
}

/// A value that can report its shape.
pub trait Inspect {
    /// Describe this value.
    fn inspect(&self) -> Shape<'_>;
}

/// A record whose fields can be listed at runtime.
pub trait Record {
    /// Name of the record type, used in logs.
    fn record_name(&self) -> &'static str;

    /// Fields in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// One declared field of a record.
pub struct Field<'a> {
    /// Field name.
    pub name: &'static str,
    /// Constraint expression attached to the field, if any.
    pub tag: Option<&'static str>,
    /// Whether the field is visible outside its declaring module.
    pub exported: bool,
    /// Field value. Only read once the field passes the visibility check.
    pub value: &'a dyn FieldKind,
}

impl<'a> Field<'a> {
    /// Create an exported field without a constraint.
    pub fn new(name: &'static str, value: &'a dyn FieldKind) -> Self {
        Self {
            name,
            tag: None,
            exported: true,
            value,
        }
    }

    /// Attach a constraint expression.
    pub fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Mark the field as not exported.
    pub fn unexported(mut self) -> Self {
        self.exported = false;
        self
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("exported", &self.exported)
            .finish_non_exhaustive()
    }
}

/// Field value shapes understood by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// A signed integer.
    Integer(i64),
    /// UTF-8 text.
    Text(&'a str),
    /// An ordered sequence of integers.
    IntegerSequence(Vec<i64>),
    /// An ordered sequence of text values.
    TextSequence(Vec<&'a str>),
    /// Any other declared type. Carries the type name.
    Unsupported(&'static str),
}

impl FieldValue<'_> {
    /// Returns the shape name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Integer(_) => "integer",
            FieldValue::Text(_) => "text",
            FieldValue::IntegerSequence(_) => "integer sequence",
            FieldValue::TextSequence(_) => "text sequence",
            FieldValue::Unsupported(name) => name,
        }
    }

    /// Check if this is a sequence shape.
    pub fn is_sequence(&self) -> bool {
        matches!(
            self,
            FieldValue::IntegerSequence(_) | FieldValue::TextSequence(_)
        )
    }
}

/// A single value a constraint is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar<'a> {
    /// A signed integer.
    Integer(i64),
    /// UTF-8 text.
    Text(&'a str),
}

impl Scalar<'_> {
    /// Returns the kind name for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Scalar::Integer(_) => "integer",
            Scalar::Text(_) => "text",
        }
    }
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(value) => write!(f, "{}", value),
            Scalar::Text(value) => write!(f, "{:?}", value),
        }
    }
}

/// Maps a field's declared type onto a [`FieldValue`].
pub trait FieldKind {
    /// Read the field value.
    fn field_value(&self) -> FieldValue<'_>;
}

/// Element types of sequence fields.
///
/// Resolved from the element type alone, so an empty sequence keeps its
/// shape.
pub trait SequenceElement: Sized {
    /// Build the field value for a sequence of `Self`.
    fn sequence_value(items: &[Self]) -> FieldValue<'_>;
}

macro_rules! impl_integer_field {
    ($($ty:ty),*) => {
        $(
            impl FieldKind for $ty {
                fn field_value(&self) -> FieldValue<'_> {
                    FieldValue::Integer(i64::from(*self))
                }
            }

            impl SequenceElement for $ty {
                fn sequence_value(items: &[Self]) -> FieldValue<'_> {
                    FieldValue::IntegerSequence(items.iter().map(|v| i64::from(*v)).collect())
                }
            }
        )*
    };
}

impl_integer_field!(i8, i16, i32, i64, u8, u16, u32);

// isize is at most 64 bits wide on every supported target.
impl FieldKind for isize {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Integer(*self as i64)
    }
}

impl SequenceElement for isize {
    fn sequence_value(items: &[Self]) -> FieldValue<'_> {
        FieldValue::IntegerSequence(items.iter().map(|v| *v as i64).collect())
    }
}

macro_rules! impl_unsupported_field {
    ($($ty:ty),*) => {
        $(
            impl FieldKind for $ty {
                fn field_value(&self) -> FieldValue<'_> {
                    FieldValue::Unsupported(type_name::<$ty>())
                }
            }

            impl SequenceElement for $ty {
                fn sequence_value(_items: &[Self]) -> FieldValue<'_> {
                    FieldValue::Unsupported(type_name::<[$ty]>())
                }
            }
        )*
    };
}

impl_unsupported_field!(bool, char, f32, f64);

// Wider integers are supported while the value fits in i64. A sequence with
// any out-of-range element is unsupported as a whole.
macro_rules! impl_checked_integer_field {
    ($($ty:ty),*) => {
        $(
            impl FieldKind for $ty {
                fn field_value(&self) -> FieldValue<'_> {
                    match i64::try_from(*self) {
                        Ok(value) => FieldValue::Integer(value),
                        Err(_) => FieldValue::Unsupported(type_name::<$ty>()),
                    }
                }
            }

            impl SequenceElement for $ty {
                fn sequence_value(items: &[Self]) -> FieldValue<'_> {
                    items
                        .iter()
                        .map(|v| i64::try_from(*v))
                        .collect::<Result<Vec<_>, _>>()
                        .map_or(
                            FieldValue::Unsupported(type_name::<[$ty]>()),
                            FieldValue::IntegerSequence,
                        )
                }
            }
        )*
    };
}

impl_checked_integer_field!(u64, usize, i128, u128);

impl FieldKind for str {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl FieldKind for String {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self.as_str())
    }
}

impl SequenceElement for String {
    fn sequence_value(items: &[Self]) -> FieldValue<'_> {
        FieldValue::TextSequence(items.iter().map(String::as_str).collect())
    }
}

impl<'s> SequenceElement for &'s str {
    fn sequence_value(items: &[Self]) -> FieldValue<'_> {
        FieldValue::TextSequence(items.to_vec())
    }
}

impl<T: SequenceElement> FieldKind for [T] {
    fn field_value(&self) -> FieldValue<'_> {
        T::sequence_value(self)
    }
}

impl<T: SequenceElement> FieldKind for Vec<T> {
    fn field_value(&self) -> FieldValue<'_> {
        T::sequence_value(self)
    }
}

impl<T: SequenceElement, const N: usize> FieldKind for [T; N] {
    fn field_value(&self) -> FieldValue<'_> {
        T::sequence_value(self)
    }
}

impl<T> FieldKind for Option<T> {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Unsupported(type_name::<Self>())
    }
}

impl<T: FieldKind + ?Sized> FieldKind for &T {
    fn field_value(&self) -> FieldValue<'_> {
        (**self).field_value()
    }
}

impl<T: FieldKind + ?Sized> FieldKind for Box<T> {
    fn field_value(&self) -> FieldValue<'_> {
        (**self).field_value()
    }
}

macro_rules! impl_inspect_other {
    ($($ty:ty),*) => {
        $(
            impl Inspect for $ty {
                fn inspect(&self) -> Shape<'_> {
                    Shape::Other(type_name::<$ty>())
                }
            }
        )*
    };
}

impl_inspect_other!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, str,
    String, (), serde_json::Value
);

impl<T> Inspect for [T] {
    fn inspect(&self) -> Shape<'_> {
        Shape::Other(type_name::<Self>())
    }
}

impl<T> Inspect for Vec<T> {
    fn inspect(&self) -> Shape<'_> {
        Shape::Other(type_name::<Self>())
    }
}

impl<T, const N: usize> Inspect for [T; N] {
    fn inspect(&self) -> Shape<'_> {
        Shape::Other(type_name::<Self>())
    }
}

impl<T> Inspect for Option<T> {
    fn inspect(&self) -> Shape<'_> {
        Shape::Other(type_name::<Self>())
    }
}

impl<K, V, S> Inspect for HashMap<K, V, S> {
    fn inspect(&self) -> Shape<'_> {
        Shape::Other(type_name::<Self>())
    }
}

impl<K, V> Inspect for BTreeMap<K, V> {
    fn inspect(&self) -> Shape<'_> {
        Shape::Other(type_name::<Self>())
    }
}

impl<'r> Inspect for dyn Record + 'r {
    fn inspect(&self) -> Shape<'_> {
        Shape::Record(self)
    }
}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn inspect(&self) -> Shape<'_> {
        (**self).inspect()
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn inspect(&self) -> Shape<'_> {
        (**self).inspect()
    }
}

/// Check whether a stringified field visibility makes the field readable
/// outside its declaring module. Used by [`record!`](crate::record!).
#[doc(hidden)]
pub fn visibility_is_exported(visibility: &str) -> bool {
    let compact: String = visibility.split_whitespace().collect();
    !matches!(compact.as_str(), "" | "pub(self)" | "pub(inself)")
}

/// Declare a record struct and implement [`Record`] and [`Inspect`] for it.
///
/// A field takes its constraint from a `#[validate("kind:argument")]`
/// attribute; any other field attributes, doc comments included, are kept
/// on the generated struct. Fields visible outside the declaring module are
/// exported. Private fields, `pub(self)` and `pub(in self)` are not.
///
/// ```
/// use tagcheck_core::{record, validate};
///
/// record! {
///     #[derive(Debug, Clone)]
///     pub struct Account {
///         /// Five-character account code.
///         #[validate("len:5")]
///         pub code: String,
///         #[validate("in:1,2,3")]
///         pub tier: i32,
///         pub note: String,
///     }
/// }
///
/// let account = Account { code: "hello".into(), tier: 2, note: String::new() };
/// assert!(validate(&account).is_ok());
/// ```
#[macro_export]
macro_rules! record {
    // All fields consumed.
    (
        @fields ($name:ident) [$($header:tt)*]
        [$({ [$($attr:tt)*] [$($tag:tt)*] [$($field_vis:tt)*] $field:ident [$ty:ty] })*]
        [] []
    ) => {
        $($header)* {
            $($($attr)* $($field_vis)* $field: $ty,)*
        }

        impl $crate::Record for $name {
            fn record_name(&self) -> &'static str {
                ::std::stringify!($name)
            }

            fn fields(&self) -> ::std::vec::Vec<$crate::Field<'_>> {
                ::std::vec![
                    $(
                        $crate::Field {
                            name: ::std::stringify!($field),
                            tag: ::std::option::Option::None
                                $(.or(::std::option::Option::Some($tag)))*,
                            exported: $crate::record::visibility_is_exported(
                                ::std::stringify!($($field_vis)*),
                            ),
                            value: &self.$field,
                        },
                    )*
                ]
            }
        }

        impl $crate::Inspect for $name {
            fn inspect(&self) -> $crate::Shape<'_> {
                $crate::Shape::Record(self)
            }
        }
    };

    // Constraint attribute. A second one on the same field falls through to
    // the pass-through rule and fails to compile.
    (
        @fields $name:tt $header:tt [$($done:tt)*] [$($attr:tt)*] []
        #[validate($tag:literal)] $($rest:tt)*
    ) => {
        $crate::record!(@fields $name $header [$($done)*] [$($attr)*] [$tag] $($rest)*);
    };

    // Any other field attribute.
    (
        @fields $name:tt $header:tt [$($done:tt)*] [$($attr:tt)*] [$($tag:tt)*]
        #[$meta:meta] $($rest:tt)*
    ) => {
        $crate::record!(
            @fields $name $header [$($done)*] [$($attr)* #[$meta]] [$($tag)*] $($rest)*
        );
    };

    (
        @fields $name:tt $header:tt [$($done:tt)*] [$($attr:tt)*] [$($tag:tt)*]
        $field_vis:vis $field:ident : $ty:ty , $($rest:tt)*
    ) => {
        $crate::record!(
            @fields $name $header
            [$($done)* { [$($attr)*] [$($tag)*] [$field_vis] $field [$ty] }]
            [] [] $($rest)*
        );
    };

    // Last field without a trailing comma.
    (
        @fields $name:tt $header:tt [$($done:tt)*] [$($attr:tt)*] [$($tag:tt)*]
        $field_vis:vis $field:ident : $ty:ty
    ) => {
        $crate::record!(
            @fields $name $header
            [$($done)* { [$($attr)*] [$($tag)*] [$field_vis] $field [$ty] }]
            [] []
        );
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident { $($body:tt)* }
    ) => {
        $crate::record!(@fields ($name) [$(#[$meta])* $vis struct $name] [] [] [] $($body)*);
    };
}
