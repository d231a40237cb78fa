//! Integration tests for record validation.

use std::collections::{BTreeMap, HashMap};

use pretty_assertions::assert_eq;
use tagcheck_core::{record, validate, ConstraintKind, Error, FieldError, ValidationErrors, Violation};

record! {
    #[derive(Debug, Clone)]
    pub struct Plain {
        pub name: String,
        pub age: i64,
        pub tags: Vec<String>,
        pub ratio: f64,
        hidden: bool,
    }
}

record! {
    #[derive(Debug, Clone)]
    pub struct Order {
        #[validate("len:5")]
        pub code: String,
        #[validate("in:1,2,3")]
        pub priority: i32,
        #[validate("max:5")]
        pub quantities: Vec<i64>,
        #[validate("len")]
        pub reference: String,
        #[validate("in:draft,placed,shipped")]
        pub status: String,
        #[validate("min:2")]
        pub labels: Vec<String>,
    }
}

fn valid_order() -> Order {
    Order {
        code: "hello".to_string(),
        priority: 2,
        quantities: vec![1, 5],
        reference: "ignored".to_string(),
        status: "placed".to_string(),
        labels: vec!["ab".to_string(), "cde".to_string()],
    }
}

fn field_errors(result: Result<(), Error>) -> ValidationErrors {
    match result {
        Err(Error::Validation(errors)) => errors,
        other => panic!("expected validation errors, got {:?}", other),
    }
}

// =============================================================================
// Record shape
// =============================================================================

#[test]
fn test_non_record_inputs_are_rejected() {
    let map: HashMap<String, i64> = HashMap::new();
    let tree: BTreeMap<String, String> = BTreeMap::new();

    assert!(matches!(validate(&1i32), Err(Error::NotARecord { .. })));
    assert!(matches!(validate("order"), Err(Error::NotARecord { .. })));
    assert!(matches!(validate(&"order".to_string()), Err(Error::NotARecord { .. })));
    assert!(matches!(validate(&vec![valid_order()]), Err(Error::NotARecord { .. })));
    assert!(matches!(validate(&map), Err(Error::NotARecord { .. })));
    assert!(matches!(validate(&tree), Err(Error::NotARecord { .. })));
    assert!(matches!(validate(&Some(1u8)), Err(Error::NotARecord { .. })));
    assert!(matches!(
        validate(&serde_json::json!({ "code": "hello" })),
        Err(Error::NotARecord { .. })
    ));
}

#[test]
fn test_record_behind_reference_and_box() {
    let order = valid_order();
    let reference = &order;
    let boxed: Box<Order> = Box::new(order.clone());

    assert_eq!(validate(&reference).unwrap_err(), validate(&order).unwrap_err());
    assert_eq!(validate(&boxed).unwrap_err(), validate(&order).unwrap_err());
}

#[test]
fn test_untagged_record_passes() {
    let plain = Plain {
        name: String::new(),
        age: -1,
        tags: vec![],
        ratio: f64::NAN,
        hidden: true,
    };
    assert!(validate(&plain).is_ok());
}

// =============================================================================
// Constraint evaluation
// =============================================================================

#[test]
fn test_len_on_text() {
    let errors = field_errors(validate(&valid_order()));
    // Only the malformed `len` tag fails on a valid order.
    assert_eq!(errors.len(), 1);

    let order = Order {
        code: "hi".to_string(),
        ..valid_order()
    };
    let errors = field_errors(validate(&order));
    let first = &errors.as_slice()[0];
    assert_eq!(first.field(), "code");
    let message = first.to_string();
    assert!(message.contains('2'), "{}", message);
    assert!(message.contains('5'), "{}", message);
    assert_eq!(
        first.cause(),
        &FieldError::ConstraintViolation(Violation::LengthMismatch {
            value: "hi".to_string(),
            actual: 2,
            expected: 5,
        })
    );
}

#[test]
fn test_in_on_integer() {
    let order = Order {
        priority: 4,
        ..valid_order()
    };
    let errors = field_errors(validate(&order));
    assert_eq!(errors.as_slice()[0].field(), "priority");
    assert_eq!(
        errors.as_slice()[0].cause(),
        &FieldError::ConstraintViolation(Violation::NotInSet {
            value: "4".to_string(),
            allowed: vec!["1".to_string(), "2".to_string(), "3".to_string()],
        })
    );
}

#[test]
fn test_sequence_elements_fail_individually() {
    let order = Order {
        quantities: vec![1, 5, 10],
        ..valid_order()
    };
    let errors = field_errors(validate(&order));
    let quantity_errors: Vec<_> = errors
        .iter()
        .filter(|e| e.field() == "quantities")
        .collect();

    assert_eq!(quantity_errors.len(), 1);
    assert_eq!(quantity_errors[0].index(), Some(2));
    assert_eq!(
        quantity_errors[0].cause(),
        &FieldError::ConstraintViolation(Violation::AboveMaximum { value: 10, max: 5 })
    );
}

#[test]
fn test_malformed_tag_does_not_stop_other_fields() {
    let order = Order {
        code: "toolong".to_string(),
        status: "lost".to_string(),
        ..valid_order()
    };
    let errors = field_errors(validate(&order));

    let fields: Vec<_> = errors.iter().map(|e| e.field()).collect();
    assert_eq!(fields, vec!["code", "reference", "status"]);
    assert!(matches!(
        errors.as_slice()[1].cause(),
        FieldError::InvalidConstraintSyntax { .. }
    ));
}

#[test]
fn test_text_sequence_min_length() {
    let order = Order {
        labels: vec!["a".to_string(), "bc".to_string(), "".to_string()],
        ..valid_order()
    };
    let errors = field_errors(validate(&order));
    let indices: Vec<_> = errors
        .iter()
        .filter(|e| e.field() == "labels")
        .map(|e| e.index())
        .collect();
    assert_eq!(indices, vec![Some(0), Some(2)]);
    assert!(errors
        .iter()
        .filter(|e| e.field() == "labels")
        .all(|e| matches!(e.cause(), FieldError::ConstraintViolation(v) if v.kind() == ConstraintKind::Min)));
}

// =============================================================================
// Aggregation
// =============================================================================

#[test]
fn test_message_order_follows_declaration_then_elements() {
    let order = Order {
        code: "hi".to_string(),
        priority: 9,
        quantities: vec![6, 1, 7],
        status: "lost".to_string(),
        ..valid_order()
    };

    let err = validate(&order).unwrap_err();
    assert_eq!(
        err.to_string(),
        [
            "code: wrong length of \"hi\": len 2, want 5",
            "priority: value 9 not in allowed set [1, 2, 3]",
            "quantities[0]: value 6 is greater than maximum 5",
            "quantities[2]: value 7 is greater than maximum 5",
            "reference: invalid constraint syntax in \"len\": missing ':' separator",
            "status: value \"lost\" not in allowed set [draft, placed, shipped]",
        ]
        .join("\n")
    );
}

#[test]
fn test_validation_is_idempotent() {
    let order = Order {
        code: "hi".to_string(),
        quantities: vec![9, 9],
        ..valid_order()
    };

    let first = validate(&order);
    let second = validate(&order);
    assert_eq!(first, second);

    for _ in 0..10 {
        assert_eq!(validate(&order), first);
    }
}

#[test]
fn test_unexported_field_is_reported_without_reading() {
    record! {
        pub struct Secretive {
            #[validate("len:1")]
            pin: String,
            #[validate("min:0")]
            pub count: i32,
        }
    }

    let record = Secretive {
        pin: "1234".to_string(),
        count: -1,
    };
    let errors = field_errors(validate(&record));
    assert_eq!(
        errors.messages(),
        vec![
            "pin: validation for unexported field is not allowed".to_string(),
            "count: value -1 is less than minimum 0".to_string(),
        ]
    );
    assert_eq!(record.pin.len(), 4);
}

#[test]
fn test_unknown_kind_reported_once_per_field() {
    record! {
        pub struct Tagged {
            #[validate("between:1,5")]
            pub values: Vec<i32>,
        }
    }

    let record = Tagged {
        values: vec![1, 2, 3],
    };
    let errors = field_errors(validate(&record));
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.as_slice()[0].cause(),
        &FieldError::UnknownConstraintKind("between".to_string())
    );
}

#[test]
fn test_report_serializes_to_json() {
    let order = Order {
        priority: 7,
        ..valid_order()
    };
    let errors = field_errors(validate(&order));
    let report = serde_json::to_value(&errors).unwrap();

    assert_eq!(report[0]["field"], "priority");
    assert_eq!(report[0]["code"], "constraint_violation");
    assert_eq!(report[1]["field"], "reference");
    assert_eq!(report[1]["code"], "invalid_constraint_syntax");
}

// =============================================================================
// Declaration forms
// =============================================================================

#[test]
fn test_negative_length_is_a_mismatch() {
    record! {
        pub struct Coded {
            #[validate("len:-1")]
            pub code: String,
        }
    }

    let errors = field_errors(validate(&Coded {
        code: "abc".to_string(),
    }));
    assert_eq!(
        errors.as_slice()[0].cause(),
        &FieldError::ConstraintViolation(Violation::LengthMismatch {
            value: "abc".to_string(),
            actual: 3,
            expected: -1,
        })
    );
}

#[test]
fn test_self_restricted_fields_are_unexported() {
    record! {
        pub struct Scoped {
            #[validate("min:1")]
            pub(self) secret: i64,
            #[validate("min:1")]
            pub(in self) nested: i64,
            #[validate("min:1")]
            pub(crate) shared: i64,
        }
    }

    let scoped = Scoped {
        secret: 0,
        nested: 0,
        shared: 0,
    };
    let errors = field_errors(validate(&scoped));
    assert_eq!(
        errors.messages(),
        vec![
            "secret: validation for unexported field is not allowed".to_string(),
            "nested: validation for unexported field is not allowed".to_string(),
            "shared: value 0 is less than minimum 1".to_string(),
        ]
    );
    assert_eq!(scoped.secret + scoped.nested, 0);
}

#[test]
fn test_documented_fields() {
    record! {
        /// A documented record.
        #[derive(Debug, Default)]
        pub struct Documented {
            /// Short identifier.
            #[validate("len:2")]
            pub id: String,
            #[validate("max:3")]
            /// Attribute order does not matter.
            #[allow(dead_code)]
            pub level: i32,
            /// Untagged, documented.
            pub note: String
        }
    }

    let record = Documented {
        id: "ab".to_string(),
        level: 4,
        ..Documented::default()
    };
    let errors = field_errors(validate(&record));
    assert_eq!(
        errors.messages(),
        vec!["level: value 4 is greater than maximum 3".to_string()]
    );
}

#[test]
fn test_unsigned_counts_are_integers() {
    record! {
        pub struct Inventory {
            #[validate("min:1")]
            pub count: usize,
            #[validate("max:10")]
            pub batches: Vec<u64>,
            #[validate("min:0")]
            pub total: u64,
        }
    }

    let inventory = Inventory {
        count: 0,
        batches: vec![4, 12],
        total: u64::MAX,
    };
    let errors = field_errors(validate(&inventory));
    let paths: Vec<_> = errors.iter().map(|e| e.path()).collect();
    assert_eq!(paths, vec!["count", "batches[1]", "total"]);
    assert_eq!(
        errors.as_slice()[2].cause(),
        &FieldError::UnsupportedFieldType { type_name: "u64" }
    );
}

#[test]
fn test_empty_in_member_matches_empty_text() {
    record! {
        pub struct Choice {
            #[validate("in:a,,b")]
            pub pick: String,
        }
    }

    assert!(validate(&Choice { pick: "a".to_string() }).is_ok());
    assert!(validate(&Choice { pick: String::new() }).is_ok());
    assert!(matches!(
        field_errors(validate(&Choice { pick: "c".to_string() })).as_slice()[0].cause(),
        FieldError::ConstraintViolation(Violation::NotInSet { .. })
    ));
}
