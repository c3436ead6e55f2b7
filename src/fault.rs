use crate::values::shape::Kind;
use thiserror::Error;

/// Internal fault raised while walking or snapshotting a value graph.
///
/// Faults never escape an assertion call: the entry points turn them into a
/// `panic: <fault>` failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("value of type {type_name} is already mutably borrowed")]
    AlreadyBorrowed { type_name: &'static str },

    #[error(
        "cannot pair a {expected} value of type {expected_type} with a {actual} value of type {actual_type}"
    )]
    ShapeMismatch {
        expected: Kind,
        actual: Kind,
        expected_type: &'static str,
        actual_type: &'static str,
    },

    #[error("index {index} out of range for {type_name} of length {len}")]
    IndexOutOfBounds {
        index: usize,
        len: usize,
        type_name: &'static str,
    },

    #[error("field {index} missing on {type_name}")]
    MissingField {
        index: usize,
        type_name: &'static str,
    },

    #[error("map key is not of type {expected}")]
    KeyType { expected: &'static str },

    #[error("two keys of {type_name} render as {label}")]
    DuplicateKey {
        label: String,
        type_name: &'static str,
    },

    #[error("{0}")]
    Panicked(String),
}
