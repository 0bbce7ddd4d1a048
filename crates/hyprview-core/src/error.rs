//! Error types for snapshot parsing and relationship resolution

use std::num::ParseIntError;

use thiserror::Error;

use crate::ipc::IpcError;
use crate::schema::{EntityKind, WireFormat};

/// Why a single field failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationReason {
    /// The field (or one of its parents on the path) is absent
    #[error("required field is missing")]
    Missing,

    /// The JSON value has the wrong type
    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    /// The string is not a `0x`-prefixed or bare hexadecimal number
    #[error("{value:?} is not a hexadecimal string")]
    NotHex { value: String },

    /// The string must not be empty
    #[error("value must not be empty")]
    Empty,

    /// A fixed-size array has the wrong number of elements
    #[error("expected {expected} elements, found {found}")]
    BadLength { expected: usize, found: usize },

    /// No registered wire shape accepts the object
    #[error("{}", unknown_shape_message(.format))]
    UnknownShape { format: Option<WireFormat> },
}

fn unknown_shape_message(format: &Option<WireFormat>) -> String {
    match format {
        Some(format) => format!("no wire shape registered for format {}", format),
        None => "object does not match any known wire shape".to_string(),
    }
}

/// A record failed validation
///
/// `field` is the rendered path of the offending value, e.g. `workspace.id`,
/// `at[0]` or `<root>` for the record itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field `{field}`: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: ValidationReason) -> Self {
        Self {
            field: field.into(),
            reason,
        }
    }
}

/// Errors raised while building or traversing a snapshot
#[derive(Debug, Error)]
pub enum ModelError {
    /// One element of a payload failed validation; the whole fetch is rejected
    #[error("Invalid {kind} at index {index}: {source}")]
    Validation {
        kind: EntityKind,
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// The transport returned something other than a JSON array
    #[error("Expected a JSON array of {kind}s, got {found}")]
    UnexpectedPayload {
        kind: EntityKind,
        found: &'static str,
    },

    /// A relationship accessor found no matching entity in the snapshot
    #[error("Parent {parent} {key} of {child} not found")]
    ParentNotFound {
        child: String,
        parent: EntityKind,
        key: String,
    },

    /// A stored address could not be converted to an integer
    #[error("Field {field} holds {value:?}, which is not a valid 64-bit hex address: {source}")]
    InvalidHex {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The transport failed to deliver a payload
    #[error(transparent)]
    Transport(#[from] IpcError),
}

impl ModelError {
    /// Whether this is the recoverable "relationship currently unavailable" case
    pub fn is_parent_not_found(&self) -> bool {
        matches!(self, ModelError::ParentNotFound { .. })
    }
}
