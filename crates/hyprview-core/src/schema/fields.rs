//! Path-addressed, type-checked access to a raw JSON object
//!
//! A semantic field is not always a top-level wire key: a window's position
//! lives at `at[0]`/`at[1]`, its workspace id at `workspace.id`. `Fields`
//! resolves an ordered path of keys and indices and reports failures with the
//! rendered path, so a validation error always names the offending field.

use std::fmt::Write;

use serde_json::{Map, Value};

use super::validators::{HexAddress, NonEmptyString};
use crate::error::{ValidationError, ValidationReason};

/// Rendered path used for errors about the record itself
pub const ROOT: &str = "<root>";

/// One step of a field path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Key(&'static str),
    Index(usize),
}

/// Render a path as `workspace.id` / `at[0]`
pub fn render_path(path: &[Segment]) -> String {
    if path.is_empty() {
        return ROOT.to_string();
    }

    let mut rendered = String::new();
    for segment in path {
        match segment {
            Segment::Key(key) => {
                if !rendered.is_empty() {
                    rendered.push('.');
                }
                rendered.push_str(key);
            }
            Segment::Index(index) => {
                let _ = write!(rendered, "[{}]", index);
            }
        }
    }
    rendered
}

/// JSON type name used in `WrongType` errors
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() => "integer",
        Value::Number(n) if n.is_u64() => "unsigned integer out of range",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read-only view over one wire object
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    object: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// Wrap a raw value, which must be a JSON object
    pub fn new(value: &'a Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(object) => Ok(Self { object }),
            other => Err(ValidationError::new(
                ROOT,
                ValidationReason::WrongType {
                    expected: "object",
                    found: json_type_name(other),
                },
            )),
        }
    }

    /// Whether a top-level wire key is present (used by shape discriminators)
    pub fn has(&self, key: &str) -> bool {
        self.object.contains_key(key)
    }

    /// Resolve a path to the raw value it addresses
    pub fn value(&self, path: &[Segment]) -> Result<&'a Value, ValidationError> {
        let mut current: Option<&'a Value> = None;

        for (depth, segment) in path.iter().enumerate() {
            let next = match (segment, current) {
                (Segment::Key(key), None) => self.object.get(*key),
                (Segment::Key(key), Some(Value::Object(map))) => map.get(*key),
                (Segment::Index(index), Some(Value::Array(items))) => items.get(*index),
                (Segment::Key(_), Some(other)) => {
                    return Err(mismatch(&path[..depth], "object", other));
                }
                (Segment::Index(_), Some(other)) => {
                    return Err(mismatch(&path[..depth], "array", other));
                }
                (Segment::Index(_), None) => {
                    return Err(ValidationError::new(
                        ROOT,
                        ValidationReason::WrongType {
                            expected: "array",
                            found: "object",
                        },
                    ));
                }
            };

            current = Some(next.ok_or_else(|| {
                ValidationError::new(render_path(&path[..=depth]), ValidationReason::Missing)
            })?);
        }

        current.ok_or_else(|| ValidationError::new(ROOT, ValidationReason::Missing))
    }

    pub fn int(&self, path: &[Segment]) -> Result<i64, ValidationError> {
        let value = self.value(path)?;
        value.as_i64().ok_or_else(|| mismatch(path, "integer", value))
    }

    /// Any JSON number, integers included
    pub fn float(&self, path: &[Segment]) -> Result<f64, ValidationError> {
        let value = self.value(path)?;
        value.as_f64().ok_or_else(|| mismatch(path, "number", value))
    }

    pub fn bool(&self, path: &[Segment]) -> Result<bool, ValidationError> {
        let value = self.value(path)?;
        value.as_bool().ok_or_else(|| mismatch(path, "boolean", value))
    }

    pub fn string(&self, path: &[Segment]) -> Result<String, ValidationError> {
        self.str(path).map(str::to_string)
    }

    pub fn non_empty(&self, path: &[Segment]) -> Result<NonEmptyString, ValidationError> {
        let value = self.str(path)?;
        NonEmptyString::parse(value).map_err(|reason| ValidationError::new(render_path(path), reason))
    }

    pub fn hex(&self, path: &[Segment]) -> Result<HexAddress, ValidationError> {
        let value = self.str(path)?;
        HexAddress::parse(value).map_err(|reason| ValidationError::new(render_path(path), reason))
    }

    /// Hex address where `""` means "no value"
    pub fn optional_hex(&self, path: &[Segment]) -> Result<Option<HexAddress>, ValidationError> {
        let value = self.str(path)?;
        HexAddress::parse_optional(value)
            .map_err(|reason| ValidationError::new(render_path(path), reason))
    }

    pub fn string_list(&self, path: &[Segment]) -> Result<Vec<String>, ValidationError> {
        self.list(path, |index, item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| element_mismatch(path, index, "string", item))
        })
    }

    pub fn hex_list(&self, path: &[Segment]) -> Result<Vec<HexAddress>, ValidationError> {
        self.list(path, |index, item| {
            let value = item
                .as_str()
                .ok_or_else(|| element_mismatch(path, index, "string", item))?;
            HexAddress::parse(value)
                .map_err(|reason| ValidationError::new(element_path(path, index), reason))
        })
    }

    pub fn int_list(&self, path: &[Segment]) -> Result<Vec<i64>, ValidationError> {
        self.list(path, |index, item| {
            item.as_i64()
                .ok_or_else(|| element_mismatch(path, index, "integer", item))
        })
    }

    fn str(&self, path: &[Segment]) -> Result<&'a str, ValidationError> {
        let value = self.value(path)?;
        value.as_str().ok_or_else(|| mismatch(path, "string", value))
    }

    fn list<T>(
        &self,
        path: &[Segment],
        mut convert: impl FnMut(usize, &'a Value) -> Result<T, ValidationError>,
    ) -> Result<Vec<T>, ValidationError> {
        let value = self.value(path)?;
        let items = value
            .as_array()
            .ok_or_else(|| mismatch(path, "array", value))?;

        items
            .iter()
            .enumerate()
            .map(|(index, item)| convert(index, item))
            .collect()
    }
}

fn mismatch(path: &[Segment], expected: &'static str, found: &Value) -> ValidationError {
    ValidationError::new(
        render_path(path),
        ValidationReason::WrongType {
            expected,
            found: json_type_name(found),
        },
    )
}

fn element_path(path: &[Segment], index: usize) -> String {
    format!("{}[{}]", render_path(path), index)
}

fn element_mismatch(
    path: &[Segment],
    index: usize,
    expected: &'static str,
    found: &Value,
) -> ValidationError {
    ValidationError::new(
        element_path(path, index),
        ValidationReason::WrongType {
            expected,
            found: json_type_name(found),
        },
    )
}
