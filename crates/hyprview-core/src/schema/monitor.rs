//! Monitor records from `j/monitors`

use serde::Serialize;

use super::fields::Fields;
use super::fields::Segment::Key;
use super::{always, EntityKind, Record, Shape, WireFormat};
use crate::error::{ValidationError, ValidationReason};

/// Space reserved at each edge of a monitor (bars, panels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Reserved {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

/// A validated monitor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub make: String,
    pub model: String,
    pub serial: String,
    pub width: i64,
    pub height: i64,
    pub refresh_rate: f64,
    /// `(x, y)` of the monitor's top-left corner in layout coordinates
    pub position: (i64, i64),
    pub active_workspace_id: i64,
    pub active_workspace_name: String,
    pub reserved: Reserved,
    pub scale: f64,
    /// wl_output transform code (0-7)
    pub transform: i64,
    pub is_focused: bool,
    pub uses_dpms: bool,
    pub vrr: bool,
}

// Both known releases report monitors identically
const SHAPES: &[Shape<MonitorRecord>] = &[
    Shape {
        format: WireFormat::V0_43,
        detect: always,
        parse,
    },
    Shape {
        format: WireFormat::V0_42,
        detect: always,
        parse,
    },
];

impl Record for MonitorRecord {
    const KIND: EntityKind = EntityKind::Monitor;

    fn shapes() -> &'static [Shape<Self>] {
        SHAPES
    }
}

fn parse(fields: &Fields<'_>) -> Result<MonitorRecord, ValidationError> {
    Ok(MonitorRecord {
        id: fields.int(&[Key("id")])?,
        name: fields.string(&[Key("name")])?,
        description: fields.string(&[Key("description")])?,
        make: fields.string(&[Key("make")])?,
        model: fields.string(&[Key("model")])?,
        serial: fields.string(&[Key("serial")])?,
        width: fields.int(&[Key("width")])?,
        height: fields.int(&[Key("height")])?,
        refresh_rate: fields.float(&[Key("refreshRate")])?,
        position: (fields.int(&[Key("x")])?, fields.int(&[Key("y")])?),
        active_workspace_id: fields.int(&[Key("activeWorkspace"), Key("id")])?,
        active_workspace_name: fields.string(&[Key("activeWorkspace"), Key("name")])?,
        reserved: parse_reserved(fields)?,
        scale: fields.float(&[Key("scale")])?,
        transform: fields.int(&[Key("transform")])?,
        is_focused: fields.bool(&[Key("focused")])?,
        uses_dpms: fields.bool(&[Key("dpmsStatus")])?,
        vrr: fields.bool(&[Key("vrr")])?,
    })
}

/// `reserved` is `[left, top, right, bottom]`; an empty array means no margins
fn parse_reserved(fields: &Fields<'_>) -> Result<Reserved, ValidationError> {
    let values = fields.int_list(&[Key("reserved")])?;

    match values.as_slice() {
        [] => Ok(Reserved::default()),
        [left, top, right, bottom] => Ok(Reserved {
            left: *left,
            top: *top,
            right: *right,
            bottom: *bottom,
        }),
        other => Err(ValidationError::new(
            "reserved",
            ValidationReason::BadLength {
                expected: 4,
                found: other.len(),
            },
        )),
    }
}
