//! Workspace records from `j/workspaces`

use serde::Serialize;

use super::fields::Fields;
use super::fields::Segment::Key;
use super::validators::HexAddress;
use super::{always, EntityKind, Record, Shape, WireFormat};
use crate::error::ValidationError;

/// A validated workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceRecord {
    pub id: i64,
    pub name: String,
    pub monitor_name: String,
    /// Only reported by the 0.42 shape; resolve through `monitor_name` otherwise
    pub monitor_id: Option<i64>,
    pub window_count: i64,
    pub has_fullscreen: bool,
    /// `None` when the wire value is the empty string
    pub last_window_address: Option<HexAddress>,
    pub last_window_title: String,
    pub wire_format: WireFormat,
}

// 0.43 has no discriminating key of its own, so it is the fallback
const SHAPES: &[Shape<WorkspaceRecord>] = &[
    Shape {
        format: WireFormat::V0_42,
        detect: detect_v0_42,
        parse: parse_v0_42,
    },
    Shape {
        format: WireFormat::V0_43,
        detect: always,
        parse: parse_v0_43,
    },
];

impl Record for WorkspaceRecord {
    const KIND: EntityKind = EntityKind::Workspace;

    fn shapes() -> &'static [Shape<Self>] {
        SHAPES
    }
}

fn detect_v0_42(fields: &Fields<'_>) -> bool {
    fields.has("monitorID")
}

fn parse_v0_42(fields: &Fields<'_>) -> Result<WorkspaceRecord, ValidationError> {
    let monitor_id = fields.int(&[Key("monitorID")])?;
    parse_common(fields, Some(monitor_id), WireFormat::V0_42)
}

fn parse_v0_43(fields: &Fields<'_>) -> Result<WorkspaceRecord, ValidationError> {
    parse_common(fields, None, WireFormat::V0_43)
}

fn parse_common(
    fields: &Fields<'_>,
    monitor_id: Option<i64>,
    wire_format: WireFormat,
) -> Result<WorkspaceRecord, ValidationError> {
    Ok(WorkspaceRecord {
        id: fields.int(&[Key("id")])?,
        name: fields.string(&[Key("name")])?,
        monitor_name: fields.string(&[Key("monitor")])?,
        monitor_id,
        window_count: fields.int(&[Key("windows")])?,
        has_fullscreen: fields.bool(&[Key("hasfullscreen")])?,
        last_window_address: fields.optional_hex(&[Key("lastwindow")])?,
        last_window_title: fields.string(&[Key("lastwindowtitle")])?,
        wire_format,
    })
}
