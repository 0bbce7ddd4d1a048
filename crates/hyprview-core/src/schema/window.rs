//! Window (client) records from `j/clients`

use serde::Serialize;

use super::fields::Fields;
use super::fields::Segment::{Index, Key};
use super::validators::HexAddress;
use super::{EntityKind, Record, Shape, WireFormat};
use crate::error::ValidationError;

/// Fullscreen state, whose encoding differs between wire formats
///
/// The two encodings share no meaning beyond "nonzero / true means
/// fullscreen", so they are kept apart rather than coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fullscreen {
    /// 0.43: `fullscreen` and `fullscreenClient` are integer modes
    State { state: i64, client: i64 },
    /// 0.42: `fullscreen` is a flag, with `fullscreenMode` and `fakeFullscreen`
    Flag { active: bool, mode: i64, fake: bool },
}

impl Fullscreen {
    pub fn is_active(&self) -> bool {
        match self {
            Fullscreen::State { state, .. } => *state != 0,
            Fullscreen::Flag { active, .. } => *active,
        }
    }
}

/// A validated window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowRecord {
    pub address: HexAddress,
    pub is_mapped: bool,
    pub is_hidden: bool,
    /// `(x, y)` in layout coordinates
    pub position: (i64, i64),
    /// `(width, height)`
    pub size: (i64, i64),
    pub workspace_id: i64,
    pub workspace_name: String,
    pub is_floating: bool,
    /// Only reported by the 0.42 shape
    pub pseudo: Option<bool>,
    pub monitor_id: i64,
    pub wm_class: String,
    pub title: String,
    pub initial_wm_class: String,
    pub initial_title: String,
    pub pid: i64,
    pub is_xwayland: bool,
    pub is_pinned: bool,
    pub fullscreen: Fullscreen,
    pub grouped: Vec<HexAddress>,
    pub tags: Vec<String>,
    /// `None` when the wire value is the empty string
    pub swallowing: Option<HexAddress>,
    /// 0 for the most recently focused window
    pub focus_history_id: i64,
    pub wire_format: WireFormat,
}

impl WindowRecord {
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_active()
    }
}

const SHAPES: &[Shape<WindowRecord>] = &[
    Shape {
        format: WireFormat::V0_43,
        detect: detect_v0_43,
        parse: parse_v0_43,
    },
    Shape {
        format: WireFormat::V0_42,
        detect: detect_v0_42,
        parse: parse_v0_42,
    },
];

impl Record for WindowRecord {
    const KIND: EntityKind = EntityKind::Window;

    fn shapes() -> &'static [Shape<Self>] {
        SHAPES
    }
}

fn detect_v0_43(fields: &Fields<'_>) -> bool {
    fields.has("fullscreenClient")
}

fn detect_v0_42(fields: &Fields<'_>) -> bool {
    fields.has("fakeFullscreen") || fields.has("pseudo")
}

fn parse_v0_43(fields: &Fields<'_>) -> Result<WindowRecord, ValidationError> {
    let fullscreen = Fullscreen::State {
        state: fields.int(&[Key("fullscreen")])?,
        client: fields.int(&[Key("fullscreenClient")])?,
    };
    parse_common(fields, fullscreen, None, WireFormat::V0_43)
}

fn parse_v0_42(fields: &Fields<'_>) -> Result<WindowRecord, ValidationError> {
    let fullscreen = Fullscreen::Flag {
        active: fields.bool(&[Key("fullscreen")])?,
        mode: fields.int(&[Key("fullscreenMode")])?,
        fake: fields.bool(&[Key("fakeFullscreen")])?,
    };
    let pseudo = fields.bool(&[Key("pseudo")])?;
    parse_common(fields, fullscreen, Some(pseudo), WireFormat::V0_42)
}

fn parse_common(
    fields: &Fields<'_>,
    fullscreen: Fullscreen,
    pseudo: Option<bool>,
    wire_format: WireFormat,
) -> Result<WindowRecord, ValidationError> {
    Ok(WindowRecord {
        address: fields.hex(&[Key("address")])?,
        is_mapped: fields.bool(&[Key("mapped")])?,
        is_hidden: fields.bool(&[Key("hidden")])?,
        position: (
            fields.int(&[Key("at"), Index(0)])?,
            fields.int(&[Key("at"), Index(1)])?,
        ),
        size: (
            fields.int(&[Key("size"), Index(0)])?,
            fields.int(&[Key("size"), Index(1)])?,
        ),
        workspace_id: fields.int(&[Key("workspace"), Key("id")])?,
        workspace_name: fields.string(&[Key("workspace"), Key("name")])?,
        is_floating: fields.bool(&[Key("floating")])?,
        pseudo,
        monitor_id: fields.int(&[Key("monitor")])?,
        wm_class: fields.string(&[Key("class")])?,
        title: fields.string(&[Key("title")])?,
        initial_wm_class: fields.string(&[Key("initialClass")])?,
        initial_title: fields.string(&[Key("initialTitle")])?,
        pid: fields.int(&[Key("pid")])?,
        is_xwayland: fields.bool(&[Key("xwayland")])?,
        is_pinned: fields.bool(&[Key("pinned")])?,
        fullscreen,
        grouped: fields.hex_list(&[Key("grouped")])?,
        tags: fields.string_list(&[Key("tags")])?,
        swallowing: fields.optional_hex(&[Key("swallowing")])?,
        focus_history_id: fields.int(&[Key("focusHistoryID")])?,
        wire_format,
    })
}
