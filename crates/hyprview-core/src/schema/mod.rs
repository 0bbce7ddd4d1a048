//! Schema layer: raw JSON in, validated records out
//!
//! Hyprland has shipped more than one JSON shape for the same entity. Each
//! record type registers a table of [`Shape`]s; a shape pairs a
//! [`WireFormat`] with a discriminator over the raw object and a parser that
//! maps wire keys to stable field names. Supporting another compositor
//! release means adding a `WireFormat` variant and one table entry per kind.
//!
//! | Entity    | 0.43 shape                          | 0.42 shape                                   |
//! |-----------|-------------------------------------|----------------------------------------------|
//! | Window    | `fullscreen:int`, `fullscreenClient` | `pseudo`, `fullscreen:bool`, `fullscreenMode`, `fakeFullscreen` |
//! | Workspace | no `monitorID`                      | `monitorID`                                  |
//! | Monitor   | shared                              | shared                                       |

pub mod fields;
pub mod validators;

mod monitor;
mod window;
mod workspace;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

pub use fields::{Fields, Segment};
pub use monitor::{MonitorRecord, Reserved};
pub use validators::{HexAddress, NonEmptyString};
pub use window::{Fullscreen, WindowRecord};
pub use workspace::WorkspaceRecord;

use crate::error::{ValidationError, ValidationReason};

/// The entity kinds a snapshot is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Window,
    Workspace,
    Monitor,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Window => "window",
            EntityKind::Workspace => "workspace",
            EntityKind::Monitor => "monitor",
        })
    }
}

/// A known compositor JSON layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WireFormat {
    /// Hyprland 0.42.x
    #[serde(rename = "0.42")]
    V0_42,
    /// Hyprland 0.43.x and later
    #[serde(rename = "0.43")]
    V0_43,
}

impl WireFormat {
    pub const ALL: &'static [WireFormat] = &[WireFormat::V0_42, WireFormat::V0_43];

    pub fn as_str(&self) -> &'static str {
        match self {
            WireFormat::V0_42 => "0.42",
            WireFormat::V0_43 => "0.43",
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WireFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('v');
        let trimmed = trimmed.strip_suffix(".x").unwrap_or(trimmed);
        match trimmed {
            "0.42" => Ok(WireFormat::V0_42),
            "0.43" => Ok(WireFormat::V0_43),
            _ => Err(format!("Unknown wire format: {}", s)),
        }
    }
}

/// How a record's shape is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatSelection {
    /// Pick the first registered shape whose discriminator accepts the object
    #[default]
    Detect,
    /// Always use the shape registered for this format
    Fixed(WireFormat),
}

impl fmt::Display for FormatSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatSelection::Detect => f.write_str("auto"),
            FormatSelection::Fixed(format) => write!(f, "{}", format),
        }
    }
}

impl FromStr for FormatSelection {
    type Err = String;

    /// `auto` selects detection, anything else must name a wire format
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(FormatSelection::Detect);
        }
        s.parse().map(FormatSelection::Fixed)
    }
}

impl FormatSelection {
    fn fixed_format(&self) -> Option<WireFormat> {
        match self {
            FormatSelection::Detect => None,
            FormatSelection::Fixed(format) => Some(*format),
        }
    }
}

/// One registered wire layout for a record type
pub struct Shape<R> {
    pub format: WireFormat,
    pub detect: fn(&Fields<'_>) -> bool,
    pub parse: fn(&Fields<'_>) -> Result<R, ValidationError>,
}

/// A record type parsed from one compositor JSON object
pub trait Record: Sized + 'static {
    const KIND: EntityKind;

    /// Registered shapes, in detection order
    fn shapes() -> &'static [Shape<Self>];

    /// Validate `value` against the selected shape; all-or-nothing
    fn from_json(value: &Value, selection: FormatSelection) -> Result<Self, ValidationError> {
        let fields = Fields::new(value)?;
        let shape = select_shape(Self::shapes(), &fields, selection)?;
        (shape.parse)(&fields)
    }
}

/// Choose the shape for one object
pub fn select_shape<'s, R>(
    shapes: &'s [Shape<R>],
    fields: &Fields<'_>,
    selection: FormatSelection,
) -> Result<&'s Shape<R>, ValidationError> {
    let shape = match selection {
        FormatSelection::Detect => shapes.iter().find(|shape| (shape.detect)(fields)),
        FormatSelection::Fixed(format) => shapes.iter().find(|shape| shape.format == format),
    };

    shape.ok_or_else(|| {
        ValidationError::new(
            fields::ROOT,
            ValidationReason::UnknownShape {
                format: selection.fixed_format(),
            },
        )
    })
}

/// Discriminator for shapes that accept any object
pub(crate) fn always(_: &Fields<'_>) -> bool {
    true
}
