//! Typed, relationship-aware model of Hyprland compositor state
//!
//! Raw JSON from `hyprctl -j` (or the control socket) is validated into
//! version-normalized records by [`schema`], collected into an immutable
//! [`Snapshot`] and exposed as [`Window`], [`Workspace`] and [`Monitor`]
//! handles that resolve their relationships against that snapshot.
//!
//! ```no_run
//! use hyprview_core::{HyprlandSocket, Instance};
//!
//! let instance = Instance::new(HyprlandSocket::from_env()?)?;
//! for window in instance.get_windows() {
//!     println!("{} on {}", window, window.workspace()?);
//! }
//! # Ok::<(), hyprview_core::ModelError>(())
//! ```

pub mod entity;
pub mod error;
pub mod ipc;
pub mod registry;
pub mod schema;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use entity::{truncate_title, Monitor, Window, Workspace};
pub use error::{ModelError, ValidationError, ValidationReason};
pub use ipc::{HyprlandSocket, IpcError};
pub use registry::{Instance, Snapshot};
pub use schema::{
    EntityKind, FormatSelection, Fullscreen, HexAddress, MonitorRecord, NonEmptyString, Record,
    Reserved, WindowRecord, WireFormat, WorkspaceRecord,
};
pub use transport::{FixtureDir, StaticTransport, Transport};
