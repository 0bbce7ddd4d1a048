//! Hyprland IPC client
//!
//! Reads compositor state over Hyprland's request socket.
//!
//! ## Architecture
//!
//! - `HyprlandSocket`: implements [`Transport`](crate::transport::Transport)
//!   by sending `j/` commands to the socket
//! - `IpcError`: error type shared by every transport
//!
//! ## Protocol
//!
//! Hyprland exposes a Unix socket at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`. A client
//! connects, writes one command and reads the reply until the compositor
//! closes the connection. Commands prefixed with `j/` reply in JSON.

mod error;
mod socket;

pub use error::IpcError;
pub use socket::{
    get_socket_path, instance_signature, HyprlandSocket, DEFAULT_TIMEOUT, MONITORS_COMMAND,
    WINDOWS_COMMAND, WORKSPACES_COMMAND,
};
