//! Error types for Hyprland IPC operations

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ValidationReason;

/// Errors that can occur when fetching JSON from the compositor
#[derive(Debug, Error)]
pub enum IpcError {
    /// The HYPRLAND_INSTANCE_SIGNATURE environment variable is not set
    #[error("HYPRLAND_INSTANCE_SIGNATURE environment variable not set - is Hyprland running?")]
    SignatureNotSet,

    /// The instance signature failed validation
    #[error("Invalid Hyprland instance signature: {reason}")]
    InvalidSignature { reason: ValidationReason },

    /// The socket path does not exist
    #[error("Hyprland socket not found at {path}")]
    SocketNotFound { path: PathBuf },

    /// Failed to connect to the control socket
    #[error("Failed to connect to Hyprland socket at {path}: {source}")]
    ConnectionFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to send a request
    #[error("Failed to send request to Hyprland: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Failed to receive a reply
    #[error("Failed to receive response from Hyprland: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// The socket closed without replying
    #[error("Connection to Hyprland closed without a reply to {command}")]
    EmptyReply { command: String },

    /// A reply or fixture was not valid JSON
    #[error("Failed to decode JSON for {command}: {source}")]
    Decode {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    /// A fixture file could not be read
    #[error("Failed to read fixture {path}: {source}")]
    ReadFixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
