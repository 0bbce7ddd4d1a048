//! Hyprland control socket transport
//!
//! Handles instance discovery and the request/reply exchange. Hyprland
//! answers one request per connection: the client writes a command such as
//! `j/clients` and reads until the compositor closes the socket.

use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use super::IpcError;
use crate::schema::NonEmptyString;
use crate::transport::Transport;

/// Environment variable naming the running instance
const SIGNATURE_ENV: &str = "HYPRLAND_INSTANCE_SIGNATURE";

/// Environment variable for the per-user runtime directory
const RUNTIME_DIR_ENV: &str = "XDG_RUNTIME_DIR";

/// Socket root used by Hyprland releases before 0.40
const LEGACY_SOCKET_ROOT: &str = "/tmp/hypr";

const SOCKET_NAME: &str = ".socket.sock";

/// Default read/write timeout for one request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

pub const WINDOWS_COMMAND: &str = "j/clients";
pub const WORKSPACES_COMMAND: &str = "j/workspaces";
pub const MONITORS_COMMAND: &str = "j/monitors";

/// Read the instance signature from the environment
///
/// # Errors
///
/// Returns `IpcError::SignatureNotSet` if the variable is unset and
/// `IpcError::InvalidSignature` if it is empty.
pub fn instance_signature() -> Result<NonEmptyString, IpcError> {
    let raw = std::env::var(SIGNATURE_ENV).map_err(|_| IpcError::SignatureNotSet)?;
    NonEmptyString::parse(raw).map_err(|reason| IpcError::InvalidSignature { reason })
}

/// Locate the control socket of the instance with `signature`
///
/// Tries `$XDG_RUNTIME_DIR/hypr/<signature>/.socket.sock`, then the legacy
/// `/tmp/hypr/<signature>/.socket.sock`.
///
/// # Errors
///
/// Returns `IpcError::SocketNotFound` with the preferred path if neither
/// candidate exists.
pub fn get_socket_path(signature: &NonEmptyString) -> Result<PathBuf, IpcError> {
    let mut candidates = Vec::with_capacity(2);
    if let Some(runtime_dir) = std::env::var_os(RUNTIME_DIR_ENV) {
        candidates.push(
            PathBuf::from(runtime_dir)
                .join("hypr")
                .join(signature.as_str())
                .join(SOCKET_NAME),
        );
    }
    candidates.push(
        PathBuf::from(LEGACY_SOCKET_ROOT)
            .join(signature.as_str())
            .join(SOCKET_NAME),
    );

    if let Some(found) = candidates.iter().find(|path| path.exists()) {
        return Ok(found.clone());
    }

    let preferred = candidates.swap_remove(0);
    Err(IpcError::SocketNotFound { path: preferred })
}

/// Transport over Hyprland's request socket
#[derive(Debug, Clone)]
pub struct HyprlandSocket {
    path: PathBuf,
    timeout: Duration,
}

impl HyprlandSocket {
    /// Discover the running instance from the environment
    pub fn from_env() -> Result<Self, IpcError> {
        let signature = instance_signature()?;
        Self::for_signature(&signature)
    }

    pub fn for_signature(signature: &NonEmptyString) -> Result<Self, IpcError> {
        let path = get_socket_path(signature)?;
        Ok(Self::with_path(path))
    }

    /// Use an explicit socket path
    ///
    /// # Errors
    ///
    /// Returns `IpcError::SocketNotFound` if the path does not exist.
    pub fn at_path(path: impl Into<PathBuf>) -> Result<Self, IpcError> {
        let path = path.into();
        if !path.exists() {
            return Err(IpcError::SocketNotFound { path });
        }
        Ok(Self::with_path(path))
    }

    fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send one command and return the raw reply
    ///
    /// # Errors
    ///
    /// Returns `IpcError::ConnectionFailed` if the socket refuses the
    /// connection, `SendFailed`/`ReceiveFailed` on I/O errors (including
    /// timeouts) and `EmptyReply` if the compositor closes without answering.
    pub fn request(&self, command: &str) -> Result<String, IpcError> {
        let mut stream =
            UnixStream::connect(&self.path).map_err(|source| IpcError::ConnectionFailed {
                path: self.path.clone(),
                source,
            })?;

        stream
            .set_write_timeout(Some(self.timeout))
            .map_err(IpcError::SendFailed)?;
        stream
            .set_read_timeout(Some(self.timeout))
            .map_err(IpcError::ReceiveFailed)?;

        stream
            .write_all(command.as_bytes())
            .map_err(IpcError::SendFailed)?;
        stream.flush().map_err(IpcError::SendFailed)?;

        let mut reply = String::new();
        let bytes_read = stream
            .read_to_string(&mut reply)
            .map_err(IpcError::ReceiveFailed)?;

        if bytes_read == 0 {
            return Err(IpcError::EmptyReply {
                command: command.to_string(),
            });
        }

        debug!(command, bytes = bytes_read, "Hyprland replied");
        Ok(reply)
    }

    /// Send one `j/` command and decode the JSON reply
    pub fn request_json(&self, command: &str) -> Result<Value, IpcError> {
        let reply = self.request(command)?;
        serde_json::from_str(&reply).map_err(|source| IpcError::Decode {
            command: command.to_string(),
            source,
        })
    }
}

impl Transport for HyprlandSocket {
    fn list_windows(&self) -> Result<Value, IpcError> {
        self.request_json(WINDOWS_COMMAND)
    }

    fn list_workspaces(&self) -> Result<Value, IpcError> {
        self.request_json(WORKSPACES_COMMAND)
    }

    fn list_monitors(&self) -> Result<Value, IpcError> {
        self.request_json(MONITORS_COMMAND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationReason;
    use std::env;
    use std::os::unix::net::UnixListener;
    use std::sync::Mutex;
    use std::thread;
    use tempfile::tempdir;

    // Mutex to serialize tests that modify the environment.
    // Environment variables are global state, so tests modifying them must not run in parallel.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Run `f` with the given variables set (or removed), restoring them afterwards
    fn with_env<R>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> R) -> R {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let originals: Vec<(String, Option<String>)> = vars
            .iter()
            .map(|(name, _)| (name.to_string(), env::var(name).ok()))
            .collect();

        for (name, value) in vars {
            match value {
                Some(value) => env::set_var(name, value),
                None => env::remove_var(name),
            }
        }

        let result = f();

        for (name, original) in originals {
            match original {
                Some(value) => env::set_var(&name, value),
                None => env::remove_var(&name),
            }
        }

        result
    }

    /// Serve one connection: check the command, reply, close
    fn serve_once(listener: UnixListener, expected_command: &'static str, reply: &'static str) {
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("Failed to accept");
            let mut buf = [0u8; 64];
            let n = stream.read(&mut buf).expect("Failed to read command");
            assert_eq!(&buf[..n], expected_command.as_bytes());
            stream.write_all(reply.as_bytes()).expect("Failed to reply");
        });
    }

    #[test]
    fn test_signature_not_set_error() {
        let result = with_env(&[(SIGNATURE_ENV, None)], instance_signature);

        let err = result.unwrap_err();
        assert!(
            matches!(err, IpcError::SignatureNotSet),
            "Expected SignatureNotSet error, got: {:?}",
            err
        );
        assert!(err.to_string().contains(SIGNATURE_ENV));
    }

    #[test]
    fn test_empty_signature_rejected() {
        let result = with_env(&[(SIGNATURE_ENV, Some(""))], instance_signature);

        match result {
            Err(IpcError::InvalidSignature { reason }) => {
                assert_eq!(reason, ValidationReason::Empty);
            }
            other => panic!("Expected InvalidSignature, got: {:?}", other),
        }
    }

    #[test]
    fn test_socket_found_under_runtime_dir() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let socket_dir = temp_dir.path().join("hypr").join("sig123");
        std::fs::create_dir_all(&socket_dir).expect("Failed to create socket dir");
        let socket_path = socket_dir.join(SOCKET_NAME);
        std::fs::write(&socket_path, "").expect("Failed to create dummy socket");

        let runtime_dir = temp_dir.path().to_str().unwrap().to_string();
        let result = with_env(&[(RUNTIME_DIR_ENV, Some(runtime_dir.as_str()))], || {
            get_socket_path(&NonEmptyString::parse("sig123").unwrap())
        });

        assert_eq!(result.unwrap(), socket_path);
    }

    #[test]
    fn test_socket_not_found_reports_preferred_path() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let runtime_dir = temp_dir.path().to_str().unwrap().to_string();

        let result = with_env(&[(RUNTIME_DIR_ENV, Some(runtime_dir.as_str()))], || {
            get_socket_path(&NonEmptyString::parse("no-such-instance-12345").unwrap())
        });

        match result {
            Err(IpcError::SocketNotFound { path }) => {
                assert!(path.starts_with(temp_dir.path()), "{}", path.display());
                assert!(path.ends_with("hypr/no-such-instance-12345/.socket.sock"));
            }
            other => panic!("Expected SocketNotFound error, got: {:?}", other),
        }
    }

    #[test]
    fn test_at_path_requires_existing_path() {
        let result = HyprlandSocket::at_path("/tmp/nonexistent-hypr-socket-12345");

        assert!(matches!(result, Err(IpcError::SocketNotFound { .. })));
    }

    #[test]
    fn test_connection_to_non_socket_fails() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let socket_path = temp_dir.path().join(SOCKET_NAME);
        std::fs::write(&socket_path, "").expect("Failed to create dummy file");

        let socket = HyprlandSocket::at_path(&socket_path).unwrap();
        match socket.request(WINDOWS_COMMAND) {
            Err(IpcError::ConnectionFailed { path, .. }) => assert_eq!(path, socket_path),
            other => panic!("Expected ConnectionFailed error, got: {:?}", other),
        }
    }

    #[test]
    fn test_request_json_round_trip() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let socket_path = temp_dir.path().join(SOCKET_NAME);
        let listener = UnixListener::bind(&socket_path).expect("Failed to bind");
        serve_once(listener, MONITORS_COMMAND, r#"[{"id": 0, "name": "DP-1"}]"#);

        let socket = HyprlandSocket::at_path(&socket_path)
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        let value = socket.list_monitors().unwrap();

        assert_eq!(value[0]["name"], "DP-1");
    }

    #[test]
    fn test_non_json_reply_is_decode_error() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let socket_path = temp_dir.path().join(SOCKET_NAME);
        let listener = UnixListener::bind(&socket_path).expect("Failed to bind");
        serve_once(listener, WORKSPACES_COMMAND, "unknown request");

        let socket = HyprlandSocket::at_path(&socket_path).unwrap();
        match socket.list_workspaces() {
            Err(IpcError::Decode { command, .. }) => assert_eq!(command, WORKSPACES_COMMAND),
            other => panic!("Expected Decode error, got: {:?}", other),
        }
    }

    #[test]
    fn test_empty_reply() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let socket_path = temp_dir.path().join(SOCKET_NAME);
        let listener = UnixListener::bind(&socket_path).expect("Failed to bind");
        serve_once(listener, WINDOWS_COMMAND, "");

        let socket = HyprlandSocket::at_path(&socket_path).unwrap();
        assert!(matches!(
            socket.list_windows(),
            Err(IpcError::EmptyReply { .. })
        ));
    }
}
