//! Transport seam between the registry and wherever JSON comes from
//!
//! The registry only needs three JSON arrays. [`HyprlandSocket`] reads them
//! from a running compositor; [`FixtureDir`] replays files captured with
//! `hyprctl -j`; [`StaticTransport`] serves values held in memory.
//!
//! [`HyprlandSocket`]: crate::ipc::HyprlandSocket

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;
use tracing::debug;

use crate::ipc::IpcError;

/// Source of raw compositor JSON
pub trait Transport {
    /// `hyprctl -j clients`
    fn list_windows(&self) -> Result<Value, IpcError>;

    /// `hyprctl -j workspaces`
    fn list_workspaces(&self) -> Result<Value, IpcError>;

    /// `hyprctl -j monitors`
    fn list_monitors(&self) -> Result<Value, IpcError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn list_windows(&self) -> Result<Value, IpcError> {
        (**self).list_windows()
    }

    fn list_workspaces(&self) -> Result<Value, IpcError> {
        (**self).list_workspaces()
    }

    fn list_monitors(&self) -> Result<Value, IpcError> {
        (**self).list_monitors()
    }
}

#[derive(Debug, Clone, Default)]
struct Payloads {
    windows: Value,
    workspaces: Value,
    monitors: Value,
}

/// In-memory payloads
///
/// Clones share the same payloads, so a test can keep one handle to swap
/// data while an `Instance` owns another.
#[derive(Debug, Clone, Default)]
pub struct StaticTransport {
    payloads: Arc<RwLock<Payloads>>,
}

impl StaticTransport {
    pub fn new(windows: Value, workspaces: Value, monitors: Value) -> Self {
        Self {
            payloads: Arc::new(RwLock::new(Payloads {
                windows,
                workspaces,
                monitors,
            })),
        }
    }

    pub fn set_windows(&self, windows: Value) {
        self.write(|payloads| payloads.windows = windows);
    }

    pub fn set_workspaces(&self, workspaces: Value) {
        self.write(|payloads| payloads.workspaces = workspaces);
    }

    pub fn set_monitors(&self, monitors: Value) {
        self.write(|payloads| payloads.monitors = monitors);
    }

    fn write(&self, update: impl FnOnce(&mut Payloads)) {
        let mut payloads = self.payloads.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut *payloads);
    }

    fn read(&self, select: impl FnOnce(&Payloads) -> &Value) -> Value {
        let payloads = self.payloads.read().unwrap_or_else(PoisonError::into_inner);
        select(&*payloads).clone()
    }
}

impl Transport for StaticTransport {
    fn list_windows(&self) -> Result<Value, IpcError> {
        Ok(self.read(|payloads| &payloads.windows))
    }

    fn list_workspaces(&self) -> Result<Value, IpcError> {
        Ok(self.read(|payloads| &payloads.workspaces))
    }

    fn list_monitors(&self) -> Result<Value, IpcError> {
        Ok(self.read(|payloads| &payloads.monitors))
    }
}

/// File name each entity kind is read from in a fixture directory
pub const WINDOWS_FILE: &str = "windows.json";
pub const WORKSPACES_FILE: &str = "workspaces.json";
pub const MONITORS_FILE: &str = "monitors.json";

/// Replays `windows.json`, `workspaces.json` and `monitors.json` from a directory
///
/// Capture with e.g. `hyprctl -j clients > windows.json`.
#[derive(Debug, Clone)]
pub struct FixtureDir {
    dir: PathBuf,
}

impl FixtureDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load(&self, file_name: &str) -> Result<Value, IpcError> {
        let path = self.dir.join(file_name);
        let content = std::fs::read_to_string(&path).map_err(|source| IpcError::ReadFixture {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = content.len(), "Loaded fixture");

        serde_json::from_str(&content).map_err(|source| IpcError::Decode {
            command: file_name.to_string(),
            source,
        })
    }
}

impl Transport for FixtureDir {
    fn list_windows(&self) -> Result<Value, IpcError> {
        self.load(WINDOWS_FILE)
    }

    fn list_workspaces(&self) -> Result<Value, IpcError> {
        self.load(WORKSPACES_FILE)
    }

    fn list_monitors(&self) -> Result<Value, IpcError> {
        self.load(MONITORS_FILE)
    }
}
