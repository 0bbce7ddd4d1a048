use std::fmt;
use std::ops::Deref;

use super::{address_to_int, Monitor, Window};
use crate::error::ModelError;
use crate::registry::Snapshot;
use crate::schema::{EntityKind, WorkspaceRecord};

/// A workspace bound to its snapshot
#[derive(Clone, Copy)]
pub struct Workspace<'a> {
    record: &'a WorkspaceRecord,
    snapshot: &'a Snapshot,
}

impl<'a> Workspace<'a> {
    pub(crate) fn new(record: &'a WorkspaceRecord, snapshot: &'a Snapshot) -> Self {
        Self { record, snapshot }
    }

    pub fn record(&self) -> &'a WorkspaceRecord {
        self.record
    }

    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    /// The monitor this workspace is on, looked up by `monitor_name`
    ///
    /// The 0.43 wire format dropped `monitorID`, so the name is the only key
    /// both formats share.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::ParentNotFound` if no monitor in the snapshot has
    /// that name.
    pub fn monitor(&self) -> Result<Monitor<'a>, ModelError> {
        self.snapshot
            .get_monitor_by_name(&self.record.monitor_name)
            .ok_or_else(|| ModelError::ParentNotFound {
                child: format!("workspace {}", self.record.id),
                parent: EntityKind::Monitor,
                key: format!("name={:?}", self.record.monitor_name),
            })
    }

    /// All windows on this workspace, in snapshot order
    pub fn windows(&self) -> Vec<Window<'a>> {
        self.snapshot
            .get_windows()
            .into_iter()
            .filter(|window| window.workspace_id == self.record.id)
            .collect()
    }

    /// The most recently focused window on this workspace
    ///
    /// `Ok(None)` when the workspace reports no last window. A reported
    /// address that matches no window is `ParentNotFound`.
    pub fn last_window(&self) -> Result<Option<Window<'a>>, ModelError> {
        let Some(address) = &self.record.last_window_address else {
            return Ok(None);
        };
        let target = address_to_int("last_window_address", address)?;

        self.snapshot
            .get_window_by_int(target)
            .map(Some)
            .ok_or_else(|| ModelError::ParentNotFound {
                child: format!("workspace {}", self.record.id),
                parent: EntityKind::Window,
                key: format!("address={}", address),
            })
    }

    /// `Ok(None)` when the workspace has no last window
    pub fn last_window_address_as_int(&self) -> Result<Option<u64>, ModelError> {
        self.record
            .last_window_address
            .as_ref()
            .map(|address| address_to_int("last_window_address", address))
            .transpose()
    }
}

impl Deref for Workspace<'_> {
    type Target = WorkspaceRecord;

    fn deref(&self) -> &WorkspaceRecord {
        self.record
    }
}

impl PartialEq for Workspace<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}

impl fmt::Debug for Workspace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Workspace").field(self.record).finish()
    }
}

impl fmt::Display for Workspace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Workspace(id={}, name={:?})", self.record.id, self.record.name)
    }
}
