use std::fmt;
use std::ops::Deref;

use super::Workspace;
use crate::error::ModelError;
use crate::registry::Snapshot;
use crate::schema::{EntityKind, MonitorRecord};

/// A monitor bound to its snapshot
#[derive(Clone, Copy)]
pub struct Monitor<'a> {
    record: &'a MonitorRecord,
    snapshot: &'a Snapshot,
}

impl<'a> Monitor<'a> {
    pub(crate) fn new(record: &'a MonitorRecord, snapshot: &'a Snapshot) -> Self {
        Self { record, snapshot }
    }

    pub fn record(&self) -> &'a MonitorRecord {
        self.record
    }

    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    /// All workspaces on this monitor, in snapshot order
    pub fn workspaces(&self) -> Vec<Workspace<'a>> {
        self.snapshot
            .get_workspaces()
            .into_iter()
            .filter(|workspace| workspace.monitor_name == self.record.name)
            .collect()
    }

    /// The workspace currently shown on this monitor
    pub fn active_workspace(&self) -> Result<Workspace<'a>, ModelError> {
        self.snapshot
            .get_workspace_by_id(self.record.active_workspace_id)
            .ok_or_else(|| ModelError::ParentNotFound {
                child: format!("monitor {:?}", self.record.name),
                parent: EntityKind::Workspace,
                key: format!("id={}", self.record.active_workspace_id),
            })
    }
}

impl Deref for Monitor<'_> {
    type Target = MonitorRecord;

    fn deref(&self) -> &MonitorRecord {
        self.record
    }
}

impl PartialEq for Monitor<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}

impl fmt::Debug for Monitor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Monitor").field(self.record).finish()
    }
}

impl fmt::Display for Monitor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Monitor(id={}, name={:?}, width={}, height={})",
            self.record.id, self.record.name, self.record.width, self.record.height
        )
    }
}
