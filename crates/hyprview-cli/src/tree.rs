//! Monitor → workspace → window tree built from relationship accessors

use std::fmt;

use hyprview_core::{
    Monitor, ModelError, MonitorRecord, Snapshot, Window, WindowRecord, Workspace,
    WorkspaceRecord,
};
use serde::Serialize;

/// A snapshot arranged by containment
///
/// Entities whose parent is missing from the snapshot are collected as
/// orphans together with the lookup error.
pub struct Tree<'a> {
    pub monitors: Vec<MonitorNode<'a>>,
    pub orphan_workspaces: Vec<(Workspace<'a>, ModelError)>,
    pub orphan_windows: Vec<(Window<'a>, ModelError)>,
}

pub struct MonitorNode<'a> {
    pub monitor: Monitor<'a>,
    pub workspaces: Vec<WorkspaceNode<'a>>,
}

pub struct WorkspaceNode<'a> {
    pub workspace: Workspace<'a>,
    pub windows: Vec<Window<'a>>,
}

impl<'a> Tree<'a> {
    /// Walk the snapshot through `Monitor::workspaces` and `Workspace::windows`
    ///
    /// # Errors
    ///
    /// Only errors other than a missing parent are returned.
    pub fn build(snapshot: &'a Snapshot) -> Result<Self, ModelError> {
        let monitors = snapshot
            .get_monitors()
            .into_iter()
            .map(|monitor| MonitorNode {
                monitor,
                workspaces: monitor
                    .workspaces()
                    .into_iter()
                    .map(|workspace| WorkspaceNode {
                        workspace,
                        windows: workspace.windows(),
                    })
                    .collect(),
            })
            .collect();

        let mut orphan_workspaces = Vec::new();
        for workspace in snapshot.get_workspaces() {
            match workspace.monitor() {
                Ok(_) => {}
                Err(err) if err.is_parent_not_found() => orphan_workspaces.push((workspace, err)),
                Err(err) => return Err(err),
            }
        }

        let mut orphan_windows = Vec::new();
        for window in snapshot.get_windows() {
            match window.workspace() {
                Ok(_) => {}
                Err(err) if err.is_parent_not_found() => orphan_windows.push((window, err)),
                Err(err) => return Err(err),
            }
        }

        Ok(Self {
            monitors,
            orphan_workspaces,
            orphan_windows,
        })
    }

    pub fn has_orphans(&self) -> bool {
        !self.orphan_workspaces.is_empty() || !self.orphan_windows.is_empty()
    }

    /// Serializable view holding the normalized records
    pub fn to_json(&self) -> TreeJson<'a> {
        TreeJson {
            monitors: self
                .monitors
                .iter()
                .map(|node| MonitorJson {
                    monitor: node.monitor.record(),
                    workspaces: node
                        .workspaces
                        .iter()
                        .map(|node| WorkspaceJson {
                            workspace: node.workspace.record(),
                            windows: node.windows.iter().map(|window| window.record()).collect(),
                        })
                        .collect(),
                })
                .collect(),
            orphan_workspaces: self
                .orphan_workspaces
                .iter()
                .map(|(workspace, _)| workspace.record())
                .collect(),
            orphan_windows: self
                .orphan_windows
                .iter()
                .map(|(window, _)| window.record())
                .collect(),
        }
    }
}

impl fmt::Display for Tree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.monitors {
            let focused = if node.monitor.is_focused { " *" } else { "" };
            writeln!(f, "{}{}", node.monitor, focused)?;

            for child in &node.workspaces {
                let active = if child.workspace.id == node.monitor.active_workspace_id {
                    " *"
                } else {
                    ""
                };
                writeln!(f, "  {}{}", child.workspace, active)?;

                for window in &child.windows {
                    writeln!(f, "    {}", window)?;
                }
            }
        }

        if self.has_orphans() {
            writeln!(f, "Orphans:")?;
            for (workspace, err) in &self.orphan_workspaces {
                writeln!(f, "  {} ({})", workspace, err)?;
            }
            for (window, err) in &self.orphan_windows {
                writeln!(f, "  {} ({})", window, err)?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct TreeJson<'a> {
    pub monitors: Vec<MonitorJson<'a>>,
    pub orphan_workspaces: Vec<&'a WorkspaceRecord>,
    pub orphan_windows: Vec<&'a WindowRecord>,
}

#[derive(Debug, Serialize)]
pub struct MonitorJson<'a> {
    pub monitor: &'a MonitorRecord,
    pub workspaces: Vec<WorkspaceJson<'a>>,
}

#[derive(Debug, Serialize)]
pub struct WorkspaceJson<'a> {
    pub workspace: &'a WorkspaceRecord,
    pub windows: Vec<&'a WindowRecord>,
}
