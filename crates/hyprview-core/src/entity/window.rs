use std::fmt;
use std::ops::Deref;

use super::{address_to_int, truncate_title, Monitor, Workspace};
use crate::error::ModelError;
use crate::registry::Snapshot;
use crate::schema::{EntityKind, WindowRecord};

/// A window bound to its snapshot
#[derive(Clone, Copy)]
pub struct Window<'a> {
    record: &'a WindowRecord,
    snapshot: &'a Snapshot,
}

impl<'a> Window<'a> {
    pub(crate) fn new(record: &'a WindowRecord, snapshot: &'a Snapshot) -> Self {
        Self { record, snapshot }
    }

    pub fn record(&self) -> &'a WindowRecord {
        self.record
    }

    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    /// The workspace this window is on
    ///
    /// # Errors
    ///
    /// Returns `ModelError::ParentNotFound` if the snapshot has no workspace
    /// with this window's `workspace_id`. Workspaces can vanish between the
    /// compositor's replies, so callers should expect this.
    pub fn workspace(&self) -> Result<Workspace<'a>, ModelError> {
        self.snapshot
            .get_workspace_by_id(self.record.workspace_id)
            .ok_or_else(|| ModelError::ParentNotFound {
                child: self.describe(),
                parent: EntityKind::Workspace,
                key: format!("id={}", self.record.workspace_id),
            })
    }

    /// The monitor this window is on, looked up by `monitor_id`
    pub fn monitor(&self) -> Result<Monitor<'a>, ModelError> {
        self.snapshot
            .get_monitor_by_id(self.record.monitor_id)
            .ok_or_else(|| ModelError::ParentNotFound {
                child: self.describe(),
                parent: EntityKind::Monitor,
                key: format!("id={}", self.record.monitor_id),
            })
    }

    pub fn address_as_int(&self) -> Result<u64, ModelError> {
        address_to_int("address", &self.record.address)
    }

    /// `Ok(None)` when the window is not swallowing anything
    pub fn swallowing_as_int(&self) -> Result<Option<u64>, ModelError> {
        self.record
            .swallowing
            .as_ref()
            .map(|address| address_to_int("swallowing", address))
            .transpose()
    }

    fn describe(&self) -> String {
        format!("window {}", self.record.address)
    }
}

impl Deref for Window<'_> {
    type Target = WindowRecord;

    fn deref(&self) -> &WindowRecord {
        self.record
    }
}

impl PartialEq for Window<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}

impl fmt::Debug for Window<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Window").field(self.record).finish()
    }
}

impl fmt::Display for Window<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Window(address={}, wm_class={:?}, title={:?})",
            self.record.address,
            self.record.wm_class,
            truncate_title(&self.record.title)
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::registry::Snapshot;
    use crate::schema::FormatSelection;
    use crate::test_support::{client_v0_42, client_v0_43, monitor, workspace_v0_43};
    use serde_json::json;

    fn snapshot(windows: serde_json::Value) -> Snapshot {
        Snapshot::from_json(
            &windows,
            &json!([workspace_v0_43(1, "DP-1"), workspace_v0_43(5, "DP-1")]),
            &json!([monitor(0, "DP-1", 1, true)]),
            FormatSelection::Detect,
        )
        .unwrap()
    }

    #[test]
    fn test_workspace_resolves_by_id() {
        let snapshot = snapshot(json!([client_v0_43("0xa", 5, "editor")]));
        let window = snapshot.get_windows()[0];

        let workspace = window.workspace().unwrap();
        assert_eq!(workspace.id, 5);
    }

    #[test]
    fn test_missing_workspace_is_parent_not_found() {
        let snapshot = snapshot(json!([client_v0_43("0xa", 9, "orphan")]));
        let window = snapshot.get_windows()[0];

        let err = window.workspace().unwrap_err();
        assert!(err.is_parent_not_found(), "{:?}", err);
        assert!(err.to_string().contains("id=9"));
        assert!(err.to_string().contains("window 0xa"));
    }

    #[test]
    fn test_monitor_resolves_by_id() {
        let snapshot = snapshot(json!([client_v0_43("0xa", 1, "t"), client_v0_42("0xb", 1, "t")]));
        let windows = snapshot.get_windows();

        assert_eq!(windows[0].monitor().unwrap().name, "DP-1");
        assert!(windows[1].monitor().unwrap_err().is_parent_not_found());
    }

    #[test]
    fn test_address_as_int_ignores_prefix() {
        let snapshot = snapshot(json!([
            client_v0_43("0x55d1c0a3f2b0", 1, "a"),
            client_v0_43("55d1c0a3f2b0", 1, "b"),
        ]));
        let windows = snapshot.get_windows();

        assert_eq!(windows[0].address_as_int().unwrap(), 0x55d1c0a3f2b0);
        assert_eq!(
            windows[0].address_as_int().unwrap(),
            windows[1].address_as_int().unwrap()
        );
    }

    #[test]
    fn test_swallowing_as_int() {
        let snapshot = snapshot(json!([client_v0_43("0x1", 1, "a"), client_v0_42("0x2", 1, "b")]));
        let windows = snapshot.get_windows();

        assert_eq!(windows[0].swallowing_as_int().unwrap(), Some(0));
        assert_eq!(windows[1].swallowing_as_int().unwrap(), None);
    }

    #[test]
    fn test_display_truncates_long_title() {
        let snapshot = snapshot(json!([
            client_v0_43("0x5", 1, "abcdefghijklmnopqrstuvwxyz0123"),
            client_v0_43("0x6", 1, "abcdefghijklmnopqrstuvwx"),
        ]));
        let windows = snapshot.get_windows();

        assert_eq!(
            windows[0].to_string(),
            r#"Window(address=0x5, wm_class="kitty", title="abcdefghijklmnopqrstu...")"#
        );
        assert_eq!(
            windows[1].to_string(),
            r#"Window(address=0x6, wm_class="kitty", title="abcdefghijklmnopqrstuvwx")"#
        );
    }

    #[test]
    fn test_record_fields_through_deref() {
        let snapshot = snapshot(json!([client_v0_43("0x5", 1, "vim")]));
        let window = snapshot.get_windows()[0];

        assert_eq!(window.title, "vim");
        assert_eq!(window.record().pid, 4242);
        assert!(format!("{:?}", window).starts_with("Window(WindowRecord"));
    }
}
