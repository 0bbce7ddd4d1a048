//! Registry: one snapshot of compositor state plus its lookup primitives
//!
//! A [`Snapshot`] owns every record of one fetch and is immutable once built.
//! Entity handles borrow it, so the compiler rejects any attempt to keep a
//! handle across [`Instance::refresh`], which swaps in a whole new snapshot.

use serde_json::Value;
use tracing::{debug, trace};

use crate::entity::{Monitor, Window, Workspace};
use crate::error::ModelError;
use crate::schema::fields::json_type_name;
use crate::schema::{
    FormatSelection, HexAddress, MonitorRecord, Record, WindowRecord, WorkspaceRecord,
};
use crate::transport::Transport;

/// Every monitor, workspace and window from one point in time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    windows: Vec<WindowRecord>,
    workspaces: Vec<WorkspaceRecord>,
    monitors: Vec<MonitorRecord>,
}

impl Snapshot {
    /// Validate three JSON arrays into a snapshot
    ///
    /// # Errors
    ///
    /// Returns `ModelError::UnexpectedPayload` if a payload is not an array
    /// and `ModelError::Validation` for the first element that fails its
    /// schema. Nothing is kept from a rejected payload.
    pub fn from_json(
        windows: &Value,
        workspaces: &Value,
        monitors: &Value,
        selection: FormatSelection,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            windows: parse_all(windows, selection)?,
            workspaces: parse_all(workspaces, selection)?,
            monitors: parse_all(monitors, selection)?,
        })
    }

    pub fn from_records(
        windows: Vec<WindowRecord>,
        workspaces: Vec<WorkspaceRecord>,
        monitors: Vec<MonitorRecord>,
    ) -> Self {
        Self {
            windows,
            workspaces,
            monitors,
        }
    }

    pub fn window_records(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn workspace_records(&self) -> &[WorkspaceRecord] {
        &self.workspaces
    }

    pub fn monitor_records(&self) -> &[MonitorRecord] {
        &self.monitors
    }

    pub fn get_windows(&self) -> Vec<Window<'_>> {
        self.windows
            .iter()
            .map(|record| Window::new(record, self))
            .collect()
    }

    pub fn get_workspaces(&self) -> Vec<Workspace<'_>> {
        self.workspaces
            .iter()
            .map(|record| Workspace::new(record, self))
            .collect()
    }

    pub fn get_monitors(&self) -> Vec<Monitor<'_>> {
        self.monitors
            .iter()
            .map(|record| Monitor::new(record, self))
            .collect()
    }

    pub fn get_workspace_by_id(&self, id: i64) -> Option<Workspace<'_>> {
        self.workspaces
            .iter()
            .find(|record| record.id == id)
            .map(|record| Workspace::new(record, self))
    }

    pub fn get_monitor_by_name(&self, name: &str) -> Option<Monitor<'_>> {
        self.monitors
            .iter()
            .find(|record| record.name == name)
            .map(|record| Monitor::new(record, self))
    }

    pub fn get_monitor_by_id(&self, id: i64) -> Option<Monitor<'_>> {
        self.monitors
            .iter()
            .find(|record| record.id == id)
            .map(|record| Monitor::new(record, self))
    }

    /// Find a window by address, compared by integer value
    ///
    /// `"0x5"`, `"5"` and `"0x05"` all name the same window. Returns `None`
    /// for text that is not a valid address.
    pub fn get_window_by_address(&self, address: &str) -> Option<Window<'_>> {
        let target = HexAddress::parse(address).ok()?.to_u64().ok()?;
        self.get_window_by_int(target)
    }

    /// Find a window whose address has the integer value `target`
    ///
    /// Windows whose address does not fit in 64 bits never match.
    pub(crate) fn get_window_by_int(&self, target: u64) -> Option<Window<'_>> {
        self.windows
            .iter()
            .find(|record| record.address.to_u64().ok() == Some(target))
            .map(|record| Window::new(record, self))
    }

    /// The active workspace of the focused monitor
    pub fn get_active_workspace(&self) -> Option<Workspace<'_>> {
        let monitor = self.monitors.iter().find(|record| record.is_focused)?;
        self.get_workspace_by_id(monitor.active_workspace_id)
    }

    /// The mapped window at the head of the focus history
    pub fn get_active_window(&self) -> Option<Window<'_>> {
        self.windows
            .iter()
            .find(|record| record.is_mapped && record.focus_history_id == 0)
            .map(|record| Window::new(record, self))
    }
}

fn parse_all<R: Record>(payload: &Value, selection: FormatSelection) -> Result<Vec<R>, ModelError> {
    let items = payload
        .as_array()
        .ok_or_else(|| ModelError::UnexpectedPayload {
            kind: R::KIND,
            found: json_type_name(payload),
        })?;

    let records = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            R::from_json(item, selection).map_err(|source| ModelError::Validation {
                kind: R::KIND,
                index,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    trace!(kind = %R::KIND, count = records.len(), "Parsed records");
    Ok(records)
}

/// A compositor instance: a transport plus its current snapshot
#[derive(Debug)]
pub struct Instance<T> {
    transport: T,
    selection: FormatSelection,
    snapshot: Snapshot,
}

impl<T: Transport> Instance<T> {
    /// Fetch the first snapshot with shape detection
    pub fn new(transport: T) -> Result<Self, ModelError> {
        Self::with_selection(transport, FormatSelection::Detect)
    }

    pub fn with_selection(transport: T, selection: FormatSelection) -> Result<Self, ModelError> {
        let snapshot = fetch_snapshot(&transport, selection)?;
        Ok(Self {
            transport,
            selection,
            snapshot,
        })
    }

    /// Fetch a new, independent snapshot without touching the current one
    pub fn fetch(&self) -> Result<Snapshot, ModelError> {
        fetch_snapshot(&self.transport, self.selection)
    }

    /// Replace the current snapshot
    ///
    /// The new snapshot is built completely before the swap; on error the
    /// previous snapshot stays in place.
    pub fn refresh(&mut self) -> Result<(), ModelError> {
        self.snapshot = self.fetch()?;
        Ok(())
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn selection(&self) -> FormatSelection {
        self.selection
    }

    pub fn get_windows(&self) -> Vec<Window<'_>> {
        self.snapshot.get_windows()
    }

    pub fn get_workspaces(&self) -> Vec<Workspace<'_>> {
        self.snapshot.get_workspaces()
    }

    pub fn get_monitors(&self) -> Vec<Monitor<'_>> {
        self.snapshot.get_monitors()
    }

    pub fn get_workspace_by_id(&self, id: i64) -> Option<Workspace<'_>> {
        self.snapshot.get_workspace_by_id(id)
    }

    pub fn get_monitor_by_name(&self, name: &str) -> Option<Monitor<'_>> {
        self.snapshot.get_monitor_by_name(name)
    }

    pub fn get_monitor_by_id(&self, id: i64) -> Option<Monitor<'_>> {
        self.snapshot.get_monitor_by_id(id)
    }

    pub fn get_window_by_address(&self, address: &str) -> Option<Window<'_>> {
        self.snapshot.get_window_by_address(address)
    }

    pub fn get_active_workspace(&self) -> Option<Workspace<'_>> {
        self.snapshot.get_active_workspace()
    }

    pub fn get_active_window(&self) -> Option<Window<'_>> {
        self.snapshot.get_active_window()
    }
}

fn fetch_snapshot<T: Transport>(
    transport: &T,
    selection: FormatSelection,
) -> Result<Snapshot, ModelError> {
    let windows = transport.list_windows()?;
    let workspaces = transport.list_workspaces()?;
    let monitors = transport.list_monitors()?;

    let snapshot = Snapshot::from_json(&windows, &workspaces, &monitors, selection)?;

    debug!(
        windows = snapshot.windows.len(),
        workspaces = snapshot.workspaces.len(),
        monitors = snapshot.monitors.len(),
        ?selection,
        "Fetched snapshot"
    );

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationReason;
    use crate::schema::{EntityKind, WireFormat};
    use crate::test_support::{client_v0_42, client_v0_43, monitor, workspace_v0_42, workspace_v0_43};
    use crate::transport::StaticTransport;
    use serde_json::json;

    fn scenario() -> StaticTransport {
        StaticTransport::new(
            json!([client_v0_43("0x5", 1, "kitty")]),
            json!([workspace_v0_43(1, "DP-1")]),
            json!([monitor(0, "DP-1", 1, true)]),
        )
    }

    #[test]
    fn test_window_workspace_monitor_chain() {
        let instance = Instance::new(scenario()).unwrap();
        let window = instance.get_windows()[0];

        let name = &window.workspace().unwrap().monitor().unwrap().name;
        assert_eq!(name, "DP-1");
    }

    #[test]
    fn test_scalar_lookups() {
        let instance = Instance::new(scenario()).unwrap();

        assert_eq!(instance.get_workspace_by_id(1).unwrap().name, "1");
        assert!(instance.get_workspace_by_id(2).is_none());
        assert_eq!(instance.get_monitor_by_name("DP-1").unwrap().id, 0);
        assert!(instance.get_monitor_by_name("DP-2").is_none());
        assert!(instance.snapshot().get_monitor_by_id(0).is_some());
    }

    #[test]
    fn test_from_records_matches_from_json() {
        let parsed = Snapshot::from_json(
            &json!([client_v0_43("0x5", 1, "kitty")]),
            &json!([workspace_v0_43(1, "DP-1")]),
            &json!([monitor(0, "DP-1", 1, true)]),
            FormatSelection::Detect,
        )
        .unwrap();

        let built = Snapshot::from_records(
            parsed.window_records().to_vec(),
            parsed.workspace_records().to_vec(),
            parsed.monitor_records().to_vec(),
        );

        assert_eq!(built, parsed);
        let window = built.get_windows()[0];
        assert_eq!(window.workspace().unwrap().monitor().unwrap().name, "DP-1");
    }

    #[test]
    fn test_window_by_address_compares_values() {
        let instance = Instance::new(scenario()).unwrap();

        for address in ["0x5", "5", "0x05", "0x0005"] {
            assert!(
                instance.get_window_by_address(address).is_some(),
                "{} should match",
                address
            );
        }
        assert!(instance.get_window_by_address("0x6").is_none());
        assert!(instance.get_window_by_address("not-hex").is_none());
    }

    #[test]
    fn test_active_workspace_and_window() {
        let snapshot = Snapshot::from_json(
            &json!([client_v0_43("0x1", 2, "a"), client_v0_42("0x2", 2, "b")]),
            &json!([workspace_v0_43(1, "DP-1"), workspace_v0_43(2, "HDMI-A-1")]),
            &json!([monitor(0, "DP-1", 1, false), monitor(1, "HDMI-A-1", 2, true)]),
            FormatSelection::Detect,
        )
        .unwrap();

        assert_eq!(snapshot.get_active_workspace().unwrap().id, 2);
        // the 0.42 fixture has focusHistoryID 0
        assert_eq!(snapshot.get_active_window().unwrap().title, "b");
    }

    #[test]
    fn test_mixed_shapes_in_one_snapshot() {
        let snapshot = Snapshot::from_json(
            &json!([client_v0_43("0x1", 1, "a"), client_v0_42("0x2", 1, "b")]),
            &json!([workspace_v0_43(1, "DP-1"), workspace_v0_42(2, "DP-1", 0)]),
            &json!([monitor(0, "DP-1", 1, true)]),
            FormatSelection::Detect,
        )
        .unwrap();

        let formats: Vec<WireFormat> = snapshot
            .window_records()
            .iter()
            .map(|w| w.wire_format)
            .collect();
        assert_eq!(formats, vec![WireFormat::V0_43, WireFormat::V0_42]);
        assert_eq!(snapshot.get_workspace_by_id(1).unwrap().windows().len(), 2);
    }

    #[test]
    fn test_invalid_element_rejects_whole_payload() {
        let mut bad = client_v0_43("0x2", 1, "b");
        bad["pid"] = json!("1234");

        let err = Snapshot::from_json(
            &json!([client_v0_43("0x1", 1, "a"), bad]),
            &json!([]),
            &json!([]),
            FormatSelection::Detect,
        )
        .unwrap_err();

        match err {
            ModelError::Validation {
                kind,
                index,
                source,
            } => {
                assert_eq!(kind, EntityKind::Window);
                assert_eq!(index, 1);
                assert_eq!(source.field, "pid");
                assert_eq!(
                    source.reason,
                    ValidationReason::WrongType {
                        expected: "integer",
                        found: "string"
                    }
                );
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_non_array_payload() {
        let err = Snapshot::from_json(
            &json!([]),
            &json!({ "id": 1 }),
            &json!([]),
            FormatSelection::Detect,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ModelError::UnexpectedPayload {
                kind: EntityKind::Workspace,
                found: "object"
            }
        ));
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot =
            Snapshot::from_json(&json!([]), &json!([]), &json!([]), FormatSelection::Detect)
                .unwrap();

        assert!(snapshot.get_windows().is_empty());
        assert!(snapshot.get_active_workspace().is_none());
        assert!(snapshot.get_active_window().is_none());
    }

    #[test]
    fn test_refresh_swaps_whole_snapshot() {
        let transport = scenario();
        let mut instance = Instance::new(transport.clone()).unwrap();
        assert_eq!(instance.get_windows().len(), 1);

        transport.set_windows(json!([
            client_v0_43("0x5", 1, "kitty"),
            client_v0_43("0x6", 1, "htop"),
        ]));
        assert_eq!(instance.get_windows().len(), 1, "no refresh yet");

        instance.refresh().unwrap();
        let workspace = instance.get_workspace_by_id(1).unwrap();
        assert_eq!(workspace.windows().len(), 2);
    }

    #[test]
    fn test_failed_refresh_keeps_previous_snapshot() {
        let transport = scenario();
        let mut instance = Instance::new(transport.clone()).unwrap();

        transport.set_windows(json!("garbage"));
        assert!(instance.refresh().is_err());

        assert_eq!(instance.get_windows().len(), 1);
    }

    #[test]
    fn test_fetch_is_independent_of_current_snapshot() {
        let transport = scenario();
        let instance = Instance::new(transport.clone()).unwrap();

        transport.set_windows(json!([]));
        let fresh = instance.fetch().unwrap();

        assert!(fresh.get_windows().is_empty());
        assert_eq!(instance.get_windows().len(), 1);
    }

    #[test]
    fn test_fixed_selection_applies_to_every_record() {
        let transport = scenario();
        let err = Instance::with_selection(transport, FormatSelection::Fixed(WireFormat::V0_42))
            .unwrap_err();

        assert!(matches!(
            err,
            ModelError::Validation {
                kind: EntityKind::Window,
                ..
            }
        ));
    }
}
