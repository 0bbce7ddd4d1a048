//! JSON fixtures shaped like `hyprctl -j` output

use serde_json::{json, Value};

/// A 0.43-shaped client object
pub(crate) fn client_v0_43(address: &str, workspace_id: i64, title: &str) -> Value {
    json!({
        "address": address,
        "mapped": true,
        "hidden": false,
        "at": [10, 40],
        "size": [1900, 1030],
        "workspace": { "id": workspace_id, "name": workspace_id.to_string() },
        "floating": false,
        "monitor": 0,
        "class": "kitty",
        "title": title,
        "initialClass": "kitty",
        "initialTitle": "kitty",
        "pid": 4242,
        "xwayland": true,
        "pinned": false,
        "fullscreen": 0,
        "fullscreenClient": 0,
        "grouped": [],
        "tags": ["term"],
        "swallowing": "0x0",
        "focusHistoryID": 1
    })
}

/// A 0.42-shaped client object
pub(crate) fn client_v0_42(address: &str, workspace_id: i64, title: &str) -> Value {
    json!({
        "address": address,
        "mapped": true,
        "hidden": false,
        "at": [0, 0],
        "size": [800, 600],
        "workspace": { "id": workspace_id, "name": workspace_id.to_string() },
        "floating": true,
        "pseudo": false,
        "monitor": 1,
        "class": "firefox",
        "title": title,
        "initialClass": "firefox",
        "initialTitle": "Mozilla Firefox",
        "pid": 777,
        "xwayland": false,
        "pinned": true,
        "fullscreen": true,
        "fullscreenMode": 2,
        "fakeFullscreen": false,
        "grouped": ["0x1a", "2b"],
        "tags": [],
        "swallowing": "",
        "focusHistoryID": 0
    })
}

/// A 0.43-shaped workspace object (no `monitorID`)
pub(crate) fn workspace_v0_43(id: i64, monitor: &str) -> Value {
    json!({
        "id": id,
        "name": id.to_string(),
        "monitor": monitor,
        "windows": 1,
        "hasfullscreen": false,
        "lastwindow": "0x5",
        "lastwindowtitle": "kitty"
    })
}

/// A 0.42-shaped workspace object
pub(crate) fn workspace_v0_42(id: i64, monitor: &str, monitor_id: i64) -> Value {
    json!({
        "id": id,
        "name": id.to_string(),
        "monitor": monitor,
        "monitorID": monitor_id,
        "windows": 0,
        "hasfullscreen": true,
        "lastwindow": "",
        "lastwindowtitle": ""
    })
}

pub(crate) fn monitor(id: i64, name: &str, active_workspace: i64, focused: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("Dell Inc. {}", name),
        "make": "Dell Inc.",
        "model": "DELL U2720Q",
        "serial": "ABC123",
        "width": 3840,
        "height": 2160,
        "refreshRate": 59.997,
        "x": 0,
        "y": 0,
        "activeWorkspace": { "id": active_workspace, "name": active_workspace.to_string() },
        "reserved": [0, 30, 0, 0],
        "scale": 1.5,
        "transform": 0,
        "focused": focused,
        "dpmsStatus": true,
        "vrr": false
    })
}
