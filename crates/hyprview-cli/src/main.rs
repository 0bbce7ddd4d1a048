//! hyprview CLI
//!
//! Inspect Hyprland windows, workspaces and monitors.

mod logging;
mod tree;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hyprview_config::Config;
use hyprview_core::{
    FixtureDir, FormatSelection, HyprlandSocket, Instance, Monitor, NonEmptyString, Snapshot,
    Transport, Window, Workspace,
};
use miette::IntoDiagnostic;
use serde::Serialize;

use crate::tree::Tree;

#[derive(Parser, Debug)]
#[command(name = "hyprview")]
#[command(about = "Typed view of Hyprland compositor state")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = hyprview_config::DEFAULT_CONFIG_PATH)]
    config: String,

    /// Read windows.json, workspaces.json and monitors.json from a directory
    /// instead of the compositor socket
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    /// Wire format: auto, 0.42 or 0.43 (overrides config setting)
    #[arg(long, global = true)]
    wire_format: Option<FormatSelection>,

    /// Print normalized records as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all windows
    Windows,

    /// List all workspaces
    Workspaces,

    /// List all monitors
    Monitors,

    /// Show one window by address (e.g. 0x55d1c0a3f2b0)
    Window { address: String },

    /// Show one workspace by id
    Workspace {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Show one monitor by name (e.g. DP-1)
    Monitor { name: String },

    /// Show monitors, their workspaces and windows as a tree
    Tree,
}

fn main() -> miette::Result<()> {
    // Initialize tracing before the config is read so its warnings are shown
    let log_handle = logging::init();

    let cli = Cli::parse();

    // Expand tilde in config path
    let config_path: PathBuf = shellexpand::tilde(&cli.config).into_owned().into();
    let config = hyprview_config::parse_config(&config_path)?;

    // RUST_LOG wins over the configured level
    log_handle
        .apply(config.global.log_level)
        .into_diagnostic()?;

    let selection = cli.wire_format.unwrap_or(config.global.wire_format);
    let transport = open_transport(cli.fixtures.as_ref(), &config)?;
    let instance = Instance::with_selection(transport.as_ref(), selection).into_diagnostic()?;
    let snapshot = instance.snapshot();

    tracing::debug!(%selection, "Loaded compositor state");

    match cli.command {
        Commands::Windows => cmd_windows(snapshot, cli.json),
        Commands::Workspaces => cmd_workspaces(snapshot, cli.json),
        Commands::Monitors => cmd_monitors(snapshot, cli.json),
        Commands::Window { address } => cmd_window(snapshot, &address, cli.json),
        Commands::Workspace { id } => cmd_workspace(snapshot, id, cli.json),
        Commands::Monitor { name } => cmd_monitor(snapshot, &name, cli.json),
        Commands::Tree => cmd_tree(snapshot, cli.json),
    }
}

/// Pick fixtures, an explicit socket path, a configured signature or the
/// environment, in that order
fn open_transport(
    fixtures: Option<&PathBuf>,
    config: &Config,
) -> miette::Result<Box<dyn Transport>> {
    if let Some(dir) = fixtures {
        tracing::info!("Replaying fixtures from {}", dir.display());
        return Ok(Box::new(FixtureDir::new(dir)));
    }

    let socket = match (&config.socket.path, &config.socket.signature) {
        (Some(path), _) => HyprlandSocket::at_path(path),
        (None, Some(signature)) => {
            let signature = NonEmptyString::parse(signature.as_str())
                .map_err(|reason| miette::miette!("Invalid signature in config: {}", reason))?;
            HyprlandSocket::for_signature(&signature)
        }
        (None, None) => HyprlandSocket::from_env(),
    }
    .into_diagnostic()?;

    tracing::info!("Using Hyprland socket {}", socket.path().display());
    Ok(Box::new(socket.with_timeout(config.socket.timeout())))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> miette::Result<()> {
    let out = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{}", out);
    Ok(())
}

/// `Window(...)`, or `Window(...) (reason)` when its workspace is missing
fn describe_window(window: Window<'_>) -> miette::Result<String> {
    match window.workspace() {
        Ok(workspace) => Ok(format!("{} on {}", window, workspace)),
        Err(err) if err.is_parent_not_found() => Ok(format!("{} ({})", window, err)),
        Err(err) => Err(err).into_diagnostic(),
    }
}

fn cmd_windows(snapshot: &Snapshot, json: bool) -> miette::Result<()> {
    if json {
        return print_json(snapshot.window_records());
    }

    for window in snapshot.get_windows() {
        println!("{}", describe_window(window)?);
    }
    Ok(())
}

fn cmd_workspaces(snapshot: &Snapshot, json: bool) -> miette::Result<()> {
    if json {
        return print_json(snapshot.workspace_records());
    }

    for workspace in snapshot.get_workspaces() {
        println!("{} ({} window(s))", workspace, workspace.windows().len());
    }
    Ok(())
}

fn cmd_monitors(snapshot: &Snapshot, json: bool) -> miette::Result<()> {
    if json {
        return print_json(snapshot.monitor_records());
    }

    for monitor in snapshot.get_monitors() {
        let focused = if monitor.is_focused { " (focused)" } else { "" };
        println!("{}{}", monitor, focused);
    }
    Ok(())
}

fn cmd_window(snapshot: &Snapshot, address: &str, json: bool) -> miette::Result<()> {
    let window = snapshot
        .get_window_by_address(address)
        .ok_or_else(|| miette::miette!("No window with address {}", address))?;

    if json {
        return print_json(window.record());
    }

    print_window(window)
}

fn print_window(window: Window<'_>) -> miette::Result<()> {
    println!("{}", window);
    println!("  Address:    {}", window.address);
    println!("  Class:      {}", window.wm_class);
    println!("  Title:      {}", window.title);
    println!("  PID:        {}", window.pid);
    println!("  Position:   {},{}", window.position.0, window.position.1);
    println!("  Size:       {}x{}", window.size.0, window.size.1);
    println!("  Floating:   {}", window.is_floating);
    println!("  Fullscreen: {}", window.is_fullscreen());
    println!("  Format:     {}", window.wire_format);

    match window.workspace() {
        Ok(workspace) => println!("  Workspace:  {}", workspace),
        Err(err) if err.is_parent_not_found() => println!("  Workspace:  missing ({})", err),
        Err(err) => return Err(err).into_diagnostic(),
    }

    match window.monitor() {
        Ok(monitor) => println!("  Monitor:    {}", monitor),
        Err(err) if err.is_parent_not_found() => println!("  Monitor:    missing ({})", err),
        Err(err) => return Err(err).into_diagnostic(),
    }

    Ok(())
}

fn cmd_workspace(snapshot: &Snapshot, id: i64, json: bool) -> miette::Result<()> {
    let workspace = snapshot
        .get_workspace_by_id(id)
        .ok_or_else(|| miette::miette!("No workspace with id {}", id))?;

    if json {
        return print_json(workspace.record());
    }

    print_workspace(workspace)
}

fn print_workspace(workspace: Workspace<'_>) -> miette::Result<()> {
    println!("{}", workspace);

    match workspace.monitor() {
        Ok(monitor) => println!("  Monitor:     {}", monitor),
        Err(err) if err.is_parent_not_found() => println!("  Monitor:     missing ({})", err),
        Err(err) => return Err(err).into_diagnostic(),
    }

    match workspace.last_window() {
        Ok(Some(window)) => println!("  Last window: {}", window),
        Ok(None) => println!("  Last window: none"),
        Err(err) if err.is_parent_not_found() => println!("  Last window: missing ({})", err),
        Err(err) => return Err(err).into_diagnostic(),
    }

    let windows = workspace.windows();
    println!("  Windows:     {}", windows.len());
    for window in windows {
        println!("    {}", window);
    }

    Ok(())
}

fn cmd_monitor(snapshot: &Snapshot, name: &str, json: bool) -> miette::Result<()> {
    let monitor = snapshot
        .get_monitor_by_name(name)
        .ok_or_else(|| miette::miette!("No monitor named {}", name))?;

    if json {
        return print_json(monitor.record());
    }

    print_monitor(monitor)
}

fn print_monitor(monitor: Monitor<'_>) -> miette::Result<()> {
    println!("{}", monitor);
    println!("  Description: {}", monitor.description);
    println!("  Refresh:     {:.3} Hz", monitor.refresh_rate);
    println!("  Scale:       {}", monitor.scale);
    println!("  Position:    {},{}", monitor.position.0, monitor.position.1);
    println!(
        "  Reserved:    left={} top={} right={} bottom={}",
        monitor.reserved.left, monitor.reserved.top, monitor.reserved.right, monitor.reserved.bottom
    );
    println!("  Focused:     {}", monitor.is_focused);

    match monitor.active_workspace() {
        Ok(workspace) => println!("  Active:      {}", workspace),
        Err(err) if err.is_parent_not_found() => println!("  Active:      missing ({})", err),
        Err(err) => return Err(err).into_diagnostic(),
    }

    for workspace in monitor.workspaces() {
        println!("    {}", workspace);
    }

    Ok(())
}

fn cmd_tree(snapshot: &Snapshot, json: bool) -> miette::Result<()> {
    let tree = Tree::build(snapshot).into_diagnostic()?;

    if json {
        return print_json(&tree.to_json());
    }

    print!("{}", tree);
    Ok(())
}
