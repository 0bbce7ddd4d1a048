//! Configuration data model

use std::path::PathBuf;
use std::time::Duration;

use hyprview_core::FormatSelection;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub global: GlobalConfig,
    pub socket: SocketConfig,
}

/// Global settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalConfig {
    pub log_level: LogLevel,
    /// `auto` detects each record's shape; a version pins it
    pub wire_format: FormatSelection,
}

/// How to reach the compositor
#[derive(Debug, Clone, PartialEq)]
pub struct SocketConfig {
    /// Overrides `HYPRLAND_INSTANCE_SIGNATURE`
    pub signature: Option<String>,
    /// Explicit socket path, wins over signature discovery
    pub path: Option<PathBuf>,
    pub timeout_ms: u64,
}

impl SocketConfig {
    pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            signature: None,
            path: None,
            timeout_ms: Self::DEFAULT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive usable with `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}
