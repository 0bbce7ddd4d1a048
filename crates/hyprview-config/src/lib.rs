//! Configuration parsing for hyprview
//!
//! This crate reads the KDL configuration file that selects the compositor
//! instance, the wire format and the log level.

mod error;
mod model;
mod parser;

pub use error::ConfigError;
pub use model::*;
pub use parser::{default_config_path, parse_config, parse_config_str, DEFAULT_CONFIG_PATH};
