//! KDL configuration parser

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::model::*;

/// Where the CLI looks when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/hyprview/config.kdl";

pub fn default_config_path() -> PathBuf {
    shellexpand::tilde(DEFAULT_CONFIG_PATH).into_owned().into()
}

/// Span of a KDL entry, rebuilt for our miette version
fn entry_span(entry: &kdl::KdlEntry) -> miette::SourceSpan {
    let span = entry.span();
    miette::SourceSpan::from((span.offset(), span.len()))
}

fn invalid(source: &str, span: miette::SourceSpan, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        message: message.into(),
        src: source.to_string(),
        span,
    }
}

/// First argument of a node, if it is a string
fn string_arg<'a>(
    node: &'a kdl::KdlNode,
    source: &str,
) -> Result<Option<(&'a str, miette::SourceSpan)>, ConfigError> {
    let Some(entry) = node.entries().first() else {
        return Ok(None);
    };
    match entry.value().as_string() {
        Some(value) => Ok(Some((value, entry_span(entry)))),
        None => Err(invalid(
            source,
            entry_span(entry),
            format!("`{}` expects a string", node.name().value()),
        )),
    }
}

/// Parse a configuration file from the given path
///
/// A missing file is not an error: the defaults are returned.
pub fn parse_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        tracing::debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    parse_config_str(&content)
}

/// Parse configuration from a string
pub fn parse_config_str(content: &str) -> Result<Config, ConfigError> {
    let doc: kdl::KdlDocument = content.parse().map_err(|e: kdl::KdlError| {
        // kdl uses an older miette version, so the span is rebuilt from offset/len
        let span = miette::SourceSpan::from((e.span.offset(), e.span.len()));
        ConfigError::ParseError {
            src: content.to_string(),
            span,
            source: e,
        }
    })?;

    let mut config = Config::default();

    for node in doc.nodes() {
        match node.name().value() {
            "global" => {
                config.global = parse_global(node, content)?;
            }
            "socket" => {
                config.socket = parse_socket(node, content)?;
            }
            name => {
                tracing::warn!("Unknown top-level node: {}", name);
            }
        }
    }

    Ok(config)
}

fn parse_global(node: &kdl::KdlNode, source: &str) -> Result<GlobalConfig, ConfigError> {
    let mut global = GlobalConfig::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "log-level" => {
                    if let Some((val, span)) = string_arg(child, source)? {
                        global.log_level =
                            val.parse().map_err(|e: String| invalid(source, span, e))?;
                    }
                }
                "wire-format" => {
                    if let Some((val, span)) = string_arg(child, source)? {
                        global.wire_format =
                            val.parse().map_err(|e: String| invalid(source, span, e))?;
                    }
                }
                name => {
                    tracing::warn!("Unknown global config option: {}", name);
                }
            }
        }
    }

    Ok(global)
}

fn parse_socket(node: &kdl::KdlNode, source: &str) -> Result<SocketConfig, ConfigError> {
    let mut socket = SocketConfig::default();

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "signature" => {
                    if let Some((val, span)) = string_arg(child, source)? {
                        if val.is_empty() {
                            return Err(invalid(source, span, "signature must not be empty"));
                        }
                        socket.signature = Some(val.to_string());
                    }
                }
                "path" => {
                    if let Some((val, _)) = string_arg(child, source)? {
                        socket.path = Some(shellexpand::tilde(val).into_owned().into());
                    }
                }
                "timeout-ms" => {
                    if let Some(entry) = child.entries().first() {
                        socket.timeout_ms = entry
                            .value()
                            .as_i64()
                            .and_then(|ms| u64::try_from(ms).ok())
                            .filter(|ms| *ms > 0)
                            .ok_or_else(|| {
                                invalid(
                                    source,
                                    entry_span(entry),
                                    "timeout-ms expects a positive integer",
                                )
                            })?;
                    }
                }
                name => {
                    tracing::warn!("Unknown socket config option: {}", name);
                }
            }
        }
    }

    Ok(socket)
}
