//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - A missing file means "use defaults"; a malformed file is an error.
//!
//! Notes:
//! - Unknown XML fields are rejected to surface typos early.
//! - Blank values are treated as unset.
//! - A relative `log_file` is resolved against the config file's directory.

use anyhow::{Context, Result, anyhow};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel, PathComparison};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    log_level: Option<String>,
    log_file: Option<String>,
    path_comparison: Option<String>,
    bind_address: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

// Map XmlConfig -> Config, starting from defaults.
fn xml_to_config(parsed: XmlConfig, config_dir: Option<&Path>) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = non_blank(parsed.log_level.as_deref()) {
        cfg.log_level = s.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    if let Some(s) = non_blank(parsed.log_file.as_deref()) {
        let p = PathBuf::from(s);
        cfg.log_file = Some(match config_dir {
            Some(dir) if p.is_relative() => dir.join(p),
            _ => p,
        });
    }
    if let Some(s) = non_blank(parsed.path_comparison.as_deref()) {
        cfg.path_comparison = s.parse::<PathComparison>().map_err(|e| anyhow!(e))?;
    }
    if let Some(s) = non_blank(parsed.bind_address.as_deref()) {
        cfg.bind_address = s
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid bind_address '{s}'"))?;
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed, path.parent())
        .with_context(|| format!("invalid value in config xml '{}'", path.display()))
}

/// Load the effective Config: the XML file at [`default_config_path`] when it
/// exists, defaults otherwise.
pub fn load_config() -> Result<Config> {
    let Some(path) = default_config_path() else {
        debug!("No config location available; using defaults");
        return Ok(Config::default());
    };
    if !path.exists() {
        debug!(path = %path.display(), "Config file not found; using defaults");
        return Ok(Config::default());
    }
    debug!(path = %path.display(), "Loading config");
    load_config_from_xml_path(&path)
}
