//! Command handler modules for the `tj` binary.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod events;
pub mod session;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use tj_config::{report_unused_keys, LoadedConfig, UnusedKeyPolicy};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Read a UTF-8 JSON file (a leading BOM is tolerated).
pub fn load_json_file<T: DeserializeOwned>(path: &str) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("read json file failed: {path}"))?;
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(&bytes);
    let raw = std::str::from_utf8(bytes).with_context(|| format!("{path} must be UTF-8 text"))?;
    serde_json::from_str(raw.trim()).with_context(|| format!("{path} has unexpected JSON shape"))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// config-hash
// ---------------------------------------------------------------------------

pub fn config_hash(loaded: &LoadedConfig, strict: bool) -> Result<()> {
    let policy = if strict {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    let report = report_unused_keys(&loaded.config_json, policy)?;
    // Validate the session table before reporting the hash as usable.
    loaded.session_table()?;

    print_json(&serde_json::json!({
        "config_hash": loaded.config_hash,
        "unused_keys": report.unused_leaf_pointers,
        "config": loaded.config_json,
    }))
}
