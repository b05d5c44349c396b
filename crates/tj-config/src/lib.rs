//! tj-config
//!
//! Layered YAML configuration for the journal core.
//!
//! Documents merge in order on top of the built-in defaults: earlier docs are
//! base, later docs override (objects merge key by key, anything else is
//! replaced). The merged document is serialized to canonical JSON and hashed
//! (SHA-256) so downstream aggregates can record which session table produced
//! them.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use tracing::warn;

use tj_calendar::{Region, SessionSpec, SessionTable};

/// Built-in defaults, always the first layer.
pub const DEFAULT_YAML: &str = r#"
log:
  filter: "info"
sessions:
  London:
    region: EU
    winter_start_hour: 8
    winter_end_hour: 13
  NY AM:
    region: US
    winter_start_hour: 13
    winter_end_hour: 18
  NY PM:
    region: US
    winter_start_hour: 18
    winter_end_hour: 22
  Asia:
    region: US
    winter_start_hour: 23
    winter_end_hour: 8
aliases:
  london: ["London"]
  new-york: ["NY AM", "NY PM"]
  tokyo: ["Asia"]
  sydney: ["Asia"]
"#;

/// JSON-pointer prefixes the typed config reads. Leaves outside these are
/// reported as unused.
pub const CONSUMED_POINTERS: &[&str] = &["/log/filter", "/sessions", "/aliases"];

// ---------------------------------------------------------------------------
// Typed view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub region: Region,
    pub winter_start_hour: u32,
    pub winter_end_hour: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalConfig {
    pub log: LogConfig,
    pub sessions: BTreeMap<String, SessionSettings>,
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
}

impl JournalConfig {
    /// Build the validated session table described by this config.
    pub fn session_table(&self) -> Result<SessionTable> {
        let specs = self
            .sessions
            .iter()
            .map(|(name, s)| {
                SessionSpec::new(
                    name.clone(),
                    s.region,
                    s.winter_start_hour,
                    s.winter_end_hour,
                )
            })
            .collect();
        let aliases = self
            .aliases
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()));
        SessionTable::new(specs, aliases).context("invalid session table in config")
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
    pub config: JournalConfig,
}

impl LoadedConfig {
    pub fn session_table(&self) -> Result<SessionTable> {
        self.config.session_table()
    }
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let raw =
            fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))?;
        docs.push(raw);
    }

    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

/// Merge `yaml_docs` over [`DEFAULT_YAML`].
pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = yaml_to_json(DEFAULT_YAML).context("built-in defaults")?;
    for raw in yaml_docs {
        let layer = yaml_to_json(raw)?;
        // An empty document parses to null; it must not wipe the base.
        if layer.is_null() {
            continue;
        }
        merged = deep_merge(merged, layer);
    }

    let config: JournalConfig = serde_json::from_value(merged.clone())
        .context("config does not match the journal schema")?;

    let canonical_json = canonicalize_json(&merged)?;
    let config_hash = sha256_hex(canonical_json.as_bytes());
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
        config,
    })
}

fn yaml_to_json(raw: &str) -> Result<Value> {
    let v_yaml: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
    serde_json::to_value(v_yaml).context("yaml->json conversion failed")
}

fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a_map), Value::Object(b_map)) => {
            for (k, b_val) in b_map {
                let a_val = a_map.remove(&k).unwrap_or(Value::Null);
                a_map.insert(k, deep_merge(a_val, b_val));
            }
            Value::Object(a_map)
        }
        (_, b_other) => b_other,
    }
}

fn canonicalize_json(v: &Value) -> Result<String> {
    // serde_json::Map is BTreeMap-backed (no preserve_order feature), so keys
    // serialize sorted regardless of YAML order.
    serde_json::to_string(v).context("canonical json serialize failed")
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

// ---------------------------------------------------------------------------
// Unused-key guard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    /// Minimal set of unused leaf pointers (sorted)
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// Report config leaves that nothing reads (typos such as `sesions:`).
///
/// `Warn` logs and returns the report; `Fail` errors when any leaf is unused.
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let consumed: BTreeSet<&str> = CONSUMED_POINTERS.iter().copied().collect();

    let mut leaves: Vec<String> = Vec::new();
    collect_leaf_pointers(config_json, "", &mut leaves);

    let mut unused: Vec<String> = leaves
        .into_iter()
        .filter(|lp| !consumed.iter().any(|cp| is_prefix_pointer(cp, lp)))
        .collect();
    unused.sort();
    unused.dedup();

    let report = UnusedKeyReport {
        unused_leaf_pointers: unused,
    };

    if !report.is_clean() {
        match policy {
            UnusedKeyPolicy::Fail => bail!(
                "CONFIG_UNUSED_KEYS: {} unused config leaf key(s) detected. First few: {:?}",
                report.unused_leaf_pointers.len(),
                report.unused_leaf_pointers.iter().take(12).collect::<Vec<_>>()
            ),
            UnusedKeyPolicy::Warn => warn!(
                unused = ?report.unused_leaf_pointers,
                "config contains unused keys"
            ),
        }
    }

    Ok(report)
}

/// Return true if `prefix` is a JSON-pointer prefix of `leaf`.
///
/// "/a/b" consumes "/a/b" and "/a/b/c" but NOT "/a/bc".
fn is_prefix_pointer(prefix: &str, leaf: &str) -> bool {
    if leaf == prefix {
        return true;
    }
    leaf.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('/'))
}

fn collect_leaf_pointers(v: &Value, prefix: &str, out: &mut Vec<String>) {
    match v {
        Value::Object(map) => {
            for (k, vv) in map.iter() {
                let next = format!("{}/{}", prefix, escape_pointer_token(k));
                collect_leaf_pointers(vv, &next, out);
            }
        }
        Value::Array(arr) => {
            for (i, vv) in arr.iter().enumerate() {
                let next = format!("{}/{}", prefix, i);
                collect_leaf_pointers(vv, &next, out);
            }
        }
        _ => {
            let p = if prefix.is_empty() {
                "/".to_string()
            } else {
                prefix.to_string()
            };
            out.push(p);
        }
    }
}

fn escape_pointer_token(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}
