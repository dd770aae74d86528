//! Configuration file support for dependency-overrider.
//!
//! The configuration is a JSON document listing the projects to process
//! and the override rules to apply to them:
//!
//! ```json
//! {
//!   "commonRoot": "../src",
//!   "projectPaths": ["App/App.csproj", "Worker/Worker.csproj"],
//!   "overrides": [
//!     { "packageId": "Newtonsoft.Json", "oldVersions": ["12.0.1"], "newVersion": "13.0.3" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::override_resolution::domain::OverrideRule;
use crate::shared::error::OverriderError;

pub const CONFIG_FILENAME: &str = "config.json";

/// Top-level configuration file schema.
///
/// Property names are matched case-insensitively before deserialisation,
/// see `normalize_keys`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    #[serde(deserialize_with = "null_as_empty")]
    common_root: String,
    project_paths: Vec<Option<String>>,
    overrides: Vec<OverrideEntry>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    unknown_fields: HashMap<String, Value>,
}

const CONFIG_KEYS: [&str; 3] = ["commonRoot", "projectPaths", "overrides"];

/// A single entry of the `overrides` array.
///
/// Every field is optional at this level so that an incomplete entry is
/// loaded as an invalid rule instead of rejecting the whole file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OverrideEntry {
    #[serde(default)]
    package_id: Option<String>,
    #[serde(default)]
    old_versions: Option<Vec<String>>,
    #[serde(default)]
    new_version: Option<String>,
    #[serde(default)]
    framework: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

const OVERRIDE_KEYS: [&str; 5] = [
    "packageId",
    "oldVersions",
    "newVersion",
    "framework",
    "reason",
];

/// `null` reads as an empty string; the property itself stays required.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Renames object properties that match one of `known` ignoring ASCII case
fn normalize_keys(value: &mut Value, known: &[&str]) {
    if let Value::Object(map) = value {
        for (key, field) in std::mem::take(map) {
            let key = known
                .iter()
                .find(|k| k.eq_ignore_ascii_case(&key))
                .map_or(key, |k| k.to_string());
            map.insert(key, field);
        }
    }
}

impl From<OverrideEntry> for OverrideRule {
    fn from(entry: OverrideEntry) -> Self {
        OverrideRule::new(
            entry.package_id.unwrap_or_default(),
            entry.old_versions.unwrap_or_default(),
            entry.new_version.unwrap_or_default(),
        )
        .with_framework(entry.framework.filter(|f| !f.trim().is_empty()))
        .with_reason(entry.reason.filter(|r| !r.trim().is_empty()))
    }
}

/// Loaded configuration: where the projects are and which rules to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideConfig {
    /// Directory that relative `commonRoot` values are resolved against
    pub base_dir: PathBuf,
    pub common_root: String,
    /// Non-empty project entries, in configuration order
    pub project_paths: Vec<String>,
    /// Every configured rule, valid or not
    pub rules: Vec<OverrideRule>,
    /// Top-level properties the tool does not know about, sorted
    pub unknown_fields: Vec<String>,
}

impl OverrideConfig {
    /// Target paths in processing order: `base_dir / common_root / entry`
    ///
    /// Absolute `common_root` or entries replace the preceding components.
    pub fn target_paths(&self) -> Vec<PathBuf> {
        let root = self.base_dir.join(&self.common_root);
        self.project_paths.iter().map(|p| root.join(p)).collect()
    }
}

/// The default config location: `config.json` next to the executable.
pub fn default_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default()
        .join(CONFIG_FILENAME)
}

/// Load config from an explicit path.
///
/// # Errors
/// - `ConfigNotFound` if the file does not exist
/// - `ConfigMalformed` if it cannot be read or parsed
pub fn load_config(path: &Path) -> Result<OverrideConfig, OverriderError> {
    if !path.exists() {
        return Err(OverriderError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| OverriderError::ConfigMalformed {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    parse_config(&content, path, base_dir)
}

/// Parse config text. Pure: `source` is only used in error messages.
///
/// Property names are case-insensitive.
pub fn parse_config(
    content: &str,
    source: &Path,
    base_dir: PathBuf,
) -> Result<OverrideConfig, OverriderError> {
    let malformed = |details: String| OverriderError::ConfigMalformed {
        path: source.to_path_buf(),
        details,
    };

    let mut value: Value = serde_json::from_str(content).map_err(|e| malformed(e.to_string()))?;
    normalize_keys(&mut value, &CONFIG_KEYS);
    if let Some(Value::Array(entries)) = value.get_mut("overrides") {
        for entry in entries {
            normalize_keys(entry, &OVERRIDE_KEYS);
        }
    }
    let file: ConfigFile =
        serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;

    let mut unknown_fields: Vec<String> = file.unknown_fields.into_keys().collect();
    unknown_fields.sort();

    Ok(OverrideConfig {
        base_dir,
        common_root: file.common_root,
        project_paths: file
            .project_paths
            .into_iter()
            .flatten()
            .filter(|p| !p.trim().is_empty())
            .collect(),
        rules: file.overrides.into_iter().map(OverrideRule::from).collect(),
        unknown_fields,
    })
}
