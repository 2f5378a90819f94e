use super::{SettingsError, SyncSettings};
use serde_json::Value as Json;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

pub const ENVIRONMENT_VAR: &str = "SYNC_ENVIRONMENT";
pub const BATCH_SIZE_VAR: &str = "SYNC_BATCH_SIZE";
pub const OUTPUT_DIR_VAR: &str = "SYNC_OUTPUT_DIR";
pub const QUERY_DIR_VAR: &str = "SYNC_QUERY_DIR";

/// Loads [`SyncSettings`] in layers:
///
/// 1. the base JSON file,
/// 2. `<stem>.<environment>.json` next to it, merged key by key when present
///    (keys compare in snake_case, so either naming style overrides the other),
/// 3. `SYNC_BATCH_SIZE`, `SYNC_OUTPUT_DIR` and `SYNC_QUERY_DIR` overrides,
///
/// and validates the result.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    path: PathBuf,
    environment: Option<String>,
    vars: HashMap<String, String>,
}

impl SettingsLoader {
    /// A loader reading overrides from the process environment.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_vars(path, std::env::vars().collect())
    }

    /// A loader reading overrides from `vars` instead of the process environment.
    pub fn with_vars(path: impl Into<PathBuf>, vars: HashMap<String, String>) -> Self {
        let environment = vars.get(ENVIRONMENT_VAR).cloned();
        SettingsLoader {
            path: path.into(),
            environment,
            vars,
        }
    }

    /// Selects the overlay file; `None` keeps the one from `SYNC_ENVIRONMENT`.
    pub fn environment(mut self, environment: Option<String>) -> Self {
        if environment.is_some() {
            self.environment = environment;
        }
        self
    }

    pub fn overlay_path(&self) -> Option<PathBuf> {
        let environment = self.environment.as_deref()?.trim();
        if environment.is_empty() {
            return None;
        }

        let stem = self.path.file_stem()?.to_string_lossy();
        let name = match self.path.extension() {
            Some(ext) => format!("{stem}.{environment}.{}", ext.to_string_lossy()),
            None => format!("{stem}.{environment}"),
        };
        Some(self.path.with_file_name(name))
    }

    pub fn load(&self) -> Result<SyncSettings, SettingsError> {
        let mut document = normalize_keys(read_json(&self.path)?);

        if let Some(overlay_path) = self.overlay_path().filter(|p| p.exists()) {
            debug!(overlay = %overlay_path.display(), "Applying settings overlay.");
            merge(&mut document, normalize_keys(read_json(&overlay_path)?));
        }

        let mut settings: SyncSettings =
            serde_json::from_value(document).map_err(|source| SettingsError::Parse {
                path: self.path.clone(),
                source,
            })?;
        self.apply_overrides(&mut settings)?;

        let settings = settings.validate()?;
        info!(
            path = %self.path.display(),
            environment = self.environment.as_deref().unwrap_or("default"),
            tables = settings.tables.len(),
            batch_size = settings.batch_size,
            "Loaded sync settings."
        );
        Ok(settings)
    }

    fn apply_overrides(&self, settings: &mut SyncSettings) -> Result<(), SettingsError> {
        if let Some(value) = self.vars.get(BATCH_SIZE_VAR) {
            settings.batch_size =
                value
                    .trim()
                    .parse()
                    .map_err(|_| SettingsError::InvalidOverride {
                        var: BATCH_SIZE_VAR.to_string(),
                        value: value.clone(),
                    })?;
        }
        if let Some(value) = self.vars.get(OUTPUT_DIR_VAR) {
            settings.output_dir = PathBuf::from(value);
        }
        if let Some(value) = self.vars.get(QUERY_DIR_VAR) {
            settings.query_dir = PathBuf::from(value);
        }
        Ok(())
    }
}

fn read_json(path: &Path) -> Result<Json, SettingsError> {
    let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Rewrites every object key to snake_case so `batchSize` and `batch_size`
/// land on the same key before layers are merged.
fn normalize_keys(value: Json) -> Json {
    match value {
        Json::Object(map) => {
            let mut normalized = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                let key = snake_case(&key);
                let value = normalize_keys(value);
                match normalized.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        normalized.insert(key, value);
                    }
                }
            }
            Json::Object(normalized)
        }
        Json::Array(items) => Json::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Merges `overlay` into `base`. Objects merge per key, anything else replaces.
fn merge(base: &mut Json, overlay: Json) {
    match (base, overlay) {
        (Json::Object(base), Json::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
