#![allow(dead_code)]

use connectors::file::csv::CsvQuerySource;
use engine_config::settings::SettingsLoader;
use engine_processing::{sink::JsonLinesSinkFactory, sync::SyncWorker};
use std::{collections::HashMap, fs, path::Path, sync::Arc};
use tempfile::TempDir;

pub mod integration;
pub mod utils;

/// A scratch workspace with a `queries` and an `output` directory.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::create_dir_all(dir.path().join("queries")).expect("create queries dir");
        Workspace { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a CSV "query" under `queries/`.
    pub fn query(&self, name: &str, contents: &str) -> &Self {
        fs::write(self.path().join("queries").join(name), contents).expect("write query");
        self
    }

    /// Writes the settings file, pointing its directories into the workspace.
    pub fn settings(&self, file_name: &str, settings: serde_json::Value) -> std::path::PathBuf {
        let mut settings = settings;
        if let Some(object) = settings.as_object_mut() {
            object
                .entry("queryDir")
                .or_insert_with(|| self.path().join("queries").display().to_string().into());
            object
                .entry("outputDir")
                .or_insert_with(|| self.path().join("output").display().to_string().into());
        }

        let path = self.path().join(file_name);
        fs::write(&path, serde_json::to_string_pretty(&settings).expect("serialize settings"))
            .expect("write settings");
        path
    }

    pub fn output(&self, collection: &str) -> std::path::PathBuf {
        self.path().join("output").join(format!("{collection}.jsonl"))
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads `settings_path` with no process environment and builds a worker over
/// CSV queries and JSON lines collections.
pub fn worker_for(settings_path: &Path, environment: Option<&str>, vars: &[(&str, &str)]) -> SyncWorker {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let settings = SettingsLoader::with_vars(settings_path, vars)
        .environment(environment.map(str::to_string))
        .load()
        .expect("load settings");

    let source = Arc::new(CsvQuerySource::new(&settings.query_dir));
    let sinks = Arc::new(JsonLinesSinkFactory::new(&settings.output_dir));
    SyncWorker::new(settings, source, sinks)
}
