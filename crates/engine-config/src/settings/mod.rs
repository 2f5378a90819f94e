pub mod error;
pub mod loader;

pub use error::SettingsError;
pub use loader::SettingsLoader;

use model::entities::ModelKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_BATCH_SIZE: usize = 1000;
pub const DC_PLACEHOLDER: &str = "{dc}";

/// Settings for one sync run. Built once by [`SettingsLoader`] and passed by
/// reference afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncSettings {
    #[serde(default = "default_batch_size", alias = "batchSize")]
    pub batch_size: usize,

    #[serde(default = "default_query_dir", alias = "queryDir")]
    pub query_dir: PathBuf,

    #[serde(default = "default_output_dir", alias = "outputDir")]
    pub output_dir: PathBuf,

    /// Data center codes substituted into split queries.
    #[serde(default, alias = "dataCenters")]
    pub data_centers: Vec<String>,

    #[serde(default)]
    pub tables: Vec<TableSync>,
}

/// One query to run and the collection its records go to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSync {
    pub query: String,
    pub model: String,
    pub collection: String,

    #[serde(default, alias = "clearTarget")]
    pub clear_target: bool,

    /// Run the query once per data center, replacing `{dc}` each time.
    #[serde(default, alias = "splitByDc")]
    pub split_by_dc: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            batch_size: DEFAULT_BATCH_SIZE,
            query_dir: default_query_dir(),
            output_dir: default_output_dir(),
            data_centers: Vec::new(),
            tables: Vec::new(),
        }
    }
}

impl SyncSettings {
    pub fn validate(self) -> Result<Self, SettingsError> {
        if self.batch_size == 0 {
            return Err(SettingsError::InvalidBatchSize);
        }

        for (index, table) in self.tables.iter().enumerate() {
            let invalid = |reason: &str| SettingsError::InvalidTable {
                index,
                reason: reason.to_string(),
            };

            if table.query.trim().is_empty() {
                return Err(invalid("query is empty"));
            }
            if table.collection.trim().is_empty() {
                return Err(invalid("collection is empty"));
            }
            if ModelKind::from_key(&table.model).is_none() {
                return Err(SettingsError::UnknownModel(table.model.clone()));
            }
            if table.split_by_dc {
                if self.data_centers.is_empty() {
                    return Err(invalid("split by data center needs data_centers"));
                }
                if !table.query.contains(DC_PLACEHOLDER) {
                    return Err(invalid("split query has no {dc} placeholder"));
                }
            }
        }

        Ok(self)
    }
}

impl TableSync {
    /// The queries this table sync runs, in order.
    pub fn queries(&self, data_centers: &[String]) -> Vec<String> {
        if !self.split_by_dc {
            return vec![self.query.clone()];
        }

        data_centers
            .iter()
            .map(|dc| self.query.replace(DC_PLACEHOLDER, dc))
            .collect()
    }
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_query_dir() -> PathBuf {
    PathBuf::from("queries")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
