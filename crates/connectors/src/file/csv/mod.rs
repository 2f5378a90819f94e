pub mod metadata;
pub mod source;

pub use source::{CsvQuerySource, CsvResult};
