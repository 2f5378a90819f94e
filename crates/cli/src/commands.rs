use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every table sync listed in a settings file
    Sync {
        #[arg(long, help = "Settings file path")]
        config: PathBuf,

        #[arg(
            long,
            help = "Environment overlay to merge over the settings file (falls back to SYNC_ENVIRONMENT)"
        )]
        env: Option<String>,

        #[arg(
            long,
            help = "If specified, writes the JSON summary to this file instead of stdout"
        )]
        output: Option<PathBuf>,
    },
    /// Build the power device graph from a device CSV and a relations file
    Graph {
        #[arg(long, help = "CSV file with one device per row")]
        devices: PathBuf,

        #[arg(long, help = "JSON file with the device relations")]
        relations: PathBuf,

        #[arg(long, default_value_t = 1000, help = "Rows per batch while reading devices")]
        batch_size: usize,

        #[arg(
            long,
            help = "If specified, writes the graph to this file instead of stdout"
        )]
        output: Option<PathBuf>,
    },
    /// Print the column schema of a CSV source
    Schema {
        #[arg(long, help = "CSV file path")]
        file: PathBuf,
    },
}
