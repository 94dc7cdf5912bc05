use std::path::PathBuf;

use clap::Parser;

use crate::data::loader::DEFAULT_DATA_PATH;

/// Command line options for the viewer.
#[derive(Debug, Clone, Parser)]
#[command(name = "prelims-browser", version, about = "Search and filter a prelims question bank")]
pub struct AppConfig {
    /// Question bank to open at startup (.csv or .json).
    #[arg(env = "PRELIMS_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}
