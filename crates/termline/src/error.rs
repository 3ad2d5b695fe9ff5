use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReporterError {
    #[error("Write error: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to read {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
