use std::path::PathBuf;

use luagen_compiler::GenError;
use luagen_poeditor::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Gen(#[from] GenError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Invalid config {path}: {source}")]
    Config {
        path:   PathBuf,
        source: toml::de::Error,
    },
}
