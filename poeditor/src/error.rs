use std::path::PathBuf;

use luagen_compiler::GenError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("missing env key {0}")]
    MissingEnv(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("POEditor API error on {endpoint}: {message}")]
    Api {
        endpoint: String,
        message:  String,
    },

    #[error("Unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source:   serde_json::Error,
    },

    #[error("Could not serialize {path}: {source}")]
    Encode {
        path:   PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Gen(#[from] GenError),
}
