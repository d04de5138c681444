use std::path::PathBuf;
use thiserror::Error;
use luagen_luahelp::LuaHelpError;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error on {path}: {source}")]
    File {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path:   PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    LuaHelp(#[from] LuaHelpError),

    #[error("Parse error at line {line}, column {column}: {msg}")]
    ParseError {
        msg:    String,
        line:   usize,
        column: usize,
    },

    #[error("no known type {0}")]
    UnknownType(String),

    #[error("Unexpected event name: {0}")]
    InvalidEventName(String),

    #[error("Term {0:?} cannot be listed as a term key")]
    InvalidTermKey(String),

    #[error("Override for {event} references unknown parameter {param}")]
    UnknownParameter {
        event: String,
        param: String,
    },
}
