use thiserror::Error;

#[derive(Debug, Error)]
pub enum LuaHelpError {
    #[error("Parse error at line {line}, column {column}: {msg}")]
    ParseError {
        msg:    String,
        line:   usize,
        column: usize,
    },
}
