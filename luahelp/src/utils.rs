use crate::error::LuaHelpError;

/// Wraps `text` in double quotes for error messages.
pub fn quote(text: &str) -> String {
    format!("{:?}", text)
}

pub fn error(msg: &str, line: usize, column: usize) -> LuaHelpError {
    LuaHelpError::ParseError {
        msg: msg.to_string(),
        line,
        column,
    }
}
