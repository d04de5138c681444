use std::fmt::Write;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::GenError;

/// Escape `text` for use between double quotes in a Lua string literal.
/// Every occurrence is escaped, so reading the literal back yields `text`.
pub fn escape_lua_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"'  => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // Three digits so a following digit is never read as part of the escape
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\{:03}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Quote `text` as a Lua string literal.
pub fn lua_string(text: &str) -> String {
    format!("\"{}\"", escape_lua_string(text))
}

/// Collapse every doubled backslash into one.
pub fn collapse_doubled_backslashes(text: &str) -> String {
    text.replace("\\\\", "\\")
}

pub fn read_text(path: &Path) -> Result<String, GenError> {
    fs::read_to_string(path).map_err(|source| GenError::File {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, GenError> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|source| GenError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `contents`, creating parent directories first.
pub fn write_text(path: &Path, contents: &str) -> Result<(), GenError> {
    let io_err = |source| GenError::File {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)
}


#[cfg(test)]
mod tests {
    use super::*;
    use super::lua_literal::unescape;
    use proptest::prelude::*;

    #[test]
    fn test_escape_all_occurrences() {
        let input = "a\nb\nc \"d\" \"e\"";
        let escaped = escape_lua_string(input);
        assert_eq!(escaped, "a\\nb\\nc \\\"d\\\" \\\"e\\\"");
        assert_eq!(unescape(&escaped), input);
    }

    #[test]
    fn test_escape_backslash_and_controls() {
        assert_eq!(escape_lua_string("C:\\dir"), "C:\\\\dir");
        assert_eq!(escape_lua_string("\u{7}1"), "\\0071");
        assert_eq!(escape_lua_string("é ✓"), "é ✓");
    }

    #[test]
    fn test_lua_string() {
        assert_eq!(lua_string("hi\n\"there\""), "\"hi\\n\\\"there\\\"\"");
    }

    #[test]
    fn test_collapse_doubled_backslashes() {
        assert_eq!(collapse_doubled_backslashes("a\\\\nb\\\\\\\\c"), "a\\nb\\\\c");
    }

    proptest! {
        #[test]
        fn escape_round_trips(s in "(?s).{0,64}") {
            let escaped = escape_lua_string(&s);
            prop_assert_eq!(unescape(&escaped), s);
        }

        #[test]
        fn escaped_text_has_no_bare_quote_or_newline(s in "[a-z\"\\\\\n]{0,32}") {
            let escaped = escape_lua_string(&s);
            prop_assert!(!escaped.contains('\n'));
            let mut prev_backslashes = 0;
            for c in escaped.chars() {
                if c == '"' {
                    prop_assert!(prev_backslashes % 2 == 1);
                }
                prev_backslashes = if c == '\\' { prev_backslashes + 1 } else { 0 };
            }
        }
    }
}
