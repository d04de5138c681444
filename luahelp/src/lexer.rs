use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LABEL:     Regex = Regex::new(r"^([A-Za-z][A-Za-z ]*?)\s*:$").unwrap();
    static ref SIGNATURE: Regex = Regex::new(r"^([A-Za-z_]\w*)\s*\(([^()]*)\)$").unwrap();
    static ref PARAMETER: Regex =
        Regex::new(r"^-\s*([A-Za-z_]\w*)\s*\(([A-Za-z_][\w.]*)\)\s*(?::\s*(.*))?$").unwrap();
}

/// Spaces that make up one indentation level when tabs are not used.
const SPACES_PER_LEVEL: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Blank,
    /// `Title :`
    Label(String),
    /// `name (a, b)`
    Signature { name: String, arguments: Vec<String> },
    /// `- name (Type) : description`
    Parameter { name: String, type_: String, description: String },
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub kind:   LineKind,
    /// Trimmed line content.
    pub text:   String,
    pub depth:  usize,
    pub line:   usize,
    pub column: usize,
}

/// Split LuaHelp text into classified lines. Every line is kept, so the
/// parser decides what is meaningful in its context.
pub fn tokenize_luahelp(text: &str) -> Vec<Line> {
    text.split('\n')
        .enumerate()
        .map(|(i, raw)| classify(raw.strip_suffix('\r').unwrap_or(raw), i + 1))
        .collect()
}

fn classify(raw: &str, line: usize) -> Line {
    let trimmed = raw.trim();
    let indent = &raw[..raw.len() - raw.trim_start().len()];
    let tabs = indent.chars().filter(|&c| c == '\t').count();
    let spaces = indent.chars().filter(|&c| c == ' ').count();

    let kind = if trimmed.is_empty() {
        LineKind::Blank
    } else if let Some(caps) = PARAMETER.captures(trimmed) {
        LineKind::Parameter {
            name:        caps[1].to_string(),
            type_:       caps[2].to_string(),
            description: caps.get(3).map(|m| m.as_str().trim().to_string()).unwrap_or_default(),
        }
    } else if let Some(caps) = SIGNATURE.captures(trimmed) {
        LineKind::Signature {
            name:      caps[1].to_string(),
            arguments: caps[2]
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect(),
        }
    } else if let Some(caps) = LABEL.captures(trimmed) {
        LineKind::Label(caps[1].to_string())
    } else {
        LineKind::Text
    };

    Line {
        kind,
        text:   trimmed.to_string(),
        depth:  tabs + spaces / SPACES_PER_LEVEL,
        line,
        column: indent.chars().count() + 1,
    }
}
