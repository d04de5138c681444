use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::info;

use crate::{
    error::GenError,
    translations::{LanguageTable, TranslationSet},
    utils::{escape_lua_string, read_text, write_text},
};

lazy_static! {
    static ref ENTRY_HEAD: Regex = Regex::new(r"^[ \t]*([^\s=\[\]]+)[ \t]*=[ \t]*\[\[((?s:.*?))\]\]").unwrap();
    static ref TRAILER:    Regex = Regex::new(r"^([ \t]*#[ \t]*Needs translation)?[ \t]*(?:\r?\n|$)").unwrap();
}

pub const ASSET_EXTENSION: &str = "txt";
pub const NEEDS_TRANSLATION: &str = "# Needs translation";

#[derive(Debug, Clone, PartialEq)]
pub struct AssetEntry {
    pub key:               String,
    /// Text between the brackets, untrimmed.
    pub value:             String,
    pub needs_translation: bool,
    pub line:              usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Entry(AssetEntry),
    /// Blank or comment line, kept verbatim (without its newline).
    Filler(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetDocument {
    pub segments: Vec<Segment>,
}

impl AssetDocument {
    pub fn entries(&self) -> impl Iterator<Item = &AssetEntry> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Entry(e) => Some(e),
            Segment::Filler(_) => None,
        })
    }

    /// Entries that carry a real translation.
    pub fn translated(&self) -> impl Iterator<Item = &AssetEntry> {
        self.entries().filter(|e| !e.needs_translation)
    }

    pub fn to_table(&self) -> LanguageTable {
        let mut table = LanguageTable::new();
        for entry in self.translated() {
            table.insert(entry.key.clone(), escape_lua_string(entry.value.trim()));
        }
        table
    }
}

fn position(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map(|l| l.chars().count()).unwrap_or(0) + 1;
    (line, column)
}

fn parse_error(text: &str, offset: usize, msg: String) -> GenError {
    let (line, column) = position(text, offset);
    GenError::ParseError { msg, line, column }
}

fn is_filler(line: &str) -> bool {
    let t = line.trim();
    t.is_empty() || t.starts_with('#') || t.starts_with("--")
}

/// Parse an asset file: `key = [[value]]` entries separated by blank or
/// comment lines. Anything else is an error.
pub fn parse_asset(text: &str) -> Result<AssetDocument, GenError> {
    let mut segments = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        let line_end = rest.find('\n').map(|i| i + 1).unwrap_or(rest.len());
        let line = &rest[..line_end];

        if is_filler(line) {
            segments.push(Segment::Filler(line.trim_end_matches(|c: char| c == '\n' || c == '\r').to_string()));
            pos += line_end;
            continue;
        }

        let head = ENTRY_HEAD.captures(rest).ok_or_else(|| {
            parse_error(
                text,
                pos,
                format!("Expected `key = [[value]]` but found {:?}", line.trim_end()),
            )
        })?;
        let head_end = head.get(0).map(|m| m.end()).unwrap_or(0);

        let trailer = TRAILER.captures(&rest[head_end..]).ok_or_else(|| {
            parse_error(text, pos + head_end, format!("Unexpected text after entry {:?}", &head[1]))
        })?;
        let trailer_end = trailer.get(0).map(|m| m.end()).unwrap_or(0);

        segments.push(Segment::Entry(AssetEntry {
            key:               head[1].to_string(),
            value:             head[2].to_string(),
            needs_translation: trailer.get(1).is_some(),
            line:              position(text, pos).0,
        }));
        pos += head_end + trailer_end;
    }

    Ok(AssetDocument { segments })
}

/// Asset files in `dir`, sorted by name, paired with their language code.
pub fn list_assets(dir: &Path) -> Result<Vec<(String, PathBuf)>, GenError> {
    let read_dir = fs::read_dir(dir).map_err(|source| GenError::File {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut assets = Vec::new();
    for entry in read_dir {
        let path = entry?.path();
        if path.extension().map(|e| e == ASSET_EXTENSION).unwrap_or(false) {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                assets.push((stem.to_string(), path.clone()));
            }
        }
    }
    assets.sort();
    Ok(assets)
}

pub fn read_assets(dir: &Path) -> Result<Vec<(String, AssetDocument)>, GenError> {
    list_assets(dir)?
        .into_iter()
        .map(|(code, path)| -> Result<(String, AssetDocument), GenError> {
            info!("{}", path.display());
            let text = read_text(&path)?;
            let doc = parse_asset(&text).map_err(|e| match e {
                GenError::ParseError { msg, line, column } => GenError::ParseError {
                    msg: format!("{}: {}", path.display(), msg),
                    line,
                    column,
                },
                other => other,
            })?;
            Ok((code, doc))
        })
        .collect()
}

/// Read every asset file into a set ready for `render_translations`.
pub fn read_legacy_set(dir: &Path) -> Result<TranslationSet, GenError> {
    let mut set = TranslationSet::default();
    for (code, doc) in read_assets(dir)? {
        set.push(code, doc.to_table());
    }
    Ok(set)
}

/// Rewrite `target` in the layout of `base`. Keys missing from `target`
/// take the base text and are marked as needing translation.
pub fn resync(base: &AssetDocument, target: &AssetDocument) -> String {
    let translated: HashMap<&str, &str> = target
        .translated()
        .map(|e| (e.key.as_str(), e.value.as_str()))
        .collect();

    let mut out = String::new();
    for segment in &base.segments {
        match segment {
            Segment::Filler(line) => out.push_str(line),
            Segment::Entry(entry) => match translated.get(entry.key.as_str()) {
                Some(value) => out.push_str(&format!("{} = [[{}]]", entry.key, value)),
                None => out.push_str(&format!("{} = [[{}]] {}", entry.key, entry.value, NEEDS_TRANSLATION)),
            },
        }
        out.push('\n');
    }
    out
}

/// Resync every non-base asset in `dir` against `base_lang`. All files are
/// read before any is rewritten.
pub fn resync_assets(dir: &Path, base_lang: &str) -> Result<Vec<PathBuf>, GenError> {
    let assets = read_assets(dir)?;
    let base = assets
        .iter()
        .find(|(code, _)| code == base_lang)
        .map(|(_, doc)| doc)
        .ok_or_else(|| GenError::File {
            path:   dir.join(format!("{}.{}", base_lang, ASSET_EXTENSION)),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "base language asset not found"),
        })?;

    let mut written = Vec::new();
    for (code, doc) in assets.iter().filter(|(code, _)| code != base_lang) {
        let path = dir.join(format!("{}.{}", code, ASSET_EXTENSION));
        write_text(&path, &resync(base, doc))?;
        info!(lang = %code, "resynced");
        written.push(path);
    }
    Ok(written)
}
