use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::GenError,
    utils::{collapse_doubled_backslashes, escape_lua_string, lua_string, read_json},
};

const INDENT: &str = "    ";

pub const DEFAULT_TERM_ALIAS: &str = "BtTranslationKeys";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub code:         String,
    pub name:         String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage:   Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated:      Option<String>,
}

/// One row of a per-language export. `definition` is `None` when untranslated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRecord {
    pub term:        String,
    pub definition:  Option<String>,
    #[serde(default)]
    pub context:     String,
    #[serde(default)]
    pub term_plural: String,
    #[serde(default)]
    pub reference:   String,
    #[serde(default)]
    pub comment:     String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TermEntry {
    pub term: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TranslationOptions {
    /// Undo the exporter's doubling of backslashes before escaping.
    pub collapse_doubled_backslashes: bool,
}

/// Where the mirrored upstream data lives on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct I18nLayout {
    pub root: PathBuf,
}

impl I18nLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        I18nLayout { root: root.into() }
    }

    pub fn languages_path(&self) -> PathBuf {
        self.root.join("languages.json")
    }

    pub fn terms_path(&self) -> PathBuf {
        self.root.join("terms.json")
    }

    pub fn exports_dir(&self) -> PathBuf {
        self.root.join("exports")
    }

    pub fn export_path(&self, code: &str) -> PathBuf {
        self.exports_dir().join(format!("{}.json", code))
    }
}

/// Term to escaped string, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageTable {
    entries: Vec<(String, String)>,
    index:   HashMap<String, usize>,
}

impl LanguageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an already escaped value. A repeated term keeps its first position.
    pub fn insert(&mut self, term: String, escaped: String) {
        match self.index.get(&term) {
            Some(&i) => self.entries[i].1 = escaped,
            None => {
                self.index.insert(term.clone(), self.entries.len());
                self.entries.push((term, escaped));
            }
        }
    }

    pub fn get(&self, term: &str) -> Option<&str> {
        self.index.get(term).map(|&i| self.entries[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Languages in catalog order, each with its table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationSet {
    pub languages: Vec<(String, LanguageTable)>,
}

impl TranslationSet {
    pub fn push(&mut self, code: String, table: LanguageTable) {
        self.languages.push((code, table));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTranslations {
    pub translations:   String,
    pub term_keys:      String,
    pub language_count: usize,
    pub term_count:     usize,
}

pub fn build_language_table(records: &[TranslationRecord], options: &TranslationOptions) -> LanguageTable {
    let mut table = LanguageTable::new();
    for record in records {
        let Some(definition) = &record.definition else {
            continue;
        };
        let escaped = if options.collapse_doubled_backslashes {
            escape_lua_string(&collapse_doubled_backslashes(definition))
        } else {
            escape_lua_string(definition)
        };
        table.insert(record.term.clone(), escaped);
    }
    table
}

pub fn read_languages(layout: &I18nLayout) -> Result<Vec<Language>, GenError> {
    read_json(&layout.languages_path())
}

/// Read the catalog and every language export, in catalog order.
pub fn read_translation_set(layout: &I18nLayout, options: &TranslationOptions) -> Result<TranslationSet, GenError> {
    let mut set = TranslationSet::default();
    for language in read_languages(layout)? {
        info!(" - Reading {} ({})", language.code, language.name);
        let records: Vec<TranslationRecord> = read_json(&layout.export_path(&language.code))?;
        let table = build_language_table(&records, options);
        debug!(
            code = %language.code,
            records = records.len(),
            translated = table.len(),
            "language read"
        );
        set.push(language.code, table);
    }
    Ok(set)
}

pub fn read_term_registry(layout: &I18nLayout) -> Result<Vec<TermEntry>, GenError> {
    read_json(&layout.terms_path())
}

/// Render the `translations` table literal.
pub fn render_translations(set: &TranslationSet) -> String {
    let chunks: Vec<String> = set
        .languages
        .iter()
        .map(|(code, table)| {
            let body = if table.is_empty() {
                String::new()
            } else {
                let entries: Vec<String> = table
                    .iter()
                    .map(|(term, value)| format!("[{}] = \"{}\"", lua_string(term), value))
                    .collect();
                format!("{}{}", INDENT, entries.join(&format!(",\n{}", INDENT)))
            };
            format!("translations[{}] = {{\n{}\n}}", lua_string(code), body)
        })
        .collect();

    let mut output = String::from("local translations = {}\n\n");
    output.push_str(&chunks.join("\n\n"));
    output.push_str("\n\nreturn translations\n");
    output
}

/// Render the closed set of term keys as a LuaDoc alias. Terms are written
/// verbatim inside `'"…"'`, so one holding a quote or line break is rejected.
pub fn render_term_keys(alias: &str, terms: &[TermEntry]) -> Result<String, GenError> {
    let mut lines = vec![format!("--- @alias {}", alias)];
    for entry in terms {
        if entry.term.contains(|c: char| matches!(c, '\'' | '"' | '\n' | '\r')) {
            return Err(GenError::InvalidTermKey(entry.term.clone()));
        }
        lines.push(format!("---| '\"{}\"'", entry.term));
    }
    Ok(lines.join("\n"))
}

/// Read everything under `layout`, then render both generated files.
pub fn compile_translations(
    layout: &I18nLayout,
    alias: &str,
    options: &TranslationOptions,
) -> Result<CompiledTranslations, GenError> {
    let set = read_translation_set(layout, options)?;
    let terms = read_term_registry(layout)?;
    let term_keys = render_term_keys(alias, &terms)?;

    Ok(CompiledTranslations {
        translations:   render_translations(&set),
        term_keys,
        language_count: set.languages.len(),
        term_count:     terms.len(),
    })
}

/// Convenience for tests and callers holding records in memory.
pub fn translation_set_from_records<'a, I>(languages: I, options: &TranslationOptions) -> TranslationSet
where
    I: IntoIterator<Item = (&'a str, &'a [TranslationRecord])>,
{
    let mut set = TranslationSet::default();
    for (code, records) in languages {
        set.push(code.to_string(), build_language_table(records, options));
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::lua_literal::unescape;

    fn record(term: &str, definition: Option<&str>) -> TranslationRecord {
        TranslationRecord {
            term:        term.into(),
            definition:  definition.map(str::to_string),
            context:     String::new(),
            term_plural: String::new(),
            reference:   String::new(),
            comment:     String::new(),
        }
    }

    #[test]
    fn test_render_escaped_definition() {
        let records = vec![record("X", Some("hi\n\"there\""))];
        let set = translation_set_from_records([("en", records.as_slice())], &TranslationOptions::default());
        let out = render_translations(&set);

        assert_eq!(
            out,
            "local translations = {}\n\ntranslations[\"en\"] = {\n    [\"X\"] = \"hi\\n\\\"there\\\"\"\n}\n\nreturn translations\n"
        );
    }

    #[test]
    fn test_null_definitions_are_dropped() {
        let records = vec![record("A", Some("a")), record("B", None), record("C", Some("c"))];
        let table = build_language_table(&records, &TranslationOptions::default());

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("B"), None);
        let terms: Vec<&str> = table.iter().map(|(t, _)| t).collect();
        assert_eq!(terms, vec!["A", "C"]);
    }

    #[test]
    fn test_empty_language_block() {
        let en = vec![record("A", Some("a")), record("B", Some("b"))];
        let fr = vec![record("A", None)];
        let set = translation_set_from_records(
            [("en", en.as_slice()), ("fr", fr.as_slice())],
            &TranslationOptions::default(),
        );
        let out = render_translations(&set);

        assert!(out.contains("translations[\"en\"] = {\n    [\"A\"] = \"a\",\n    [\"B\"] = \"b\"\n}"));
        assert!(out.contains("translations[\"fr\"] = {\n\n}"));
        assert!(!out.contains(",\n}"));
        assert!(out.ends_with("}\n\nreturn translations\n"));
    }

    #[test]
    fn test_repeated_term_keeps_position() {
        let records = vec![record("A", Some("1")), record("B", Some("2")), record("A", Some("3"))];
        let table = build_language_table(&records, &TranslationOptions::default());
        let pairs: Vec<(&str, &str)> = table.iter().collect();
        assert_eq!(pairs, vec![("A", "3"), ("B", "2")]);
    }

    #[test]
    fn test_collapse_option() {
        let records = vec![record("P", Some("C:\\\\dir"))];
        let plain = build_language_table(&records, &TranslationOptions::default());
        let collapsed = build_language_table(&records, &TranslationOptions { collapse_doubled_backslashes: true });

        assert_eq!(unescape(plain.get("P").unwrap()), "C:\\\\dir");
        assert_eq!(unescape(collapsed.get("P").unwrap()), "C:\\dir");
    }

    #[test]
    fn test_render_term_keys() {
        let terms = vec![TermEntry { term: "A".into() }, TermEntry { term: "B".into() }];
        assert_eq!(
            render_term_keys(DEFAULT_TERM_ALIAS, &terms).unwrap(),
            "--- @alias BtTranslationKeys\n---| '\"A\"'\n---| '\"B\"'"
        );
    }

    #[test]
    fn test_term_key_with_quote_is_rejected() {
        for bad in ["it's", "say \"hi\"", "two\nlines"] {
            let terms = vec![TermEntry { term: "A".into() }, TermEntry { term: bad.into() }];
            let err = render_term_keys(DEFAULT_TERM_ALIAS, &terms).unwrap_err();
            assert!(matches!(err, GenError::InvalidTermKey(ref t) if t == bad));
        }
    }

    #[test]
    fn test_keys_are_escaped_in_table() {
        let records = vec![record("say \"hi\"", Some("x"))];
        let set = translation_set_from_records([("en", records.as_slice())], &TranslationOptions::default());
        assert!(render_translations(&set).contains("[\"say \\\"hi\\\"\"] = \"x\""));
    }

    #[test]
    fn test_layout_paths() {
        let layout = I18nLayout::new("i18n");
        assert_eq!(layout.languages_path(), PathBuf::from("i18n/languages.json"));
        assert_eq!(layout.export_path("pt-br"), PathBuf::from("i18n/exports/pt-br.json"));
        assert_eq!(layout.terms_path(), PathBuf::from("i18n/terms.json"));
    }

    #[test]
    fn test_record_extra_fields_optional() {
        let json = r#"[{"term": "A", "definition": null}, {"term": "B", "definition": "b", "context": "", "comment": "x"}]"#;
        let records: Vec<TranslationRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].definition, None);
        assert_eq!(records[1].comment, "x");
    }
}
