use std::path::{Path, PathBuf};

use luagen_compiler::{
    converters::AnnotationNames,
    overrides::{OverrideRule, OverrideTable},
    translations::{TranslationOptions, DEFAULT_TERM_ALIAS},
    utils::read_text,
};
use luagen_poeditor::PoEditorOptions;
use serde::Deserialize;
use tracing::debug;

use crate::error::CliError;

pub const DEFAULT_CONFIG_FILE: &str = "luagen.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub i18n:         I18nConfig,
    pub translations: TranslationsConfig,
    pub events:       EventsConfig,
    pub legacy:       LegacyConfig,
    pub poeditor:     PoEditorOptions,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    pub dir: PathBuf,
}

impl Default for I18nConfig {
    fn default() -> Self {
        I18nConfig { dir: PathBuf::from("i18n") }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TranslationsConfig {
    pub output:          PathBuf,
    pub termkeys_output: PathBuf,
    pub term_alias:      String,
    #[serde(flatten)]
    pub options:         TranslationOptions,
}

impl Default for TranslationsConfig {
    fn default() -> Self {
        TranslationsConfig {
            output:          PathBuf::from("src/translations/translations-gen.lua"),
            termkeys_output: PathBuf::from("src/translations/termkeys-gen.lua"),
            term_alias:      DEFAULT_TERM_ALIAS.to_string(),
            options:         TranslationOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    pub input:             PathBuf,
    pub meta_dir:          PathBuf,
    #[serde(flatten)]
    pub names:             AnnotationNames,
    /// Start from the built-in override rules.
    pub builtin_overrides: bool,
    pub overrides:         Vec<OverrideRule>,
}

impl Default for EventsConfig {
    fn default() -> Self {
        EventsConfig {
            input:             PathBuf::from("generate/luahelp.txt"),
            meta_dir:          PathBuf::from("meta"),
            names:             AnnotationNames::default(),
            builtin_overrides: true,
            overrides:         Vec::new(),
        }
    }
}

impl EventsConfig {
    pub fn override_table(&self) -> OverrideTable {
        let base = if self.builtin_overrides {
            OverrideTable::builtin()
        } else {
            OverrideTable::empty()
        };
        base.with_rules(self.overrides.iter().cloned())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LegacyConfig {
    pub assets_dir: PathBuf,
    pub output:     PathBuf,
    pub base_lang:  String,
}

impl Default for LegacyConfig {
    fn default() -> Self {
        LegacyConfig {
            assets_dir: PathBuf::from("translations-assets"),
            output:     PathBuf::from("src/translations/translations-gen.lua"),
            base_lang:  "en".to_string(),
        }
    }
}

impl Config {
    pub fn parse(text: &str, path: &Path) -> Result<Self, CliError> {
        toml::from_str(text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`, or `luagen.toml` when it exists, or the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Config::default());
                }
                default
            }
        };
        let text = read_text(&path)?;
        debug!(path = %path.display(), "loading config");
        Self::parse(&text, &path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luagen_compiler::overrides::ParamPatch;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("", Path::new("luagen.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.events.names.self_type, "mousebase.TfmEvents");
        assert_eq!(config.poeditor.token_env, "POEDITOR_RO_KEY");
        assert_eq!(config.events.override_table().len(), 2);
    }

    #[test]
    fn test_full_config() {
        let text = r#"
[i18n]
dir = "data/i18n"

[translations]
term_alias = "MyKeys"
collapse_doubled_backslashes = true

[events]
self_type = "my.Events"
events_alias = "my.Events.Names"
builtin_overrides = false

[[events.overrides]]
event = "eventFoo"
patches = [{ param = "x", display_name = "y" }]

[legacy]
base_lang = "fr"

[poeditor]
project_id = "42"
"#;
        let config = Config::parse(text, Path::new("luagen.toml")).unwrap();

        assert_eq!(config.i18n.dir, PathBuf::from("data/i18n"));
        assert_eq!(config.translations.term_alias, "MyKeys");
        assert!(config.translations.options.collapse_doubled_backslashes);
        assert_eq!(config.translations.output, TranslationsConfig::default().output);
        assert_eq!(config.events.names.events_alias, "my.Events.Names");
        assert_eq!(config.legacy.base_lang, "fr");
        assert_eq!(config.poeditor.project_id, "42");
        assert_eq!(config.poeditor.base_url, "https://api.poeditor.com/v2");

        let table = config.events.override_table();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get("eventFoo").unwrap().patches,
            vec![ParamPatch::new("x").rename("y")]
        );
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::parse("[events]\nbuiltin_overrides = \"yes\"", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, CliError::Config { ref path, .. } if path == Path::new("bad.toml")));
    }
}
