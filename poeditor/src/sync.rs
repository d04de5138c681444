use std::fs;
use std::path::Path;

use luagen_compiler::{translations::I18nLayout, utils::write_text, GenError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::{client::TranslationSource, error::FetchError};

#[derive(Debug, Clone, PartialEq)]
pub struct SyncSummary {
    pub terms:     usize,
    /// Language codes in upstream order.
    pub languages: Vec<String>,
}

/// The two catalog fields the mirror needs. Everything else is written as fetched.
#[derive(Debug, Deserialize)]
struct LanguageRef {
    code: String,
    name: String,
}

fn language_refs(languages: &[Value]) -> Result<Vec<LanguageRef>, FetchError> {
    languages
        .iter()
        .map(|value| {
            LanguageRef::deserialize(value).map_err(|source| FetchError::Decode {
                endpoint: "/languages/list".to_string(),
                source,
            })
        })
        .collect()
}

fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), FetchError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| FetchError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    write_text(path, &json)?;
    Ok(())
}

/// Fetch terms, languages and every language export, writing each as it
/// arrives. The exports directory is recreated so removed languages vanish.
pub fn sync_to_disk(source: &dyn TranslationSource, layout: &I18nLayout) -> Result<SyncSummary, FetchError> {
    let terms = source.list_terms()?;
    write_pretty(&layout.terms_path(), &terms)?;
    info!(count = terms.len(), "terms fetched");

    let languages = source.list_languages()?;
    let refs = language_refs(&languages)?;
    write_pretty(&layout.languages_path(), &languages)?;
    info!(count = refs.len(), "languages fetched");

    let exports = layout.exports_dir();
    let io_err = |source| GenError::File {
        path: exports.clone(),
        source,
    };
    if exports.exists() {
        fs::remove_dir_all(&exports).map_err(io_err)?;
    }
    fs::create_dir_all(&exports).map_err(io_err)?;

    for language in &refs {
        info!(" - Fetching {} ({})", language.code, language.name);
        let records = source.export_language(&language.code)?;
        write_pretty(&layout.export_path(&language.code), &records)?;
    }

    Ok(SyncSummary {
        terms:     terms.len(),
        languages: refs.into_iter().map(|l| l.code).collect(),
    })
}
