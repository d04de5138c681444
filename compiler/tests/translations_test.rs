#![cfg(test)]

use std::fs;
use std::path::Path;

use luagen_compiler::{
    translations::{compile_translations, I18nLayout, TranslationOptions, DEFAULT_TERM_ALIAS},
    GenError,
};

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn seed(root: &Path) -> I18nLayout {
    let layout = I18nLayout::new(root);
    write(
        &layout.languages_path(),
        r#"[
  {"name": "English", "code": "en", "translations": 3, "percentage": 100, "updated": "2024-01-01T00:00:00+0000"},
  {"name": "French", "code": "fr", "translations": 0, "percentage": 0, "updated": null}
]"#,
    );
    write(
        &layout.export_path("en"),
        r#"[
  {"term": "X", "definition": "hi\n\"there\"", "context": "", "term_plural": "", "reference": "", "comment": ""},
  {"term": "Y", "definition": null, "context": "", "term_plural": "", "reference": "", "comment": ""},
  {"term": "Z", "definition": "back\\slash", "context": "", "term_plural": "", "reference": "", "comment": ""}
]"#,
    );
    write(&layout.export_path("fr"), r#"[{"term": "X", "definition": null}]"#);
    write(&layout.terms_path(), r#"[{"term": "A"}, {"term": "B"}]"#);
    layout
}

#[test]
fn test_compile_translations_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let layout = seed(dir.path());

    let compiled = compile_translations(&layout, DEFAULT_TERM_ALIAS, &TranslationOptions::default())
        .expect("compile_translations failed");

    assert_eq!(compiled.language_count, 2);
    assert_eq!(compiled.term_count, 2);
    assert_eq!(
        compiled.translations,
        "local translations = {}\n\n\
translations[\"en\"] = {\n    [\"X\"] = \"hi\\n\\\"there\\\"\",\n    [\"Z\"] = \"back\\\\slash\"\n}\n\n\
translations[\"fr\"] = {\n\n}\n\n\
return translations\n"
    );
    assert!(!compiled.translations.contains("[\"Y\"]"));
    assert_eq!(compiled.term_keys, "--- @alias BtTranslationKeys\n---| '\"A\"'\n---| '\"B\"'");
}

#[test]
fn test_missing_export_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let layout = seed(dir.path());
    fs::remove_file(layout.export_path("fr")).unwrap();

    let err = compile_translations(&layout, DEFAULT_TERM_ALIAS, &TranslationOptions::default()).unwrap_err();
    match err {
        GenError::File { path, .. } => assert_eq!(path, layout.export_path("fr")),
        other => panic!("expected a File error but got {:?}", other),
    }
}

#[test]
fn test_malformed_catalog_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let layout = seed(dir.path());
    fs::write(layout.languages_path(), "[{\"code\": \"en\"").unwrap();

    let err = compile_translations(&layout, DEFAULT_TERM_ALIAS, &TranslationOptions::default()).unwrap_err();
    assert!(matches!(err, GenError::Json { .. }), "got {:?}", err);
}
