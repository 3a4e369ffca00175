//! End-to-end export over a translations directory on disk.

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use locale_reconciler::config::{
    CONFIG_FILE_NAME,
    ConfigManager,
    ReconcilerSettings,
};
use locale_reconciler::{
    EqualValuePolicy,
    LocaleReconciler,
    MissingLocaleFile,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

fn create_translations() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "en/translation.json", r#"{"greeting": "Hello", "farewell": "Goodbye", "ok": "OK"}"#);
    write(root, "en/errors.json", r#"{"not_found": "Not found"}"#);
    write(
        root,
        "ja/translation.json",
        r#"{"greeting": "こんにちは", "farewell": "Goodbye", "ok": "OK", "legacy": "古い"}"#,
    );
    write(root, "ja/errors.json", r#"{"not_found": "見つかりません"}"#);
    write(root, "pl/translation.json", r#"{"greeting": "Hello", "ok": "OK"}"#);
    temp_dir
}

fn settings_for(root: &Path) -> ReconcilerSettings {
    ReconcilerSettings { root_directory: root.to_path_buf(), ..ReconcilerSettings::default() }
}

#[test]
fn test_export_writes_exact_output_format() {
    let translations = create_translations();
    let root = translations.path();

    LocaleReconciler::new(settings_for(root)).unwrap().export().unwrap();

    assert_eq!(
        read(root, "poeditor/ja_translation.json"),
        "{\n    \"greeting\": \"こんにちは\",\n    \"legacy\": \"古い\"\n}"
    );
    assert_eq!(read(root, "poeditor/pl_translation.json"), "{}");
    assert_eq!(
        read(root, "poeditor/all_ja.json"),
        "{\n    \"not_found\": \"見つかりません\",\n    \"greeting\": \"こんにちは\",\n    \"legacy\": \"古い\"\n}"
    );
}

#[test]
fn test_export_blank_policy_keeps_reference_key_set() {
    let translations = create_translations();
    let root = translations.path();
    let mut settings = settings_for(root);
    settings.export.policy = EqualValuePolicy::Blank;
    settings.export.aggregate = false;

    LocaleReconciler::new(settings).unwrap().export().unwrap();

    assert_eq!(
        read(root, "poeditor/pl_translation.json"),
        "{\n    \"greeting\": \"\",\n    \"ok\": \"\"\n}"
    );
    assert!(!root.join("poeditor/all_pl.json").exists());
}

#[test]
fn test_export_reports_missing_namespace() {
    let translations = create_translations();
    let root = translations.path();

    let report = LocaleReconciler::new(settings_for(root)).unwrap().export().unwrap();

    assert_eq!(
        report.missing,
        vec![MissingLocaleFile { locale: "pl".to_string(), file_name: "errors.json".to_string() }]
    );
    assert!(!root.join("poeditor/pl_errors.json").exists());
}

#[test]
fn test_export_leaves_sources_untouched() {
    let translations = create_translations();
    let root = translations.path();
    let before = read(root, "ja/translation.json");

    LocaleReconciler::new(settings_for(root)).unwrap().export().unwrap();

    assert_eq!(read(root, "ja/translation.json"), before);
}

#[test]
fn test_export_second_run_is_stable() {
    let translations = create_translations();
    let root = translations.path();
    let reconciler = LocaleReconciler::new(settings_for(root)).unwrap();

    reconciler.export().unwrap();
    let first = read(root, "poeditor/all_ja.json");
    reconciler.export().unwrap();

    assert_eq!(read(root, "poeditor/all_ja.json"), first);
}

#[test]
fn test_export_with_config_file() {
    let translations = create_translations();
    let root = translations.path();
    write(
        root,
        CONFIG_FILE_NAME,
        r#"{
            "locales": ["ja"],
            "indent": 2,
            "export": {
                "outputDirectory": "import",
                "fileNameTemplate": "{namespace}-{locale}",
                "aggregate": false,
                "namespaces": { "includePatterns": ["translation.json"] }
            }
        }"#,
    );
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(root.to_path_buf()), None).unwrap();

    let report =
        LocaleReconciler::new(config_manager.get_settings().clone()).unwrap().export().unwrap();

    assert_eq!(report.written, vec![PathBuf::from(root).join("import/translation.json-ja")]);
    assert_eq!(
        read(root, "import/translation.json-ja"),
        "{\n  \"greeting\": \"こんにちは\",\n  \"legacy\": \"古い\"\n}"
    );
}
