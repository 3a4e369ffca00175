//! Test helpers shared by several test modules.
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use crate::types::TranslationMap;

/// Builds a `TranslationMap` keeping the order of `entries`.
pub(crate) fn translation_map(entries: &[(&str, &str)]) -> TranslationMap {
    entries.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect()
}

/// Writes `<root>/<locale>/<file_name>` with raw `content`, creating the locale directory.
pub(crate) fn write_locale_file(
    root: &Path,
    locale: &str,
    file_name: &str,
    content: &str,
) -> PathBuf {
    let dir = root.join(locale);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(file_name);
    fs::write(&path, content).unwrap();
    path
}

/// Reads a JSON file written by the crate back into a `TranslationMap`.
pub(crate) fn read_map(path: &Path) -> TranslationMap {
    let content = fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}
