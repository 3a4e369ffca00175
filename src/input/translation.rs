//! Translation file input and output.

use std::fs;
use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::ReconcilerError;
use crate::types::TranslationMap;

/// One namespace file of one locale, e.g. `de/common.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFile {
    pub locale: String,

    /// Namespace file name, identical across locales (e.g., "common.json").
    pub file_name: String,

    pub path: PathBuf,

    /// Flat key map in file order.
    pub keys: TranslationMap,
}

/// Result of looking up a namespace file for a locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedFile {
    /// The file exists and holds a flat string map.
    Present(TranslationFile),
    /// The locale has no such file yet.
    Missing,
}

/// Loads `<locale_dir>/<file_name>`.
///
/// A file that does not exist is not an error; it is reported as [`LoadedFile::Missing`].
///
/// # Errors
/// - [`ReconcilerError::MalformedJson`] if the content is not a flat JSON object of strings
/// - [`ReconcilerError::Filesystem`] if the file exists but cannot be read
pub fn load_translation_file(
    locale: &str,
    locale_dir: &Path,
    file_name: &str,
) -> Result<LoadedFile, ReconcilerError> {
    let path = locale_dir.join(file_name);

    let Some(keys) = read_translation_map(&path)? else {
        tracing::debug!(locale, file_name, "Translation file not found");
        return Ok(LoadedFile::Missing);
    };

    tracing::debug!(locale, file_name, keys = keys.len(), "Loaded translation file");

    Ok(LoadedFile::Present(TranslationFile {
        locale: locale.to_string(),
        file_name: file_name.to_string(),
        path,
        keys,
    }))
}

/// Reads a flat translation map, or `None` if the file does not exist.
///
/// # Errors
/// - [`ReconcilerError::MalformedJson`] if the content is not a flat JSON object of strings
/// - [`ReconcilerError::Filesystem`] if the file exists but cannot be read
pub fn read_translation_map(path: &Path) -> Result<Option<TranslationMap>, ReconcilerError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ReconcilerError::filesystem("read", path, e)),
    };

    parse_translation_map(&content)
        .map(Some)
        .map_err(|source| ReconcilerError::MalformedJson { path: path.to_path_buf(), source })
}

/// Parses a flat `{"key": "value"}` object.
///
/// Nested objects, arrays and non-string values are rejected.
pub fn parse_translation_map(content: &str) -> Result<TranslationMap, serde_json::Error> {
    serde_json::from_str(content)
}

/// Serializes a map as pretty-printed JSON with `indent` spaces.
///
/// Non-ASCII characters are written as-is.
pub fn render_translation_map(
    keys: &TranslationMap,
    indent: usize,
) -> Result<Vec<u8>, serde_json::Error> {
    let indent = " ".repeat(indent);
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(
        &mut buffer,
        PrettyFormatter::with_indent(indent.as_bytes()),
    );
    keys.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Writes a map to `path`, replacing any existing file.
///
/// # Errors
/// - [`ReconcilerError::Encode`] if serialization fails
/// - [`ReconcilerError::Filesystem`] if the file cannot be written
pub fn write_translation_map(
    path: &Path,
    keys: &TranslationMap,
    indent: usize,
) -> Result<(), ReconcilerError> {
    let content = render_translation_map(keys, indent)
        .map_err(|source| ReconcilerError::Encode { path: path.to_path_buf(), source })?;

    fs::write(path, content).map_err(|e| ReconcilerError::filesystem("write", path, e))
}
