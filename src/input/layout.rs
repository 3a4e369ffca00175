//! Directory layout of a translations root: `<root>/<locale>/<namespace>.json`.

use std::path::{
    Component,
    Path,
    PathBuf,
};

use ignore::{
    DirEntry,
    WalkBuilder,
};

use crate::config::NamespaceMatcher;
use crate::error::ReconcilerError;

/// Lists the direct children of `dir`, sorted by name.
fn read_children(dir: &Path) -> Result<Vec<DirEntry>, ReconcilerError> {
    if !dir.is_dir() {
        return Err(ReconcilerError::filesystem(
            "read directory",
            dir,
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        ));
    }

    let mut children = Vec::new();
    for result in WalkBuilder::new(dir)
        .standard_filters(false)
        .hidden(true)
        .follow_links(true)
        .max_depth(Some(1))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
    {
        let entry =
            result.map_err(|source| ReconcilerError::Walk { path: dir.to_path_buf(), source })?;

        // depth 0 is `dir` itself
        if entry.depth() == 0 {
            continue;
        }

        children.push(entry);
    }

    Ok(children)
}

/// Namespace file names of a locale directory that pass `matcher`, sorted by name.
///
/// # Errors
/// Returns an error if the directory does not exist or cannot be read.
pub fn list_namespace_files(
    locale_dir: &Path,
    matcher: &NamespaceMatcher,
) -> Result<Vec<String>, ReconcilerError> {
    let files = read_children(locale_dir)?
        .into_iter()
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter_map(|entry| {
            let Some(file_name) = entry.file_name().to_str() else {
                tracing::warn!(path = %entry.path().display(), "Skipping non UTF-8 file name");
                return None;
            };
            matcher.is_match(file_name).then(|| file_name.to_string())
        })
        .collect();

    Ok(files)
}

/// Locale directories under `root`, sorted by name.
///
/// Every subdirectory is a locale except the names in `excluded`
/// (the reference locale and the output directory).
///
/// # Errors
/// Returns an error if the root directory does not exist or cannot be read.
pub fn discover_locales(root: &Path, excluded: &[&str]) -> Result<Vec<String>, ReconcilerError> {
    let locales = read_children(root)?
        .into_iter()
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_dir()))
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| !excluded.contains(&name.as_str()))
        .collect();

    Ok(locales)
}

/// Drops `.` components so that `./i18n` and `i18n` compare equal.
fn without_cur_dir(path: &Path) -> PathBuf {
    path.components().filter(|c| !matches!(c, Component::CurDir)).collect()
}

/// Name of the direct child of `root` that contains (or is) `dir`.
///
/// Used to keep the output directory out of locale discovery.
#[must_use]
pub fn top_level_child(root: &Path, dir: &Path) -> Option<String> {
    let dir = without_cur_dir(dir);
    let relative = dir.strip_prefix(without_cur_dir(root)).ok()?;
    match relative.components().next()? {
        Component::Normal(name) => name.to_str().map(str::to_string),
        _ => None,
    }
}
