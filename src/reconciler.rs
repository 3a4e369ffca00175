//! Run loop over (locale × namespace file) pairs.
//!
//! [`LocaleReconciler::export`] writes cleaned per-locale copies for a
//! translation-management import (and the `all_<locale>.json` aggregates);
//! [`LocaleReconciler::sync`] realigns non-exported namespaces with the
//! reference key set in place.
//!
//! A namespace file missing from a locale is skipped and reported. Malformed
//! files and filesystem errors abort the run.

use std::fs;
use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use crate::config::{
    ExportConfig,
    NamespaceMatcher,
    ReconcilerSettings,
};
use crate::error::ReconcilerError;
use crate::input::layout::{
    discover_locales,
    list_namespace_files,
    top_level_child,
};
use crate::input::translation::{
    LoadedFile,
    TranslationFile,
    load_translation_file,
    read_translation_map,
    write_translation_map,
};
use crate::reconcile::{
    merge,
    reconcile,
    sync,
};
use crate::types::same_entries_in_order;

/// A namespace file that a target locale does not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingLocaleFile {
    pub locale: String,
    pub file_name: String,
}

/// Whether [`LocaleReconciler::sync`] writes its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    #[default]
    Write,
    /// Only report files that are not aligned with the reference.
    Check,
}

/// Summary of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Files written, in write order (aggregates included).
    pub written: Vec<PathBuf>,
    pub missing: Vec<MissingLocaleFile>,
    /// Target files whose key set or order differs from the reference (sync only).
    pub out_of_date: Vec<PathBuf>,
    /// Target files already aligned with the reference (sync only).
    pub unchanged: usize,
}

impl RunReport {
    fn record_missing(&mut self, locale: &str, file_name: &str) {
        tracing::warn!("File '{file_name}' is not present in '{locale}' folder.");
        self.missing.push(MissingLocaleFile {
            locale: locale.to_string(),
            file_name: file_name.to_string(),
        });
    }
}

/// Reconciles target locales against the reference locale.
#[derive(Debug, Clone)]
pub struct LocaleReconciler {
    settings: ReconcilerSettings,
    export_matcher: NamespaceMatcher,
    sync_matcher: NamespaceMatcher,
}

impl LocaleReconciler {
    /// # Errors
    /// Returns an error if the settings are invalid.
    pub fn new(settings: ReconcilerSettings) -> Result<Self, ReconcilerError> {
        settings.validate().map_err(crate::config::ConfigError::ValidationErrors)?;

        let export_matcher = NamespaceMatcher::new(&settings.export.namespaces)?;
        let sync_matcher = NamespaceMatcher::new(&settings.sync.namespaces)?;

        Ok(Self { settings, export_matcher, sync_matcher })
    }

    /// Configured target locales, or every locale directory under the root.
    ///
    /// # Errors
    /// Returns an error if the root directory cannot be listed.
    pub fn target_locales(&self) -> Result<Vec<String>, ReconcilerError> {
        if let Some(locales) = &self.settings.locales {
            return Ok(locales.clone());
        }

        let root = &self.settings.root_directory;
        let output_directory = self.settings.output_directory();
        let output_name = top_level_child(root, &output_directory);
        let mut excluded = vec![self.settings.reference_locale.as_str()];
        if let Some(name) = &output_name {
            excluded.push(name);
        }

        let locales = discover_locales(root, &excluded)?;
        tracing::debug!(?locales, "Discovered target locales");
        Ok(locales)
    }

    /// Reads every reference namespace file accepted by `matcher`.
    fn load_reference_set(
        &self,
        matcher: &NamespaceMatcher,
    ) -> Result<Vec<TranslationFile>, ReconcilerError> {
        let locale = &self.settings.reference_locale;
        let locale_dir = self.settings.locale_directory(locale);

        let mut reference_set = Vec::new();
        for file_name in list_namespace_files(&locale_dir, matcher)? {
            match load_translation_file(locale, &locale_dir, &file_name)? {
                LoadedFile::Present(file) => reference_set.push(file),
                // Removed between listing and reading.
                LoadedFile::Missing => {
                    tracing::warn!(file_name = %file_name, "Reference file disappeared during the run");
                }
            }
        }

        tracing::debug!(files = reference_set.len(), "Loaded reference set");
        Ok(reference_set)
    }

    /// Writes a reconciled copy of every target namespace file to the output directory.
    ///
    /// With `aggregate` enabled, each reconciled file is also merged into the
    /// locale's `all_<locale>.json`, which is persisted after every namespace.
    ///
    /// # Errors
    /// Returns an error on malformed JSON or on any filesystem failure.
    pub fn export(&self) -> Result<RunReport, ReconcilerError> {
        let export = &self.settings.export;
        let output_directory = self.settings.output_directory();
        let locales = self.target_locales()?;
        let reference_set = self.load_reference_set(&self.export_matcher)?;

        fs::create_dir_all(&output_directory)
            .map_err(|e| ReconcilerError::filesystem("create directory", &output_directory, e))?;

        if export.aggregate && export.reset_aggregate {
            for locale in &locales {
                reset_aggregate(&output_directory.join(ExportConfig::aggregate_file_name(locale)))?;
            }
        }

        let mut report = RunReport::default();
        for reference in &reference_set {
            for locale in &locales {
                let locale_dir = self.settings.locale_directory(locale);
                match load_translation_file(locale, &locale_dir, &reference.file_name)? {
                    LoadedFile::Missing => report.record_missing(locale, &reference.file_name),
                    LoadedFile::Present(target) => {
                        self.export_file(reference, &target, &output_directory, &mut report)?;
                    }
                }
            }
        }

        tracing::info!(
            written = report.written.len(),
            missing = report.missing.len(),
            "Export finished"
        );
        Ok(report)
    }

    fn export_file(
        &self,
        reference: &TranslationFile,
        target: &TranslationFile,
        output_directory: &Path,
        report: &mut RunReport,
    ) -> Result<(), ReconcilerError> {
        let export = &self.settings.export;
        let indent = self.settings.indent;

        let reconciled = reconcile(&reference.keys, &target.keys, export.reconcile_options());

        let output_name = export.output_file_name(&target.locale, &target.file_name);
        let output_path = output_directory.join(&output_name);
        write_translation_map(&output_path, &reconciled, indent)?;
        tracing::info!(
            "File '{}' cleaned from {} values and saved as '{output_name}'.",
            target.file_name,
            self.settings.reference_locale
        );
        report.written.push(output_path);

        if export.aggregate {
            let aggregate_name = ExportConfig::aggregate_file_name(&target.locale);
            let aggregate_path = output_directory.join(&aggregate_name);
            let mut aggregate = read_translation_map(&aggregate_path)?.unwrap_or_default();
            merge(&mut aggregate, &reconciled);
            write_translation_map(&aggregate_path, &aggregate, indent)?;
            tracing::info!("File '{aggregate_name}' updated with '{output_name}'.");
            report.written.push(aggregate_path);
        }

        Ok(())
    }

    /// Back-fills every target namespace file so that it has exactly the reference key set.
    ///
    /// Target files are rewritten in place, and only when their content or key
    /// order changes. Missing target files are reported, never created.
    ///
    /// # Errors
    /// Returns an error on malformed JSON or on any filesystem failure.
    pub fn sync(&self, mode: SyncMode) -> Result<RunReport, ReconcilerError> {
        let locales = self.target_locales()?;
        let reference_set = self.load_reference_set(&self.sync_matcher)?;

        let mut report = RunReport::default();
        for reference in &reference_set {
            for locale in &locales {
                let locale_dir = self.settings.locale_directory(locale);
                let target = match load_translation_file(locale, &locale_dir, &reference.file_name)? {
                    LoadedFile::Missing => {
                        report.record_missing(locale, &reference.file_name);
                        continue;
                    }
                    LoadedFile::Present(target) => target,
                };

                let synced = sync(&reference.keys, &target.keys);
                if same_entries_in_order(&synced, &target.keys) {
                    tracing::debug!(locale = %locale, file_name = %target.file_name, "Already in sync");
                    report.unchanged += 1;
                    continue;
                }

                match mode {
                    SyncMode::Check => {
                        tracing::warn!(
                            "File '{}' in '{locale}' folder is not synchronized.",
                            target.file_name
                        );
                        report.out_of_date.push(target.path);
                    }
                    SyncMode::Write => {
                        write_translation_map(&target.path, &synced, self.settings.indent)?;
                        tracing::info!(
                            "File '{}' synchronized with '{locale}' folder.",
                            target.file_name
                        );
                        report.written.push(target.path);
                    }
                }
            }
        }

        tracing::info!(
            written = report.written.len(),
            out_of_date = report.out_of_date.len(),
            unchanged = report.unchanged,
            missing = report.missing.len(),
            "Sync finished"
        );
        Ok(report)
    }
}

/// Removes an aggregate left by a previous run.
fn reset_aggregate(path: &Path) -> Result<(), ReconcilerError> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Removed previous aggregate");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ReconcilerError::filesystem("remove", path, e)),
    }
}
