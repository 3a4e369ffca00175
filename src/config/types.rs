use std::collections::HashSet;
use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::input::layout::top_level_child;
use crate::reconcile::{
    EqualValuePolicy,
    ReconcileOptions,
};

/// Placeholder replaced by the locale code in `fileNameTemplate`.
const LOCALE_PLACEHOLDER: &str = "{locale}";
/// Placeholder replaced by the full namespace file name (e.g. `common.json`) in `fileNameTemplate`.
const NAMESPACE_PLACEHOLDER: &str = "{namespace}";
/// Largest accepted `indent`.
const MAX_INDENT: usize = 16;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "export.namespaces.includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReconcilerSettings {
    /// Directory holding one subdirectory per locale.
    /// Relative paths in a config file are resolved against the file's directory.
    pub root_directory: PathBuf,

    /// Source-of-truth locale every other locale is compared with.
    pub reference_locale: String,

    /// Target locales.
    ///
    /// - `None`: every subdirectory of the root except the reference (default)
    /// - `Some([...])`: only the listed locales, in this order
    pub locales: Option<Vec<String>>,

    /// Indent width of written JSON files.
    pub indent: usize,

    pub export: ExportConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamespaceFilterConfig {
    /// Glob patterns matched against namespace file names.
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    pub namespaces: NamespaceFilterConfig,
    pub policy: EqualValuePolicy,

    /// Relative paths are resolved against `rootDirectory`.
    pub output_directory: PathBuf,

    /// Output file name, e.g. `{locale}_{namespace}` -> `de_common.json`.
    pub file_name_template: String,

    /// Merge every reconciled namespace into `all_<locale>.json`.
    pub aggregate: bool,

    /// Remove an existing aggregate before the first namespace of the run.
    pub reset_aggregate: bool,

    /// Treat target-only keys whose value is the key itself as untranslated.
    pub prune_self_keyed_extras: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncConfig {
    pub namespaces: NamespaceFilterConfig,
}

impl ReconcilerSettings {
    #[must_use]
    pub fn locale_directory(&self, locale: &str) -> PathBuf {
        self.root_directory.join(locale)
    }

    #[must_use]
    pub fn output_directory(&self) -> PathBuf {
        self.root_directory.join(&self.export.output_directory)
    }

    /// Resolves a relative `rootDirectory` against `base`.
    pub(crate) fn resolve_root(&mut self, base: &Path) {
        if self.root_directory.is_relative() {
            self.root_directory = base.join(&self.root_directory);
        }
    }

    /// # Errors
    /// - Required field is empty
    /// - Invalid or duplicated locale
    /// - Invalid glob pattern
    /// - Invalid file name template
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.reference_locale.is_empty() {
            errors.push(ValidationError::new(
                "referenceLocale",
                "The reference locale cannot be empty. Example: \"en\"",
            ));
        } else if !is_plain_name(&self.reference_locale) {
            errors.push(ValidationError::new(
                "referenceLocale",
                format!(
                    "'{}' is not a directory name. Path separators are not allowed",
                    self.reference_locale
                ),
            ));
        }

        if let Some(locales) = &self.locales {
            validate_locales(locales, &self.reference_locale, &mut errors);
        }

        validate_namespace_filter(&self.export.namespaces, "export.namespaces", &mut errors);
        validate_namespace_filter(&self.sync.namespaces, "sync.namespaces", &mut errors);

        let template = &self.export.file_name_template;
        if !template.contains(LOCALE_PLACEHOLDER) || !template.contains(NAMESPACE_PLACEHOLDER) {
            errors.push(ValidationError::new(
                "export.fileNameTemplate",
                format!(
                    "The template must contain both {LOCALE_PLACEHOLDER} and {NAMESPACE_PLACEHOLDER}. Example: \"{{locale}}_{{namespace}}\""
                ),
            ));
        } else if template.contains(['/', '\\']) {
            errors.push(ValidationError::new(
                "export.fileNameTemplate",
                "The template must produce a file name. Path separators are not allowed",
            ));
        }

        if self.indent > MAX_INDENT {
            errors.push(ValidationError::new(
                "indent",
                format!("The indent must be between 0 and {MAX_INDENT}, got {}", self.indent),
            ));
        }

        self.validate_output_directory(&mut errors);

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// The output directory must not live inside a locale directory, or its files
    /// would be read back as namespaces on the next run.
    fn validate_output_directory(&self, errors: &mut Vec<ValidationError>) {
        let Some(child) = top_level_child(&self.root_directory, &self.output_directory()) else {
            return;
        };

        let is_reference = child == self.reference_locale;
        let is_target = self.locales.as_ref().is_some_and(|locales| locales.contains(&child));
        if is_reference || is_target {
            errors.push(ValidationError::new(
                "export.outputDirectory",
                format!(
                    "'{}' is inside the '{child}' locale directory. Choose a directory outside every locale",
                    self.export.output_directory.display()
                ),
            ));
        }
    }
}

impl ExportConfig {
    /// Renders the output file name of one (locale, namespace file) pair.
    #[must_use]
    pub fn output_file_name(&self, locale: &str, namespace_file: &str) -> String {
        self.file_name_template
            .replace(LOCALE_PLACEHOLDER, locale)
            .replace(NAMESPACE_PLACEHOLDER, namespace_file)
    }

    #[must_use]
    pub fn aggregate_file_name(locale: &str) -> String {
        format!("all_{locale}.json")
    }

    #[must_use]
    pub const fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions {
            policy: self.policy,
            prune_self_keyed_extras: self.prune_self_keyed_extras,
        }
    }
}

/// Returns true if `name` is a single, non-special path component.
fn is_plain_name(name: &str) -> bool {
    !name.contains(['/', '\\']) && name != "." && name != ".."
}

fn validate_locales(locales: &[String], reference: &str, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for (index, locale) in locales.iter().enumerate() {
        let field_path = format!("locales[{index}]");
        if locale.is_empty() {
            errors.push(ValidationError::new(field_path, "The locale cannot be empty"));
        } else if !is_plain_name(locale) {
            errors.push(ValidationError::new(
                field_path,
                format!("'{locale}' is not a directory name. Path separators are not allowed"),
            ));
        } else if locale == reference {
            errors.push(ValidationError::new(
                field_path,
                format!("'{locale}' is the reference locale and cannot be a target"),
            ));
        } else if !seen.insert(locale.as_str()) {
            errors.push(ValidationError::new(
                field_path,
                format!("'{locale}' is listed more than once"),
            ));
        }
    }
}

fn validate_namespace_filter(
    filter: &NamespaceFilterConfig,
    field_prefix: &str,
    errors: &mut Vec<ValidationError>,
) {
    if filter.include_patterns.is_empty() {
        errors.push(ValidationError::new(
            format!("{field_prefix}.includePatterns"),
            "At least one pattern is required. Example: [\"*.json\"]",
        ));
    }

    for (index, pattern) in filter.include_patterns.iter().enumerate() {
        if let Err(e) = globset::Glob::new(pattern) {
            errors.push(ValidationError::new(
                format!("{field_prefix}.includePatterns[{index}]"),
                format!("Invalid glob pattern '{pattern}': {e}"),
            ));
        }
    }

    for (index, pattern) in filter.exclude_patterns.iter().enumerate() {
        if let Err(e) = globset::Glob::new(pattern) {
            errors.push(ValidationError::new(
                format!("{field_prefix}.excludePatterns[{index}]"),
                format!("Invalid glob pattern '{pattern}': {e}"),
            ));
        }
    }
}

impl Default for NamespaceFilterConfig {
    fn default() -> Self {
        Self { include_patterns: vec!["*.json".to_string()], exclude_patterns: vec![] }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            namespaces: NamespaceFilterConfig::default(),
            policy: EqualValuePolicy::default(),
            output_directory: PathBuf::from("poeditor"),
            file_name_template: "{locale}_{namespace}".to_string(),
            aggregate: true,
            reset_aggregate: false,
            prune_self_keyed_extras: false,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            namespaces: NamespaceFilterConfig {
                include_patterns: vec!["*.json".to_string()],
                // Handled by export instead.
                exclude_patterns: vec!["*translation.json".to_string()],
            },
        }
    }
}

impl Default for ReconcilerSettings {
    fn default() -> Self {
        Self {
            root_directory: PathBuf::from("."),
            reference_locale: "en".to_string(),
            locales: None,
            indent: 4,
            export: ExportConfig::default(),
            sync: SyncConfig::default(),
        }
    }
}
