//! Reconciler configuration: `.locale-reconciler.json` loading, validation and namespace filters.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Namespace file name matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use matcher::{
    MatcherError,
    NamespaceMatcher,
};
pub use types::{
    ConfigError,
    ExportConfig,
    NamespaceFilterConfig,
    ReconcilerSettings,
    SyncConfig,
    ValidationError,
};
