//! locale-reconciler
//!
//! Reconciles localization JSON files of translated locales against a
//! reference locale, for import into a translation-management tool.

pub mod config;
pub mod error;
pub mod input;
pub mod reconcile;
pub mod reconciler;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use error::ReconcilerError;
pub use reconcile::{
    EqualValuePolicy,
    ReconcileOptions,
};
pub use reconciler::{
    LocaleReconciler,
    MissingLocaleFile,
    RunReport,
    SyncMode,
};
