//! Key-value reconciliation of a target locale against the reference locale.
//!
//! Three pure operations over in-memory maps:
//! - [`reconcile`]: hides values that were never translated (still equal to the reference)
//! - [`sync`]: realigns a target key set to exactly the reference key set
//! - [`merge`]: overlays a reconciled map onto a per-locale aggregate

use serde::{
    Deserialize,
    Serialize,
};

use crate::types::TranslationMap;

/// What happens to a target key whose value is still the reference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum EqualValuePolicy {
    /// Keep the key with an empty value, so the translation tool lists it as untranslated.
    Blank,
    /// Omit the key from the output.
    #[default]
    Drop,
}

/// Options of [`reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileOptions {
    pub policy: EqualValuePolicy,
    /// Also apply the policy to keys missing from the reference whose value is the key itself.
    pub prune_self_keyed_extras: bool,
}

impl ReconcileOptions {
    #[must_use]
    pub const fn new(policy: EqualValuePolicy) -> Self {
        Self { policy, prune_self_keyed_extras: false }
    }

    /// Returns true if the target value is an untranslated copy.
    fn is_untranslated(self, reference: &TranslationMap, key: &str, value: &str) -> bool {
        reference.get(key).map_or_else(
            || self.prune_self_keyed_extras && key == value,
            |reference_value| reference_value == value,
        )
    }
}

/// Reconciles `target` against `reference`.
///
/// Walks the target keys in order:
/// - a key whose value equals the reference value is blanked or dropped according to the policy
/// - any other key (different value, or unknown to the reference) is copied unchanged
///
/// Reference keys missing from the target are never added; see [`sync`] for that.
#[must_use]
pub fn reconcile(
    reference: &TranslationMap,
    target: &TranslationMap,
    options: ReconcileOptions,
) -> TranslationMap {
    let mut output = TranslationMap::with_capacity(target.len());

    for (key, value) in target {
        if !options.is_untranslated(reference, key, value) {
            output.insert(key.clone(), value.clone());
            continue;
        }

        match options.policy {
            EqualValuePolicy::Blank => {
                output.insert(key.clone(), String::new());
            }
            EqualValuePolicy::Drop => {}
        }
    }

    output
}

/// Back-fills `target` so that its key set is exactly the reference key set.
///
/// Existing translations are kept, missing keys are seeded with the reference
/// value and keys unknown to the reference are dropped. The output follows the
/// reference order.
#[must_use]
pub fn sync(reference: &TranslationMap, target: &TranslationMap) -> TranslationMap {
    reference
        .iter()
        .map(|(key, reference_value)| {
            let value = target.get(key).unwrap_or(reference_value);
            (key.clone(), value.clone())
        })
        .collect()
}

/// Overlays `reconciled` onto `aggregate` (last write wins).
///
/// Keys already in the aggregate keep their position; new keys are appended.
pub fn merge(aggregate: &mut TranslationMap, reconciled: &TranslationMap) {
    aggregate.extend(reconciled.iter().map(|(key, value)| (key.clone(), value.clone())));
}
