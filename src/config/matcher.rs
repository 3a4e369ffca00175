//! ネームスペースファイル名のマッチャー

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::NamespaceFilterConfig;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid namespace include pattern '{pattern}': {source}")]
    InvalidIncludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid namespace exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// ファイル名でネームスペースファイルを選択する
#[derive(Debug, Clone)]
pub struct NamespaceMatcher {
    include_set: GlobSet,
    exclude_set: GlobSet,
}

impl NamespaceMatcher {
    /// ネームスペースフィルタから新しいマッチャーを作成
    pub fn new(filter: &NamespaceFilterConfig) -> Result<Self, MatcherError> {
        let include_set = Self::build_glob_set(&filter.include_patterns, |pattern, source| {
            MatcherError::InvalidIncludePattern { pattern, source }
        })?;

        let exclude_set = Self::build_glob_set(&filter.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        Ok(Self { include_set, exclude_set })
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// include パターンに一致し、exclude パターンに一致しない場合 true
    #[must_use]
    pub fn is_match(&self, file_name: &str) -> bool {
        self.include_set.is_match(file_name) && !self.exclude_set.is_match(file_name)
    }
}
