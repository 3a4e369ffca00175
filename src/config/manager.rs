//! 設定管理を行うモジュール（デフォルト値・設定ファイル・コマンドライン引数）

use std::path::{
    Path,
    PathBuf,
};

use super::{
    CONFIG_FILE_NAME,
    ConfigError,
    ReconcilerSettings,
    loader,
};

/// 1 回の実行で使う検証済みの設定を保持する
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: ReconcilerSettings,

    /// 設定の読み込み元ファイル（存在する場合）
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: ReconcilerSettings::default(), config_path: None }
    }

    /// 設定を読み込む
    ///
    /// # Arguments
    /// * `root` - コマンドラインで指定されたルートディレクトリ（`rootDirectory` より優先）
    /// * `config_file` - 明示的な設定ファイル。`None` の場合は `root`（またはカレントディレクトリ）の
    ///   `.locale-reconciler.json` を探す（なくてもよい）
    ///
    /// # Errors
    /// - 明示的に指定された設定ファイルが存在しない
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(
        &mut self,
        root: Option<PathBuf>,
        config_file: Option<PathBuf>,
    ) -> Result<(), ConfigError> {
        tracing::debug!(?root, ?config_file, "Loading settings");

        let lookup_root = root.clone().unwrap_or_else(|| PathBuf::from("."));
        let (mut settings, config_path) = if let Some(path) = config_file {
            (loader::load_from_file(&path)?, Some(path))
        } else {
            loader::load_from_root(&lookup_root)?.map_or_else(
                || (ReconcilerSettings::default(), None),
                |settings| (settings, Some(lookup_root.join(CONFIG_FILE_NAME))),
            )
        };

        if let Some(root) = root {
            settings.root_directory = root;
        }

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.config_path = config_path;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 設定を更新する（コマンドライン引数の上書き後など）
    pub fn update_settings(&mut self, new_settings: ReconcilerSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &ReconcilerSettings {
        &self.current_settings
    }

    #[must_use]
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// new: デフォルト値で作成される
    #[rstest]
    fn test_new_creates_default_settings() {
        let manager = ConfigManager::new();

        assert_eq!(manager.get_settings().reference_locale, "en");
        assert!(manager.config_path().is_none());
    }

    /// `load_settings`: 設定ファイルがない場合はデフォルト値
    #[rstest]
    fn test_load_settings_without_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()), None);

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().root_directory, temp_dir.path());
        assert_eq!(manager.get_settings().export.output_directory, Path::new("poeditor"));
        assert!(manager.config_path().is_none());
    }

    /// `load_settings`: ルートディレクトリに設定ファイルがある場合
    #[rstest]
    fn test_load_settings_with_config_file_in_root() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"locales": ["de", "es"]}"#)
            .unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()), None);

        assert!(result.is_ok());
        assert_eq!(
            manager.get_settings().locales.as_deref(),
            Some(&["de".to_string(), "es".to_string()][..])
        );
        assert_eq!(manager.get_settings().root_directory, temp_dir.path());
        assert_eq!(manager.config_path(), Some(temp_dir.path().join(CONFIG_FILE_NAME).as_path()));
    }

    /// `load_settings`: 明示的な設定ファイルは自身のルートディレクトリを使う
    #[rstest]
    fn test_load_settings_with_explicit_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("reconciler.json");
        fs::write(&config_path, r#"{"rootDirectory": "translations"}"#).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(None, Some(config_path));

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().root_directory, temp_dir.path().join("translations"));
    }

    /// `load_settings`: 不正な設定はエラー
    #[rstest]
    fn test_load_settings_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"referenceLocale": ""}"#).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()), None);

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
    }

    /// `update_settings`: 有効な設定
    #[rstest]
    fn test_update_settings_valid() {
        let mut manager = ConfigManager::new();
        let mut new_settings = ReconcilerSettings::default();
        new_settings.reference_locale = "en-GB".to_string();

        let result = manager.update_settings(new_settings);

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().reference_locale, "en-GB");
    }

    /// `update_settings`: 不正な設定は拒否され、元の設定が残る
    #[rstest]
    fn test_update_settings_invalid() {
        let mut manager = ConfigManager::new();
        let mut new_settings = ReconcilerSettings::default();
        new_settings.export.file_name_template = "{locale}.json".to_string();

        let result = manager.update_settings(new_settings);

        assert!(result.is_err());
        assert_eq!(manager.get_settings().export.file_name_template, "{locale}_{namespace}");
    }
}
