//! 設定ファイルの読み込み

use std::path::Path;

use super::{
    ConfigError,
    ReconcilerSettings,
};

/// ルートディレクトリで探す設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".locale-reconciler.json";

/// ルートディレクトリから設定を読み込む
///
/// `root` 直下の `.locale-reconciler.json` を探す。
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかりパース成功
/// - `Ok(None)`: 設定ファイルが存在しない
/// - `Err(ConfigError)`: 読み込みエラーまたはパースエラー
pub(super) fn load_from_root(root: &Path) -> Result<Option<ReconcilerSettings>, ConfigError> {
    let config_path = root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    load_from_file(&config_path).map(Some)
}

/// 明示的に指定された設定ファイルから読み込む
///
/// 相対パスの `rootDirectory` は設定ファイルのディレクトリを基準に解決する。
pub(super) fn load_from_file(config_path: &Path) -> Result<ReconcilerSettings, ConfigError> {
    if !config_path.is_file() {
        return Err(ConfigError::NotFound(config_path.to_path_buf()));
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    let mut settings: ReconcilerSettings = serde_json::from_str(&content)?;

    let base = config_path.parent().unwrap_or_else(|| Path::new("."));
    settings.resolve_root(base);

    Ok(settings)
}
