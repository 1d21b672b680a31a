/// ユーザー設定モジュール
///
/// 実行時にユーザーディレクトリから読み込まれる動的設定を管理します。
/// Windows: C:\Users\<User>\AppData\Roaming\claimup\config.toml
/// macOS:   /Users/<User>/Library/Application Support/claimup/config.toml
/// Linux:   /home/<user>/.config/claimup/config.toml
///
/// 初回起動時にデフォルト値から自動的にconfig.tomlを作成します。
use crate::config::app::{APP_CONFIG, LOG_LEVELS};
use crate::config::error::ConfigError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// ユーザー設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    /// 処理サーバーのベースURL（未設定ならAPP_CONFIGの値）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// ログレベル（未設定ならAPP_CONFIGの値）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl UserConfig {
    /// ユーザー設定ファイルのパスを取得
    ///
    /// # Errors
    /// 設定ディレクトリが取得できない場合に ConfigError::DirectoryNotFound を返します。
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .ok_or_else(|| ConfigError::directory_not_found("Failed to get user config directory"))
            .map(|config_dir| config_dir.join("claimup").join("config.toml"))
    }

    /// ユーザー設定を読み込む
    ///
    /// 設定ファイルが存在しない場合は、デフォルトテンプレートから自動的に作成します。
    /// 読み込み後、自動的に検証を実行します（Fail Fast）。
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスからユーザー設定を読み込む
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to read config file: {}", config_path.display()),
                e,
            )
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_error(
                format!("Failed to parse config file ({})", config_path.display()),
                e,
            )
        })?;

        config.validate()?;

        Ok(config)
    }

    /// デフォルト設定ファイルを作成
    fn create_default_config(config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::file_system(
                    format!("Failed to create config directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        fs::write(config_path, Self::default_toml_content()).map_err(|e| {
            ConfigError::file_system(
                format!(
                    "Failed to create default config file: {}",
                    config_path.display()
                ),
                e,
            )
        })?;

        Ok(())
    }

    /// デフォルトTOML設定を生成
    ///
    /// 値はすべてコメントアウトし、APP_CONFIGの既定値をそのまま使わせる。
    fn default_toml_content() -> String {
        format!(
            r#"# claimup - User Configuration

# Base URL of the processing server (POST /upload, POST /process)
# endpoint = "{}"

# Log level: trace, debug, info, warn, error (RUST_LOG takes precedence)
# log_level = "{}"
"#,
            APP_CONFIG.api.endpoint, APP_CONFIG.logging.level
        )
    }

    /// 指定パスにユーザー設定を保存する
    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::file_system(
                    format!("Failed to create config directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::serialize_error("Failed to serialize config", e))?;

        fs::write(config_path, content).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to write config file: {}", config_path.display()),
                e,
            )
        })
    }

    /// ユーザー設定を検証
    ///
    /// # 検証内容
    /// - endpoint: http/https の絶対URLであること
    /// - log_level: LOG_LEVELS のいずれかであること
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(endpoint) = &self.endpoint {
            validate_endpoint(endpoint)?;
        }

        if let Some(level) = &self.log_level
            && !LOG_LEVELS.contains(&level.to_lowercase().as_str())
        {
            return Err(ConfigError::validation_error(format!(
                "Invalid log_level '{}'. Expected one of: {}",
                level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// 実際に使用するエンドポイント
    pub fn effective_endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(APP_CONFIG.api.endpoint)
    }

    /// 実際に使用するログレベル
    pub fn effective_log_level(&self) -> String {
        self.log_level
            .as_deref()
            .unwrap_or(APP_CONFIG.logging.level)
            .to_lowercase()
    }
}

/// エンドポイントURLを検証
///
/// `--server` フラグの値にも使用する。
pub fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    let url = Url::parse(endpoint).map_err(|e| {
        ConfigError::validation_error(format!("Invalid endpoint URL '{}': {}", endpoint, e))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::validation_error(format!(
            "Unsupported endpoint scheme '{}' in '{}'. Use http or https.",
            other, endpoint
        ))),
    }
}
