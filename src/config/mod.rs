/// 設定管理モジュール
///
/// このモジュールは2層の設定構造を提供します:
/// 1. AppConfig - コンパイル時定数として定義される静的設定（APP_CONFIG）
/// 2. UserConfig - 実行時に読み込まれる動的設定（エンドポイント、ログレベル）
///
/// # 使用例
///
/// ```rust,ignore
/// use crate::config::{APP_CONFIG, UserConfig};
///
/// let timeout = APP_CONFIG.api.process_timeout_seconds;
///
/// let user_config = UserConfig::load()?;
/// let endpoint = user_config.effective_endpoint();
/// ```
pub mod app;
pub mod error;
pub mod user;

pub use app::{APP_CONFIG, BYTES_PER_MB};
pub use user::UserConfig;
