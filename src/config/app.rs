/// アプリケーション設定モジュール
///
/// コンパイル時定数として定義される静的設定を管理します。
/// これらの設定は実行時には変更できません。
/// 実行時に上書きしたい値（エンドポイント、ログレベル）は UserConfig 側で扱います。

/// アプリケーション全体の設定
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

/// API関連の設定
#[derive(Debug, Clone, Copy)]
pub struct ApiConfig {
    /// 処理サーバーのベースURL
    pub endpoint: &'static str,

    /// アップロードエンドポイントのパス
    pub upload_path: &'static str,

    /// 処理エンドポイントのパス
    pub process_path: &'static str,

    /// 接続確立のタイムアウト(秒)
    pub connect_timeout_seconds: u64,

    /// POST /upload のタイムアウト(秒)
    pub upload_timeout_seconds: u64,

    /// POST /process のタイムアウト(秒)
    ///
    /// サーバー側でOCRと抽出を同期実行するため長めに取る。
    pub process_timeout_seconds: u64,
}

/// ロギング関連の設定
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig {
    /// デフォルトのログレベル (trace, debug, info, warn, error)
    pub level: &'static str,
}

/// サポートするログレベル
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// 1MBあたりのバイト数
pub const BYTES_PER_MB: f64 = 1_048_576.0;

/// グローバルなアプリケーション設定
pub const APP_CONFIG: AppConfig = AppConfig {
    api: ApiConfig {
        endpoint: "http://127.0.0.1:8080",
        upload_path: "/upload",
        process_path: "/process",
        connect_timeout_seconds: 10,
        upload_timeout_seconds: 120,
        process_timeout_seconds: 900,
    },
    logging: LoggingConfig { level: "warn" },
};
