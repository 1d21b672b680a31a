//! ロギングの初期化
//!
//! tracing のイベントを stderr に出力する。
//! RUST_LOG が設定されていればそれを優先し、なければ設定ファイルのレベルを使う。

use tracing_subscriber::EnvFilter;

/// グローバルなサブスクライバーを設定する
///
/// 既に設定済みの場合は何もしない。
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("claimup={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
