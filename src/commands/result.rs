/// コマンド実行結果を表す型
///
/// 各コマンドはこの型を返し、プレゼンテーション層（main.rs/output.rs）で
/// 人間向けと機械向けの出力フォーマットを決定する。
use crate::domain::view::ViewState;
use serde::Serialize;
use serde_json::Value;

/// コマンド実行結果の統一型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Upload(UploadResult),
    Process(ProcessResult),
    Run(RunResult),
    Interactive(InteractiveResult),
    Config(ConfigResult),
    Help,
}

/// アップロードコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct UploadResult {
    /// サーバーが割り当てたキー
    pub s3_key: String,
    pub file_name: String,
    /// ファイルサイズ（bytes）
    pub file_size: u64,
    /// 完了時点のページ
    pub page: ViewState,
}

/// 処理コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResult {
    pub s3_key: String,
    pub summary: Option<Value>,
    pub extraction: Option<Value>,
    /// OCR済みテキストのキー（サーバーが返した場合）
    pub s3_processed_key: Option<String>,
    pub page: ViewState,
}

/// アップロード→処理を続けて行った結果
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub s3_key: String,
    pub file_name: String,
    pub file_size: u64,
    pub summary: Option<Value>,
    pub extraction: Option<Value>,
    pub s3_processed_key: Option<String>,
    pub page: ViewState,
}

/// 対話モードの結果
#[derive(Debug, Clone, Serialize)]
pub struct InteractiveResult {
    /// 成功したアップロード数
    pub uploads_completed: usize,
    /// 成功した処理数
    pub processes_completed: usize,
    /// 終了時点のページ
    pub page: ViewState,
}

/// 設定コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ConfigResult {
    /// 設定ファイルのパス
    pub path: String,
    /// 実際に使用するエンドポイント
    pub endpoint: String,
    /// 実際に使用するログレベル
    pub log_level: String,
    /// 保存したか
    pub updated: bool,
}

impl CommandResult {
    /// 成功メッセージを取得（人間向け出力用）
    pub fn success_message(&self) -> String {
        match self {
            CommandResult::Upload(_) => "Upload completed successfully!".to_string(),
            CommandResult::Process(_) => "Processing completed successfully!".to_string(),
            CommandResult::Run(_) => "Upload and processing completed successfully!".to_string(),
            CommandResult::Interactive(r) => format!(
                "Session ended ({} upload(s), {} processing run(s)).",
                r.uploads_completed, r.processes_completed
            ),
            CommandResult::Config(r) => {
                if r.updated {
                    "Configuration saved.".to_string()
                } else {
                    "".to_string()
                }
            }
            CommandResult::Help => "".to_string(),
        }
    }
}
