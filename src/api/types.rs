/// API通信用の型定義
///
/// 処理サーバーの POST /upload と POST /process の
/// リクエスト・レスポンスを表す構造体を定義します。
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// POST /upload の成功レスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// アップロードされたオブジェクトのキー
    pub s3_key: String,
}

/// POST /process のリクエストボディ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub s3_key: String,
}

/// POST /process の成功レスポンス
///
/// すべてのフィールドは省略され得る。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessResponse {
    /// 要約（通常は文字列）
    #[serde(default)]
    pub summary: Option<Value>,

    /// 抽出結果（任意のJSON）
    ///
    /// フィールドが無ければ None、`null` なら `Some(Value::Null)`。
    #[serde(default, deserialize_with = "present_value")]
    pub extraction: Option<Value>,

    /// OCR済みテキストの保存先キー
    #[serde(default)]
    pub s3_processed_key: Option<String>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
