/// インフラ層のエラー定義
///
/// 外部システム（ネットワーク、処理サーバー）との
/// やり取りで発生するエラーを構造化して定義。
use crate::error_severity::ErrorSeverity;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfraError {
    /// ネットワークエラー
    #[error("network error: {message}")]
    Network { message: String },

    /// サーバーが非2xxで応答した
    ///
    /// bodyはサーバーが返したJSONそのもの。
    #[error("API error: {endpoint} returned {status_code}: {body}")]
    Api {
        endpoint: String,
        status_code: u16,
        body: Value,
    },

    /// レスポンスがJSONとして解釈できない
    #[error("invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    /// タイムアウトエラー
    #[error("operation timed out: {operation}")]
    Timeout { operation: String },
}

impl InfraError {
    /// ネットワークエラーを作成
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// タイムアウトエラーを作成
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// APIエラーを作成
    pub fn api(endpoint: impl Into<String>, status_code: u16, body: Value) -> Self {
        Self::Api {
            endpoint: endpoint.into(),
            status_code,
            body,
        }
    }

    /// レスポンス解釈エラーを作成
    pub fn invalid_response(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// エラーの深刻度を返す
    ///
    /// 4xx はリクエスト内容の問題としてユーザーエラー扱い。
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Api { status_code, .. } if (400..500).contains(status_code) => {
                ErrorSeverity::UserError
            }
            _ => ErrorSeverity::SystemError,
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Network { .. } => Some(
                "Check that the processing server is running and reachable (see --server or 'endpoint' in config.toml).",
            ),
            Self::Timeout { .. } => Some("The server did not answer in time. Try again later."),
            Self::InvalidResponse { .. } => {
                Some("The server answered with something other than JSON. Is the endpoint correct?")
            }
            Self::Api { .. } => None,
        }
    }
}
