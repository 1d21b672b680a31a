/// ドメイン層のエラー定義
///
/// ユーザー操作に関連するエラーを構造化して定義。
/// ActionError はコントローラーの操作結果で、ドメインエラーとインフラエラーをまとめる。
use crate::api::error::InfraError;
use crate::error_severity::ErrorSeverity;
use std::fmt;
use thiserror::Error;

/// ページ上の操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Upload,
    Process,
}

impl Action {
    /// ステータス表示に使うラベル
    pub fn label(self) -> &'static str {
        match self {
            Self::Upload => "Upload",
            Self::Process => "Processing",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upload => write!(f, "upload"),
            Self::Process => write!(f, "processing"),
        }
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    /// アップロード対象のファイルが選択されていない
    #[error("no file selected for upload")]
    NoFileSelected,

    /// アップロード済みのキーがない
    #[error("no uploaded key to process")]
    NoUploadedKey,

    /// 同じ操作が実行中
    #[error("{0} is already in progress")]
    ActionInFlight(Action),

    /// ファイルが見つからない
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// ディレクトリが指定された（ファイルが期待される場所）
    #[error("'{path}' is a directory, not a file")]
    NotAFile { path: String },

    /// ファイルを読み込めない
    #[error("failed to read '{path}': {message}")]
    FileUnreadable { path: String, message: String },
}

impl DomainError {
    /// ファイルが見つからないエラーを生成
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// ディレクトリ指定エラーを生成
    pub fn not_a_file(path: impl Into<String>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::UserError
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::NoFileSelected => Some("Choose a file first: 'claimup upload <file>'."),
            Self::NoUploadedKey => Some("Upload a file before processing it."),
            Self::ActionInFlight(_) => Some("Wait for the running request to finish."),
            Self::FileNotFound { .. } => {
                Some("Please check the file path and ensure the file exists.")
            }
            Self::NotAFile { .. } => Some("Please specify a file, not a directory."),
            Self::FileUnreadable { .. } => Some("Check the file permissions."),
        }
    }
}

/// コントローラー操作の失敗
///
/// いずれの場合もビューのステータスは既に更新済み（NoUploadedKey と ActionInFlight を除く）。
#[derive(Error, Debug)]
pub enum ActionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl ActionError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Domain(e) => e.severity(),
            Self::Infra(e) => e.severity(),
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Domain(e) => e.hint(),
            Self::Infra(e) => e.hint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_in_flight_message() {
        let err = DomainError::ActionInFlight(Action::Process);
        assert_eq!(err.to_string(), "processing is already in progress");
        assert_eq!(err.severity().exit_code(), 1);
    }

    #[test]
    fn test_action_error_delegates_severity() {
        let err = ActionError::from(InfraError::network("connection refused"));
        assert_eq!(err.severity(), ErrorSeverity::SystemError);
        assert_eq!(err.to_string(), "network error: connection refused");

        let err = ActionError::from(DomainError::NoFileSelected);
        assert_eq!(err.severity(), ErrorSeverity::UserError);
        assert!(err.hint().is_some());
    }
}
