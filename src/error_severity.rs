//! プレゼンテーション層が使用するエラー深刻度
//!
//! 終了コードの決定にのみ使用する。
//! 内側の層（domain, api, config）はこのモジュールに依存してよいが、
//! このモジュールは他のモジュールに依存しない。

/// エラーの深刻度と対応する終了コード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// ユーザーの入力エラー
    ///
    /// ファイル未指定、キー未設定、サーバーが 4xx で拒否した場合など。
    ///
    /// **Exit Code: 1**
    UserError,

    /// 設定エラー
    ///
    /// 設定ファイルの破損、無効なエンドポイントURLなど。
    ///
    /// **Exit Code: 2**
    ConfigError,

    /// システムエラー
    ///
    /// ネットワーク障害、タイムアウト、サーバー側の 5xx など。
    ///
    /// **Exit Code: 3**
    SystemError,
}

impl ErrorSeverity {
    /// 対応する Unix 終了コードを返す
    pub fn exit_code(self) -> i32 {
        match self {
            Self::UserError => 1,
            Self::ConfigError => 2,
            Self::SystemError => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorSeverity::UserError.exit_code(), 1);
        assert_eq!(ErrorSeverity::ConfigError.exit_code(), 2);
        assert_eq!(ErrorSeverity::SystemError.exit_code(), 3);
    }
}
