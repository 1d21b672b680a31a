pub mod config;
pub mod help;
pub mod interactive;
pub mod process;
pub mod result;
pub mod run;
pub mod upload;

pub use result::CommandResult;

use crate::api::client::ApiClient;
use crate::domain::controller::UploadProcessController;
use crate::domain::view::ViewState;
use anyhow::{Context, Result};

/// 端末上のページを操作するコントローラー
pub type PageController = UploadProcessController<ApiClient, ViewState>;

/// コマンド共通の実行コンテキスト
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// 処理サーバーのベースURL
    pub endpoint: String,
    /// 機械可読出力か（trueなら途中経過をstderrに描画しない）
    pub machine_output: bool,
}

impl CommandContext {
    /// 空のページを持つコントローラーを作成
    pub fn controller(&self) -> Result<PageController> {
        let client = ApiClient::new(self.endpoint.as_str())
            .with_context(|| format!("Failed to create API client for {}", self.endpoint))?;
        Ok(UploadProcessController::new(client, ViewState::new()))
    }
}
