use crate::api::types::ProcessResponse;
use crate::commands::result::{CommandResult, ProcessResult};
use crate::commands::{CommandContext, PageController};
use crate::presentation::page;
use anyhow::{Context, Result};

/// 処理コマンドを実行する
///
/// 既にアップロード済みのキーをサーバーに処理させる。
///
/// # 引数
/// * `s3_key` - アップロード時に返されたキー
pub async fn execute(ctx: &CommandContext, s3_key: &str) -> Result<CommandResult> {
    let controller = ctx.controller()?;
    controller.restore_key(s3_key);

    let response = process(ctx, &controller).await?;
    let page = controller.view();

    Ok(CommandResult::Process(ProcessResult {
        s3_key: page.key.clone(),
        summary: response.summary,
        extraction: response.extraction,
        s3_processed_key: response.s3_processed_key,
        page,
    }))
}

/// コントローラー経由で処理を実行
///
/// 失敗時は人間向けモードならページを描画してからエラーを返す。
pub(crate) async fn process(
    ctx: &CommandContext,
    controller: &PageController,
) -> Result<ProcessResponse> {
    if !ctx.machine_output && controller.uploaded_key().is_some() {
        eprintln!("Processing (this may take 30s)...");
    }

    match controller.handle_process().await {
        Ok(response) => Ok(response),
        Err(e) => {
            if !ctx.machine_output {
                eprintln!("{}", page::render_page(&controller.view()));
            }
            Err(e).context("Processing failed")
        }
    }
}
