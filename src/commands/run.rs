use crate::commands::result::{CommandResult, RunResult};
use crate::commands::{CommandContext, process, upload};
use anyhow::Result;

/// アップロードと処理を続けて実行する
///
/// アップロードが失敗した場合は処理を行わない。
pub async fn execute(ctx: &CommandContext, file_path: &str) -> Result<CommandResult> {
    let controller = ctx.controller()?;
    let file = upload::load_selection(Some(file_path)).await?;

    let (file_name, file_size) = upload::upload(ctx, &controller, file).await?;
    let response = process::process(ctx, &controller).await?;
    let page = controller.view();

    Ok(CommandResult::Run(RunResult {
        s3_key: page.key.clone(),
        file_name,
        file_size,
        summary: response.summary,
        extraction: response.extraction,
        s3_processed_key: response.s3_processed_key,
        page,
    }))
}
