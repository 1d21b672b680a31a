use crate::commands::result::{CommandResult, UploadResult};
use crate::commands::{CommandContext, PageController};
use crate::domain::selection::{self, SelectedFile};
use crate::presentation::page;
use anyhow::{Context, Result};

/// アップロードコマンドを実行する
///
/// # 引数
/// * `file_path` - アップロード対象のファイルのパス（未指定なら未選択扱い）
///
/// # エラー
/// このレイヤーでは anyhow::Result を返し、
/// ドメイン層・インフラ層のエラーを集約する。
pub async fn execute(ctx: &CommandContext, file_path: Option<&str>) -> Result<CommandResult> {
    let controller = ctx.controller()?;
    let file = load_selection(file_path).await?;

    let (file_name, file_size) = upload(ctx, &controller, file).await?;
    let page = controller.view();

    Ok(CommandResult::Upload(UploadResult {
        s3_key: page.key.clone(),
        file_name,
        file_size,
        page,
    }))
}

/// パスが指定されていればファイルを読み込む
pub(crate) async fn load_selection(file_path: Option<&str>) -> Result<Option<SelectedFile>> {
    match file_path {
        Some(path) => {
            let file = selection::select_file(path)
                .await
                .context("File selection failed")?;
            Ok(Some(file))
        }
        None => Ok(None),
    }
}

/// コントローラー経由でアップロードし、ファイル名とサイズを返す
///
/// 失敗時は人間向けモードならページを描画してからエラーを返す。
pub(crate) async fn upload(
    ctx: &CommandContext,
    controller: &PageController,
    file: Option<SelectedFile>,
) -> Result<(String, u64)> {
    let meta = file.as_ref().map(|f| (f.name.clone(), f.size()));

    if !ctx.machine_output
        && let Some((name, size)) = &meta
    {
        eprintln!("Uploading {} ({} bytes) to {}...", name, size, ctx.endpoint);
    }

    if let Err(e) = controller.handle_upload(file).await {
        if !ctx.machine_output {
            eprintln!("{}", page::render_page(&controller.view()));
        }
        return Err(e).context("Upload failed");
    }

    // handle_upload が成功するのはファイルがある場合のみ
    Ok(meta.unwrap_or_default())
}
