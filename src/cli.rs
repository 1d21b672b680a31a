use crate::commands::{self, CommandContext, CommandResult};
use anyhow::{Context, Result, bail};

/// 解析済みのCLI引数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// --machine
    pub machine_output: bool,
    /// --server <url>
    pub server: Option<String>,
    /// コマンド名（未指定ならヘルプ）
    pub command: Option<String>,
    /// コマンドの引数
    pub rest: Vec<String>,
}

/// CLI引数を解析する
///
/// グローバルフラグはコマンド名より前でも後でも受け付ける。
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--machine" => parsed.machine_output = true,
            "--server" => {
                let url = iter
                    .next()
                    .context("Please specify a URL after --server")?;
                parsed.server = Some(url.clone());
            }
            flag if flag.starts_with("--server=") => {
                parsed.server = Some(flag.trim_start_matches("--server=").to_string());
            }
            _ if parsed.command.is_none() => parsed.command = Some(arg.clone()),
            _ => parsed.rest.push(arg.clone()),
        }
    }

    Ok(parsed)
}

/// 解析済みの引数を適切なコマンドにディスパッチする
pub async fn dispatch(cli: &CliArgs, ctx: &CommandContext) -> Result<CommandResult> {
    let Some(command) = cli.command.as_deref() else {
        return Ok(commands::help::execute());
    };

    match command {
        "upload" => commands::upload::execute(ctx, cli.rest.first().map(String::as_str))
            .await
            .context("Upload command failed"),
        "process" => {
            let s3_key = cli
                .rest
                .first()
                .context("Please specify the s3_key returned by 'upload'")?;
            commands::process::execute(ctx, s3_key)
                .await
                .context("Process command failed")
        }
        "run" => {
            let file_path = cli
                .rest
                .first()
                .context("Please specify a file path for run command")?;
            commands::run::execute(ctx, file_path)
                .await
                .context("Run command failed")
        }
        "interactive" => commands::interactive::execute(ctx)
            .await
            .context("Interactive session failed"),
        "config" => commands::config::execute(&cli.rest).context("Config command failed"),
        "help" | "--help" | "-h" => Ok(commands::help::execute()),
        _ => bail!(
            "Unknown command: '{}'. Use 'help' to see available commands.",
            command
        ),
    }
}
