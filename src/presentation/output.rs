/// プレゼンテーション層: コマンド結果の出力
///
/// コマンド実行結果をユーザー向け（人間可読）または
/// 機械向け（JSON）形式で出力する責務を担います。
/// CLI使用方法の表示もこのモジュールが担当します。
use crate::commands::result::CommandResult;
use crate::config::BYTES_PER_MB;
use crate::presentation::page::render_page;
use anyhow::Result;

/// ヘルプテキスト（単一の情報源）
pub const HELP_TEXT: &str = "claimup
Upload a document to the processing server and show its summary and extraction

Usage:
  claimup [--machine] [--server <url>] <command> [args...]

Global Flags:
  --machine        - Output machine-readable JSON to stdout (for scripting)
                     Works for both success and error cases
  --server <url>   - Processing server base URL
                     (default: 'endpoint' in config.toml, then http://127.0.0.1:8080)

Available commands:
  upload <file>    - Upload a file (POST /upload) and print the page
  process <s3_key> - Process an uploaded file (POST /process)
  run <file>       - Upload a file, then process it
  interactive      - Line-driven page: upload <file> | process | show | help | quit
  config [set <key> <value> | unset <key>]
                   - Show or change config.toml (keys: endpoint, log_level)
  help             - Display this help message

Logging:
  Set 'log_level' in config.toml or RUST_LOG (e.g. RUST_LOG=debug) to see request logs on stderr";

/// コマンド使用方法を表示する
pub fn print_usage() {
    eprintln!("{}", HELP_TEXT);
}

/// コマンド結果を適切な形式で出力する
///
/// * `machine_output = false`: 人間向けの詳細メッセージ（stderr）
/// * `machine_output = true`: 機械可読JSON（stdout）
pub fn output_result(result: &CommandResult, machine_output: bool) -> Result<()> {
    if machine_output {
        println!("{}", machine_readable(result)?);
    } else {
        eprintln!("{}", human_readable(result));
    }

    Ok(())
}

/// 人間向けの詳細メッセージを生成
///
/// すべての出力はstderrに送られ、stdoutはパイプライン用に予約されます。
fn human_readable(result: &CommandResult) -> String {
    let mut out = Vec::new();

    match result {
        CommandResult::Upload(r) => {
            out.push(render_page(&r.page));
            out.push("---".to_string());
            out.push(format!(
                "File: {} ({:.2} MB)",
                r.file_name,
                r.file_size as f64 / BYTES_PER_MB
            ));
            out.push(format!("Next: claimup process {}", r.s3_key));
        }
        CommandResult::Process(r) => {
            out.push(render_page(&r.page));
            if let Some(processed_key) = &r.s3_processed_key {
                out.push("---".to_string());
                out.push(format!("Processed text: {}", processed_key));
            }
        }
        CommandResult::Run(r) => {
            out.push(render_page(&r.page));
            out.push("---".to_string());
            out.push(format!(
                "File: {} ({:.2} MB)",
                r.file_name,
                r.file_size as f64 / BYTES_PER_MB
            ));
            if let Some(processed_key) = &r.s3_processed_key {
                out.push(format!("Processed text: {}", processed_key));
            }
        }
        CommandResult::Interactive(_) => {}
        CommandResult::Config(r) => {
            out.push(format!("Config file: {}", r.path));
            out.push(format!("endpoint:    {}", r.endpoint));
            out.push(format!("log_level:   {}", r.log_level));
        }
        CommandResult::Help => return HELP_TEXT.to_string(),
    }

    out.push(String::new());
    out.push(result.success_message());
    out.join("\n")
}

/// 機械可読JSONを生成
fn machine_readable(result: &CommandResult) -> Result<String> {
    let mut json = serde_json::to_value(result)?;
    if let Some(object) = json.as_object_mut() {
        object.insert("success".to_string(), serde_json::Value::Bool(true));
    }
    Ok(serde_json::to_string(&json)?)
}
