mod api;
mod cli;
mod commands;
mod config;
mod domain;
mod error_severity;
mod logging;
mod presentation;

use anyhow::{Context, Result};
use api::error::InfraError;
use commands::CommandContext;
use config::UserConfig;
use config::error::ConfigError;
use domain::error::{ActionError, DomainError};
use std::env;

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let machine_output = args.iter().any(|arg| arg == "--machine");

    if let Err(e) = run(&args).await {
        handle_error(e, machine_output);
    }
}

/// アプリケーションのメイン処理
async fn run(args: &[String]) -> Result<()> {
    let cli = cli::parse_args(args)?;

    let user_config = UserConfig::load()
        .context("Failed to load user configuration. Please check your config.toml file.")?;
    logging::init(&user_config.effective_log_level());

    let endpoint = match &cli.server {
        Some(server) => {
            config::user::validate_endpoint(server).context("Invalid --server value")?;
            server.clone()
        }
        None => user_config.effective_endpoint().to_string(),
    };

    let ctx = CommandContext {
        endpoint,
        machine_output: cli.machine_output,
    };

    if cli.command.is_none() && !cli.machine_output {
        presentation::output::print_usage();
        return Ok(());
    }

    let result = cli::dispatch(&cli, &ctx).await?;
    presentation::output::output_result(&result, cli.machine_output)
}

/// エラーハンドリングとユーザーへの表示
///
/// anyhow::Error から元のエラー型を downcast して、
/// エラーの種類に応じた exit code とメッセージを決定する。
fn handle_error(error: anyhow::Error, machine_output: bool) {
    let exit_code = determine_exit_code(&error);
    let hint = get_error_hint(&error);

    if machine_output {
        let causes: Vec<String> = error.chain().skip(1).map(|c| c.to_string()).collect();
        let json = serde_json::json!({
            "success": false,
            "error": error.to_string(),
            "causes": causes,
            "exit_code": exit_code,
            "hint": hint,
        });
        println!("{}", json);
        std::process::exit(exit_code);
    }

    eprintln!("Error: {}", error);

    let chain: Vec<_> = error.chain().skip(1).collect();
    if !chain.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            eprintln!("  {}: {}", i + 1, cause);
        }
    }

    if let Some(hint) = hint {
        eprintln!("\nHint: {}", hint);
    }

    std::process::exit(exit_code);
}

/// エラーチェーンから適切な終了コードを決定
fn determine_exit_code(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(action_err) = cause.downcast_ref::<ActionError>() {
            return action_err.severity().exit_code();
        }
        if let Some(domain_err) = cause.downcast_ref::<DomainError>() {
            return domain_err.severity().exit_code();
        }
        if let Some(infra_err) = cause.downcast_ref::<InfraError>() {
            return infra_err.severity().exit_code();
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_err.severity().exit_code();
        }
    }

    // 不明なエラー（引数の誤りなど）
    1
}

/// エラーに対するユーザー向けヒントを取得
fn get_error_hint(error: &anyhow::Error) -> Option<String> {
    for cause in error.chain() {
        let hint = if let Some(action_err) = cause.downcast_ref::<ActionError>() {
            action_err.hint()
        } else if let Some(domain_err) = cause.downcast_ref::<DomainError>() {
            domain_err.hint()
        } else if let Some(infra_err) = cause.downcast_ref::<InfraError>() {
            infra_err.hint()
        } else if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            config_err.hint()
        } else {
            None
        };

        if let Some(hint) = hint {
            return Some(hint.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exit_code_for_server_rejection() {
        let err = anyhow::Error::from(ActionError::from(InfraError::api(
            "/upload",
            413,
            json!({"error": "too large"}),
        )))
        .context("Upload failed")
        .context("Upload command failed");

        assert_eq!(determine_exit_code(&err), 1);
    }

    #[test]
    fn test_exit_code_for_network_error() {
        let err = anyhow::Error::from(ActionError::from(InfraError::network("refused")))
            .context("Processing failed");

        assert_eq!(determine_exit_code(&err), 3);
        assert!(get_error_hint(&err).unwrap().contains("--server"));
    }

    #[test]
    fn test_exit_code_for_config_error() {
        let err = anyhow::Error::from(ConfigError::validation_error("bad url"))
            .context("Invalid --server value");

        assert_eq!(determine_exit_code(&err), 2);
    }

    #[test]
    fn test_exit_code_for_unknown_error() {
        let err = anyhow::anyhow!("Unknown command: 'x'");
        assert_eq!(determine_exit_code(&err), 1);
        assert!(get_error_hint(&err).is_none());
    }
}
