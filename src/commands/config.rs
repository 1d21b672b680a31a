/// 設定コマンド
///
/// ユーザー設定（config.toml）の表示と更新を行います。
///
/// - `config`                    : 現在の設定を表示
/// - `config set <key> <value>`  : 値を設定して保存
/// - `config unset <key>`        : 値を削除して既定値に戻す
use crate::commands::result::{CommandResult, ConfigResult};
use crate::config::UserConfig;
use anyhow::{Context, Result, bail};
use std::path::Path;

/// 設定コマンドを実行
pub fn execute(args: &[String]) -> Result<CommandResult> {
    let path = UserConfig::config_path()?;
    execute_at(&path, args)
}

/// 指定した設定ファイルに対して実行
fn execute_at(path: &Path, args: &[String]) -> Result<CommandResult> {
    let mut config =
        UserConfig::load_from(path).context("Failed to load configuration file")?;

    let updated = match args.split_first() {
        None => false,
        Some((action, rest)) => match action.as_str() {
            "set" => {
                let key = rest.first().context("Usage: config set <key> <value>")?;
                let value = rest.get(1).context("Usage: config set <key> <value>")?;
                apply(&mut config, key, Some(value.clone()))?;
                true
            }
            "unset" => {
                let key = rest.first().context("Usage: config unset <key>")?;
                apply(&mut config, key, None)?;
                true
            }
            other => bail!(
                "Unknown config action: '{}'. Use 'set <key> <value>' or 'unset <key>'.",
                other
            ),
        },
    };

    if updated {
        config
            .save_to(path)
            .context("Failed to save configuration file")?;
    }

    Ok(CommandResult::Config(ConfigResult {
        path: path.display().to_string(),
        endpoint: config.effective_endpoint().to_string(),
        log_level: config.effective_log_level(),
        updated,
    }))
}

fn apply(config: &mut UserConfig, key: &str, value: Option<String>) -> Result<()> {
    match key {
        "endpoint" => config.endpoint = value,
        "log_level" => config.log_level = value,
        other => bail!("Unknown config key '{}'. Keys: endpoint, log_level", other),
    }
    Ok(())
}
