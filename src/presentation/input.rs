/// プレゼンテーション層: ユーザー入力処理
///
/// 対話モードで入力された1行を、ページ上の操作に変換します。

/// 対話モードの操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    /// ファイルを選んでアップロード（パス未指定は未選択扱い）
    Upload(Option<String>),
    /// 現在のキーを処理
    Process,
    /// ページを表示
    Show,
    Help,
    Quit,
    /// 空行
    Empty,
    Unknown(String),
}

/// 入力行を解析
///
/// パスは行の残り全体（前後の空白を除く）なので、空白を含むパスもそのまま扱える。
pub fn parse_page_command(line: &str) -> PageCommand {
    let line = line.trim();
    if line.is_empty() {
        return PageCommand::Empty;
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_lowercase().as_str() {
        "upload" | "u" => {
            if rest.is_empty() {
                PageCommand::Upload(None)
            } else {
                PageCommand::Upload(Some(rest.to_string()))
            }
        }
        "process" | "p" => PageCommand::Process,
        "show" | "s" => PageCommand::Show,
        "help" | "h" | "?" => PageCommand::Help,
        "quit" | "q" | "exit" => PageCommand::Quit,
        other => PageCommand::Unknown(other.to_string()),
    }
}

/// 対話モードのヘルプ
pub const PAGE_HELP: &str = "Commands:
  upload <file>  - Upload a file (alias: u)
  process        - Process the uploaded file (alias: p)
  show           - Show the page (alias: s)
  help           - Show this help
  quit           - Wait for running requests and exit (alias: q)";
