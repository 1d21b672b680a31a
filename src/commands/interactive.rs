/// 対話モード
///
/// 標準入力から1行ずつ操作を受け取り、ページを更新する。
/// アップロードと処理はそれぞれ別タスクで実行されるため、
/// 時間のかかる処理中も入力を受け付ける。同じ操作の重複は拒否される。
use crate::commands::result::{CommandResult, InteractiveResult};
use crate::commands::{CommandContext, PageController};
use crate::domain::error::{Action, ActionError, DomainError};
use crate::domain::selection;
use crate::presentation::input::{PAGE_HELP, PageCommand, parse_page_command};
use crate::presentation::page::render_page;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error};

/// 対話モードを実行
///
/// EOF または quit で終了し、実行中のリクエストの完了を待つ。
pub async fn execute(ctx: &CommandContext) -> Result<CommandResult> {
    let controller = Arc::new(ctx.controller()?);
    let mut tasks: JoinSet<Option<Action>> = JoinSet::new();
    let mut tally = Tally::default();

    eprintln!("Connected to {}", ctx.endpoint);
    eprintln!("{}", PAGE_HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read command from stdin")?
    {
        while let Some(joined) = tasks.try_join_next() {
            tally.record(joined);
        }

        match parse_page_command(&line) {
            PageCommand::Upload(path) => {
                let file = match path {
                    Some(path) => match selection::select_file(&path).await {
                        Ok(file) => Some(file),
                        Err(e) => {
                            eprintln!("Error: {}", e);
                            if let Some(hint) = e.hint() {
                                eprintln!("Hint: {}", hint);
                            }
                            continue;
                        }
                    },
                    None => None,
                };
                let controller = Arc::clone(&controller);
                tasks.spawn(async move {
                    let result = controller.handle_upload(file).await.map(|_| ());
                    report(&controller, Action::Upload, result)
                });
            }
            PageCommand::Process => {
                let controller = Arc::clone(&controller);
                tasks.spawn(async move {
                    let result = controller.handle_process().await.map(|_| ());
                    report(&controller, Action::Process, result)
                });
            }
            PageCommand::Show => {
                eprintln!("{}", render_page(&controller.view()));
                for action in [Action::Upload, Action::Process] {
                    if controller.is_in_flight(action) {
                        eprintln!("({} in progress)", action);
                    }
                }
            }
            PageCommand::Help => eprintln!("{}", PAGE_HELP),
            PageCommand::Quit => break,
            PageCommand::Empty => {}
            PageCommand::Unknown(command) => {
                eprintln!("Unknown command: '{}'. Type 'help' for commands.", command);
            }
        }
    }

    if !tasks.is_empty() {
        eprintln!("Waiting for {} running request(s)...", tasks.len());
    }
    while let Some(joined) = tasks.join_next().await {
        tally.record(joined);
    }

    Ok(CommandResult::Interactive(InteractiveResult {
        uploads_completed: tally.uploads,
        processes_completed: tally.processes,
        page: controller.view(),
    }))
}

/// 操作の完了を表示し、成功した操作を返す
fn report(
    controller: &PageController,
    action: Action,
    result: Result<(), ActionError>,
) -> Option<Action> {
    match result {
        Ok(()) => {
            eprintln!("\n{}", render_page(&controller.view()));
            Some(action)
        }
        Err(ActionError::Domain(DomainError::NoUploadedKey)) => {
            debug!("nothing to process yet");
            None
        }
        Err(ActionError::Domain(e @ DomainError::ActionInFlight(_))) => {
            eprintln!("{}", e);
            None
        }
        Err(_) => {
            eprintln!("\n{}", render_page(&controller.view()));
            None
        }
    }
}

/// 成功した操作の集計
#[derive(Debug, Default)]
struct Tally {
    uploads: usize,
    processes: usize,
}

impl Tally {
    fn record(&mut self, joined: Result<Option<Action>, JoinError>) {
        match joined {
            Ok(Some(Action::Upload)) => self.uploads += 1,
            Ok(Some(Action::Process)) => self.processes += 1,
            Ok(None) => {}
            Err(e) => error!(error = %e, "page task aborted"),
        }
    }
}
