/// ドメイン層: アップロード/処理コントローラー
///
/// ページ上の2つの操作（アップロード、処理）をサーバー呼び出しに結び付け、
/// 結果を UploadProcessView に書き込む。
///
/// - アップロード済みキーは表示とは別に保持し、表示はその投影とする
/// - 操作ごとに実行中フラグを持ち、重複した呼び出しは拒否する
/// - エラーはステータス表示に反映したうえで呼び出し元にも返す
use crate::api::error::InfraError;
use crate::api::types::{ProcessResponse, UploadResponse};
use crate::domain::backend::ProcessingBackend;
use crate::domain::error::{Action, ActionError, DomainError};
use crate::domain::selection::SelectedFile;
use crate::domain::view::{PLACEHOLDER, UploadProcessView};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

pub const STATUS_CHOOSE_FILE: &str = "Choose a file first";
pub const STATUS_UPLOADING: &str = "Uploading...";
pub const STATUS_UPLOAD_COMPLETE: &str = "Upload complete";
pub const STATUS_PROCESSING: &str = "Processing (this may take 30s)...";
pub const STATUS_PROCESSING_COMPLETE: &str = "Processing completed";

pub struct UploadProcessController<B, V> {
    backend: B,
    view: Mutex<V>,
    uploaded_key: Mutex<Option<String>>,
    upload_in_flight: AtomicBool,
    process_in_flight: AtomicBool,
}

impl<B, V> UploadProcessController<B, V>
where
    B: ProcessingBackend,
    V: UploadProcessView,
{
    pub fn new(backend: B, view: V) -> Self {
        Self {
            backend,
            view: Mutex::new(view),
            uploaded_key: Mutex::new(None),
            upload_in_flight: AtomicBool::new(false),
            process_in_flight: AtomicBool::new(false),
        }
    }

    /// アップロード操作
    ///
    /// ファイル未選択ならステータスに案内を出して終了し、通信は行わない。
    pub async fn handle_upload(
        &self,
        file: Option<SelectedFile>,
    ) -> Result<UploadResponse, ActionError> {
        let Some(file) = file else {
            self.update_view(|view| view.set_upload_status(STATUS_CHOOSE_FILE));
            return Err(DomainError::NoFileSelected.into());
        };

        let _guard = InFlightGuard::acquire(&self.upload_in_flight).ok_or_else(|| {
            warn!("upload rejected: another upload is in flight");
            DomainError::ActionInFlight(Action::Upload)
        })?;

        self.update_view(|view| view.set_upload_status(STATUS_UPLOADING));
        info!(file = %file.name, size = file.size(), "uploading file");

        match self.backend.upload(file).await {
            Ok(response) => {
                info!(s3_key = %response.s3_key, "upload complete");
                self.store_key(&response.s3_key);
                self.update_view(|view| {
                    view.set_upload_status(STATUS_UPLOAD_COMPLETE);
                    view.set_key(&response.s3_key);
                    view.show_process_panel();
                    view.set_summary(PLACEHOLDER);
                    view.set_extraction(PLACEHOLDER);
                });
                Ok(response)
            }
            Err(err) => {
                warn!(error = %err, "upload failed");
                let status = failure_status(Action::Upload, &err);
                self.update_view(|view| view.set_upload_status(&status));
                Err(err.into())
            }
        }
    }

    /// 処理操作
    ///
    /// キーが空なら何もしない（表示も変えない）。
    pub async fn handle_process(&self) -> Result<ProcessResponse, ActionError> {
        let Some(key) = self.uploaded_key() else {
            debug!("process ignored: no uploaded key");
            return Err(DomainError::NoUploadedKey.into());
        };

        let _guard = InFlightGuard::acquire(&self.process_in_flight).ok_or_else(|| {
            warn!("process rejected: another process request is in flight");
            DomainError::ActionInFlight(Action::Process)
        })?;

        self.update_view(|view| view.set_process_status(STATUS_PROCESSING));
        info!(s3_key = %key, "processing uploaded file");

        match self.backend.process(&key).await {
            Ok(response) => {
                info!(s3_key = %key, "processing completed");
                let summary = render_summary(response.summary.as_ref());
                let extraction = render_extraction(response.extraction.as_ref());
                self.update_view(|view| {
                    view.set_process_status(STATUS_PROCESSING_COMPLETE);
                    view.set_summary(&summary);
                    view.set_extraction(&extraction);
                });
                Ok(response)
            }
            Err(err) => {
                warn!(error = %err, "processing failed");
                let status = failure_status(Action::Process, &err);
                self.update_view(|view| view.set_process_status(&status));
                Err(err.into())
            }
        }
    }

    /// ページ外で得たキーを設定する
    ///
    /// 空のキーは無視する。
    pub fn restore_key(&self, key: &str) {
        let key = key.trim();
        if key.is_empty() {
            return;
        }
        self.store_key(key);
        self.update_view(|view| {
            view.set_key(key);
            view.show_process_panel();
        });
    }

    /// 現在のアップロード済みキー（空なら None）
    pub fn uploaded_key(&self) -> Option<String> {
        self.uploaded_key
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .filter(|key| !key.is_empty())
    }

    /// 表示状態のスナップショット
    pub fn view(&self) -> V
    where
        V: Clone,
    {
        self.view
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 指定した操作が実行中か
    pub fn is_in_flight(&self, action: Action) -> bool {
        match action {
            Action::Upload => self.upload_in_flight.load(Ordering::Acquire),
            Action::Process => self.process_in_flight.load(Ordering::Acquire),
        }
    }

    fn store_key(&self, key: &str) {
        *self
            .uploaded_key
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(key.to_string());
    }

    // ロックは await をまたがない
    fn update_view(&self, f: impl FnOnce(&mut V)) {
        let mut view = self.view.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut view);
    }
}

/// 失敗時のステータス文言
///
/// サーバーが拒否した場合は返されたJSONを、それ以外はエラー文字列を表示する。
fn failure_status(action: Action, err: &InfraError) -> String {
    match err {
        InfraError::Api { body, .. } => format!("{} failed: {}", action.label(), body),
        other => format!("{} error: {}", action.label(), other),
    }
}

/// 要約の表示文字列
///
/// 空文字列・0・false・null は未設定扱い。文字列以外はJSONテキストで表示する。
fn render_summary(summary: Option<&Value>) -> String {
    match summary {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        Some(Value::Bool(true)) => "true".to_string(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(value @ (Value::Array(_) | Value::Object(_))) => value.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// 抽出結果を2スペースインデントのJSONにする
///
/// `null` が返された場合は "null" と表示し、フィールドが無い場合のみ "—"。
fn render_extraction(extraction: Option<&Value>) -> String {
    match extraction {
        Some(value) => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
        None => PLACEHOLDER.to_string(),
    }
}

/// 実行中フラグのガード
///
/// drop 時にフラグを下ろす。
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::view::ViewState;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    type UploadReply = Box<dyn Fn() -> Result<UploadResponse, InfraError> + Send + Sync>;
    type ProcessReply = Box<dyn Fn() -> Result<ProcessResponse, InfraError> + Send + Sync>;

    struct FakeBackend {
        upload_reply: UploadReply,
        process_reply: ProcessReply,
        delay: Duration,
        upload_calls: AtomicUsize,
        process_calls: AtomicUsize,
        last_key: Mutex<Option<String>>,
    }

    impl FakeBackend {
        fn new() -> Self {
            Self {
                upload_reply: Box::new(|| {
                    Ok(UploadResponse {
                        s3_key: "abc".to_string(),
                    })
                }),
                process_reply: Box::new(|| {
                    Ok(ProcessResponse {
                        summary: Some(json!("ok")),
                        extraction: Some(json!({"a": 1})),
                        s3_processed_key: None,
                    })
                }),
                delay: Duration::ZERO,
                upload_calls: AtomicUsize::new(0),
                process_calls: AtomicUsize::new(0),
                last_key: Mutex::new(None),
            }
        }

        fn with_upload(mut self, reply: UploadReply) -> Self {
            self.upload_reply = reply;
            self
        }

        fn with_process(mut self, reply: ProcessReply) -> Self {
            self.process_reply = reply;
            self
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    impl ProcessingBackend for FakeBackend {
        async fn upload(&self, _file: SelectedFile) -> Result<UploadResponse, InfraError> {
            self.upload_calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            (self.upload_reply)()
        }

        async fn process(&self, s3_key: &str) -> Result<ProcessResponse, InfraError> {
            self.process_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_key.lock().unwrap() = Some(s3_key.to_string());
            tokio::time::sleep(self.delay).await;
            (self.process_reply)()
        }
    }

    fn sample_file() -> Option<SelectedFile> {
        Some(SelectedFile::new("claim.pdf", b"%PDF".to_vec()))
    }

    fn controller(backend: FakeBackend) -> UploadProcessController<FakeBackend, ViewState> {
        UploadProcessController::new(backend, ViewState::new())
    }

    #[tokio::test]
    async fn test_upload_without_file_makes_no_request() {
        let controller = controller(FakeBackend::new());

        let result = controller.handle_upload(None).await;

        assert!(matches!(
            result,
            Err(ActionError::Domain(DomainError::NoFileSelected))
        ));
        assert_eq!(controller.backend.upload_calls.load(Ordering::SeqCst), 0);
        assert_eq!(controller.view().upload_status, "Choose a file first");
    }

    #[tokio::test]
    async fn test_upload_success_updates_view() {
        let controller = controller(FakeBackend::new());

        let response = controller
            .handle_upload(sample_file())
            .await
            .expect("upload should succeed");

        assert_eq!(response.s3_key, "abc");
        let view = controller.view();
        assert_eq!(view.upload_status, "Upload complete");
        assert_eq!(view.key, "abc");
        assert!(view.process_panel_visible);
        assert_eq!(view.summary, "—");
        assert_eq!(view.extraction, "—");
        assert_eq!(controller.uploaded_key().as_deref(), Some("abc"));
        assert!(!controller.is_in_flight(Action::Upload));
    }

    #[tokio::test]
    async fn test_upload_rejected_by_server_shows_body() {
        let backend = FakeBackend::new().with_upload(Box::new(|| {
            Err(InfraError::api("/upload", 413, json!({"error": "too large"})))
        }));
        let controller = controller(backend);

        let result = controller.handle_upload(sample_file()).await;

        assert!(matches!(
            result,
            Err(ActionError::Infra(InfraError::Api {
                status_code: 413,
                ..
            }))
        ));
        let view = controller.view();
        assert_eq!(view.upload_status, r#"Upload failed: {"error":"too large"}"#);
        assert!(!view.process_panel_visible);
        assert!(controller.uploaded_key().is_none());
    }

    #[tokio::test]
    async fn test_upload_transport_error_and_recovery() {
        let backend = FakeBackend::new()
            .with_upload(Box::new(|| Err(InfraError::network("connection refused"))));
        let controller = controller(backend);

        assert!(controller.handle_upload(sample_file()).await.is_err());
        assert_eq!(
            controller.view().upload_status,
            "Upload error: network error: connection refused"
        );

        // 失敗後もフラグは下りており、次の操作を受け付ける
        assert!(!controller.is_in_flight(Action::Upload));
        let result = controller.handle_upload(sample_file()).await;
        assert!(matches!(
            result,
            Err(ActionError::Infra(InfraError::Network { .. }))
        ));
        assert_eq!(controller.backend.upload_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_process_without_key_is_silent() {
        let controller = controller(FakeBackend::new());

        let result = controller.handle_process().await;

        assert!(matches!(
            result,
            Err(ActionError::Domain(DomainError::NoUploadedKey))
        ));
        assert_eq!(controller.backend.process_calls.load(Ordering::SeqCst), 0);
        assert_eq!(controller.view(), ViewState::new());
    }

    #[tokio::test]
    async fn test_process_success_renders_summary_and_extraction() {
        let controller = controller(FakeBackend::new());
        controller.handle_upload(sample_file()).await.unwrap();

        controller
            .handle_process()
            .await
            .expect("process should succeed");

        let view = controller.view();
        assert_eq!(view.process_status, "Processing completed");
        assert_eq!(view.summary, "ok");
        assert_eq!(view.extraction, "{\n  \"a\": 1\n}");
        assert_eq!(
            controller.backend.last_key.lock().unwrap().as_deref(),
            Some("abc")
        );
    }

    #[tokio::test]
    async fn test_process_without_summary_shows_placeholder() {
        let backend = FakeBackend::new().with_process(Box::new(|| {
            Ok(ProcessResponse {
                summary: None,
                extraction: None,
                s3_processed_key: None,
            })
        }));
        let controller = controller(backend);
        controller.restore_key("abc");

        controller.handle_process().await.unwrap();

        let view = controller.view();
        assert_eq!(view.summary, "—");
        assert_eq!(view.extraction, "—");
    }

    #[tokio::test]
    async fn test_process_with_null_extraction_shows_null() {
        let backend = FakeBackend::new().with_process(Box::new(|| {
            Ok(ProcessResponse {
                summary: Some(json!("ok")),
                extraction: Some(Value::Null),
                s3_processed_key: None,
            })
        }));
        let controller = controller(backend);
        controller.restore_key("abc");

        controller.handle_process().await.unwrap();

        let view = controller.view();
        assert_eq!(view.summary, "ok");
        assert_eq!(view.extraction, "null");
    }

    #[tokio::test]
    async fn test_process_with_non_string_summary() {
        let backend = FakeBackend::new().with_process(Box::new(|| {
            Ok(ProcessResponse {
                summary: Some(json!(42)),
                extraction: Some(json!([])),
                s3_processed_key: None,
            })
        }));
        let controller = controller(backend);
        controller.restore_key("abc");

        controller.handle_process().await.unwrap();

        let view = controller.view();
        assert_eq!(view.process_status, "Processing completed");
        assert_eq!(view.summary, "42");
        assert_eq!(view.extraction, "[]");
    }

    #[test]
    fn test_render_summary_falsy_values() {
        assert_eq!(render_summary(None), "—");
        assert_eq!(render_summary(Some(&json!(""))), "—");
        assert_eq!(render_summary(Some(&json!(0))), "—");
        assert_eq!(render_summary(Some(&json!(false))), "—");
        assert_eq!(render_summary(Some(&Value::Null)), "—");
        assert_eq!(render_summary(Some(&json!({"k": "v"}))), r#"{"k":"v"}"#);
    }

    #[tokio::test]
    async fn test_process_failure_and_error_labels() {
        let backend = FakeBackend::new().with_process(Box::new(|| {
            Err(InfraError::api("/process", 500, json!({"error": "textract failed"})))
        }));
        let rejected = controller(backend);
        rejected.restore_key("abc");

        assert!(rejected.handle_process().await.is_err());
        assert_eq!(
            rejected.view().process_status,
            r#"Processing failed: {"error":"textract failed"}"#
        );

        let backend = FakeBackend::new()
            .with_process(Box::new(|| Err(InfraError::timeout("POST /process"))));
        let timed_out = controller(backend);
        timed_out.restore_key("abc");

        assert!(timed_out.handle_process().await.is_err());
        assert!(
            timed_out
                .view()
                .process_status
                .starts_with("Processing error: operation timed out")
        );
    }

    #[tokio::test]
    async fn test_overlapping_process_is_rejected() {
        let backend = FakeBackend::new().with_delay(Duration::from_millis(50));
        let controller = controller(backend);
        controller.restore_key("abc");

        let (first, second) = tokio::join!(controller.handle_process(), controller.handle_process());

        assert!(first.is_ok());
        assert!(matches!(
            second,
            Err(ActionError::Domain(DomainError::ActionInFlight(
                Action::Process
            )))
        ));
        assert_eq!(controller.backend.process_calls.load(Ordering::SeqCst), 1);
        assert!(!controller.is_in_flight(Action::Process));
    }

    #[tokio::test]
    async fn test_upload_and_process_may_overlap() {
        let backend = FakeBackend::new().with_delay(Duration::from_millis(20));
        let controller = controller(backend);
        controller.restore_key("old");

        let (upload, process) =
            tokio::join!(controller.handle_upload(sample_file()), controller.handle_process());

        assert!(upload.is_ok());
        assert!(process.is_ok());
        assert_eq!(
            controller.backend.last_key.lock().unwrap().as_deref(),
            Some("old")
        );
        assert_eq!(controller.uploaded_key().as_deref(), Some("abc"));
    }

    #[test]
    fn test_restore_key_ignores_blank() {
        let controller = controller(FakeBackend::new());
        controller.restore_key("   ");
        assert!(controller.uploaded_key().is_none());
        assert!(!controller.view().process_panel_visible);

        controller.restore_key("raw/x.pdf");
        assert_eq!(controller.view().key, "raw/x.pdf");
        assert!(controller.view().process_panel_visible);
    }
}
