/// ドメイン層: ページの表示状態
///
/// アップロード/処理ページの表示領域を明示的な状態として保持する。
/// コントローラーは UploadProcessView を通してのみ表示を変更する。
use serde::Serialize;

/// 未取得の値を表すプレースホルダー
pub const PLACEHOLDER: &str = "—";

/// ページの表示領域への書き込みインターフェース
pub trait UploadProcessView: Send {
    fn set_upload_status(&mut self, text: &str);
    fn set_process_status(&mut self, text: &str);
    fn set_key(&mut self, key: &str);
    fn set_summary(&mut self, text: &str);
    fn set_extraction(&mut self, text: &str);
    fn show_process_panel(&mut self);
}

/// インメモリの表示状態
///
/// 初期状態はすべて空、処理パネルは非表示。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub upload_status: String,
    pub process_status: String,
    pub key: String,
    pub summary: String,
    pub extraction: String,
    pub process_panel_visible: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UploadProcessView for ViewState {
    fn set_upload_status(&mut self, text: &str) {
        self.upload_status = text.to_string();
    }

    fn set_process_status(&mut self, text: &str) {
        self.process_status = text.to_string();
    }

    fn set_key(&mut self, key: &str) {
        self.key = key.to_string();
    }

    fn set_summary(&mut self, text: &str) {
        self.summary = text.to_string();
    }

    fn set_extraction(&mut self, text: &str) {
        self.extraction = text.to_string();
    }

    fn show_process_panel(&mut self) {
        self.process_panel_visible = true;
    }
}
