/// プレゼンテーション層: ページの描画
///
/// ViewState を端末向けのテキストに変換します。
/// 処理パネルはアップロード成功まで表示しない。
use crate::domain::view::ViewState;

pub fn render_page(view: &ViewState) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Upload status:  {}", view.upload_status));

    if view.process_panel_visible {
        lines.push("--- Process ---".to_string());
        lines.push(format!("S3 key:         {}", view.key));
        lines.push(format!("Process status: {}", view.process_status));
        lines.push("Summary:".to_string());
        lines.push(indent(&view.summary));
        lines.push("Extraction:".to_string());
        lines.push(indent(&view.extraction));
    }

    lines.join("\n")
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::view::UploadProcessView;

    #[test]
    fn test_hidden_panel() {
        let mut view = ViewState::new();
        view.set_upload_status("Choose a file first");

        let rendered = render_page(&view);
        assert_eq!(rendered, "Upload status:  Choose a file first");
    }

    #[test]
    fn test_visible_panel() {
        let mut view = ViewState::new();
        view.set_upload_status("Upload complete");
        view.set_key("abc");
        view.show_process_panel();
        view.set_process_status("Processing completed");
        view.set_summary("ok");
        view.set_extraction("{\n  \"a\": 1\n}");

        let rendered = render_page(&view);
        assert!(rendered.contains("S3 key:         abc"));
        assert!(rendered.contains("Summary:\n  ok"));
        assert!(rendered.ends_with("Extraction:\n  {\n    \"a\": 1\n  }"));
    }
}
