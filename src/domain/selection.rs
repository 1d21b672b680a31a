/// ドメインサービス: アップロード対象ファイルの選択
///
/// ローカルパスからアップロード用のファイル内容を読み込む。
/// 形式やサイズの検証は行わない（サーバー側の責務）。
use crate::domain::error::DomainError;
use std::path::Path;

/// ファイル名が取れない場合に送る名前
const FALLBACK_FILE_NAME: &str = "upload.bin";

/// 選択されたファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// multipart の filename に使う名前
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// ファイルサイズ（バイト）
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// パスからファイルを読み込む
///
/// # エラー
/// - ファイルが存在しない
/// - ディレクトリが指定された
/// - 読み込みに失敗した
pub async fn select_file(file_path: &str) -> Result<SelectedFile, DomainError> {
    let path = Path::new(file_path);

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|_| DomainError::file_not_found(file_path))?;

    if metadata.is_dir() {
        return Err(DomainError::not_a_file(file_path));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| DomainError::FileUnreadable {
            path: file_path.to_string(),
            message: e.to_string(),
        })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string());

    Ok(SelectedFile::new(name, bytes))
}
