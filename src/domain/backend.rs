/// ドメイン層: 処理サーバーへのポート
///
/// コントローラーはこのトレイト越しにサーバーを呼び出す。
/// 実装は api::client::ApiClient。
use crate::api::error::InfraError;
use crate::api::types::{ProcessResponse, UploadResponse};
use crate::domain::selection::SelectedFile;
use std::future::Future;

pub trait ProcessingBackend: Send + Sync {
    /// ファイルをアップロードし、サーバーが割り当てたキーを返す
    fn upload(
        &self,
        file: SelectedFile,
    ) -> impl Future<Output = Result<UploadResponse, InfraError>> + Send;

    /// アップロード済みのキーを処理させる
    fn process(
        &self,
        s3_key: &str,
    ) -> impl Future<Output = Result<ProcessResponse, InfraError>> + Send;
}
