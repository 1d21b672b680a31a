/// ドメイン層
///
/// - `controller`: アップロード/処理の操作とページ状態の更新
/// - `view`: ページの表示状態
/// - `backend`: 処理サーバーへのポート
/// - `selection`: アップロード対象ファイルの読み込み
/// - `error`: ドメインエラー
pub mod backend;
pub mod controller;
pub mod error;
pub mod selection;
pub mod view;
