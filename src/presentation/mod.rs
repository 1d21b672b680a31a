/// プレゼンテーション層モジュール
///
/// ドメイン層の状態とUI表示の橋渡しを行います。
/// プレゼンテーション層はドメイン層に依存しますが、その逆はありません。
///
/// # モジュール
/// - `input`: 対話モードの入力解析
/// - `output`: コマンド結果の出力（人間向け・機械向け）
/// - `page`: ページ（ViewState）の描画
pub mod input;
pub mod output;
pub mod page;
