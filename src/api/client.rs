/// HTTPクライアント
///
/// 処理サーバーとの通信を担当するHTTPクライアント。
/// タイムアウトとエラーハンドリングを含みます。
use crate::api::error::InfraError;
use crate::api::types::{ProcessRequest, ProcessResponse, UploadResponse};
use crate::config::APP_CONFIG;
use crate::domain::backend::ProcessingBackend;
use crate::domain::selection::SelectedFile;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// APIクライアントの結果型
type ApiResult<T> = Result<T, InfraError>;

/// APIクライアント
pub struct ApiClient {
    client: Client,
    base_url: String,
    upload_timeout: Duration,
    process_timeout: Duration,
}

impl ApiClient {
    /// 新しいAPIクライアントを作成
    ///
    /// # Arguments
    /// * `base_url` - サーバーのベースURL（例: "http://127.0.0.1:8080"）
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(APP_CONFIG.api.connect_timeout_seconds))
            .build()
            .map_err(|e| InfraError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            upload_timeout: Duration::from_secs(APP_CONFIG.api.upload_timeout_seconds),
            process_timeout: Duration::from_secs(APP_CONFIG.api.process_timeout_seconds),
        })
    }

    /// リクエストごとのタイムアウトを差し替える
    pub fn with_timeouts(mut self, upload: Duration, process: Duration) -> Self {
        self.upload_timeout = upload;
        self.process_timeout = process;
        self
    }

    /// POST /upload にファイルを multipart で送信
    ///
    /// パート名は `file`。
    pub async fn upload_file(&self, file: SelectedFile) -> ApiResult<UploadResponse> {
        let endpoint = APP_CONFIG.api.upload_path;
        let part = Part::bytes(file.bytes).file_name(file.name);
        let form = Form::new().part("file", part);

        let request = self
            .client
            .post(self.build_url(endpoint))
            .multipart(form)
            .timeout(self.upload_timeout);

        let response = Self::send_with_error_handling(request, endpoint, "POST").await?;
        let response = Self::check_response(response, endpoint).await?;
        Self::parse_json(response, endpoint).await
    }

    /// POST /process にキーを送信
    pub async fn process_key(&self, s3_key: &str) -> ApiResult<ProcessResponse> {
        let endpoint = APP_CONFIG.api.process_path;
        let body = ProcessRequest {
            s3_key: s3_key.to_string(),
        };

        // .json() が Content-Type: application/json を付与する
        let request = self
            .client
            .post(self.build_url(endpoint))
            .json(&body)
            .timeout(self.process_timeout);

        let response = Self::send_with_error_handling(request, endpoint, "POST").await?;
        let response = Self::check_response(response, endpoint).await?;
        Self::parse_json(response, endpoint).await
    }

    /// URLを構築
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// リクエストを送信し、エラーハンドリングを行う
    async fn send_with_error_handling(
        request: RequestBuilder,
        endpoint: &str,
        method: &str,
    ) -> ApiResult<Response> {
        debug!(method, endpoint, "sending request");
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                InfraError::timeout(format!("{} {}", method, endpoint))
            } else if e.is_connect() {
                InfraError::network(format!(
                    "Connection failed for {} {}: {}",
                    method, endpoint, e
                ))
            } else {
                InfraError::network(format!("Request failed for {} {}: {}", method, endpoint, e))
            }
        })
    }

    /// レスポンスをチェックしてエラーを返す
    ///
    /// 非2xxの場合、ボディをJSONとして読み取り InfraError::Api にする。
    /// ボディがJSONでなければ InfraError::InvalidResponse。
    pub async fn check_response(response: Response, endpoint: &str) -> ApiResult<Response> {
        let status = response.status();
        debug!(endpoint, status = status.as_u16(), "response received");

        if status.is_success() {
            return Ok(response);
        }

        let body: Value = Self::parse_json(response, endpoint).await?;
        Err(InfraError::api(endpoint, status.as_u16(), body))
    }

    /// JSONレスポンスをデシリアライズ
    pub async fn parse_json<T: serde::de::DeserializeOwned>(
        response: Response,
        endpoint: &str,
    ) -> ApiResult<T> {
        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                InfraError::timeout(format!("reading response of {}", endpoint))
            } else {
                InfraError::network(format!("Failed to read response body: {}", e))
            }
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            InfraError::invalid_response(endpoint, format!("Failed to parse JSON response: {}", e))
        })
    }
}

impl ProcessingBackend for ApiClient {
    async fn upload(&self, file: SelectedFile) -> Result<UploadResponse, InfraError> {
        self.upload_file(file).await
    }

    async fn process(&self, s3_key: &str) -> Result<ProcessResponse, InfraError> {
        self.process_key(s3_key).await
    }
}
