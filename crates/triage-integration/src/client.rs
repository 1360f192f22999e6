//! HTTP客户端接口
//!
//! 各组件只依赖 `HttpClient` trait，生产环境使用 reqwest 实现。

use async_trait::async_trait;
use tracing::debug;
use triage_core::{Result, TriageError};

/// API密钥请求头
pub const API_KEY_HEADER: &str = "x-api-key";

/// 已收到的HTTP响应（任意状态码）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP客户端接口
///
/// 只要收到响应就返回 `Ok`，无论状态码；没有收到响应时返回 `TriageError::Transport`。
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// 发送GET请求
    async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse>;

    /// 发送JSON请求体的POST请求
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<HttpResponse>;
}

/// 基于 reqwest 的HTTP客户端
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn add_headers(
        mut request: reqwest::RequestBuilder,
        headers: &[(&str, &str)],
    ) -> reqwest::RequestBuilder {
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        request
    }

    async fn execute(request: reqwest::RequestBuilder) -> Result<HttpResponse> {
        let response = request.send().await.map_err(|e| {
            debug!("HTTP request failed without a response: {}", e);
            TriageError::Transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TriageError::Transport(format!("Failed to read response body: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse> {
        let request = Self::add_headers(self.client.get(url).query(query), headers);
        Self::execute(request).await
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<HttpResponse> {
        let request = Self::add_headers(self.client.post(url).json(body), headers);
        Self::execute(request).await
    }
}
