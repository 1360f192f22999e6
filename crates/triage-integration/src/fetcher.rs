//! 分页请求
//!
//! 单页请求带有限次数的固定间隔重试：
//! - 收到HTTP错误状态或响应格式校验失败时重试
//! - 没有收到响应的传输层错误立即返回，不重试
//! - 重试耗尽返回 `TriageError::RetriesExhausted`
//!
//! 每次尝试的失败只在 debug 级别输出，最终结果由调用方报告。

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use triage_admin::TriageConfig;
use triage_core::{PatientPage, Result, TriageError};

use crate::client::{HttpClient, API_KEY_HEADER};
use crate::schema::parse_patient_page;

/// 分页请求器
pub struct PageFetcher {
    client: Arc<dyn HttpClient>,
    base_url: String,
    api_key: String,
    limit: u32,
    retry_delay: Duration,
    retry_max: u32,
}

impl PageFetcher {
    pub fn new(client: Arc<dyn HttpClient>, config: &TriageConfig) -> Self {
        Self {
            client,
            base_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            limit: config.paging_limit,
            retry_delay: config.retry_delay(),
            retry_max: config.retry_max,
        }
    }

    /// 请求地址（含查询参数），仅用于日志
    pub fn page_url(&self, page: u32) -> String {
        format!("{}/patients?page={}&limit={}", self.base_url, page, self.limit)
    }

    /// 请求并校验指定页，最多尝试 `retry_max + 1` 次
    pub async fn fetch_page(&self, page: u32) -> Result<PatientPage> {
        let url = format!("{}/patients", self.base_url);
        let query = [("page", page.to_string()), ("limit", self.limit.to_string())];
        let headers = [(API_KEY_HEADER, self.api_key.as_str())];

        let mut last_error = String::new();
        for attempt in 0..=self.retry_max {
            if attempt > 0 {
                debug!("Retry attempt {} / {}", attempt, self.retry_max);
            }
            debug!("Fetching url {}", self.page_url(page));

            match self.try_fetch(&url, &query, &headers).await {
                Ok(patient_page) => return Ok(patient_page),
                Err(e) if e.is_retryable() => {
                    debug!("Page {} attempt {} failed: {}", page, attempt + 1, e);
                    last_error = e.to_string();
                }
                Err(e) => return Err(e),
            }

            if attempt < self.retry_max {
                debug!("Retrying in {} ms", self.retry_delay.as_millis());
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        Err(TriageError::RetriesExhausted {
            page,
            attempts: self.retry_max + 1,
            last_error,
        })
    }

    async fn try_fetch(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: &[(&str, &str)],
    ) -> Result<PatientPage> {
        let response = self.client.get(url, query, headers).await?;
        debug!("Response: {}", response.body);

        if !response.is_success() {
            return Err(TriageError::HttpStatus {
                status: response.status,
                body: response.body,
            });
        }

        parse_patient_page(&response.body)
    }
}
