//! 评估结果提交
//!
//! 单次POST，不重试；传输错误和HTTP错误状态原样返回给调用方。

use std::sync::Arc;
use tracing::debug;
use triage_admin::TriageConfig;
use triage_core::{AlertResult, AssessmentSubmission, Result, TriageError};

use crate::client::{HttpClient, API_KEY_HEADER};

/// 评估结果提交器
pub struct AssessmentSubmitter {
    client: Arc<dyn HttpClient>,
    base_url: String,
    api_key: String,
}

impl AssessmentSubmitter {
    pub fn new(client: Arc<dyn HttpClient>, config: &TriageConfig) -> Self {
        Self {
            client,
            base_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// 提交告警列表，返回远程服务的JSON响应
    pub async fn submit(&self, alerts: &AlertResult) -> Result<serde_json::Value> {
        let url = format!("{}/submit-assessment", self.base_url);
        let body = serde_json::to_value(AssessmentSubmission::from(alerts))?;

        debug!("Submitting assessment to {}: {}", url, body);
        let response = self
            .client
            .post_json(&url, &[(API_KEY_HEADER, self.api_key.as_str())], &body)
            .await?;
        debug!("Response: {}", response.body);

        if !response.is_success() {
            return Err(TriageError::HttpStatus {
                status: response.status,
                body: response.body,
            });
        }

        if response.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}
