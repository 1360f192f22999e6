//! 测试用的脚本化HTTP客户端和响应构造函数

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;
use triage_admin::TriageConfig;
use triage_core::{Result, TriageError};

use crate::client::{HttpClient, HttpResponse};

/// 预设的一次应答
#[derive(Debug, Clone)]
pub enum Scripted {
    Respond(u16, String),
    Disconnect,
}

/// 记录的请求
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

/// 按顺序返回预设应答的客户端，队列耗尽后重复 `fallback`
#[derive(Debug, Default)]
pub struct ScriptedClient {
    script: Mutex<VecDeque<Scripted>>,
    fallback: Option<Scripted>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedClient {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Default::default()
        }
    }

    pub fn always(reply: Scripted) -> Self {
        Self {
            fallback: Some(reply),
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.requests().iter().filter(|r| r.method == method).count()
    }

    fn next_reply(&self, request: RecordedRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .or_else(|| self.fallback.clone())
            .expect("script exhausted");

        match reply {
            Scripted::Respond(status, body) => Ok(HttpResponse::new(status, body)),
            Scripted::Disconnect => Err(TriageError::Transport("connection reset by peer".into())),
        }
    }
}

fn owned_headers(headers: &[(&str, &str)]) -> Vec<(String, String)> {
    headers.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[async_trait]
impl HttpClient for ScriptedClient {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse> {
        self.next_reply(RecordedRequest {
            method: "GET",
            url: url.to_string(),
            query: query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
            headers: owned_headers(headers),
            body: None,
        })
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<HttpResponse> {
        self.next_reply(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            query: Vec::new(),
            headers: owned_headers(headers),
            body: Some(body.clone()),
        })
    }
}

/// 零延迟的测试配置
pub fn test_config(retry_max: u32) -> TriageConfig {
    TriageConfig {
        api_key: "ak_test".to_string(),
        api_url: "http://assessment.test".to_string(),
        verbose: true,
        retry_delay_ms: 0,
        retry_max,
        paging_delay_ms: 0,
        paging_limit: 2,
    }
}

/// 患者对象，生命体征取正常值
pub fn patient_json(id: &str) -> serde_json::Value {
    json!({
        "patient_id": id,
        "name": format!("TestPatient, {}", id),
        "age": 30,
        "gender": "M",
        "blood_pressure": "110/70",
        "temperature": 98.6,
        "visit_date": "2024-01-15",
        "diagnosis": "Routine",
        "medications": "None"
    })
}

/// 构造一页响应体
pub fn page_body_with(page: u32, total_pages: u32, total: u64, data: Vec<serde_json::Value>) -> String {
    json!({
        "data": data,
        "pagination": {
            "page": page,
            "limit": 2,
            "total": total,
            "totalPages": total_pages,
            "hasNext": page < total_pages,
            "hasPrevious": page > 1
        },
        "metadata": {
            "timestamp": "2024-01-15T10:00:00Z",
            "version": "v1.0",
            "requestId": format!("req-{}", page)
        }
    })
    .to_string()
}

pub fn page_body(page: u32, total_pages: u32, total: u64, ids: &[&str]) -> String {
    page_body_with(page, total_pages, total, ids.iter().map(|id| patient_json(id)).collect())
}

pub fn ok(body: String) -> Scripted {
    Scripted::Respond(200, body)
}

/// 收集日志输出的缓冲区
#[derive(Debug, Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// 在当前线程安装按 `filter` 过滤、写入缓冲区的订阅者，守卫释放前有效
pub fn capture_logs(filter: &str) -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}
