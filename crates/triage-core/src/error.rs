//! 错误定义模块

use crate::models::PatientRecord;
use thiserror::Error;

/// 分诊系统统一错误类型
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("配置错误: {0}")]
    Config(String),

    /// 没有HTTP状态码的传输层错误（连接失败、DNS、超时等）
    #[error("网络传输错误: {0}")]
    Transport(String),

    #[error("HTTP状态错误 {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("响应格式校验失败: {0}")]
    Schema(String),

    #[error("第 {page} 页重试耗尽 (共 {attempts} 次尝试): {last_error}")]
    RetriesExhausted {
        page: u32,
        attempts: u32,
        last_error: String,
    },

    /// 分页收集中断，`partial` 保存中断前已按顺序收集的患者
    #[error("患者数据收集中断 (已收集 {} 条): {source}", .partial.len())]
    Collection {
        partial: Vec<PatientRecord>,
        #[source]
        source: Box<TriageError>,
    },

    #[error("风险分类错误: {0}")]
    Classification(String),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TriageError {
    /// 该错误是否可以在分页请求内重试
    ///
    /// 只有收到了响应（HTTP错误状态）或响应体校验失败时才重试，
    /// 传输层错误立即向上传播。
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::HttpStatus { .. } | Self::Schema(_))
    }
}

/// 分诊系统统一结果类型
pub type Result<T> = std::result::Result<T, TriageError>;
