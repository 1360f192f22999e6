//! # 分诊集成模块
//!
//! 提供与远程患者评估服务的集成功能，包括：
//! - HTTP客户端接口，可注入不同实现（reqwest 或测试脚本）
//! - 响应格式校验
//! - 带重试的分页请求和全量患者收集
//! - 评估结果提交
//! - 收集、分类、提交的完整流水线

pub mod client;
pub mod collector;
pub mod fetcher;
pub mod pipeline;
pub mod schema;
pub mod submitter;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{HttpClient, HttpResponse, ReqwestClient, API_KEY_HEADER};
pub use collector::{PatientCollection, PatientCollector};
pub use fetcher::PageFetcher;
pub use pipeline::{Pipeline, RunOutcome};
pub use schema::parse_patient_page;
pub use submitter::AssessmentSubmitter;
