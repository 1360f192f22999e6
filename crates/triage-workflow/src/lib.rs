//! # 分诊工作流模块
//!
//! 提供纯计算的临床风险处理功能，包括：
//! - 风险评分：按血压、体温、年龄三个风险因素独立评分，并校验数据质量
//! - 告警分类：将患者分入高风险、发热、数据质量问题三个告警列表

pub mod alerts;
pub mod risk;

// 重新导出主要类型
pub use alerts::{AlertClassifier, FEVER_THRESHOLD, HIGH_RISK_THRESHOLD};
pub use risk::{BloodPressure, RiskAssessment, RiskFactor, RiskScorer, ValidationIssue};
