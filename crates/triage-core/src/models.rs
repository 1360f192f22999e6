//! 核心数据模型定义

use crate::utils::deserialize_lenient_string;
use serde::{Deserialize, Serialize};

/// 性别枚举，远程服务只接受 "M" / "F"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

/// 患者健康记录
///
/// `age`、`blood_pressure`、`temperature` 在接口中可能是数字也可能是字符串，
/// 统一规范化为字符串，由评分模块负责解析和校验。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub age: String,
    pub gender: Gender,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub blood_pressure: String, // "收缩压/舒张压"
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub temperature: String,
    pub visit_date: String,
    pub diagnosis: String,
    pub medications: String,
}

/// 分页信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Pagination {
    /// `hasNext` 是否与页码一致 (hasNext ⇔ page < totalPages)
    pub fn is_consistent(&self) -> bool {
        self.has_next == (self.page < self.total_pages)
    }
}

/// 请求元数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub timestamp: String,
    pub version: String,
    pub request_id: String,
}

/// 单页患者数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientPage {
    pub data: Vec<PatientRecord>,
    pub pagination: Pagination,
    pub metadata: ResponseMetadata,
}

/// 风险评分
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    pub blood_pressure: u8, // 0..=3
    pub temperature: u8,    // 0..=2
    pub age: u8,            // 0..=2
}

impl RiskScore {
    /// 总风险分 (0..=7)
    pub fn total(&self) -> u8 {
        self.blood_pressure + self.temperature + self.age
    }
}

/// 告警分类结果，各列表保持扫描顺序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertResult {
    pub high_risk: Vec<String>,
    pub fever: Vec<String>,
    pub data_quality_issues: Vec<String>,
}

/// 提交给远程服务的评估结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub high_risk_patients: Vec<String>,
    pub fever_patients: Vec<String>,
    pub data_quality_issues: Vec<String>,
}

impl From<&AlertResult> for AssessmentSubmission {
    fn from(alerts: &AlertResult) -> Self {
        Self {
            high_risk_patients: alerts.high_risk.clone(),
            fever_patients: alerts.fever.clone(),
            data_quality_issues: alerts.data_quality_issues.clone(),
        }
    }
}
