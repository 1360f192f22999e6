//! 响应格式校验
//!
//! 通过反序列化到强类型结构完成校验：必填字段、字段类型、性别取值都在这里检查。

use triage_core::{PatientPage, Result, TriageError};

/// 校验并解析患者分页响应
pub fn parse_patient_page(body: &str) -> Result<PatientPage> {
    serde_json::from_str(body).map_err(|e| TriageError::Schema(format!("Invalid API response: {}", e)))
}
