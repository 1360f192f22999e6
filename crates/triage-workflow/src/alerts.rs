//! 告警分类
//!
//! 对全部患者做一次扫描，按评分结果分入三个告警列表。

use std::collections::HashSet;
use triage_core::{AlertResult, PatientRecord, Result, TriageError};

use crate::risk::RiskScorer;

/// 总风险分达到该值即为高风险
pub const HIGH_RISK_THRESHOLD: u8 = 4;

/// 体温分达到该值即为发热
pub const FEVER_THRESHOLD: u8 = 1;

/// 告警列表，保持首次触发时的扫描顺序
#[derive(Debug, Default)]
struct Bucket {
    ids: Vec<String>,
    seen: HashSet<String>,
}

impl Bucket {
    fn push(&mut self, id: &str) {
        if self.seen.insert(id.to_string()) {
            self.ids.push(id.to_string());
        }
    }
}

/// 告警分类器
#[derive(Debug, Clone, Default)]
pub struct AlertClassifier {
    scorer: RiskScorer,
}

impl AlertClassifier {
    pub fn new(scorer: RiskScorer) -> Self {
        Self { scorer }
    }

    /// 对患者列表评分并分类
    ///
    /// 单个患者的数据质量问题只会记录到告警列表中，不会返回错误；
    /// 标识为空的记录违反了患者标识不变量，整个分类失败。
    pub fn classify(&self, patients: &[PatientRecord]) -> Result<AlertResult> {
        let mut high_risk = Bucket::default();
        let mut fever = Bucket::default();
        let mut data_quality = Bucket::default();
        let mut scanned = HashSet::with_capacity(patients.len());

        for (index, patient) in patients.iter().enumerate() {
            let id = patient.patient_id.as_str();
            if id.trim().is_empty() {
                return Err(TriageError::Classification(format!(
                    "patient at position {} has an empty patient_id",
                    index
                )));
            }
            if !scanned.insert(id) {
                tracing::warn!("Duplicate patient_id {} at position {}", id, index);
            }

            let assessment = self.scorer.assess(patient);
            tracing::debug!(
                patient_id = id,
                blood_pressure = assessment.score.blood_pressure,
                temperature = assessment.score.temperature,
                age = assessment.score.age,
                total = assessment.total(),
                "Scored patient (BP: {:?}, TEMP: {:?}, AGE: {:?})",
                patient.blood_pressure,
                patient.temperature,
                patient.age
            );

            if assessment.total() >= HIGH_RISK_THRESHOLD {
                high_risk.push(id);
            }
            if assessment.score.temperature >= FEVER_THRESHOLD {
                fever.push(id);
            }
            if assessment.has_data_quality_issue() {
                for issue in &assessment.issues {
                    tracing::debug!("Data quality issue for {}: {}", id, issue);
                }
                data_quality.push(id);
            }
        }

        Ok(AlertResult {
            high_risk: high_risk.ids,
            fever: fever.ids,
            data_quality_issues: data_quality.ids,
        })
    }
}
