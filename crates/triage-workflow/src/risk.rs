//! 风险评分
//!
//! 对单个患者记录计算血压、体温、年龄三项风险分。每项先校验，
//! 校验失败的项得 0 分并记为数据质量问题，其余项照常评分。

use std::fmt;
use triage_core::{PatientRecord, RiskScore};

/// 风险因素
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskFactor {
    BloodPressure,
    Temperature,
    Age,
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskFactor::BloodPressure => write!(f, "blood_pressure"),
            RiskFactor::Temperature => write!(f, "temperature"),
            RiskFactor::Age => write!(f, "age"),
        }
    }
}

/// 单个字段的校验失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub factor: RiskFactor,
    pub raw_value: String,
}

impl ValidationIssue {
    fn new(factor: RiskFactor, raw_value: &str) -> Self {
        Self {
            factor,
            raw_value: raw_value.to_string(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {:?}", self.factor, self.raw_value)
    }
}

/// 已校验的血压读数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloodPressure {
    pub systolic: i64,
    pub diastolic: i64,
}

/// 校验血压：必须恰好是 "收缩压/舒张压" 两段，且两者都是大于 0 的整数
pub fn parse_blood_pressure(raw: &str) -> Result<BloodPressure, ValidationIssue> {
    let invalid = || ValidationIssue::new(RiskFactor::BloodPressure, raw);

    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() != 2 {
        return Err(invalid());
    }

    let systolic = parse_positive_int(parts[0]).ok_or_else(invalid)?;
    let diastolic = parse_positive_int(parts[1]).ok_or_else(invalid)?;

    Ok(BloodPressure { systolic, diastolic })
}

/// 校验体温：必须是大于 0 的有限数值
pub fn parse_temperature(raw: &str) -> Result<f64, ValidationIssue> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(ValidationIssue::new(RiskFactor::Temperature, raw)),
    }
}

/// 校验年龄：必须是大于 0 的整数
///
/// 整段必须是整数，"45.5"、"45岁" 这类只有前缀是数字的输入视为无效。
pub fn parse_age(raw: &str) -> Result<i64, ValidationIssue> {
    parse_positive_int(raw).ok_or_else(|| ValidationIssue::new(RiskFactor::Age, raw))
}

fn parse_positive_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|value| *value > 0)
}

/// 血压评分 (0..=3)
///
/// 规则按顺序判断，后匹配的规则覆盖先匹配的；都不匹配时保持 0。
pub fn score_blood_pressure(bp: BloodPressure) -> u8 {
    let BloodPressure { systolic: s, diastolic: d } = bp;
    let mut score = 0;

    if s < 120 && d < 80 {
        score = 0;
    }
    if (120..=129).contains(&s) && d < 80 {
        score = 1;
    }
    if (130..=139).contains(&s) || (80..=89).contains(&d) {
        score = 2;
    }
    if s >= 140 || d >= 90 {
        score = 3;
    }

    score
}

/// 体温评分 (0..=2)
///
/// 99.5~99.6 与 100.9~101 之间的读数不落入任何区间，得 0 分。
pub fn score_temperature(temperature: f64) -> u8 {
    if temperature <= 99.5 {
        0
    } else if (99.6..=100.9).contains(&temperature) {
        1
    } else if temperature >= 101.0 {
        2
    } else {
        0
    }
}

/// 年龄评分 (0..=2)
pub fn score_age(age: i64) -> u8 {
    if age < 40 {
        0
    } else if age <= 65 {
        1
    } else {
        2
    }
}

/// 单个患者的评分结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskAssessment {
    pub score: RiskScore,
    pub issues: Vec<ValidationIssue>,
}

impl RiskAssessment {
    /// 至少一个风险因素校验失败
    pub fn has_data_quality_issue(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn total(&self) -> u8 {
        self.score.total()
    }
}

/// 风险评分器
#[derive(Debug, Clone, Default)]
pub struct RiskScorer;

impl RiskScorer {
    pub fn new() -> Self {
        Self
    }

    /// 计算单个患者的风险评分和数据质量标记
    pub fn assess(&self, patient: &PatientRecord) -> RiskAssessment {
        let mut assessment = RiskAssessment::default();

        match parse_blood_pressure(&patient.blood_pressure) {
            Ok(bp) => assessment.score.blood_pressure = score_blood_pressure(bp),
            Err(issue) => assessment.issues.push(issue),
        }

        match parse_temperature(&patient.temperature) {
            Ok(temperature) => assessment.score.temperature = score_temperature(temperature),
            Err(issue) => assessment.issues.push(issue),
        }

        match parse_age(&patient.age) {
            Ok(age) => assessment.score.age = score_age(age),
            Err(issue) => assessment.issues.push(issue),
        }

        assessment
    }
}
