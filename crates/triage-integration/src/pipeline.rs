//! 分诊流水线
//!
//! 收集 -> 分类 -> 提交。收集为空时跳过分类和提交；
//! 分类失败记录日志并返回 `RunOutcome::Unclassified`，不提交任何结果；
//! 收集或提交失败作为错误返回。

use std::sync::Arc;
use tracing::{error, info};
use triage_admin::TriageConfig;
use triage_core::{AlertResult, Result};
use triage_workflow::{AlertClassifier, RiskScorer};

use crate::client::HttpClient;
use crate::collector::PatientCollector;
use crate::fetcher::PageFetcher;
use crate::submitter::AssessmentSubmitter;

/// 一次运行的结果
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    NoPatients,
    Submitted {
        patient_count: usize,
        alerts: AlertResult,
        response: serde_json::Value,
    },
    Unclassified {
        patient_count: usize,
        reason: String,
    },
}

/// 分诊流水线
pub struct Pipeline {
    collector: PatientCollector,
    classifier: AlertClassifier,
    submitter: AssessmentSubmitter,
}

impl Pipeline {
    pub fn new(client: Arc<dyn HttpClient>, config: &TriageConfig) -> Self {
        let fetcher = PageFetcher::new(client.clone(), config);
        Self {
            collector: PatientCollector::new(fetcher, config),
            classifier: AlertClassifier::new(RiskScorer::new()),
            submitter: AssessmentSubmitter::new(client, config),
        }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        let collection = self.collector.collect().await?;
        let patient_count = collection.patients.len();
        info!(
            "Total patients found: {} ({} pages)",
            patient_count, collection.pages_fetched
        );

        if patient_count == 0 {
            info!("No patients found");
            return Ok(RunOutcome::NoPatients);
        }

        let alerts = match self.classifier.classify(&collection.patients) {
            Ok(alerts) => alerts,
            Err(e) => {
                error!("Classification failed: {}", e);
                return Ok(RunOutcome::Unclassified {
                    patient_count,
                    reason: e.to_string(),
                });
            }
        };
        info!(
            "Alert list: {} high risk, {} fever, {} data quality issues",
            alerts.high_risk.len(),
            alerts.fever.len(),
            alerts.data_quality_issues.len()
        );

        let response = self.submitter.submit(&alerts).await?;
        info!("Assessment submitted");

        Ok(RunOutcome::Submitted {
            patient_count,
            alerts,
            response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ok, page_body, page_body_with, patient_json, test_config, Scripted, ScriptedClient};
    use serde_json::json;
    use triage_core::TriageError;

    fn pipeline(client: &Arc<ScriptedClient>) -> Pipeline {
        Pipeline::new(client.clone(), &test_config(1))
    }

    fn vitals(id: &str, age: serde_json::Value, temperature: serde_json::Value, bp: &str) -> serde_json::Value {
        let mut patient = patient_json(id);
        patient["age"] = age;
        patient["temperature"] = temperature;
        patient["blood_pressure"] = json!(bp);
        patient
    }

    #[tokio::test]
    async fn test_empty_collection_skips_submission() {
        let client = Arc::new(ScriptedClient::new(vec![ok(page_body(1, 0, 0, &[]))]));
        let outcome = pipeline(&client).run().await.unwrap();

        assert_eq!(outcome, RunOutcome::NoPatients);
        assert_eq!(client.count("POST"), 0);
    }

    #[tokio::test]
    async fn test_full_run_submits_alerts() {
        let reply = json!({ "success": true, "message": "Assessment submitted successfully" });
        let client = Arc::new(ScriptedClient::new(vec![
            ok(page_body_with(
                1,
                2,
                3,
                vec![
                    vitals("P-1", json!(45), json!(100.0), "135/85"),
                    vitals("P-2", json!(0), json!("abc"), "120/70"),
                ],
            )),
            ok(page_body_with(2, 2, 3, vec![vitals("P-3", json!("72"), json!(101.4), "150/95")])),
            Scripted::Respond(200, reply.to_string()),
        ]));

        let outcome = pipeline(&client).run().await.unwrap();
        match outcome {
            RunOutcome::Submitted { patient_count, alerts, response } => {
                assert_eq!(patient_count, 3);
                assert_eq!(alerts.high_risk, vec!["P-1", "P-3"]);
                assert_eq!(alerts.fever, vec!["P-1", "P-3"]);
                assert_eq!(alerts.data_quality_issues, vec!["P-2"]);
                assert_eq!(response, reply);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let post = client.requests().into_iter().find(|r| r.method == "POST").unwrap();
        assert_eq!(
            post.body,
            Some(json!({
                "high_risk_patients": ["P-1", "P-3"],
                "fever_patients": ["P-1", "P-3"],
                "data_quality_issues": ["P-2"]
            }))
        );
    }

    #[tokio::test]
    async fn test_classification_failure_is_not_submitted() {
        let client = Arc::new(ScriptedClient::new(vec![ok(page_body(1, 1, 1, &[""]))]));
        let outcome = pipeline(&client).run().await.unwrap();

        assert!(matches!(outcome, RunOutcome::Unclassified { patient_count: 1, .. }));
        assert_eq!(client.count("POST"), 0);
    }

    #[tokio::test]
    async fn test_collection_failure_is_an_error() {
        let client = Arc::new(ScriptedClient::always(Scripted::Respond(500, String::new())));
        let err = pipeline(&client).run().await.unwrap_err();

        assert!(matches!(err, TriageError::Collection { .. }));
        assert_eq!(client.count("GET"), 2);
        assert_eq!(client.count("POST"), 0);
    }

    #[tokio::test]
    async fn test_submission_failure_is_an_error() {
        let client = Arc::new(ScriptedClient::new(vec![
            ok(page_body(1, 1, 1, &["P-1"])),
            Scripted::Respond(401, "Invalid API key".into()),
        ]));
        let err = pipeline(&client).run().await.unwrap_err();

        assert!(matches!(err, TriageError::HttpStatus { status: 401, .. }));
        assert_eq!(client.count("POST"), 1);
    }
}
