//! 分诊运行程序

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use triage_admin::{init_logging, TriageConfig};
use triage_integration::{Pipeline, ReqwestClient, RunOutcome};

/// 分诊命令行参数
#[derive(Parser, Debug)]
#[command(name = "triage-runner")]
#[command(about = "拉取全部患者记录，计算临床风险分类并提交评估结果")]
struct Args {
    /// 配置文件路径（环境变量优先）
    #[arg(short, long)]
    config: Option<String>,

    /// 详细模式：输出请求地址、原始响应和重试信息
    #[arg(short, long)]
    verbose: bool,

    /// 日志过滤规则，例如 "debug" 或 "triage_integration=trace"
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = TriageConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?
        .with_verbose(args.verbose);

    init_logging(config.verbose, args.log_level.as_deref())?;
    info!("Starting triage run against {}", config.api_url);

    let pipeline = Pipeline::new(Arc::new(ReqwestClient::new()), &config);

    match pipeline.run().await {
        Ok(RunOutcome::NoPatients) => {
            println!("No patients found");
            Ok(())
        }
        Ok(RunOutcome::Submitted { patient_count, response, .. }) => {
            info!("Assessment complete for {} patients", patient_count);
            println!("assessmentResults: {}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Ok(RunOutcome::Unclassified { patient_count, reason }) => {
            error!("Collected {} patients but classification failed", patient_count);
            anyhow::bail!("classification failed: {}", reason)
        }
        Err(e) => {
            error!("Triage run failed: {}", e);
            Err(e).context("Triage run failed")
        }
    }
}
