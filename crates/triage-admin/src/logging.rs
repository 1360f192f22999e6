//! 日志初始化
//!
//! 详细模式下本系统各模块输出 debug 级别日志（请求地址、原始响应、重试），
//! 否则只输出 info 级别的最终结果。`RUST_LOG` 或显式指定的过滤规则优先。

use tracing_subscriber::EnvFilter;
use triage_core::{Result, TriageError};

const WORKSPACE_TARGETS: [&str; 5] = [
    "triage_core",
    "triage_workflow",
    "triage_integration",
    "triage_admin",
    "triage_runner",
];

/// 根据详细模式生成默认过滤规则
pub fn default_filter(verbose: bool) -> String {
    if !verbose {
        return "info".to_string();
    }

    let mut directives = vec!["info".to_string()];
    directives.extend(WORKSPACE_TARGETS.iter().map(|target| format!("{}=debug", target)));
    directives.join(",")
}

/// 初始化全局 tracing 订阅者
pub fn init_logging(verbose: bool, log_level: Option<&str>) -> Result<()> {
    let filter = match log_level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| TriageError::Config(format!("Invalid log filter '{}': {}", level, e)))?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose))),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| TriageError::Config(format!("Failed to initialize logging: {}", e)))
}
