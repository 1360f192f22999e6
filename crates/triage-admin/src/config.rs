//! 配置管理
//!
//! 配置在进程启动时构建一次，之后以只读引用传入各组件，运行期间不再读取环境变量。
//! 来源优先级从低到高：内置默认值、配置文件、环境变量。

use config::{Config, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::info;
use triage_core::{Result, TriageError};

pub const DEFAULT_RETRY_DELAY_MS: i64 = 10_000;
pub const DEFAULT_RETRY_MAX: i64 = 30;
pub const DEFAULT_PAGING_DELAY_MS: i64 = 1_000;
pub const DEFAULT_PAGING_LIMIT: i64 = 20;

/// 分诊系统运行配置
#[derive(Clone, Deserialize)]
pub struct TriageConfig {
    /// 远程服务API密钥，通过 `x-api-key` 请求头发送
    pub api_key: String,
    /// 远程服务根地址
    pub api_url: String,
    /// 详细模式：输出每个请求地址、原始响应和重试信息
    #[serde(default)]
    pub verbose: bool,
    /// 重试间隔（毫秒）
    #[serde(rename = "retry_delay")]
    pub retry_delay_ms: u64,
    /// 首次请求之后的最大重试次数
    pub retry_max: u32,
    /// 翻页间隔（毫秒）
    #[serde(rename = "paging_delay")]
    pub paging_delay_ms: u64,
    /// 每页记录数
    pub paging_limit: u32,
}

impl TriageConfig {
    /// 从配置文件（可选）和进程环境变量加载配置
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        Self::load_from(config_path, None)
    }

    /// 加载配置；`env` 为 `Some` 时用给定的变量表代替进程环境变量
    pub fn load_from(
        config_path: Option<&str>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("verbose", false)
            .and_then(|b| b.set_default("retry_delay", DEFAULT_RETRY_DELAY_MS))
            .and_then(|b| b.set_default("retry_max", DEFAULT_RETRY_MAX))
            .and_then(|b| b.set_default("paging_delay", DEFAULT_PAGING_DELAY_MS))
            .and_then(|b| b.set_default("paging_limit", DEFAULT_PAGING_LIMIT))
            .map_err(|e| TriageError::Config(e.to_string()))?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path));
        }

        // API_KEY -> api_key, RETRY_DELAY -> retry_delay ...
        let settings = builder
            .add_source(Environment::default().try_parsing(true).source(env))
            .build()
            .map_err(|e| TriageError::Config(e.to_string()))?;

        let config: TriageConfig = settings
            .try_deserialize()
            .map_err(|e| TriageError::Config(format!("Failed to deserialize configuration: {}", e)))?;

        let config = config.normalized().validate()?;
        match config_path {
            Some(path) => info!("Configuration loaded from {} and environment", path),
            None => info!("Configuration loaded from environment"),
        }
        Ok(config)
    }

    fn normalized(mut self) -> Self {
        self.api_key = self.api_key.trim().to_string();
        self.api_url = self.api_url.trim().trim_end_matches('/').to_string();
        self
    }

    /// 校验配置
    pub fn validate(self) -> Result<Self> {
        if self.api_key.is_empty() {
            return Err(TriageError::Config("API_KEY cannot be empty".into()));
        }
        if self.api_url.is_empty() {
            return Err(TriageError::Config("API_URL cannot be empty".into()));
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(TriageError::Config(format!(
                "API_URL must be an http(s) URL: {}",
                self.api_url
            )));
        }
        if self.paging_limit == 0 {
            return Err(TriageError::Config("PAGING_LIMIT must be greater than 0".into()));
        }
        Ok(self)
    }

    /// 命令行 `--verbose` 只能打开详细模式
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose |= verbose;
        self
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn paging_delay(&self) -> Duration {
        Duration::from_millis(self.paging_delay_ms)
    }
}

// API密钥不输出到日志
impl fmt::Debug for TriageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriageConfig")
            .field("api_key", &"***")
            .field("api_url", &self.api_url)
            .field("verbose", &self.verbose)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("retry_max", &self.retry_max)
            .field("paging_delay_ms", &self.paging_delay_ms)
            .field("paging_limit", &self.paging_limit)
            .finish()
    }
}
