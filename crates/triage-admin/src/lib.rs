//! # 分诊系统管理模块
//!
//! 提供启动期的系统管理功能：
//! - 配置管理：从默认值、配置文件、环境变量一次性构建不可变配置
//! - 日志初始化：按详细模式设置 tracing 过滤级别

pub mod config;
pub mod logging;

pub use config::TriageConfig;
pub use logging::{default_filter, init_logging};
