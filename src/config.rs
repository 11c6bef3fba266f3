//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::BondError;
use crate::models::{OnError, SortKey};
use crate::services::treasury::common::{DEFAULT_USER_AGENT, TREASURY_SBC_PRICE_URL};

/// 估值服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// 估值服务地址
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// 报表配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// 债券列表文件路径
    #[serde(default = "default_bonds_file")]
    pub bonds_file: String,
    /// 排序方式: input, serial, issue_date, value
    #[serde(default)]
    pub sort_by: SortKey,
    /// 单只债券失败时: abort, skip
    #[serde(default)]
    pub on_error: OnError,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 估值服务配置
    #[serde(default)]
    pub service: ServiceConfig,
    /// 报表配置
    #[serde(default)]
    pub report: ReportConfig,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

// 默认值函数
fn default_endpoint() -> String { TREASURY_SBC_PRICE_URL.to_string() }
fn default_timeout() -> u64 { 30 }
fn default_connect_timeout() -> u64 { 10 }
fn default_user_agent() -> String { DEFAULT_USER_AGENT.to_string() }
fn default_bonds_file() -> String { "bonds.json".to_string() }
fn default_log_level() -> String { "info".to_string() }

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            bonds_file: default_bonds_file(),
            sort_by: SortKey::default(),
            on_error: OnError::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 查找配置文件，依次尝试 config.json、config/config.json
    pub fn find_file() -> Option<&'static str> {
        let config_paths = ["config.json", "config/config.json"];
        config_paths.into_iter().find(|path| Path::new(path).exists())
    }

    /// 加载配置，存在配置文件时从文件读取，否则使用默认值
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                Self::from_file(path).with_context(|| format!("加载配置文件 {} 失败", path))
            }
            None => Ok(Self::default()),
        }
    }

    /// 校验估值服务地址为 http(s) 绝对地址
    pub fn validate(&self) -> Result<(), BondError> {
        let endpoint = url::Url::parse(&self.service.endpoint).map_err(|e| {
            BondError::Config(format!("无效的服务地址 {}: {}", self.service.endpoint, e))
        })?;

        match endpoint.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BondError::Config(format!("不支持的协议: {}", scheme))),
        }
    }
}
