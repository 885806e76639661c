//! 报表配置模块

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// API 密钥所在的环境变量
pub const API_KEY_ENV: &str = "MERAKI_API_KEY";

/// 回填天数上限：今天 + 昨天
pub const MAX_BACKFILL_DAYS: u32 = 2;

/// 配置文件格式
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Dashboard API 地址
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// 考勤库连接串（sqlite:// / postgres:// / mysql://）
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// 日志目录（不设置则输出到控制台）
    #[serde(default)]
    pub log_dir: Option<String>,

    /// 单次请求超时（秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// 分页接口每页条数
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// 回填天数（含今天），只能是 1 或 2
    #[serde(default = "default_backfill_days")]
    pub backfill_days: u32,
}

fn default_base_url() -> String {
    "https://api.meraki.com/api/v1".to_string()
}

fn default_database_url() -> String {
    "sqlite://data/meraki_reports.db".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_per_page() -> u32 {
    1000
}

fn default_backfill_days() -> u32 {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            database_url: default_database_url(),
            log_dir: None,
            request_timeout_secs: default_request_timeout(),
            per_page: default_per_page(),
            backfill_days: default_backfill_days(),
        }
    }
}

impl Config {
    /// 从文件加载配置，文件不存在时使用默认值
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path_ref)
            .with_context(|| format!("无法读取配置文件: {}", path_ref.display()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).with_context(|| "解析配置文件失败")?;
        config.validate()?;
        Ok(config)
    }

    /// 每个客户端每次最多写今天和昨天两行
    fn validate(&self) -> Result<()> {
        if !(1..=MAX_BACKFILL_DAYS).contains(&self.backfill_days) {
            return Err(anyhow!(
                "backfill_days 必须在 1..={} 之间，当前: {}",
                MAX_BACKFILL_DAYS,
                self.backfill_days
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// 读取 MERAKI_API_KEY，缺失或为空时失败
pub fn api_key_from_env() -> Result<String> {
    require_api_key(std::env::var(API_KEY_ENV).ok())
}

fn require_api_key(api_key: Option<String>) -> Result<String> {
    match api_key {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(anyhow!("环境变量 '{}' 未设置", API_KEY_ENV)),
    }
}

/// 运行时设置：文件配置 + 环境变量中的 API 密钥
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub config: Config,
}
