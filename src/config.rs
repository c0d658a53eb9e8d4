//! Webhook 配置
//!
//! 读取优先级：
//! 1. 配置文件 `~/.config/slacktastic/config.json`（字段 `webhook_url`，可选 `timeout_secs`）
//! 2. 环境变量 `SLACK_WEBHOOK_URL`（可选 `SLACK_TIMEOUT_SECS`）

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 默认超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// webhook 地址环境变量
pub const WEBHOOK_URL_ENV: &str = "SLACK_WEBHOOK_URL";

/// 超时环境变量
pub const TIMEOUT_ENV: &str = "SLACK_TIMEOUT_SECS";

/// Webhook 客户端配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// Slack Incoming Webhook URL
    pub webhook_url: String,
    /// 超时时间 (秒)
    pub timeout_secs: u64,
    /// 只记录 payload，不发送
    pub dry_run: bool,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            dry_run: false,
        }
    }
}

/// 配置文件格式
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    webhook_url: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

impl WebhookConfig {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// 默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/slacktastic/config.json"))
    }

    /// 按优先级自动加载配置
    pub fn auto_load() -> Result<Self> {
        Self::load_from_sources(
            Self::default_path().as_deref(),
            std::env::var(WEBHOOK_URL_ENV).ok(),
            std::env::var(TIMEOUT_ENV).ok(),
        )
    }

    /// 从指定 JSON 文件加载
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let file: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        let webhook_url = file
            .webhook_url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| anyhow!("`webhook_url` missing in {}", path.display()))?;

        Ok(Self {
            webhook_url,
            timeout_secs: file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            dry_run: false,
        })
    }

    fn load_from_sources(
        config_path: Option<&Path>,
        env_url: Option<String>,
        env_timeout: Option<String>,
    ) -> Result<Self> {
        // 1. 配置文件
        if let Some(path) = config_path {
            if path.exists() {
                match Self::load_from_path(path) {
                    Ok(config) => {
                        debug!(path = %path.display(), "Loaded webhook config from file");
                        return Ok(config);
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Ignoring invalid config file");
                    }
                }
            }
        }

        // 2. 环境变量
        if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
            let timeout_secs = match env_timeout {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("{} is not a number: {}", TIMEOUT_ENV, raw))?,
                None => DEFAULT_TIMEOUT_SECS,
            };
            debug!("Using {} from environment", WEBHOOK_URL_ENV);
            return Ok(Self {
                webhook_url: url,
                timeout_secs,
                dry_run: false,
            });
        }

        Err(anyhow!(
            "No Slack webhook URL found. Create ~/.config/slacktastic/config.json with webhook_url, \
             or set {} env var",
            WEBHOOK_URL_ENV
        ))
    }
}
