//! 消息投递 - CLI 各命令共用的发送逻辑

use anyhow::Result;
use tracing::info;

use crate::client::{AsyncSlackClient, SendResult};
use crate::config::WebhookConfig;
use crate::template::Message;

/// 投递参数（全局 flag）
#[derive(Debug, Clone, Default)]
pub struct DeliveryOptions {
    /// 覆盖配置中的 webhook 地址
    pub webhook_url: Option<String>,
    /// 仅打印 payload
    pub dry_run: bool,
}

impl DeliveryOptions {
    /// 解析 webhook 配置：命令行优先，其次自动加载
    pub fn resolve_config(&self) -> Result<WebhookConfig> {
        match &self.webhook_url {
            Some(url) => Ok(WebhookConfig::new(url.clone())),
            None => WebhookConfig::auto_load(),
        }
    }
}

/// 发送消息，dry-run 时把 payload 打印到 stdout
pub async fn deliver(message: &Message, options: &DeliveryOptions) -> Result<SendResult> {
    if options.dry_run {
        println!("{}", serde_json::to_string_pretty(&message.to_payload())?);
        return Ok(SendResult::Skipped("dry run".to_string()));
    }

    let client = AsyncSlackClient::new(options.resolve_config()?)?;
    let result = client.send_message(message).await?;
    info!(attachments = message.attachments().len(), "Message sent");
    Ok(result)
}
