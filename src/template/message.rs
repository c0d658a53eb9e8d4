//! 顶层消息：文本 + 有序的 attachments

use serde::{Serialize, Serializer};

use super::attachment::Attachment;
use crate::error::TemplateError;

/// Slack webhook 消息
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    text: Option<String>,
    attachments: Vec<Attachment>,
}

impl Message {
    /// 创建消息，text 与 attachments 至少一个非空
    pub fn new(text: Option<String>, attachments: Vec<Attachment>) -> Result<Self, TemplateError> {
        let has_text = text.as_deref().is_some_and(|t| !t.is_empty());
        if !has_text && attachments.is_empty() {
            return Err(TemplateError::InvalidMessage);
        }
        Ok(Self { text, attachments })
    }

    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Slack payload 表示
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "text": self.text,
            "attachments": self
                .attachments
                .iter()
                .map(Attachment::to_payload)
                .collect::<Vec<_>>()
        })
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}

/// Message 构建器
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    text: Option<String>,
    attachments: Vec<Attachment>,
}

impl MessageBuilder {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// 追加一个 attachment
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// 整体替换 attachments
    pub fn attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn build(self) -> Result<Message, TemplateError> {
        Message::new(self.text, self.attachments)
    }
}
