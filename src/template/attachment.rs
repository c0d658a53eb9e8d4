//! Slack attachment 模板
//!
//! Attachment 通过 [`AttachmentBuilder`] 一次性构建，构建后不可变。
//! title、text、fields 至少需要一个非空，否则构建失败。

use chrono::{DateTime, Utc};

use super::field::Field;
use crate::error::TemplateError;

/// 默认的文本格式
pub const DEFAULT_FORMATTING: &str = "mrkdwn";

/// 富文本附件
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    title: Option<String>,
    title_link: Option<String>,
    pretext: Option<String>,
    text: Option<String>,
    footer: Option<String>,
    footer_icon: Option<String>,
    color: Option<String>,
    fields: Vec<Field>,
    formatting: String,
    image_url: Option<String>,
    thumb_url: Option<String>,
    date_time: Option<DateTime<Utc>>,
}

impl Attachment {
    pub fn builder() -> AttachmentBuilder {
        AttachmentBuilder::new()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn title_link(&self) -> Option<&str> {
        self.title_link.as_deref()
    }

    pub fn pretext(&self) -> Option<&str> {
        self.pretext.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }

    pub fn footer_icon(&self) -> Option<&str> {
        self.footer_icon.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn formatting(&self) -> &str {
        &self.formatting
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn thumb_url(&self) -> Option<&str> {
        self.thumb_url.as_deref()
    }

    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        self.date_time
    }

    /// Unix 时间戳（秒，保留小数部分）
    fn ts(&self) -> Option<f64> {
        self.date_time.map(|dt| {
            dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) / 1_000_000_000.0
        })
    }

    /// Slack payload 表示
    ///
    /// 未设置的可选字段输出为 `null`，fields 保持传入顺序。
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "title": self.title,
            "title_link": self.title_link,
            "pretext": self.pretext,
            "text": self.text,
            "footer": self.footer,
            "footer_icon": self.footer_icon,
            "image_url": self.image_url,
            "thumb_url": self.thumb_url,
            "ts": self.ts(),
            "color": self.color,
            "fields": self.fields.iter().map(Field::to_payload).collect::<Vec<_>>(),
            "type": self.formatting
        })
    }
}

/// Attachment 构建器
#[derive(Debug, Clone)]
pub struct AttachmentBuilder {
    title: Option<String>,
    title_link: Option<String>,
    pretext: Option<String>,
    text: Option<String>,
    footer: Option<String>,
    footer_icon: Option<String>,
    color: Option<String>,
    fields: Vec<Field>,
    formatting: String,
    image_url: Option<String>,
    thumb_url: Option<String>,
    date_time: Option<DateTime<Utc>>,
}

impl AttachmentBuilder {
    pub fn new() -> Self {
        Self {
            title: None,
            title_link: None,
            pretext: None,
            text: None,
            footer: None,
            footer_icon: None,
            color: None,
            fields: Vec::new(),
            formatting: DEFAULT_FORMATTING.to_string(),
            image_url: None,
            thumb_url: None,
            date_time: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn title_link(mut self, link: impl Into<String>) -> Self {
        self.title_link = Some(link.into());
        self
    }

    pub fn pretext(mut self, pretext: impl Into<String>) -> Self {
        self.pretext = Some(pretext.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn footer_icon(mut self, icon: impl Into<String>) -> Self {
        self.footer_icon = Some(icon.into());
        self
    }

    /// 颜色，如 `good`、`warning`、`#36a64f`
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// 可选颜色，`None` 时保持未设置
    pub fn maybe_color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }

    /// 追加一个字段
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// 整体替换字段列表
    pub fn fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    pub fn formatting(mut self, formatting: impl Into<String>) -> Self {
        self.formatting = formatting.into();
        self
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn thumb_url(mut self, url: impl Into<String>) -> Self {
        self.thumb_url = Some(url.into());
        self
    }

    pub fn date_time(mut self, date_time: DateTime<Utc>) -> Self {
        self.date_time = Some(date_time);
        self
    }

    /// 校验并构建
    ///
    /// 空字符串与 `None` 同样视为缺失。
    pub fn build(self) -> Result<Attachment, TemplateError> {
        let has_title = self.title.as_deref().is_some_and(|t| !t.is_empty());
        let has_text = self.text.as_deref().is_some_and(|t| !t.is_empty());
        if !has_title && !has_text && self.fields.is_empty() {
            return Err(TemplateError::InvalidAttachment);
        }

        Ok(Attachment {
            title: self.title,
            title_link: self.title_link,
            pretext: self.pretext,
            text: self.text,
            footer: self.footer,
            footer_icon: self.footer_icon,
            color: self.color,
            fields: self.fields,
            formatting: self.formatting,
            image_url: self.image_url,
            thumb_url: self.thumb_url,
            date_time: self.date_time,
        })
    }
}

impl Default for AttachmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_attachment_requires_content() {
        let result = Attachment::builder().color("good").footer("bot").build();
        assert_eq!(result.unwrap_err(), TemplateError::InvalidAttachment);
    }

    #[test]
    fn test_attachment_empty_strings_are_absent() {
        let result = Attachment::builder().title("").text("").build();
        assert_eq!(result.unwrap_err(), TemplateError::InvalidAttachment);
    }

    #[test]
    fn test_attachment_any_single_content_is_enough() {
        assert!(Attachment::builder().title("t").build().is_ok());
        assert!(Attachment::builder().text("t").build().is_ok());
        assert!(Attachment::builder()
            .field(Field::new("k", "v"))
            .build()
            .is_ok());
    }

    #[test]
    fn test_attachment_payload_keys() {
        let attachment = Attachment::builder().title("Report").build().unwrap();
        let payload = attachment.to_payload();
        let obj = payload.as_object().unwrap();

        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "color", "fields", "footer", "footer_icon", "image_url", "pretext", "text",
                "thumb_url", "title", "title_link", "ts", "type",
            ]
        );
        assert_eq!(payload["title"], "Report");
        assert!(payload["text"].is_null());
        assert!(payload["ts"].is_null());
        assert_eq!(payload["type"], DEFAULT_FORMATTING);
        assert_eq!(payload["fields"], serde_json::json!([]));
    }

    #[test]
    fn test_attachment_ts_from_date_time() {
        let dt = Utc.with_ymd_and_hms(2019, 7, 15, 12, 0, 0).unwrap();
        let attachment = Attachment::builder().text("x").date_time(dt).build().unwrap();
        assert_eq!(attachment.to_payload()["ts"], 1_563_192_000.0);
    }

    #[test]
    fn test_attachment_fields_keep_order() {
        let attachment = Attachment::builder()
            .field(Field::new("first", 1))
            .field(Field::new("second", 2))
            .field(Field::new("third", 3))
            .build()
            .unwrap();

        let payload = attachment.to_payload();
        let titles: Vec<&str> = payload["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_attachment_custom_formatting() {
        let attachment = Attachment::builder()
            .text("plain")
            .formatting("plain_text")
            .build()
            .unwrap();
        assert_eq!(attachment.to_payload()["type"], "plain_text");
    }
}
