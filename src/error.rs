//! 模板校验错误
//!
//! 所有校验都在构建时执行，失败时不会产生半成品对象。

use thiserror::Error;

/// 构建 Message / Attachment / 图表时的校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// title、text、fields 全部为空
    #[error("Either `title`, `text` or `fields` required")]
    InvalidAttachment,

    /// labels 与数据长度不一致
    #[error("Invalid chart data: {0}")]
    InvalidChartData(String),

    /// text 与 attachments 全部为空
    #[error("Either `text` or `attachments` required")]
    InvalidMessage,
}
