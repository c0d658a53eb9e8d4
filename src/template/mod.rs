//! 消息模板 - Slack webhook payload 的类型化表示
//!
//! # 使用示例
//! ```ignore
//! use slacktastic::template::{Message, pie_chart};
//!
//! let chart = pie_chart("Test data", ["Ride", "Reservation"], [22, 55], None)?;
//! let message = Message::builder()
//!     .text("This is a *test*")
//!     .attachment(chart)
//!     .build()?;
//! let payload = message.to_payload();
//! ```

pub mod attachment;
pub mod chart;
pub mod field;
pub mod message;

pub use attachment::{Attachment, AttachmentBuilder, DEFAULT_FORMATTING};
pub use chart::{
    bar_chart, build_food_chart, build_graph_chart, chart_spec, chart_url, donut_chart,
    line_chart, pie_chart, radar_chart, ChartData, ChartType, ChartValue, Dataset, FoodChartType,
    GraphType, Series, QUICKCHART_BASE_URL,
};
pub use field::{Field, FieldValue};
pub use message::{Message, MessageBuilder};
