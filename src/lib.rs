//! Slacktastic - 通过 Slack Incoming Webhook 发送统计消息与图表

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod template;

pub use client::{AsyncSlackClient, SendResult, SlackClient};
pub use config::WebhookConfig;
pub use error::TemplateError;
pub use template::{
    bar_chart, build_food_chart, build_graph_chart, donut_chart, line_chart, pie_chart,
    radar_chart, Attachment, AttachmentBuilder, ChartData, ChartValue, Field, FieldValue,
    FoodChartType, GraphType, Message, MessageBuilder, Series,
};
