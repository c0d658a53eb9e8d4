//! 图表附件 - 通过 quickchart.io 渲染图表图片
//!
//! 图表本身就是一个 [`Attachment`]：调用方只提供标题、颜色和数据，
//! `image_url` / `thumb_url` 由数据编码成 quickchart.io 的请求地址。
//!
//! 两类数据形状：
//! - Graph（bar / line / radar）：labels + 多个具名序列，每个序列长度必须等于 labels 长度
//! - Food chart（pie / doughnut）：labels + 单个数值列表，长度必须一致
//!
//! quickchart 接收的 `c` 参数不是标准 JSON，而是如下形式的文本：
//! ```text
//! {type: 'pie',data: {'labels': ['Ride', 'Reservation'], 'datasets': [{'data': [22, 55]}]}}
//! ```
//! 外层 key 不带引号，内层使用单引号字面量。此格式需逐字节保持一致。

use std::collections::HashSet;
use std::fmt::Write as _;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::attachment::Attachment;
use crate::error::TemplateError;

/// quickchart.io 图表接口
pub const QUICKCHART_BASE_URL: &str = "https://quickchart.io/chart";

/// 除字母数字与 `_.-~/` 外全部转义
const CHART_SPEC_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

mod sealed {
    pub trait Sealed {}
}

/// 固定的图表类型标签，仅由 [`GraphType`] 与 [`FoodChartType`] 实现
pub trait ChartType: sealed::Sealed + Copy {
    fn tag(&self) -> &'static str;
}

/// Graph 家族图表类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphType {
    Bar,
    Line,
    Radar,
}

impl GraphType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphType::Bar => "bar",
            GraphType::Line => "line",
            GraphType::Radar => "radar",
        }
    }
}

impl sealed::Sealed for GraphType {}

impl ChartType for GraphType {
    fn tag(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for GraphType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Food chart 家族图表类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodChartType {
    Pie,
    Doughnut,
}

impl FoodChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodChartType::Pie => "pie",
            FoodChartType::Doughnut => "doughnut",
        }
    }
}

impl sealed::Sealed for FoodChartType {}

impl ChartType for FoodChartType {
    fn tag(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for FoodChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 图表数值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartValue {
    Integer(i64),
    Float(f64),
}

impl From<f64> for ChartValue {
    fn from(f: f64) -> Self {
        ChartValue::Float(f)
    }
}

impl From<f32> for ChartValue {
    fn from(f: f32) -> Self {
        ChartValue::Float(f64::from(f))
    }
}

macro_rules! impl_integer_chart_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ChartValue {
                fn from(n: $t) -> Self {
                    ChartValue::Integer(i64::from(n))
                }
            }
        )*
    };
}

impl_integer_chart_value!(i8, i16, i32, i64, u8, u16, u32);

/// 具名数据序列（Graph 家族）
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<ChartValue>,
}

impl Series {
    pub fn new<V: Into<ChartValue>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// 单个 dataset；food chart 没有 label
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub(crate) label: Option<String>,
    pub(crate) data: Vec<ChartValue>,
}

impl Dataset {
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn data(&self) -> &[ChartValue] {
        &self.data
    }
}

/// 规范化后的图表数据 `{labels, datasets}`
///
/// 只能通过 [`ChartData::from_series`] / [`ChartData::from_values`] 构建，保证已校验。
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub(crate) labels: Vec<String>,
    pub(crate) datasets: Vec<Dataset>,
}

impl ChartData {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    /// 校验并整理 Graph 家族数据，每个序列对应一个 dataset，保持序列顺序
    pub fn from_series(labels: Vec<String>, series: Vec<Series>) -> Result<Self, TemplateError> {
        validate_series(&labels, &series)?;
        let datasets = series
            .into_iter()
            .map(|s| Dataset {
                label: Some(s.name),
                data: s.values,
            })
            .collect();
        Ok(Self { labels, datasets })
    }

    /// 校验并整理 food chart 数据，只有一个无 label 的 dataset
    pub fn from_values(labels: Vec<String>, values: Vec<ChartValue>) -> Result<Self, TemplateError> {
        validate_values(&labels, &values)?;
        Ok(Self {
            labels,
            datasets: vec![Dataset {
                label: None,
                data: values,
            }],
        })
    }

    fn write_literal(&self, out: &mut String) {
        out.push_str("{'labels': [");
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_str_literal(out, label);
        }
        out.push_str("], 'datasets': [");
        for (i, dataset) in self.datasets.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            dataset.write_literal(out);
        }
        out.push_str("]}");
    }
}

impl Dataset {
    // key 顺序固定为 data, label
    fn write_literal(&self, out: &mut String) {
        out.push_str("{'data': [");
        for (i, value) in self.data.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_number_literal(out, *value);
        }
        out.push(']');
        if let Some(label) = &self.label {
            out.push_str(", 'label': ");
            write_str_literal(out, label);
        }
        out.push('}');
    }
}

fn validate_series(labels: &[String], series: &[Series]) -> Result<(), TemplateError> {
    let mut seen = HashSet::new();
    for s in series {
        if !seen.insert(s.name.as_str()) {
            return Err(TemplateError::InvalidChartData(format!(
                "Duplicate series \"{}\"",
                s.name
            )));
        }
        if s.values.len() != labels.len() {
            return Err(TemplateError::InvalidChartData(format!(
                "Labels and values not the same size for \"{}\"",
                s.name
            )));
        }
    }
    Ok(())
}

fn validate_values(labels: &[String], values: &[ChartValue]) -> Result<(), TemplateError> {
    if labels.len() != values.len() {
        return Err(TemplateError::InvalidChartData(
            "Labels and values not the same size".to_string(),
        ));
    }
    Ok(())
}

/// 字符串字面量：默认单引号，仅当包含 `'` 且不含 `"` 时改用双引号
fn write_str_literal(out: &mut String, s: &str) {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if !is_printable(c) => {
                let code = c as u32;
                let _ = if code < 0x100 {
                    write!(out, "\\x{:02x}", code)
                } else if code < 0x10000 {
                    write!(out, "\\u{:04x}", code)
                } else {
                    write!(out, "\\U{:08x}", code)
                };
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

/// 与 `str.isprintable` 一致：控制字符、格式字符、分隔符（空格除外）、
/// 私用区和非字符需要转义。未分配码位按可打印处理。
fn is_printable(c: char) -> bool {
    let code = c as u32;
    !matches!(
        code,
        0x00..=0x1f
            | 0x7f..=0xa0
            | 0xad
            | 0x600..=0x605
            | 0x61c
            | 0x6dd
            | 0x70f
            | 0x890..=0x891
            | 0x8e2
            | 0x1680
            | 0x180e
            | 0x2000..=0x200f
            | 0x2028..=0x202f
            | 0x205f..=0x206f
            | 0x3000
            | 0xe000..=0xf8ff
            | 0xfeff
            | 0xfff9..=0xfffb
            | 0xfffe..=0xffff
            | 0x110bd
            | 0x110cd
            | 0x13430..=0x1343f
            | 0x1bca0..=0x1bca3
            | 0x1d173..=0x1d17a
            | 0xe0001
            | 0xe0020..=0xe007f
            | 0xf0000..=0x10ffff
    ) && (code & 0xfffe) != 0xfffe
}

fn write_number_literal(out: &mut String, value: ChartValue) {
    match value {
        ChartValue::Integer(n) => {
            let _ = write!(out, "{}", n);
        }
        ChartValue::Float(f) => out.push_str(&float_literal(f)),
    }
}

/// 浮点字面量：整数值保留 `.0`，极大/极小值使用 `1e+16` / `1.5e-07` 形式
fn float_literal(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let abs = f.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let formatted = format!("{:e}", f);
        return match formatted.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(d) => ('-', d),
                    None => ('+', exp),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => formatted,
        };
    }

    let formatted = f.to_string();
    if formatted.contains('.') {
        formatted
    } else {
        format!("{}.0", formatted)
    }
}

/// 渲染 quickchart 的图表描述文本
pub fn chart_spec(chart_type: impl ChartType, data: &ChartData) -> String {
    let mut out = String::new();
    out.push_str("{type: ");
    write_str_literal(&mut out, chart_type.tag());
    out.push_str(",data: ");
    data.write_literal(&mut out);
    out.push('}');
    out
}

/// 计算图表图片地址
pub fn chart_url(chart_type: impl ChartType, data: &ChartData) -> String {
    let spec = chart_spec(chart_type, data);
    format!(
        "{}?c={}",
        QUICKCHART_BASE_URL,
        utf8_percent_encode(&spec, CHART_SPEC_ESCAPE)
    )
}

fn build_chart_attachment(
    chart_type: impl ChartType,
    title: String,
    data: &ChartData,
    color: Option<&str>,
) -> Result<Attachment, TemplateError> {
    let url = chart_url(chart_type, data);
    Attachment::builder()
        .title(title)
        .maybe_color(color.map(str::to_string))
        .image_url(url.clone())
        .thumb_url(url)
        .build()
}

fn collect_labels<L: Into<String>>(labels: impl IntoIterator<Item = L>) -> Vec<String> {
    labels.into_iter().map(Into::into).collect()
}

/// 构建 Graph 家族图表（bar / line / radar）
pub fn build_graph_chart<L: Into<String>>(
    graph_type: GraphType,
    title: impl Into<String>,
    labels: impl IntoIterator<Item = L>,
    series: Vec<Series>,
    color: Option<&str>,
) -> Result<Attachment, TemplateError> {
    let data = ChartData::from_series(collect_labels(labels), series)?;
    build_chart_attachment(graph_type, title.into(), &data, color)
}

/// 构建 food chart 家族图表（pie / doughnut）
pub fn build_food_chart<L: Into<String>, V: Into<ChartValue>>(
    chart_type: FoodChartType,
    title: impl Into<String>,
    labels: impl IntoIterator<Item = L>,
    values: impl IntoIterator<Item = V>,
    color: Option<&str>,
) -> Result<Attachment, TemplateError> {
    let values = values.into_iter().map(Into::into).collect();
    let data = ChartData::from_values(collect_labels(labels), values)?;
    build_chart_attachment(chart_type, title.into(), &data, color)
}

pub fn bar_chart<L: Into<String>>(
    title: impl Into<String>,
    labels: impl IntoIterator<Item = L>,
    series: Vec<Series>,
    color: Option<&str>,
) -> Result<Attachment, TemplateError> {
    build_graph_chart(GraphType::Bar, title, labels, series, color)
}

pub fn line_chart<L: Into<String>>(
    title: impl Into<String>,
    labels: impl IntoIterator<Item = L>,
    series: Vec<Series>,
    color: Option<&str>,
) -> Result<Attachment, TemplateError> {
    build_graph_chart(GraphType::Line, title, labels, series, color)
}

pub fn radar_chart<L: Into<String>>(
    title: impl Into<String>,
    labels: impl IntoIterator<Item = L>,
    series: Vec<Series>,
    color: Option<&str>,
) -> Result<Attachment, TemplateError> {
    build_graph_chart(GraphType::Radar, title, labels, series, color)
}

pub fn pie_chart<L: Into<String>, V: Into<ChartValue>>(
    title: impl Into<String>,
    labels: impl IntoIterator<Item = L>,
    values: impl IntoIterator<Item = V>,
    color: Option<&str>,
) -> Result<Attachment, TemplateError> {
    build_food_chart(FoodChartType::Pie, title, labels, values, color)
}

pub fn donut_chart<L: Into<String>, V: Into<ChartValue>>(
    title: impl Into<String>,
    labels: impl IntoIterator<Item = L>,
    values: impl IntoIterator<Item = V>,
    color: Option<&str>,
) -> Result<Attachment, TemplateError> {
    build_food_chart(FoodChartType::Doughnut, title, labels, values, color)
}
