//! Chart 命令参数 - 从命令行构建图表附件

use anyhow::{anyhow, bail, Result};
use clap::{Args, ValueEnum};

use crate::template::{
    build_food_chart, build_graph_chart, Attachment, ChartValue, FoodChartType, GraphType, Series,
};

/// 图表类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    Bar,
    Line,
    Radar,
    Pie,
    #[value(alias = "donut")]
    Doughnut,
}

/// 图表所属家族
enum Family {
    Graph(GraphType),
    Food(FoodChartType),
}

impl ChartKind {
    fn family(self) -> Family {
        match self {
            ChartKind::Bar => Family::Graph(GraphType::Bar),
            ChartKind::Line => Family::Graph(GraphType::Line),
            ChartKind::Radar => Family::Graph(GraphType::Radar),
            ChartKind::Pie => Family::Food(FoodChartType::Pie),
            ChartKind::Doughnut => Family::Food(FoodChartType::Doughnut),
        }
    }
}

/// Chart 命令参数
#[derive(Debug, Args)]
pub struct ChartArgs {
    /// 图表类型
    #[arg(value_enum)]
    pub kind: ChartKind,

    /// 图表标题
    #[arg(long, short)]
    pub title: String,

    /// 逗号分隔的 labels，如 `Mon,Tue,Wed`
    #[arg(long, short)]
    pub labels: String,

    /// 逗号分隔的数值（pie / doughnut）
    #[arg(long, short)]
    pub values: Option<String>,

    /// 具名序列 `name=1,2,3`，可重复（bar / line / radar）
    #[arg(long, short)]
    pub series: Vec<String>,

    /// 附件颜色
    #[arg(long)]
    pub color: Option<String>,

    /// 消息文本
    #[arg(long)]
    pub text: Option<String>,
}

impl ChartArgs {
    /// 构建图表附件
    pub fn build(&self) -> Result<Attachment> {
        let labels = parse_list(&self.labels);
        let color = self.color.as_deref();

        let attachment = match self.kind.family() {
            Family::Graph(graph_type) => {
                if self.values.is_some() {
                    bail!("--values is only valid for pie and doughnut charts, use --series");
                }
                if self.series.is_empty() {
                    bail!("{} chart needs at least one --series", graph_type);
                }
                let series = self
                    .series
                    .iter()
                    .map(|raw| parse_series(raw))
                    .collect::<Result<Vec<_>>>()?;
                build_graph_chart(graph_type, &self.title, labels, series, color)?
            }
            Family::Food(chart_type) => {
                if !self.series.is_empty() {
                    bail!("--series is only valid for bar, line and radar charts, use --values");
                }
                let raw = self
                    .values
                    .as_deref()
                    .ok_or_else(|| anyhow!("{} chart needs --values", chart_type))?;
                build_food_chart(chart_type, &self.title, labels, parse_values(raw)?, color)?
            }
        };
        Ok(attachment)
    }
}

/// 拆分逗号分隔列表，去除空白
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// 解析数值列表，整数保持整数
pub fn parse_values(raw: &str) -> Result<Vec<ChartValue>> {
    parse_list(raw)
        .iter()
        .map(|item| parse_value(item))
        .collect()
}

fn parse_value(item: &str) -> Result<ChartValue> {
    if let Ok(n) = item.parse::<i64>() {
        return Ok(ChartValue::Integer(n));
    }
    item.parse::<f64>()
        .map(ChartValue::Float)
        .map_err(|_| anyhow!("Not a number: {}", item))
}

/// 解析 `name=1,2,3` 形式的序列
pub fn parse_series(raw: &str) -> Result<Series> {
    let (name, values) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Series must look like name=1,2,3: {}", raw))?;
    let name = name.trim();
    if name.is_empty() {
        bail!("Series name is empty: {}", raw);
    }
    Ok(Series {
        name: name.to_string(),
        values: parse_values(values)?,
    })
}
