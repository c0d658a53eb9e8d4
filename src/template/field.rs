//! Attachment 字段 - 附件中带标题的单个取值

use tracing::warn;

/// Field 的取值：字符串、整数、浮点或布尔
///
/// JSON 无法表示 NaN / 无穷大，非有限浮点输出为 `null`。
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl FieldValue {
    fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Text(s) => serde_json::Value::String(s.clone()),
            FieldValue::Integer(n) => serde_json::Value::from(*n),
            FieldValue::Float(f) => {
                if !f.is_finite() {
                    warn!(value = %f, "Non-finite field value serialized as null");
                }
                serde_json::Value::from(*f)
            }
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f64::from(f))
    }
}

macro_rules! impl_integer_field_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FieldValue {
                fn from(n: $t) -> Self {
                    FieldValue::Integer(i64::from(n))
                }
            }
        )*
    };
}

impl_integer_field_value!(i8, i16, i32, i64, u8, u16, u32);

/// Attachment 中的一个字段
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    title: String,
    value: FieldValue,
    short: bool,
}

impl Field {
    /// 创建字段，`short` 默认为 true
    pub fn new(title: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: true,
        }
    }

    /// 设置是否并排显示
    pub fn with_short(mut self, short: bool) -> Self {
        self.short = short;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn short(&self) -> bool {
        self.short
    }

    /// Slack payload 表示
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "title": self.title,
            "value": self.value.to_json(),
            "short": self.short
        })
    }
}
