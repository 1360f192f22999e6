//! 通用工具函数

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::{Number, Value};

/// 将接口中 "数字或字符串" 的字段规范化为字符串
///
/// 缺失或 `null` 得到空字符串，布尔值保留字面文本；数组和对象视为格式错误。
pub fn lenient_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_to_string(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// 整数值的浮点数不带小数部分输出 (45.0 -> "45")
pub fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        // f64 的 Display 对整数值不输出 ".0"
        n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
    }
}

/// serde 反序列化辅助函数，配合 `#[serde(deserialize_with = ...)]` 使用
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    lenient_string(&value)
        .ok_or_else(|| de::Error::custom(format!("expected string or number, found {}", value)))
}
