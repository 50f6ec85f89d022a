//! 响应信封解包
//!
//! 只关心“从成功响应里取出回答”，不接触状态机

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::config::ResponseFormat;
use crate::error::SearchError;

/// 回答字段缺失或为空时的展示文案
pub const NO_RESPONSE_FOUND: &str = "No response found";

/// 嵌套信封中承载回答的字段
const GENERATION_FIELD: &str = "generation";

/// 嵌套信封的外层字段
const BODY_FIELD: &str = "body";

/// 解包后的回答
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    /// 字段缺失、为 null 或为空字符串
    Empty,
}

impl Answer {
    /// 转为展示文本
    pub fn into_display_text(self) -> String {
        match self {
            Answer::Text(text) => text,
            Answer::Empty => NO_RESPONSE_FOUND.to_string(),
        }
    }
}

/// 解包成功响应
///
/// # 参数
/// - `format`: 响应格式
/// - `status`: HTTP 状态码（仅用于错误信息）
/// - `raw_body`: 原始响应文本
///
/// 顶层为 JSON 字符串时总会再解码一次，
/// 因此裸字符串回答（如 `"plain text"`）会得到 `MalformedEnvelope`
///
/// # 返回
/// 返回回答，解码失败时返回 `SearchError::MalformedEnvelope`
pub fn unwrap(
    format: &ResponseFormat,
    status: u16,
    raw_body: &str,
) -> Result<Answer, SearchError> {
    let payload: JsonValue = decode(status, raw_body)?;
    // 网关可能把整个输出再包一层字符串
    let payload = match payload {
        JsonValue::String(inner) => decode(status, &inner)?,
        other => other,
    };

    match format {
        ResponseFormat::Direct { field } => Ok(read_text_field(&payload, field)),
        ResponseFormat::Nested => {
            let body = payload.get(BODY_FIELD).ok_or_else(|| SearchError::MalformedEnvelope {
                status,
                detail: format!("missing '{}' field", BODY_FIELD),
            })?;

            let decoded = match body {
                JsonValue::String(encoded) => decode(status, encoded)?,
                JsonValue::Object(_) => body.clone(),
                other => {
                    return Err(SearchError::MalformedEnvelope {
                        status,
                        detail: format!("unexpected '{}' type: {}", BODY_FIELD, type_name(other)),
                    })
                }
            };

            Ok(read_text_field(&decoded, GENERATION_FIELD))
        }
    }
}

fn decode(status: u16, text: &str) -> Result<JsonValue, SearchError> {
    serde_json::from_str(text).map_err(|e| {
        debug!("响应解码失败: {}", e);
        SearchError::MalformedEnvelope {
            status,
            detail: e.to_string(),
        }
    })
}

/// 读取文本字段，缺失或假值视为空
fn read_text_field(value: &JsonValue, field: &str) -> Answer {
    match value.get(field) {
        Some(JsonValue::String(text)) if !text.is_empty() => Answer::Text(text.clone()),
        _ => Answer::Empty,
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
