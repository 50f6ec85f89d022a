use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// 用户输入
///
/// 两个字段都视为不透明文本，这里不做任何解析
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryInput {
    /// 课程标识，可能为空、短代码或完整课程名
    pub course_identifier: String,
    /// 自然语言问题
    pub query_text: String,
}

impl QueryInput {
    pub fn new(course_identifier: impl Into<String>, query_text: impl Into<String>) -> Self {
        Self {
            course_identifier: course_identifier.into(),
            query_text: query_text.into(),
        }
    }

    /// 课程和问题是否都已填写
    pub fn is_complete(&self) -> bool {
        !self.course_identifier.trim().is_empty() && !self.query_text.trim().is_empty()
    }
}

/// 发往后端的请求
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundRequest {
    /// 参数已编码进 URL
    Get { url: String },
    /// JSON body
    Post { url: String, body: JsonValue },
}

impl OutboundRequest {
    /// HTTP 方法名
    pub fn method(&self) -> &'static str {
        match self {
            OutboundRequest::Get { .. } => "GET",
            OutboundRequest::Post { .. } => "POST",
        }
    }

    /// 目标 URL
    pub fn target(&self) -> &str {
        match self {
            OutboundRequest::Get { url } | OutboundRequest::Post { url, .. } => url,
        }
    }

    /// 请求体（仅 POST）
    pub fn body(&self) -> Option<&JsonValue> {
        match self {
            OutboundRequest::Get { .. } => None,
            OutboundRequest::Post { body, .. } => Some(body),
        }
    }
}
