//! 请求构建服务 - 业务能力层
//!
//! 把用户输入变成发往后端的请求，只依赖静态配置，不修改输入

use serde_json::{json, Map, Value as JsonValue};
use url::form_urlencoded;

use crate::config::{BodyCourseField, Config, RequestEncoding};
use crate::models::{OutboundRequest, QueryInput};

/// 请求构建器
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    endpoint: String,
    encoding: RequestEncoding,
}

impl RequestBuilder {
    pub fn new(config: &Config) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            encoding: config.encoding.clone(),
        }
    }

    /// 构建请求
    ///
    /// 空字符串原样编码，默认课程由后端决定
    ///
    /// # 参数
    /// - `input`: 用户输入
    ///
    /// # 返回
    /// 返回 GET 或 POST 请求，取决于配置的编码方式
    pub fn build(&self, input: &QueryInput) -> OutboundRequest {
        match &self.encoding {
            RequestEncoding::QueryString { course_param } => {
                let separator = if self.endpoint.contains('?') { '&' } else { '?' };
                let url = format!(
                    "{}{}query={}&{}={}",
                    self.endpoint,
                    separator,
                    encode_component(&input.query_text),
                    encode_component(course_param),
                    encode_component(&input.course_identifier),
                );
                OutboundRequest::Get { url }
            }
            RequestEncoding::JsonBody { course_field } => {
                let mut body = Map::new();
                body.insert("query".to_string(), json!(input.query_text));
                match course_field {
                    BodyCourseField::FixedCourseId { value } => {
                        body.insert("course_id".to_string(), json!(value));
                    }
                    BodyCourseField::CourseName => {
                        body.insert("course_name".to_string(), json!(input.course_identifier));
                    }
                }
                OutboundRequest::Post {
                    url: self.endpoint.clone(),
                    body: JsonValue::Object(body),
                }
            }
        }
    }
}

/// 百分号编码单个参数值（UTF-8，空格编码为 %20）
pub fn encode_component(value: &str) -> String {
    // form_urlencoded 会把字面量 '+' 编码成 %2B，这里剩下的 '+' 都是空格
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
