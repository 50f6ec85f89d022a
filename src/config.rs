use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};

/// 默认查询端点
pub const DEFAULT_ENDPOINT: &str =
    "https://your-api-id.execute-api.us-east-1.amazonaws.com/prod/query";

/// 请求编码方式
///
/// 同一部署只启用一种
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestEncoding {
    /// `GET {endpoint}?query=<enc>&<course_param>=<enc>`
    QueryString {
        #[serde(default = "default_course_param")]
        course_param: String,
    },
    /// `POST {endpoint}`，JSON body 中携带 query 和课程字段
    JsonBody { course_field: BodyCourseField },
}

impl Default for RequestEncoding {
    fn default() -> Self {
        RequestEncoding::QueryString {
            course_param: default_course_param(),
        }
    }
}

fn default_course_param() -> String {
    "course".to_string()
}

/// POST body 中的课程字段
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyCourseField {
    /// `course_id` 固定为配置值，忽略用户输入
    FixedCourseId { value: String },
    /// `course_name` 取自用户输入
    CourseName,
}

/// 响应格式
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// `{ "<field>": "..." }`
    Direct {
        #[serde(default = "default_answer_field")]
        field: String,
    },
    /// `{ "body": "<JSON 字符串>" }`，解码后读取 `generation`
    Nested,
}

impl Default for ResponseFormat {
    fn default() -> Self {
        ResponseFormat::Direct {
            field: default_answer_field(),
        }
    }
}

fn default_answer_field() -> String {
    "response".to_string()
}

/// 错误展示模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReporting {
    /// 区分 ServerError / NoResponse / RequestSetupError
    #[default]
    Detailed,
    /// 所有失败显示同一句话
    Generic,
}

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 查询端点
    pub endpoint: String,
    /// 请求编码方式
    pub encoding: RequestEncoding,
    /// 响应格式
    pub response_format: ResponseFormat,
    /// 错误展示模式
    pub error_reporting: ErrorReporting,
    /// 提交前是否要求课程和问题都非空
    pub require_fields: bool,
    /// 请求超时（秒），不设置时使用 HTTP 客户端默认行为
    pub request_timeout_secs: Option<u64>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            encoding: RequestEncoding::default(),
            response_format: ResponseFormat::default(),
            error_reporting: ErrorReporting::default(),
            require_fields: false,
            request_timeout_secs: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 使用环境变量覆盖默认配置
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            endpoint: std::env::var("SEARCH_ENDPOINT").unwrap_or(default.endpoint),
            request_timeout_secs: std::env::var("SEARCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .or(default.request_timeout_secs),
            require_fields: std::env::var("SEARCH_REQUIRE_FIELDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.require_fields),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
            ..default
        }
    }

    /// 从 TOML 字符串加载配置，未出现的字段使用默认值
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件加载配置
    pub fn from_toml_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// 校验配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "endpoint",
                reason: "不能为空".to_string(),
            });
        }

        if let RequestEncoding::JsonBody {
            course_field: BodyCourseField::FixedCourseId { value },
        } = &self.encoding
        {
            if value.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "encoding.course_field.value",
                    reason: "固定课程ID不能为空".to_string(),
                });
            }
        }

        if let RequestEncoding::QueryString { course_param } = &self.encoding {
            if course_param.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "encoding.course_param",
                    reason: "参数名不能为空".to_string(),
                });
            }
        }

        Ok(())
    }
}
