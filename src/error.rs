use thiserror::Error;

use crate::config::ErrorReporting;

/// 通用失败时的展示文案
pub const GENERIC_FAILURE_TEXT: &str = "An error occurred while searching. Please try again.";

/// 网络无响应时的展示文案
pub const NO_RESPONSE_TEXT: &str = "No response received. Please check your network.";

/// 服务端未返回 body 时的占位文案
pub const UNKNOWN_ERROR_BODY: &str = "Unknown error";

/// 一次查询提交过程中可能出现的错误
///
/// 所有错误都会在编排层被消化成展示文案，不会继续向 UI 传播
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// 请求已完成，但服务端返回了非 2xx 状态码
    #[error("服务端返回错误 (状态码: {status}): {body:?}")]
    ServerError { status: u16, body: Option<String> },

    /// 请求已发出，但没有收到响应（网络、超时、DNS）
    #[error("未收到响应: {detail}")]
    NoResponse { detail: String },

    /// 请求根本没能发出
    #[error("请求构建失败: {message}")]
    RequestSetup { message: String },

    /// 响应信封无法解码
    #[error("响应信封解码失败 (状态码: {status}): {detail}")]
    MalformedEnvelope { status: u16, detail: String },
}

impl SearchError {
    /// 错误类别名称（仅用于日志）
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::ServerError { .. } => "ServerError",
            SearchError::NoResponse { .. } => "NoResponse",
            SearchError::RequestSetup { .. } => "RequestSetupError",
            SearchError::MalformedEnvelope { .. } => "MalformedEnvelope",
        }
    }

    /// 生成展示给用户的文案
    ///
    /// # 参数
    /// - `mode`: 错误展示模式，`Generic` 模式下所有错误共用同一句话
    ///
    /// # 返回
    /// 返回最终写入 `display_text` 的字符串
    pub fn display_text(&self, mode: ErrorReporting) -> String {
        if mode == ErrorReporting::Generic {
            return GENERIC_FAILURE_TEXT.to_string();
        }

        match self {
            SearchError::ServerError { status, body } => {
                let body = body
                    .as_deref()
                    .filter(|b| !b.is_empty())
                    .unwrap_or(UNKNOWN_ERROR_BODY);
                format!("Server Error: {} - {}", status, body)
            }
            SearchError::NoResponse { .. } => NO_RESPONSE_TEXT.to_string(),
            SearchError::RequestSetup { message } => format!("Error: {}", message),
            // 解码失败按服务端错误处理
            SearchError::MalformedEnvelope { status, detail } => {
                format!("Server Error: {} - Malformed response: {}", status, detail)
            }
        }
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("TOML解析失败: {0}")]
    TomlParseFailed(#[from] toml::de::Error),

    /// 配置值不合法
    #[error("配置项 {field} 不合法: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// 配置结果类型
pub type ConfigResult<T> = Result<T, ConfigError>;
