//! 结果归类服务 - 业务能力层
//!
//! 传输结果 → 回答或错误 → 展示文本

use crate::clients::RawTransportResult;
use crate::config::{ErrorReporting, ResponseFormat};
use crate::error::SearchError;
use crate::services::envelope::{self, Answer};

/// 把传输结果归类为回答或恰好一种错误
pub fn classify(
    format: &ResponseFormat,
    result: RawTransportResult,
) -> Result<Answer, SearchError> {
    match result {
        RawTransportResult::Success { status, body } => envelope::unwrap(format, status, &body),
        RawTransportResult::ServerFailure { status, body } => {
            Err(SearchError::ServerError { status, body })
        }
        RawTransportResult::NetworkFailure { detail } => Err(SearchError::NoResponse { detail }),
        RawTransportResult::SetupFailure { message } => Err(SearchError::RequestSetup { message }),
    }
}

/// 结果解析器
#[derive(Debug, Clone)]
pub struct OutcomeResolver {
    format: ResponseFormat,
    reporting: ErrorReporting,
}

impl OutcomeResolver {
    pub fn new(format: ResponseFormat, reporting: ErrorReporting) -> Self {
        Self { format, reporting }
    }

    /// 解析出最终展示文本，同时返回错误（如有）供日志使用
    pub fn resolve(&self, result: RawTransportResult) -> (String, Option<SearchError>) {
        match classify(&self.format, result) {
            Ok(answer) => (answer.into_display_text(), None),
            Err(err) => (err.display_text(self.reporting), Some(err)),
        }
    }
}
