//! 传输层抽象
//!
//! 编排层只通过 `Transport` 发请求，测试里可以换成脚本化的实现

use async_trait::async_trait;

use crate::models::OutboundRequest;

/// 一次 HTTP 调用的原始结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTransportResult {
    /// 2xx 响应，body 为原始文本
    Success { status: u16, body: String },
    /// 非 2xx 响应
    ServerFailure { status: u16, body: Option<String> },
    /// 请求已发出但没有收到响应
    NetworkFailure { detail: String },
    /// 请求没能发出
    SetupFailure { message: String },
}

impl RawTransportResult {
    pub fn is_success(&self) -> bool {
        matches!(self, RawTransportResult::Success { .. })
    }
}

/// HTTP 传输能力
#[async_trait]
pub trait Transport: Send + Sync {
    /// 发送请求，所有失败都以 `RawTransportResult` 变体返回
    async fn send(&self, request: OutboundRequest) -> RawTransportResult;
}
