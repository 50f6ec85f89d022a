/// 基于 reqwest 的 HTTP 传输
///
/// 负责发送请求，并把 reqwest 的各种结果归类成 `RawTransportResult`
use crate::clients::transport::{RawTransportResult, Transport};
use crate::config::Config;
use crate::models::OutboundRequest;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP 传输客户端
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// 创建新的 HTTP 传输客户端
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("无法创建 HTTP 客户端")?;
        Ok(Self { client })
    }

    /// 使用已有的 reqwest 客户端
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: OutboundRequest) -> RawTransportResult {
        debug!("发送请求: {} {}", request.method(), request.target());

        let builder = match request {
            OutboundRequest::Get { url } => self.client.get(url.as_str()),
            OutboundRequest::Post { url, body } => self.client.post(url.as_str()).json(&body),
        };

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return classify_error(e),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                // 状态行到了但 body 没读完，按无响应处理
                warn!("读取响应体失败 (状态码: {}): {}", status, e);
                return RawTransportResult::NetworkFailure {
                    detail: e.to_string(),
                };
            }
        };

        debug!("收到响应: 状态码 {}, body 长度 {}", status, body.len());

        if status.is_success() {
            RawTransportResult::Success {
                status: status.as_u16(),
                body,
            }
        } else {
            RawTransportResult::ServerFailure {
                status: status.as_u16(),
                body: Some(body),
            }
        }
    }
}

/// 把 reqwest 错误归类
///
/// 构建阶段的错误（非法 URL、body 序列化失败）说明请求没有发出
fn classify_error(err: reqwest::Error) -> RawTransportResult {
    if err.is_builder() {
        warn!("请求构建失败: {}", err);
        RawTransportResult::SetupFailure {
            message: err.to_string(),
        }
    } else {
        if err.is_timeout() {
            warn!("请求超时: {}", err);
        } else {
            warn!("请求未收到响应: {}", err);
        }
        RawTransportResult::NetworkFailure {
            detail: err.to_string(),
        }
    }
}
