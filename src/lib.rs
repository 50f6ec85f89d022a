//! # Course Search
//!
//! 课程问答搜索客户端：选择课程、输入问题、提交到远程问答服务并展示回答
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - `QueryInput`、`OutboundRequest`、`UiState`、`CourseCatalog`
//!
//! ### ② 传输层（Clients）
//! - `clients/` - `Transport` 抽象和基于 reqwest 的 `HttpTransport`
//! - `RawTransportResult` - 成功 / 服务端错误 / 无响应 / 请求未发出
//!
//! ### ③ 业务能力层（Services）
//! - `RequestBuilder` - 输入 → 请求（GET 查询串或 POST JSON）
//! - `envelope` - 响应信封解包（直接字段或嵌套 JSON 字符串）
//! - `OutcomeResolver` - 结果归类并生成展示文本
//!
//! ### ④ 编排层（Orchestration）
//! - `SearchOrchestrator` - 状态机、序号守卫、状态发布
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use clients::{HttpTransport, RawTransportResult, Transport};
pub use config::{BodyCourseField, Config, ErrorReporting, RequestEncoding, ResponseFormat};
pub use error::{ConfigError, SearchError};
pub use models::{CourseCatalog, OutboundRequest, Phase, QueryInput, UiState};
pub use orchestrator::{SearchOrchestrator, SubmitOutcome};
pub use services::{OutcomeResolver, RequestBuilder};
