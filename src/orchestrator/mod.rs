//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层持有 UI 状态，驱动一次查询从提交到结束的完整生命周期。
//!
//! ## 层次关系
//!
//! ```text
//! UI 事件 (submit)
//!     ↓
//! orchestrator::SearchOrchestrator (状态机 + 序号守卫)
//!     ↓
//! services::RequestBuilder → clients::Transport → services::OutcomeResolver
//!     ↓
//! watch::Sender<UiState> (UI 订阅)
//! ```
//!
//! ## 设计原则
//!
//! 1. **唯一写者**：只有编排器写 `UiState`
//! 2. **必定落地**：每次生效的提交都以 Settled 结束，错误不外泄
//! 3. **最新优先**：展示结果对应最后发起的提交，而不是最后返回的

pub mod search_orchestrator;

pub use search_orchestrator::{SearchOrchestrator, SubmitOutcome, MISSING_FIELDS_ALERT};
