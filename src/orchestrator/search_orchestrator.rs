//! 查询提交编排器 - 编排层
//!
//! ## 职责
//!
//! 1. **状态机**：Idle → Loading → Settled，新的提交重新进入 Loading
//! 2. **请求构建**：委托 `RequestBuilder`
//! 3. **传输调用**：通过注入的 `Transport` 发送
//! 4. **结果归类**：委托 `OutcomeResolver`，所有错误都落地为展示文本
//! 5. **过期结果抑制**：每次提交分配递增序号，只有最新序号的结果能写入状态

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::clients::{HttpTransport, Transport};
use crate::config::Config;
use crate::error::GENERIC_FAILURE_TEXT;
use crate::models::{CourseCatalog, QueryInput, UiState};
use crate::services::{OutcomeResolver, RequestBuilder};
use crate::utils::logging::truncate_text;

/// 必填项缺失时给用户的提示
pub const MISSING_FIELDS_ALERT: &str = "Please enter a course ID and your question.";

/// 单次提交的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 结果已写入状态
    Applied { seq: u64, display_text: String },
    /// 期间有更新的提交，本次结果被丢弃
    Superseded { seq: u64 },
    /// 必填项缺失，未发出请求
    Rejected { message: String },
}

struct Inner {
    builder: RequestBuilder,
    resolver: OutcomeResolver,
    transport: Arc<dyn Transport>,
    catalog: CourseCatalog,
    require_fields: bool,
    next_seq: AtomicU64,
    state: watch::Sender<UiState>,
}

impl Inner {
    /// 进入 Loading 并分配序号
    ///
    /// 序号分配和状态写入在同一把锁里完成
    fn begin(&self, input: &QueryInput) -> u64 {
        let mut seq = 0;
        self.state.send_modify(|state| {
            seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
            state.begin(seq, &input.course_identifier, &input.query_text);
        });
        seq
    }

    /// 只有最新的提交才能结束 Loading
    ///
    /// # 返回
    /// 返回结果是否被写入
    fn settle(&self, seq: u64, display_text: String) -> bool {
        self.state.send_if_modified(|state| {
            if state.active_seq != seq {
                return false;
            }
            state.settle(display_text);
            true
        })
    }
}

/// 提交中途被丢弃（任务取消或传输层 panic）时兜底结束 Loading
struct SettleGuard<'a> {
    inner: &'a Inner,
    seq: u64,
    armed: bool,
}

impl SettleGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for SettleGuard<'_> {
    fn drop(&mut self) {
        if self.armed && self.inner.settle(self.seq, GENERIC_FAILURE_TEXT.to_string()) {
            warn!("[提交 #{}] ⚠️ 提交被中断，已结束加载状态", self.seq);
        }
    }
}

/// 查询提交编排器
///
/// 可以廉价 clone，多个 clone 共享同一份状态
#[derive(Clone)]
pub struct SearchOrchestrator {
    inner: Arc<Inner>,
}

impl SearchOrchestrator {
    /// 使用注入的传输层创建编排器
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> Self {
        let (state, _) = watch::channel(UiState::default());
        Self {
            inner: Arc::new(Inner {
                builder: RequestBuilder::new(config),
                resolver: OutcomeResolver::new(
                    config.response_format.clone(),
                    config.error_reporting,
                ),
                transport,
                catalog: CourseCatalog::default(),
                require_fields: config.require_fields,
                next_seq: AtomicU64::new(0),
                state,
            }),
        }
    }

    /// 使用 reqwest 传输层创建编排器
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    /// 替换课程目录
    ///
    /// 只能在 clone 之前调用
    pub fn with_catalog(self, catalog: CourseCatalog) -> Self {
        match Arc::try_unwrap(self.inner) {
            Ok(mut inner) => {
                inner.catalog = catalog;
                Self {
                    inner: Arc::new(inner),
                }
            }
            Err(inner) => {
                warn!("编排器已被共享，忽略课程目录替换");
                Self { inner }
            }
        }
    }

    pub fn catalog(&self) -> &CourseCatalog {
        &self.inner.catalog
    }

    /// 订阅状态变化
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.inner.state.subscribe()
    }

    /// 当前状态快照
    pub fn snapshot(&self) -> UiState {
        self.inner.state.borrow().clone()
    }

    /// 用户修改课程选择
    pub fn set_course_identifier(&self, course_identifier: impl Into<String>) {
        let course_identifier = course_identifier.into();
        self.inner
            .state
            .send_modify(|state| state.course_identifier = course_identifier);
    }

    /// 用户修改问题文本
    pub fn set_query_text(&self, query_text: impl Into<String>) {
        let query_text = query_text.into();
        self.inner
            .state
            .send_modify(|state| state.query_text = query_text);
    }

    /// 使用当前输入提交
    pub async fn submit_current(&self) -> SubmitOutcome {
        let (course, query) = {
            let state = self.inner.state.borrow();
            (state.course_identifier.clone(), state.query_text.clone())
        };
        self.submit(&course, &query).await
    }

    /// 提交查询
    ///
    /// 所有失败都在这里消化成展示文本，不会向调用方返回错误
    ///
    /// # 参数
    /// - `course_identifier`: 课程标识
    /// - `query_text`: 问题文本
    ///
    /// # 返回
    /// 返回本次提交是否生效
    pub async fn submit(&self, course_identifier: &str, query_text: &str) -> SubmitOutcome {
        let inner = &*self.inner;
        let input = QueryInput::new(course_identifier, query_text);

        if inner.require_fields && !input.is_complete() {
            warn!("⚠️ 课程或问题为空，未提交");
            return SubmitOutcome::Rejected {
                message: MISSING_FIELDS_ALERT.to_string(),
            };
        }

        let seq = inner.begin(&input);
        let guard = SettleGuard {
            inner,
            seq,
            armed: true,
        };

        let course_label = inner
            .catalog
            .label(&input.course_identifier)
            .unwrap_or(&input.course_identifier);
        info!(
            "[提交 #{}] 🔍 课程: {} | 问题: {}",
            seq,
            course_label,
            truncate_text(&input.query_text, 80)
        );

        let request = inner.builder.build(&input);
        let result = inner.transport.send(request).await;
        let (display_text, error) = inner.resolver.resolve(result);

        match &error {
            Some(e) => warn!("[提交 #{}] ❌ {}: {}", seq, e.kind(), e),
            None => debug!(
                "[提交 #{}] 回答: {}",
                seq,
                truncate_text(&display_text, 80)
            ),
        }

        guard.disarm();
        if inner.settle(seq, display_text.clone()) {
            info!("[提交 #{}] ✓ 已完成", seq);
            SubmitOutcome::Applied { seq, display_text }
        } else {
            info!("[提交 #{}] 已有更新的提交，丢弃本次结果", seq);
            SubmitOutcome::Superseded { seq }
        }
    }

    /// 在后台任务中提交
    pub fn spawn_submit(
        &self,
        course_identifier: impl Into<String>,
        query_text: impl Into<String>,
    ) -> JoinHandle<SubmitOutcome> {
        let this = self.clone();
        let course_identifier = course_identifier.into();
        let query_text = query_text.into();
        tokio::spawn(async move { this.submit(&course_identifier, &query_text).await })
    }
}
