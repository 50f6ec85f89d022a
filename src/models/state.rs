use chrono::{DateTime, Local};

/// 提交状态机所处阶段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// 尚未提交过
    #[default]
    Idle,
    /// 有请求在途
    Loading,
    /// 最近一次提交已结束（成功或失败）
    Settled,
}

/// UI 可观察的状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub query_text: String,
    pub course_identifier: String,
    /// 回答或错误提示
    pub display_text: String,
    /// 仅在请求在途时为 true，提交按钮据此禁用
    pub is_loading: bool,
    pub phase: Phase,
    /// 当前生效的提交序号，0 表示尚未提交
    pub active_seq: u64,
    pub last_settled_at: Option<DateTime<Local>>,
}

impl UiState {
    /// 提交按钮是否可用
    pub fn can_submit(&self) -> bool {
        !self.is_loading
    }

    /// 进入 Loading，保留上一次的展示文本
    pub(crate) fn begin(&mut self, seq: u64, course_identifier: &str, query_text: &str) {
        self.course_identifier = course_identifier.to_string();
        self.query_text = query_text.to_string();
        self.is_loading = true;
        self.phase = Phase::Loading;
        self.active_seq = seq;
    }

    pub(crate) fn settle(&mut self, display_text: String) {
        self.display_text = display_text;
        self.is_loading = false;
        self.phase = Phase::Settled;
        self.last_settled_at = Some(Local::now());
    }
}
