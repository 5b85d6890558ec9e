//! Presence Sink Port - 前台指示器渲染抽象
//!
//! 宿主可见的状态面：合成进行时显示，空闲后隐藏。
//! 状态机本身在 application::presence，这里只定义渲染出口。

use thiserror::Error;

/// 指示器渲染错误
#[derive(Debug, Error)]
pub enum PresenceError {
    #[error("Host refused presence change: {0}")]
    HostRefused(String),
}

/// 指示器内容（标题 + 详情）
///
/// 每次更新都构造新值传给渲染端口，不复用可变构建器。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceCard {
    pub title: String,
    pub detail: String,
}

impl PresenceCard {
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// Presence Sink Port
pub trait PresenceSinkPort: Send + Sync {
    /// 显示指示器
    fn show(&self, card: &PresenceCard) -> Result<(), PresenceError>;

    /// 更新已显示的内容
    fn update(&self, card: &PresenceCard) -> Result<(), PresenceError>;

    /// 隐藏指示器
    fn hide(&self) -> Result<(), PresenceError>;
}
