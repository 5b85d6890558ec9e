//! Presence Adapter - 日志指示器 Sink
//!
//! 无头服务的宿主状态面：指示器转换渲染为结构化日志。
//! 状态机与内容记账在 application::presence，这里只做最终渲染。

use crate::application::ports::{PresenceCard, PresenceError, PresenceSinkPort};

/// 日志指示器 Sink
pub struct LogPresenceSink;

impl LogPresenceSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogPresenceSink {
    fn default() -> Self {
        Self::new()
    }
}

impl PresenceSinkPort for LogPresenceSink {
    fn show(&self, card: &PresenceCard) -> Result<(), PresenceError> {
        tracing::info!(title = %card.title, detail = %card.detail, "Presence shown");
        Ok(())
    }

    fn update(&self, card: &PresenceCard) -> Result<(), PresenceError> {
        tracing::info!(title = %card.title, detail = %card.detail, "Presence updated");
        Ok(())
    }

    fn hide(&self) -> Result<(), PresenceError> {
        tracing::info!("Presence hidden");
        Ok(())
    }
}
