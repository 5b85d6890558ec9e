//! Engine Adapters - 合成引擎适配器

mod fake_engine;
mod http_engine;

pub use fake_engine::{FakeEngineConfig, FakeSynthesisEngine};
pub use http_engine::{HttpEngineProfile, HttpSynthesisEngine};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{EngineError, EngineEvent};

/// 引擎公共运行时状态
///
/// 忙碌标志、当前取消令牌与状态事件通道，两个引擎实现共用。
pub(crate) struct EngineCore {
    busy: AtomicBool,
    cancel: Mutex<CancellationToken>,
    status_tx: broadcast::Sender<EngineEvent>,
}

impl EngineCore {
    pub fn new() -> Self {
        let (status_tx, _) = broadcast::channel(32);
        Self {
            busy: AtomicBool::new(false),
            cancel: Mutex::new(CancellationToken::new()),
            status_tx,
        }
    }

    /// 标记进入合成并换上新的取消令牌
    ///
    /// 返回忙碌守卫（Drop 时复位）与本次运行的令牌；
    /// 已在合成中则报 Busy。
    pub fn begin_run(&self) -> Result<(RunGuard<'_>, CancellationToken), EngineError> {
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(EngineError::Busy);
        }
        let token = CancellationToken::new();
        *self.cancel.lock().unwrap() = token.clone();
        Ok((RunGuard { core: self }, token))
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// 取消当前运行的令牌；无进行中合成时为 no-op
    pub fn request_stop(&self) {
        self.cancel.lock().unwrap().cancel();
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.status_tx.subscribe()
    }

    pub fn emit(&self, event: EngineEvent) {
        if self.status_tx.send(event).is_err() {
            tracing::debug!("Engine status event dropped (no subscribers)");
        }
    }
}

/// 合成期间持有的忙碌守卫
pub(crate) struct RunGuard<'a> {
    core: &'a EngineCore,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.core.busy.store(false, Ordering::SeqCst);
    }
}
