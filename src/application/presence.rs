//! Presence State Machine - 前台指示器状态机
//!
//! Hidden -> Shown -> Hidden。
//! Shown 由首次合成触发，同时启动单例空闲监视任务；
//! 监视任务按固定间隔轮询引擎忙碌状态，观察到空闲即隐藏指示器并退出。
//! 监视任务的单例性通过任务句柄判定（`is_finished`），不设独立布尔标志。

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::application::ports::{PresenceCard, PresenceSinkPort, SynthesisEnginePort};

/// 指示器状态快照
#[derive(Debug, Clone)]
pub struct PresenceState {
    pub shown: bool,
    pub last_title: Option<String>,
    pub last_detail: Option<String>,
}

struct PresenceInner {
    shown: bool,
    last: Option<PresenceCard>,
    monitor: Option<JoinHandle<()>>,
}

/// 前台指示器控制器
pub struct PresenceController {
    sink: Arc<dyn PresenceSinkPort>,
    engine: Arc<dyn SynthesisEnginePort>,
    poll_interval: Duration,
    inner: Arc<Mutex<PresenceInner>>,
}

impl PresenceController {
    pub fn new(
        sink: Arc<dyn PresenceSinkPort>,
        engine: Arc<dyn SynthesisEnginePort>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            sink,
            engine,
            poll_interval,
            inner: Arc::new(Mutex::new(PresenceInner {
                shown: false,
                last: None,
                monitor: None,
            })),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 确保指示器可见
    ///
    /// Hidden -> Shown 时显示并启动空闲监视任务；
    /// 已显示时仅做纯内容更新，状态不变。
    pub fn ensure_shown(&self, card: PresenceCard) {
        let mut inner = self.inner.lock().unwrap();

        if inner.shown {
            if let Err(e) = self.sink.update(&card) {
                tracing::warn!(error = %e, "Presence update failed");
            }
            inner.last = Some(card);
            return;
        }

        if let Err(e) = self.sink.show(&card) {
            tracing::warn!(error = %e, "Presence show failed");
        }
        inner.shown = true;
        inner.last = Some(card);

        // 单例监视：句柄存活则不重复启动
        let monitor_alive = inner
            .monitor
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false);
        if !monitor_alive {
            inner.monitor = Some(self.spawn_monitor());
        }
    }

    /// 更新已显示的标题/详情（纯内容更新）
    ///
    /// 隐藏状态下的内容更新是 no-op，不会把指示器带回屏幕。
    pub fn update(&self, card: PresenceCard) {
        let mut inner = self.inner.lock().unwrap();
        if !inner.shown {
            tracing::debug!("Presence update ignored while hidden");
            return;
        }
        if let Err(e) = self.sink.update(&card) {
            tracing::warn!(error = %e, "Presence update failed");
        }
        inner.last = Some(card);
    }

    /// 立即隐藏指示器
    ///
    /// 宿主拒绝隐藏时记录日志并按已隐藏记账，绝不致命。
    pub fn hide(&self) {
        hide_locked(&self.inner, self.sink.as_ref());
    }

    pub fn is_shown(&self) -> bool {
        self.inner.lock().unwrap().shown
    }

    /// 状态快照
    pub fn state(&self) -> PresenceState {
        let inner = self.inner.lock().unwrap();
        PresenceState {
            shown: inner.shown,
            last_title: inner.last.as_ref().map(|c| c.title.clone()),
            last_detail: inner.last.as_ref().map(|c| c.detail.clone()),
        }
    }

    /// 启动空闲监视任务
    fn spawn_monitor(&self) -> JoinHandle<()> {
        let sink = self.sink.clone();
        let engine = self.engine.clone();
        let inner = self.inner.clone();
        let interval = self.poll_interval;

        tokio::spawn(async move {
            tracing::debug!(interval_secs = interval.as_secs(), "Idle monitor started");
            loop {
                tokio::time::sleep(interval).await;
                if !engine.is_synthesizing() {
                    hide_locked(&inner, sink.as_ref());
                    tracing::debug!("Idle monitor observed idle engine, stopping");
                    return;
                }
            }
        })
    }
}

/// 共享的隐藏逻辑（控制器与监视任务共用）
fn hide_locked(inner: &Mutex<PresenceInner>, sink: &dyn PresenceSinkPort) {
    let mut inner = inner.lock().unwrap();
    if !inner.shown {
        return;
    }
    if let Err(e) = sink.hide() {
        tracing::warn!(error = %e, "Presence hide failed, treating as hidden");
    }
    inner.shown = false;
}
