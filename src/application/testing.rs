//! 测试辅助 - 应用层测试用的桩实现

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::application::ports::{
    EngineAudio, EngineError, EngineEvent, EngineRequest, LeaseError, NetworkLeasePort,
    PresenceCard, PresenceError, PresenceSinkPort, SynthesisEnginePort, WakeLeasePort,
};
use crate::domain::audio;

/// 可编排的桩引擎
pub(crate) struct StubEngine {
    busy: AtomicBool,
    run_count: AtomicU32,
    concurrent: AtomicU32,
    max_concurrent: AtomicU32,
    stop_count: AtomicU32,
    reload_count: AtomicU32,
    fail: AtomicBool,
    delay: Duration,
    status_tx: broadcast::Sender<EngineEvent>,
}

impl StubEngine {
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(10))
    }

    pub fn with_delay(delay: Duration) -> Self {
        let (status_tx, _) = broadcast::channel(16);
        Self {
            busy: AtomicBool::new(false),
            run_count: AtomicU32::new(0),
            concurrent: AtomicU32::new(0),
            max_concurrent: AtomicU32::new(0),
            stop_count: AtomicU32::new(0),
            reload_count: AtomicU32::new(0),
            fail: AtomicBool::new(false),
            delay,
            status_tx,
        }
    }

    pub fn set_busy(&self, busy: bool) {
        self.busy.store(busy, Ordering::SeqCst);
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn run_count(&self) -> u32 {
        self.run_count.load(Ordering::SeqCst)
    }

    pub fn max_concurrent(&self) -> u32 {
        self.max_concurrent.load(Ordering::SeqCst)
    }

    pub fn stop_count(&self) -> u32 {
        self.stop_count.load(Ordering::SeqCst)
    }

    pub fn reload_count(&self) -> u32 {
        self.reload_count.load(Ordering::SeqCst)
    }

    pub fn push_event(&self, event: EngineEvent) {
        let _ = self.status_tx.send(event);
    }
}

#[async_trait]
impl SynthesisEnginePort for StubEngine {
    fn is_synthesizing(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    async fn run(&self, _request: EngineRequest) -> Result<EngineAudio, EngineError> {
        self.run_count.fetch_add(1, Ordering::SeqCst);
        let current = self.concurrent.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_concurrent.fetch_max(current, Ordering::SeqCst);
        self.busy.store(true, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        self.busy.store(false, Ordering::SeqCst);
        self.concurrent.fetch_sub(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            return Err(EngineError::ServiceError("stub failure".to_string()));
        }

        Ok(EngineAudio {
            audio_data: audio::silent_wav(16000, 1, 50),
            duration_ms: Some(50),
            sample_rate: Some(16000),
        })
    }

    fn stop(&self) {
        self.stop_count.fetch_add(1, Ordering::SeqCst);
        self.busy.store(false, Ordering::SeqCst);
    }

    fn reload_config(&self) {
        self.reload_count.fetch_add(1, Ordering::SeqCst);
    }

    fn subscribe_status(&self) -> broadcast::Receiver<EngineEvent> {
        self.status_tx.subscribe()
    }
}

/// 记录调用的指示器 Sink
pub(crate) struct RecordingSink {
    show_count: AtomicU32,
    update_count: AtomicU32,
    hide_count: AtomicU32,
    fail_hide: AtomicBool,
    last: Mutex<Option<PresenceCard>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            show_count: AtomicU32::new(0),
            update_count: AtomicU32::new(0),
            hide_count: AtomicU32::new(0),
            fail_hide: AtomicBool::new(false),
            last: Mutex::new(None),
        }
    }

    pub fn fail_hide(&self) {
        self.fail_hide.store(true, Ordering::SeqCst);
    }

    pub fn show_count(&self) -> u32 {
        self.show_count.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> u32 {
        self.update_count.load(Ordering::SeqCst)
    }

    pub fn hide_count(&self) -> u32 {
        self.hide_count.load(Ordering::SeqCst)
    }

    pub fn last_card(&self) -> Option<PresenceCard> {
        self.last.lock().unwrap().clone()
    }
}

impl PresenceSinkPort for RecordingSink {
    fn show(&self, card: &PresenceCard) -> Result<(), PresenceError> {
        self.show_count.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(card.clone());
        Ok(())
    }

    fn update(&self, card: &PresenceCard) -> Result<(), PresenceError> {
        self.update_count.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(card.clone());
        Ok(())
    }

    fn hide(&self) -> Result<(), PresenceError> {
        self.hide_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_hide.load(Ordering::SeqCst) {
            return Err(PresenceError::HostRefused("stub refusal".to_string()));
        }
        Ok(())
    }
}

/// 记录申请次数的唤醒锁桩
pub(crate) struct StubWakeLease {
    held: AtomicBool,
    acquire_count: AtomicU32,
    fail_next: AtomicBool,
}

impl StubWakeLease {
    pub fn new() -> Self {
        Self {
            held: AtomicBool::new(false),
            acquire_count: AtomicU32::new(0),
            fail_next: AtomicBool::new(false),
        }
    }

    pub fn acquire_count(&self) -> u32 {
        self.acquire_count.load(Ordering::SeqCst)
    }

    pub fn force_lapse(&self) {
        self.held.store(false, Ordering::SeqCst);
    }

    pub fn fail_next_acquire(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

impl WakeLeasePort for StubWakeLease {
    fn acquire(&self, _ttl: Duration) -> Result<(), LeaseError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(LeaseError::AcquisitionFailed("stub failure".to_string()));
        }
        self.acquire_count.fetch_add(1, Ordering::SeqCst);
        self.held.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }

    fn release(&self) {
        self.held.store(false, Ordering::SeqCst);
    }
}

/// 网络保活锁桩
pub(crate) struct StubNetworkLease {
    held: AtomicBool,
    acquire_count: AtomicU32,
}

impl StubNetworkLease {
    pub fn new() -> Self {
        Self {
            held: AtomicBool::new(false),
            acquire_count: AtomicU32::new(0),
        }
    }

    pub fn acquire_count(&self) -> u32 {
        self.acquire_count.load(Ordering::SeqCst)
    }
}

impl NetworkLeasePort for StubNetworkLease {
    fn acquire(&self) -> Result<(), LeaseError> {
        self.acquire_count.fetch_add(1, Ordering::SeqCst);
        self.held.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }

    fn release(&self) {
        self.held.store(false, Ordering::SeqCst);
    }
}
