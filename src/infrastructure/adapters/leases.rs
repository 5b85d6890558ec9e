//! Lease Adapters - 进程内租约句柄
//!
//! 宿主电源管理句柄的进程内实现：
//! - 唤醒锁带 TTL 到期语义（到期自动视为未持有）
//! - 网络保活锁为简单持有标志

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::application::ports::{LeaseError, NetworkLeasePort, WakeLeasePort};

/// 进程内唤醒锁
pub struct InProcessWakeLease {
    /// 到期时刻；None 表示未持有
    expiry: Mutex<Option<Instant>>,
}

impl InProcessWakeLease {
    pub fn new() -> Self {
        Self {
            expiry: Mutex::new(None),
        }
    }
}

impl Default for InProcessWakeLease {
    fn default() -> Self {
        Self::new()
    }
}

impl WakeLeasePort for InProcessWakeLease {
    fn acquire(&self, ttl: Duration) -> Result<(), LeaseError> {
        *self.expiry.lock().unwrap() = Some(Instant::now() + ttl);
        tracing::debug!(ttl_secs = ttl.as_secs(), "Wake lease acquired");
        Ok(())
    }

    fn is_held(&self) -> bool {
        self.expiry
            .lock()
            .unwrap()
            .map(|expiry| expiry > Instant::now())
            .unwrap_or(false)
    }

    fn release(&self) {
        if self.expiry.lock().unwrap().take().is_some() {
            tracing::debug!("Wake lease released");
        }
    }
}

/// 进程内网络保活锁
pub struct InProcessNetworkLease {
    held: AtomicBool,
}

impl InProcessNetworkLease {
    pub fn new() -> Self {
        Self {
            held: AtomicBool::new(false),
        }
    }
}

impl Default for InProcessNetworkLease {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkLeasePort for InProcessNetworkLease {
    fn acquire(&self) -> Result<(), LeaseError> {
        self.held.store(true, Ordering::SeqCst);
        tracing::debug!("Network keepalive lease acquired");
        Ok(())
    }

    fn is_held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }

    fn release(&self) {
        if self.held.swap(false, Ordering::SeqCst) {
            tracing::debug!("Network keepalive lease released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wake_lease_held_until_ttl() {
        let lease = InProcessWakeLease::new();
        assert!(!lease.is_held());

        lease.acquire(Duration::from_secs(60)).unwrap();
        assert!(lease.is_held());

        lease.release();
        assert!(!lease.is_held());
    }

    #[test]
    fn test_wake_lease_expires() {
        let lease = InProcessWakeLease::new();
        lease.acquire(Duration::from_millis(10)).unwrap();
        assert!(lease.is_held());

        std::thread::sleep(Duration::from_millis(30));
        assert!(!lease.is_held());
    }

    #[test]
    fn test_wake_lease_double_release_safe() {
        let lease = InProcessWakeLease::new();
        lease.acquire(Duration::from_secs(60)).unwrap();
        lease.release();
        lease.release();
        assert!(!lease.is_held());
    }

    #[test]
    fn test_network_lease_lifecycle() {
        let lease = InProcessNetworkLease::new();
        assert!(!lease.is_held());

        lease.acquire().unwrap();
        assert!(lease.is_held());

        lease.release();
        lease.release();
        assert!(!lease.is_held());
    }
}
