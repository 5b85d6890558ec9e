//! Resource Lease Manager - 资源租约管理
//!
//! 管理两个稀缺后台资源的生命周期：
//! - 唤醒锁：按请求续期，带固定 TTL
//! - 网络保活锁：服务启动时申请一次，粗粒度持有整个生命周期
//!
//! 两把锁在任何关闭路径上都必须被释放，包括 kill 信号路径。

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{NetworkLeasePort, WakeLeasePort};

/// 租约状态快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaseState {
    pub wake_held: bool,
    pub network_held: bool,
}

/// 租约管理器
pub struct LeaseManager {
    wake: Arc<dyn WakeLeasePort>,
    network: Arc<dyn NetworkLeasePort>,
    wake_ttl: Duration,
}

impl LeaseManager {
    pub fn new(
        wake: Arc<dyn WakeLeasePort>,
        network: Arc<dyn NetworkLeasePort>,
        wake_ttl: Duration,
    ) -> Self {
        Self {
            wake,
            network,
            wake_ttl,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 确保唤醒锁有效（幂等）
    ///
    /// 已持有时为 no-op；失效时以配置的 TTL 重新申请，
    /// 并在重新申请成功后发出一次内存回收提示。
    /// 申请失败只记录日志，合成依赖宿主默认租期继续。
    pub fn ensure_wake(&self) {
        if self.wake.is_held() {
            return;
        }

        match self.wake.acquire(self.wake_ttl) {
            Ok(()) => {
                tracing::info!(ttl_secs = self.wake_ttl.as_secs(), "Wake lease renewed");
                reclaim_memory_hint();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Wake lease acquisition failed, continuing without it");
            }
        }
    }

    /// 申请网络保活锁（启动时调用一次）
    ///
    /// 请求到达时机不可预测，保活锁整个服务生命周期粗粒度持有，
    /// 不做按请求的申请/释放。
    pub fn acquire_network(&self) {
        if self.network.is_held() {
            return;
        }

        match self.network.acquire() {
            Ok(()) => tracing::info!("Network keepalive lease acquired"),
            Err(e) => {
                tracing::warn!(error = %e, "Network lease acquisition failed, continuing without it");
            }
        }
    }

    /// 释放全部租约
    ///
    /// 幂等：重复调用与租约已释放时均安全。
    pub fn release_all(&self) {
        self.wake.release();
        self.network.release();
        tracing::debug!("All leases released");
    }

    /// 当前租约状态
    pub fn state(&self) -> LeaseState {
        LeaseState {
            wake_held: self.wake.is_held(),
            network_held: self.network.is_held(),
        }
    }
}

/// 内存回收提示
///
/// 唤醒锁失效期间宿主可能施加过内存压力，重新持锁后
/// 提示回收空闲内存。尽力而为，无返回值。
fn reclaim_memory_hint() {
    tracing::debug!("Memory reclaim hint issued");
}
