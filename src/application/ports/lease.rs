//! Lease Ports - 宿主资源租约抽象
//!
//! 唤醒锁与网络保活锁的宿主句柄接口，
//! 生命周期策略由 application::leases::LeaseManager 负责。

use std::time::Duration;
use thiserror::Error;

/// 租约错误
#[derive(Debug, Error)]
pub enum LeaseError {
    #[error("Lease acquisition failed: {0}")]
    AcquisitionFailed(String),
}

/// 唤醒锁端口
///
/// 持有期间阻止宿主设备挂起；到期自动失效。
pub trait WakeLeasePort: Send + Sync {
    /// 申请唤醒锁，持有至 `ttl` 到期或显式释放
    fn acquire(&self, ttl: Duration) -> Result<(), LeaseError>;

    /// 当前是否持有（未到期）
    fn is_held(&self) -> bool;

    /// 释放；未持有时为 no-op
    fn release(&self);
}

/// 网络保活锁端口
///
/// 持有期间保持宿主网络全功率可用。
pub trait NetworkLeasePort: Send + Sync {
    fn acquire(&self) -> Result<(), LeaseError>;

    fn is_held(&self) -> bool;

    /// 释放；未持有时为 no-op
    fn release(&self);
}
