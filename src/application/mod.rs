//! Application Layer - 应用层
//!
//! 请求编排与资源生命周期协调：
//! - Ports: 出站端口（合成引擎、租约、指示器）
//! - LeaseManager: 唤醒锁/网络保活锁管理
//! - PresenceController: 前台指示器状态机
//! - SynthesisOrchestrator: 合成请求编排器
//! - SignalRouter: 控制信号路由

pub mod leases;
pub mod orchestrator;
pub mod ports;
pub mod presence;
pub mod signals;

#[cfg(test)]
pub(crate) mod testing;

pub use leases::{LeaseManager, LeaseState};
pub use orchestrator::{SynthesisOrchestrator, SynthesisOutput, SynthesisRequest};
pub use presence::{PresenceController, PresenceState};
pub use signals::{signal_channel, ControlSignal, RouterExit, SignalRouter};
