//! Application State

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::application::{
    ControlSignal, LeaseManager, PresenceController, SynthesisOrchestrator,
};

/// 应用状态
///
/// 编排器、指示器、租约管理器与控制信号发送端。
pub struct AppState {
    pub orchestrator: Arc<SynthesisOrchestrator>,
    pub presence: Arc<PresenceController>,
    pub leases: Arc<LeaseManager>,
    pub signals: broadcast::Sender<ControlSignal>,
}

impl AppState {
    pub fn new(
        orchestrator: Arc<SynthesisOrchestrator>,
        presence: Arc<PresenceController>,
        leases: Arc<LeaseManager>,
        signals: broadcast::Sender<ControlSignal>,
    ) -> Self {
        Self {
            orchestrator,
            presence,
            leases,
            signals,
        }
    }
}
