//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod engine;
mod lease;
mod presence;

pub use engine::{
    EngineAudio, EngineError, EngineEvent, EngineRequest, EngineStatus, SynthesisEnginePort,
};
pub use lease::{LeaseError, NetworkLeasePort, WakeLeasePort};
pub use presence::{PresenceCard, PresenceError, PresenceSinkPort};
