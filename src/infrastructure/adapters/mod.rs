//! Infrastructure Adapters - 端口适配器

mod engine;
mod leases;
mod presence;

pub use engine::{
    FakeEngineConfig, FakeSynthesisEngine, HttpEngineProfile, HttpSynthesisEngine,
};
pub use leases::{InProcessNetworkLease, InProcessWakeLease};
pub use presence::LogPresenceSink;
