//! Systts - 平台托管的语音合成后台服务
//!
//! 架构设计: Ports + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Locale: 语言协商（精确匹配允许列表）
//! - Text: 静音文本判定
//! - Audio: PCM/WAV 音频头构造
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SynthesisEngine, WakeLease, NetworkLease, PresenceSink）
//! - LeaseManager: 唤醒锁/网络保活锁生命周期管理
//! - PresenceController: 前台状态指示器状态机（含空闲监视任务）
//! - SynthesisOrchestrator: 合成请求编排器（单飞串行化）
//! - SignalRouter: 异步控制信号路由（reload-config / cancel / kill）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful 宿主绑定（axum）
//! - Adapters: HTTP/Fake 合成引擎、进程内租约、广播 Presence Sink
//! - Signal: Unix 信号桥接

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
