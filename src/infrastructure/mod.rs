//! Infrastructure Layer - 基础设施层
//!
//! - Adapters: 合成引擎、租约句柄、指示器 Sink
//! - HTTP: axum 宿主绑定
//! - Signal: Unix 信号桥接

pub mod adapters;
pub mod http;
pub mod signal;
